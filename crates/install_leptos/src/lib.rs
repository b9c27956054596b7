//! Leptos integration: provider component and context hook for the install prompt.
//!
//! Mount [`InstallPromptProvider`] once near the application root; descendants read the
//! controller through [`use_install_prompt`] or [`expect_install_prompt`].

use install_prompt::{InstallPrompt, InstallPromptOptions};
use leptos::*;

#[derive(Clone, Copy)]
/// Leptos context handle over the shared prompt controller.
pub struct InstallPromptContext {
    prompt: StoredValue<InstallPrompt>,
}

impl InstallPromptContext {
    /// Clones out the shared controller handle.
    pub fn controller(&self) -> InstallPrompt {
        self.prompt.get_value()
    }
}

#[component]
/// Provides [`InstallPromptContext`] to descendants and runs the deferred startup sequence.
///
/// The controller is constructed over the browser host bundle immediately; `init` runs from a
/// reactive effect so it lands after the first render, when the document is fully available.
pub fn InstallPromptProvider(
    /// Prompt configuration; defaults apply when omitted.
    #[prop(optional)]
    options: Option<InstallPromptOptions>,
    children: Children,
) -> impl IntoView {
    let prompt = InstallPrompt::new(
        install_host_web::build_host_services(),
        options.unwrap_or_default(),
    );
    let context = InstallPromptContext {
        prompt: store_value(prompt),
    };
    provide_context(context);

    create_effect(move |_| {
        let prompt = context.controller();
        spawn_local(async move {
            prompt.init().await;
        });
    });

    children().into_view()
}

/// Returns the current [`InstallPromptContext`], if a provider is above this component.
pub fn use_install_prompt() -> Option<InstallPromptContext> {
    use_context()
}

/// Returns the current [`InstallPromptContext`].
///
/// # Panics
///
/// Panics if called outside [`InstallPromptProvider`].
pub fn expect_install_prompt() -> InstallPromptContext {
    use_context().expect("InstallPromptContext not provided")
}
