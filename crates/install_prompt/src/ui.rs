//! Prompt UI variant machine.
//!
//! Exactly one of three render modes is chosen at construction and fixed for the instance's
//! lifetime. The machine owns resolution semantics (what persists, which callbacks fire) and
//! describes what to draw through the [`PromptSurface`] port; it never touches the document.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use install_host::{
    InstallChoice, InstallPromptTrigger, PromptActions, PromptSurface, PromptView, TaskSpawner,
    TimerHost,
};

use crate::{i18n::TextBundle, policy::GateStore};

/// How long the success card stays up before auto-hiding, in milliseconds.
pub const SUCCESS_DISPLAY_MS: u32 = 3_000;
/// Duration of the fade/slide-out animation before the subtree detaches, in milliseconds.
pub const EXIT_ANIMATION_MS: u32 = 300;

/// Render mode fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptVariant {
    /// Step-by-step instructions for platforms without a native prompt; dismiss only.
    Guided,
    /// Installing placeholder that invokes the native prompt without waiting for a click.
    Automatic,
    /// Title, description, and explicit install/dismiss actions.
    Interactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiState {
    Created,
    Shown,
    Installing,
    Success,
    Hiding,
    Hidden,
}

/// Controller-provided callbacks the UI resolves into.
#[derive(Clone)]
pub struct UiHooks {
    /// A confirmed installation finished displaying; the controller owns the once-guard.
    pub on_installed: Rc<dyn Fn()>,
    /// The user dismissed the prompt or rejected the native dialog.
    pub on_dismiss: Rc<dyn Fn()>,
    /// The capability token was consumed by a definite outcome.
    pub on_token_consumed: Rc<dyn Fn()>,
}

/// Localized strings and page identity rendered into the card.
#[derive(Debug, Clone)]
pub struct PromptContent {
    /// Resolved text bundle for the active locale.
    pub texts: TextBundle,
    /// Application name shown in the card header.
    pub app_name: String,
    /// Icon URL shown in the card header.
    pub icon_url: String,
}

struct UiInner {
    variant: PromptVariant,
    surface: Rc<dyn PromptSurface>,
    timers: Rc<dyn TimerHost>,
    spawner: Rc<dyn TaskSpawner>,
    gates: GateStore,
    content: PromptContent,
    hooks: UiHooks,
    token: RefCell<Option<Rc<dyn InstallPromptTrigger>>>,
    state: Cell<UiState>,
}

/// One live prompt instance; at most one per controller.
#[derive(Clone)]
pub struct PromptUi {
    inner: Rc<UiInner>,
}

impl PromptUi {
    /// Builds a prompt instance in the `Created` state; nothing renders until [`show`].
    ///
    /// [`show`]: PromptUi::show
    pub fn new(
        variant: PromptVariant,
        surface: Rc<dyn PromptSurface>,
        timers: Rc<dyn TimerHost>,
        spawner: Rc<dyn TaskSpawner>,
        gates: GateStore,
        content: PromptContent,
        hooks: UiHooks,
    ) -> Self {
        Self {
            inner: Rc::new(UiInner {
                variant,
                surface,
                timers,
                spawner,
                gates,
                content,
                hooks,
                token: RefCell::new(None),
                state: Cell::new(UiState::Created),
            }),
        }
    }

    /// Hands the instance the current capability token, if any.
    pub fn set_token(&self, token: Option<Rc<dyn InstallPromptTrigger>>) {
        *self.inner.token.borrow_mut() = token;
    }

    /// The render mode fixed at construction.
    pub fn variant(&self) -> PromptVariant {
        self.inner.variant
    }

    /// Whether the instance still owns a mounted (or mounting-out) subtree.
    pub fn is_live(&self) -> bool {
        !matches!(self.inner.state.get(), UiState::Hidden)
    }

    /// Mounts the variant's initial card; re-entrant calls are no-ops.
    ///
    /// The automatic variant invokes the native prompt flow immediately after mounting.
    ///
    /// # Errors
    ///
    /// Returns an error when the surface cannot attach its subtree.
    pub fn show(&self) -> Result<(), String> {
        let inner = &self.inner;
        if inner.state.get() != UiState::Created {
            return Ok(());
        }

        let view = match inner.variant {
            PromptVariant::Guided => inner.guided_view(),
            PromptVariant::Automatic => inner.installing_view(),
            PromptVariant::Interactive => inner.interactive_view(),
        };
        let actions = PromptActions {
            on_install: matches!(inner.variant, PromptVariant::Interactive).then(|| {
                let inner = inner.clone();
                Rc::new(move || UiInner::begin_install(&inner)) as Rc<dyn Fn()>
            }),
            on_dismiss: {
                let inner = inner.clone();
                Rc::new(move || UiInner::dismiss(&inner))
            },
        };
        inner.surface.mount(&view, actions)?;
        inner.state.set(UiState::Shown);

        if inner.variant == PromptVariant::Automatic {
            UiInner::begin_auto_install(inner);
        }
        Ok(())
    }

    /// Swaps to the success card and auto-hides after the fixed display window.
    pub fn show_success(&self) {
        UiInner::show_success(&self.inner);
    }

    /// Starts the exit animation and detaches; safe no-op while already hiding or hidden.
    pub fn hide(&self) {
        UiInner::hide(&self.inner);
    }

    /// Hides the instance and drops its token.
    pub fn destroy(&self) {
        self.inner.token.borrow_mut().take();
        UiInner::hide(&self.inner);
    }
}

impl UiInner {
    fn interactive_view(&self) -> PromptView {
        PromptView::Interactive {
            app_name: self.content.app_name.clone(),
            icon_url: self.content.icon_url.clone(),
            title: self.content.texts.title.clone(),
            description: self.content.texts.description.clone(),
            install_label: self.content.texts.install_button.clone(),
            dismiss_label: self.content.texts.dismiss_button.clone(),
        }
    }

    fn guided_view(&self) -> PromptView {
        PromptView::Guided {
            app_name: self.content.app_name.clone(),
            icon_url: self.content.icon_url.clone(),
            title: self.content.texts.ios_title.clone(),
            description: self.content.texts.description.clone(),
            dismiss_label: self.content.texts.dismiss_button.clone(),
            steps: [
                self.content.texts.ios_step1.clone(),
                self.content.texts.ios_step2.clone(),
                self.content.texts.ios_step3.clone(),
            ],
        }
    }

    fn installing_view(&self) -> PromptView {
        PromptView::Installing {
            app_name: self.content.app_name.clone(),
            icon_url: self.content.icon_url.clone(),
            status: self.content.texts.installing.clone(),
            detail: self.content.texts.installing_description.clone(),
        }
    }

    fn success_view(&self) -> PromptView {
        PromptView::Success {
            title: self.content.texts.installed_title.clone(),
            description: self.content.texts.installed_description.clone(),
        }
    }

    /// Interactive install click: swap to the installing card and run the native flow.
    fn begin_install(inner: &Rc<Self>) {
        if inner.state.get() != UiState::Shown {
            return;
        }
        if inner.token.borrow().is_none() {
            log::warn!("install requested without a live install token");
            return;
        }
        inner.surface.swap(&inner.installing_view());
        inner.state.set(UiState::Installing);
        Self::run_native_prompt(inner);
    }

    /// Automatic mode: the installing card is already up; run the native flow directly.
    fn begin_auto_install(inner: &Rc<Self>) {
        if inner.token.borrow().is_none() {
            log::warn!("automatic install without a live install token");
            Self::hide(inner);
            return;
        }
        inner.state.set(UiState::Installing);
        Self::run_native_prompt(inner);
    }

    /// Invokes the native prompt and applies the three-way resolution.
    ///
    /// Acceptance persists the installed flag and shows the success card; explicit rejection
    /// persists a dismissal and hides; a thrown platform error hides silently with no
    /// persistence. All three consume the token.
    fn run_native_prompt(inner: &Rc<Self>) {
        let Some(token) = inner.token.borrow_mut().take() else {
            return;
        };
        let inner = inner.clone();
        let spawner = inner.spawner.clone();
        spawner.spawn(Box::pin(async move {
            let outcome = token.request().await;
            (inner.hooks.on_token_consumed)();
            match outcome {
                Ok(InstallChoice::Accepted) => {
                    inner.gates.record_installed();
                    Self::show_success(&inner);
                }
                Ok(InstallChoice::Dismissed) => {
                    inner.gates.record_dismissal();
                    Self::hide(&inner);
                    (inner.hooks.on_dismiss)();
                }
                Err(err) => {
                    log::warn!("install prompt invocation failed: {err}");
                    Self::hide(&inner);
                }
            }
        }));
    }

    /// Dismiss/close affordance: persist the dismissal and notify.
    fn dismiss(inner: &Rc<Self>) {
        if matches!(inner.state.get(), UiState::Hiding | UiState::Hidden) {
            return;
        }
        inner.gates.record_dismissal();
        Self::hide(inner);
        (inner.hooks.on_dismiss)();
    }

    fn show_success(inner: &Rc<Self>) {
        if matches!(inner.state.get(), UiState::Success | UiState::Hiding | UiState::Hidden) {
            return;
        }
        inner.surface.swap(&inner.success_view());
        inner.state.set(UiState::Success);

        let inner = inner.clone();
        let timers = inner.timers.clone();
        timers.schedule(SUCCESS_DISPLAY_MS, Box::new(move || {
            // The instance may have been torn down while the card was up.
            if inner.state.get() == UiState::Success {
                Self::hide(&inner);
                (inner.hooks.on_installed)();
            }
        }));
    }

    fn hide(inner: &Rc<Self>) {
        if matches!(inner.state.get(), UiState::Hiding | UiState::Hidden) {
            return;
        }
        inner.state.set(UiState::Hiding);
        inner.surface.begin_exit();

        let inner = inner.clone();
        let timers = inner.timers.clone();
        timers.schedule(EXIT_ANIMATION_MS, Box::new(move || {
            if inner.state.get() == UiState::Hiding {
                inner.surface.detach();
                inner.state.set(UiState::Hidden);
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use install_host::{
        BlockingTaskSpawner, FixedClock, ManualTimerHost, MemoryStateStore, MemorySurface,
        ScriptedTrigger, StateSlot, StateStore, SurfaceEvent,
    };
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::i18n::english;

    struct Fixture {
        surface: Rc<MemorySurface>,
        timers: ManualTimerHost,
        store: MemoryStateStore,
        installed_fired: Rc<Cell<u32>>,
        dismissed_fired: Rc<Cell<u32>>,
        token_consumed: Rc<Cell<u32>>,
    }

    fn fixture(variant: PromptVariant) -> (PromptUi, Fixture) {
        let surface = Rc::new(MemorySurface::default());
        let timers = ManualTimerHost::default();
        let store = MemoryStateStore::default();
        let installed_fired = Rc::new(Cell::new(0));
        let dismissed_fired = Rc::new(Cell::new(0));
        let token_consumed = Rc::new(Cell::new(0));

        let hooks = UiHooks {
            on_installed: {
                let counter = installed_fired.clone();
                Rc::new(move || counter.set(counter.get() + 1))
            },
            on_dismiss: {
                let counter = dismissed_fired.clone();
                Rc::new(move || counter.set(counter.get() + 1))
            },
            on_token_consumed: {
                let counter = token_consumed.clone();
                Rc::new(move || counter.set(counter.get() + 1))
            },
        };
        let ui = PromptUi::new(
            variant,
            surface.clone(),
            Rc::new(timers.clone()),
            Rc::new(BlockingTaskSpawner),
            GateStore::new(Rc::new(store.clone()), Rc::new(FixedClock::at(10_000))),
            PromptContent {
                texts: english(),
                app_name: "Example App".to_string(),
                icon_url: "https://example.com/favicon.ico".to_string(),
            },
            hooks,
        );
        (
            ui,
            Fixture {
                surface,
                timers,
                store,
                installed_fired,
                dismissed_fired,
                token_consumed,
            },
        )
    }

    fn dismissed_record(store: &MemoryStateStore) -> Option<String> {
        store.load(StateSlot::DismissedAt)
    }

    #[test]
    fn interactive_mounts_the_action_card_and_show_is_reentrant() {
        let (ui, fx) = fixture(PromptVariant::Interactive);
        ui.show().expect("show");
        ui.show().expect("second show is a no-op");

        let events = fx.surface.events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], SurfaceEvent::Mounted(PromptView::Interactive { .. })));
    }

    #[test]
    fn guided_mounts_steps_and_dismiss_persists() {
        let (ui, fx) = fixture(PromptVariant::Guided);
        ui.show().expect("show");
        assert!(matches!(
            fx.surface.current_view(),
            Some(PromptView::Guided { .. })
        ));

        fx.surface.click_dismiss();
        assert!(dismissed_record(&fx.store).is_some());
        assert_eq!(fx.dismissed_fired.get(), 1);
        assert_eq!(
            fx.surface.events().last(),
            Some(&SurfaceEvent::ExitBegan)
        );

        // Exit animation completes and detaches exactly once.
        assert_eq!(fx.timers.next_delay_ms(), Some(EXIT_ANIMATION_MS));
        fx.timers.fire_all();
        assert_eq!(fx.surface.events().last(), Some(&SurfaceEvent::Detached));
        assert!(!ui.is_live());
    }

    #[test]
    fn interactive_accept_shows_success_then_fires_installed_once() {
        let (ui, fx) = fixture(PromptVariant::Interactive);
        ui.set_token(Some(ScriptedTrigger::accepting()));
        ui.show().expect("show");

        fx.surface.click_install();
        assert_eq!(fx.token_consumed.get(), 1);
        assert!(matches!(
            fx.surface.current_view(),
            Some(PromptView::Success { .. })
        ));
        assert_eq!(fx.store.load(StateSlot::Installed), Some("true".to_string()));
        assert!(dismissed_record(&fx.store).is_none());

        assert_eq!(fx.timers.next_delay_ms(), Some(SUCCESS_DISPLAY_MS));
        fx.timers.fire_all();
        assert_eq!(fx.installed_fired.get(), 1);
        assert!(!ui.is_live());
    }

    #[test]
    fn interactive_rejection_persists_a_dismissal() {
        let (ui, fx) = fixture(PromptVariant::Interactive);
        ui.set_token(Some(ScriptedTrigger::dismissing()));
        ui.show().expect("show");

        fx.surface.click_install();
        assert!(dismissed_record(&fx.store).is_some());
        assert_eq!(fx.dismissed_fired.get(), 1);
        assert_eq!(fx.store.load(StateSlot::Installed), None);
    }

    #[test]
    fn prompt_error_hides_silently_without_persistence() {
        let (ui, fx) = fixture(PromptVariant::Interactive);
        ui.set_token(Some(ScriptedTrigger::failing("platform exploded")));
        ui.show().expect("show");

        fx.surface.click_install();
        fx.timers.fire_all();
        assert!(!ui.is_live());
        assert!(dismissed_record(&fx.store).is_none());
        assert_eq!(fx.store.load(StateSlot::Installed), None);
        assert_eq!(fx.dismissed_fired.get(), 0);
        assert_eq!(fx.installed_fired.get(), 0);
    }

    #[test]
    fn install_click_without_token_keeps_the_card_up() {
        let (ui, fx) = fixture(PromptVariant::Interactive);
        ui.show().expect("show");

        fx.surface.click_install();
        assert!(matches!(
            fx.surface.current_view(),
            Some(PromptView::Interactive { .. })
        ));
        assert!(ui.is_live());
    }

    #[test]
    fn automatic_mode_runs_the_flow_without_a_click() {
        let (ui, fx) = fixture(PromptVariant::Automatic);
        ui.set_token(Some(ScriptedTrigger::accepting()));
        ui.show().expect("show");

        // Mounted straight into the installing card, then resolved to success.
        assert!(matches!(
            fx.surface.events()[0],
            SurfaceEvent::Mounted(PromptView::Installing { .. })
        ));
        assert!(matches!(
            fx.surface.current_view(),
            Some(PromptView::Success { .. })
        ));
        assert_eq!(fx.store.load(StateSlot::Installed), Some("true".to_string()));
    }

    #[test]
    fn automatic_rejection_persists_a_dismissal_and_notifies() {
        let (ui, fx) = fixture(PromptVariant::Automatic);
        ui.set_token(Some(ScriptedTrigger::dismissing()));
        ui.show().expect("show");

        assert!(dismissed_record(&fx.store).is_some());
        assert_eq!(fx.dismissed_fired.get(), 1);
    }

    #[test]
    fn automatic_mode_without_token_hides_silently() {
        let (ui, fx) = fixture(PromptVariant::Automatic);
        ui.show().expect("show");
        fx.timers.fire_all();

        assert!(!ui.is_live());
        assert!(dismissed_record(&fx.store).is_none());
        assert_eq!(fx.dismissed_fired.get(), 0);
    }

    #[test]
    fn hide_is_idempotent_and_detaches_once() {
        let (ui, fx) = fixture(PromptVariant::Interactive);
        ui.show().expect("show");

        ui.hide();
        ui.hide();
        fx.timers.fire_all();
        ui.hide();

        let detaches = fx
            .surface
            .events()
            .iter()
            .filter(|event| **event == SurfaceEvent::Detached)
            .count();
        assert_eq!(detaches, 1);
    }

    #[test]
    fn destroy_during_success_display_suppresses_the_stale_timer() {
        let (ui, fx) = fixture(PromptVariant::Interactive);
        ui.set_token(Some(ScriptedTrigger::accepting()));
        ui.show().expect("show");
        fx.surface.click_install();

        ui.destroy();
        fx.timers.fire_all();
        assert_eq!(fx.installed_fired.get(), 0);
        assert!(!ui.is_live());
    }
}
