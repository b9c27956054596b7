//! Window install-signal bridge: `beforeinstallprompt` and `appinstalled` listeners.

use std::rc::Rc;

use install_host::{InstallEventSource, InstallSignalObserver};
#[cfg(target_arch = "wasm32")]
use install_host::{InstallChoice, InstallChoiceFuture, InstallPromptTrigger};
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

#[cfg(target_arch = "wasm32")]
struct BoundListeners {
    eligible: Closure<dyn FnMut(web_sys::Event)>,
    installed: Closure<dyn FnMut()>,
}

#[derive(Default)]
/// Event source bridging the window's install signals to one attached observer.
///
/// Attaching suppresses the platform's own install banner by calling `preventDefault` on every
/// eligibility event, so the page keeps control of when UI is shown.
pub struct WebInstallEventSource {
    #[cfg(target_arch = "wasm32")]
    bound: RefCell<Option<BoundListeners>>,
}

impl InstallEventSource for WebInstallEventSource {
    fn attach(&self, observer: Rc<dyn InstallSignalObserver>) {
        #[cfg(target_arch = "wasm32")]
        {
            self.detach();
            let Some(window) = web_sys::window() else {
                return;
            };

            let eligible_observer = observer.clone();
            let eligible = Closure::wrap(Box::new(move |event: web_sys::Event| {
                event.prevent_default();
                let trigger = Rc::new(DeferredPromptTrigger {
                    event: JsValue::from(event),
                });
                eligible_observer.install_eligible(trigger);
            }) as Box<dyn FnMut(web_sys::Event)>);
            let installed = Closure::wrap(Box::new(move || {
                observer.app_installed();
            }) as Box<dyn FnMut()>);

            let _ = window.add_event_listener_with_callback(
                "beforeinstallprompt",
                eligible.as_ref().unchecked_ref(),
            );
            let _ = window
                .add_event_listener_with_callback("appinstalled", installed.as_ref().unchecked_ref());
            *self.bound.borrow_mut() = Some(BoundListeners { eligible, installed });
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = observer;
        }
    }

    fn detach(&self) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(bound) = self.bound.borrow_mut().take() else {
                return;
            };
            if let Some(window) = web_sys::window() {
                let _ = window.remove_event_listener_with_callback(
                    "beforeinstallprompt",
                    bound.eligible.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "appinstalled",
                    bound.installed.as_ref().unchecked_ref(),
                );
            }
        }
    }
}

/// Capability token wrapping a retained `BeforeInstallPromptEvent`.
///
/// The event type is not in the generated bindings, so `prompt()` and `userChoice` are read
/// reflectively off the retained event object.
#[cfg(target_arch = "wasm32")]
struct DeferredPromptTrigger {
    event: JsValue,
}

#[cfg(target_arch = "wasm32")]
impl InstallPromptTrigger for DeferredPromptTrigger {
    fn request(&self) -> InstallChoiceFuture<'_> {
        Box::pin(async move {
            let prompt = js_sys::Reflect::get(&self.event, &"prompt".into())
                .map_err(|err| format!("read prompt() failed: {err:?}"))?;
            let prompt: js_sys::Function = prompt
                .dyn_into()
                .map_err(|_| "install event exposes no prompt()".to_string())?;
            prompt
                .call0(&self.event)
                .map_err(|err| format!("prompt() threw: {err:?}"))?;

            let user_choice = js_sys::Reflect::get(&self.event, &"userChoice".into())
                .map_err(|err| format!("read userChoice failed: {err:?}"))?;
            let user_choice: js_sys::Promise = user_choice
                .dyn_into()
                .map_err(|_| "userChoice is not a promise".to_string())?;
            let resolution = wasm_bindgen_futures::JsFuture::from(user_choice)
                .await
                .map_err(|err| format!("userChoice rejected: {err:?}"))?;

            let outcome = js_sys::Reflect::get(&resolution, &"outcome".into())
                .ok()
                .and_then(|value| value.as_string())
                .unwrap_or_default();
            if outcome == "accepted" {
                Ok(InstallChoice::Accepted)
            } else {
                Ok(InstallChoice::Dismissed)
            }
        })
    }
}
