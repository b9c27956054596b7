//! `setTimeout`-backed timer host.

use install_host::TimerHost;

#[derive(Debug, Clone, Copy, Default)]
/// Timer host scheduling one-shot callbacks on the browser event loop.
pub struct WebTimerHost;

impl TimerHost for WebTimerHost {
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::{closure::Closure, JsCast};

            let Some(window) = web_sys::window() else {
                return;
            };
            let callback = Closure::once_into_js(callback);
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                delay_ms as i32,
            );
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (delay_ms, callback);
        }
    }
}
