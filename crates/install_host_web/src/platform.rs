//! Browser platform probe: user-agent classification plus live environment signals.

use install_host::{PlatformProbe, PlatformSnapshot};

#[derive(Debug, Clone, Copy, Default)]
/// Probe reading `navigator`, media queries, and the referrer.
pub struct WebPlatformProbe;

impl WebPlatformProbe {
    fn user_agent() -> String {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()
                .and_then(|w| w.navigator().user_agent().ok())
                .unwrap_or_default()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            String::new()
        }
    }

    /// Standalone display mode, the nonstandard iOS `navigator.standalone`, or a launch from
    /// an Android trusted-web-activity referrer all count as "already installed".
    fn is_standalone() -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(window) = web_sys::window() else {
                return false;
            };
            let display_mode = window
                .match_media("(display-mode: standalone)")
                .ok()
                .flatten()
                .is_some_and(|query| query.matches());
            let navigator_standalone =
                js_sys::Reflect::get(window.navigator().as_ref(), &"standalone".into())
                    .ok()
                    .and_then(|value| value.as_bool())
                    .unwrap_or(false);
            let android_referrer = window
                .document()
                .map(|document| document.referrer().contains("android-app://"))
                .unwrap_or(false);
            display_mode || navigator_standalone || android_referrer
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            false
        }
    }
}

/// Whether the host exposes `navigator.serviceWorker`.
pub(crate) fn service_worker_supported() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().is_some_and(|window| {
            js_sys::Reflect::has(window.navigator().as_ref(), &"serviceWorker".into())
                .unwrap_or(false)
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        false
    }
}

/// Whether the host fires `beforeinstallprompt` (the event constructor is present).
pub(crate) fn install_prompt_event_supported() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().is_some_and(|window| {
            js_sys::Reflect::has(window.as_ref(), &"BeforeInstallPromptEvent".into())
                .unwrap_or(false)
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        false
    }
}

impl PlatformProbe for WebPlatformProbe {
    fn snapshot(&self) -> PlatformSnapshot {
        let mut snapshot = PlatformSnapshot::from_user_agent(&Self::user_agent());
        snapshot.is_standalone = Self::is_standalone();
        snapshot.supports_pwa = service_worker_supported()
            && (install_prompt_event_supported() || snapshot.is_ios_safari);
        snapshot
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn native_fallback_reports_an_inert_platform() {
        let snapshot = WebPlatformProbe.snapshot();
        assert!(!snapshot.supports_pwa);
        assert!(!snapshot.is_standalone);
        assert!(!snapshot.is_mobile);
    }
}
