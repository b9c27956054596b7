//! Browser bundle assembly and runtime capability posture.

use std::rc::Rc;

use install_host::{
    CapabilityStatus, HostStrategy, InstallCapabilities, InstallHostServices, SystemClock,
};

use crate::{
    events::WebInstallEventSource, manifest, manifest::WebManifestHost, page::WebPageContext,
    platform, platform::WebPlatformProbe, spawn::WebTaskSpawner, storage::WebStateStore,
    surface::WebPromptSurfaceFactory, timers::WebTimerHost, worker::WebWorkerRegistrar,
};

/// Probes the live environment for the install capability posture.
pub fn detect_capabilities() -> InstallCapabilities {
    InstallCapabilities {
        worker: CapabilityStatus::from_supported(platform::service_worker_supported()),
        install_prompt_event: CapabilityStatus::from_supported(
            platform::install_prompt_event_supported(),
        ),
        resource_urls: CapabilityStatus::from_supported(manifest::resource_urls_supported()),
    }
}

/// Assembles the browser host bundle for the prompt controller.
pub fn build_host_services() -> InstallHostServices {
    InstallHostServices {
        platform: Rc::new(WebPlatformProbe),
        page: Rc::new(WebPageContext),
        store: Rc::new(WebStateStore),
        clock: Rc::new(SystemClock),
        timers: Rc::new(WebTimerHost),
        spawner: Rc::new(WebTaskSpawner),
        install_events: Rc::new(WebInstallEventSource::default()),
        manifest: Rc::new(WebManifestHost),
        worker: Rc::new(WebWorkerRegistrar),
        surfaces: Rc::new(WebPromptSurfaceFactory),
        capabilities: detect_capabilities(),
        host_strategy: HostStrategy::Browser,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn native_builds_report_the_browser_strategy_with_no_capabilities() {
        let services = build_host_services();
        assert_eq!(services.host_strategy, HostStrategy::Browser);
        assert_eq!(services.capabilities, InstallCapabilities::none());
    }
}
