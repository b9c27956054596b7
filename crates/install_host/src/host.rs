//! Host service bundle and capability models for runtime composition.

use std::rc::Rc;

use crate::{
    Clock, FixedClock, FixedPlatformProbe, InstallEventSource, ManifestHost, ManualTimerHost,
    MemoryInstallEventSource, MemoryManifestHost, MemoryPageContext, MemoryStateStore,
    MemorySurfaceFactory, MemoryWorkerRegistrar, PageContext, PlatformProbe, PromptSurfaceFactory,
    StateStore, TaskSpawner, TimerHost, WorkerRegistrar,
};

/// Stable host strategy selected for the current runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Live browser adapters from `install_host_web`.
    Browser,
    /// Memory/no-op adapters for tests and non-browser targets.
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Headless => "headless",
        }
    }
}

/// Host availability state for one optional capability domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityStatus {
    /// Capability is available on the active host.
    Available,
    /// Capability is not implemented or not supported on the active host.
    Unavailable,
}

impl CapabilityStatus {
    /// Returns whether the capability can be used.
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }

    /// Maps a feature-check boolean into a status.
    pub const fn from_supported(supported: bool) -> Self {
        if supported {
            Self::Available
        } else {
            Self::Unavailable
        }
    }
}

/// Host availability snapshot for the capability domains install flows depend on.
///
/// A missing capability is "cannot install", never an error; the runtime degrades and keeps
/// whatever flows remain meaningful (guided UI needs none of these).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallCapabilities {
    /// Service-worker registration availability.
    pub worker: CapabilityStatus,
    /// Native install-eligibility event availability.
    pub install_prompt_event: CapabilityStatus,
    /// In-memory resource URL (blob) provisioning availability.
    pub resource_urls: CapabilityStatus,
}

impl InstallCapabilities {
    /// Posture with every domain unavailable; the headless default.
    pub const fn none() -> Self {
        Self {
            worker: CapabilityStatus::Unavailable,
            install_prompt_event: CapabilityStatus::Unavailable,
            resource_urls: CapabilityStatus::Unavailable,
        }
    }

    /// Posture with every domain available.
    pub const fn full() -> Self {
        Self {
            worker: CapabilityStatus::Available,
            install_prompt_event: CapabilityStatus::Available,
            resource_urls: CapabilityStatus::Available,
        }
    }
}

/// Host service bundle injected into the prompt controller.
///
/// All environment-specific service selection happens before this bundle crosses into
/// `install_prompt`, which keeps the runtime decoupled from browser adapter details.
#[derive(Clone)]
pub struct InstallHostServices {
    /// Platform classification service.
    pub platform: Rc<dyn PlatformProbe>,
    /// Page metadata service.
    pub page: Rc<dyn PageContext>,
    /// Durable gating-state store.
    pub store: Rc<dyn StateStore>,
    /// Wall clock for the snooze-window policy.
    pub clock: Rc<dyn Clock>,
    /// One-shot callback scheduler.
    pub timers: Rc<dyn TimerHost>,
    /// Event-loop task spawner.
    pub spawner: Rc<dyn TaskSpawner>,
    /// Install-signal event source.
    pub install_events: Rc<dyn InstallEventSource>,
    /// Manifest resource provisioner.
    pub manifest: Rc<dyn ManifestHost>,
    /// Service-worker registrar.
    pub worker: Rc<dyn WorkerRegistrar>,
    /// Prompt rendering surface factory.
    pub surfaces: Rc<dyn PromptSurfaceFactory>,
    /// Host availability snapshot for install capability domains.
    pub capabilities: InstallCapabilities,
    /// Stable strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl InstallHostServices {
    /// Assembles a headless bundle from memory adapters.
    ///
    /// Tests start from this bundle and replace individual fields with their own fakes; the
    /// capability posture defaults to fully available so gated flows run.
    pub fn headless(spawner: Rc<dyn TaskSpawner>) -> Self {
        Self {
            platform: Rc::new(FixedPlatformProbe::default()),
            page: Rc::new(MemoryPageContext::default()),
            store: Rc::new(MemoryStateStore::default()),
            clock: Rc::new(FixedClock::default()),
            timers: Rc::new(ManualTimerHost::default()),
            spawner,
            install_events: Rc::new(MemoryInstallEventSource::default()),
            manifest: Rc::new(MemoryManifestHost::default()),
            worker: Rc::new(MemoryWorkerRegistrar::default()),
            surfaces: Rc::new(MemorySurfaceFactory::default()),
            capabilities: InstallCapabilities::full(),
            host_strategy: HostStrategy::Headless,
        }
    }
}
