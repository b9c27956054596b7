//! Typed host-domain contracts and shared models for the install-prompt runtime.
//!
//! This crate is the API-first boundary for browser platform services. It exposes the
//! platform-classification model, persistence/timer/spawner/event ports, and prompt-surface
//! contracts while concrete browser adapters live in `install_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod events;
pub mod host;
pub mod manifest;
pub mod page;
pub mod platform;
pub mod spawn;
pub mod storage;
pub mod surface;
pub mod time;
pub mod timers;
pub mod worker;

pub use events::{
    InstallChoice, InstallChoiceFuture, InstallEventSource, InstallPromptTrigger,
    InstallSignalObserver, MemoryInstallEventSource, NoopInstallEventSource, ScriptedTrigger,
};
pub use host::{CapabilityStatus, HostStrategy, InstallCapabilities, InstallHostServices};
pub use manifest::{ManifestHandle, ManifestHost, MemoryManifestHost, NoopManifestHost};
pub use page::{MemoryPageContext, PageContext};
pub use platform::{FixedPlatformProbe, PlatformProbe, PlatformSnapshot, UaProfile};
pub use spawn::{BlockingTaskSpawner, NoopTaskSpawner, SpawnedTask, TaskSpawner};
pub use storage::{MemoryStateStore, NoopStateStore, StateSlot, StateStore};
pub use surface::{
    MemorySurface, MemorySurfaceFactory, NoopSurfaceFactory, PromptActions, PromptSurface,
    PromptSurfaceFactory, PromptView, SurfaceEvent,
};
pub use time::{unix_time_ms_now, Clock, FixedClock, SystemClock};
pub use timers::{ManualTimerHost, NoopTimerHost, TimerHost};
pub use worker::{
    MemoryWorkerRegistrar, NoopWorkerRegistrar, WorkerFuture, WorkerRegistrar, WorkerRegistration,
};
