//! Browser (`wasm32`) implementations of [`install_host`] service contracts.
//!
//! This crate is the concrete browser-side wiring layer: platform probing, page scraping,
//! `localStorage` gating state, install-signal listeners, Blob-URL manifest/worker
//! provisioning, the DOM prompt surface, and timer/spawner glue. Every adapter carries a
//! non-wasm fallback stub so the crate compiles and tests on native targets.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod adapters;
pub mod events;
pub mod logging;
pub mod manifest;
pub mod page;
pub mod platform;
pub mod spawn;
pub mod storage;
pub mod styles;
pub mod surface;
pub mod timers;
pub mod worker;

pub use adapters::{build_host_services, detect_capabilities};
pub use events::WebInstallEventSource;
pub use logging::init_console_logging;
pub use manifest::WebManifestHost;
pub use page::WebPageContext;
pub use platform::WebPlatformProbe;
pub use spawn::WebTaskSpawner;
pub use storage::{storage_key, storage_key_prefix, WebStateStore, STORAGE_PREFIX};
pub use surface::{WebPromptSurface, WebPromptSurfaceFactory};
pub use timers::WebTimerHost;
pub use worker::WebWorkerRegistrar;
