//! Core install-prompt runtime: configuration, localization, manifest assembly, gating
//! policy, and the prompt controller/UI state machines.
//!
//! Everything here is browser-agnostic; ambient capabilities flow through the `install_host`
//! port contracts, with concrete adapters in `install_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod controller;
pub mod i18n;
pub mod manifest_doc;
pub mod options;
pub mod policy;
pub mod ui;
pub mod worker_script;

pub use controller::{InstallPrompt, Phase, ResolvedOutcome};
pub use i18n::{resolve_texts, LocaleOverrides, TextBundle, TextBundlePatch};
pub use manifest_doc::{build_manifest, generate_app_id, ManifestIcon, ManifestOptions, WebAppManifest};
pub use options::{InstallMode, InstallPromptOptions, InstallPromptOptionsPatch};
pub use policy::{dismissed_recently, GateStore, MS_PER_DAY};
pub use ui::{PromptContent, PromptUi, PromptVariant, UiHooks, EXIT_ANIMATION_MS, SUCCESS_DISPLAY_MS};
pub use worker_script::PASS_THROUGH_WORKER_JS;
