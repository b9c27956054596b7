//! Install prompt controller: the gated lifecycle state machine and public surface.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use install_host::{
    InstallChoice, InstallHostServices, InstallPromptTrigger, InstallSignalObserver,
    ManifestHandle, PlatformSnapshot, WorkerRegistration,
};

use crate::{
    i18n::resolve_texts,
    manifest_doc::build_manifest,
    options::{InstallMode, InstallPromptOptions, InstallPromptOptionsPatch},
    policy::GateStore,
    ui::{PromptContent, PromptUi, PromptVariant, UiHooks},
    worker_script::PASS_THROUGH_WORKER_JS,
};

/// Terminal outcome of one prompt lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedOutcome {
    /// The installation was confirmed.
    Accepted,
    /// The user dismissed the prompt.
    Dismissed,
    /// The environment has nothing to prompt for (standalone mode).
    Unavailable,
}

/// Lifecycle phase of the controller.
///
/// `Listening` is re-entered on every fresh eligibility signal; each signal simply replaces
/// the retained capability token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed; `init` not yet run.
    Uninitialized,
    /// `init` is evaluating the startup gates.
    Initializing,
    /// Gates passed; waiting for a platform signal (or the scheduled guided display).
    Listening,
    /// A native-prompt UI instance is up.
    PromptPending,
    /// A guided UI instance is up.
    IosGuided,
    /// The lifecycle reached a terminal outcome for this session.
    Resolved(ResolvedOutcome),
    /// Torn down; `init` may start a fresh lifecycle.
    Destroyed,
}

struct ControllerInner {
    host: InstallHostServices,
    options: RefCell<InstallPromptOptions>,
    gates: GateStore,
    phase: Cell<Phase>,
    initialized: Cell<bool>,
    manifest_handle: RefCell<Option<ManifestHandle>>,
    token: RefCell<Option<Rc<dyn InstallPromptTrigger>>>,
    ui: RefCell<Option<PromptUi>>,
    // Timers cannot be cancelled; callbacks from a previous lifecycle compare epochs and bail.
    epoch: Cell<u64>,
    installed_notified: Cell<bool>,
}

impl ControllerInner {
    fn debug_log(&self, message: &str) {
        if self.options.borrow().debug {
            log::debug!("[web-to-desktop] {message}");
        }
    }

    fn ui_live(&self) -> bool {
        self.ui.borrow().as_ref().is_some_and(PromptUi::is_live)
    }
}

/// Observer registered with the platform event source for one controller.
struct ControllerObserver {
    inner: Rc<ControllerInner>,
}

impl InstallSignalObserver for ControllerObserver {
    fn install_eligible(&self, trigger: Rc<dyn InstallPromptTrigger>) {
        let inner = &self.inner;
        inner.debug_log("install eligibility signal received");
        *inner.token.borrow_mut() = Some(trigger);
        if !inner.ui_live() && inner.phase.get() != Phase::Destroyed {
            inner.phase.set(Phase::Listening);
        }
        schedule_show(inner);
    }

    fn app_installed(&self) {
        let inner = &self.inner;
        inner.debug_log("platform reported the app installed");
        inner.gates.record_installed();
        let ui = inner.ui.borrow().clone();
        if let Some(ui) = ui {
            ui.show_success();
        }
        inner.phase.set(Phase::Resolved(ResolvedOutcome::Accepted));
        fire_installed_once(inner);
    }
}

/// Prompts visitors to install the current site as a desktop app.
///
/// Cheap to clone; clones share one controller.
#[derive(Clone)]
pub struct InstallPrompt {
    inner: Rc<ControllerInner>,
}

impl InstallPrompt {
    /// Builds a controller over a host bundle; nothing happens until [`init`].
    ///
    /// [`init`]: InstallPrompt::init
    pub fn new(host: InstallHostServices, options: InstallPromptOptions) -> Self {
        let gates = GateStore::new(host.store.clone(), host.clock.clone());
        Self {
            inner: Rc::new(ControllerInner {
                host,
                options: RefCell::new(options),
                gates,
                phase: Cell::new(Phase::Uninitialized),
                initialized: Cell::new(false),
                manifest_handle: RefCell::new(None),
                token: RefCell::new(None),
                ui: RefCell::new(None),
                epoch: Cell::new(0),
                installed_notified: Cell::new(false),
            }),
        }
    }

    /// Controller with default options.
    pub fn with_defaults(host: InstallHostServices) -> Self {
        Self::new(host, InstallPromptOptions::defaults())
    }

    /// Runs the gated startup sequence; idempotent.
    ///
    /// Each gate is terminal for the session: standalone mode, an active snooze window, and a
    /// persisted installed flag all short-circuit before any side effect. Past the gates the
    /// manifest is provisioned, the pass-through worker registered, and the platform listeners
    /// attached; iOS Safari additionally schedules the guided display, since it never emits an
    /// eligibility signal.
    pub async fn init(&self) {
        let inner = &self.inner;
        if inner.initialized.get() {
            inner.debug_log("already initialized, skipping");
            return;
        }
        inner.phase.set(Phase::Initializing);

        let snapshot = inner.host.platform.snapshot();
        if snapshot.is_standalone {
            inner.debug_log("running standalone, nothing to prompt for");
            inner.phase.set(Phase::Resolved(ResolvedOutcome::Unavailable));
            return;
        }
        let expire_days = inner.options.borrow().dismiss_expire_days;
        if inner.gates.in_snooze_window(expire_days) {
            inner.debug_log("inside the dismissal snooze window, skipping");
            inner.phase.set(Phase::Resolved(ResolvedOutcome::Dismissed));
            return;
        }
        if inner.gates.installed() {
            inner.debug_log("already installed, skipping");
            inner.phase.set(Phase::Resolved(ResolvedOutcome::Accepted));
            return;
        }

        // Provisioning failures degrade: listeners still attach and guided UI still works.
        provision_manifest(inner);
        register_worker(inner).await;

        inner
            .host
            .install_events
            .attach(Rc::new(ControllerObserver { inner: inner.clone() }));
        inner.initialized.set(true);
        inner.phase.set(Phase::Listening);
        inner.debug_log("initialized");

        if snapshot.is_ios_safari {
            inner.debug_log("iOS Safari detected, scheduling guided prompt");
            schedule_show(inner);
        }
    }

    /// On-demand install using the retained capability token.
    ///
    /// Returns `true` only on platform-reported acceptance, which also persists the installed
    /// flag. Rejection and platform errors return `false`; neither records a dismissal, so a
    /// manual retry never arms the snooze window. Errors are logged, never propagated.
    pub async fn install(&self) -> bool {
        let inner = &self.inner;
        let token = inner.token.borrow().clone();
        let Some(token) = token else {
            inner.debug_log("install requested without a live token");
            return false;
        };
        match token.request().await {
            Ok(InstallChoice::Accepted) => {
                inner.debug_log("native prompt accepted");
                inner.gates.record_installed();
                inner.token.borrow_mut().take();
                inner.phase.set(Phase::Resolved(ResolvedOutcome::Accepted));
                true
            }
            Ok(InstallChoice::Dismissed) => {
                inner.debug_log("native prompt dismissed");
                inner.token.borrow_mut().take();
                false
            }
            Err(err) => {
                // The token survives a thrown error so a later attempt may retry.
                log::warn!("install prompt invocation failed: {err}");
                false
            }
        }
    }

    /// Starts the exit animation on the live UI instance, if any; idempotent.
    pub fn hide(&self) {
        let ui = self.inner.ui.borrow().clone();
        if let Some(ui) = ui {
            ui.hide();
        }
    }

    /// Tears the controller down; idempotent.
    ///
    /// Detaches both platform listeners, destroys any live UI instance, revokes the manifest
    /// resource, clears the retained token, and marks the controller non-initialized.
    pub fn destroy(&self) {
        let inner = &self.inner;
        inner.host.install_events.detach();
        inner.epoch.set(inner.epoch.get() + 1);
        if let Some(ui) = inner.ui.borrow_mut().take() {
            ui.destroy();
        }
        if let Some(handle) = inner.manifest_handle.borrow_mut().take() {
            inner.host.manifest.revoke(&handle);
        }
        inner.token.borrow_mut().take();
        inner.initialized.set(false);
        inner.phase.set(Phase::Destroyed);
        inner.debug_log("destroyed");
    }

    /// Whether an install path is currently available (live token, or the guided platform).
    pub fn can_install(&self) -> bool {
        self.inner.token.borrow().is_some() || self.inner.host.platform.snapshot().is_ios_safari
    }

    /// Whether an installation was recorded, or the page already runs standalone.
    pub fn is_installed(&self) -> bool {
        self.inner.gates.installed() || self.inner.host.platform.snapshot().is_standalone
    }

    /// Immediately shows the prompt, bypassing the delay and snooze gates.
    ///
    /// Standalone mode still blocks: there is nothing meaningful to prompt for from inside the
    /// installed app. Any currently-showing instance is hidden and replaced with a fresh one.
    /// Returns whether display was actually triggered.
    pub fn show_prompt_manual(&self) -> bool {
        let inner = &self.inner;
        if inner.host.platform.snapshot().is_standalone {
            inner.debug_log("running standalone, manual prompt unavailable");
            return false;
        }
        if let Some(ui) = inner.ui.borrow_mut().take() {
            ui.hide();
        }
        inner.debug_log("manual prompt requested");
        present_prompt(inner)
    }

    /// Clears both persisted gate records; in-memory state (including the token) is untouched.
    pub fn reset_dismiss_state(&self) {
        self.inner.gates.reset();
        self.inner.debug_log("persisted gate records cleared");
    }

    /// Shallow-merges `patch` over the current options.
    pub fn update_options(&self, patch: InstallPromptOptionsPatch) {
        self.inner.options.borrow_mut().apply(patch);
        self.inner.debug_log("options updated");
    }

    /// Defensive copy of the current options.
    pub fn options(&self) -> InstallPromptOptions {
        self.inner.options.borrow().clone()
    }

    /// Snapshot of every platform-detection boolean.
    pub fn platform_info(&self) -> PlatformSnapshot {
        self.inner.host.platform.snapshot()
    }

    /// Current lifecycle phase, for diagnostics.
    pub fn phase(&self) -> Phase {
        self.inner.phase.get()
    }
}

fn provision_manifest(inner: &Rc<ControllerInner>) {
    let options = inner.options.borrow();
    let manifest = build_manifest(
        inner.host.page.as_ref(),
        &options.theme_color,
        options.manifest_options.as_ref(),
    );
    drop(options);

    let json = match serde_json::to_string_pretty(&manifest) {
        Ok(json) => json,
        Err(err) => {
            log::warn!("manifest serialization failed: {err}");
            return;
        }
    };
    // Re-init after destroy provisions again; the previous handle must not leak.
    if let Some(previous) = inner.manifest_handle.borrow_mut().take() {
        inner.host.manifest.revoke(&previous);
    }
    match inner.host.manifest.provision(&json) {
        Ok(handle) => {
            *inner.manifest_handle.borrow_mut() = Some(handle);
            inner.debug_log("manifest provisioned");
        }
        Err(err) => log::warn!("manifest provisioning failed, continuing without: {err}"),
    }
}

async fn register_worker(inner: &Rc<ControllerInner>) {
    match inner.host.worker.ensure_registered(PASS_THROUGH_WORKER_JS).await {
        Ok(WorkerRegistration::Created) => inner.debug_log("service worker registered"),
        Ok(WorkerRegistration::Reused) => inner.debug_log("existing service worker reused"),
        Ok(WorkerRegistration::Unsupported) => inner.debug_log("service workers unsupported"),
        Err(err) => log::warn!("service worker registration failed, continuing without: {err}"),
    }
}

fn schedule_show(inner: &Rc<ControllerInner>) {
    let delay_ms = inner.options.borrow().delay_ms;
    let epoch = inner.epoch.get();
    let timers = inner.host.timers.clone();
    let inner = inner.clone();
    timers.schedule(
        delay_ms,
        Box::new(move || {
            if inner.epoch.get() == epoch {
                show_prompt(&inner);
            }
        }),
    );
}

fn show_prompt(inner: &Rc<ControllerInner>) {
    if inner.phase.get() == Phase::Destroyed {
        return;
    }
    if inner.ui_live() {
        inner.debug_log("prompt already showing");
        return;
    }
    let before_show = inner.options.borrow().on_before_show.clone();
    if let Some(predicate) = before_show {
        if !predicate() {
            inner.debug_log("pre-show predicate declined this occasion");
            return;
        }
    }
    present_prompt(inner);
}

fn present_prompt(inner: &Rc<ControllerInner>) -> bool {
    let snapshot = inner.host.platform.snapshot();
    let options = inner.options.borrow();
    let variant = if snapshot.is_ios_safari {
        PromptVariant::Guided
    } else if options.install_mode == InstallMode::Auto {
        PromptVariant::Automatic
    } else {
        PromptVariant::Interactive
    };
    let content = PromptContent {
        texts: resolve_texts(
            inner.host.page.language().as_deref(),
            options.custom_i18n.as_ref(),
        ),
        app_name: inner.host.page.title(),
        icon_url: inner.host.page.icon_url(),
    };
    let surface = inner.host.surfaces.create(&options.theme_color);
    drop(options);

    let weak = Rc::downgrade(inner);
    let hooks = UiHooks {
        on_installed: {
            let weak = weak.clone();
            Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.phase.set(Phase::Resolved(ResolvedOutcome::Accepted));
                    fire_installed_once(&inner);
                }
            })
        },
        on_dismiss: {
            let weak = weak.clone();
            Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.phase.set(Phase::Resolved(ResolvedOutcome::Dismissed));
                    let callback = inner.options.borrow().on_dismiss.clone();
                    if let Some(callback) = callback {
                        callback();
                    }
                }
            })
        },
        on_token_consumed: Rc::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.token.borrow_mut().take();
            }
        }),
    };

    let ui = PromptUi::new(
        variant,
        surface,
        inner.host.timers.clone(),
        inner.host.spawner.clone(),
        inner.gates.clone(),
        content,
        hooks,
    );
    ui.set_token(inner.token.borrow().clone());

    // The automatic variant can resolve synchronously in tests, so the slot and phase are
    // settled before the surface mounts.
    *inner.ui.borrow_mut() = Some(ui.clone());
    inner.phase.set(if variant == PromptVariant::Guided {
        Phase::IosGuided
    } else {
        Phase::PromptPending
    });
    match ui.show() {
        Ok(()) => {
            inner.debug_log("prompt shown");
            true
        }
        Err(err) => {
            log::warn!("prompt mount failed: {err}");
            inner.ui.borrow_mut().take();
            false
        }
    }
}

fn fire_installed_once(inner: &Rc<ControllerInner>) {
    if inner.installed_notified.get() {
        return;
    }
    inner.installed_notified.set(true);
    let callback = inner.options.borrow().on_installed.clone();
    if let Some(callback) = callback {
        callback();
    }
}
