//! Install-signal contracts: eligibility events, the capability token, and observers.
//!
//! The platform decides when a page becomes installable and announces it through an
//! asynchronous signal carrying a one-shot capability token. The runtime never polls; it
//! attaches an observer and reacts.

use std::{cell::Cell, cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future resolving a native prompt invocation.
pub type InstallChoiceFuture<'a> = Pin<Box<dyn Future<Output = Result<InstallChoice, String>> + 'a>>;

/// Outcome reported by the platform after the native install prompt was shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallChoice {
    /// The user confirmed the installation.
    Accepted,
    /// The user dismissed the native prompt.
    Dismissed,
}

/// Capability token proving the platform is willing to install right now.
///
/// At most one token is live per controller; a newer eligibility signal supersedes the
/// previous token. Tokens are single-use at the platform level — a second `request` on a
/// consumed token fails.
pub trait InstallPromptTrigger {
    /// Shows the native install prompt and awaits the user's choice.
    fn request(&self) -> InstallChoiceFuture<'_>;
}

/// Observer receiving platform install signals.
pub trait InstallSignalObserver {
    /// The platform is willing to install; `trigger` is the fresh capability token.
    fn install_eligible(&self, trigger: Rc<dyn InstallPromptTrigger>);

    /// The app was installed (by our prompt or any other path).
    fn app_installed(&self);
}

/// Host service bridging the platform's install signals to an observer.
///
/// Attaching also suppresses the platform's own install banner so the page keeps control of
/// when (and whether) UI is shown.
pub trait InstallEventSource {
    /// Subscribes `observer`; replaces any previous subscription.
    fn attach(&self, observer: Rc<dyn InstallSignalObserver>);

    /// Removes the current subscription, if any.
    fn detach(&self);
}

#[derive(Debug, Clone, Copy, Default)]
/// Event source that never fires, for unsupported targets.
pub struct NoopInstallEventSource;

impl InstallEventSource for NoopInstallEventSource {
    fn attach(&self, _observer: Rc<dyn InstallSignalObserver>) {}

    fn detach(&self) {}
}

#[derive(Clone, Default)]
/// In-memory event source for tests; signals are emitted explicitly.
pub struct MemoryInstallEventSource {
    observer: Rc<RefCell<Option<Rc<dyn InstallSignalObserver>>>>,
}

impl MemoryInstallEventSource {
    /// Whether an observer is currently attached.
    pub fn has_observer(&self) -> bool {
        self.observer.borrow().is_some()
    }

    /// Emits an eligibility signal carrying `trigger` to the attached observer, if any.
    pub fn emit_install_eligible(&self, trigger: Rc<dyn InstallPromptTrigger>) {
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            observer.install_eligible(trigger);
        }
    }

    /// Emits a post-install signal to the attached observer, if any.
    pub fn emit_app_installed(&self) {
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            observer.app_installed();
        }
    }
}

impl InstallEventSource for MemoryInstallEventSource {
    fn attach(&self, observer: Rc<dyn InstallSignalObserver>) {
        *self.observer.borrow_mut() = Some(observer);
    }

    fn detach(&self) {
        *self.observer.borrow_mut() = None;
    }
}

/// Test trigger resolving every request with a scripted outcome.
pub struct ScriptedTrigger {
    outcome: Result<InstallChoice, String>,
    requests: Cell<u32>,
}

impl ScriptedTrigger {
    /// Trigger whose prompt is always accepted.
    pub fn accepting() -> Rc<Self> {
        Rc::new(Self {
            outcome: Ok(InstallChoice::Accepted),
            requests: Cell::new(0),
        })
    }

    /// Trigger whose prompt is always dismissed.
    pub fn dismissing() -> Rc<Self> {
        Rc::new(Self {
            outcome: Ok(InstallChoice::Dismissed),
            requests: Cell::new(0),
        })
    }

    /// Trigger whose prompt invocation fails with `message`.
    pub fn failing(message: &str) -> Rc<Self> {
        Rc::new(Self {
            outcome: Err(message.to_string()),
            requests: Cell::new(0),
        })
    }

    /// Number of times `request` was invoked.
    pub fn requests(&self) -> u32 {
        self.requests.get()
    }
}

impl InstallPromptTrigger for ScriptedTrigger {
    fn request(&self) -> InstallChoiceFuture<'_> {
        self.requests.set(self.requests.get() + 1);
        let outcome = self.outcome.clone();
        Box::pin(async move { outcome })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    struct RecordingObserver {
        eligible: Cell<u32>,
        installed: Cell<u32>,
    }

    impl InstallSignalObserver for RecordingObserver {
        fn install_eligible(&self, _trigger: Rc<dyn InstallPromptTrigger>) {
            self.eligible.set(self.eligible.get() + 1);
        }

        fn app_installed(&self) {
            self.installed.set(self.installed.get() + 1);
        }
    }

    #[test]
    fn memory_source_routes_signals_to_the_attached_observer() {
        let source = MemoryInstallEventSource::default();
        let observer = Rc::new(RecordingObserver {
            eligible: Cell::new(0),
            installed: Cell::new(0),
        });

        source.emit_install_eligible(ScriptedTrigger::accepting());
        assert_eq!(observer.eligible.get(), 0);

        source.attach(observer.clone());
        source.emit_install_eligible(ScriptedTrigger::accepting());
        source.emit_app_installed();
        assert_eq!(observer.eligible.get(), 1);
        assert_eq!(observer.installed.get(), 1);

        source.detach();
        assert!(!source.has_observer());
        source.emit_app_installed();
        assert_eq!(observer.installed.get(), 1);
    }

    #[test]
    fn scripted_trigger_reports_its_outcome_and_counts_requests() {
        let trigger = ScriptedTrigger::dismissing();
        assert_eq!(block_on(trigger.request()), Ok(InstallChoice::Dismissed));
        assert_eq!(block_on(trigger.request()), Ok(InstallChoice::Dismissed));
        assert_eq!(trigger.requests(), 2);

        let failing = ScriptedTrigger::failing("prompt exploded");
        assert_eq!(
            block_on(failing.request()),
            Err("prompt exploded".to_string())
        );
    }
}
