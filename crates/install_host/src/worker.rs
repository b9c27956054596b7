//! Service-worker registration contracts.

use std::{cell::RefCell, future::Future, pin::Pin};

/// Object-safe boxed future used by [`WorkerRegistrar`] async methods.
pub type WorkerFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// How a registration request was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerRegistration {
    /// A new worker was registered from the supplied script.
    Created,
    /// An existing registration was reused untouched.
    Reused,
    /// The host has no service-worker support; not an error.
    Unsupported,
}

/// Host service ensuring a service worker is registered for the current scope.
pub trait WorkerRegistrar {
    /// Reuses an existing registration or registers `script` as a new worker.
    ///
    /// Missing platform support resolves to [`WorkerRegistration::Unsupported`]; only actual
    /// registration failures surface as errors.
    fn ensure_registered<'a>(
        &'a self,
        script: &'a str,
    ) -> WorkerFuture<'a, Result<WorkerRegistration, String>>;

    /// Unregisters every worker registration for the current scope.
    ///
    /// # Errors
    ///
    /// Returns an error when enumeration or unregistration fails.
    fn unregister_all<'a>(&'a self) -> WorkerFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Registrar for targets without service-worker support.
pub struct NoopWorkerRegistrar;

impl WorkerRegistrar for NoopWorkerRegistrar {
    fn ensure_registered<'a>(
        &'a self,
        _script: &'a str,
    ) -> WorkerFuture<'a, Result<WorkerRegistration, String>> {
        Box::pin(async { Ok(WorkerRegistration::Unsupported) })
    }

    fn unregister_all<'a>(&'a self) -> WorkerFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Default)]
/// Registrar recording registered scripts, for tests; first call creates, later calls reuse.
pub struct MemoryWorkerRegistrar {
    scripts: RefCell<Vec<String>>,
}

impl MemoryWorkerRegistrar {
    /// Scripts passed to `ensure_registered` that resulted in a new registration.
    pub fn registered_scripts(&self) -> Vec<String> {
        self.scripts.borrow().clone()
    }
}

impl WorkerRegistrar for MemoryWorkerRegistrar {
    fn ensure_registered<'a>(
        &'a self,
        script: &'a str,
    ) -> WorkerFuture<'a, Result<WorkerRegistration, String>> {
        Box::pin(async move {
            let mut scripts = self.scripts.borrow_mut();
            if scripts.is_empty() {
                scripts.push(script.to_string());
                Ok(WorkerRegistration::Created)
            } else {
                Ok(WorkerRegistration::Reused)
            }
        })
    }

    fn unregister_all<'a>(&'a self) -> WorkerFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.scripts.borrow_mut().clear();
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_registrar_creates_once_then_reuses() {
        let registrar = MemoryWorkerRegistrar::default();
        assert_eq!(
            block_on(registrar.ensure_registered("// worker")),
            Ok(WorkerRegistration::Created)
        );
        assert_eq!(
            block_on(registrar.ensure_registered("// worker")),
            Ok(WorkerRegistration::Reused)
        );
        assert_eq!(registrar.registered_scripts().len(), 1);

        block_on(registrar.unregister_all()).expect("unregister");
        assert_eq!(
            block_on(registrar.ensure_registered("// worker")),
            Ok(WorkerRegistration::Created)
        );
    }

    #[test]
    fn noop_registrar_is_unsupported_without_error() {
        assert_eq!(
            block_on(NoopWorkerRegistrar.ensure_registered("// worker")),
            Ok(WorkerRegistration::Unsupported)
        );
    }
}
