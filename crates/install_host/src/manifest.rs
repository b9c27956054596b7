//! Manifest-resource provisioning contracts.

use std::cell::RefCell;

/// Handle to a provisioned manifest resource.
///
/// Owned exclusively by the controller that created it; the backing resource leaks unless the
/// handle is passed back to [`ManifestHost::revoke`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestHandle {
    /// URL-like identifier of the backing resource.
    pub url: String,
}

/// Host service exposing a serialized manifest document to the platform.
pub trait ManifestHost {
    /// Publishes `manifest_json` and links it into the page.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot create the backing resource.
    fn provision(&self, manifest_json: &str) -> Result<ManifestHandle, String>;

    /// Unlinks and releases a previously provisioned resource.
    fn revoke(&self, handle: &ManifestHandle);
}

#[derive(Debug, Clone, Copy, Default)]
/// Manifest host for targets without resource-URL support; always fails to provision.
pub struct NoopManifestHost;

impl ManifestHost for NoopManifestHost {
    fn provision(&self, _manifest_json: &str) -> Result<ManifestHandle, String> {
        Err("manifest provisioning unavailable".to_string())
    }

    fn revoke(&self, _handle: &ManifestHandle) {}
}

#[derive(Debug, Default)]
/// Manifest host recording provisioned documents and revocations, for tests.
pub struct MemoryManifestHost {
    provisioned: RefCell<Vec<String>>,
    revoked: RefCell<Vec<String>>,
}

impl MemoryManifestHost {
    /// Documents provisioned so far, in order.
    pub fn provisioned(&self) -> Vec<String> {
        self.provisioned.borrow().clone()
    }

    /// Handle URLs revoked so far, in order.
    pub fn revoked(&self) -> Vec<String> {
        self.revoked.borrow().clone()
    }
}

impl ManifestHost for MemoryManifestHost {
    fn provision(&self, manifest_json: &str) -> Result<ManifestHandle, String> {
        let mut provisioned = self.provisioned.borrow_mut();
        provisioned.push(manifest_json.to_string());
        Ok(ManifestHandle {
            url: format!("memory:manifest/{}", provisioned.len()),
        })
    }

    fn revoke(&self, handle: &ManifestHandle) {
        self.revoked.borrow_mut().push(handle.url.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_host_records_documents_and_revocations() {
        let host = MemoryManifestHost::default();
        let first = host.provision("{\"name\":\"a\"}").expect("provision");
        let second = host.provision("{\"name\":\"b\"}").expect("provision");
        assert_ne!(first, second);

        host.revoke(&first);
        assert_eq!(host.provisioned().len(), 2);
        assert_eq!(host.revoked(), vec![first.url]);
    }

    #[test]
    fn noop_host_reports_provisioning_unavailable() {
        assert!(NoopManifestHost.provision("{}").is_err());
    }
}
