//! `localStorage`-backed gating-state store.
//!
//! Physical keys are namespaced as `web-to-desktop:<hostname>:<record>` so concurrent sites on
//! different hostnames never share gate records; concurrent tabs on the same hostname race
//! last-writer-wins, which is acceptable for a best-effort snooze policy.

use install_host::{StateSlot, StateStore};

/// Fixed prefix of every persisted key.
pub const STORAGE_PREFIX: &str = "web-to-desktop";

/// Composes the prefix owning every record for one hostname.
pub fn storage_key_prefix(hostname: &str) -> String {
    format!("{STORAGE_PREFIX}:{hostname}:")
}

/// Composes the physical key for one record slot on one hostname.
pub fn storage_key(hostname: &str, slot: StateSlot) -> String {
    format!("{}{}", storage_key_prefix(hostname), slot.record_name())
}

#[derive(Debug, Clone, Copy, Default)]
/// Gating-state store backed by `window.localStorage`.
pub struct WebStateStore;

#[cfg(target_arch = "wasm32")]
impl WebStateStore {
    fn storage() -> Result<web_sys::Storage, String> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or_else(|| "localStorage unavailable".to_string())
    }

    fn hostname() -> String {
        web_sys::window()
            .and_then(|window| window.location().hostname().ok())
            .unwrap_or_default()
    }

    fn key_prefix() -> String {
        storage_key_prefix(&Self::hostname())
    }

    fn key(slot: StateSlot) -> String {
        storage_key(&Self::hostname(), slot)
    }
}

impl StateStore for WebStateStore {
    fn load(&self, slot: StateSlot) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::storage().ok()?.get_item(&Self::key(slot)).ok().flatten()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = slot;
            None
        }
    }

    fn save(&self, slot: StateSlot, value: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::storage()?
                .set_item(&Self::key(slot), value)
                .map_err(|err| format!("localStorage set_item failed: {err:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (slot, value);
            Ok(())
        }
    }

    fn remove(&self, slot: StateSlot) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::storage()?
                .remove_item(&Self::key(slot))
                .map_err(|err| format!("localStorage remove_item failed: {err:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = slot;
            Ok(())
        }
    }

    fn clear(&self) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = Self::storage()?;
            let prefix = Self::key_prefix();
            let length = storage
                .length()
                .map_err(|err| format!("localStorage length failed: {err:?}"))?;
            // Collect before removing; deleting while enumerating shifts the key indices.
            let mut owned = Vec::new();
            for index in 0..length {
                if let Ok(Some(key)) = storage.key(index) {
                    if key.starts_with(&prefix) {
                        owned.push(key);
                    }
                }
            }
            for key in owned {
                storage
                    .remove_item(&key)
                    .map_err(|err| format!("localStorage remove_item failed: {err:?}"))?;
            }
            Ok(())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_by_prefix_and_hostname() {
        assert_eq!(
            storage_key("example.com", StateSlot::DismissedAt),
            "web-to-desktop:example.com:dismissed"
        );
        assert_eq!(
            storage_key("example.com", StateSlot::Installed),
            "web-to-desktop:example.com:installed"
        );
    }

    #[test]
    fn sibling_hostnames_never_share_a_prefix() {
        let prefix = storage_key_prefix("example.com");
        assert!(storage_key("example.com", StateSlot::Installed).starts_with(&prefix));
        assert!(!storage_key("example.org", StateSlot::Installed).starts_with(&prefix));
    }
}
