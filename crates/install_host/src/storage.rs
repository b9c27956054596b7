//! Durable gating-state storage contracts and adapters.
//!
//! The runtime persists exactly two records per hostname: the instant of the last user
//! dismissal and the installed flag. Adapters own physical key naming; the runtime only
//! speaks in [`StateSlot`]s.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// Logical storage slot for one persisted gating record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateSlot {
    /// Unix-millisecond timestamp of the last dismissal, stored as a decimal string.
    DismissedAt,
    /// `"true"` once an installation was confirmed; never auto-cleared.
    Installed,
}

impl StateSlot {
    /// Stable record name used by adapters when composing physical keys.
    pub const fn record_name(self) -> &'static str {
        match self {
            Self::DismissedAt => "dismissed",
            Self::Installed => "installed",
        }
    }
}

/// Host service for the durable, hostname-scoped gating records.
///
/// Reads and writes are synchronous; concurrent tabs on the same hostname may race and the
/// last writer wins, which is acceptable for a best-effort snooze policy.
pub trait StateStore {
    /// Loads the raw string record for a slot.
    fn load(&self, slot: StateSlot) -> Option<String>;

    /// Saves the raw string record for a slot.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage is unavailable or the write fails.
    fn save(&self, slot: StateSlot, value: &str) -> Result<(), String>;

    /// Deletes one slot's record.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage is unavailable or the delete fails.
    fn remove(&self, slot: StateSlot) -> Result<(), String>;

    /// Deletes every record this store owns for the current hostname.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage is unavailable.
    fn clear(&self) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op state store for unsupported targets; loads nothing, accepts every write.
pub struct NoopStateStore;

impl StateStore for NoopStateStore {
    fn load(&self, _slot: StateSlot) -> Option<String> {
        None
    }

    fn save(&self, _slot: StateSlot, _value: &str) -> Result<(), String> {
        Ok(())
    }

    fn remove(&self, _slot: StateSlot) -> Result<(), String> {
        Ok(())
    }

    fn clear(&self) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory state store shared by clones, for tests.
pub struct MemoryStateStore {
    inner: Rc<RefCell<HashMap<&'static str, String>>>,
}

impl StateStore for MemoryStateStore {
    fn load(&self, slot: StateSlot) -> Option<String> {
        self.inner.borrow().get(slot.record_name()).cloned()
    }

    fn save(&self, slot: StateSlot, value: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(slot.record_name(), value.to_string());
        Ok(())
    }

    fn remove(&self, slot: StateSlot) -> Result<(), String> {
        self.inner.borrow_mut().remove(slot.record_name());
        Ok(())
    }

    fn clear(&self) -> Result<(), String> {
        self.inner.borrow_mut().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_and_clears() {
        let store = MemoryStateStore::default();
        let store_obj: &dyn StateStore = &store;

        store_obj.save(StateSlot::DismissedAt, "123").expect("save");
        store_obj.save(StateSlot::Installed, "true").expect("save");
        assert_eq!(
            store_obj.load(StateSlot::DismissedAt),
            Some("123".to_string())
        );

        store_obj.remove(StateSlot::DismissedAt).expect("remove");
        assert_eq!(store_obj.load(StateSlot::DismissedAt), None);
        assert_eq!(store_obj.load(StateSlot::Installed), Some("true".to_string()));

        store_obj.clear().expect("clear");
        assert_eq!(store_obj.load(StateSlot::Installed), None);
    }

    #[test]
    fn clones_share_the_same_records() {
        let store = MemoryStateStore::default();
        let alias = store.clone();
        store.save(StateSlot::Installed, "true").expect("save");
        assert_eq!(alias.load(StateSlot::Installed), Some("true".to_string()));
    }

    #[test]
    fn noop_store_is_empty_and_successful() {
        let store = NoopStateStore;
        assert_eq!(store.load(StateSlot::Installed), None);
        store.save(StateSlot::Installed, "true").expect("save");
        assert_eq!(store.load(StateSlot::Installed), None);
        store.clear().expect("clear");
    }
}
