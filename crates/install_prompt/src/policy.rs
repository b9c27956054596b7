//! Gating policy: snooze-window math and typed access to the persisted gate records.

use std::rc::Rc;

use install_host::{Clock, StateSlot, StateStore};

/// Milliseconds per day, the unit of the snooze window.
pub const MS_PER_DAY: u64 = 86_400_000;

/// Whether `now_ms` still falls inside the snooze window opened at `dismissed_at_ms`.
///
/// Holds for `expire_days = 0` (window is empty, never suppresses) through multi-year windows.
pub fn dismissed_recently(now_ms: u64, dismissed_at_ms: u64, expire_days: u32) -> bool {
    now_ms.saturating_sub(dismissed_at_ms) < u64::from(expire_days) * MS_PER_DAY
}

/// Typed view over the two persisted gate records.
///
/// Unparseable dismissal records are treated as absent; a cleared or corrupted store simply
/// re-arms the prompt, which is the safe direction for a best-effort snooze.
#[derive(Clone)]
pub struct GateStore {
    store: Rc<dyn StateStore>,
    clock: Rc<dyn Clock>,
}

impl GateStore {
    /// Binds a store and clock into a typed gate view.
    pub fn new(store: Rc<dyn StateStore>, clock: Rc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Instant of the last recorded dismissal, if any.
    pub fn dismissed_at(&self) -> Option<u64> {
        self.store
            .load(StateSlot::DismissedAt)
            .and_then(|raw| raw.trim().parse().ok())
    }

    /// Records a dismissal at the current instant.
    pub fn record_dismissal(&self) {
        let now = self.clock.now_unix_ms();
        if let Err(err) = self.store.save(StateSlot::DismissedAt, &now.to_string()) {
            log::warn!("persist dismissal failed: {err}");
        }
    }

    /// Whether the current instant falls inside the active snooze window.
    pub fn in_snooze_window(&self, expire_days: u32) -> bool {
        match self.dismissed_at() {
            Some(dismissed_at) => {
                dismissed_recently(self.clock.now_unix_ms(), dismissed_at, expire_days)
            }
            None => false,
        }
    }

    /// Whether an installation was recorded for this hostname.
    pub fn installed(&self) -> bool {
        self.store
            .load(StateSlot::Installed)
            .is_some_and(|raw| raw == "true")
    }

    /// Records a confirmed installation; never auto-cleared.
    pub fn record_installed(&self) {
        if let Err(err) = self.store.save(StateSlot::Installed, "true") {
            log::warn!("persist installed flag failed: {err}");
        }
    }

    /// Clears both persisted records.
    pub fn reset(&self) {
        if let Err(err) = self.store.clear() {
            log::warn!("clear gate records failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use install_host::{FixedClock, MemoryStateStore};
    use pretty_assertions::assert_eq;

    use super::*;

    fn gates(now_ms: u64) -> (GateStore, FixedClock, MemoryStateStore) {
        let clock = FixedClock::at(now_ms);
        let store = MemoryStateStore::default();
        (
            GateStore::new(Rc::new(store.clone()), Rc::new(clock.clone())),
            clock,
            store,
        )
    }

    #[test]
    fn snooze_window_boundary_is_exclusive() {
        let window = 7 * MS_PER_DAY;
        assert!(dismissed_recently(1_000 + window - 1, 1_000, 7));
        assert!(!dismissed_recently(1_000 + window, 1_000, 7));
    }

    #[test]
    fn zero_day_window_never_suppresses() {
        assert!(!dismissed_recently(1_000, 1_000, 0));
        assert!(!dismissed_recently(999, 1_000, 0));
    }

    #[test]
    fn one_year_window_suppresses_through_the_year() {
        let dismissed_at = 1_700_000_000_000;
        assert!(dismissed_recently(dismissed_at + 364 * MS_PER_DAY, dismissed_at, 365));
        assert!(!dismissed_recently(dismissed_at + 365 * MS_PER_DAY, dismissed_at, 365));
    }

    #[test]
    fn records_round_trip_through_the_store() {
        let (gates, clock, _store) = gates(5_000);
        assert_eq!(gates.dismissed_at(), None);
        assert!(!gates.in_snooze_window(7));

        gates.record_dismissal();
        assert_eq!(gates.dismissed_at(), Some(5_000));
        assert!(gates.in_snooze_window(7));

        clock.advance(7 * MS_PER_DAY);
        assert!(!gates.in_snooze_window(7));

        assert!(!gates.installed());
        gates.record_installed();
        assert!(gates.installed());
    }

    #[test]
    fn unparseable_dismissal_record_reads_as_absent() {
        let (gates, _clock, store) = gates(5_000);
        store.save(StateSlot::DismissedAt, "not-a-number").expect("save");
        assert_eq!(gates.dismissed_at(), None);
        assert!(!gates.in_snooze_window(7));
    }

    #[test]
    fn reset_clears_both_records() {
        let (gates, _clock, _store) = gates(5_000);
        gates.record_dismissal();
        gates.record_installed();

        gates.reset();
        assert_eq!(gates.dismissed_at(), None);
        assert!(!gates.installed());
    }
}
