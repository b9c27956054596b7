//! Time helpers shared across host contracts and adapters.

use std::cell::Cell;
use std::rc::Rc;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Host clock used by the snooze-window policy.
pub trait Clock {
    /// Current unix timestamp in milliseconds.
    fn now_unix_ms(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
/// Clock backed by the real host time source.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix_ms(&self) -> u64 {
        unix_time_ms_now()
    }
}

#[derive(Debug, Clone, Default)]
/// Manually-advanced clock for tests; clones share one instant.
pub struct FixedClock {
    now_ms: Rc<Cell<u64>>,
}

impl FixedClock {
    /// Clock starting at the given unix-millisecond instant.
    pub fn at(now_ms: u64) -> Self {
        let clock = Self::default();
        clock.set(now_ms);
        clock
    }

    /// Moves the clock to an absolute instant.
    pub fn set(&self, now_ms: u64) {
        self.now_ms.set(now_ms);
    }

    /// Advances the clock by a relative amount.
    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.set(self.now_ms.get().saturating_add(delta_ms));
    }
}

impl Clock for FixedClock {
    fn now_unix_ms(&self) -> u64 {
        self.now_ms.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances_and_shares_across_clones() {
        let clock = FixedClock::at(1_000);
        let alias = clock.clone();
        clock.advance(500);
        assert_eq!(alias.now_unix_ms(), 1_500);
        alias.set(42);
        assert_eq!(clock.now_unix_ms(), 42);
    }

    #[test]
    fn system_clock_reports_a_plausible_instant() {
        // Any instant after 2020-01-01 counts as plausible for a wall clock.
        assert!(SystemClock.now_unix_ms() > 1_577_836_800_000);
    }
}
