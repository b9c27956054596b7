//! Fire-and-forget timer contracts.
//!
//! There is deliberately no cancellation primitive: a scheduled callback always fires, and
//! callers that may be torn down first must carry their own liveness guard.

use std::{cell::RefCell, rc::Rc};

/// Host service scheduling one-shot callbacks on the event loop.
pub trait TimerHost {
    /// Runs `callback` once after roughly `delay_ms` milliseconds.
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>);
}

#[derive(Debug, Clone, Copy, Default)]
/// Timer host that drops every callback, for unsupported targets.
pub struct NoopTimerHost;

impl TimerHost for NoopTimerHost {
    fn schedule(&self, _delay_ms: u32, _callback: Box<dyn FnOnce()>) {}
}

#[derive(Clone, Default)]
/// Timer host that queues callbacks until a test fires them explicitly.
pub struct ManualTimerHost {
    queue: Rc<RefCell<Vec<(u32, Box<dyn FnOnce()>)>>>,
}

impl ManualTimerHost {
    /// Number of callbacks waiting to fire.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Delay of the next queued callback, if any.
    pub fn next_delay_ms(&self) -> Option<u32> {
        self.queue.borrow().first().map(|(delay, _)| *delay)
    }

    /// Fires the oldest queued callback; returns whether one was fired.
    pub fn fire_next(&self) -> bool {
        let entry = {
            let mut queue = self.queue.borrow_mut();
            if queue.is_empty() {
                None
            } else {
                Some(queue.remove(0))
            }
        };
        match entry {
            Some((_, callback)) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Fires every queued callback in scheduling order, including ones queued while firing.
    pub fn fire_all(&self) {
        while self.fire_next() {}
    }
}

impl TimerHost for ManualTimerHost {
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        self.queue.borrow_mut().push((delay_ms, callback));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn manual_timer_fires_in_scheduling_order() {
        let timers = ManualTimerHost::default();
        let order: Rc<RefCell<Vec<u32>>> = Rc::default();

        for delay in [500, 300] {
            let order = order.clone();
            timers.schedule(delay, Box::new(move || order.borrow_mut().push(delay)));
        }
        assert_eq!(timers.pending(), 2);
        assert_eq!(timers.next_delay_ms(), Some(500));

        timers.fire_all();
        assert_eq!(*order.borrow(), vec![500, 300]);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn callbacks_scheduled_while_firing_also_fire() {
        let timers = ManualTimerHost::default();
        let fired = Rc::new(Cell::new(false));

        let inner_fired = fired.clone();
        let inner_timers = timers.clone();
        timers.schedule(
            100,
            Box::new(move || {
                inner_timers.schedule(200, Box::new(move || inner_fired.set(true)));
            }),
        );

        timers.fire_all();
        assert!(fired.get());
    }
}
