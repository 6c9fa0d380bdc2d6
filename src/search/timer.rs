//! Cancellable deferred callbacks.
//!
//! The autocomplete never sleeps. It asks a [`Scheduler`] to arm a timer and is
//! told later, through [`SearchEvent::TimerFired`](super::SearchEvent::TimerFired),
//! which timer elapsed. [`TimerQueue`] is a virtual-time scheduler that hosts and
//! tests drive explicitly with [`TimerQueue::advance`].

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle to an armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw sequence number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Source of cancellable one-shot timers.
pub trait Scheduler {
    /// Arms a timer that fires once `delay` has elapsed.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Disarms a pending timer. Returns `false` if it already fired or was cancelled.
    fn cancel(&mut self, id: TimerId) -> bool;
}

/// Deterministic virtual-time timer queue.
///
/// ```rust
/// use recordview::search::{Scheduler, TimerQueue};
/// use std::time::Duration;
///
/// let mut queue = TimerQueue::new();
/// let id = queue.schedule(Duration::from_millis(300));
/// assert!(queue.advance(Duration::from_millis(299)).is_empty());
/// assert_eq!(queue.advance(Duration::from_millis(1)), vec![id]);
/// ```
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<TimerId, Duration>,
}

impl TimerQueue {
    /// Creates an empty queue at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since the queue was created.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of armed timers that have not fired or been cancelled.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Moves virtual time forward and returns the timers that elapsed, earliest
    /// deadline first. Timers with equal deadlines fire in arming order.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        self.now += by;
        let now = self.now;

        let mut fired: Vec<(Duration, TimerId)> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(id, deadline)| (*deadline, *id))
            .collect();
        fired.sort();

        for (_, id) in &fired {
            self.pending.remove(id);
        }

        if !fired.is_empty() {
            tracing::trace!(now_ms = now.as_millis(), fired = fired.len(), "timers elapsed");
        }

        fired.into_iter().map(|(_, id)| id).collect()
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.insert(id, self.now + delay);
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id).is_some()
    }
}
