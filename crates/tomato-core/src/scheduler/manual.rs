use std::collections::BTreeMap;
use std::time::Duration;

use super::{Scheduler, TimerHandle};

/// Deterministic scheduler driven by a virtual clock.
///
/// Nothing fires on its own; the owner pulls due handles with
/// [`fire_next`](Self::fire_next) or [`advance`](Self::advance).
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    /// Pending handles keyed by (due time, handle) so that ties fire in
    /// scheduling order.
    pending: BTreeMap<(Duration, TimerHandle), ()>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since construction.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.keys().any(|(_, h)| *h == handle)
    }

    /// Jump the clock to the earliest pending deadline and pop that handle.
    pub fn fire_next(&mut self) -> Option<TimerHandle> {
        let (due, handle) = self.pending.keys().next().copied()?;
        self.pending.remove(&(due, handle));
        self.now = self.now.max(due);
        Some(handle)
    }

    /// Move the clock forward by `by` and pop every handle that became due,
    /// earliest first.
    ///
    /// Handles scheduled by the caller while processing the result are not
    /// included even if they would fall inside the window; call again to
    /// collect them.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerHandle> {
        self.now += by;
        let now = self.now;
        let due: Vec<_> = self
            .pending
            .keys()
            .take_while(|(at, _)| *at <= now)
            .copied()
            .collect();
        for key in &due {
            self.pending.remove(key);
        }
        due.into_iter().map(|(_, h)| h).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        self.pending.insert((self.now + delay, handle), ());
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|(_, h), _| *h != handle);
    }
}
