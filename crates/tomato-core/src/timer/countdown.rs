//! One-second countdown driven by an external scheduler.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running(d) -> Running(d-1) -> ... -> Completed
//!   ^                                            |
//!   +---------------- cancel() ------------------+
//! ```
//!
//! The countdown re-arms exactly one tick at a time. Each tick carries the
//! [`TimerHandle`] it was armed with; a handle that does not match the armed
//! one (cancelled, superseded, or delivered twice) is ignored.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

use crate::scheduler::{Scheduler, TimerHandle};

/// Wall-clock period between two ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CountdownState {
    Idle,
    Running { remaining_secs: u64 },
    Completed,
}

/// What a start or a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still running; the display should show this many seconds.
    Remaining(u64),
    /// Reached zero. No further tick is armed.
    Completed,
    /// The handle was stale or the countdown was not running. Nothing changed.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    state: CountdownState,
    armed: Option<TimerHandle>,
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            state: CountdownState::Idle,
            armed: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, CountdownState::Running { .. })
    }

    pub fn remaining_secs(&self) -> Option<u64> {
        match self.state {
            CountdownState::Running { remaining_secs } => Some(remaining_secs),
            _ => None,
        }
    }

    /// Handle of the single pending tick, if any.
    pub fn armed_handle(&self) -> Option<TimerHandle> {
        self.armed
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting down from `duration_secs`.
    ///
    /// A zero duration completes at once without arming a tick. Starting a
    /// countdown that is already running restarts it from the new duration
    /// and drops the old pending tick; callers that must not restart check
    /// [`is_running`](Self::is_running) first.
    pub fn start<S: Scheduler>(&mut self, duration_secs: u64, scheduler: &mut S) -> TickOutcome {
        self.disarm(scheduler);
        if duration_secs == 0 {
            self.state = CountdownState::Completed;
            debug!("countdown of zero seconds completed immediately");
            return TickOutcome::Completed;
        }
        self.state = CountdownState::Running {
            remaining_secs: duration_secs,
        };
        self.arm(scheduler);
        debug!(duration_secs, "countdown started");
        TickOutcome::Remaining(duration_secs)
    }

    /// Deliver a fired tick.
    pub fn tick<S: Scheduler>(&mut self, handle: TimerHandle, scheduler: &mut S) -> TickOutcome {
        if self.armed != Some(handle) {
            trace!(handle = handle.id(), "ignoring stale tick");
            return TickOutcome::Ignored;
        }
        self.armed = None;

        let CountdownState::Running { remaining_secs } = self.state else {
            return TickOutcome::Ignored;
        };
        let remaining_secs = remaining_secs.saturating_sub(1);
        if remaining_secs == 0 {
            self.state = CountdownState::Completed;
            debug!("countdown completed");
            return TickOutcome::Completed;
        }
        self.state = CountdownState::Running { remaining_secs };
        self.arm(scheduler);
        trace!(remaining_secs, "tick");
        TickOutcome::Remaining(remaining_secs)
    }

    /// Stop counting and unschedule the pending tick. Valid from any state.
    pub fn cancel<S: Scheduler>(&mut self, scheduler: &mut S) {
        if self.disarm(scheduler) {
            debug!("countdown cancelled");
        }
        self.state = CountdownState::Idle;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn arm<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.armed = Some(scheduler.schedule_after(TICK_PERIOD));
    }

    fn disarm<S: Scheduler>(&mut self, scheduler: &mut S) -> bool {
        match self.armed.take() {
            Some(handle) => {
                scheduler.cancel(handle);
                true
            }
            None => false,
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}
