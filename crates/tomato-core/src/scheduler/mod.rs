//! Delayed re-invocation primitive consumed by the countdown.
//!
//! The core never sleeps. A countdown asks its [`Scheduler`] to fire a
//! [`TimerHandle`] after a delay, then returns control to the host. When the
//! host sees the handle fire it hands it back to
//! [`SessionController::on_timer_fired`](crate::timer::SessionController::on_timer_fired).
//!
//! Two implementations ship with the crate:
//!
//! - [`ManualScheduler`]: a virtual clock for tests and simulations
//! - [`TokioScheduler`]: real timers on a tokio runtime, delivering fired
//!   handles through an mpsc channel so that a single task owns the session

mod manual;
mod runtime;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use manual::ManualScheduler;
pub use runtime::TokioScheduler;

/// Opaque identifier of one scheduled callback.
///
/// Handles are never reused by a scheduler instance, so a stale handle can
/// always be told apart from the one currently armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Fire-after-delay primitive supplied by the host runtime.
pub trait Scheduler {
    /// Arrange for `handle` to be delivered back to the core after `delay`.
    fn schedule_after(&mut self, delay: Duration) -> TimerHandle;

    /// Unschedule `handle`. Unknown or already fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn schedule_after(&mut self, delay: Duration) -> TimerHandle {
        (**self).schedule_after(delay)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        (**self).cancel(handle)
    }
}
