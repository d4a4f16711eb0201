use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{Scheduler, TimerHandle};

/// Scheduler backed by tokio timers.
///
/// Each scheduled handle is a spawned sleep that sends the handle on an
/// unbounded channel when it elapses. The receiving side belongs to whichever
/// task owns the session; fired handles are marshalled onto that task instead
/// of touching session state from the timer task.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<TimerHandle>,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    next_id: u64,
    speed: u32,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver its fired handles arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerHandle>) {
        Self::with_speed(1)
    }

    /// Like [`new`](Self::new), but every delay is divided by `speed`.
    pub fn with_speed(speed: u32) -> (Self, mpsc::UnboundedReceiver<TimerHandle>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tx,
            tasks: HashMap::new(),
            next_id: 0,
            speed: speed.max(1),
        };
        (scheduler, rx)
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_after(&mut self, delay: Duration) -> TimerHandle {
        self.tasks.retain(|_, task| !task.is_finished());

        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        let delay = delay / self.speed;
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the session ended; nothing to notify.
            let _ = tx.send(handle);
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
