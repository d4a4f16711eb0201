//! Session controller.
//!
//! Owns the repetition counter, picks the next interval, and drives a single
//! [`Countdown`] through an injected [`Scheduler`]. Rendering goes out through
//! an injected [`Presenter`].
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = SessionController::new(scheduler, presenter);
//! session.advance()?;
//! // Whenever the scheduler fires:
//! session.on_timer_fired(handle);
//! ```
//!
//! When a countdown reaches zero the controller immediately advances to the
//! next interval; there is no paused state.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::countdown::{Countdown, CountdownState, TickOutcome};
use super::interval::{IntervalDurations, IntervalKind};
use crate::display::{completed_pairs, DisplayState};
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::presenter::Presenter;
use crate::scheduler::{Scheduler, TimerHandle};

/// Canonical session state. Everything shown to the user derives from it.
///
/// This is a read-only view built by [`SessionController::state`]. The
/// controller owns `repetition_count`; `active_handle` is the handle its
/// [`Countdown`] has armed. Neither is cached here, so a `SessionState`
/// never disagrees with the controller it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub repetition_count: u32,
    pub active_handle: Option<TimerHandle>,
}

#[derive(Debug)]
pub struct SessionController<S, P> {
    repetition_count: u32,
    current: Option<IntervalKind>,
    countdown: Countdown,
    durations: IntervalDurations,
    scheduler: S,
    presenter: P,
}

impl<S: Scheduler, P: Presenter> SessionController<S, P> {
    pub fn new(scheduler: S, presenter: P) -> Self {
        Self::with_durations(IntervalDurations::default(), scheduler, presenter)
    }

    pub fn with_durations(durations: IntervalDurations, scheduler: S, presenter: P) -> Self {
        Self {
            repetition_count: 0,
            current: None,
            countdown: Countdown::new(),
            durations,
            scheduler,
            presenter,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn repetition_count(&self) -> u32 {
        self.repetition_count
    }

    /// Number of finished Work→Break pairs.
    pub fn completed_count(&self) -> u32 {
        completed_pairs(self.repetition_count)
    }

    /// Kind of the interval most recently started, `None` after a reset.
    pub fn current_interval(&self) -> Option<IntervalKind> {
        self.current
    }

    pub fn countdown_state(&self) -> CountdownState {
        self.countdown.state()
    }

    pub fn is_running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn active_handle(&self) -> Option<TimerHandle> {
        self.countdown.armed_handle()
    }

    pub fn durations(&self) -> &IntervalDurations {
        &self.durations
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            repetition_count: self.repetition_count,
            active_handle: self.active_handle(),
        }
    }

    pub fn display(&self) -> DisplayState {
        DisplayState {
            remaining_secs: self.countdown.remaining_secs().unwrap_or(0),
            label: self.current,
            completed_marks: self.completed_count(),
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            repetition_count: self.repetition_count,
            kind: self.current,
            countdown: self.countdown.state(),
            completed_marks: self.completed_count(),
            at: Utc::now(),
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_parts(self) -> (S, P) {
        (self.scheduler, self.presenter)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the next interval.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AlreadyRunning`] if a countdown is in progress.
    /// The session is left untouched in that case.
    pub fn advance(&mut self) -> Result<IntervalKind> {
        if let Some(remaining_secs) = self.countdown.remaining_secs() {
            warn!(
                repetition = self.repetition_count,
                remaining_secs, "rejected advance while an interval is running"
            );
            return Err(CoreError::AlreadyRunning { remaining_secs });
        }
        Ok(self.begin_next_interval())
    }

    /// Stop the running countdown without touching the repetition count.
    /// A later [`advance`](Self::advance) starts the following interval.
    pub fn cancel(&mut self) {
        self.countdown.cancel(&mut self.scheduler);
    }

    /// Cancel any countdown and return to the initial state. Idempotent.
    pub fn reset(&mut self) {
        self.countdown.cancel(&mut self.scheduler);
        self.repetition_count = 0;
        self.current = None;
        debug!("session reset");
        self.presenter.on_session_reset();
    }

    /// Deliver a handle fired by the scheduler.
    ///
    /// Stale handles (cancelled, superseded or duplicated) are ignored.
    pub fn on_timer_fired(&mut self, handle: TimerHandle) -> TickOutcome {
        let outcome = self.countdown.tick(handle, &mut self.scheduler);
        let Some(kind) = self.current else {
            return outcome;
        };
        match outcome {
            TickOutcome::Remaining(remaining_secs) => {
                self.presenter.on_tick(remaining_secs, kind);
            }
            TickOutcome::Completed => {
                self.finish_interval(kind);
                self.begin_next_interval();
            }
            TickOutcome::Ignored => {
                trace!(handle = handle.id(), "timer delivery ignored");
            }
        }
        outcome
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn begin_next_interval(&mut self) -> IntervalKind {
        let mut immediate_completions = 0u32;
        loop {
            self.repetition_count += 1;
            let kind = IntervalKind::for_repetition(self.repetition_count);
            let duration_secs = self.durations.secs(kind);
            let repetition = self.repetition_count;
            let completed_marks = self.completed_count();
            self.current = Some(kind);
            debug!(repetition, kind = %kind, duration_secs, "interval started");
            self.presenter
                .on_interval_start(repetition, kind, completed_marks);

            match self.countdown.start(duration_secs, &mut self.scheduler) {
                TickOutcome::Remaining(remaining_secs) => {
                    self.presenter.on_tick(remaining_secs, kind);
                    return kind;
                }
                // Only reachable with a zero-length interval.
                TickOutcome::Completed => {
                    self.finish_interval(kind);
                    immediate_completions += 1;
                    // A Work and a break both at zero length; control goes
                    // back to the host instead of spinning.
                    if immediate_completions >= 2 {
                        warn!(
                            repetition = self.repetition_count,
                            "consecutive zero-length intervals, session stopped"
                        );
                        return kind;
                    }
                }
                TickOutcome::Ignored => return kind,
            }
        }
    }

    fn finish_interval(&mut self, kind: IntervalKind) {
        debug!(repetition = self.repetition_count, kind = %kind, "interval completed");
        self.presenter
            .on_interval_complete(self.repetition_count, kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::EventLog;
    use crate::scheduler::ManualScheduler;

    fn short_session() -> SessionController<ManualScheduler, EventLog> {
        let durations = IntervalDurations::new(3, 1, 2).unwrap();
        SessionController::with_durations(durations, ManualScheduler::new(), EventLog::new())
    }

    fn fire(session: &mut SessionController<ManualScheduler, EventLog>, n: usize) {
        for _ in 0..n {
            let h = session.scheduler_mut().fire_next().expect("a tick is pending");
            session.on_timer_fired(h);
        }
    }

    #[test]
    fn starts_idle() {
        let session = short_session();
        assert_eq!(session.repetition_count(), 0);
        assert_eq!(session.completed_count(), 0);
        assert_eq!(session.current_interval(), None);
        assert_eq!(session.countdown_state(), CountdownState::Idle);
        assert_eq!(session.display().label_text(), "Timer");
    }

    #[test]
    fn advance_starts_work_and_reports_full_duration() {
        let mut session = short_session();
        assert_eq!(session.advance().unwrap(), IntervalKind::Work);
        assert_eq!(session.repetition_count(), 1);
        assert!(session.is_running());
        assert_eq!(session.presenter().ticks(), vec![3]);
        assert_eq!(session.display().clock(), "0:03");
    }

    #[test]
    fn double_start_is_rejected() {
        let mut session = short_session();
        session.advance().unwrap();
        fire(&mut session, 1);
        let before = session.state();

        let err = session.advance().unwrap_err();
        assert!(matches!(err, CoreError::AlreadyRunning { remaining_secs: 2 }));
        assert_eq!(session.state(), before);
        assert_eq!(session.scheduler().pending_count(), 1);
    }

    #[test]
    fn completion_advances_automatically() {
        let mut session = short_session();
        session.advance().unwrap();
        fire(&mut session, 3);
        assert_eq!(session.repetition_count(), 2);
        assert_eq!(session.current_interval(), Some(IntervalKind::ShortBreak));
        assert_eq!(session.presenter().ticks(), vec![3, 2, 1, 1]);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut session = short_session();
        session.advance().unwrap();
        fire(&mut session, 4);

        session.reset();
        let once = session.state();
        session.reset();
        assert_eq!(session.state(), once);
        assert_eq!(once.repetition_count, 0);
        assert_eq!(once.active_handle, None);
        assert_eq!(session.scheduler().pending_count(), 0);
        assert_eq!(session.current_interval(), None);
    }

    #[test]
    fn reset_then_advance_starts_fresh() {
        let mut session = short_session();
        session.advance().unwrap();
        fire(&mut session, 5);
        session.reset();
        assert_eq!(session.advance().unwrap(), IntervalKind::Work);
        assert_eq!(session.repetition_count(), 1);
    }

    #[test]
    fn cancel_keeps_count_and_allows_advance() {
        let mut session = short_session();
        session.advance().unwrap();
        session.cancel();
        assert_eq!(session.repetition_count(), 1);
        assert!(!session.is_running());
        assert_eq!(session.advance().unwrap(), IntervalKind::ShortBreak);
    }

    #[test]
    fn stale_handle_after_reset_is_ignored() {
        let mut session = short_session();
        session.advance().unwrap();
        let armed = session.active_handle().unwrap();
        session.reset();
        let ticks_before = session.presenter().ticks().len();

        assert_eq!(session.on_timer_fired(armed), TickOutcome::Ignored);
        assert_eq!(session.presenter().ticks().len(), ticks_before);
        assert_eq!(session.repetition_count(), 0);
    }

    #[test]
    fn zero_length_intervals_return_control() {
        let durations = IntervalDurations::new_unchecked(0, 0, 0);
        let mut session =
            SessionController::with_durations(durations, ManualScheduler::new(), EventLog::new());

        assert_eq!(session.advance().unwrap(), IntervalKind::ShortBreak);
        assert_eq!(session.repetition_count(), 2);
        assert!(!session.is_running());
        assert_eq!(session.active_handle(), None);
        assert_eq!(session.scheduler().pending_count(), 0);
        assert_eq!(
            session.presenter().started_kinds(),
            vec![IntervalKind::Work, IntervalKind::ShortBreak]
        );
    }

    #[test]
    fn state_tracks_armed_handle() {
        let mut session = short_session();
        assert_eq!(
            session.state(),
            SessionState {
                repetition_count: 0,
                active_handle: None
            }
        );

        session.advance().unwrap();
        let first = session.state();
        assert_eq!(first.repetition_count, 1);
        assert!(first.active_handle.is_some());
        assert_eq!(first.active_handle, session.active_handle());

        fire(&mut session, 1);
        let second = session.state();
        assert_eq!(second.repetition_count, 1);
        assert!(second.active_handle.is_some());
        assert_ne!(second.active_handle, first.active_handle);

        session.cancel();
        assert_eq!(session.state().active_handle, None);
        assert_eq!(session.state().repetition_count, 1);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut session = short_session();
        session.advance().unwrap();
        match session.snapshot() {
            Event::StateSnapshot {
                repetition_count,
                kind,
                countdown,
                completed_marks,
                ..
            } => {
                assert_eq!(repetition_count, 1);
                assert_eq!(kind, Some(IntervalKind::Work));
                assert_eq!(countdown, CountdownState::Running { remaining_secs: 3 });
                assert_eq!(completed_marks, 0);
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }
}
