//! Callbacks from the session into the presentation layer.

use crate::events::Event;
use crate::timer::IntervalKind;

/// Receives rendering notifications from a [`SessionController`](crate::timer::SessionController).
///
/// Notifications for one interval arrive in the order
/// `on_interval_start`, `on_tick` (starting value), `on_tick` once per second,
/// `on_interval_complete`.
pub trait Presenter {
    /// Remaining time changed. Also called once when an interval starts.
    fn on_tick(&mut self, remaining_secs: u64, kind: IntervalKind);

    /// A new interval began. `completed_marks` is recomputed from the
    /// repetition count.
    fn on_interval_start(&mut self, repetition: u32, kind: IntervalKind, completed_marks: u32);

    /// An interval ran to zero. The next one starts immediately after.
    fn on_interval_complete(&mut self, _repetition: u32, _kind: IntervalKind) {}

    /// The session went back to its initial state. Progress marks should be
    /// cleared and any start affordance re-enabled.
    fn on_session_reset(&mut self);
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn on_tick(&mut self, remaining_secs: u64, kind: IntervalKind) {
        (**self).on_tick(remaining_secs, kind)
    }

    fn on_interval_start(&mut self, repetition: u32, kind: IntervalKind, completed_marks: u32) {
        (**self).on_interval_start(repetition, kind, completed_marks)
    }

    fn on_interval_complete(&mut self, repetition: u32, kind: IntervalKind) {
        (**self).on_interval_complete(repetition, kind)
    }

    fn on_session_reset(&mut self) {
        (**self).on_session_reset()
    }
}

/// Presenter that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn on_tick(&mut self, _remaining_secs: u64, _kind: IntervalKind) {}
    fn on_interval_start(&mut self, _repetition: u32, _kind: IntervalKind, _completed_marks: u32) {}
    fn on_session_reset(&mut self) {}
}

/// Presenter that records every notification as an [`Event`].
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Remaining-seconds values of every recorded tick, in order.
    pub fn ticks(&self) -> Vec<u64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Tick { remaining_secs, .. } => Some(*remaining_secs),
                _ => None,
            })
            .collect()
    }

    /// Kinds of every interval started, in order.
    pub fn started_kinds(&self) -> Vec<IntervalKind> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::IntervalStarted { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for EventLog {
    fn on_tick(&mut self, remaining_secs: u64, kind: IntervalKind) {
        self.events.push(Event::tick(remaining_secs, kind));
    }

    fn on_interval_start(&mut self, repetition: u32, kind: IntervalKind, completed_marks: u32) {
        self.events
            .push(Event::interval_started(repetition, kind, completed_marks));
    }

    fn on_interval_complete(&mut self, repetition: u32, kind: IntervalKind) {
        self.events.push(Event::interval_completed(repetition, kind));
    }

    fn on_session_reset(&mut self) {
        self.events.push(Event::session_reset());
    }
}
