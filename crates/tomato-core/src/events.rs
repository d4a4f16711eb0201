use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{CountdownState, IntervalKind};

/// Serializable form of every session notification.
/// The CLI prints these as JSON lines; tests record them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    IntervalStarted {
        repetition: u32,
        kind: IntervalKind,
        completed_marks: u32,
        at: DateTime<Utc>,
    },
    Tick {
        remaining_secs: u64,
        display: String,
        kind: IntervalKind,
        at: DateTime<Utc>,
    },
    IntervalCompleted {
        repetition: u32,
        kind: IntervalKind,
        at: DateTime<Utc>,
    },
    SessionReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        repetition_count: u32,
        kind: Option<IntervalKind>,
        countdown: CountdownState,
        completed_marks: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn interval_started(repetition: u32, kind: IntervalKind, completed_marks: u32) -> Self {
        Event::IntervalStarted {
            repetition,
            kind,
            completed_marks,
            at: Utc::now(),
        }
    }

    pub fn tick(remaining_secs: u64, kind: IntervalKind) -> Self {
        Event::Tick {
            remaining_secs,
            display: crate::display::format_remaining(remaining_secs),
            kind,
            at: Utc::now(),
        }
    }

    pub fn interval_completed(repetition: u32, kind: IntervalKind) -> Self {
        Event::IntervalCompleted {
            repetition,
            kind,
            at: Utc::now(),
        }
    }

    pub fn session_reset() -> Self {
        Event::SessionReset { at: Utc::now() }
    }
}
