mod countdown;
mod interval;
mod session;

pub use countdown::{Countdown, CountdownState, TickOutcome, TICK_PERIOD};
pub use interval::{
    IntervalDurations, IntervalKind, LONG_BREAK_EVERY, LONG_BREAK_SECS, SHORT_BREAK_SECS,
    WORK_SECS,
};
pub use session::{SessionController, SessionState};
