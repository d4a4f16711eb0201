//! # Tomato Core Library
//!
//! This library provides the session logic for the Tomato Pomodoro timer:
//! which interval runs next, how a countdown is driven to zero, and how the
//! cycle is interrupted and restarted. Rendering and timekeeping belong to
//! the host, which plugs in through two traits.
//!
//! ## Architecture
//!
//! - **Session**: [`SessionController`] owns the repetition counter and
//!   auto-advances through Work, ShortBreak and LongBreak intervals
//! - **Countdown**: a one-tick-at-a-time state machine that re-arms itself
//!   through a [`Scheduler`] instead of sleeping
//! - **Presentation**: [`Presenter`] callbacks for ticks, interval starts and
//!   resets, mirrored by serializable [`Event`]s
//! - **Storage**: TOML-based configuration of the three interval lengths
//!
//! ## Key Components
//!
//! - [`SessionController`]: Session state machine
//! - [`ManualScheduler`]: Virtual clock for tests and simulations
//! - [`TokioScheduler`]: Real timers on a tokio runtime
//! - [`Config`]: Application configuration management

pub mod display;
pub mod error;
pub mod events;
pub mod presenter;
pub mod scheduler;
pub mod storage;
pub mod timer;

pub use display::{format_remaining, marks, DisplayState};
pub use error::{ConfigError, CoreError};
pub use events::Event;
pub use presenter::{EventLog, NullPresenter, Presenter};
pub use scheduler::{ManualScheduler, Scheduler, TimerHandle, TokioScheduler};
pub use storage::Config;
pub use timer::{
    Countdown, CountdownState, IntervalDurations, IntervalKind, SessionController, SessionState,
    TickOutcome,
};
