use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default Work length in seconds.
pub const WORK_SECS: u64 = 25 * 60;
/// Default short break length in seconds.
pub const SHORT_BREAK_SECS: u64 = 5 * 60;
/// Default long break length in seconds.
pub const LONG_BREAK_SECS: u64 = 20 * 60;

/// Every eighth repetition is a long break.
pub const LONG_BREAK_EVERY: u32 = 8;

/// Longest accepted interval: one day.
pub const MAX_INTERVAL_MIN: u64 = 24 * 60;
pub const MAX_INTERVAL_SECS: u64 = MAX_INTERVAL_MIN * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalKind {
    Work,
    ShortBreak,
    LongBreak,
}

impl IntervalKind {
    /// Interval kind for the `repetition`-th interval of a session (1-based).
    ///
    /// Yields Work, ShortBreak, Work, ShortBreak, Work, ShortBreak, Work,
    /// LongBreak and repeats. Repetition 0 never runs; it maps to Work.
    pub fn for_repetition(repetition: u32) -> Self {
        if repetition > 0 && repetition % LONG_BREAK_EVERY == 0 {
            IntervalKind::LongBreak
        } else if repetition > 0 && repetition % 2 == 0 {
            IntervalKind::ShortBreak
        } else {
            IntervalKind::Work
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IntervalKind::Work => "Work",
            IntervalKind::ShortBreak => "Short Break",
            IntervalKind::LongBreak => "Long Break",
        }
    }

    pub fn is_break(self) -> bool {
        !matches!(self, IntervalKind::Work)
    }
}

impl std::fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The three interval lengths, in seconds.
///
/// Every length lies in `1..=MAX_INTERVAL_SECS`, so a session can never
/// complete an interval without yielding back to the scheduler. Deserializing
/// goes through [`IntervalDurations::new`] and enforces the same bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawIntervalDurations")]
pub struct IntervalDurations {
    work_secs: u64,
    short_break_secs: u64,
    long_break_secs: u64,
}

impl IntervalDurations {
    pub fn new(
        work_secs: u64,
        short_break_secs: u64,
        long_break_secs: u64,
    ) -> Result<Self, ConfigError> {
        for (key, secs) in [
            ("work", work_secs),
            ("short_break", short_break_secs),
            ("long_break", long_break_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "duration must be at least one second".to_string(),
                });
            }
            if secs > MAX_INTERVAL_SECS {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("duration must not exceed {MAX_INTERVAL_MIN} minutes"),
                });
            }
        }
        Ok(Self {
            work_secs,
            short_break_secs,
            long_break_secs,
        })
    }

    /// Build from whole minutes, as stored in the config file.
    ///
    /// Accepts `1..=MAX_INTERVAL_MIN` for each length.
    pub fn from_minutes(work: u64, short_break: u64, long_break: u64) -> Result<Self, ConfigError> {
        // Out-of-range minutes saturate well past the cap and are rejected by `new`.
        Self::new(
            work.saturating_mul(60),
            short_break.saturating_mul(60),
            long_break.saturating_mul(60),
        )
    }

    pub fn secs(&self, kind: IntervalKind) -> u64 {
        match kind {
            IntervalKind::Work => self.work_secs,
            IntervalKind::ShortBreak => self.short_break_secs,
            IntervalKind::LongBreak => self.long_break_secs,
        }
    }

    /// Length of one full cycle of eight repetitions.
    pub fn cycle_secs(&self) -> u64 {
        (1..=LONG_BREAK_EVERY)
            .map(|rep| self.secs(IntervalKind::for_repetition(rep)))
            .fold(0, u64::saturating_add)
    }

    /// Build without bounds checks, for exercising degenerate lengths.
    #[cfg(test)]
    pub(crate) fn new_unchecked(work_secs: u64, short_break_secs: u64, long_break_secs: u64) -> Self {
        Self {
            work_secs,
            short_break_secs,
            long_break_secs,
        }
    }
}

#[derive(Deserialize)]
struct RawIntervalDurations {
    work_secs: u64,
    short_break_secs: u64,
    long_break_secs: u64,
}

impl TryFrom<RawIntervalDurations> for IntervalDurations {
    type Error = ConfigError;

    fn try_from(raw: RawIntervalDurations) -> Result<Self, Self::Error> {
        Self::new(raw.work_secs, raw.short_break_secs, raw.long_break_secs)
    }
}

impl Default for IntervalDurations {
    fn default() -> Self {
        Self {
            work_secs: WORK_SECS,
            short_break_secs: SHORT_BREAK_SECS,
            long_break_secs: LONG_BREAK_SECS,
        }
    }
}
