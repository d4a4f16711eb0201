//! Derived display values.
//!
//! Nothing here is stored: every value is recomputed from the repetition
//! count and the countdown's remaining seconds.

use serde::{Deserialize, Serialize};

use crate::timer::IntervalKind;

/// Glyph used for one completed Work→Break pair.
pub const DEFAULT_MARK: &str = "✓";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    pub remaining_secs: u64,
    /// `None` before the first interval of a session.
    pub label: Option<IntervalKind>,
    pub completed_marks: u32,
}

impl DisplayState {
    pub fn clock(&self) -> String {
        format_remaining(self.remaining_secs)
    }

    pub fn label_text(&self) -> &'static str {
        self.label.map(IntervalKind::label).unwrap_or("Timer")
    }
}

/// Render seconds as `minutes:seconds`, seconds zero-padded to two digits.
///
/// ```
/// assert_eq!(tomato_core::format_remaining(65), "1:05");
/// ```
pub fn format_remaining(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Number of completed Work→Break pairs for a repetition count.
pub fn completed_pairs(repetition_count: u32) -> u32 {
    repetition_count / 2
}

/// Mark string for `count` completed pairs, rebuilt from scratch each call.
pub fn marks(count: u32, glyph: &str) -> String {
    glyph.repeat(count as usize)
}
