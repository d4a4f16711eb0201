//! Terminal presenters for a running session.
//!
//! Presenter callbacks cannot fail, so both presenters keep the first write
//! error and stop writing from then on. The run loop collects it through
//! [`OutputSink::take_error`].

use std::fmt;
use std::io::{self, Write};

use tomato_core::{format_remaining, marks, Event, IntervalKind, Presenter};

/// Output whose failures are collected rather than returned.
pub trait OutputSink {
    /// The first write error seen, if any. Output stays closed afterwards.
    fn take_error(&mut self) -> Option<io::Error>;
}

/// Writer that records its first error and drops all later output.
struct Sink<W: Write> {
    out: W,
    closed: bool,
    error: Option<io::Error>,
}

impl<W: Write> Sink<W> {
    fn new(out: W) -> Self {
        Self {
            out,
            closed: false,
            error: None,
        }
    }

    // Named so `write!`/`writeln!` work on a `Sink` directly.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) {
        if self.closed {
            return;
        }
        if let Err(err) = self.out.write_fmt(args) {
            self.fail(err);
        }
    }

    fn flush(&mut self) {
        if self.closed {
            return;
        }
        if let Err(err) = self.out.flush() {
            self.fail(err);
        }
    }

    fn fail(&mut self, err: io::Error) {
        tracing::debug!(kind = ?err.kind(), "output closed: {err}");
        self.closed = true;
        self.error = Some(err);
    }

    fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

/// Human-readable output.
///
/// In live mode the clock is redrawn in place on one line. Otherwise a line
/// is printed at every whole minute so piped output stays short.
pub struct TextPresenter<W: Write> {
    out: Sink<W>,
    mark: String,
    show_marks: bool,
    live: bool,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W, mark: impl Into<String>, show_marks: bool, live: bool) -> Self {
        Self {
            out: Sink::new(out),
            mark: mark.into(),
            show_marks,
            live,
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.out
    }
}

impl<W: Write> OutputSink for TextPresenter<W> {
    fn take_error(&mut self) -> Option<io::Error> {
        self.out.take_error()
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn on_tick(&mut self, remaining_secs: u64, kind: IntervalKind) {
        let clock = format_remaining(remaining_secs);
        if self.live {
            write!(self.out, "\r{:<11} {:>6}", kind.label(), clock);
            self.out.flush();
        } else if remaining_secs % 60 == 0 {
            writeln!(self.out, "{} {}", kind.label(), clock);
        }
    }

    fn on_interval_start(&mut self, repetition: u32, kind: IntervalKind, completed_marks: u32) {
        if self.live {
            writeln!(self.out);
        }
        if self.show_marks && completed_marks > 0 {
            writeln!(
                self.out,
                "== {} (#{}) {}",
                kind.label(),
                repetition,
                marks(completed_marks, &self.mark)
            );
        } else {
            writeln!(self.out, "== {} (#{})", kind.label(), repetition);
        }
    }

    fn on_interval_complete(&mut self, _repetition: u32, kind: IntervalKind) {
        if self.live {
            writeln!(self.out);
        }
        writeln!(self.out, "{} finished", kind.label());
    }

    fn on_session_reset(&mut self) {
        if self.live {
            writeln!(self.out);
        }
        writeln!(self.out, "Timer reset. Enter 's' to start.");
    }
}

/// One JSON [`Event`] per line.
pub struct JsonPresenter<W: Write> {
    out: Sink<W>,
}

impl<W: Write> JsonPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Sink::new(out),
        }
    }

    pub fn emit(&mut self, event: &Event) {
        match serde_json::to_string(event) {
            Ok(line) => {
                writeln!(self.out, "{line}");
                self.out.flush();
            }
            Err(e) => tracing::error!("failed to encode event: {e}"),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.out
    }
}

impl<W: Write> OutputSink for JsonPresenter<W> {
    fn take_error(&mut self) -> Option<io::Error> {
        self.out.take_error()
    }
}

impl<W: Write> Presenter for JsonPresenter<W> {
    fn on_tick(&mut self, remaining_secs: u64, kind: IntervalKind) {
        self.emit(&Event::tick(remaining_secs, kind));
    }

    fn on_interval_start(&mut self, repetition: u32, kind: IntervalKind, completed_marks: u32) {
        self.emit(&Event::interval_started(repetition, kind, completed_marks));
    }

    fn on_interval_complete(&mut self, repetition: u32, kind: IntervalKind) {
        self.emit(&Event::interval_completed(repetition, kind));
    }

    fn on_session_reset(&mut self) {
        self.emit(&Event::session_reset());
    }
}
