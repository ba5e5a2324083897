// Copyright 2026 the Spacetime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable diagnostics output.
//!
//! [`PrettyPrintSink`] implements [`DiagnosticSink`] and writes one line per
//! event to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use spacetime_core::diagnostics::{
    ClockRowEvent, ConnectorEvent, DiagnosticSink, MarkerEvent, SkipEvent, SkipReason,
    TimelineOpenedEvent,
};

/// Writes human-readable diagnostic lines to a [`Write`](std::io::Write)
/// destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the destination.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn reason_name(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::NoEvent => "no-event",
        SkipReason::UnknownThread => "unknown-thread",
        SkipReason::MissingDependency => "missing-dependency",
    }
}

impl<W: Write> DiagnosticSink for PrettyPrintSink<W> {
    fn on_clock_row(&mut self, e: &ClockRowEvent) {
        let _ = writeln!(self.writer, "[row] clock={} y={:.1}", e.clock, e.y);
    }

    fn on_timeline_opened(&mut self, e: &TimelineOpenedEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[timeline] thread={} x={:.1} color={}",
            e.thread, e.x, e.color
        );
    }

    fn on_marker(&mut self, e: &MarkerEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[marker] clock={} event={} at=({:.1}, {:.1})",
            e.clock, e.event, e.center.x, e.center.y
        );
    }

    fn on_connector(&mut self, e: &ConnectorEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[connector] {} -> {} ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            e.from, e.to, e.start.x, e.start.y, e.end.x, e.end.y
        );
    }

    fn on_skip(&mut self, e: &SkipEvent<'_>) {
        match e.event {
            Some(event) => {
                let _ = writeln!(
                    self.writer,
                    "[skip] clock={} event={event} reason={}",
                    e.clock,
                    reason_name(e.reason)
                );
            }
            None => {
                let _ = writeln!(
                    self.writer,
                    "[skip] clock={} reason={}",
                    e.clock,
                    reason_name(e.reason)
                );
            }
        }
    }

    fn on_reset(&mut self) {
        let _ = writeln!(self.writer, "[reset]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use spacetime_core::color::Color;
    use spacetime_core::event::{EventId, ThreadId};

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn pretty_print_marker() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_marker(&MarkerEvent {
            clock: 1,
            event: &EventId::new("e1"),
            center: Point::new(100.0, 120.0),
        });
        let output = output(sink);
        assert_eq!(output, "[marker] clock=1 event=e1 at=(100.0, 120.0)\n");
    }

    #[test]
    fn pretty_print_timeline() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_timeline_opened(&TimelineOpenedEvent {
            thread: &ThreadId::new("main||7"),
            x: 300.0,
            color: Color::GREEN,
        });
        let output = output(sink);
        assert!(output.contains("thread=main||7"), "got: {output}");
        assert!(output.contains("color=#008000"), "got: {output}");
    }

    #[test]
    fn pretty_print_skips() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_skip(&SkipEvent {
            clock: 4,
            event: None,
            reason: SkipReason::NoEvent,
        });
        sink.on_skip(&SkipEvent {
            clock: 5,
            event: Some(&EventId::new("late")),
            reason: SkipReason::MissingDependency,
        });
        sink.on_reset();
        let output = output(sink);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            [
                "[skip] clock=4 reason=no-event",
                "[skip] clock=5 event=late reason=missing-dependency",
                "[reset]",
            ]
        );
    }
}
