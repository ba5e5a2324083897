// Copyright 2026 the Spacetime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics for the layout loop.
//!
//! This module provides a [`DiagnosticSink`] trait with per-event methods
//! that the session calls at each layout step. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn DiagnosticSink`. When the
//! `diagnostics` feature is **off**, every `Tracer` method compiles to nothing
//! (zero overhead). When **on**, each method performs a single `Option`
//! branch before dispatching.

use kurbo::Point;

use crate::color::Color;
use crate::event::{EventId, ThreadId};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Why part of a clock row was not drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The trace has no event at the clock.
    NoEvent,
    /// The trace source could not order the event's thread.
    UnknownThread,
    /// The dependency's marker was never drawn.
    MissingDependency,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a clock row is laid out.
#[derive(Clone, Copy, Debug)]
pub struct ClockRowEvent {
    /// The clock.
    pub clock: u64,
    /// Vertical center of the row.
    pub y: f64,
}

/// Emitted when a thread's timeline is drawn for the first time.
#[derive(Clone, Copy, Debug)]
pub struct TimelineOpenedEvent<'a> {
    /// The thread.
    pub thread: &'a ThreadId,
    /// Horizontal offset of the stem.
    pub x: f64,
    /// Stem and label color.
    pub color: Color,
}

/// Emitted when an event marker is drawn.
#[derive(Clone, Copy, Debug)]
pub struct MarkerEvent<'a> {
    /// The clock of the event.
    pub clock: u64,
    /// The event.
    pub event: &'a EventId,
    /// Center of the marker.
    pub center: Point,
}

/// Emitted when a dependency connector is drawn.
#[derive(Clone, Copy, Debug)]
pub struct ConnectorEvent<'a> {
    /// The earlier event.
    pub from: &'a EventId,
    /// The later event.
    pub to: &'a EventId,
    /// Center of the earlier marker.
    pub start: Point,
    /// Center of the later marker.
    pub end: Point,
}

/// Emitted when part of a clock row is skipped.
#[derive(Clone, Copy, Debug)]
pub struct SkipEvent<'a> {
    /// The clock.
    pub clock: u64,
    /// The event, if the trace had one.
    pub event: Option<&'a EventId>,
    /// Why.
    pub reason: SkipReason,
}

// ---------------------------------------------------------------------------
// DiagnosticSink trait
// ---------------------------------------------------------------------------

/// Receives diagnostics from the layout loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait DiagnosticSink {
    /// Called when a clock row is laid out.
    fn on_clock_row(&mut self, e: &ClockRowEvent) {
        _ = e;
    }

    /// Called when a timeline is opened.
    fn on_timeline_opened(&mut self, e: &TimelineOpenedEvent<'_>) {
        _ = e;
    }

    /// Called when a marker is drawn.
    fn on_marker(&mut self, e: &MarkerEvent<'_>) {
        _ = e;
    }

    /// Called when a connector is drawn.
    fn on_connector(&mut self, e: &ConnectorEvent<'_>) {
        _ = e;
    }

    /// Called when part of a row is skipped.
    fn on_skip(&mut self, e: &SkipEvent<'_>) {
        _ = e;
    }

    /// Called when the session is reset.
    fn on_reset(&mut self) {}
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`DiagnosticSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`DiagnosticSink`].
///
/// When the `diagnostics` feature is **off**, every method compiles to
/// nothing. When **on**, each method checks the inner `Option` (one branch)
/// before dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "diagnostics")]
    sink: Option<&'a mut dyn DiagnosticSink>,
    #[cfg(not(feature = "diagnostics"))]
    _marker: core::marker::PhantomData<&'a mut dyn DiagnosticSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn DiagnosticSink) -> Self {
        #[cfg(feature = "diagnostics")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "diagnostics"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "diagnostics")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "diagnostics"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`ClockRowEvent`].
    #[inline]
    pub fn clock_row(&mut self, e: &ClockRowEvent) {
        #[cfg(feature = "diagnostics")]
        if let Some(s) = &mut self.sink {
            s.on_clock_row(e);
        }
        #[cfg(not(feature = "diagnostics"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TimelineOpenedEvent`].
    #[inline]
    pub fn timeline_opened(&mut self, e: &TimelineOpenedEvent<'_>) {
        #[cfg(feature = "diagnostics")]
        if let Some(s) = &mut self.sink {
            s.on_timeline_opened(e);
        }
        #[cfg(not(feature = "diagnostics"))]
        {
            _ = e;
        }
    }

    /// Emits a [`MarkerEvent`].
    #[inline]
    pub fn marker(&mut self, e: &MarkerEvent<'_>) {
        #[cfg(feature = "diagnostics")]
        if let Some(s) = &mut self.sink {
            s.on_marker(e);
        }
        #[cfg(not(feature = "diagnostics"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ConnectorEvent`].
    #[inline]
    pub fn connector(&mut self, e: &ConnectorEvent<'_>) {
        #[cfg(feature = "diagnostics")]
        if let Some(s) = &mut self.sink {
            s.on_connector(e);
        }
        #[cfg(not(feature = "diagnostics"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SkipEvent`].
    #[inline]
    pub fn skip(&mut self, e: &SkipEvent<'_>) {
        #[cfg(feature = "diagnostics")]
        if let Some(s) = &mut self.sink {
            s.on_skip(e);
        }
        #[cfg(not(feature = "diagnostics"))]
        {
            _ = e;
        }
    }

    /// Signals a reset.
    #[inline]
    pub fn reset(&mut self) {
        #[cfg(feature = "diagnostics")]
        if let Some(s) = &mut self.sink {
            s.on_reset();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
