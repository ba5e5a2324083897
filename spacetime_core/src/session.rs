// Copyright 2026 the Spacetime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering session and its clock driver.
//!
//! A [`Session`] owns a trace source, a drawing surface, and all layout state
//! accumulated so far: the timelines drawn, the markers drawn (keyed by event
//! id, so dependencies resolve without a global shape registry), the process
//! colors, and the number of clocks drawn. That count doubles as the next
//! clock index, so clocks are drawn strictly in order starting from zero.
//!
//! Callers drive playback by calling [`advance`](Session::advance) once per
//! logical clock tick, e.g. from a timer or a "next" button, and discard
//! everything with [`reset`](Session::reset).

use hashbrown::HashMap;
use kurbo::Point;

use crate::backend::{ShapeId, Surface, TooltipOptions, Tooltips, Viewport};
use crate::color::{Color, ColorAllocator, Palette, PaletteExhaustion};
use crate::diagnostics::Tracer;
use crate::error::LayoutError;
use crate::event::{EventId, ProcessId, ThreadId};
use crate::layout::LayoutConfig;
use crate::source::TraceSource;
use crate::timeline::{Timeline, Timelines};

/// What [`Session::reset`] does with process colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorReset {
    /// Forget every assignment and restore the full palette. A replay assigns
    /// colors afresh in encounter order.
    #[default]
    Clear,
    /// Keep assignments and the palette position, so a process keeps its
    /// color across replays.
    Keep,
}

/// Configuration for a [`Session`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SessionConfig {
    /// Layout parameters.
    pub layout: LayoutConfig,
    /// Colors allocated to processes.
    pub palette: Palette,
    /// What happens when the palette runs out.
    pub exhaustion: PaletteExhaustion,
    /// What reset does with colors.
    pub color_reset: ColorReset,
    /// How marker tooltips behave.
    pub tooltip: TooltipOptions,
}

/// A successfully drawn event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawnEvent {
    /// The clock of the event.
    pub clock: u64,
    /// The marker shape.
    pub marker: ShapeId,
    /// Center of the marker.
    pub center: Point,
    /// The dependency connector, if one was drawn.
    pub connector: Option<ShapeId>,
    /// Whether this event opened its thread's timeline.
    pub opened_timeline: bool,
}

/// The result of rendering one clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderOutcome {
    /// The trace has no event at the clock. Nothing was drawn and the clock
    /// counter did not advance.
    NoEvent,
    /// The event's thread could not be placed. Only the clock row was drawn;
    /// the clock counter advanced.
    Unplaced {
        /// The clock of the event.
        clock: u64,
    },
    /// The event was drawn.
    Drawn(DrawnEvent),
}

impl RenderOutcome {
    /// Returns whether the clock was consumed.
    #[must_use]
    pub const fn advanced(&self) -> bool {
        !matches!(self, Self::NoEvent)
    }
}

/// Incremental layout state for one diagram.
#[derive(Debug)]
pub struct Session<T, S> {
    pub(crate) config: SessionConfig,
    pub(crate) trace: T,
    pub(crate) surface: S,
    pub(crate) colors: ColorAllocator,
    pub(crate) timelines: Timelines,
    pub(crate) markers: HashMap<EventId, ShapeId>,
    pub(crate) drawn_clocks: u64,
}

impl<T, S> Session<T, S> {
    /// Creates a session drawing `trace` onto `surface`.
    ///
    /// The surface is assumed to be empty.
    #[must_use]
    pub fn new(trace: T, surface: S, config: SessionConfig) -> Self {
        let colors = ColorAllocator::new(config.palette.clone(), config.exhaustion);
        Self {
            config,
            trace,
            surface,
            colors,
            timelines: Timelines::new(),
            markers: HashMap::new(),
            drawn_clocks: 0,
        }
    }

    /// Returns the number of clocks drawn, which is also the next clock.
    #[must_use]
    pub fn drawn_clocks(&self) -> u64 {
        self.drawn_clocks
    }

    /// Returns the threads with a timeline, in first-seen order.
    #[must_use]
    pub fn drawn_threads(&self) -> &[ThreadId] {
        self.timelines.threads()
    }

    /// Returns the timeline of `thread`.
    #[must_use]
    pub fn timeline(&self, thread: &ThreadId) -> Option<&Timeline> {
        self.timelines.get(thread)
    }

    /// Returns all timelines.
    #[must_use]
    pub fn timelines(&self) -> &Timelines {
        &self.timelines
    }

    /// Returns the marker drawn for `event`.
    #[must_use]
    pub fn marker(&self, event: &EventId) -> Option<ShapeId> {
        self.markers.get(event).copied()
    }

    /// Returns the number of markers drawn.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Returns the color assigned to `process`.
    #[must_use]
    pub fn process_color(&self, process: &ProcessId) -> Option<Color> {
        self.colors.get(process)
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the trace source.
    #[must_use]
    pub fn trace(&self) -> &T {
        &self.trace
    }

    /// Returns the trace source mutably, e.g. to append newly arrived events.
    pub fn trace_mut(&mut self) -> &mut T {
        &mut self.trace
    }

    /// Returns the surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Consumes the session, returning the trace source and surface.
    #[must_use]
    pub fn into_parts(self) -> (T, S) {
        (self.trace, self.surface)
    }
}

impl<T, S: Surface> Session<T, S> {
    /// Discards all layout state and clears the surface.
    ///
    /// Colors are cleared or kept according to
    /// [`SessionConfig::color_reset`].
    pub fn reset(&mut self) {
        self.reset_with(&mut Tracer::none());
    }

    /// Like [`reset`](Self::reset), reporting to `tracer`.
    pub fn reset_with(&mut self, tracer: &mut Tracer<'_>) {
        self.timelines.clear();
        self.markers.clear();
        self.drawn_clocks = 0;
        self.surface.clear();
        if self.config.color_reset == ColorReset::Clear {
            self.colors.restore();
        }
        log::info!("session reset");
        tracer.reset();
    }
}

impl<T: TraceSource, S: Surface + Tooltips + Viewport> Session<T, S> {
    /// Draws the next clock and scrolls the viewport to the bottom.
    pub fn advance(&mut self) -> Result<RenderOutcome, LayoutError> {
        self.advance_with(&mut Tracer::none())
    }

    /// Like [`advance`](Self::advance), reporting to `tracer`.
    pub fn advance_with(&mut self, tracer: &mut Tracer<'_>) -> Result<RenderOutcome, LayoutError> {
        let outcome = self.render_clock_with(self.drawn_clocks, tracer)?;
        self.surface.scroll_to_bottom();
        Ok(outcome)
    }

    /// Advances until the trace has no event at the next clock.
    ///
    /// Returns the number of clocks consumed.
    pub fn advance_all(&mut self) -> Result<u64, LayoutError> {
        self.advance_all_with(&mut Tracer::none())
    }

    /// Like [`advance_all`](Self::advance_all), reporting to `tracer`.
    pub fn advance_all_with(&mut self, tracer: &mut Tracer<'_>) -> Result<u64, LayoutError> {
        let start = self.drawn_clocks;
        while self.advance_with(tracer)?.advanced() {}
        Ok(self.drawn_clocks - start)
    }
}
