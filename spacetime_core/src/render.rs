// Copyright 2026 the Spacetime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event rendering.
//!
//! Drawing one clock follows a fixed sequence:
//!
//! 1. **Fetch**: Ask the trace for the event at the clock. No event means
//!    nothing is drawn and the clock is not consumed.
//! 2. **Color**: Resolve the owning process's color if its thread can be
//!    placed. This is the only step that can fail, so it runs before anything
//!    touches the surface.
//! 3. **Row**: Grow the canvas to the clock's row and draw the clock number
//!    in the left margin.
//! 4. **Timeline**: Open the thread's timeline on first encounter. A thread
//!    the trace cannot order leaves the rest of the row undrawn.
//! 5. **Marker**: Draw the marker and its kind label, and attach the tooltip.
//! 6. **Connector**: For send/receive events, connect the dependency's
//!    marker if it was drawn.
//! 7. **Extend**: Pull every timeline down to the marker's row.

use alloc::format;
use alloc::string::{String, ToString};

use kurbo::{Circle, Line, Point, Rect};

use crate::backend::{ShapeId, Stroke, Surface, TextStyle, TooltipOptions, Tooltips};
use crate::color::Color;
use crate::diagnostics::{
    ClockRowEvent, ConnectorEvent, MarkerEvent, SkipEvent, SkipReason, TimelineOpenedEvent, Tracer,
};
use crate::error::LayoutError;
use crate::event::{EventId, EventKind, ThreadId, TraceEvent};
use crate::layout;
use crate::session::{DrawnEvent, RenderOutcome, Session};
use crate::source::TraceSource;

impl<T: TraceSource, S: Surface> Session<T, S> {
    /// Returns the horizontal offset of `thread`'s timeline, drawing the
    /// timeline first if it does not exist yet.
    ///
    /// Returns `None`, drawing nothing, if the trace cannot order `thread`.
    pub fn ensure_timeline(&mut self, thread: &ThreadId, start_y: f64, color: Color) -> Option<f64> {
        self.ensure_timeline_with(thread, start_y, color, &mut Tracer::none())
            .map(|(x, _)| x)
    }

    /// Returns the offset and whether the timeline was opened by this call.
    fn ensure_timeline_with(
        &mut self,
        thread: &ThreadId,
        start_y: f64,
        color: Color,
        tracer: &mut Tracer<'_>,
    ) -> Option<(f64, bool)> {
        if let Some(timeline) = self.timelines.get(thread) {
            return Some((timeline.x, false));
        }

        let x = layout::position_for(&self.trace, thread, &self.config.layout)?;
        self.timelines.open(
            &mut self.surface,
            &self.config.layout,
            thread,
            x,
            start_y,
            color,
        );
        tracer.timeline_opened(&TimelineOpenedEvent { thread, x, color });
        Some((x, true))
    }
}

impl<T: TraceSource, S: Surface + Tooltips> Session<T, S> {
    /// Draws the event at `clock`.
    ///
    /// `clock` must be [`drawn_clocks`](Self::drawn_clocks); anything else is
    /// rejected with [`LayoutError::OutOfOrder`] without drawing.
    pub fn render_clock(&mut self, clock: u64) -> Result<RenderOutcome, LayoutError> {
        self.render_clock_with(clock, &mut Tracer::none())
    }

    /// Like [`render_clock`](Self::render_clock), reporting to `tracer`.
    pub fn render_clock_with(
        &mut self,
        clock: u64,
        tracer: &mut Tracer<'_>,
    ) -> Result<RenderOutcome, LayoutError> {
        if clock != self.drawn_clocks {
            return Err(LayoutError::OutOfOrder {
                expected: self.drawn_clocks,
                requested: clock,
            });
        }

        let Some(event) = self.trace.event_at(clock).cloned() else {
            log::trace!("no event at clock {clock}");
            tracer.skip(&SkipEvent {
                clock,
                event: None,
                reason: SkipReason::NoEvent,
            });
            return Ok(RenderOutcome::NoEvent);
        };

        // An event that cannot be placed never claims a palette slot.
        let placed = self.timelines.contains(&event.thread)
            || layout::position_for(&self.trace, &event.thread, &self.config.layout).is_some();
        let color = if placed {
            Some(self.colors.color_for(&event.process)?)
        } else {
            None
        };
        let config = self.config.layout;
        let y = config.clock_y(clock);

        let label_style = self.label_style();
        self.surface.set_height(config.height_for_row(y));
        let clock_label = self.surface.text(&clock.to_string(), &label_style);
        self.surface.move_to(
            clock_label,
            Point::new(config.clock_label_x, y - config.event_radius),
        );
        tracer.clock_row(&ClockRowEvent { clock, y });

        let Some((x, opened_timeline, color)) = color.and_then(|color| {
            self.ensure_timeline_with(&event.thread, 0.0, color, tracer)
                .map(|(x, opened)| (x, opened, color))
        }) else {
            log::debug!(
                "thread {:?} of event {} has no ordering index, skipping marker",
                event.thread,
                event.id
            );
            tracer.skip(&SkipEvent {
                clock,
                event: Some(&event.id),
                reason: SkipReason::UnknownThread,
            });
            self.drawn_clocks += 1;
            return Ok(RenderOutcome::Unplaced { clock });
        };

        let radius = config.event_radius;
        let group = self.surface.group();
        let marker = self.surface.circle(Circle::new((x, y), radius), color);
        self.surface.add_to_group(group, marker);
        let tag = event_tag(&event.id);
        self.surface.set_tag(marker, &tag);

        let marker_box = self
            .surface
            .bbox(marker)
            .unwrap_or_else(|| Rect::from_center_size((x, y), (2.0 * radius, 2.0 * radius)));
        let center = marker_box.center();

        let kind_label = self.surface.text(event.kind.as_str(), &label_style);
        self.surface.add_to_group(group, kind_label);
        self.surface.move_to(
            kind_label,
            Point::new(
                marker_box.x0 + 3.0 * radius,
                marker_box.y0 - (radius - config.label_font_size) / 2.0,
            ),
        );
        tracer.marker(&MarkerEvent {
            clock,
            event: &event.id,
            center,
        });

        let content = tooltip_text(&event, &self.config.tooltip);
        self.surface.attach(&tag, &content, &self.config.tooltip);

        let connector = self.connect(&event, center, clock, tracer);
        self.markers.insert(event.id.clone(), marker);

        self.timelines.extend(&mut self.surface, &event.thread, center.y);
        self.timelines.extend_all(&mut self.surface, center.y);

        log::trace!("drew {} at clock {clock} ({}, {})", event.id, center.x, center.y);
        self.drawn_clocks += 1;

        Ok(RenderOutcome::Drawn(DrawnEvent {
            clock,
            marker,
            center,
            connector,
            opened_timeline,
        }))
    }

    /// Draws the connector from `event`'s dependency, if it has one that
    /// should and can be drawn.
    fn connect(
        &mut self,
        event: &TraceEvent,
        center: Point,
        clock: u64,
        tracer: &mut Tracer<'_>,
    ) -> Option<ShapeId> {
        let dependency = event.dependency.as_ref()?;
        if !event.kind.is_message() {
            return None;
        }

        let Some(start) = self
            .markers
            .get(dependency)
            .and_then(|shape| self.surface.bbox(*shape))
            .map(|bbox| bbox.center())
        else {
            // The dependency predates the visible part of the trace.
            log::debug!(
                "dependency {dependency} of {} was never drawn, skipping connector",
                event.id
            );
            tracer.skip(&SkipEvent {
                clock,
                event: Some(&event.id),
                reason: SkipReason::MissingDependency,
            });
            return None;
        };

        let connector = self.surface.line(
            Line::new(start, center),
            &Stroke::solid(self.config.layout.stroke_width, Color::BLACK),
        );
        self.surface.send_to_back(connector);
        tracer.connector(&ConnectorEvent {
            from: dependency,
            to: &event.id,
            start,
            end: center,
        });
        Some(connector)
    }

    fn label_style(&self) -> TextStyle {
        TextStyle {
            size: self.config.layout.label_font_size,
            fill: Color::BLACK,
        }
    }
}

/// Returns the element tag of `event`'s marker.
#[must_use]
pub(crate) fn event_tag(event: &EventId) -> String {
    format!("event{}", event.as_str())
}

/// Builds the tooltip content for `event`.
///
/// Message events list their endpoints and message id; every other kind
/// shows its raw message.
pub(crate) fn tooltip_text(event: &TraceEvent, options: &TooltipOptions) -> String {
    let payload = &event.payload;
    let source = payload.source.as_deref().unwrap_or_default();
    let destination = payload.destination.as_deref().unwrap_or_default();
    let message = payload.message.as_deref().unwrap_or_default();
    let br = if options.allow_html { "<br>" } else { "\n" };

    match event.kind {
        EventKind::Send => {
            format!("Sender: {source}{br}Receiver(s): {destination}{br}Msg-ID: {message}")
        }
        EventKind::Receive => {
            format!("Receiver: {destination}{br}Sender(s): {source}{br}Msg-ID: {message}")
        }
        _ => message.to_string(),
    }
}
