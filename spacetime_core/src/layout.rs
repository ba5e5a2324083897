// Copyright 2026 the Spacetime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout parameters and coordinate math.
//!
//! Threads are laid out left to right in columns of
//! [`thread_spacing`](LayoutConfig::thread_spacing); clocks top to bottom in
//! rows of [`clock_spacing`](LayoutConfig::clock_spacing) below a band of
//! [`top_padding`](LayoutConfig::top_padding) reserved for thread labels.

use crate::event::ThreadId;
use crate::source::TraceSource;

/// Fixed layout parameters for a session.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LayoutConfig {
    /// Height of the label band above the first clock row.
    pub top_padding: f64,
    /// Horizontal distance between adjacent timelines.
    pub thread_spacing: f64,
    /// Vertical distance between adjacent clock rows.
    pub clock_spacing: f64,
    /// Radius of event markers.
    pub event_radius: f64,
    /// Canvas width granted per drawn timeline.
    pub width_per_timeline: f64,
    /// Left edge of the clock number labels.
    pub clock_label_x: f64,
    /// Font size of thread labels.
    pub thread_label_font_size: f64,
    /// Font size of clock and event-kind labels.
    pub label_font_size: f64,
    /// Dash and gap lengths of timeline stems.
    pub stem_dash: [f64; 2],
    /// Stroke width of stems and connectors.
    pub stroke_width: f64,
}

impl LayoutConfig {
    /// The standard layout.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            top_padding: 45.0,
            thread_spacing: 200.0,
            clock_spacing: 50.0,
            event_radius: 10.0,
            width_per_timeline: 800.0,
            clock_label_x: 16.0,
            thread_label_font_size: 20.0,
            label_font_size: 16.0,
            stem_dash: [5.0, 5.0],
            stroke_width: 1.0,
        }
    }

    /// Returns the horizontal center of the timeline at ordering `index`.
    #[must_use]
    pub fn thread_x(&self, index: usize) -> f64 {
        index as f64 * self.thread_spacing + self.thread_spacing / 2.0
    }

    /// Returns the vertical center of the row for `clock`.
    #[must_use]
    pub fn clock_y(&self, clock: u64) -> f64 {
        self.top_padding + clock as f64 * self.clock_spacing + self.clock_spacing / 2.0
    }

    /// Returns the canvas height needed to show the row at `y`.
    #[must_use]
    pub fn height_for_row(&self, y: f64) -> f64 {
        y + self.clock_spacing
    }

    /// Returns the canvas width needed to show `timelines` timelines.
    #[must_use]
    pub fn width_for(&self, timelines: usize) -> f64 {
        timelines as f64 * self.width_per_timeline
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Resolves the horizontal offset of `thread`'s timeline.
///
/// Returns `None` when the trace source cannot order the thread.
#[must_use]
pub fn position_for<T: TraceSource + ?Sized>(
    trace: &T,
    thread: &ThreadId,
    config: &LayoutConfig,
) -> Option<f64> {
    trace
        .ordered_index_of(thread)
        .map(|index| config.thread_x(index))
}
