// Copyright 2026 the Spacetime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-thread timelines.
//!
//! A timeline is a dashed vertical stem beneath a thread label. It is opened
//! the first time one of its thread's events is drawn and from then on only
//! grows downward: every drawn clock extends every open timeline to that
//! clock's row, so threads read as continuous parallel lines even through
//! rows where they have no event.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Line, Point};

use crate::backend::{ShapeId, Stroke, Surface, TextStyle};
use crate::color::Color;
use crate::event::ThreadId;
use crate::layout::LayoutConfig;

/// A drawn thread timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timeline {
    /// The stem line.
    pub stem: ShapeId,
    /// The thread label.
    pub label: ShapeId,
    /// Horizontal offset of the stem.
    pub x: f64,
    /// Top of the stem.
    pub start_y: f64,
    /// Bottom of the stem. Never decreases.
    pub end_y: f64,
    /// Color of the stem and label.
    pub color: Color,
}

impl Timeline {
    fn stem_line(&self) -> Line {
        Line::new((self.x, self.start_y), (self.x, self.end_y))
    }
}

/// The set of open timelines, in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct Timelines {
    order: Vec<ThreadId>,
    entries: HashMap<ThreadId, Timeline>,
}

impl Timelines {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `thread` has a timeline.
    #[must_use]
    pub fn contains(&self, thread: &ThreadId) -> bool {
        self.entries.contains_key(thread)
    }

    /// Returns the timeline of `thread`.
    #[must_use]
    pub fn get(&self, thread: &ThreadId) -> Option<&Timeline> {
        self.entries.get(thread)
    }

    /// Returns the threads with a timeline, in the order they were opened.
    #[must_use]
    pub fn threads(&self) -> &[ThreadId] {
        &self.order
    }

    /// Returns the number of timelines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns whether no timeline is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over timelines in the order they were opened.
    pub fn iter(&self) -> impl Iterator<Item = (&ThreadId, &Timeline)> {
        self.order
            .iter()
            .filter_map(|thread| self.entries.get(thread).map(|t| (thread, t)))
    }

    /// Draws a new timeline for `thread` at horizontal offset `x`.
    ///
    /// The stem starts at `start_y`, or at the top padding when `start_y` is
    /// zero, and is initially half the top padding long. The canvas is widened
    /// for the new timeline count and the display label is centered above the
    /// stem.
    ///
    /// # Panics
    ///
    /// Panics if `thread` already has a timeline.
    pub fn open<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        config: &LayoutConfig,
        thread: &ThreadId,
        x: f64,
        start_y: f64,
        color: Color,
    ) -> &Timeline {
        assert!(
            !self.entries.contains_key(thread),
            "timeline already open for {thread:?}"
        );

        self.order.push(thread.clone());
        surface.set_width(config.width_for(self.order.len()));

        let start_y = if start_y > 0.0 {
            start_y
        } else {
            start_y + config.top_padding
        };
        let end_y = start_y + config.top_padding / 2.0;
        let stem = surface.line(
            Line::new((x, start_y), (x, end_y)),
            &Stroke::dashed(config.stroke_width, color, config.stem_dash),
        );
        surface.set_tag(stem, &timeline_tag(thread));

        let label = surface.text(
            thread.display_name(),
            &TextStyle {
                size: config.thread_label_font_size,
                fill: color,
            },
        );
        let half_width = surface.bbox(label).map_or(0.0, |b| b.width() / 2.0);
        surface.move_to(label, Point::new(x - half_width, 0.0));

        self.entries.entry(thread.clone()).or_insert(Timeline {
            stem,
            label,
            x,
            start_y,
            end_y,
            color,
        })
    }

    /// Extends the timeline of `thread` down to `y`.
    ///
    /// Returns `false` if `thread` has no timeline.
    pub fn extend<S: Surface + ?Sized>(&mut self, surface: &mut S, thread: &ThreadId, y: f64) -> bool {
        let Some(timeline) = self.entries.get_mut(thread) else {
            return false;
        };
        extend_one(surface, timeline, y);
        true
    }

    /// Extends every timeline down to `y`.
    pub fn extend_all<S: Surface + ?Sized>(&mut self, surface: &mut S, y: f64) {
        for thread in &self.order {
            if let Some(timeline) = self.entries.get_mut(thread) {
                extend_one(surface, timeline, y);
            }
        }
    }

    /// Forgets every timeline. Does not touch the surface.
    pub fn clear(&mut self) {
        self.order.clear();
        self.entries.clear();
    }
}

fn extend_one<S: Surface + ?Sized>(surface: &mut S, timeline: &mut Timeline, y: f64) {
    if y > timeline.end_y {
        timeline.end_y = y;
        surface.set_line(timeline.stem, timeline.stem_line());
    }
}

/// Returns the element tag of `thread`'s stem.
#[must_use]
pub(crate) fn timeline_tag(thread: &ThreadId) -> String {
    format!("timeline{}", thread.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Drawn, TestSurface};

    fn open(timelines: &mut Timelines, surface: &mut TestSurface, name: &str, x: f64) -> Timeline {
        *timelines.open(
            surface,
            &LayoutConfig::standard(),
            &ThreadId::new(name),
            x,
            0.0,
            Color::RED,
        )
    }

    #[test]
    fn open_draws_a_dashed_stem_below_the_padding() {
        let mut surface = TestSurface::default();
        let mut timelines = Timelines::new();
        let timeline = open(&mut timelines, &mut surface, "worker||7", 100.0);

        assert_eq!(timeline.start_y, 45.0);
        assert_eq!(timeline.end_y, 67.5);
        match surface.shape(timeline.stem) {
            Drawn::Line { line, stroke } => {
                assert_eq!(line.p0, Point::new(100.0, 45.0));
                assert_eq!(line.p1, Point::new(100.0, 67.5));
                assert_eq!(stroke.dash, Some([5.0, 5.0]));
                assert_eq!(stroke.color, Color::RED);
            }
            other => panic!("stem should be a line, got {other:?}"),
        }
        assert_eq!(surface.tag_of(timeline.stem), Some("timelineworker||7"));
        assert_eq!(surface.width, 800.0);
    }

    #[test]
    fn label_is_centered_on_the_stem() {
        let mut surface = TestSurface::default();
        let mut timelines = Timelines::new();
        let timeline = open(&mut timelines, &mut surface, "abcd||1", 300.0);

        match surface.shape(timeline.label) {
            Drawn::Text { content, .. } => assert_eq!(content, "abcd"),
            other => panic!("label should be text, got {other:?}"),
        }
        let bbox = surface.bbox(timeline.label).unwrap();
        assert_eq!(bbox.center().x, 300.0);
        assert_eq!(bbox.y0, 0.0);
    }

    #[test]
    fn explicit_start_is_kept() {
        let mut surface = TestSurface::default();
        let mut timelines = Timelines::new();
        let timeline = *timelines.open(
            &mut surface,
            &LayoutConfig::standard(),
            &ThreadId::new("late"),
            100.0,
            120.0,
            Color::BLUE,
        );
        assert_eq!(timeline.start_y, 120.0);
        assert_eq!(timeline.end_y, 142.5);
    }

    #[test]
    fn canvas_widens_per_timeline() {
        let mut surface = TestSurface::default();
        let mut timelines = Timelines::new();
        open(&mut timelines, &mut surface, "a", 100.0);
        open(&mut timelines, &mut surface, "b", 300.0);
        assert_eq!(surface.width, 1600.0);
        assert_eq!(timelines.threads(), &[ThreadId::new("a"), ThreadId::new("b")]);
    }

    #[test]
    #[should_panic(expected = "timeline already open")]
    fn opening_twice_panics() {
        let mut surface = TestSurface::default();
        let mut timelines = Timelines::new();
        open(&mut timelines, &mut surface, "a", 100.0);
        open(&mut timelines, &mut surface, "a", 100.0);
    }

    #[test]
    fn extend_all_never_shrinks() {
        let mut surface = TestSurface::default();
        let mut timelines = Timelines::new();
        open(&mut timelines, &mut surface, "a", 100.0);
        open(&mut timelines, &mut surface, "b", 300.0);

        timelines.extend_all(&mut surface, 170.0);
        timelines.extend_all(&mut surface, 120.0);
        for (_, timeline) in timelines.iter() {
            assert_eq!(timeline.end_y, 170.0);
            match surface.shape(timeline.stem) {
                Drawn::Line { line, .. } => assert_eq!(line.p1.y, 170.0),
                other => panic!("stem should be a line, got {other:?}"),
            }
        }
    }

    #[test]
    fn extend_unknown_thread_is_false() {
        let mut surface = TestSurface::default();
        let mut timelines = Timelines::new();
        assert!(!timelines.extend(&mut surface, &ThreadId::new("ghost"), 100.0));
    }
}
