// Copyright 2026 the Spacetime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording test double for the capability traits.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Circle, Line, Point, Rect, Shape, Vec2};

use crate::backend::{ShapeId, Stroke, Surface, TextStyle, TooltipOptions, Tooltips, Viewport};
use crate::color::Color;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Drawn {
    Line { line: Line, stroke: Stroke },
    Circle { circle: Circle, fill: Color },
    Text { content: String, style: TextStyle, origin: Point },
    Group { children: Vec<ShapeId> },
}

#[derive(Debug, Default)]
pub(crate) struct TestSurface {
    pub(crate) shapes: Vec<Drawn>,
    pub(crate) tags: Vec<Option<String>>,
    /// Paint order, back to front.
    pub(crate) order: Vec<ShapeId>,
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) tooltips: Vec<(String, String, TooltipOptions)>,
    pub(crate) scrolls: usize,
    pub(crate) clears: usize,
}

impl TestSurface {
    pub(crate) fn shape(&self, id: ShapeId) -> &Drawn {
        &self.shapes[id.0 as usize]
    }

    pub(crate) fn tag_of(&self, id: ShapeId) -> Option<&str> {
        self.tags.get(id.0 as usize)?.as_deref()
    }

    pub(crate) fn find_tag(&self, tag: &str) -> Option<ShapeId> {
        self.tags
            .iter()
            .position(|t| t.as_deref() == Some(tag))
            .map(|idx| ShapeId(u32::try_from(idx).expect("shape index fits in u32")))
    }

    pub(crate) fn count(&self, pred: impl Fn(&Drawn) -> bool) -> usize {
        self.shapes.iter().filter(|s| pred(s)).count()
    }

    pub(crate) fn lines(&self) -> usize {
        self.count(|s| matches!(s, Drawn::Line { .. }))
    }

    pub(crate) fn circles(&self) -> usize {
        self.count(|s| matches!(s, Drawn::Circle { .. }))
    }

    fn push(&mut self, drawn: Drawn) -> ShapeId {
        let id = ShapeId(u32::try_from(self.shapes.len()).expect("shape count fits in u32"));
        self.shapes.push(drawn);
        self.tags.push(None);
        self.order.push(id);
        id
    }
}

impl Surface for TestSurface {
    fn clear(&mut self) {
        self.shapes.clear();
        self.tags.clear();
        self.order.clear();
        self.tooltips.clear();
        self.width = 0.0;
        self.height = 0.0;
        self.clears += 1;
    }

    fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    fn set_height(&mut self, height: f64) {
        self.height = height;
    }

    fn line(&mut self, line: Line, stroke: &Stroke) -> ShapeId {
        self.push(Drawn::Line {
            line,
            stroke: *stroke,
        })
    }

    fn circle(&mut self, circle: Circle, fill: Color) -> ShapeId {
        self.push(Drawn::Circle { circle, fill })
    }

    fn text(&mut self, content: &str, style: &TextStyle) -> ShapeId {
        self.push(Drawn::Text {
            content: content.to_string(),
            style: *style,
            origin: Point::ORIGIN,
        })
    }

    fn group(&mut self) -> ShapeId {
        self.push(Drawn::Group {
            children: Vec::new(),
        })
    }

    fn add_to_group(&mut self, group: ShapeId, child: ShapeId) {
        self.order.retain(|id| *id != child);
        if let Some(Drawn::Group { children }) = self.shapes.get_mut(group.0 as usize) {
            children.push(child);
        }
    }

    fn move_to(&mut self, id: ShapeId, origin: Point) {
        let Some(bbox) = self.bbox(id) else {
            return;
        };
        let delta: Vec2 = origin - bbox.origin();
        match &mut self.shapes[id.0 as usize] {
            Drawn::Line { line, .. } => {
                line.p0 += delta;
                line.p1 += delta;
            }
            Drawn::Circle { circle, .. } => circle.center += delta,
            Drawn::Text { origin: o, .. } => *o += delta,
            Drawn::Group { .. } => {}
        }
    }

    fn set_line(&mut self, id: ShapeId, new: Line) {
        if let Some(Drawn::Line { line, .. }) = self.shapes.get_mut(id.0 as usize) {
            *line = new;
        }
    }

    fn set_tag(&mut self, id: ShapeId, tag: &str) {
        if let Some(slot) = self.tags.get_mut(id.0 as usize) {
            *slot = Some(tag.to_string());
        }
    }

    fn bbox(&self, id: ShapeId) -> Option<Rect> {
        match self.shapes.get(id.0 as usize)? {
            Drawn::Line { line, .. } => Some(line.bounding_box()),
            Drawn::Circle { circle, .. } => Some(circle.bounding_box()),
            Drawn::Text {
                content,
                style,
                origin,
            } => {
                // Half an em per character keeps test arithmetic exact.
                let width = content.chars().count() as f64 * style.size / 2.0;
                Some(Rect::from_origin_size(*origin, (width, style.size)))
            }
            Drawn::Group { children } => children
                .iter()
                .filter_map(|child| self.bbox(*child))
                .reduce(|a, b| a.union(b)),
        }
    }

    fn send_to_back(&mut self, id: ShapeId) {
        self.order.retain(|shape| *shape != id);
        self.order.insert(0, id);
    }
}

impl Tooltips for TestSurface {
    fn attach(&mut self, tag: &str, content: &str, options: &TooltipOptions) {
        self.tooltips
            .push((tag.to_string(), content.to_string(), *options));
    }
}

impl Viewport for TestSurface {
    fn scroll_to_bottom(&mut self) {
        self.scrolls += 1;
    }
}
