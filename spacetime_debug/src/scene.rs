// Copyright 2026 the Spacetime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained in-memory scene.
//!
//! [`SceneSurface`] implements [`Surface`], [`Tooltips`], and [`Viewport`] by
//! keeping every shape in a table indexed by [`ShapeId`]. Paint order is a
//! separate list of root shapes, back to front; grouped shapes paint with
//! their group. The scene can be serialized with [`crate::svg`].
//!
//! Text has no real font behind it, so its extent is estimated from the
//! character count (see [`TEXT_ADVANCE`]).

use std::collections::HashMap;

use kurbo::{Circle, Line, Point, Rect, Shape, Vec2};
use spacetime_core::backend::{
    ShapeId, Stroke, Surface, TextStyle, TooltipOptions, Tooltips, Viewport,
};
use spacetime_core::color::Color;

/// Estimated horizontal advance of one character, as a fraction of the font
/// size.
pub const TEXT_ADVANCE: f64 = 0.6;

/// Geometry and styling of one retained shape.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneShape {
    /// A stroked line.
    Line {
        /// Endpoints.
        line: Line,
        /// Stroke.
        stroke: Stroke,
    },
    /// A filled circle.
    Circle {
        /// Geometry.
        circle: Circle,
        /// Fill color.
        fill: Color,
    },
    /// A run of text positioned by its top-left corner.
    Text {
        /// The characters.
        content: String,
        /// Font size and fill.
        style: TextStyle,
        /// Top-left corner of the estimated bounding box.
        origin: Point,
    },
    /// A group of shapes that paint and move together.
    Group {
        /// Members, in paint order.
        children: Vec<ShapeId>,
    },
}

/// A shape together with its scene metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    /// Geometry and styling.
    pub shape: SceneShape,
    /// Element tag, if one was assigned.
    pub tag: Option<String>,
    /// Owning group, if any.
    pub parent: Option<ShapeId>,
}

/// A tooltip attached to a tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tooltip {
    /// Tooltip content.
    pub content: String,
    /// Trigger and markup options.
    pub options: TooltipOptions,
}

/// A retained scene implementing every capability trait.
#[derive(Clone, Debug, Default)]
pub struct SceneSurface {
    nodes: Vec<SceneNode>,
    roots: Vec<ShapeId>,
    tooltips: HashMap<String, Tooltip>,
    width: f64,
    height: f64,
    scroll_requests: usize,
}

impl SceneSurface {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canvas width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the canvas height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the node for `id`.
    #[must_use]
    pub fn node(&self, id: ShapeId) -> Option<&SceneNode> {
        self.nodes.get(id.0 as usize)
    }

    /// Returns the number of shapes, including groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the scene has no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the ungrouped shapes in paint order, back to front.
    #[must_use]
    pub fn roots(&self) -> &[ShapeId] {
        &self.roots
    }

    /// Returns the first shape carrying `tag`.
    #[must_use]
    pub fn find_tag(&self, tag: &str) -> Option<ShapeId> {
        self.nodes
            .iter()
            .position(|node| node.tag.as_deref() == Some(tag))
            .and_then(|idx| u32::try_from(idx).ok())
            .map(ShapeId)
    }

    /// Returns the tooltip attached to `tag`.
    #[must_use]
    pub fn tooltip(&self, tag: &str) -> Option<&Tooltip> {
        self.tooltips.get(tag)
    }

    /// Returns the number of attached tooltips.
    #[must_use]
    pub fn tooltip_count(&self) -> usize {
        self.tooltips.len()
    }

    /// Returns how many times the viewport was asked to scroll to the bottom.
    #[must_use]
    pub fn scroll_requests(&self) -> usize {
        self.scroll_requests
    }

    fn push(&mut self, shape: SceneShape) -> ShapeId {
        let Ok(index) = u32::try_from(self.nodes.len()) else {
            panic!("scene cannot hold more than {} shapes", u32::MAX);
        };
        let id = ShapeId(index);
        self.nodes.push(SceneNode {
            shape,
            tag: None,
            parent: None,
        });
        self.roots.push(id);
        id
    }

    fn translate(&mut self, id: ShapeId, delta: Vec2) {
        let children = match self.nodes.get_mut(id.0 as usize).map(|node| &mut node.shape) {
            Some(SceneShape::Line { line, .. }) => {
                line.p0 += delta;
                line.p1 += delta;
                return;
            }
            Some(SceneShape::Circle { circle, .. }) => {
                circle.center += delta;
                return;
            }
            Some(SceneShape::Text { origin, .. }) => {
                *origin += delta;
                return;
            }
            Some(SceneShape::Group { children }) => children.clone(),
            None => return,
        };
        for child in children {
            self.translate(child, delta);
        }
    }
}

impl Surface for SceneSurface {
    fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.tooltips.clear();
        self.width = 0.0;
        self.height = 0.0;
    }

    fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    fn set_height(&mut self, height: f64) {
        self.height = height;
    }

    fn line(&mut self, line: Line, stroke: &Stroke) -> ShapeId {
        self.push(SceneShape::Line {
            line,
            stroke: *stroke,
        })
    }

    fn circle(&mut self, circle: Circle, fill: Color) -> ShapeId {
        self.push(SceneShape::Circle { circle, fill })
    }

    fn text(&mut self, content: &str, style: &TextStyle) -> ShapeId {
        self.push(SceneShape::Text {
            content: content.to_owned(),
            style: *style,
            origin: Point::ORIGIN,
        })
    }

    fn group(&mut self) -> ShapeId {
        self.push(SceneShape::Group {
            children: Vec::new(),
        })
    }

    fn add_to_group(&mut self, group: ShapeId, child: ShapeId) {
        assert!(
            matches!(
                self.node(group).map(|n| &n.shape),
                Some(SceneShape::Group { .. })
            ),
            "{group:?} is not a group"
        );
        assert!(self.node(child).is_some(), "unknown shape {child:?}");

        self.roots.retain(|id| *id != child);
        if let Some(SceneShape::Group { children }) =
            self.nodes.get_mut(group.0 as usize).map(|n| &mut n.shape)
        {
            children.push(child);
        }
        if let Some(node) = self.nodes.get_mut(child.0 as usize) {
            node.parent = Some(group);
        }
    }

    fn move_to(&mut self, id: ShapeId, origin: Point) {
        let Some(bbox) = self.bbox(id) else {
            return;
        };
        self.translate(id, origin - bbox.origin());
    }

    fn set_line(&mut self, id: ShapeId, new: Line) {
        if let Some(SceneShape::Line { line, .. }) =
            self.nodes.get_mut(id.0 as usize).map(|n| &mut n.shape)
        {
            *line = new;
        }
    }

    fn set_tag(&mut self, id: ShapeId, tag: &str) {
        if let Some(node) = self.nodes.get_mut(id.0 as usize) {
            node.tag = Some(tag.to_owned());
        }
    }

    fn bbox(&self, id: ShapeId) -> Option<Rect> {
        match &self.node(id)?.shape {
            SceneShape::Line { line, .. } => Some(line.bounding_box()),
            SceneShape::Circle { circle, .. } => Some(circle.bounding_box()),
            SceneShape::Text {
                content,
                style,
                origin,
            } => {
                let width = content.chars().count() as f64 * style.size * TEXT_ADVANCE;
                Some(Rect::from_origin_size(*origin, (width, style.size)))
            }
            SceneShape::Group { children } => children
                .iter()
                .filter_map(|child| self.bbox(*child))
                .reduce(|a, b| a.union(b)),
        }
    }

    fn send_to_back(&mut self, id: ShapeId) {
        let Some(node) = self.node(id) else {
            return;
        };
        if node.parent.is_some() {
            log::debug!("{id:?} is grouped, send_to_back ignored");
            return;
        }
        self.roots.retain(|shape| *shape != id);
        self.roots.insert(0, id);
    }
}

impl Tooltips for SceneSurface {
    fn attach(&mut self, tag: &str, content: &str, options: &TooltipOptions) {
        self.tooltips.insert(
            tag.to_owned(),
            Tooltip {
                content: content.to_owned(),
                options: *options,
            },
        );
    }
}

impl Viewport for SceneSurface {
    fn scroll_to_bottom(&mut self) {
        self.scroll_requests += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(size: f64) -> TextStyle {
        TextStyle {
            size,
            fill: Color::BLACK,
        }
    }

    #[test]
    fn text_extent_is_estimated_from_characters() {
        let mut scene = SceneSurface::new();
        let text = scene.text("SND", &style(10.0));
        let bbox = scene.bbox(text).unwrap();
        assert!((bbox.width() - 18.0).abs() < 1e-9, "got {bbox:?}");
        assert_eq!(bbox.height(), 10.0);
        assert_eq!(bbox.origin(), Point::ORIGIN);
    }

    #[test]
    fn move_to_places_the_top_left_corner() {
        let mut scene = SceneSurface::new();
        let circle = scene.circle(Circle::new((100.0, 70.0), 10.0), Color::RED);
        scene.move_to(circle, Point::new(0.0, 0.0));
        match &scene.node(circle).unwrap().shape {
            SceneShape::Circle { circle, .. } => assert_eq!(circle.center, Point::new(10.0, 10.0)),
            other => panic!("expected a circle, got {other:?}"),
        }
    }

    #[test]
    fn moving_a_group_moves_its_members() {
        let mut scene = SceneSurface::new();
        let group = scene.group();
        let circle = scene.circle(Circle::new((10.0, 10.0), 10.0), Color::RED);
        let label = scene.text("x", &style(10.0));
        scene.move_to(label, Point::new(30.0, 5.0));
        scene.add_to_group(group, circle);
        scene.add_to_group(group, label);

        scene.move_to(group, Point::new(100.0, 100.0));
        let bbox = scene.bbox(group).unwrap();
        assert_eq!(bbox.origin(), Point::new(100.0, 100.0));
        assert_eq!(scene.node(label).unwrap().parent, Some(group));
        assert_eq!(scene.roots(), &[group]);
    }

    #[test]
    fn send_to_back_reorders_roots() {
        let mut scene = SceneSurface::new();
        let a = scene.circle(Circle::new((0.0, 0.0), 1.0), Color::RED);
        let b = scene.line(Line::new((0.0, 0.0), (1.0, 1.0)), &Stroke::solid(1.0, Color::BLACK));
        scene.send_to_back(b);
        assert_eq!(scene.roots(), &[b, a]);
    }

    #[test]
    fn tooltips_are_keyed_by_tag() {
        let mut scene = SceneSurface::new();
        let options = TooltipOptions::default();
        scene.attach("event1", "first", &options);
        scene.attach("event1", "second", &options);
        assert_eq!(scene.tooltip_count(), 1);
        assert_eq!(scene.tooltip("event1").unwrap().content, "second");
    }

    #[test]
    fn shapes_are_numbered_in_creation_order() {
        let mut scene = SceneSurface::new();
        let first = scene.group();
        let second = scene.circle(Circle::new((0.0, 0.0), 1.0), Color::RED);
        scene.set_tag(second, "event7");
        assert_eq!((first, second), (ShapeId(0), ShapeId(1)));
        assert_eq!(scene.find_tag("event7"), Some(second));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut scene = SceneSurface::new();
        let c = scene.circle(Circle::new((0.0, 0.0), 1.0), Color::RED);
        scene.set_tag(c, "event0");
        scene.attach("event0", "hi", &TooltipOptions::default());
        scene.set_width(800.0);
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(scene.tooltip_count(), 0);
        assert_eq!(scene.find_tag("event0"), None);
        assert_eq!(scene.width(), 0.0);
    }

    #[test]
    #[should_panic(expected = "is not a group")]
    fn adding_to_a_non_group_panics() {
        let mut scene = SceneSurface::new();
        let a = scene.circle(Circle::new((0.0, 0.0), 1.0), Color::RED);
        let b = scene.circle(Circle::new((0.0, 0.0), 1.0), Color::RED);
        scene.add_to_group(a, b);
    }
}
