// Copyright 2026 the Spacetime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability contract for drawing integrations.
//!
//! The layout engine never touches a concrete canvas. Integrations provide
//! three capabilities:
//!
//! - **Surface**: Implements [`Surface`] to create and edit shapes on a
//!   retained canvas (an SVG document, DOM nodes, a shape table in tests).
//!   Shapes are addressed by [`ShapeId`] handles issued by the surface.
//!
//! - **Tooltips**: Implements [`Tooltips`] to attach interactive content to
//!   a rendered element by its tag.
//!
//! - **Viewport**: Implements [`Viewport`] to keep new rows visible.
//!
//! A [`Session`](crate::session::Session) owns exactly one value implementing
//! all three, so two sessions can never draw into the same canvas.

use core::fmt;

use kurbo::{Circle, Line, Point, Rect};

use crate::color::Color;

/// A handle to a shape on a [`Surface`].
///
/// Handles are issued by the surface and stay valid until the next
/// [`Surface::clear`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeId(pub u32);

impl fmt::Debug for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShapeId({})", self.0)
    }
}

/// Stroke styling for lines.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stroke {
    /// Stroke width in canvas units.
    pub width: f64,
    /// Stroke color.
    pub color: Color,
    /// Dash and gap lengths, or `None` for a solid line.
    pub dash: Option<[f64; 2]>,
}

impl Stroke {
    /// A solid stroke.
    #[must_use]
    pub const fn solid(width: f64, color: Color) -> Self {
        Self {
            width,
            color,
            dash: None,
        }
    }

    /// A dashed stroke.
    #[must_use]
    pub const fn dashed(width: f64, color: Color, dash: [f64; 2]) -> Self {
        Self {
            width,
            color,
            dash: Some(dash),
        }
    }
}

/// Text styling.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStyle {
    /// Font size in canvas units.
    pub size: f64,
    /// Fill color.
    pub fill: Color,
}

/// What reveals a tooltip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Trigger {
    /// Revealed on click, hidden on the next click elsewhere.
    #[default]
    Click,
    /// Revealed while hovered.
    Hover,
}

/// How a tooltip behaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TooltipOptions {
    /// What reveals the tooltip.
    pub trigger: Trigger,
    /// Whether the content may contain markup (`<br>` separators).
    pub allow_html: bool,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            trigger: Trigger::Click,
            allow_html: true,
        }
    }
}

/// A retained drawing canvas.
///
/// Text and circles are positioned by their bounding box's top-left corner
/// via [`move_to`](Self::move_to); newly created text sits at the origin.
pub trait Surface {
    /// Removes every shape and invalidates all handles.
    fn clear(&mut self);

    /// Sets the canvas width.
    fn set_width(&mut self, width: f64);

    /// Sets the canvas height.
    fn set_height(&mut self, height: f64);

    /// Draws a line.
    fn line(&mut self, line: Line, stroke: &Stroke) -> ShapeId;

    /// Draws a filled circle.
    fn circle(&mut self, circle: Circle, fill: Color) -> ShapeId;

    /// Draws unformatted text with its bounding box at the origin.
    fn text(&mut self, content: &str, style: &TextStyle) -> ShapeId;

    /// Creates an empty group.
    fn group(&mut self) -> ShapeId;

    /// Moves `child` into `group`, drawing it in front of the group's
    /// existing children.
    fn add_to_group(&mut self, group: ShapeId, child: ShapeId);

    /// Moves a shape so that its bounding box's top-left corner is at `origin`.
    fn move_to(&mut self, id: ShapeId, origin: Point);

    /// Replaces the endpoints of a line.
    fn set_line(&mut self, id: ShapeId, line: Line);

    /// Assigns a stable element tag, used to address the shape from the
    /// tooltip layer.
    fn set_tag(&mut self, id: ShapeId, tag: &str);

    /// Returns the bounding box of a shape, or `None` if the handle is unknown.
    fn bbox(&self, id: ShapeId) -> Option<Rect>;

    /// Reorders a shape behind every other shape.
    fn send_to_back(&mut self, id: ShapeId);
}

/// Attaches interactive disclosure to rendered elements.
pub trait Tooltips {
    /// Attaches `content` to the element tagged `tag`.
    fn attach(&mut self, tag: &str, content: &str, options: &TooltipOptions);
}

/// The scrollable window onto the canvas.
pub trait Viewport {
    /// Requests a scroll to the bottom of the content.
    fn scroll_to_bottom(&mut self);
}
