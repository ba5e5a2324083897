// Copyright 2026 the Spacetime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG export of a [`SceneSurface`].
//!
//! Shapes are written in paint order. Tags become `id` attributes and a
//! tooltip attached to a tag becomes a `<title>` child of the tagged shape,
//! which browsers show on hover.

use std::fmt::{self, Write as _};
use std::io;

use spacetime_core::backend::{ShapeId, Stroke};

use crate::scene::{SceneShape, SceneSurface, Tooltip};

/// Renders `scene` as a standalone SVG document.
#[must_use]
pub fn to_svg(scene: &SceneSurface) -> String {
    let mut out = String::new();
    // Writing into a `String` cannot fail.
    let _ = write_document(scene, &mut out);
    out
}

/// Writes `scene` as a standalone SVG document to `writer`.
pub fn export<W: io::Write>(scene: &SceneSurface, writer: &mut W) -> io::Result<()> {
    writer.write_all(to_svg(scene).as_bytes())?;
    writer.flush()
}

fn write_document(scene: &SceneSurface, out: &mut impl fmt::Write) -> fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" font-family="sans-serif">"#,
        scene.width(),
        scene.height()
    )?;
    for id in scene.roots() {
        write_shape(scene, *id, 1, out)?;
    }
    writeln!(out, "</svg>")
}

fn write_shape(
    scene: &SceneSurface,
    id: ShapeId,
    depth: usize,
    out: &mut impl fmt::Write,
) -> fmt::Result {
    let Some(node) = scene.node(id) else {
        return Ok(());
    };
    let indent = "  ".repeat(depth);
    let tag_attr = node
        .tag
        .as_deref()
        .map(|tag| format!(r#" id="{}""#, escape(tag)))
        .unwrap_or_default();
    let tooltip = node.tag.as_deref().and_then(|tag| scene.tooltip(tag));

    match &node.shape {
        SceneShape::Line { line, stroke } => {
            write!(
                out,
                r#"{indent}<line{tag_attr} x1="{}" y1="{}" x2="{}" y2="{}"{}"#,
                line.p0.x,
                line.p0.y,
                line.p1.x,
                line.p1.y,
                stroke_attrs(stroke)
            )?;
            close(out, &indent, "line", tooltip)
        }
        SceneShape::Circle { circle, fill } => {
            write!(
                out,
                r#"{indent}<circle{tag_attr} cx="{}" cy="{}" r="{}" fill="{fill}""#,
                circle.center.x, circle.center.y, circle.radius
            )?;
            close(out, &indent, "circle", tooltip)
        }
        SceneShape::Text {
            content,
            style,
            origin,
        } => {
            writeln!(
                out,
                r#"{indent}<text{tag_attr} x="{}" y="{}" font-size="{}" fill="{}" dominant-baseline="hanging">{}</text>"#,
                origin.x,
                origin.y,
                style.size,
                style.fill,
                escape(content)
            )
        }
        SceneShape::Group { children } => {
            writeln!(out, "{indent}<g{tag_attr}>")?;
            for child in children {
                write_shape(scene, *child, depth + 1, out)?;
            }
            writeln!(out, "{indent}</g>")
        }
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(r#" stroke="{}" stroke-width="{}""#, stroke.color, stroke.width);
    if let Some([dash, gap]) = stroke.dash {
        let _ = write!(attrs, r#" stroke-dasharray="{dash} {gap}""#);
    }
    attrs
}

/// Finishes an element opened without its closing `>`.
fn close(
    out: &mut impl fmt::Write,
    indent: &str,
    element: &str,
    tooltip: Option<&Tooltip>,
) -> fmt::Result {
    match tooltip {
        None => writeln!(out, "/>"),
        Some(tooltip) => {
            let content = if tooltip.options.allow_html {
                tooltip.content.replace("<br>", "\n")
            } else {
                tooltip.content.clone()
            };
            writeln!(out, ">")?;
            writeln!(out, "{indent}  <title>{}</title>", escape(&content))?;
            writeln!(out, "{indent}</{element}>")
        }
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Circle, Line, Point};
    use spacetime_core::backend::{Surface, TextStyle, TooltipOptions, Tooltips};
    use spacetime_core::color::Color;

    #[test]
    fn empty_scene_is_a_bare_document() {
        let mut scene = SceneSurface::new();
        scene.set_width(800.0);
        scene.set_height(120.0);
        let svg = to_svg(&scene);
        assert!(svg.starts_with("<svg "), "got: {svg}");
        assert!(svg.contains(r#"width="800" height="120""#), "got: {svg}");
        assert!(svg.trim_end().ends_with("</svg>"), "got: {svg}");
    }

    #[test]
    fn dashed_lines_carry_a_dash_array() {
        let mut scene = SceneSurface::new();
        let stem = scene.line(
            Line::new((100.0, 45.0), (100.0, 70.0)),
            &Stroke::dashed(1.0, Color::RED, [5.0, 5.0]),
        );
        scene.set_tag(stem, "timelinea");
        let svg = to_svg(&scene);
        assert!(
            svg.contains(r##"<line id="timelinea" x1="100" y1="45" x2="100" y2="70" stroke="#ff0000" stroke-width="1" stroke-dasharray="5 5"/>"##),
            "got: {svg}"
        );
    }

    #[test]
    fn tooltips_become_titles() {
        let mut scene = SceneSurface::new();
        let marker = scene.circle(Circle::new((100.0, 70.0), 10.0), Color::BLUE);
        scene.set_tag(marker, "event1");
        scene.attach("event1", "Sender: a<br>Msg-ID: 7", &TooltipOptions::default());
        let svg = to_svg(&scene);
        assert!(svg.contains("<title>Sender: a\nMsg-ID: 7</title>"), "got: {svg}");
        assert!(svg.contains("</circle>"), "got: {svg}");
    }

    #[test]
    fn text_is_escaped() {
        let mut scene = SceneSurface::new();
        let text = scene.text(
            "a<b & \"c\"",
            &TextStyle {
                size: 16.0,
                fill: Color::BLACK,
            },
        );
        scene.move_to(text, Point::new(16.0, 60.0));
        let svg = to_svg(&scene);
        assert!(
            svg.contains(r##"x="16" y="60" font-size="16" fill="#000000""##),
            "got: {svg}"
        );
        assert!(svg.contains("a&lt;b &amp; &quot;c&quot;</text>"), "got: {svg}");
    }

    #[test]
    fn groups_nest_their_members() {
        let mut scene = SceneSurface::new();
        let connector = scene.line(
            Line::new((0.0, 0.0), (1.0, 1.0)),
            &Stroke::solid(1.0, Color::BLACK),
        );
        let group = scene.group();
        let marker = scene.circle(Circle::new((5.0, 5.0), 1.0), Color::RED);
        scene.add_to_group(group, marker);
        scene.send_to_back(connector);

        let svg = to_svg(&scene);
        let line_at = svg.find("<line").unwrap();
        let group_at = svg.find("<g>").unwrap();
        let circle_at = svg.find("  <circle").unwrap();
        assert!(line_at < group_at && group_at < circle_at, "got: {svg}");
    }

    #[test]
    fn export_writes_the_document() {
        let scene = SceneSurface::new();
        let mut bytes = Vec::new();
        export(&scene, &mut bytes).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), to_svg(&scene));
    }
}
