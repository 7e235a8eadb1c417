//! Drawing surface abstraction and a recording implementation.

use crate::config::SerializableColor;
use kurbo::{Affine, Line, Point, Rect, Size};
use peniko::Color;
use std::fmt::Write as _;

/// Stroke parameters for a line.
#[derive(Debug, Clone, Copy)]
pub struct StrokeSpec {
    pub width: f64,
    pub color: Color,
    /// Dash pattern as `[on, off]` lengths.
    pub dash: Option<[f64; 2]>,
}

impl StrokeSpec {
    pub fn new(width: f64, color: Color) -> Self {
        Self {
            width,
            color,
            dash: None,
        }
    }

    pub fn dashed(mut self, on: f64, off: f64) -> Self {
        self.dash = Some([on, off]);
        self
    }
}

/// Text parameters. Text is centered on the given position.
#[derive(Debug, Clone, Copy)]
pub struct TextSpec {
    pub font_size: f64,
    pub color: Color,
}

/// A 2D drawing target, the equivalent of a canvas 2D context.
///
/// Coordinates are surface pixels with the origin at the top-left.
pub trait Surface {
    /// Drawable size in pixels.
    fn size(&self) -> Size;

    /// Discard everything drawn and fill with `color`.
    fn clear(&mut self, color: Color);

    /// Stroke a straight line.
    fn stroke_line(&mut self, line: Line, stroke: &StrokeSpec);

    /// Fill `rect` after applying `transform`.
    fn fill_rect(&mut self, rect: Rect, transform: Affine, color: Color);

    /// Draw a single line of text centered at `center`.
    fn fill_text(&mut self, text: &str, center: Point, spec: &TextSpec);
}

/// A recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: SerializableColor,
    },
    Line {
        line: Line,
        width: f64,
        color: SerializableColor,
        dash: Option<[f64; 2]>,
    },
    Rect {
        rect: Rect,
        transform: Affine,
        color: SerializableColor,
    },
    Text {
        text: String,
        center: Point,
        font_size: f64,
        color: SerializableColor,
    },
}

/// A surface that records the current frame as a list of commands.
///
/// Used headless: tests inspect the commands, and the CLI writes them out as SVG.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn rects(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Rect { .. }))
    }

    /// Text of every label in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Serialize the recorded frame as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let (w, h) = (self.size.width, self.size.height);
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        for command in &self.commands {
            match command {
                DrawCommand::Clear { color } => {
                    let _ = writeln!(
                        svg,
                        r#"  <rect x="0" y="0" width="{w}" height="{h}" fill="{}"/>"#,
                        color.to_hex()
                    );
                }
                DrawCommand::Line { line, width, color, dash } => {
                    let dash = dash
                        .map(|[on, off]| format!(r#" stroke-dasharray="{on} {off}""#))
                        .unwrap_or_default();
                    let _ = writeln!(
                        svg,
                        r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-opacity="{:.3}" stroke-width="{width}" stroke-linecap="round"{dash}/>"#,
                        line.p0.x,
                        line.p0.y,
                        line.p1.x,
                        line.p1.y,
                        color.to_hex(),
                        color.opacity(),
                    );
                }
                DrawCommand::Rect { rect, transform, color } => {
                    let [a, b, c, d, e, f] = transform.as_coeffs();
                    let _ = writeln!(
                        svg,
                        r#"  <rect x="{}" y="{}" width="{}" height="{}" transform="matrix({a} {b} {c} {d} {e} {f})" fill="{}" fill-opacity="{:.3}"/>"#,
                        rect.x0,
                        rect.y0,
                        rect.width(),
                        rect.height(),
                        color.to_hex(),
                        color.opacity(),
                    );
                }
                DrawCommand::Text { text, center, font_size, color } => {
                    let _ = writeln!(
                        svg,
                        r#"  <text x="{}" y="{}" font-size="{font_size}" font-family="sans-serif" fill="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                        center.x,
                        center.y,
                        color.to_hex(),
                        escape_xml(text),
                    );
                }
            }
        }
        svg.push_str("</svg>\n");
        svg
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

impl Surface for DisplayList {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { color: color.into() });
    }

    fn stroke_line(&mut self, line: Line, stroke: &StrokeSpec) {
        self.commands.push(DrawCommand::Line {
            line,
            width: stroke.width,
            color: stroke.color.into(),
            dash: stroke.dash,
        });
    }

    fn fill_rect(&mut self, rect: Rect, transform: Affine, color: Color) {
        self.commands.push(DrawCommand::Rect {
            rect,
            transform,
            color: color.into(),
        });
    }

    fn fill_text(&mut self, text: &str, center: Point, spec: &TextSpec) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            center,
            font_size: spec.font_size,
            color: spec.color.into(),
        });
    }
}
