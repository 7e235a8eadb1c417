//! Vello-based drawing surface.

use crate::renderer::{RenderResult, RendererError, TextLabel};
use kurbo::{Affine, Line, Point, Rect, Size, Stroke};
use peniko::{Color, Fill};
use roomdesign_core::surface::{StrokeSpec, Surface, TextSpec};
use vello::Scene;

/// A [`Surface`] that builds a Vello scene.
pub struct VelloSurface {
    /// The Vello scene for the current frame.
    scene: Scene,
    /// Viewport size in logical pixels.
    size: Size,
    /// Color of the last clear (use as the render base color).
    background: Color,
    /// Text to overlay after the scene is rendered.
    labels: Vec<TextLabel>,
    /// Logical-to-physical pixel scale.
    scale_factor: f64,
}

impl VelloSurface {
    /// Create a surface for a viewport of `width` x `height` logical pixels.
    pub fn new(width: f64, height: f64) -> RenderResult<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(RendererError::InvalidSize(format!("{width}x{height}")));
        }
        Ok(Self {
            scene: Scene::new(),
            size: Size::new(width, height),
            background: Color::from_rgba8(255, 255, 255, 255),
            labels: Vec::new(),
            scale_factor: 1.0,
        })
    }

    /// Set the device pixel ratio (for HiDPI). Applied to everything drawn after the next clear.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Resize the viewport. The designer should re-render afterwards.
    pub fn resize(&mut self, width: f64, height: f64) -> RenderResult<()> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(RendererError::InvalidSize(format!("{width}x{height}")));
        }
        self.size = Size::new(width, height);
        Ok(())
    }

    /// Get the scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take the scene, leaving an empty one.
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Labels to draw over the scene, in draw order.
    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    fn view_transform(&self) -> Affine {
        Affine::scale(self.scale_factor)
    }
}

impl Surface for VelloSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.scene.reset();
        self.labels.clear();
        self.background = color;
        let viewport = Rect::from_origin_size(Point::ORIGIN, self.size);
        self.scene
            .fill(Fill::NonZero, self.view_transform(), color, None, &viewport);
    }

    fn stroke_line(&mut self, line: Line, stroke: &StrokeSpec) {
        let mut style = Stroke::new(stroke.width);
        if let Some([on, off]) = stroke.dash {
            style = style.with_dashes(0.0, [on, off]);
        }
        self.scene
            .stroke(&style, self.view_transform(), stroke.color, None, &line);
    }

    fn fill_rect(&mut self, rect: Rect, transform: Affine, color: Color) {
        self.scene
            .fill(Fill::NonZero, self.view_transform() * transform, color, None, &rect);
    }

    fn fill_text(&mut self, text: &str, center: Point, spec: &TextSpec) {
        self.labels.push(TextLabel {
            text: text.to_string(),
            center,
            font_size: spec.font_size,
            color: spec.color,
        });
    }
}
