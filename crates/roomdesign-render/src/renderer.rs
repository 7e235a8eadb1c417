//! Shared types for rendering backends.

use kurbo::Point;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid surface size: {0}")]
    InvalidSize(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// A text label the host draws on top of the scene.
///
/// The scene carries no glyphs; hosts lay text out with their UI toolkit
/// (egui, parley) at `center` after presenting the frame.
#[derive(Debug, Clone)]
pub struct TextLabel {
    pub text: String,
    /// Center of the label in surface pixels.
    pub center: Point,
    pub font_size: f64,
    pub color: Color,
}
