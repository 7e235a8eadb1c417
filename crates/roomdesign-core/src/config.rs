//! Designer configuration and color palette.

use crate::designer::DesignerError;
use crate::history::MAX_HISTORY;
use crate::snap::GRID_SIZE;
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Default wall thickness in pixels.
pub const DEFAULT_WALL_THICKNESS: f64 = 8.0;

/// Default hit-test tolerance in pixels.
pub const DEFAULT_HIT_TOLERANCE: f64 = 10.0;

/// Smallest accepted grid cell in pixels.
pub const MIN_GRID_SIZE: f64 = 4.0;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// `#rrggbb` form, alpha dropped.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a 0..1 opacity.
    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Colors used when rendering a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: SerializableColor,
    pub grid: SerializableColor,
    pub wall: SerializableColor,
    pub selected_wall: SerializableColor,
    pub label: SerializableColor,
    pub door: SerializableColor,
    pub window: SerializableColor,
    pub preview: SerializableColor,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: SerializableColor::rgb(255, 255, 255),
            grid: SerializableColor::rgb(229, 231, 235),
            wall: SerializableColor::rgb(55, 65, 81),
            selected_wall: SerializableColor::rgb(245, 158, 11),
            label: SerializableColor::rgb(17, 24, 39),
            door: SerializableColor::rgb(34, 197, 94),
            window: SerializableColor::rgb(59, 130, 246),
            preview: SerializableColor::rgb(107, 114, 128),
        }
    }
}

/// Tunables for a [`RoomDesigner`](crate::RoomDesigner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerConfig {
    /// Grid cell in pixels; walls snap to it and opening widths are measured in it.
    pub grid_size: f64,
    /// Thickness given to every new wall.
    pub wall_thickness: f64,
    /// Default distance for wall and opening hit-tests.
    pub hit_tolerance: f64,
    /// Maximum reachable undo snapshots.
    pub history_limit: usize,
    /// Draw grid lines under the room.
    pub show_grid: bool,
    /// Font size for wall length labels.
    pub label_font_size: f64,
    /// Distance of a wall label from the wall's midpoint.
    pub label_offset: f64,
    pub palette: Palette,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            wall_thickness: DEFAULT_WALL_THICKNESS,
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            history_limit: MAX_HISTORY,
            show_grid: true,
            label_font_size: 12.0,
            label_offset: 16.0,
            palette: Palette::default(),
        }
    }
}

impl DesignerConfig {
    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_wall_thickness(mut self, thickness: f64) -> Self {
        self.wall_thickness = thickness;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn with_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Load a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), DesignerError> {
        if !(self.grid_size.is_finite() && self.grid_size >= MIN_GRID_SIZE) {
            return Err(DesignerError::InvalidConfig(format!(
                "grid_size must be at least {MIN_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }
        if !(self.wall_thickness.is_finite() && self.wall_thickness > 0.0) {
            return Err(DesignerError::InvalidConfig(format!(
                "wall_thickness must be positive, got {}",
                self.wall_thickness
            )));
        }
        if !(self.hit_tolerance.is_finite() && self.hit_tolerance >= 0.0) {
            return Err(DesignerError::InvalidConfig(format!(
                "hit_tolerance must be non-negative, got {}",
                self.hit_tolerance
            )));
        }
        if self.history_limit == 0 {
            return Err(DesignerError::InvalidConfig(
                "history_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
