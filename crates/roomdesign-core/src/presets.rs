//! Preset room layouts.

use crate::units::feet_to_px;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-left corner of every preset layout, in pixels.
pub const PRESET_ORIGIN: Point = Point::new(96.0, 96.0);

/// Preset room width in feet.
pub const PRESET_WIDTH_FT: f64 = 12.0;

/// Preset room depth in feet.
pub const PRESET_DEPTH_FT: f64 = 10.0;

/// Wall topology of a preset room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresetKind {
    /// One back wall.
    Straight,
    /// Back wall plus right wall.
    LShaped,
    /// Left, back and right walls.
    UShaped,
    /// Four walls, fully enclosed.
    Closed,
}

impl PresetKind {
    pub const ALL: [PresetKind; 4] = [
        PresetKind::Straight,
        PresetKind::LShaped,
        PresetKind::UShaped,
        PresetKind::Closed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PresetKind::Straight => "straight",
            PresetKind::LShaped => "l-shaped",
            PresetKind::UShaped => "u-shaped",
            PresetKind::Closed => "closed",
        }
    }

    /// Wall segments as `(start, end)` pairs.
    ///
    /// Consecutive segments share endpoints; for `Closed` the last end is the first start.
    pub fn segments(self) -> Vec<(Point, Point)> {
        let x0 = PRESET_ORIGIN.x;
        let y0 = PRESET_ORIGIN.y;
        let x1 = x0 + feet_to_px(PRESET_WIDTH_FT);
        let y1 = y0 + feet_to_px(PRESET_DEPTH_FT);

        let top_left = Point::new(x0, y0);
        let top_right = Point::new(x1, y0);
        let bottom_right = Point::new(x1, y1);
        let bottom_left = Point::new(x0, y1);

        match self {
            PresetKind::Straight => vec![(top_left, top_right)],
            PresetKind::LShaped => vec![(top_left, top_right), (top_right, bottom_right)],
            PresetKind::UShaped => vec![
                (bottom_left, top_left),
                (top_left, top_right),
                (top_right, bottom_right),
            ],
            PresetKind::Closed => vec![
                (top_left, top_right),
                (top_right, bottom_right),
                (bottom_right, bottom_left),
                (bottom_left, top_left),
            ],
        }
    }
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognized preset name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset room: {0}")]
pub struct UnknownPreset(pub String);

impl FromStr for PresetKind {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}
