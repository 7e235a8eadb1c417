//! Grid snapping for hand-drawn walls.

use kurbo::Point;

/// Default grid cell in pixels (one foot at 2px per inch).
pub const GRID_SIZE: f64 = 24.0;

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// The pointer position before snapping.
    pub original: Point,
}

impl SnapResult {
    /// Check if snapping moved the point.
    pub fn is_snapped(&self) -> bool {
        self.point != self.original
    }

    /// Offset applied by the snap.
    pub fn offset(&self) -> kurbo::Vec2 {
        self.point - self.original
    }
}

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> SnapResult {
    let snapped_x = (point.x / grid_size).round() * grid_size;
    let snapped_y = (point.y / grid_size).round() * grid_size;

    SnapResult {
        point: Point::new(snapped_x, snapped_y),
        original: point,
    }
}

/// Snap a point with the default grid size.
pub fn snap_point(point: Point) -> Point {
    snap_to_grid(point, GRID_SIZE).point
}
