//! Room model: walls, openings and the room aggregate.

use crate::geometry::{distance_to_segment, point_along};
use kurbo::{Line, Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a wall.
pub type WallId = Uuid;

/// Unique identifier for an opening.
pub type OpeningId = Uuid;

/// Reasons a room cannot be accepted from outside the designer.
#[derive(Debug, Error)]
pub enum RoomError {
    #[error("Malformed room JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Wall {0} has zero length")]
    ZeroLengthWall(WallId),
    #[error("Wall {0} has non-finite geometry")]
    NonFiniteWall(WallId),
    #[error("Id {0} is used more than once")]
    DuplicateId(Uuid),
    #[error("Opening {opening} refers to missing wall {wall}")]
    DanglingOpening { opening: OpeningId, wall: WallId },
}

/// A straight structural segment between two grid-snapped points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub(crate) id: WallId,
    /// Start point in surface pixels.
    pub start: Point,
    /// End point in surface pixels.
    pub end: Point,
    /// Stroke thickness in pixels.
    pub thickness: f64,
}

impl Wall {
    /// Create a new wall. Returns `None` for a zero-length segment.
    pub fn new(start: Point, end: Point, thickness: f64) -> Option<Self> {
        if start == end {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            start,
            end,
            thickness,
        })
    }

    pub fn id(&self) -> WallId {
        self.id
    }

    /// Length in pixels.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Angle of the wall direction in radians.
    pub fn angle(&self) -> f64 {
        (self.end - self.start).atan2()
    }

    /// Point at a normalized offset along the wall.
    pub fn point_at(&self, t: f64) -> Point {
        point_along(self.start, self.end, t)
    }

    pub fn as_line(&self) -> Line {
        Line::new(self.start, self.end)
    }

    /// Distance from `point` to the nearest point on this wall.
    pub fn distance_to(&self, point: Point) -> f64 {
        distance_to_segment(point, self.start, self.end)
    }
}

/// Kind of opening placed in a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window,
}

impl OpeningKind {
    /// Opening width measured in grid cells.
    pub fn grid_units(self) -> f64 {
        match self {
            OpeningKind::Door => 3.0,
            OpeningKind::Window => 2.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OpeningKind::Door => "door",
            OpeningKind::Window => "window",
        }
    }
}

/// A door or window anchored to a wall at a normalized offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub(crate) id: OpeningId,
    /// Wall this opening belongs to.
    pub wall_id: WallId,
    /// Normalized offset of the opening center along the wall (0 = start, 1 = end).
    pub position: f64,
    /// Width in pixels.
    pub width: f64,
    pub kind: OpeningKind,
}

impl Opening {
    pub fn new(wall_id: WallId, position: f64, width: f64, kind: OpeningKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            wall_id,
            position,
            width,
            kind,
        }
    }

    pub fn id(&self) -> OpeningId {
        self.id
    }
}

/// All walls and openings of a room. This is the unit of undo/redo and persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub walls: Vec<Wall>,
    pub openings: Vec<Opening>,
}

impl Room {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty() && self.openings.is_empty()
    }

    pub fn wall(&self, id: WallId) -> Option<&Wall> {
        self.walls.iter().find(|w| w.id == id)
    }

    pub fn opening(&self, id: OpeningId) -> Option<&Opening> {
        self.openings.iter().find(|o| o.id == id)
    }

    /// Openings attached to a wall, in insertion order.
    pub fn openings_on(&self, wall_id: WallId) -> impl Iterator<Item = &Opening> {
        self.openings.iter().filter(move |o| o.wall_id == wall_id)
    }

    pub fn add_wall(&mut self, wall: Wall) {
        self.walls.push(wall);
    }

    pub fn add_opening(&mut self, opening: Opening) {
        self.openings.push(opening);
    }

    /// Remove a wall and every opening attached to it.
    /// Returns false if no wall had this id.
    pub fn remove_wall(&mut self, id: WallId) -> bool {
        let before = self.walls.len();
        self.walls.retain(|w| w.id != id);
        if self.walls.len() == before {
            return false;
        }
        self.openings.retain(|o| o.wall_id != id);
        true
    }

    /// Remove a single opening. Returns false if no opening had this id.
    pub fn remove_opening(&mut self, id: OpeningId) -> bool {
        let before = self.openings.len();
        self.openings.retain(|o| o.id != id);
        self.openings.len() != before
    }

    pub fn clear(&mut self) {
        self.walls.clear();
        self.openings.clear();
    }

    /// First wall (in insertion order) within `tolerance` of `point`.
    pub fn wall_at_point(&self, point: Point, tolerance: f64) -> Option<&Wall> {
        self.walls.iter().find(|w| w.distance_to(point) <= tolerance)
    }

    /// First opening whose center on its wall lies within `tolerance` plus half its width.
    pub fn opening_at_point(&self, point: Point, tolerance: f64) -> Option<&Opening> {
        self.openings.iter().find(|o| {
            self.wall(o.wall_id)
                .map(|w| w.point_at(o.position).distance(point) <= tolerance + o.width / 2.0)
                .unwrap_or(false)
        })
    }

    /// Sum of all wall lengths in pixels.
    pub fn total_wall_length(&self) -> f64 {
        self.walls.iter().map(Wall::length).sum()
    }

    /// Bounding box of all wall endpoints.
    pub fn bounds(&self) -> Option<Rect> {
        let mut result: Option<Rect> = None;
        for wall in &self.walls {
            let bounds = Rect::from_points(wall.start, wall.end);
            result = Some(match result {
                Some(r) => r.union(bounds),
                None => bounds,
            });
        }
        result
    }

    /// Check the invariants the designer maintains: every wall has finite,
    /// distinct endpoints and a positive thickness, ids are unique, and every
    /// opening sits on an existing wall.
    pub fn validate(&self) -> Result<(), RoomError> {
        let mut ids = HashSet::new();
        for wall in &self.walls {
            let finite = [wall.start.x, wall.start.y, wall.end.x, wall.end.y]
                .iter()
                .all(|v| v.is_finite());
            if !finite || !(wall.thickness.is_finite() && wall.thickness > 0.0) {
                return Err(RoomError::NonFiniteWall(wall.id));
            }
            if wall.start == wall.end {
                return Err(RoomError::ZeroLengthWall(wall.id));
            }
            if !ids.insert(wall.id) {
                return Err(RoomError::DuplicateId(wall.id));
            }
        }
        for opening in &self.openings {
            if !ids.contains(&opening.wall_id) {
                return Err(RoomError::DanglingOpening {
                    opening: opening.id,
                    wall: opening.wall_id,
                });
            }
            if !ids.insert(opening.id) {
                return Err(RoomError::DuplicateId(opening.id));
            }
        }
        Ok(())
    }

    /// Serialize the room to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a room from JSON and check it with [`Room::validate`].
    pub fn from_json(json: &str) -> Result<Self, RoomError> {
        let room: Room = serde_json::from_str(json)?;
        room.validate()?;
        Ok(room)
    }
}
