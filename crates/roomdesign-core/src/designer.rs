//! The room designer engine: tool state, room mutations, history and rendering.

use crate::config::DesignerConfig;
use crate::history::History;
use crate::presets::PresetKind;
use crate::room::{Opening, OpeningId, OpeningKind, Room, RoomError, Wall, WallId};
use crate::snap::snap_to_grid;
use crate::surface::{StrokeSpec, Surface, TextSpec};
use crate::units::format_feet_inches;
use kurbo::{Affine, Line, Point, Rect, Vec2};
use thiserror::Error;

/// Errors raised while constructing a designer.
#[derive(Debug, Error)]
pub enum DesignerError {
    #[error("Drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("Invalid designer config: {0}")]
    InvalidConfig(String),
}

/// State of the wall tool.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ToolState {
    /// Waiting for the first click of a wall.
    #[default]
    Idle,
    /// First click placed; waiting for the second.
    Drawing {
        /// Snapped start of the wall being drawn.
        start: Point,
    },
}

/// Owns a room, its history and the surface it is drawn on.
///
/// Every method runs to completion and redraws the surface when it changes
/// anything visible.
pub struct RoomDesigner<S: Surface> {
    surface: S,
    config: DesignerConfig,
    room: Room,
    history: History<Room>,
    tool: ToolState,
    pointer: Option<Point>,
    selected: Option<WallId>,
}

impl<S: Surface> RoomDesigner<S> {
    /// Create a designer with an empty room.
    ///
    /// Fails if the surface has no drawable area or the config is invalid.
    pub fn new(surface: S, config: DesignerConfig) -> Result<Self, DesignerError> {
        let size = surface.size();
        let drawable = size.width.is_finite() && size.height.is_finite();
        if !(drawable && size.width > 0.0 && size.height > 0.0) {
            return Err(DesignerError::SurfaceUnavailable(format!(
                "surface has no drawable area ({}x{})",
                size.width, size.height
            )));
        }
        config.validate()?;

        let room = Room::new();
        let history = History::new(room.clone(), config.history_limit);
        let mut designer = Self {
            surface,
            config,
            room,
            history,
            tool: ToolState::Idle,
            pointer: None,
            selected: None,
        };
        designer.render();
        log::debug!("Room designer ready ({}x{})", size.width, size.height);
        Ok(designer)
    }

    /// Create a designer with the default config.
    pub fn with_surface(surface: S) -> Result<Self, DesignerError> {
        Self::new(surface, DesignerConfig::default())
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn tool_state(&self) -> ToolState {
        self.tool
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.tool, ToolState::Drawing { .. })
    }

    /// Snap a point to the configured grid.
    pub fn snap(&self, point: Point) -> Point {
        snap_to_grid(point, self.config.grid_size).point
    }

    // --- Wall tool ---

    /// Begin drawing a wall at the snapped `point`.
    pub fn start_wall(&mut self, point: Point) {
        let start = self.snap(point);
        self.tool = ToolState::Drawing { start };
        self.pointer = Some(start);
        self.render();
    }

    /// Finish the wall being drawn at the snapped `point`.
    ///
    /// Returns the new wall's id, or `None` if no wall was being drawn or the
    /// wall would have zero length. Either way the tool returns to idle.
    pub fn complete_wall(&mut self, point: Point) -> Option<WallId> {
        let ToolState::Drawing { start } = self.tool else {
            return None;
        };
        let end = self.snap(point);
        self.tool = ToolState::Idle;
        self.pointer = None;

        let Some(wall) = Wall::new(start, end, self.config.wall_thickness) else {
            log::debug!("Discarded zero-length wall at ({}, {})", start.x, start.y);
            self.render();
            return None;
        };
        let id = wall.id();
        self.room.add_wall(wall);
        log::debug!("Added wall {id} from ({}, {}) to ({}, {})", start.x, start.y, end.x, end.y);
        self.commit();
        Some(id)
    }

    /// Abandon the wall being drawn.
    pub fn cancel_temp_wall(&mut self) {
        self.tool = ToolState::Idle;
        self.pointer = None;
        self.render();
    }

    /// Track the live pointer; while drawing it is the end of the preview line.
    pub fn update_pointer(&mut self, point: Point) {
        self.pointer = Some(self.snap(point));
        if self.is_drawing() {
            self.render();
        }
    }

    // --- Room mutations ---

    /// Place a door or window on a wall at a normalized `position`.
    ///
    /// The position is not clamped and overlaps are not checked. Returns
    /// `None` if the wall does not exist.
    pub fn add_opening(
        &mut self,
        wall_id: WallId,
        position: f64,
        kind: OpeningKind,
    ) -> Option<OpeningId> {
        if self.room.wall(wall_id).is_none() {
            log::warn!("Ignoring {} on unknown wall {wall_id}", kind.name());
            return None;
        }
        let width = kind.grid_units() * self.config.grid_size;
        let opening = Opening::new(wall_id, position, width, kind);
        let id = opening.id();
        self.room.add_opening(opening);
        log::debug!("Added {} {id} on wall {wall_id} at {position}", kind.name());
        self.commit();
        Some(id)
    }

    /// Delete a wall and its openings. Unknown ids are ignored.
    pub fn delete_wall(&mut self, wall_id: WallId) -> bool {
        if !self.room.remove_wall(wall_id) {
            return false;
        }
        if self.selected == Some(wall_id) {
            self.selected = None;
        }
        log::debug!("Deleted wall {wall_id}");
        self.commit();
        true
    }

    /// Delete a single opening. Unknown ids are ignored.
    pub fn delete_opening(&mut self, opening_id: OpeningId) -> bool {
        if !self.room.remove_opening(opening_id) {
            return false;
        }
        log::debug!("Deleted opening {opening_id}");
        self.commit();
        true
    }

    /// Remove every wall and opening.
    pub fn clear_room(&mut self) {
        self.room.clear();
        self.selected = None;
        self.commit();
    }

    /// Replace the room with a preset layout.
    pub fn create_preset_room(&mut self, kind: PresetKind) {
        self.room.clear();
        self.selected = None;
        for (start, end) in kind.segments() {
            if let Some(wall) = Wall::new(start, end, self.config.wall_thickness) {
                self.room.add_wall(wall);
            }
        }
        log::debug!("Created {kind} preset with {} walls", self.room.walls.len());
        self.commit();
    }

    /// Replace the room with a loaded one and restart history from it.
    ///
    /// The room is checked with [`Room::validate`] first; a rejected room
    /// leaves the designer untouched.
    pub fn load_room(&mut self, room: Room) -> Result<(), RoomError> {
        room.validate()?;
        self.room = room;
        self.tool = ToolState::Idle;
        self.pointer = None;
        self.selected = None;
        self.history.reset(self.room.clone());
        self.render();
        Ok(())
    }

    // --- Queries ---

    /// First wall within `tolerance` pixels of `point`.
    pub fn find_wall_at_point(&self, point: Point, tolerance: f64) -> Option<&Wall> {
        self.room.wall_at_point(point, tolerance)
    }

    /// Wall hit-test with the configured tolerance.
    pub fn wall_at(&self, point: Point) -> Option<&Wall> {
        self.find_wall_at_point(point, self.config.hit_tolerance)
    }

    /// First opening within `tolerance` pixels of `point`.
    pub fn find_opening_at_point(&self, point: Point, tolerance: f64) -> Option<&Opening> {
        self.room.opening_at_point(point, tolerance)
    }

    // --- Selection ---

    /// Select a wall. Returns false if it does not exist.
    pub fn select_wall(&mut self, wall_id: WallId) -> bool {
        if self.room.wall(wall_id).is_none() {
            return false;
        }
        self.selected = Some(wall_id);
        self.render();
        true
    }

    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.render();
        }
    }

    pub fn selected_wall(&self) -> Option<&Wall> {
        self.selected.and_then(|id| self.room.wall(id))
    }

    // --- History ---

    /// Step back one snapshot. Returns false if already at the oldest.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.room = snapshot.clone();
        self.after_restore();
        true
    }

    /// Step forward one snapshot. Returns false if already at the newest.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.room = snapshot.clone();
        self.after_restore();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of reachable history snapshots.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn after_restore(&mut self) {
        if let Some(id) = self.selected {
            if self.room.wall(id).is_none() {
                self.selected = None;
            }
        }
        self.render();
    }

    /// Snapshot the room and redraw.
    fn commit(&mut self) {
        self.history.record(self.room.clone());
        self.render();
    }

    // --- Rendering ---

    /// Clear the surface and redraw the whole room.
    pub fn render(&mut self) {
        let palette = self.config.palette;
        self.surface.clear(palette.background.into());

        if self.config.show_grid {
            self.render_grid();
        }

        for wall in &self.room.walls {
            let color = if self.selected == Some(wall.id()) {
                palette.selected_wall
            } else {
                palette.wall
            };
            self.surface
                .stroke_line(wall.as_line(), &StrokeSpec::new(wall.thickness, color.into()));

            let label = format_feet_inches(wall.length());
            let spec = TextSpec {
                font_size: self.config.label_font_size,
                color: palette.label.into(),
            };
            self.surface
                .fill_text(&label, label_position(wall, self.config.label_offset), &spec);
        }

        for opening in &self.room.openings {
            let Some(wall) = self.room.wall(opening.wall_id) else {
                continue;
            };
            let color = match opening.kind {
                OpeningKind::Door => palette.door,
                OpeningKind::Window => palette.window,
            };
            let (rect, transform) = opening_geometry(wall, opening);
            self.surface.fill_rect(rect, transform, color.into());
        }

        if let (ToolState::Drawing { start }, Some(end)) = (self.tool, self.pointer) {
            if start != end {
                let stroke = StrokeSpec::new(2.0, palette.preview.into()).dashed(5.0, 5.0);
                self.surface.stroke_line(Line::new(start, end), &stroke);
            }
        }
    }

    fn render_grid(&mut self) {
        let size = self.surface.size();
        let step = self.config.grid_size;
        let stroke = StrokeSpec::new(0.5, self.config.palette.grid.into());

        let mut x = 0.0;
        while x <= size.width {
            self.surface
                .stroke_line(Line::new((x, 0.0), (x, size.height)), &stroke);
            x += step;
        }
        let mut y = 0.0;
        while y <= size.height {
            self.surface
                .stroke_line(Line::new((0.0, y), (size.width, y)), &stroke);
            y += step;
        }
    }
}

/// Label anchor: the wall midpoint pushed out along the wall's normal.
fn label_position(wall: &Wall, offset: f64) -> Point {
    let dir = wall.end - wall.start;
    let length = dir.hypot();
    if !(length.is_finite() && length > 0.0) {
        return wall.midpoint();
    }
    let normal = Vec2::new(-dir.y, dir.x) / length;
    wall.midpoint() + normal * offset
}

/// Rectangle (in wall-local space, centered at the origin) and transform for an opening.
fn opening_geometry(wall: &Wall, opening: &Opening) -> (Rect, Affine) {
    let center = wall.point_at(opening.position);
    let depth = wall.thickness + 4.0;
    let rect = Rect::new(
        -opening.width / 2.0,
        -depth / 2.0,
        opening.width / 2.0,
        depth / 2.0,
    );
    let transform = Affine::translate(center.to_vec2()) * Affine::rotate(wall.angle());
    (rect, transform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DisplayList, DrawCommand};
    use uuid::Uuid;

    fn designer() -> RoomDesigner<DisplayList> {
        let config = DesignerConfig::default().with_grid(false);
        RoomDesigner::new(DisplayList::new(800.0, 600.0), config).unwrap()
    }

    fn draw_wall(d: &mut RoomDesigner<DisplayList>, from: (f64, f64), to: (f64, f64)) -> WallId {
        d.start_wall(from.into());
        d.complete_wall(to.into()).unwrap()
    }

    #[test]
    fn test_zero_size_surface_is_fatal() {
        let result = RoomDesigner::with_surface(DisplayList::new(0.0, 600.0));
        assert!(matches!(result, Err(DesignerError::SurfaceUnavailable(_))));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = DesignerConfig::default().with_history_limit(0);
        let result = RoomDesigner::new(DisplayList::new(800.0, 600.0), config);
        assert!(matches!(result, Err(DesignerError::InvalidConfig(_))));
    }

    #[test]
    fn test_wall_endpoints_are_snapped() {
        let mut d = designer();
        d.start_wall(Point::new(23.0, 49.0));
        assert_eq!(d.tool_state(), ToolState::Drawing { start: Point::new(24.0, 48.0) });
        let id = d.complete_wall(Point::new(130.0, 50.0)).unwrap();

        let wall = d.room().wall(id).unwrap();
        assert_eq!(wall.start, Point::new(24.0, 48.0));
        assert_eq!(wall.end, Point::new(120.0, 48.0));
        assert_eq!(wall.thickness, 8.0);
        assert_eq!(d.tool_state(), ToolState::Idle);
    }

    #[test]
    fn test_zero_length_wall_is_discarded() {
        let mut d = designer();
        d.start_wall(Point::new(48.0, 48.0));
        assert!(d.complete_wall(Point::new(50.0, 45.0)).is_none());
        assert!(d.room().walls.is_empty());
        assert_eq!(d.tool_state(), ToolState::Idle);
        assert!(!d.can_undo());
    }

    #[test]
    fn test_complete_without_start_is_noop() {
        let mut d = designer();
        assert!(d.complete_wall(Point::new(100.0, 100.0)).is_none());
        assert!(d.room().walls.is_empty());
    }

    #[test]
    fn test_cancel_temp_wall() {
        let mut d = designer();
        d.start_wall(Point::new(0.0, 0.0));
        d.update_pointer(Point::new(96.0, 0.0));
        assert_eq!(d.surface().lines().count(), 1);

        d.cancel_temp_wall();
        assert!(!d.is_drawing());
        assert_eq!(d.surface().lines().count(), 0);
        assert!(d.complete_wall(Point::new(96.0, 0.0)).is_none());
    }

    #[test]
    fn test_preview_line_is_dashed() {
        let mut d = designer();
        d.start_wall(Point::new(0.0, 0.0));
        d.update_pointer(Point::new(95.0, 2.0));
        let preview = d.surface().lines().last().cloned();
        match preview {
            Some(DrawCommand::Line { line, dash, .. }) => {
                assert!(dash.is_some());
                assert_eq!(line.p1, Point::new(96.0, 0.0));
            }
            other => panic!("expected preview line, got {other:?}"),
        }
    }

    #[test]
    fn test_opening_widths() {
        let mut d = designer();
        let wall = draw_wall(&mut d, (0.0, 0.0), (240.0, 0.0));
        let door = d.add_opening(wall, 0.5, OpeningKind::Door).unwrap();
        let window = d.add_opening(wall, 0.2, OpeningKind::Window).unwrap();

        assert_eq!(d.room().opening(door).unwrap().width, 72.0);
        assert_eq!(d.room().opening(window).unwrap().width, 48.0);
    }

    #[test]
    fn test_opening_position_is_not_clamped() {
        let mut d = designer();
        let wall = draw_wall(&mut d, (0.0, 0.0), (48.0, 0.0));
        let id = d.add_opening(wall, 1.4, OpeningKind::Door).unwrap();
        assert_eq!(d.room().opening(id).unwrap().position, 1.4);
    }

    #[test]
    fn test_opening_on_unknown_wall() {
        let mut d = designer();
        let len = d.history_len();
        assert!(d.add_opening(Uuid::new_v4(), 0.5, OpeningKind::Door).is_none());
        assert!(d.room().openings.is_empty());
        assert_eq!(d.history_len(), len);
    }

    #[test]
    fn test_delete_wall_cascades() {
        let mut d = designer();
        let a = draw_wall(&mut d, (0.0, 0.0), (240.0, 0.0));
        let b = draw_wall(&mut d, (240.0, 0.0), (240.0, 240.0));
        d.add_opening(a, 0.3, OpeningKind::Door);
        d.add_opening(a, 0.7, OpeningKind::Window);
        let kept = d.add_opening(b, 0.5, OpeningKind::Window).unwrap();
        d.select_wall(a);

        assert!(d.delete_wall(a));
        assert_eq!(d.room().walls.len(), 1);
        assert_eq!(d.room().openings.len(), 1);
        assert_eq!(d.room().openings[0].id(), kept);
        assert!(d.selected_wall().is_none());
    }

    #[test]
    fn test_delete_unknown_ids_are_silent() {
        let mut d = designer();
        draw_wall(&mut d, (0.0, 0.0), (96.0, 0.0));
        let before = d.room().clone();
        assert!(!d.delete_wall(Uuid::new_v4()));
        assert!(!d.delete_opening(Uuid::new_v4()));
        assert_eq!(d.room(), &before);
    }

    #[test]
    fn test_delete_opening() {
        let mut d = designer();
        let wall = draw_wall(&mut d, (0.0, 0.0), (240.0, 0.0));
        let door = d.add_opening(wall, 0.5, OpeningKind::Door).unwrap();
        assert!(d.delete_opening(door));
        assert!(d.room().openings.is_empty());
        assert_eq!(d.room().walls.len(), 1);
    }

    #[test]
    fn test_undo_to_empty_then_false() {
        let mut d = designer();
        let wall = draw_wall(&mut d, (0.0, 0.0), (96.0, 0.0));
        draw_wall(&mut d, (96.0, 0.0), (96.0, 96.0));
        d.add_opening(wall, 0.5, OpeningKind::Window);
        d.create_preset_room(PresetKind::UShaped);

        for _ in 0..4 {
            assert!(d.undo());
        }
        assert!(d.room().is_empty());
        assert!(!d.undo());
        assert!(d.room().is_empty());
    }

    #[test]
    fn test_redo_restores_exact_state() {
        let mut d = designer();
        let wall = draw_wall(&mut d, (0.0, 0.0), (144.0, 0.0));
        d.add_opening(wall, 0.5, OpeningKind::Door);
        let before = d.room().clone();

        assert!(d.undo());
        assert_ne!(d.room(), &before);
        assert!(d.redo());
        assert_eq!(d.room(), &before);
        assert!(!d.redo());
    }

    #[test]
    fn test_new_mutation_discards_redo() {
        let mut d = designer();
        draw_wall(&mut d, (0.0, 0.0), (96.0, 0.0));
        d.undo();
        assert!(d.can_redo());
        draw_wall(&mut d, (0.0, 48.0), (96.0, 48.0));
        assert!(!d.can_redo());
    }

    #[test]
    fn test_history_capped_at_fifty() {
        let mut d = designer();
        for i in 0..60 {
            let y = f64::from(i) * 24.0;
            draw_wall(&mut d, (0.0, y), (96.0, y));
        }
        assert_eq!(d.history_len(), 50);

        let mut undos = 0;
        while d.undo() {
            undos += 1;
        }
        assert_eq!(undos, 49);
        // Oldest reachable snapshot holds 11 walls
        assert_eq!(d.room().walls.len(), 11);
    }

    #[test]
    fn test_closed_preset_is_loop() {
        let mut d = designer();
        d.create_preset_room(PresetKind::Closed);
        let walls = &d.room().walls;
        assert_eq!(walls.len(), 4);
        for i in 0..walls.len() {
            assert_eq!(walls[i].end, walls[(i + 1) % walls.len()].start);
        }
    }

    #[test]
    fn test_preset_counts_and_replacement() {
        let mut d = designer();
        d.create_preset_room(PresetKind::LShaped);
        assert_eq!(d.room().walls.len(), 2);
        d.create_preset_room(PresetKind::UShaped);
        assert_eq!(d.room().walls.len(), 3);
        d.create_preset_room(PresetKind::Straight);
        assert_eq!(d.room().walls.len(), 1);
        assert!(d.undo());
        assert_eq!(d.room().walls.len(), 3);
    }

    #[test]
    fn test_clear_room_is_undoable() {
        let mut d = designer();
        d.create_preset_room(PresetKind::Closed);
        d.clear_room();
        assert!(d.room().is_empty());
        assert!(d.undo());
        assert_eq!(d.room().walls.len(), 4);
    }

    #[test]
    fn test_find_wall_at_point() {
        let mut d = designer();
        let id = draw_wall(&mut d, (0.0, 0.0), (240.0, 0.0));
        assert_eq!(d.find_wall_at_point(Point::new(100.0, 9.0), 10.0).map(Wall::id), Some(id));
        assert!(d.find_wall_at_point(Point::new(100.0, 11.0), 10.0).is_none());
        assert_eq!(d.wall_at(Point::new(250.0, 0.0)).map(Wall::id), Some(id));
    }

    #[test]
    fn test_find_opening_at_point() {
        let mut d = designer();
        let wall = draw_wall(&mut d, (0.0, 0.0), (240.0, 0.0));
        let door = d.add_opening(wall, 0.5, OpeningKind::Door).unwrap();
        let hit = d.find_opening_at_point(Point::new(130.0, 3.0), 5.0);
        assert_eq!(hit.map(Opening::id), Some(door));
    }

    #[test]
    fn test_select_wall() {
        let mut d = designer();
        let id = draw_wall(&mut d, (0.0, 0.0), (96.0, 0.0));
        assert!(!d.select_wall(Uuid::new_v4()));
        assert!(d.select_wall(id));
        assert_eq!(d.selected_wall().map(Wall::id), Some(id));
        d.clear_selection();
        assert!(d.selected_wall().is_none());
    }

    #[test]
    fn test_undo_drops_selection_of_missing_wall() {
        let mut d = designer();
        let id = draw_wall(&mut d, (0.0, 0.0), (96.0, 0.0));
        d.select_wall(id);
        d.undo();
        assert!(d.selected_wall().is_none());
    }

    #[test]
    fn test_load_room_resets_history() {
        let mut source = designer();
        source.create_preset_room(PresetKind::Closed);
        let room = source.room().clone();

        let mut d = designer();
        draw_wall(&mut d, (0.0, 0.0), (96.0, 0.0));
        d.load_room(room.clone()).unwrap();
        assert_eq!(d.room(), &room);
        assert_eq!(d.history_len(), 1);
        assert!(!d.undo());
    }

    #[test]
    fn test_load_room_rejects_broken_rooms() {
        let mut d = designer();
        let kept = draw_wall(&mut d, (0.0, 0.0), (96.0, 0.0));
        let before = d.room().clone();
        let history = d.history_len();

        let mut degenerate = Room::new();
        degenerate.walls.push(Wall {
            id: Uuid::new_v4(),
            start: Point::new(48.0, 48.0),
            end: Point::new(48.0, 48.0),
            thickness: 8.0,
        });
        let result = d.load_room(degenerate);
        assert!(matches!(result, Err(RoomError::ZeroLengthWall(_))));

        let mut orphaned = before.clone();
        orphaned.add_opening(Opening::new(Uuid::new_v4(), 0.5, 72.0, OpeningKind::Door));
        let result = d.load_room(orphaned);
        assert!(matches!(result, Err(RoomError::DanglingOpening { .. })));

        assert_eq!(d.room(), &before);
        assert_eq!(d.history_len(), history);
        assert!(d.room().wall(kept).is_some());
    }

    #[test]
    fn test_label_position_of_degenerate_wall_is_finite() {
        let wall = Wall {
            id: Uuid::new_v4(),
            start: Point::new(48.0, 48.0),
            end: Point::new(48.0, 48.0),
            thickness: 8.0,
        };
        assert_eq!(label_position(&wall, 16.0), Point::new(48.0, 48.0));

        let horizontal = Wall::new(Point::new(0.0, 0.0), Point::new(96.0, 0.0), 8.0).unwrap();
        assert_eq!(label_position(&horizontal, 16.0), Point::new(48.0, 16.0));
    }

    #[test]
    fn test_render_output() {
        let mut d = designer();
        d.create_preset_room(PresetKind::Straight);
        let wall = d.room().walls[0].id();
        d.add_opening(wall, 0.5, OpeningKind::Door);
        d.add_opening(wall, 0.1, OpeningKind::Window);

        let list = d.surface();
        assert!(matches!(list.commands()[0], DrawCommand::Clear { .. }));
        assert_eq!(list.lines().count(), 1);
        assert_eq!(list.texts(), vec!["12' 0\""]);

        let colors: Vec<_> = list
            .rects()
            .map(|c| match c {
                DrawCommand::Rect { color, .. } => *color,
                _ => unreachable!(),
            })
            .collect();
        let palette = d.config().palette;
        assert_eq!(colors, vec![palette.door, palette.window]);
    }

    #[test]
    fn test_opening_centered_on_wall() {
        let mut d = designer();
        let wall = draw_wall(&mut d, (0.0, 0.0), (0.0, 240.0));
        d.add_opening(wall, 0.25, OpeningKind::Window);
        let first = d.surface().rects().next().cloned();
        let Some(DrawCommand::Rect { rect, transform, .. }) = first else {
            panic!("expected opening rect");
        };
        let center = transform * rect.center();
        assert!((center.x - 0.0).abs() < 1e-9);
        assert!((center.y - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_grid_renders_when_enabled() {
        let d = RoomDesigner::with_surface(DisplayList::new(48.0, 24.0)).unwrap();
        // x = 0, 24, 48 and y = 0, 24
        assert_eq!(d.surface().lines().count(), 5);
    }
}
