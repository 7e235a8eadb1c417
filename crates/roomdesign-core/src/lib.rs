//! Room Design Core Library
//!
//! Platform-agnostic room layout engine: walls and openings on a 1-foot
//! grid, snapshot undo/redo, preset rooms and immediate-mode rendering onto
//! any [`Surface`].

pub mod config;
pub mod designer;
pub mod geometry;
pub mod history;
pub mod presets;
pub mod room;
pub mod snap;
pub mod storage;
pub mod surface;
pub mod units;

pub use config::{DesignerConfig, Palette, SerializableColor};
pub use designer::{DesignerError, RoomDesigner, ToolState};
pub use geometry::distance_to_segment;
pub use history::{History, MAX_HISTORY};
pub use presets::{PresetKind, UnknownPreset};
pub use room::{Opening, OpeningId, OpeningKind, Room, RoomError, Wall, WallId};
pub use snap::{GRID_SIZE, SnapResult, snap_point, snap_to_grid};
pub use storage::{FileStorage, MemoryStorage, RoomSummary, Storage, StorageError};
pub use surface::{DisplayList, DrawCommand, StrokeSpec, Surface, TextSpec};
pub use units::{PIXELS_PER_INCH, format_feet_inches};
