//! Room persistence.
//!
//! The designer itself never touches storage; hosts save `RoomDesigner::room()`
//! and hand loaded rooms back through `RoomDesigner::load_room`. Backends only
//! accept rooms that pass [`Room::validate`], on the way in and on the way out.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::room::{Room, RoomError};
use crate::units::format_feet_inches;
use kurbo::Rect;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("No saved room named {0:?}")]
    NotFound(String),
    #[error("Invalid room name {0:?}: use letters, digits, '-' or '_'")]
    InvalidName(String),
    #[error("Room {name:?} is not usable: {source}")]
    InvalidRoom {
        name: String,
        #[source]
        source: RoomError,
    },
    #[error("Failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for storage operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Check a room name. Names double as file stems, so path separators,
/// dots and empty names are refused rather than rewritten.
pub fn check_name(name: &str) -> StorageResult<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidName(name.to_string()))
    }
}

/// Validate a room before it is written.
fn check_room(name: &str, room: &Room) -> StorageResult<()> {
    room.validate().map_err(|source| StorageError::InvalidRoom {
        name: name.to_string(),
        source,
    })
}

/// What `list` reports about each saved room.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSummary {
    pub name: String,
    pub walls: usize,
    pub openings: usize,
    /// Total wall length in pixels.
    pub wall_length: f64,
    /// Extent of the wall endpoints, `None` for an empty room.
    pub bounds: Option<Rect>,
}

impl RoomSummary {
    pub fn new(name: impl Into<String>, room: &Room) -> Self {
        Self {
            name: name.into(),
            walls: room.walls.len(),
            openings: room.openings.len(),
            wall_length: room.total_wall_length(),
            bounds: room.bounds(),
        }
    }
}

impl fmt::Display for RoomSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} walls, {} openings, {} of wall",
            self.name,
            self.walls,
            self.openings,
            format_feet_inches(self.wall_length)
        )?;
        if let Some(bounds) = self.bounds {
            write!(
                f,
                ", spans {} x {}",
                format_feet_inches(bounds.width()),
                format_feet_inches(bounds.height())
            )?;
        }
        Ok(())
    }
}

/// A place rooms are saved to by name.
pub trait Storage: Send + Sync {
    /// Save a valid room under `name`, replacing any previous one.
    fn save(&self, name: &str, room: &Room) -> BoxFuture<'_, StorageResult<()>>;

    /// Load and validate a room.
    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<Room>>;

    /// Delete a room. Returns whether anything was removed.
    fn delete(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>>;

    /// Summaries of every loadable room, sorted by name.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<RoomSummary>>>;
}

/// Simple blocking executor for storage tests.
#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}
