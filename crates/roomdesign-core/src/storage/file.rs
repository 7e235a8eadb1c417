//! Rooms saved as JSON files, one `<name>.json` per room.

use super::{BoxFuture, RoomSummary, Storage, StorageError, StorageResult, check_name, check_room};
use crate::room::Room;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// A directory of saved rooms.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open `dir` as a room store, creating it if needed.
    pub fn new(dir: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            action: "create room store",
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// The per-user store, `<data dir>/roomdesign/rooms`.
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("roomdesign").join("rooms"))
    }

    pub fn base_path(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> StorageResult<PathBuf> {
        check_name(name)?;
        Ok(self.dir.join(name).with_extension(EXTENSION))
    }
}

/// Read and validate one room file. A missing file is `NotFound`.
fn read_room(name: &str, path: &Path) -> StorageResult<Room> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(StorageError::NotFound(name.to_string()));
        }
        Err(source) => {
            return Err(StorageError::Io {
                action: "read",
                path: path.to_path_buf(),
                source,
            });
        }
    };
    Room::from_json(&json).map_err(|source| StorageError::InvalidRoom {
        name: name.to_string(),
        source,
    })
}

impl Storage for FileStorage {
    fn save(&self, name: &str, room: &Room) -> BoxFuture<'_, StorageResult<()>> {
        let name = name.to_string();
        let room = room.clone();

        Box::pin(async move {
            let path = self.path_for(&name)?;
            check_room(&name, &room)?;
            let json = room.to_json().map_err(|e| StorageError::InvalidRoom {
                name: name.clone(),
                source: e.into(),
            })?;

            // Write beside the target and rename so a crash never leaves half a room.
            let partial = path.with_extension("json.partial");
            fs::write(&partial, json).map_err(|source| StorageError::Io {
                action: "write",
                path: partial.clone(),
                source,
            })?;
            fs::rename(&partial, &path).map_err(|source| StorageError::Io {
                action: "replace",
                path: path.clone(),
                source,
            })?;
            log::debug!("Saved room {name} ({} walls) to {}", room.walls.len(), path.display());
            Ok(())
        })
    }

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<Room>> {
        let name = name.to_string();

        Box::pin(async move {
            let path = self.path_for(&name)?;
            read_room(&name, &path)
        })
    }

    fn delete(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let name = name.to_string();

        Box::pin(async move {
            let path = self.path_for(&name)?;
            match fs::remove_file(&path) {
                Ok(()) => Ok(true),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
                Err(source) => Err(StorageError::Io {
                    action: "delete",
                    path,
                    source,
                }),
            }
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<RoomSummary>>> {
        Box::pin(async move {
            let entries = fs::read_dir(&self.dir).map_err(|source| StorageError::Io {
                action: "list",
                path: self.dir.clone(),
                source,
            })?;

            let mut summaries = Vec::new();
            for path in entries.flatten().map(|entry| entry.path()) {
                if path.extension().is_none_or(|ext| ext != EXTENSION) {
                    continue;
                }
                let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                if check_name(name).is_err() {
                    continue;
                }
                match read_room(name, &path) {
                    Ok(room) => summaries.push(RoomSummary::new(name, &room)),
                    Err(e) => log::warn!("Skipping {}: {e}", path.display()),
                }
            }
            summaries.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(summaries)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::PresetKind;
    use crate::room::{OpeningKind, RoomError, Wall};
    use crate::storage::block_on;
    use crate::{DisplayList, RoomDesigner};
    use kurbo::Point;
    use tempfile::tempdir;

    fn furnished_room() -> Room {
        let mut designer = RoomDesigner::with_surface(DisplayList::new(640.0, 480.0)).unwrap();
        designer.create_preset_room(PresetKind::UShaped);
        let wall = designer.room().walls[1].id();
        designer.add_opening(wall, 0.5, OpeningKind::Window);
        designer.room().clone()
    }

    fn store() -> (tempfile::TempDir, FileStorage) {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        (dir, storage)
    }

    #[test]
    fn test_save_then_load() {
        let (dir, storage) = store();
        let room = furnished_room();

        block_on(storage.save("vanity-nook", &room)).unwrap();
        assert!(dir.path().join("vanity-nook.json").is_file());
        assert!(!dir.path().join("vanity-nook.json.partial").exists());

        let loaded = block_on(storage.load("vanity-nook")).unwrap();
        assert_eq!(loaded, room);
    }

    #[test]
    fn test_load_missing_room() {
        let (_dir, storage) = store();
        let result = block_on(storage.load("nonexistent"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_load_unparseable_file() {
        let (dir, storage) = store();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let result = block_on(storage.load("broken"));
        assert!(matches!(
            result,
            Err(StorageError::InvalidRoom { source: RoomError::Json(_), .. })
        ));
    }

    #[test]
    fn test_load_zero_length_wall() {
        let (dir, storage) = store();
        let mut room = furnished_room();
        room.walls[0].end = room.walls[0].start;
        fs::write(dir.path().join("collapsed.json"), room.to_json().unwrap()).unwrap();

        let result = block_on(storage.load("collapsed"));
        assert!(matches!(
            result,
            Err(StorageError::InvalidRoom { source: RoomError::ZeroLengthWall(_), .. })
        ));
    }

    #[test]
    fn test_load_dangling_opening() {
        let (dir, storage) = store();
        let mut room = furnished_room();
        let wall = room.openings[0].wall_id;
        room.walls.retain(|w| w.id() != wall);
        fs::write(dir.path().join("orphan.json"), room.to_json().unwrap()).unwrap();

        let result = block_on(storage.load("orphan"));
        assert!(matches!(
            result,
            Err(StorageError::InvalidRoom { source: RoomError::DanglingOpening { .. }, .. })
        ));
    }

    #[test]
    fn test_save_refuses_invalid_room() {
        let (dir, storage) = store();
        let mut room = Room::new();
        let mut wall = Wall::new(Point::new(0.0, 0.0), Point::new(24.0, 0.0), 8.0).unwrap();
        wall.end = wall.start;
        room.add_wall(wall);

        let result = block_on(storage.save("bad", &room));
        assert!(matches!(result, Err(StorageError::InvalidRoom { .. })));
        assert!(!dir.path().join("bad.json").exists());
    }

    #[test]
    fn test_names_are_checked() {
        let (dir, storage) = store();
        let result = block_on(storage.save("../escape", &Room::new()));
        assert!(matches!(result, Err(StorageError::InvalidName(_))));
        assert!(matches!(
            block_on(storage.load("a/b")),
            Err(StorageError::InvalidName(_))
        ));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_list_summarizes_valid_rooms() {
        let (dir, storage) = store();
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        block_on(storage.save("den", &furnished_room())).unwrap();
        block_on(storage.save("attic", &Room::new())).unwrap();

        let list = block_on(storage.list()).unwrap();
        let names: Vec<_> = list.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["attic", "den"]);
        assert_eq!(list[1].walls, 3);
        assert_eq!(list[1].openings, 1);
        assert!(list[0].bounds.is_none());
    }

    #[test]
    fn test_delete_reports_removal() {
        let (_dir, storage) = store();
        block_on(storage.save("test", &Room::new())).unwrap();

        assert!(block_on(storage.delete("test")).unwrap());
        assert!(!block_on(storage.delete("test")).unwrap());
        assert!(matches!(
            block_on(storage.load("test")),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(nested.clone()).unwrap();
        assert_eq!(storage.base_path(), nested.as_path());
        assert!(nested.is_dir());
    }
}
