//! Rooms kept in process memory.

use super::{BoxFuture, RoomSummary, Storage, StorageError, StorageResult, check_name, check_room};
use crate::room::Room;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

/// In-memory storage for tests and ephemeral sessions. Rooms are kept sorted by name.
#[derive(Default)]
pub struct MemoryStorage {
    rooms: RwLock<BTreeMap<String, Room>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn save(&self, name: &str, room: &Room) -> BoxFuture<'_, StorageResult<()>> {
        let name = name.to_string();
        let room = room.clone();
        Box::pin(async move {
            check_name(&name)?;
            check_room(&name, &room)?;
            let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);
            rooms.insert(name, room);
            Ok(())
        })
    }

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<Room>> {
        let name = name.to_string();
        Box::pin(async move {
            check_name(&name)?;
            let rooms = self.rooms.read().unwrap_or_else(PoisonError::into_inner);
            rooms.get(&name).cloned().ok_or(StorageError::NotFound(name))
        })
    }

    fn delete(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let name = name.to_string();
        Box::pin(async move {
            check_name(&name)?;
            let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);
            Ok(rooms.remove(&name).is_some())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<RoomSummary>>> {
        Box::pin(async move {
            let rooms = self.rooms.read().unwrap_or_else(PoisonError::into_inner);
            Ok(rooms
                .iter()
                .map(|(name, room)| RoomSummary::new(name.as_str(), room))
                .collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::PresetKind;
    use crate::room::{Opening, OpeningKind, RoomError};
    use crate::storage::block_on;
    use crate::{DisplayList, RoomDesigner};
    use uuid::Uuid;

    fn preset_room(kind: PresetKind) -> Room {
        let mut designer = RoomDesigner::with_surface(DisplayList::new(640.0, 480.0)).unwrap();
        designer.create_preset_room(kind);
        designer.room().clone()
    }

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let room = preset_room(PresetKind::Closed);

        block_on(storage.save("kitchen", &room)).unwrap();
        let loaded = block_on(storage.load("kitchen")).unwrap();

        assert_eq!(loaded, room);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nonexistent"));

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_save_rejects_dangling_opening() {
        let storage = MemoryStorage::new();
        let mut room = preset_room(PresetKind::Straight);
        room.add_opening(Opening::new(Uuid::new_v4(), 0.5, 48.0, OpeningKind::Window));

        let result = block_on(storage.save("hall", &room));
        assert!(matches!(
            result,
            Err(StorageError::InvalidRoom { source: RoomError::DanglingOpening { .. }, .. })
        ));
        assert!(block_on(storage.list()).unwrap().is_empty());
    }

    #[test]
    fn test_delete() {
        let storage = MemoryStorage::new();
        block_on(storage.save("bath", &Room::new())).unwrap();
        assert!(block_on(storage.delete("bath")).unwrap());
        assert!(!block_on(storage.delete("bath")).unwrap());
        assert!(block_on(storage.load("bath")).is_err());
    }

    #[test]
    fn test_list_sorted_with_counts() {
        let storage = MemoryStorage::new();
        block_on(storage.save("b", &preset_room(PresetKind::LShaped))).unwrap();
        block_on(storage.save("a", &Room::new())).unwrap();

        let list = block_on(storage.list()).unwrap();
        let names: Vec<_> = list.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(list[1].walls, 2);
    }
}
