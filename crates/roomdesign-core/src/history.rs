//! Linear undo/redo history over full state snapshots.

/// Maximum number of snapshots to keep.
pub const MAX_HISTORY: usize = 50;

/// A linear snapshot history with a cursor pointing at the current state.
///
/// Entry 0 is the oldest reachable state. Recording a new state discards
/// anything past the cursor, so redo is only possible right after undo.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    cursor: usize,
    limit: usize,
}

impl<T: Clone> History<T> {
    /// Create a history whose only entry is `initial`.
    pub fn new(initial: T, limit: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Record a new current state.
    pub fn record(&mut self, state: T) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(state);
        self.cursor = self.entries.len() - 1;

        // Evict oldest, keeping the cursor on the same entry
        if self.entries.len() > self.limit {
            self.entries.remove(0);
            self.cursor -= 1;
        }
    }

    /// Step back one entry. Returns `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&T> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward one entry. Returns `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&T> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Drop every entry and start over from `state`.
    pub fn reset(&mut self, state: T) {
        self.entries.clear();
        self.entries.push(state);
        self.cursor = 0;
    }

    /// Number of reachable snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }
}
