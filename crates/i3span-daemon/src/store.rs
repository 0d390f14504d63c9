//! Ordered in-memory workspace model
//!
//! The store mirrors i3's own workspace ordering, which is creation order,
//! not numeric order. It is backed by a `Vec` with shift-based insert and
//! remove, so forward and backward traversal can never disagree about the
//! ordering.

use thiserror::Error;

use crate::i3_ipc::WorkspaceReply;

/// One workspace tracked by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Externally assigned number; not necessarily contiguous and not what
    /// the store orders by
    pub num: i64,
    /// Display name
    pub name: String,
    /// Whether this workspace currently has focus. At most one entry has
    /// this set; the synchronizer maintains that invariant.
    pub focused: bool,
}

impl From<WorkspaceReply> for Workspace {
    fn from(reply: WorkspaceReply) -> Self {
        Self {
            num: reply.num,
            name: reply.name,
            focused: reply.focused,
        }
    }
}

/// Errors from positional store operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("position {position} out of range for store of length {len}")]
    OutOfRange { position: usize, len: usize },
}

/// Ordered collection of workspaces, keyed by position and looked up by num
#[derive(Debug, Default)]
pub struct WorkspaceStore {
    entries: Vec<Workspace>,
}

impl WorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Workspace> {
        self.entries.iter()
    }

    /// Look up a workspace by position
    pub fn get(&self, position: usize) -> Option<&Workspace> {
        self.entries.get(position)
    }

    /// Append a workspace at the end
    pub fn push(&mut self, workspace: Workspace) {
        self.entries.push(workspace);
    }

    /// Insert a workspace at the given position
    ///
    /// Position `len` appends, `0` prepends, anything in between splices
    /// and shifts the entries after it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::OutOfRange` if `position > len`.
    pub fn insert(&mut self, workspace: Workspace, position: usize) -> Result<(), StoreError> {
        if position > self.entries.len() {
            return Err(StoreError::OutOfRange {
                position,
                len: self.entries.len(),
            });
        }

        self.entries.insert(position, workspace);
        Ok(())
    }

    /// Remove and return the workspace at the given position
    ///
    /// # Errors
    ///
    /// Returns `StoreError::OutOfRange` if `position >= len`.
    pub fn remove(&mut self, position: usize) -> Result<Workspace, StoreError> {
        if position >= self.entries.len() {
            return Err(StoreError::OutOfRange {
                position,
                len: self.entries.len(),
            });
        }

        Ok(self.entries.remove(position))
    }

    /// Find the first workspace with the given number, in store order
    ///
    /// Not-found is a distinct outcome; exact lookups never get a clamped
    /// index back.
    pub fn find_by_num(&self, num: i64) -> Option<(usize, &Workspace)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, ws)| ws.num == num)
    }

    /// Mutable variant of `find_by_num`
    pub fn find_by_num_mut(&mut self, num: i64) -> Option<&mut Workspace> {
        self.entries.iter_mut().find(|ws| ws.num == num)
    }

    /// Resolve the insertion anchor for a workspace number
    ///
    /// Returns the workspace's current position when present, or `len` when
    /// absent. The protocol reports no explicit anchor for new workspaces,
    /// so an unknown number means append-at-end.
    pub fn anchor_index(&self, num: i64) -> usize {
        self.find_by_num(num)
            .map(|(position, _)| position)
            .unwrap_or(self.entries.len())
    }

    /// Release all records and reset to empty
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ws(num: i64, name: &str) -> Workspace {
        Workspace {
            num,
            name: name.to_string(),
            focused: false,
        }
    }

    fn nums(store: &WorkspaceStore) -> Vec<i64> {
        store.iter().map(|ws| ws.num).collect()
    }

    #[test]
    fn repeated_appends_preserve_insertion_order() {
        let mut store = WorkspaceStore::new();
        for num in [3, 1, 2, 10] {
            store.push(ws(num, &num.to_string()));
        }

        assert_eq!(nums(&store), vec![3, 1, 2, 10]);
    }

    #[test]
    fn insert_at_zero_prepends() {
        let mut store = WorkspaceStore::new();
        store.push(ws(1, "1"));
        store.insert(ws(2, "2"), 0).unwrap();

        assert_eq!(nums(&store), vec![2, 1]);
    }

    #[test]
    fn insert_at_len_appends() {
        let mut store = WorkspaceStore::new();
        store.push(ws(1, "1"));
        store.insert(ws(2, "2"), 1).unwrap();

        assert_eq!(nums(&store), vec![1, 2]);
    }

    #[test]
    fn insert_splices_between_neighbors() {
        let mut store = WorkspaceStore::new();
        store.push(ws(1, "1"));
        store.push(ws(3, "3"));
        store.insert(ws(2, "2"), 1).unwrap();

        assert_eq!(nums(&store), vec![1, 2, 3]);
    }

    #[test]
    fn insert_past_len_is_out_of_range() {
        let mut store = WorkspaceStore::new();
        store.push(ws(1, "1"));

        let err = store.insert(ws(2, "2"), 2).unwrap_err();
        assert_eq!(err, StoreError::OutOfRange { position: 2, len: 1 });
    }

    #[test]
    fn insert_then_remove_at_same_position_is_identity() {
        for position in 0..=3 {
            let mut store = WorkspaceStore::new();
            for num in 1..=3 {
                store.push(ws(num, &num.to_string()));
            }
            let before = nums(&store);

            store.insert(ws(99, "99"), position).unwrap();
            let removed = store.remove(position).unwrap();

            assert_eq!(removed.num, 99);
            assert_eq!(nums(&store), before, "position {}", position);
        }
    }

    #[test]
    fn remove_head_repoints_the_front() {
        let mut store = WorkspaceStore::new();
        store.push(ws(1, "1"));
        store.push(ws(2, "2"));

        let removed = store.remove(0).unwrap();
        assert_eq!(removed.num, 1);
        assert_eq!(nums(&store), vec![2]);
    }

    #[test]
    fn remove_tail_and_interior() {
        let mut store = WorkspaceStore::new();
        for num in 1..=4 {
            store.push(ws(num, &num.to_string()));
        }

        assert_eq!(store.remove(3).unwrap().num, 4);
        assert_eq!(store.remove(1).unwrap().num, 2);
        assert_eq!(nums(&store), vec![1, 3]);
    }

    #[test]
    fn remove_at_len_is_out_of_range() {
        let mut store = WorkspaceStore::new();
        store.push(ws(1, "1"));

        let err = store.remove(1).unwrap_err();
        assert_eq!(err, StoreError::OutOfRange { position: 1, len: 1 });
    }

    #[test]
    fn find_by_num_on_empty_store_finds_nothing() {
        let store = WorkspaceStore::new();
        for num in [-1, 0, 1, 42] {
            assert!(store.find_by_num(num).is_none());
        }
    }

    #[test]
    fn find_by_num_returns_first_match_and_position() {
        let mut store = WorkspaceStore::new();
        store.push(ws(5, "five"));
        store.push(ws(7, "seven"));

        let (position, workspace) = store.find_by_num(7).unwrap();
        assert_eq!(position, 1);
        assert_eq!(workspace.name, "seven");
    }

    #[test]
    fn anchor_index_is_len_for_unknown_num() {
        let mut store = WorkspaceStore::new();
        store.push(ws(1, "1"));
        store.push(ws(2, "2"));

        assert_eq!(store.anchor_index(99), 2);
        assert_eq!(store.anchor_index(1), 0);
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut store = WorkspaceStore::new();
        store.push(ws(1, "1"));
        store.clear();

        assert!(store.is_empty());
        assert!(store.find_by_num(1).is_none());
    }
}
