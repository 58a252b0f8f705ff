//! Snapshot storage backends.

use std::cell::RefCell;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use dtm_model::TableState;

use crate::error::{PersistenceError, Result};
use crate::io::{load_snapshot, save_snapshot};

/// Key-value style backend for table snapshots.
///
/// `load` returns `Ok(None)` when nothing has been saved yet.
pub trait SnapshotStore {
    fn load(&self) -> Result<Option<TableState>>;
    fn save(&self, state: &TableState) -> Result<()>;
}

/// Stores the snapshot as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<TableState>> {
        match load_snapshot(&self.path) {
            Ok(state) => Ok(Some(state)),
            Err(PersistenceError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn save(&self, state: &TableState) -> Result<()> {
        save_snapshot(state, &self.path)
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    snapshot: Option<TableState>,
    saves: usize,
    fail_saves: bool,
}

/// In-memory backend. Clones share the same slot, so a caller can keep a
/// handle to inspect what the engine saved.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing snapshot.
    pub fn with_snapshot(state: TableState) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().snapshot = Some(state);
        store
    }

    /// The last saved snapshot.
    pub fn snapshot(&self) -> Option<TableState> {
        self.inner.borrow().snapshot.clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.inner.borrow().saves
    }

    /// Make subsequent saves fail with an I/O error.
    pub fn set_fail_saves(&self, fail: bool) {
        self.inner.borrow_mut().fail_saves = fail;
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<TableState>> {
        Ok(self.inner.borrow().snapshot.clone())
    }

    fn save(&self, state: &TableState) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_saves {
            return Err(PersistenceError::Io {
                operation: "write",
                path: PathBuf::from("<memory>"),
                source: std::io::Error::other("storage unavailable"),
            });
        }
        inner.snapshot = Some(state.clone());
        inner.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtm_model::seed_state;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_missing_is_none() {
        let dir = tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path().join("state.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path().join("state.json"));
        store.save(&seed_state()).unwrap();
        assert_eq!(store.load().unwrap(), Some(seed_state()));
    }

    #[test]
    fn test_memory_store_shares_slot() {
        let store = MemorySnapshotStore::new();
        let handle = store.clone();
        store.save(&seed_state()).unwrap();
        assert_eq!(handle.save_count(), 1);
        assert!(handle.snapshot().is_some());
    }

    #[test]
    fn test_memory_store_failure() {
        let store = MemorySnapshotStore::new();
        store.set_fail_saves(true);
        assert!(store.save(&seed_state()).is_err());
        assert_eq!(store.save_count(), 0);
    }
}
