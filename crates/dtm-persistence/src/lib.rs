//! Persistent storage for the data table.
//!
//! Only canonical state (columns and rows) is ever written. Search, sort,
//! paging, and edit drafts are transient and stay out of snapshots.
//!
//! # File Format
//!
//! Snapshots are JSON documents:
//!
//! ```text
//! {
//!   "namespace": "persist:table",   fixed key identifying the snapshot
//!   "version": 1,                   schema version
//!   "saved_at": "<RFC 3339>",
//!   "checksum": "<sha256 hex>",     over the serialized payload
//!   "payload": { "columns": [...], "rows": [...] }
//! }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use dtm_persistence::{FileSnapshotStore, SnapshotStore};
//!
//! let store = FileSnapshotStore::new("datatable-state.json");
//! store.save(&state)?;
//! let restored = store.load()?;
//! ```

mod error;
mod io;
mod store;
mod types;

pub use error::{PersistenceError, Result};
pub use io::{load_snapshot, payload_checksum, save_snapshot};
pub use store::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
pub use types::{CURRENT_SCHEMA_VERSION, SNAPSHOT_NAMESPACE, SnapshotFile};
