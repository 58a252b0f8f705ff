//! Snapshot saving.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use dtm_model::TableState;

use crate::error::{PersistenceError, Result};
use crate::types::SnapshotFile;

use super::checksum::encode_payload;

/// Save a snapshot of `state` to `path`.
///
/// Uses atomic write (temp file + rename) so a crash never leaves a
/// half-written snapshot behind.
pub fn save_snapshot(state: &TableState, path: &Path) -> Result<()> {
    let (_, checksum) = encode_payload(state)?;
    let document = SnapshotFile::new(state.clone(), checksum);
    let bytes = serde_json::to_vec_pretty(&document)
        .map_err(|source| PersistenceError::Serialization { source })?;

    let temp_path = path.with_extension("json.tmp");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(&bytes).map_err(|e| PersistenceError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| PersistenceError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| PersistenceError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(
        path = %path.display(),
        rows = state.rows.len(),
        columns = state.columns.len(),
        "saved snapshot"
    );
    Ok(())
}
