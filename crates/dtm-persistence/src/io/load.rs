//! Snapshot loading.

use std::fs;
use std::path::Path;

use dtm_model::TableState;

use crate::error::{PersistenceError, Result};
use crate::types::{CURRENT_SCHEMA_VERSION, SNAPSHOT_NAMESPACE, SnapshotFile, SnapshotHeader};

use super::checksum::payload_checksum;

/// Load a snapshot from `path`.
pub fn load_snapshot(path: &Path) -> Result<TableState> {
    let bytes = fs::read(path).map_err(|e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_snapshot_bytes(&bytes, path)
}

/// Parse snapshot bytes and validate the envelope and payload.
fn parse_snapshot_bytes(bytes: &[u8], path: &Path) -> Result<TableState> {
    let header: SnapshotHeader =
        serde_json::from_slice(bytes).map_err(|e| PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if header.namespace != SNAPSHOT_NAMESPACE {
        return Err(PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: format!("unexpected namespace '{}'", header.namespace),
        });
    }

    if header.version > CURRENT_SCHEMA_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: header.version,
            max_supported: CURRENT_SCHEMA_VERSION,
            path: path.to_path_buf(),
        });
    }

    let document: SnapshotFile =
        serde_json::from_slice(bytes).map_err(|source| PersistenceError::Deserialization {
            path: path.to_path_buf(),
            source,
        })?;

    let actual = payload_checksum(&document.payload)?;
    if actual != document.checksum {
        return Err(PersistenceError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: document.checksum,
            actual,
        });
    }

    document
        .payload
        .validate()
        .map_err(|source| PersistenceError::InvalidPayload {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(
        path = %path.display(),
        rows = document.payload.rows.len(),
        saved_at = %document.saved_at,
        "loaded snapshot"
    );
    Ok(document.payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::save::save_snapshot;
    use dtm_model::{Column, seed_state};
    use tempfile::tempdir;

    #[test]
    fn test_load_snapshot_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut state = seed_state();
        state.columns.push(Column::new("department", "Department"));
        state.columns[0].visible = false;
        save_snapshot(&state, &path).unwrap();

        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.json");
        fs::write(&path, b"NOT_A_SNAPSHOT").unwrap();

        let result = load_snapshot(&path);
        assert!(matches!(result, Err(PersistenceError::InvalidFormat { .. })));
    }

    #[test]
    fn test_load_wrong_namespace() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("other.json");
        fs::write(&path, br#"{"namespace":"persist:other","version":1}"#).unwrap();

        let result = load_snapshot(&path);
        assert!(matches!(result, Err(PersistenceError::InvalidFormat { .. })));
    }

    #[test]
    fn test_load_unsupported_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.json");
        fs::write(
            &path,
            br#"{"namespace":"persist:table","version":999,"payload":{"shape":"unknown"}}"#,
        )
        .unwrap();

        let result = load_snapshot(&path);
        assert!(matches!(
            result,
            Err(PersistenceError::UnsupportedVersion { found: 999, .. })
        ));
    }

    #[test]
    fn test_load_detects_tampering() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        save_snapshot(&seed_state(), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        fs::write(&path, text.replace("John Doe", "Jon Doe")).unwrap();

        let result = load_snapshot(&path);
        assert!(matches!(
            result,
            Err(PersistenceError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_snapshot(&dir.path().join("absent.json"));
        assert!(matches!(
            result,
            Err(PersistenceError::Io {
                operation: "read",
                ..
            })
        ));
    }
}
