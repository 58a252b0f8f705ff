//! Snapshot envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dtm_model::TableState;

/// Current schema version.
///
/// The loader rejects snapshots with a newer version.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Fixed key under which table snapshots are stored.
pub const SNAPSHOT_NAMESPACE: &str = "persist:table";

/// On-disk snapshot document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub namespace: String,
    pub version: u32,
    /// When the snapshot was written (RFC 3339).
    pub saved_at: String,
    /// SHA-256 of the serialized payload, hex encoded.
    pub checksum: String,
    pub payload: TableState,
}

impl SnapshotFile {
    pub fn new(payload: TableState, checksum: String) -> Self {
        Self {
            namespace: SNAPSHOT_NAMESPACE.to_string(),
            version: CURRENT_SCHEMA_VERSION,
            saved_at: Utc::now().to_rfc3339(),
            checksum,
            payload,
        }
    }

    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.saved_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Just enough of the envelope to decide whether the payload is readable.
#[derive(Debug, Deserialize)]
pub(crate) struct SnapshotHeader {
    pub namespace: String,
    pub version: u32,
}
