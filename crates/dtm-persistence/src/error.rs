//! Persistence error types.
//!
//! Errors carry a user-facing message so the engine can turn them into
//! notifications instead of propagating them.

use std::path::PathBuf;
use thiserror::Error;

use dtm_model::ModelError;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a table snapshot.
    #[error("Invalid snapshot format")]
    InvalidFormat { path: PathBuf, reason: String },

    /// Snapshot written by a newer schema.
    #[error("Snapshot version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion {
        found: u32,
        max_supported: u32,
        path: PathBuf,
    },

    /// Payload does not match its recorded checksum.
    #[error("Snapshot checksum mismatch: {path}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// Payload decoded but breaks a table invariant.
    #[error("Snapshot payload is inconsistent: {source}")]
    InvalidPayload {
        path: PathBuf,
        #[source]
        source: ModelError,
    },

    /// Serialization error.
    #[error("Failed to serialize snapshot")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization error.
    #[error("Failed to deserialize snapshot")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::InvalidFormat { path, reason } => {
                format!(
                    "The file at {} is not a table snapshot: {}",
                    path.display(),
                    reason
                )
            }
            Self::UnsupportedVersion {
                found,
                max_supported,
                ..
            } => {
                format!(
                    "This snapshot was written by a newer version \
                    (snapshot version {}, supported up to {}).",
                    found, max_supported
                )
            }
            Self::ChecksumMismatch { path, .. } => {
                format!(
                    "The snapshot at {} was modified outside the application.",
                    path.display()
                )
            }
            Self::InvalidPayload { source, .. } => {
                format!("The saved table is inconsistent: {source}.")
            }
            Self::Serialization { .. } => "An error occurred while saving the table.".to_string(),
            Self::Deserialization { .. } => {
                "An error occurred while reading the saved table. The file may be corrupted."
                    .to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the table to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
