//! Error types for CSV import and export.

use std::path::PathBuf;
use thiserror::Error;

use dtm_model::ModelError;

/// Errors that can occur while reading or writing CSV.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Malformed CSV.
    #[error("failed to parse CSV at line {line}: {message}")]
    CsvParse { line: u64, message: String },

    /// Input has no header row.
    #[error("CSV input is empty")]
    EmptyCsv,

    /// Header row is present but has no usable names.
    #[error("could not detect header row")]
    NoHeaderDetected,

    // === Import Errors ===
    /// Two imported records carry the same id.
    #[error("duplicate row id '{id}' in imported data")]
    DuplicateId { id: String },

    /// Record could not be turned into a row.
    #[error(transparent)]
    Model(#[from] ModelError),

    // === Serialization Errors ===
    #[error("failed to write CSV: {message}")]
    CsvWrite { message: String },
}

impl IngestError {
    /// Message suitable for a transient notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::FileRead { .. } => "Failed to read CSV file.".to_string(),
            Self::FileWrite { path, .. } => {
                format!("Failed to write export file {}.", path.display())
            }
            Self::CsvParse { .. } | Self::EmptyCsv | Self::NoHeaderDetected => {
                "Failed to parse CSV file. Please check the format.".to_string()
            }
            Self::DuplicateId { id } => {
                format!("Failed to import CSV file: row id '{id}' appears more than once.")
            }
            Self::Model(err) => format!("Failed to import CSV file: {err}."),
            Self::CsvWrite { .. } => "Failed to export CSV file.".to_string(),
        }
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(csv::Position::line).unwrap_or(0);
        Self::CsvParse {
            line,
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
