//! Error types for engine operations.
//!
//! These cover operational rejections only. Field validation failures are
//! data ([`crate::ValidationErrors`]) and never surface as `Err`.

use thiserror::Error;

use dtm_model::{ModelError, RowId};

use crate::form::FormErrors;

/// Rejected record store mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("a row with id '{id}' already exists")]
    DuplicateId { id: String },
}

/// Rejected add-row submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddRowError {
    #[error("{} field(s) of the new row are invalid", .0.len())]
    Invalid(FormErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Rejected column mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColumnError {
    #[error("column '{id}' already exists")]
    AlreadyExists { id: String },

    #[error("column '{id}' cannot be deleted")]
    Protected { id: String },

    #[error("column '{id}' does not exist")]
    NotFound { id: String },

    #[error("invalid column order: {reason}")]
    InvalidOrder { reason: String },

    #[error(transparent)]
    Invalid(#[from] ModelError),
}

/// Rejected edit session operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("row '{id}' is not being edited")]
    NotEditing { id: RowId },

    #[error(transparent)]
    Model(#[from] ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ColumnError::AlreadyExists {
                id: "department".into()
            }
            .to_string(),
            "column 'department' already exists"
        );
        assert_eq!(
            ColumnError::from(ModelError::EmptyColumnLabel).to_string(),
            "column label must not be empty"
        );
    }
}
