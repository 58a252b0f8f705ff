use thiserror::Error;

/// Errors raised when a model invariant would be broken.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("row id must not be empty")]
    EmptyRowId,
    #[error("row id is immutable")]
    ImmutableId,
    #[error("duplicate row id: {id}")]
    DuplicateRowId { id: String },
    #[error("field '{field}' cannot be removed")]
    ProtectedField { field: String },
    #[error("column label must not be empty")]
    EmptyColumnLabel,
    #[error("column id '{id}' is reserved")]
    ReservedColumnId { id: String },
    #[error("duplicate column id: {id}")]
    DuplicateColumnId { id: String },
    #[error("default column '{id}' is missing")]
    MissingDefaultColumn { id: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
