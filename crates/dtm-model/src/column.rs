//! Column definitions.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

pub const ID: &str = "id";
pub const NAME: &str = "name";
pub const EMAIL: &str = "email";
pub const AGE: &str = "age";
pub const ROLE: &str = "role";

/// Columns every table starts with. They may be hidden but never deleted.
pub const DEFAULT_COLUMN_IDS: [&str; 4] = [NAME, EMAIL, AGE, ROLE];

/// Returns true for the four reserved default columns.
pub fn is_default_column(column_id: &str) -> bool {
    DEFAULT_COLUMN_IDS.contains(&column_id)
}

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Derive a column identifier from its label: lower-cased, with every run of
/// whitespace replaced by a single underscore.
pub fn column_id_from_label(label: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&label.to_lowercase(), "_")
        .into_owned()
}

/// A column of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub label: String,
    pub visible: bool,
}

impl Column {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            visible: true,
        }
    }

    /// Build a user-defined column from a label.
    ///
    /// Rejects blank labels and labels that would take the row identifier.
    pub fn custom(label: &str) -> Result<Self> {
        if label.trim().is_empty() {
            return Err(ModelError::EmptyColumnLabel);
        }
        let id = column_id_from_label(label);
        if id == ID {
            return Err(ModelError::ReservedColumnId { id });
        }
        Ok(Self::new(id, label))
    }

    pub fn is_default(&self) -> bool {
        is_default_column(&self.id)
    }
}

/// The four default columns, all visible.
pub fn default_columns() -> Vec<Column> {
    vec![
        Column::new(NAME, "Name"),
        Column::new(EMAIL, "Email"),
        Column::new(AGE, "Age"),
        Column::new(ROLE, "Role"),
    ]
}
