//! Canonical table state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::column::{Column, DEFAULT_COLUMN_IDS};
use crate::error::{ModelError, Result};
use crate::row::Row;

/// Fixed number of rows per page in the projected view.
pub const PAGE_SIZE: usize = 10;

/// Rows and columns of the table. This is what gets persisted; view and edit
/// state never are.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableState {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl TableState {
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Check structural invariants: non-empty unique row ids, unique column
    /// ids, and all default columns present.
    pub fn validate(&self) -> Result<()> {
        let mut row_ids = BTreeSet::new();
        for row in &self.rows {
            let id = row.id().as_str();
            if id.trim().is_empty() {
                return Err(ModelError::EmptyRowId);
            }
            if !row_ids.insert(id) {
                return Err(ModelError::DuplicateRowId { id: id.to_string() });
            }
        }

        let mut column_ids = BTreeSet::new();
        for column in &self.columns {
            if !column_ids.insert(column.id.as_str()) {
                return Err(ModelError::DuplicateColumnId {
                    id: column.id.clone(),
                });
            }
        }
        for id in DEFAULT_COLUMN_IDS {
            if !column_ids.contains(id) {
                return Err(ModelError::MissingDefaultColumn { id: id.to_string() });
            }
        }
        Ok(())
    }

    pub fn visible_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| column.visible)
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == id)
    }

    pub fn row(&self, id: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.id().as_str() == id)
    }
}
