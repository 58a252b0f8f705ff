//! Edit session manager.
//!
//! Each row under edit has a draft: a full copy of the canonical row that
//! changes independently until it is committed or discarded. Commits are
//! all-or-nothing. When any visible field of any target draft fails
//! validation, no draft is written, every draft stays open, and the failures
//! are recorded per field.

use std::collections::BTreeMap;

use dtm_model::{AGE, CellValue, Column, Row, RowId};

use crate::error::EditError;
use crate::validation::validate_row;

/// Identifies one field of one row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldKey {
    pub row_id: RowId,
    pub column_id: String,
}

impl FieldKey {
    pub fn new(row_id: RowId, column_id: impl Into<String>) -> Self {
        Self {
            row_id,
            column_id: column_id.into(),
        }
    }
}

/// Validation failures keyed by row and column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<FieldKey, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, row_id: &RowId, column_id: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(key, _)| &key.row_id == row_id && key.column_id == column_id)
            .map(|(_, message)| message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &str)> {
        self.errors.iter().map(|(key, message)| (key, message.as_str()))
    }

    /// Errors of one row as `(column id, message)`.
    pub fn for_row<'a>(&'a self, row_id: &'a RowId) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.errors
            .iter()
            .filter(move |(key, _)| &key.row_id == row_id)
            .map(|(key, message)| (key.column_id.as_str(), message.as_str()))
    }

    fn insert(&mut self, key: FieldKey, message: impl Into<String>) {
        self.errors.insert(key, message.into());
    }

    fn remove_field(&mut self, row_id: &RowId, column_id: &str) -> bool {
        let before = self.errors.len();
        self.errors
            .retain(|key, _| !(&key.row_id == row_id && key.column_id == column_id));
        self.errors.len() != before
    }

    fn clear_row(&mut self, row_id: &RowId) {
        self.errors.retain(|key, _| &key.row_id != row_id);
    }

    fn clear_column(&mut self, column_id: &str) {
        self.errors.retain(|key, _| key.column_id != column_id);
    }

    fn clear(&mut self) {
        self.errors.clear();
    }
}

/// Result of a commit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// Drafts passed validation. They are closed and must now be written to
    /// the record store.
    Committed(Vec<Row>),
    /// At least one field failed; nothing was written and every draft stays
    /// open. Carries the number of failing fields.
    Rejected { failures: usize },
    /// No targeted row was being edited.
    NothingToCommit,
}

impl CommitOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// Open drafts and their validation errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditSessions {
    drafts: BTreeMap<RowId, Row>,
    errors: ValidationErrors,
}

impl EditSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self, row_id: &RowId) -> bool {
        self.drafts.contains_key(row_id)
    }

    /// Number of rows currently being edited.
    pub fn editing_count(&self) -> usize {
        self.drafts.len()
    }

    pub fn editing_ids(&self) -> impl Iterator<Item = &RowId> {
        self.drafts.keys()
    }

    pub fn draft(&self, row_id: &RowId) -> Option<&Row> {
        self.drafts.get(row_id)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Open a draft copied from `row`. An existing draft is kept as is.
    ///
    /// Returns true when a new session was opened.
    pub fn begin_edit(&mut self, row: &Row) -> bool {
        if self.is_editing(row.id()) {
            return false;
        }
        tracing::debug!(row_id = %row.id(), "began edit");
        self.drafts.insert(row.id().clone(), row.clone());
        true
    }

    /// Change one field of a draft and clear that field's error.
    ///
    /// `age` is stored as a number; text that does not parse becomes NaN and
    /// is caught by validation on commit.
    pub fn edit_field(
        &mut self,
        row_id: &RowId,
        column_id: &str,
        raw: &str,
    ) -> Result<(), EditError> {
        let draft = self
            .drafts
            .get_mut(row_id)
            .ok_or_else(|| EditError::NotEditing { id: row_id.clone() })?;
        let value = if column_id == AGE {
            CellValue::Number(CellValue::coerce_number(raw))
        } else {
            CellValue::from(raw)
        };
        draft.set(column_id, value)?;
        if self.errors.remove_field(row_id, column_id) {
            tracing::debug!(row_id = %row_id, column_id, "cleared field error");
        }
        Ok(())
    }

    /// Commit one draft.
    pub fn commit(&mut self, row_id: &RowId, columns: &[Column]) -> CommitOutcome {
        if !self.is_editing(row_id) {
            return CommitOutcome::NothingToCommit;
        }
        self.commit_ids(&[row_id.clone()], columns)
    }

    /// Commit every open draft, or none of them.
    pub fn commit_all(&mut self, columns: &[Column]) -> CommitOutcome {
        if self.drafts.is_empty() {
            return CommitOutcome::NothingToCommit;
        }
        let ids: Vec<RowId> = self.drafts.keys().cloned().collect();
        self.commit_ids(&ids, columns)
    }

    fn commit_ids(&mut self, ids: &[RowId], columns: &[Column]) -> CommitOutcome {
        let mut failures = Vec::new();
        for id in ids {
            if let Some(draft) = self.drafts.get(id) {
                for (column_id, message) in validate_row(draft, columns) {
                    failures.push((FieldKey::new(id.clone(), column_id), message));
                }
            }
        }

        for id in ids {
            self.errors.clear_row(id);
        }
        if !failures.is_empty() {
            let count = failures.len();
            for (key, message) in failures {
                self.errors.insert(key, message);
            }
            tracing::warn!(rows = ids.len(), failures = count, "commit rejected");
            return CommitOutcome::Rejected { failures: count };
        }

        let rows: Vec<Row> = ids.iter().filter_map(|id| self.drafts.remove(id)).collect();
        tracing::debug!(rows = rows.len(), "committed drafts");
        CommitOutcome::Committed(rows)
    }

    /// Discard one draft and its errors. Returns false when the row was not
    /// being edited.
    pub fn cancel(&mut self, row_id: &RowId) -> bool {
        self.errors.clear_row(row_id);
        let cancelled = self.drafts.remove(row_id).is_some();
        if cancelled {
            tracing::debug!(row_id = %row_id, "cancelled edit");
        }
        cancelled
    }

    /// Discard every draft and every error. Returns the number of drafts.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.drafts.len();
        self.drafts.clear();
        self.errors.clear();
        if count > 0 {
            tracing::debug!(rows = count, "cancelled all edits");
        }
        count
    }

    /// Drop the session of a row that no longer exists.
    pub(crate) fn forget_row(&mut self, row_id: &RowId) {
        self.cancel(row_id);
    }

    /// Strip a deleted column from every draft and drop its errors.
    pub(crate) fn forget_column(&mut self, column_id: &str) {
        for draft in self.drafts.values_mut() {
            // Only custom columns are ever deleted, and `remove` refuses only
            // default fields.
            let _ = draft.remove(column_id);
        }
        self.errors.clear_column(column_id);
    }
}
