//! Record store: the canonical rows and columns.
//!
//! Row mutations live here; column mutations are in [`crate::columns`]. The
//! store never persists by itself, callers snapshot [`RecordStore::state`]
//! after a mutation reports a change.

use dtm_model::{Column, Row, RowId, TableState};

use crate::error::StoreError;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordStore {
    pub(crate) state: TableState,
}

impl RecordStore {
    pub fn new(state: TableState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn into_state(self) -> TableState {
        self.state
    }

    pub fn rows(&self) -> &[Row] {
        &self.state.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.state.columns
    }

    pub fn len(&self) -> usize {
        self.state.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.rows.is_empty()
    }

    pub fn row(&self, id: &RowId) -> Option<&Row> {
        self.state.rows.iter().find(|row| row.id() == id)
    }

    pub fn contains(&self, id: &RowId) -> bool {
        self.row(id).is_some()
    }

    /// Replace every row. Columns are left alone.
    ///
    /// Id uniqueness is the caller's contract; import checks it before
    /// calling this.
    pub fn replace_all(&mut self, rows: Vec<Row>) {
        tracing::info!(
            previous = self.state.rows.len(),
            rows = rows.len(),
            "replaced all rows"
        );
        self.state.rows = rows;
    }

    /// Append a row.
    pub fn insert(&mut self, row: Row) -> Result<(), StoreError> {
        if self.contains(row.id()) {
            tracing::warn!(row_id = %row.id(), "rejected insert of duplicate row id");
            return Err(StoreError::DuplicateId {
                id: row.id().to_string(),
            });
        }
        tracing::info!(row_id = %row.id(), "inserted row");
        self.state.rows.push(row);
        Ok(())
    }

    /// Replace the row with the same id. Returns false when there is none.
    pub fn update(&mut self, row: Row) -> bool {
        match self.state.rows.iter_mut().find(|existing| existing.id() == row.id()) {
            Some(existing) => {
                tracing::info!(row_id = %row.id(), "updated row");
                *existing = row;
                true
            }
            None => {
                tracing::debug!(row_id = %row.id(), "update ignored, unknown row");
                false
            }
        }
    }

    /// Remove the row with `id`. Returns false when there is none.
    pub fn delete(&mut self, id: &RowId) -> bool {
        let before = self.state.rows.len();
        self.state.rows.retain(|row| row.id() != id);
        let removed = self.state.rows.len() != before;
        if removed {
            tracing::info!(row_id = %id, "deleted row");
        } else {
            tracing::debug!(row_id = %id, "delete ignored, unknown row");
        }
        removed
    }

    /// Id for a newly added row.
    ///
    /// Starts at the row count plus one and advances past ids already taken,
    /// so it matches the count-based scheme until rows get deleted and never
    /// collides afterwards.
    pub fn next_row_id(&self) -> RowId {
        let mut candidate = self.state.rows.len() + 1;
        loop {
            let id = candidate.to_string();
            if !self.state.rows.iter().any(|row| row.id().as_str() == id) {
                return RowId::from_counter(candidate);
            }
            candidate += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtm_model::{default_columns, seed_state};

    fn row(id: &str) -> Row {
        Row::new(RowId::new(id).unwrap(), "A", "a@b.co", 30.0, "Developer")
    }

    fn store(ids: &[&str]) -> RecordStore {
        RecordStore::new(TableState::new(
            default_columns(),
            ids.iter().map(|id| row(id)).collect(),
        ))
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut store = store(&["1"]);
        assert_eq!(
            store.insert(row("1")),
            Err(StoreError::DuplicateId { id: "1".into() })
        );
        assert_eq!(store.len(), 1);
        store.insert(row("2")).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_by_id() {
        let mut store = store(&["1", "2"]);
        let mut changed = row("2");
        changed.name = "Changed".into();
        assert!(store.update(changed));
        assert_eq!(store.rows()[1].name, "Changed");
        assert!(!store.update(row("9")));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_delete_is_noop_for_unknown() {
        let mut store = store(&["1", "2"]);
        assert!(store.delete(&RowId::new("1").unwrap()));
        assert!(!store.delete(&RowId::new("1").unwrap()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_next_row_id_skips_taken() {
        assert_eq!(store(&[]).next_row_id().as_str(), "1");
        assert_eq!(store(&["1", "2"]).next_row_id().as_str(), "3");
        // Row "2" deleted from 1..=3: count + 1 would collide with "3".
        assert_eq!(store(&["1", "3"]).next_row_id().as_str(), "4");
    }

    #[test]
    fn test_replace_all_keeps_columns() {
        let mut store = RecordStore::new(seed_state());
        store.replace_all(vec![row("x")]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.columns().len(), 4);
    }
}
