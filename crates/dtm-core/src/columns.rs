//! Column manager: add, delete (with cascade), visibility, order, labels.

use std::collections::BTreeSet;

use dtm_model::{Column, ID, ModelError, is_default_column};

use crate::error::ColumnError;
use crate::store::RecordStore;

impl RecordStore {
    /// Append a column. It is always added visible.
    pub fn add_column(&mut self, mut column: Column) -> Result<(), ColumnError> {
        if column.id == ID {
            return Err(ModelError::ReservedColumnId { id: column.id }.into());
        }
        if self.state.column(&column.id).is_some() {
            tracing::warn!(column_id = %column.id, "rejected duplicate column");
            return Err(ColumnError::AlreadyExists { id: column.id });
        }
        column.visible = true;
        tracing::info!(column_id = %column.id, "added column");
        self.state.columns.push(column);
        Ok(())
    }

    /// Delete a custom column and strip its field from every row.
    ///
    /// Returns false when the column does not exist; the rows are left alone
    /// in that case, so deleting twice changes nothing the second time.
    pub fn delete_column(&mut self, id: &str) -> Result<bool, ColumnError> {
        if id == ID || is_default_column(id) {
            tracing::warn!(column_id = %id, "refused to delete default column");
            return Err(ColumnError::Protected { id: id.to_string() });
        }
        let Some(position) = self.position(id) else {
            return Ok(false);
        };
        self.state.columns.remove(position);
        let mut stripped = 0usize;
        for row in &mut self.state.rows {
            if matches!(row.remove(id), Ok(Some(_))) {
                stripped += 1;
            }
        }
        tracing::info!(column_id = %id, rows = stripped, "deleted column");
        Ok(true)
    }

    /// Flip a column's visibility. Returns the new flag, or `None` when the
    /// column does not exist.
    pub fn toggle_visibility(&mut self, id: &str) -> Option<bool> {
        let column = self.state.columns.iter_mut().find(|column| column.id == id)?;
        column.visible = !column.visible;
        tracing::info!(column_id = %id, visible = column.visible, "toggled column visibility");
        Some(column.visible)
    }

    /// Replace the column sequence with a reordering of itself.
    ///
    /// `order` must hold exactly the current columns, each once, unchanged
    /// apart from position. Anything else is rejected and the current order
    /// is kept.
    pub fn reorder(&mut self, order: Vec<Column>) -> Result<(), ColumnError> {
        if order.len() != self.state.columns.len() {
            return Err(ColumnError::InvalidOrder {
                reason: format!(
                    "expected {} columns, got {}",
                    self.state.columns.len(),
                    order.len()
                ),
            });
        }
        let mut seen = BTreeSet::new();
        for column in &order {
            if !seen.insert(column.id.as_str()) {
                return Err(ColumnError::InvalidOrder {
                    reason: format!("column '{}' appears more than once", column.id),
                });
            }
            if self.state.column(&column.id) != Some(column) {
                return Err(ColumnError::InvalidOrder {
                    reason: format!("column '{}' does not match the table", column.id),
                });
            }
        }
        tracing::info!(columns = order.len(), "reordered columns");
        self.state.columns = order;
        Ok(())
    }

    /// Move the column at `from` to index `to`, shifting the ones between.
    pub fn move_column(&mut self, from: usize, to: usize) -> Result<(), ColumnError> {
        let len = self.state.columns.len();
        if from >= len || to >= len {
            return Err(ColumnError::InvalidOrder {
                reason: format!("position out of range (table has {len} columns)"),
            });
        }
        let mut order = self.state.columns.clone();
        let column = order.remove(from);
        order.insert(to, column);
        self.reorder(order)
    }

    /// Change a column's display label. Its id stays the same.
    pub fn relabel_column(&mut self, id: &str, label: &str) -> Result<(), ColumnError> {
        if label.trim().is_empty() {
            return Err(ModelError::EmptyColumnLabel.into());
        }
        let column = self
            .state
            .columns
            .iter_mut()
            .find(|column| column.id == id)
            .ok_or_else(|| ColumnError::NotFound { id: id.to_string() })?;
        column.label = label.to_string();
        tracing::info!(column_id = %id, "relabeled column");
        Ok(())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.state.columns.iter().position(|column| column.id == id)
    }
}

#[cfg(test)]
mod tests {
    use dtm_model::{CellValue, Row, RowId, TableState, default_columns};

    use super::*;

    fn store() -> RecordStore {
        let rows = vec![
            Row::new(RowId::new("1").unwrap(), "A", "a@b.co", 30.0, "Developer")
                .with_field("department", "Ops"),
            Row::new(RowId::new("2").unwrap(), "B", "b@b.co", 40.0, "Manager"),
        ];
        RecordStore::new(TableState::new(default_columns(), rows))
    }

    fn ids(store: &RecordStore) -> Vec<&str> {
        store.columns().iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_add_column_appends_visible() {
        let mut store = store();
        let mut column = Column::custom("Department").unwrap();
        column.visible = false;
        store.add_column(column).unwrap();
        let added = store.columns().last().unwrap();
        assert_eq!(added.id, "department");
        assert!(added.visible);
    }

    #[test]
    fn test_add_column_duplicate_rejected() {
        let mut store = store();
        store.add_column(Column::custom("Department").unwrap()).unwrap();
        let before = store.clone();
        assert_eq!(
            store.add_column(Column::custom("department").unwrap()),
            Err(ColumnError::AlreadyExists {
                id: "department".into()
            })
        );
        assert_eq!(store, before);
        assert!(matches!(
            store.add_column(Column::custom("Name").unwrap()),
            Err(ColumnError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn test_delete_column_cascades_and_is_idempotent() {
        let mut store = store();
        store.add_column(Column::custom("Department").unwrap()).unwrap();
        assert_eq!(store.delete_column("department"), Ok(true));
        assert!(store.rows().iter().all(|row| !row.extra().contains_key("department")));
        assert!(!ids(&store).contains(&"department"));

        let after_first = store.clone();
        assert_eq!(store.delete_column("department"), Ok(false));
        assert_eq!(store, after_first);
    }

    #[test]
    fn test_delete_default_column_refused() {
        let mut store = store();
        for id in ["name", "email", "age", "role", "id"] {
            assert!(matches!(
                store.delete_column(id),
                Err(ColumnError::Protected { .. })
            ));
        }
        assert_eq!(store.columns().len(), 4);
    }

    #[test]
    fn test_toggle_visibility() {
        let mut store = store();
        assert_eq!(store.toggle_visibility("email"), Some(false));
        assert_eq!(store.toggle_visibility("email"), Some(true));
        assert_eq!(store.toggle_visibility("missing"), None);
    }

    #[test]
    fn test_reorder_accepts_permutation() {
        let mut store = store();
        let mut order = store.columns().to_vec();
        order.reverse();
        store.reorder(order).unwrap();
        assert_eq!(ids(&store), vec!["role", "age", "email", "name"]);
    }

    #[test]
    fn test_reorder_rejects_non_permutation() {
        let mut store = store();
        let before = store.clone();

        let mut short = store.columns().to_vec();
        short.pop();
        assert!(store.reorder(short).is_err());

        let mut duplicated = store.columns().to_vec();
        duplicated[3] = duplicated[0].clone();
        assert!(store.reorder(duplicated).is_err());

        let mut foreign = store.columns().to_vec();
        foreign[0] = Column::new("other", "Other");
        assert!(store.reorder(foreign).is_err());

        let mut relabeled = store.columns().to_vec();
        relabeled[0].label = "Full Name".into();
        assert!(store.reorder(relabeled).is_err());

        assert_eq!(store, before);
    }

    #[test]
    fn test_move_column() {
        let mut store = store();
        store.move_column(0, 2).unwrap();
        assert_eq!(ids(&store), vec!["email", "age", "name", "role"]);
        store.move_column(3, 0).unwrap();
        assert_eq!(ids(&store), vec!["role", "email", "age", "name"]);
        assert!(store.move_column(0, 4).is_err());
    }

    #[test]
    fn test_relabel_column() {
        let mut store = store();
        store.relabel_column("name", "Full Name").unwrap();
        assert_eq!(store.state().column("name").unwrap().label, "Full Name");
        assert!(matches!(
            store.relabel_column("name", " "),
            Err(ColumnError::Invalid(ModelError::EmptyColumnLabel))
        ));
        assert!(matches!(
            store.relabel_column("nope", "X"),
            Err(ColumnError::NotFound { .. })
        ));
        // Row data is keyed by id, so relabeling leaves it readable.
        assert_eq!(
            store.rows()[0].get("name").as_deref(),
            Some(&CellValue::from("A"))
        );
    }
}
