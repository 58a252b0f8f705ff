//! The table engine: one owned context for canonical state, view state, and
//! edit sessions.
//!
//! Every canonical mutation (rows or columns) is followed by a snapshot save.
//! Save failures never reach the caller as errors; they are logged and queued
//! as notifications, the same way import and export outcomes are.

use std::path::Path;

use dtm_ingest::{
    CsvTable, IngestError, export_table, read_csv_file, read_csv_str, rows_from_table,
    write_csv_file, write_csv_string,
};
use dtm_model::{Column, Row, RowId, TableState, seed_state};
use dtm_persistence::SnapshotStore;

use crate::edit::{CommitOutcome, EditSessions, ValidationErrors};
use crate::error::{AddRowError, ColumnError, EditError, StoreError};
use crate::form::NewRowForm;
use crate::notification::Notification;
use crate::store::RecordStore;
use crate::view::{Projection, SortSpec, ViewState};

/// Counts shown alongside the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSummary {
    pub total_rows: usize,
    pub total_columns: usize,
    pub visible_columns: usize,
    pub editing_rows: usize,
}

pub struct TableEngine {
    store: RecordStore,
    view: ViewState,
    edits: EditSessions,
    persistence: Box<dyn SnapshotStore>,
    notifications: Vec<Notification>,
}

impl TableEngine {
    /// Restore the last snapshot, or start from the seed dataset when there
    /// is none or it cannot be read.
    pub fn open(persistence: impl SnapshotStore + 'static) -> Self {
        let mut notifications = Vec::new();
        let state = match persistence.load() {
            Ok(Some(state)) => {
                tracing::info!(
                    rows = state.rows.len(),
                    columns = state.columns.len(),
                    "restored table snapshot"
                );
                state
            }
            Ok(None) => {
                tracing::info!("no table snapshot, starting from seed data");
                seed_state()
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not restore table snapshot, starting from seed data");
                notifications.push(Notification::warning(err.user_message()));
                seed_state()
            }
        };
        Self {
            store: RecordStore::new(state),
            view: ViewState::new(),
            edits: EditSessions::new(),
            persistence: Box::new(persistence),
            notifications,
        }
    }

    // === Reads ===

    pub fn state(&self) -> &TableState {
        self.store.state()
    }

    pub fn rows(&self) -> &[Row] {
        self.store.rows()
    }

    pub fn columns(&self) -> &[Column] {
        self.store.columns()
    }

    pub fn row(&self, id: &RowId) -> Option<&Row> {
        self.store.row(id)
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary {
            total_rows: self.store.len(),
            total_columns: self.store.columns().len(),
            visible_columns: self.store.state().visible_columns().count(),
            editing_rows: self.edits.editing_count(),
        }
    }

    /// Drain queued notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // === View ===

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.view.set_search(query);
    }

    pub fn toggle_sort(&mut self, column_id: &str) {
        self.view.toggle_sort(column_id);
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.view.set_sort(sort);
    }

    pub fn set_page(&mut self, page: usize) {
        self.view.set_page(page);
    }

    /// Current page of the filtered, sorted rows.
    pub fn projection(&self) -> Projection<'_> {
        self.view.project(self.store.rows())
    }

    // === Rows ===

    /// Validate the add-row form and append the row it describes.
    pub fn add_row(&mut self, form: &NewRowForm) -> Result<RowId, AddRowError> {
        let id = self.store.next_row_id();
        let row = form
            .build_row(id.clone(), self.store.columns())
            .map_err(AddRowError::Invalid)?;
        self.store.insert(row)?;
        self.persist();
        Ok(id)
    }

    pub fn insert_row(&mut self, row: Row) -> Result<(), StoreError> {
        self.store.insert(row)?;
        self.persist();
        Ok(())
    }

    /// Replace a row directly, bypassing edit sessions.
    pub fn update_row(&mut self, row: Row) -> bool {
        let updated = self.store.update(row);
        if updated {
            self.persist();
        }
        updated
    }

    /// Delete a row. An open edit session on it is dropped.
    pub fn delete_row(&mut self, id: &RowId) -> bool {
        let deleted = self.store.delete(id);
        if deleted {
            self.edits.forget_row(id);
            self.persist();
        }
        deleted
    }

    // === Columns ===

    /// Add a custom column derived from `label`. Returns its id.
    pub fn add_column(&mut self, label: &str) -> Result<String, ColumnError> {
        let column = Column::custom(label)?;
        let id = column.id.clone();
        self.store.add_column(column)?;
        self.persist();
        Ok(id)
    }

    /// Delete a custom column, stripping it from every row and draft.
    pub fn delete_column(&mut self, id: &str) -> Result<bool, ColumnError> {
        let deleted = self.store.delete_column(id)?;
        if deleted {
            self.edits.forget_column(id);
            self.persist();
        }
        Ok(deleted)
    }

    pub fn toggle_column(&mut self, id: &str) -> Option<bool> {
        let visible = self.store.toggle_visibility(id);
        if visible.is_some() {
            self.persist();
        }
        visible
    }

    pub fn reorder_columns(&mut self, order: Vec<Column>) -> Result<(), ColumnError> {
        self.store.reorder(order)?;
        self.persist();
        Ok(())
    }

    pub fn move_column(&mut self, from: usize, to: usize) -> Result<(), ColumnError> {
        self.store.move_column(from, to)?;
        self.persist();
        Ok(())
    }

    pub fn relabel_column(&mut self, id: &str, label: &str) -> Result<(), ColumnError> {
        self.store.relabel_column(id, label)?;
        self.persist();
        Ok(())
    }

    // === Edit sessions ===

    /// Open an edit session on a row. Returns false for an unknown row or a
    /// row already being edited.
    pub fn begin_edit(&mut self, id: &RowId) -> bool {
        match self.store.row(id) {
            Some(row) => self.edits.begin_edit(row),
            None => {
                tracing::debug!(row_id = %id, "begin edit ignored, unknown row");
                false
            }
        }
    }

    pub fn edit_field(&mut self, id: &RowId, column_id: &str, raw: &str) -> Result<(), EditError> {
        self.edits.edit_field(id, column_id, raw)
    }

    pub fn commit(&mut self, id: &RowId) -> CommitOutcome {
        let outcome = self.edits.commit(id, self.store.columns());
        self.apply_commit(&outcome);
        outcome
    }

    pub fn commit_all(&mut self) -> CommitOutcome {
        let outcome = self.edits.commit_all(self.store.columns());
        self.apply_commit(&outcome);
        outcome
    }

    pub fn cancel(&mut self, id: &RowId) -> bool {
        self.edits.cancel(id)
    }

    pub fn cancel_all(&mut self) -> usize {
        self.edits.cancel_all()
    }

    pub fn is_editing(&self, id: &RowId) -> bool {
        self.edits.is_editing(id)
    }

    pub fn editing_count(&self) -> usize {
        self.edits.editing_count()
    }

    pub fn draft(&self, id: &RowId) -> Option<&Row> {
        self.edits.draft(id)
    }

    pub fn validation_errors(&self) -> &ValidationErrors {
        self.edits.errors()
    }

    fn apply_commit(&mut self, outcome: &CommitOutcome) {
        if let CommitOutcome::Committed(rows) = outcome {
            for row in rows {
                self.store.update(row.clone());
            }
            self.persist();
        }
    }

    // === Import / export ===

    /// Replace every row with the records of CSV `text`.
    ///
    /// On failure the table is untouched. Either way a notification is
    /// queued.
    pub fn import_csv(&mut self, text: &str) -> Result<usize, IngestError> {
        let parsed = read_csv_str(text);
        self.import_parsed(parsed)
    }

    pub fn import_file(&mut self, path: &Path) -> Result<usize, IngestError> {
        let parsed = read_csv_file(path);
        self.import_parsed(parsed)
    }

    fn import_parsed(&mut self, parsed: Result<CsvTable, IngestError>) -> Result<usize, IngestError> {
        let rows = match parsed.and_then(|table| rows_from_table(&table, self.store.columns())) {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(error = %err, "import failed");
                self.notifications
                    .push(Notification::error(err.user_message()));
                return Err(err);
            }
        };
        let count = rows.len();
        self.edits.cancel_all();
        self.store.replace_all(rows);
        self.persist();
        self.notifications.push(Notification::success(format!(
            "Successfully imported {count} rows!"
        )));
        Ok(count)
    }

    /// Every row projected onto the visible columns, headed by label.
    pub fn export_table(&self) -> CsvTable {
        export_table(self.store.rows(), self.store.columns())
    }

    pub fn export_csv(&mut self) -> Result<String, IngestError> {
        let table = self.export_table();
        let result = write_csv_string(&table);
        self.report_export(table.len(), result)
    }

    pub fn export_file(&mut self, path: &Path) -> Result<usize, IngestError> {
        let table = self.export_table();
        let result = write_csv_file(path, &table).map(|()| table.len());
        self.report_export(table.len(), result)
    }

    fn report_export<T>(
        &mut self,
        count: usize,
        result: Result<T, IngestError>,
    ) -> Result<T, IngestError> {
        match &result {
            Ok(_) => {
                tracing::info!(rows = count, "exported table");
                self.notifications.push(Notification::success(format!(
                    "Successfully exported {count} rows!"
                )));
            }
            Err(err) => {
                tracing::warn!(error = %err, "export failed");
                self.notifications
                    .push(Notification::error(err.user_message()));
            }
        }
        result
    }

    // === Persistence ===

    fn persist(&mut self) {
        match self.persistence.save(self.store.state()) {
            Ok(()) => tracing::debug!(rows = self.store.len(), "saved table snapshot"),
            Err(err) => {
                tracing::error!(error = %err, "failed to save table snapshot");
                self.notifications
                    .push(Notification::error(err.user_message()));
            }
        }
    }
}
