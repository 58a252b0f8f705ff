//! Row synthesis from imported records.
//!
//! Imports replace the whole table, so every record becomes a row:
//! - `id` is kept when present, otherwise generated
//! - `name`, `email`, `role` default to empty text, `age` to 0
//! - every other field is preserved under its column id when the header names
//!   an existing column (by id or label), or verbatim under the header text

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;

use dtm_model::{AGE, CellValue, Column, EMAIL, ID, NAME, ROLE, Row, RowId};

use crate::codec::CsvTable;
use crate::error::{IngestError, Result};

/// Id assigned to a record that has none.
pub fn generated_row_id(timestamp_ms: i64, index: usize) -> String {
    format!("imported-{timestamp_ms}-{index}")
}

/// Convert parsed CSV into rows, generating ids from the current time.
pub fn rows_from_table(table: &CsvTable, columns: &[Column]) -> Result<Vec<Row>> {
    rows_from_table_at(table, columns, Utc::now().timestamp_millis())
}

/// Convert parsed CSV into rows, generating ids from `timestamp_ms`.
///
/// Fails on duplicate ids; the caller's table is never touched.
pub fn rows_from_table_at(
    table: &CsvTable,
    columns: &[Column],
    timestamp_ms: i64,
) -> Result<Vec<Row>> {
    let keys = resolve_headers(&table.headers, columns);
    let mut seen = BTreeSet::new();
    let mut rows = Vec::with_capacity(table.len());

    for index in 0..table.len() {
        let mut fields: BTreeMap<&str, &str> = BTreeMap::new();
        for (position, (_, value)) in table.fields(index).enumerate() {
            fields.insert(keys[position].as_str(), value);
        }

        let row_id = match fields.get(ID).and_then(|id| RowId::new(*id).ok()) {
            Some(id) => id,
            None => RowId::new(generated_row_id(timestamp_ms, index))?,
        };
        if !seen.insert(row_id.clone()) {
            return Err(IngestError::DuplicateId {
                id: row_id.to_string(),
            });
        }

        let text = |key: &str| fields.get(key).copied().unwrap_or_default();
        let age = CellValue::coerce_number(text(AGE));
        let age = if age.is_finite() { age } else { 0.0 };

        let mut row = Row::new(row_id, text(NAME), text(EMAIL), age, text(ROLE));
        for (key, value) in &fields {
            if matches!(*key, ID | NAME | EMAIL | AGE | ROLE) {
                continue;
            }
            row.set(key, CellValue::from(*value))?;
        }
        rows.push(row);
    }

    tracing::debug!(rows = rows.len(), "synthesized rows from csv");
    Ok(rows)
}

/// Map each header to the field key it is stored under.
///
/// Exact column id wins, then exact column label; anything else is kept as is.
fn resolve_headers(headers: &[String], columns: &[Column]) -> Vec<String> {
    headers
        .iter()
        .map(|header| {
            if header == ID || columns.iter().any(|column| &column.id == header) {
                return header.clone();
            }
            columns
                .iter()
                .find(|column| &column.label == header)
                .map_or_else(|| header.clone(), |column| column.id.clone())
        })
        .collect()
}
