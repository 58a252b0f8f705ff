//! Export projection: every row, visible columns only, headed by label.

use chrono::Utc;

use dtm_model::{Column, Row};

use crate::codec::CsvTable;

/// Project `rows` onto the visible `columns`.
///
/// Rows are emitted in store order (never the filtered or sorted view). A
/// row without a value for a column exports an empty cell.
pub fn export_table(rows: &[Row], columns: &[Column]) -> CsvTable {
    let visible: Vec<&Column> = columns.iter().filter(|column| column.visible).collect();
    let headers = visible.iter().map(|column| column.label.clone()).collect();
    let records = rows
        .iter()
        .map(|row| {
            visible
                .iter()
                .map(|column| {
                    row.get(&column.id)
                        .map(|value| value.to_string())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();
    CsvTable::new(headers, records)
}

/// Default download name, e.g. `table-export-1700000000000.csv`.
pub fn export_file_name() -> String {
    format!("table-export-{}.csv", Utc::now().timestamp_millis())
}
