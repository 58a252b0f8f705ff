//! CSV parsing with a mandatory header row.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

use super::CsvTable;

/// Parse CSV text.
pub fn read_csv_str(text: &str) -> Result<CsvTable> {
    read_csv_reader(text.as_bytes())
}

/// Read a CSV file from disk.
pub fn read_csv_file(path: &Path) -> Result<CsvTable> {
    let file = File::open(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let table = read_csv_reader(file)?;
    tracing::debug!(
        path = %path.display(),
        records = table.len(),
        "read csv file"
    );
    Ok(table)
}

/// Parse CSV from any reader.
///
/// The first line is the header. Blank lines are skipped, records may have
/// fewer or more cells than the header, and a UTF-8 BOM is stripped.
pub fn read_csv_reader<R: Read>(reader: R) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            if idx == 0 {
                header.trim_start_matches('\u{feff}').to_string()
            } else {
                header.to_string()
            }
        })
        .collect();

    if headers.is_empty() {
        return Err(IngestError::EmptyCsv);
    }
    if headers.iter().all(|header| header.trim().is_empty()) {
        return Err(IngestError::NoHeaderDetected);
    }

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() == 1 && record.get(0).is_some_and(str::is_empty) {
            continue;
        }
        if record.len() > headers.len() {
            tracing::debug!(
                line = record.position().map_or(0, csv::Position::line),
                extra = record.len() - headers.len(),
                "ignoring cells beyond the header"
            );
        }
        records.push(record.iter().map(str::to_string).collect());
    }

    Ok(CsvTable::new(headers, records))
}
