//! CSV serialization.

use std::fs;
use std::path::Path;

use csv::{Terminator, WriterBuilder};

use crate::error::{IngestError, Result};

use super::CsvTable;

/// Serialize a table to CSV text: header line, then one line per record.
///
/// Fields are quoted only when they contain a delimiter, quote, or newline.
/// A table without headers serializes to an empty string.
pub fn write_csv_string(table: &CsvTable) -> Result<String> {
    if table.headers.is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(&table.headers).map_err(csv_write_error)?;
    for record in &table.records {
        writer.write_record(record).map_err(csv_write_error)?;
    }

    let bytes = writer.into_inner().map_err(|e| IngestError::CsvWrite {
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| IngestError::CsvWrite {
        message: e.to_string(),
    })
}

/// Serialize a table and write it to `path`.
pub fn write_csv_file(path: &Path, table: &CsvTable) -> Result<()> {
    let text = write_csv_string(table)?;
    fs::write(path, text).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), records = table.len(), "wrote csv file");
    Ok(())
}

fn csv_write_error(err: csv::Error) -> IngestError {
    IngestError::CsvWrite {
        message: err.to_string(),
    }
}
