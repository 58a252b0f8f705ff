//! CSV import and export.
//!
//! This crate is the adapter between the table and delimited text:
//!
//! - **Reading**: parse CSV text with a header row into ordered records
//! - **Import**: synthesize table rows from records (ids, defaults, coercion)
//! - **Export**: project rows onto the visible columns, keyed by label
//! - **Writing**: serialize the projection back to CSV text
//!
//! # Example
//!
//! ```ignore
//! use dtm_ingest::{read_csv_str, rows_from_table, export_table, write_csv_string};
//!
//! let table = read_csv_str("name,email,age,role\nAda,ada@example.com,36,Developer\n")?;
//! let rows = rows_from_table(&table, &columns)?;
//! let text = write_csv_string(&export_table(&rows, &columns))?;
//! ```

mod codec;
mod error;
mod export;
mod import;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading / Writing ===
pub use codec::{
    CsvTable, read_csv_file, read_csv_reader, read_csv_str, write_csv_file, write_csv_string,
};

// === Row Synthesis ===
pub use export::{export_file_name, export_table};
pub use import::{generated_row_id, rows_from_table, rows_from_table_at};
