//! CSV reading and writing.

mod reader;
mod writer;

pub use reader::{read_csv_file, read_csv_reader, read_csv_str};
pub use writer::{write_csv_file, write_csv_string};

/// Header row plus data records, in source order.
///
/// Records may be shorter than the header; missing trailing cells are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn new(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        Self { headers, records }
    }

    /// Number of data records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(header, value)` pairs of one record.
    pub fn fields(&self, index: usize) -> impl Iterator<Item = (&str, &str)> {
        self.records
            .get(index)
            .into_iter()
            .flat_map(|record| self.headers.iter().zip(record.iter()))
            .map(|(header, value)| (header.as_str(), value.as_str()))
    }
}
