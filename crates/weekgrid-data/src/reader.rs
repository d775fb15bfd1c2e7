//! Reading comma-delimited tables.

use std::{fs::File, io::Read, path::Path};

use log::{debug, info};

use crate::error::DataError;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// An in-memory table of string cells with a header row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table from headers and data rows.
    ///
    /// A leading byte-order mark on the first header is removed.
    pub fn new(mut headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        if let Some(first) = headers.first_mut() {
            if let Some(stripped) = first.strip_prefix(BYTE_ORDER_MARK) {
                *first = stripped.to_string();
            }
        }
        Self { headers, rows }
    }

    /// Reads a table from comma-delimited text with a header row.
    ///
    /// Rows may have fewer or more cells than the header; absent cells read
    /// as empty.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Csv`] for malformed input, including invalid UTF-8.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        debug!(columns = headers.len(), rows = rows.len(); "Parsed table");
        Ok(Self::new(headers, rows))
    }

    /// The header row.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The data rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns `true` when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reads a comma-delimited file with a header row.
///
/// # Errors
///
/// Returns [`DataError::Io`] when the file cannot be opened and
/// [`DataError::Csv`] when it cannot be parsed.
pub fn read_table(path: impl AsRef<Path>) -> Result<Table, DataError> {
    let path = path.as_ref();
    info!(path = path.display().to_string(); "Reading table");
    let file = File::open(path)?;
    Table::from_reader(file)
}
