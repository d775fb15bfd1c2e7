//! Error types for loading and aggregating prediction data.

use std::io;

use thiserror::Error;

use crate::columns::Field;

/// Errors raised while reading or aggregating prediction records.
#[derive(Debug, Error)]
pub enum DataError {
    /// Required fields are absent after applying the column mapping.
    ///
    /// `missing` lists the fields in canonical order.
    #[error("missing required columns: {}", join_fields(.missing))]
    MissingColumns { missing: Vec<Field> },

    /// A week cell is not a non-negative integer.
    ///
    /// `row` is the 1-based data row, not counting the header.
    #[error("invalid week `{value}` in data row {row}")]
    InvalidWeek { row: usize, value: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| field.name())
        .collect::<Vec<_>>()
        .join(", ")
}
