//! Prediction records extracted from a table.

use log::debug;

use crate::{
    columns::{ColumnIndices, ColumnMapping},
    error::DataError,
    reader::Table,
    season::Season,
};

/// One predicted-versus-actual elimination for a season and week.
///
/// Empty name cells are kept as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRecord {
    pub season: Season,
    pub week: u32,
    pub predicted: Option<String>,
    pub actual: Option<String>,
}

impl PredictionRecord {
    /// Creates a record with both names present.
    pub fn new(season: &str, week: u32, predicted: &str, actual: &str) -> Self {
        Self {
            season: Season::new(season),
            week,
            predicted: Some(predicted.to_string()),
            actual: Some(actual.to_string()),
        }
    }

    /// Whether the prediction matched the outcome.
    ///
    /// Names compare by exact string equality. A missing name never matches,
    /// not even another missing name.
    pub fn is_correct(&self) -> bool {
        match (&self.predicted, &self.actual) {
            (Some(predicted), Some(actual)) => predicted == actual,
            _ => false,
        }
    }
}

/// Extracts prediction records from `table` using `mapping`.
///
/// Rows with an empty season or week are skipped.
///
/// # Errors
///
/// - [`DataError::MissingColumns`] when the headers do not cover every field.
/// - [`DataError::InvalidWeek`] when a week cell is not a non-negative integer.
pub fn extract_records(
    table: &Table,
    mapping: &ColumnMapping,
) -> Result<Vec<PredictionRecord>, DataError> {
    let indices = mapping.resolve(table.headers())?;

    let mut records = Vec::with_capacity(table.rows().len());
    let mut skipped = 0usize;

    for (position, row) in table.rows().iter().enumerate() {
        match record_from_row(row, indices, position + 1)? {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    debug!(records = records.len(), skipped; "Extracted prediction records");
    Ok(records)
}

fn record_from_row(
    row: &[String],
    indices: ColumnIndices,
    row_number: usize,
) -> Result<Option<PredictionRecord>, DataError> {
    let Some(season) = cell(row, indices.season) else {
        return Ok(None);
    };
    let Some(week) = cell(row, indices.week) else {
        return Ok(None);
    };

    let week = parse_week(week).ok_or_else(|| DataError::InvalidWeek {
        row: row_number,
        value: week.to_string(),
    })?;

    Ok(Some(PredictionRecord {
        season: Season::new(season),
        week,
        predicted: name(row, indices.predicted),
        actual: name(row, indices.actual),
    }))
}

/// Returns the trimmed cell, or `None` when absent or blank.
fn cell(row: &[String], index: usize) -> Option<&str> {
    row.get(index)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

/// Returns the cell verbatim, or `None` when absent or empty.
///
/// Names compare exactly, so surrounding whitespace is kept.
fn name(row: &[String], index: usize) -> Option<String> {
    row.get(index).filter(|value| !value.is_empty()).cloned()
}

/// Accepts `3` and the integral float `3.0`.
fn parse_week(value: &str) -> Option<u32> {
    if let Ok(week) = value.parse::<u32>() {
        return Some(week);
    }

    let float: f64 = value.parse().ok()?;
    let integral = float.is_finite()
        && float >= 0.0
        && float.fract() == 0.0
        && float <= f64::from(u32::MAX);
    integral.then_some(float as u32)
}
