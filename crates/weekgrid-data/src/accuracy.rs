//! Per-season, per-week accuracy aggregation.

use std::collections::BTreeMap;

use log::info;

use crate::{
    columns::ColumnMapping,
    error::DataError,
    reader::Table,
    record::{PredictionRecord, extract_records},
    season::Season,
};

/// Accuracy of the predictions made for one season and week.
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyCell {
    season: Season,
    week: u32,
    correct: usize,
    total: usize,
}

impl AccuracyCell {
    /// Creates a cell from its counts.
    pub fn new(season: Season, week: u32, correct: usize, total: usize) -> Self {
        Self {
            season,
            week,
            correct,
            total,
        }
    }

    pub fn season(&self) -> &Season {
        &self.season
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    /// Number of records whose prediction matched the outcome.
    pub fn correct(&self) -> usize {
        self.correct
    }

    /// Number of records in the group.
    pub fn total(&self) -> usize {
        self.total
    }

    /// `correct / total`, in `[0, 1]`.
    ///
    /// Cells are only built from non-empty groups; a zero total still
    /// yields `0.0` instead of dividing by zero.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }
}

/// Accuracy cells sorted by season, then week.
///
/// Each `(season, week)` pair appears at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccuracyTable {
    cells: Vec<AccuracyCell>,
}

impl AccuracyTable {
    /// Builds a table from cells, sorting them and merging duplicate pairs.
    pub fn from_cells(cells: impl IntoIterator<Item = AccuracyCell>) -> Self {
        let mut groups: BTreeMap<(Season, u32), (usize, usize)> = BTreeMap::new();
        for cell in cells {
            let counts = groups.entry((cell.season, cell.week)).or_default();
            counts.0 += cell.correct;
            counts.1 += cell.total;
        }
        Self::from_groups(groups)
    }

    fn from_groups(groups: BTreeMap<(Season, u32), (usize, usize)>) -> Self {
        let cells = groups
            .into_iter()
            .map(|((season, week), (correct, total))| AccuracyCell::new(season, week, correct, total))
            .collect();
        Self { cells }
    }

    pub fn cells(&self) -> &[AccuracyCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Looks up the cell for a season and week.
    pub fn get(&self, season: &Season, week: u32) -> Option<&AccuracyCell> {
        self.cells
            .binary_search_by(|cell| (&cell.season, cell.week).cmp(&(season, week)))
            .ok()
            .map(|index| &self.cells[index])
    }
}

/// Groups records by `(season, week)` and counts correct predictions.
pub fn aggregate<'a>(records: impl IntoIterator<Item = &'a PredictionRecord>) -> AccuracyTable {
    let mut groups: BTreeMap<(Season, u32), (usize, usize)> = BTreeMap::new();
    for record in records {
        let counts = groups
            .entry((record.season.clone(), record.week))
            .or_default();
        if record.is_correct() {
            counts.0 += 1;
        }
        counts.1 += 1;
    }
    AccuracyTable::from_groups(groups)
}

/// Computes the weekly accuracy table of a prediction table.
///
/// # Errors
///
/// - [`DataError::MissingColumns`] when a required field has no column.
/// - [`DataError::InvalidWeek`] when a week cell is not a non-negative integer.
pub fn build_weekly_accuracy(
    table: &Table,
    mapping: &ColumnMapping,
) -> Result<AccuracyTable, DataError> {
    let records = extract_records(table, mapping)?;
    let accuracy = aggregate(&records);
    info!(records = records.len(), groups = accuracy.len(); "Aggregated weekly accuracy");
    Ok(accuracy)
}
