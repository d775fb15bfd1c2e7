//! Season × week pivot of an accuracy table.

use crate::{accuracy::AccuracyTable, season::Season};

/// Outcome of comparing an accuracy against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Classification {
    Below,
    AtOrAbove,
}

/// Classifies `accuracy` against `threshold`; equality counts as passing.
pub fn classify(accuracy: f64, threshold: f64) -> Classification {
    if accuracy >= threshold {
        Classification::AtOrAbove
    } else {
        Classification::Below
    }
}

/// Accuracy values laid out with one row per season and one column per week.
///
/// Rows are the distinct seasons in natural order. Columns are the contiguous
/// weeks `1..=max_week`, so weeks without any record still get a column.
/// Cells without records are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccuracyMatrix {
    seasons: Vec<Season>,
    weeks: Vec<u32>,
    values: Vec<Vec<Option<f64>>>,
}

impl AccuracyMatrix {
    /// Pivots `table` into a matrix.
    pub fn from_table(table: &AccuracyTable) -> Self {
        let mut seasons: Vec<Season> = table.cells().iter().map(|c| c.season().clone()).collect();
        seasons.dedup();

        let max_week = table.cells().iter().map(|c| c.week()).max().unwrap_or(0);
        let weeks: Vec<u32> = (1..=max_week).collect();

        let values = seasons
            .iter()
            .map(|season| {
                weeks
                    .iter()
                    .map(|&week| table.get(season, week).map(|cell| cell.accuracy()))
                    .collect()
            })
            .collect();

        Self {
            seasons,
            weeks,
            values,
        }
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    pub fn weeks(&self) -> &[u32] {
        &self.weeks
    }

    /// Returns `true` when the matrix has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty() || self.weeks.is_empty()
    }

    /// The accuracy at `(row, column)`, `None` when missing or out of range.
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.values.get(row)?.get(column).copied().flatten()
    }

    /// Iterates over every present cell as `(row, column, accuracy)`.
    pub fn present_cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.values.iter().enumerate().flat_map(|(row, columns)| {
            columns
                .iter()
                .enumerate()
                .filter_map(move |(column, value)| value.map(|v| (row, column, v)))
        })
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{accuracy::aggregate, record::PredictionRecord};

    #[test]
    fn test_worked_example_matrix() {
        let records = [
            PredictionRecord::new("S1", 1, "A", "A"),
            PredictionRecord::new("S1", 1, "B", "C"),
            PredictionRecord::new("S1", 2, "A", "A"),
        ];
        let matrix = AccuracyMatrix::from_table(&aggregate(&records));

        assert_eq!(matrix.seasons(), [Season::from("S1")]);
        assert_eq!(matrix.weeks(), [1, 2]);
        assert_approx_eq!(f64, matrix.get(0, 0).unwrap(), 0.5);
        assert_approx_eq!(f64, matrix.get(0, 1).unwrap(), 1.0);

        assert_eq!(classify(matrix.get(0, 0).unwrap(), 0.75), Classification::Below);
        assert_eq!(classify(matrix.get(0, 1).unwrap(), 0.75), Classification::AtOrAbove);
    }

    #[test]
    fn test_weeks_are_contiguous_and_gaps_missing() {
        let records = [
            PredictionRecord::new("1", 1, "A", "A"),
            PredictionRecord::new("2", 4, "A", "B"),
        ];
        let matrix = AccuracyMatrix::from_table(&aggregate(&records));

        assert_eq!(matrix.weeks(), [1, 2, 3, 4]);
        assert_eq!(matrix.get(0, 1), None);
        assert_eq!(matrix.get(0, 3), None);
        assert_eq!(matrix.get(1, 0), None);
        assert_eq!(matrix.get(1, 3), Some(0.0));
        assert_eq!(matrix.present_cells().count(), 2);
    }

    #[test]
    fn test_week_zero_has_no_column() {
        let records = [
            PredictionRecord::new("1", 0, "A", "A"),
            PredictionRecord::new("1", 2, "A", "A"),
        ];
        let matrix = AccuracyMatrix::from_table(&aggregate(&records));
        assert_eq!(matrix.weeks(), [1, 2]);
        assert_eq!(matrix.present_cells().count(), 1);
    }

    #[test]
    fn test_empty_table_gives_empty_matrix() {
        let matrix = AccuracyMatrix::from_table(&AccuracyTable::default());
        assert!(matrix.is_empty());
        assert!(matrix.seasons().is_empty());
        assert!(matrix.weeks().is_empty());
        assert_eq!(matrix.get(0, 0), None);
    }

    #[test]
    fn test_classify_boundary() {
        assert_eq!(classify(0.75, 0.75), Classification::AtOrAbove);
        assert_eq!(classify(0.7499, 0.75), Classification::Below);
    }
}
