//! Weekly elimination-prediction data for weekgrid.
//!
//! The pipeline is:
//!
//! 1. [`read_table`] / [`Table::from_reader`] load a comma-delimited file with a header row.
//! 2. [`ColumnMapping`] maps source headers onto the canonical [`Field`]s.
//! 3. [`build_weekly_accuracy`] groups records by season and week into an [`AccuracyTable`].
//! 4. [`AccuracyMatrix`] pivots the table into a season × week grid for rendering.
//!
//! ```
//! use weekgrid_data::{ColumnMapping, Table, build_weekly_accuracy};
//!
//! let csv = "Season,Week,PredictedElim,ActualElim\n1,1,A,A\n1,1,B,C\n1,2,A,A\n";
//! let table = Table::from_reader(csv.as_bytes()).unwrap();
//! let accuracy = build_weekly_accuracy(&table, &ColumnMapping::default()).unwrap();
//!
//! assert_eq!(accuracy.len(), 2);
//! assert_eq!(accuracy.cells()[0].accuracy(), 0.5);
//! ```

mod accuracy;
mod columns;
mod error;
mod matrix;
mod reader;
mod record;
mod season;

pub use accuracy::{AccuracyCell, AccuracyTable, aggregate, build_weekly_accuracy};
pub use columns::{ColumnIndices, ColumnMapping, Field};
pub use error::DataError;
pub use matrix::{AccuracyMatrix, Classification, classify};
pub use reader::{Table, read_table};
pub use record::{PredictionRecord, extract_records};
pub use season::Season;
