//! Error adapter for converting WeekgridError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Each error is
//! reported with a stable code, and data errors the user can fix through the
//! configuration file carry a help line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use weekgrid::{WeekgridError, data::DataError};

/// Adapter rendering a [`WeekgridError`] through miette.
pub struct ErrorAdapter(pub WeekgridError);

impl fmt::Debug for ErrorAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            WeekgridError::Io(_) | WeekgridError::Data(DataError::Io(_)) => "weekgrid::io",
            WeekgridError::Data(DataError::MissingColumns { .. }) => {
                "weekgrid::data::missing_columns"
            }
            WeekgridError::Data(DataError::InvalidWeek { .. }) => "weekgrid::data::invalid_week",
            WeekgridError::Data(DataError::Csv(_)) => "weekgrid::data::csv",
            WeekgridError::Layout(_) => "weekgrid::layout",
            WeekgridError::Export(_) => "weekgrid::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            WeekgridError::Data(DataError::MissingColumns { .. }) => {
                "map the source headers to Season, Week, PredictedElim and ActualElim \
                 in the [columns] table of the configuration file"
            }
            WeekgridError::Data(DataError::InvalidWeek { .. }) => {
                "week values must be whole numbers such as `3` or `3.0`"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
