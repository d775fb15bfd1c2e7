//! Error types for weekgrid operations.
//!
//! This module provides the main error type [`WeekgridError`] which wraps
//! the error conditions of loading, laying out and exporting charts.

use std::io;

use thiserror::Error;

use weekgrid_data::DataError;

/// The main error type for weekgrid operations.
#[derive(Debug, Error)]
pub enum WeekgridError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for WeekgridError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
