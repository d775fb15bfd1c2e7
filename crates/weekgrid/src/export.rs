//! Export functionality for weekgrid charts.
//!
//! Renderers place their drawables on a [`Scene`](svg::Scene); the
//! [`svg::SvgBuilder`] turns a scene into an SVG document cropped to its
//! content. [`write`] saves the document in the format implied by the output
//! path, rasterizing through [`png`] for anything other than `.svg`.
//!
//! # Pipeline Position
//!
//! ```text
//! Flowchart / AccuracyTable
//!     ↓ render
//! Scene (layered drawables + bounds)
//!     ↓ svg (this module)
//! SVG text
//!     ↓ write (this module)
//! Output File (.svg or .png)
//! ```
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rasterization failures and
//! I/O errors. [`Error`] converts into [`WeekgridError::Export`] at the crate
//! boundary.
//!
//! [`WeekgridError::Export`]: crate::WeekgridError::Export

pub mod png;
pub mod svg;

use std::{fs, path::Path};

use log::info;

/// Output formats, chosen from the output path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Svg,
    Png,
}

impl Format {
    /// `.svg` (any case) selects SVG; every other extension selects PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => Self::Svg,
            _ => Self::Png,
        }
    }
}

/// Writes `svg` to `path`, rasterizing at `scale` unless the path names an SVG file.
///
/// # Errors
///
/// Returns [`Error::Render`] when rasterization fails and [`Error::Io`] when
/// the file cannot be written.
pub fn write(svg: &str, path: &Path, scale: f32) -> Result<(), Error> {
    let format = Format::from_path(path);
    match format {
        Format::Svg => fs::write(path, svg).map_err(Error::Io)?,
        Format::Png => {
            let data = png::rasterize(svg, scale)?;
            fs::write(path, data).map_err(Error::Io)?;
        }
    }
    info!(path = path.display().to_string(), format:?; "Chart exported");
    Ok(())
}

/// Errors that can occur during chart export.
///
/// This type is converted into [`WeekgridError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`WeekgridError::Export`]: crate::WeekgridError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
