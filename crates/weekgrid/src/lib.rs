//! Weekgrid - workflow flowcharts and season-week accuracy heatmaps.
//!
//! Builds the season simulation workflow flowchart, aggregates per-week
//! prediction accuracy from a CSV file and renders it as continuous and
//! binary heatmaps. Every chart is produced as SVG and exported either as SVG
//! text or as a high-resolution PNG.

pub mod config;
pub mod flowchart;
pub mod heatmap;

mod error;
mod export;

pub use weekgrid_core::{color, draw, geometry};
pub use weekgrid_data as data;

pub use error::WeekgridError;
pub use export::Format;

use std::path::Path;

use log::{debug, info};

use weekgrid_core::color::Color;
use weekgrid_data::AccuracyTable;

use config::AppConfig;
use export::svg::{Scene, SvgBuilder};
use flowchart::Flowchart;
use heatmap::HeatmapMode;

/// Builder for rendering and exporting weekgrid charts.
///
/// # Examples
///
/// ```rust,no_run
/// use weekgrid::{ChartBuilder, config::AppConfig, flowchart::simulation_workflow};
///
/// let builder = ChartBuilder::new(AppConfig::default());
///
/// let chart = simulation_workflow().expect("Failed to build workflow");
/// let svg = builder.render_flowchart(&chart).expect("Failed to render");
/// builder
///     .export(&svg, "q1_workflow_flowchart.png")
///     .expect("Failed to export");
///
/// let table = builder
///     .read_accuracy("全赛季每周估计详情.csv")
///     .expect("Failed to read accuracy");
/// let heatmap = builder
///     .render_heatmap(&table, builder.binary_mode())
///     .expect("Failed to render heatmap");
/// ```
#[derive(Debug, Default)]
pub struct ChartBuilder {
    config: AppConfig,
}

impl ChartBuilder {
    /// Create a new chart builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration the builder renders with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Render a flowchart to SVG markup.
    ///
    /// # Errors
    ///
    /// Returns [`WeekgridError::Layout`] when an edge references an unknown
    /// node, or [`WeekgridError::Export`] when the configured background color
    /// is invalid.
    pub fn render_flowchart(&self, chart: &Flowchart) -> Result<String, WeekgridError> {
        let scene = flowchart::render(chart)?;
        self.render_scene(scene)
    }

    /// Read a prediction CSV and aggregate it into weekly accuracy.
    ///
    /// Headers are mapped to fields through the configured column mapping.
    ///
    /// # Errors
    ///
    /// Returns [`WeekgridError::Data`] when the file cannot be read, a
    /// required column is missing or a week value is invalid.
    pub fn read_accuracy(&self, path: impl AsRef<Path>) -> Result<AccuracyTable, WeekgridError> {
        let table = weekgrid_data::read_table(path.as_ref())?;
        let accuracy = weekgrid_data::build_weekly_accuracy(&table, self.config.columns())?;
        Ok(accuracy)
    }

    /// Render an accuracy table as a heatmap in the given mode.
    ///
    /// An empty table renders as a blank image.
    ///
    /// # Errors
    ///
    /// Returns [`WeekgridError::Export`] when the configured background color
    /// is invalid.
    pub fn render_heatmap(
        &self,
        table: &AccuracyTable,
        mode: HeatmapMode,
    ) -> Result<String, WeekgridError> {
        let scene = heatmap::render(table, mode)?;
        self.render_scene(scene)
    }

    /// Binary mode at the configured threshold.
    pub fn binary_mode(&self) -> HeatmapMode {
        HeatmapMode::Binary {
            threshold: self.config.heatmap().threshold(),
        }
    }

    /// Write rendered SVG markup to `path`.
    ///
    /// `.svg` paths receive the markup unchanged; any other extension is
    /// rasterized to PNG at the configured scale.
    ///
    /// # Errors
    ///
    /// Returns [`WeekgridError::Export`] when rasterization or writing fails.
    pub fn export(&self, svg: &str, path: impl AsRef<Path>) -> Result<(), WeekgridError> {
        export::write(svg, path.as_ref(), self.config.export().scale())?;
        Ok(())
    }

    fn render_scene(&self, scene: Scene) -> Result<String, WeekgridError> {
        let document = SvgBuilder::new()
            .with_background(Some(self.background()?))
            .build(scene);
        let markup = document.to_string();
        debug!(bytes = markup.len(); "SVG rendered");
        info!("Chart rendered successfully");
        Ok(markup)
    }

    fn background(&self) -> Result<Color, WeekgridError> {
        let configured = self
            .config
            .style()
            .background_color()
            .map_err(|err| WeekgridError::Export(err.into()))?;
        match configured {
            Some(color) => Ok(color),
            None => Color::new("white").map_err(|err| WeekgridError::Export(err.into())),
        }
    }
}
