//! CLI logic for the weekgrid chart tool.
//!
//! This module contains the core CLI logic: loading the configuration and
//! driving the [`ChartBuilder`] for the selected subcommand.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use log::info;

use weekgrid::{
    ChartBuilder, WeekgridError, flowchart::simulation_workflow, heatmap::HeatmapMode,
};

use config::ConfigError;

/// Run the weekgrid CLI application
///
/// # Errors
///
/// Returns `WeekgridError` for:
/// - Configuration loading errors
/// - File I/O errors
/// - Missing columns or invalid values in the input data
/// - Layout errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), WeekgridError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let builder = ChartBuilder::new(app_config);

    match &args.command {
        Command::Flowchart { output } => render_flowchart(&builder, output),
        Command::Heatmap {
            input,
            output,
            binary_output,
            threshold,
        } => render_heatmaps(&builder, input, output, binary_output, *threshold),
    }
}

fn render_flowchart(builder: &ChartBuilder, output: &str) -> Result<(), WeekgridError> {
    info!(output_path = output; "Rendering workflow flowchart");

    let chart = simulation_workflow()?;
    let svg = builder.render_flowchart(&chart)?;
    builder.export(&svg, output)?;

    info!(output_file = output; "Flowchart exported successfully");
    Ok(())
}

fn render_heatmaps(
    builder: &ChartBuilder,
    input: &str,
    output: &str,
    binary_output: &str,
    threshold: Option<f64>,
) -> Result<(), WeekgridError> {
    info!(
        input_path = input,
        output_path = output,
        binary_output_path = binary_output;
        "Processing accuracy data"
    );

    let binary_mode = match threshold {
        Some(threshold) if !threshold.is_finite() => {
            return Err(ConfigError::Validation(format!(
                "threshold must be finite, got {threshold}"
            ))
            .into());
        }
        Some(threshold) => HeatmapMode::Binary { threshold },
        None => builder.binary_mode(),
    };

    let table = builder.read_accuracy(input)?;
    info!(groups = table.len(); "Weekly accuracy aggregated");

    let continuous = builder.render_heatmap(&table, HeatmapMode::Continuous)?;
    builder.export(&continuous, output)?;
    info!(output_file = output; "Continuous heatmap exported successfully");

    let binary = builder.render_heatmap(&table, binary_mode)?;
    builder.export(&binary, binary_output)?;
    info!(output_file = binary_output; "Binary heatmap exported successfully");

    Ok(())
}
