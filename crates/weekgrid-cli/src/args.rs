//! Command-line argument definitions for the weekgrid CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. One subcommand per chart family selects what is rendered;
//! the global options choose the configuration file and logging verbosity.

use clap::{Parser, Subcommand};

/// Command-line arguments for the weekgrid chart tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

/// Charts the tool can render.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the season simulation workflow flowchart
    Flowchart {
        /// Output image; `.svg` writes SVG, anything else PNG
        #[arg(short, long, default_value = "q1_workflow_flowchart.png")]
        output: String,
    },

    /// Aggregate weekly accuracy and render the continuous and binary heatmaps
    Heatmap {
        /// Prediction CSV with season, week, predicted and actual columns
        #[arg(default_value = "全赛季每周估计详情.csv")]
        input: String,

        /// Output image for the continuous heatmap
        #[arg(short, long, default_value = "consistency_accuracy_heatmap.png")]
        output: String,

        /// Output image for the binary heatmap
        #[arg(long, default_value = "consistency_accuracy_heatmap_binary.png")]
        binary_output: String,

        /// Binary threshold, overriding the configured one
        #[arg(long)]
        threshold: Option<f64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heatmap_defaults() {
        let args = Args::try_parse_from(["weekgrid", "heatmap"]).unwrap();
        assert_eq!(args.log_level, "info");
        assert!(args.config.is_none());

        match args.command {
            Command::Heatmap {
                input,
                output,
                binary_output,
                threshold,
            } => {
                assert_eq!(input, "全赛季每周估计详情.csv");
                assert_eq!(output, "consistency_accuracy_heatmap.png");
                assert_eq!(binary_output, "consistency_accuracy_heatmap_binary.png");
                assert_eq!(threshold, None);
            }
            Command::Flowchart { .. } => panic!("Expected heatmap command"),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = Args::try_parse_from([
            "weekgrid",
            "flowchart",
            "-o",
            "chart.svg",
            "--config",
            "weekgrid.toml",
            "--log-level",
            "off",
        ])
        .unwrap();

        assert_eq!(args.config.as_deref(), Some("weekgrid.toml"));
        assert_eq!(args.log_level, "off");
        assert!(matches!(args.command, Command::Flowchart { output } if output == "chart.svg"));
    }

    #[test]
    fn test_threshold_override() {
        let args = Args::try_parse_from(["weekgrid", "heatmap", "data.csv", "--threshold", "0.6"])
            .unwrap();
        assert!(matches!(
            args.command,
            Command::Heatmap { threshold: Some(t), .. } if t == 0.6
        ));
    }
}
