use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use weekgrid::WeekgridError;
use weekgrid_cli::{Args, error_adapter::ErrorAdapter};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(&args.log_level);
    debug!(args:?; "Parsed arguments");

    match weekgrid_cli::run(&args) {
        Ok(()) => info!("Completed successfully"),
        Err(err) => {
            error!("Failed\n{}", report(err));
            process::exit(1);
        }
    }
}

fn init_logging(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .init();
    info!(log_level:? = filter; "Starting weekgrid");
}

/// Renders `err` as a miette diagnostic, or plain text if that fails.
fn report(err: WeekgridError) -> String {
    let diagnostic = ErrorAdapter(err);
    let mut rendered = String::new();
    match miette::GraphicalReportHandler::new().render_report(&mut rendered, &diagnostic) {
        Ok(()) => rendered,
        Err(_) => diagnostic.to_string(),
    }
}
