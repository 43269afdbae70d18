use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use htsl_cli::Args;
use htsl_cli::error_adapter::to_reportables;

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    // Initialize the logger with the specified log level
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting HTSL");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = htsl_cli::run(&args) {
        // Render each diagnostic as its own miette report
        let reporter = miette::GraphicalReportHandler::new();
        let mut writer = String::new();
        for reportable in to_reportables(&err) {
            reporter
                .render_report(&mut writer, &reportable)
                .expect("Writing to String buffer is infallible");
        }

        error!("Failed\n{writer}");
        process::exit(1);
    }

    info!("Completed successfully");
}
