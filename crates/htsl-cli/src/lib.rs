//! HTSL CLI library
//!
//! This module contains the core CLI logic for the HTSL tool: reading a
//! source file, parsing and validating it, and either reporting the
//! diagnostics (`--check`) or writing back a formatted rendition.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};

use htsl::{HtslError, Severity};
use htsl_parser::ParseError;

use crate::error_adapter::DiagnosticAdapter;

/// Run the HTSL CLI application.
///
/// Parses and validates the input file. With `--check` the run stops
/// there; otherwise the parsed tree is rendered back out with the
/// configured style and written to the output path (the input file by
/// default).
///
/// # Errors
///
/// Returns `HtslError` for file I/O errors, configuration errors, and
/// source files with error-severity diagnostics.
pub fn run(args: &Args) -> Result<(), HtslError> {
    info!(input_path = args.input; "Processing file");

    let style = config::load_style(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;

    let result = htsl::parse(&source);

    if result.has_errors() {
        return Err(HtslError::new_parse_error(
            ParseError::from(result.diagnostics),
            source,
        ));
    }

    // Warnings and notes leave the tree usable; report them without failing.
    let reporter = miette::GraphicalReportHandler::new();
    for diag in &result.diagnostics {
        if diag.severity == Severity::Info {
            continue;
        }
        let adapter = DiagnosticAdapter::new(diag, &source);
        let mut writer = String::new();
        if reporter.render_report(&mut writer, &adapter).is_ok() {
            warn!("{writer}");
        }
    }

    if args.check {
        info!(diagnostics = result.diagnostics.len(); "Check passed");
        return Ok(());
    }

    let holders = result.lower();
    let formatted = htsl::generate(&holders, &style);

    let target = args.output.as_deref().unwrap_or(args.input.as_str());
    fs::write(target, formatted)?;

    info!(output_file = target; "Formatted output written");

    Ok(())
}
