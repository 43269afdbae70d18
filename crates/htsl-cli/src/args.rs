//! Command-line argument definitions for the HTSL CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input path, check-only mode,
//! output selection, style configuration, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the HTSL tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input HTSL file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Only parse and validate, without rewriting anything
    #[arg(long)]
    pub check: bool,

    /// Path to write the formatted output to (defaults to the input file)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to a style configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
