//! Error types for HTSL operations.
//!
//! This module provides the main error type [`HtslError`] which wraps the
//! error conditions that can occur while parsing, transforming or
//! generating HTSL source.

use std::io;

use thiserror::Error;

use htsl_parser::ParseError;

/// The main error type for HTSL operations.
///
/// The `Parse` variant carries the structured diagnostics together with the
/// source text they refer to, so callers can render rich reports.
#[derive(Debug, Error)]
pub enum HtslError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },
}

impl HtslError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
