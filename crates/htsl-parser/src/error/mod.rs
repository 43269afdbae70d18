//! Diagnostics and error types.
//!
//! All user-facing problems are reported as [`Diagnostic`] values collected
//! during lexing, parsing and validation. [`ParseError`] wraps a batch of
//! error-severity diagnostics for callers that want a `Result` interface.

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::{Label, LabelStyle};
pub use parse_error::ParseError;
pub use severity::Severity;
