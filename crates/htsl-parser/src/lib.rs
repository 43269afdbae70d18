//! Parser for the HTSL housing scripting language.
//!
//! The pipeline is a hand-written lexer ([`lexer`]), a recursive-descent
//! parser with per-statement error recovery ([`parser`]), a spanned
//! intermediate representation ([`ir`]) and a set of semantic validation
//! passes ([`validate`]). The public entry point is [`parse`].
//!
//! Parsing never aborts: malformed statements are reported as diagnostics
//! and the rest of the input still produces a tree.

pub mod error;
pub mod ir;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod tokens;
pub mod validate;

pub use error::{Diagnostic, ErrorCode, Label, LabelStyle, ParseError, Severity};
pub use ir::{IrAction, IrActionHolder, IrActionKind, IrCondition, IrConditionKind, IrHolderKind};
pub use span::{Field, Span, Spanned};
pub use validate::validate;

use htsl_core::ActionHolder;

/// The outcome of a parse: the tree plus everything the parser and the
/// validation passes had to say about it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub holders: Vec<IrActionHolder>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    /// Whether any diagnostic is an error. Warnings alone leave the tree
    /// fully usable.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity.is_error())
    }

    /// Drops spans and error states, yielding the bare model.
    pub fn lower(&self) -> Vec<ActionHolder> {
        self.holders.iter().map(IrActionHolder::lower).collect()
    }

    /// The tree if it parsed cleanly, the diagnostics otherwise.
    pub fn into_result(self) -> Result<Vec<IrActionHolder>, ParseError> {
        if self.has_errors() {
            Err(ParseError::from(self.diagnostics))
        } else {
            Ok(self.holders)
        }
    }
}

/// Parses HTSL source and runs the validation passes over the result.
pub fn parse(src: &str) -> ParseResult {
    log::debug!(len = src.len(); "parsing source");
    let (holders, parse_diagnostics) = parser::Parser::new(src).parse();
    let mut collector = error::DiagnosticCollector::new();
    collector.extend(parse_diagnostics);
    collector.extend(validate(&holders));
    let diagnostics = collector.into_sorted();
    log::debug!(
        holders = holders.len(),
        diagnostics = diagnostics.len();
        "parse finished"
    );
    ParseResult {
        holders,
        diagnostics,
    }
}
