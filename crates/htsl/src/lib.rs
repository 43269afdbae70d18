//! HTSL - a compiler front-end for the Housing scripting language.
//!
//! Parsing, validation, code generation and source-preserving rewriting
//! for HTSL scripts, plus the analysis helpers an editor integration
//! needs (inlay hints, signature help, completion and rename).
//!
//! # Examples
//!
//! ```
//! let source = "stat kills += 1\nchat \"nice one\"";
//!
//! // Parse to the bare model.
//! let holders = htsl::actions(source).expect("failed to parse");
//!
//! // Regenerate canonical text from the model.
//! let style = htsl::CodeStyle::default();
//! let regenerated = htsl::generate(&holders, &style);
//!
//! // Or rewrite the original source in place, preserving formatting.
//! let rewritten = htsl::transform(source, &holders, &style).expect("transform");
//! assert_eq!(rewritten, source);
//! # let _ = regenerated;
//! ```

pub mod analysis;

mod error;
mod generate;
mod style;
mod transform;

pub use htsl_core::{
    Action, ActionHolder, ActionHolderKind, ActionKind, Amount, Comparison, Condition,
    ConditionKind, FieldDesc, Operation, SemanticKind, ValueRef,
};
pub use htsl_parser::{parse, Diagnostic, ParseResult, Severity, Span};

pub use error::HtslError;
pub use generate::{generate, generate_action, generate_condition};
pub use style::{Capitalization, CodeStyle, OperatorStyle, PlaceholderStyle, WrittenStyle};
pub use transform::{transform, TextEdit};

/// Parses source into the bare model, failing on any error diagnostic.
///
/// Warnings are allowed through; use [`diagnostics`] to see them.
pub fn actions(src: &str) -> Result<Vec<ActionHolder>, HtslError> {
    let result = parse(src);
    if result.has_errors() {
        let err = htsl_parser::ParseError::from(result.diagnostics);
        return Err(HtslError::new_parse_error(err, src));
    }
    Ok(result.lower())
}

/// Parses source and returns every diagnostic, sorted by position.
pub fn diagnostics(src: &str) -> Vec<Diagnostic> {
    parse(src).diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_lowers_clean_source() {
        let holders = actions("kill").unwrap();
        assert_eq!(holders.len(), 1);
        assert_eq!(holders[0].actions(), [Action::Kill].as_slice());
    }

    #[test]
    fn actions_rejects_broken_source() {
        assert!(matches!(
            actions("bogus"),
            Err(HtslError::Parse { .. })
        ));
    }

    #[test]
    fn warnings_do_not_fail_actions() {
        let src = "function \"tick\"\nfunction \"tick\"";
        assert!(actions(src).is_ok());
        assert_eq!(diagnostics(src).len(), 1);
    }

    #[test]
    fn generate_then_actions_round_trips() {
        let src = "goto function \"greet\"\nchat \"hi\"\nstat kills += 1";
        let holders = actions(src).unwrap();
        let text = generate(&holders, &CodeStyle::default());
        assert_eq!(actions(&text).unwrap(), holders);
    }
}
