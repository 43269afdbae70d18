//! Semantic checks that run over the parsed tree.
//!
//! Each pass walks the holders independently and reports diagnostics;
//! none of them mutate the tree or stop at the first finding.

mod context;
mod cooldowns;
mod limits;
mod nesting;

use crate::error::{Diagnostic, DiagnosticCollector};
use crate::ir::IrActionHolder;

/// Runs every validation pass and returns the combined diagnostics, sorted
/// by position.
pub fn validate(holders: &[IrActionHolder]) -> Vec<Diagnostic> {
    let mut collector = DiagnosticCollector::new();
    limits::check(holders, &mut collector);
    nesting::check(holders, &mut collector);
    context::check(holders, &mut collector);
    cooldowns::check(holders, &mut collector);
    collector.into_sorted()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn diagnostics_for(src: &str) -> Vec<Diagnostic> {
        let (holders, parse_diagnostics) = Parser::new(src).parse();
        assert!(
            parse_diagnostics.is_empty(),
            "test input failed to parse: {parse_diagnostics:?}"
        );
        validate(&holders)
    }

    #[test]
    fn clean_input_passes() {
        let diags = diagnostics_for("goto function \"greet\"\nchat \"hi\"\nkill");
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn nested_random_is_reported() {
        let diags = diagnostics_for("random {\nrandom {\nkill\n}\n}");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("random action"));
    }

    #[test]
    fn cancel_event_outside_event_is_reported() {
        let diags = diagnostics_for("goto function \"f\"\ncancelEvent");
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn kill_limit_is_enforced() {
        let diags = diagnostics_for("kill\nkill");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("kill"));
    }
}
