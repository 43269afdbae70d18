//! Conditionals and randoms cannot contain each other.

use htsl_core::ActionKind;

use crate::error::{Diagnostic, DiagnosticCollector, ErrorCode};
use crate::ir::{IrAction, IrActionHolder};
use crate::span::Span;

pub(super) fn check(holders: &[IrActionHolder], collector: &mut DiagnosticCollector) {
    for holder in holders {
        check_actions(&holder.actions, None, collector);
    }
}

fn check_actions(
    actions: &[IrAction],
    enclosing: Option<(ActionKind, Span)>,
    collector: &mut DiagnosticCollector,
) {
    for action in actions {
        let kind = action.action_kind();
        let nests = matches!(kind, ActionKind::Conditional | ActionKind::Random);
        if nests {
            if let Some((outer, outer_span)) = enclosing {
                collector.push(
                    Diagnostic::error(format!(
                        "cannot use a {} inside of a {}",
                        kind.name(),
                        outer.name()
                    ))
                    .with_code(ErrorCode::IllegalNesting)
                    .with_label(action.kw_span)
                    .with_secondary_label(outer_span, format!("this {}", outer.name())),
                );
            }
        }
        let inner = if nests {
            Some((kind, action.kw_span))
        } else {
            enclosing
        };
        for block in action.child_blocks() {
            check_actions(block, inner, collector);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn check_src(src: &str) -> Vec<Diagnostic> {
        let (holders, _) = Parser::new(src).parse();
        let mut collector = DiagnosticCollector::new();
        check(&holders, &mut collector);
        collector.into_sorted()
    }

    #[test]
    fn conditional_inside_random_is_reported() {
        let diags = check_src("random {\nif () {\nchat \"hi\"\n}\n}");
        assert_eq!(diags.len(), 1);
        assert!(diags[0]
            .message
            .contains("cannot use a conditional inside of a random action"));
        // Both the inner and the enclosing keyword are labeled.
        assert_eq!(diags[0].labels.len(), 2);
    }

    #[test]
    fn conditional_in_else_branch_is_reported() {
        let diags = check_src("if () {\nchat \"a\"\n} else {\nif () {\nchat \"b\"\n}\n}");
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn sibling_conditionals_are_fine() {
        let diags = check_src("if () {\nchat \"a\"\n}\nif () {\nchat \"b\"\n}");
        assert!(diags.is_empty(), "{diags:?}");
    }
}
