//! Function call cooldown analysis.
//!
//! Calling a function puts it on a short cooldown, so a second call to the
//! same function in the same run is silently dropped by the server. A
//! `pause` lets the cooldown elapse. Global calls are exempt on the first
//! call side: a later non-global call after a global one still runs.

use std::collections::HashMap;

use crate::error::{Diagnostic, DiagnosticCollector, ErrorCode};
use crate::ir::{IrAction, IrActionHolder, IrActionKind};

pub(super) fn check(holders: &[IrActionHolder], collector: &mut DiagnosticCollector) {
    for holder in holders {
        let mut called: HashMap<String, bool> = HashMap::new();
        walk(&holder.actions, &mut called, collector);
    }
}

fn walk(
    actions: &[IrAction],
    called: &mut HashMap<String, bool>,
    collector: &mut DiagnosticCollector,
) {
    for action in actions {
        match &action.kind {
            IrActionKind::Pause { .. } => called.clear(),
            IrActionKind::Function { function, global } => {
                let Some(name) = function.value() else {
                    continue;
                };
                let global = global.value().copied().unwrap_or(false);
                if let Some(&earlier_was_global) = called.get(name) {
                    if !earlier_was_global {
                        collector.push(
                            Diagnostic::warning(format!(
                                "function `{name}` is still on cooldown here and will never run"
                            ))
                            .with_code(ErrorCode::FunctionCooldown)
                            .with_label(function.span().unwrap_or(action.kw_span))
                            .with_help("insert a `pause` before the second call"),
                        );
                    }
                }
                called.insert(name.clone(), global);
            }
            _ => {
                // Branches might not run, so calls inside them only warn
                // against the state at the branch point.
                for block in action.child_blocks() {
                    let mut branch_state = called.clone();
                    walk(block, &mut branch_state, collector);
                }
                if contains_pause(action) {
                    called.clear();
                }
            }
        }
    }
}

fn contains_pause(action: &IrAction) -> bool {
    action.child_blocks().into_iter().flatten().any(|inner| {
        matches!(inner.kind, IrActionKind::Pause { .. }) || contains_pause(inner)
    })
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
    fn repeated_call_warns() {
        let diags = check_src("function \"tick\"\nfunction \"tick\"");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("will never run"));
    }

    #[test]
    fn pause_resets_the_cooldown() {
        let diags = check_src("function \"tick\"\npause 20\nfunction \"tick\"");
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn pause_inside_a_branch_resets_too() {
        let diags = check_src("function \"tick\"\nif () {\npause 20\n}\nfunction \"tick\"");
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn global_first_call_is_exempt() {
        let diags = check_src("function \"tick\" true\nfunction \"tick\"");
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn call_inside_branch_checks_against_branch_point() {
        let diags = check_src("function \"tick\"\nif () {\nfunction \"tick\"\n}");
        assert_eq!(diags.len(), 1);
    }
}
