//! Context restrictions: some statements are only legal in specific
//! holders or positions.
//!
//! `cancelEvent` needs an event holder, `damageAmount` only means anything
//! while a Player Damage event is running, and `exit` at the top level of a
//! holder would make everything after it unreachable. Headerless holders are
//! exempt from the event checks: without a `goto` header the eventual holder
//! kind is not known yet.

use htsl_core::{ActionHolderKind, ActionKind, ConditionKind};

use crate::error::{Diagnostic, DiagnosticCollector, ErrorCode};
use crate::ir::{IrAction, IrActionHolder, IrHolderKind};

const DAMAGE_EVENT: &str = "player damage";

pub(super) fn check(holders: &[IrActionHolder], collector: &mut DiagnosticCollector) {
    for holder in holders {
        let event_name = match &holder.kind {
            IrHolderKind::Event { event } => event.value().map(String::as_str),
            _ => None,
        };
        let scope = Scope {
            holder: holder.holder_kind(),
            event_name,
            in_conditional: false,
        };
        check_actions(&holder.actions, scope, collector);
    }
}

#[derive(Clone, Copy)]
struct Scope<'a> {
    holder: ActionHolderKind,
    event_name: Option<&'a str>,
    in_conditional: bool,
}

fn check_actions(actions: &[IrAction], scope: Scope<'_>, collector: &mut DiagnosticCollector) {
    for action in actions {
        match action.action_kind() {
            ActionKind::CancelEvent if scope.holder == ActionHolderKind::Function => {
                collector.push(
                    Diagnostic::error("`cancelEvent` can only be used inside an event")
                        .with_code(ErrorCode::InvalidEventContext)
                        .with_label(action.kw_span),
                );
            }
            ActionKind::Exit if !scope.in_conditional => {
                collector.push(
                    Diagnostic::error("`exit` can only be used inside a conditional")
                        .with_code(ErrorCode::MisplacedExit)
                        .with_label(action.kw_span)
                        .with_help("everything after a top-level `exit` would never run"),
                );
            }
            ActionKind::Conditional => {
                for condition in action.conditions() {
                    if condition.condition_kind() == ConditionKind::CompareDamage
                        && scope.holder != ActionHolderKind::Unknown
                        && !scope
                            .event_name
                            .is_some_and(|name| name.eq_ignore_ascii_case(DAMAGE_EVENT))
                    {
                        collector.push(
                            Diagnostic::error(
                                "`damageAmount` can only be used inside a Player Damage event",
                            )
                            .with_code(ErrorCode::InvalidEventContext)
                            .with_label(condition.kw_span),
                        );
                    }
                }
            }
            _ => {}
        }

        let inner = Scope {
            in_conditional: scope.in_conditional
                || action.action_kind() == ActionKind::Conditional,
            ..scope
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
    fn cancel_event_in_event_is_fine() {
        let diags = check_src("goto event \"Player Death\"\ncancelEvent");
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn exit_inside_conditional_is_fine() {
        let diags = check_src("if () {\nexit\n}");
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn top_level_exit_is_reported() {
        let diags = check_src("chat \"hi\"\nexit");
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn headerless_holders_skip_the_event_checks() {
        let diags = check_src("cancelEvent");
        assert!(diags.is_empty(), "{diags:?}");

        let diags = check_src("if (damageAmount > 5) {\nkill\n}");
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn damage_amount_needs_damage_event() {
        let src = "goto event \"Player Death\"\nif (damageAmount > 5) {\nkill\n}";
        let diags = check_src(src);
        assert_eq!(diags.len(), 1);

        let src = "goto event \"Player Damage\"\nif (damageAmount > 5) {\nkill\n}";
        assert!(check_src(src).is_empty());
    }
}
