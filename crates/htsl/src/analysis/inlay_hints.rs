//! Inline argument name hints.
//!
//! Positional arguments get a name hint in the editor (`duration:`,
//! `level:`, ...). Stat changes are skipped: `stat kills += 1` reads fine
//! without labels, and the hint would just repeat the operator.

use htsl_core::{ActionKind, SemanticKind};
use htsl_parser::ir::IrFieldRef;
use htsl_parser::{IrAction, IrActionHolder};

/// A name label to render before the argument at `offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlayHint {
    pub offset: usize,
    pub label: &'static str,
}

/// Computes argument name hints for the whole tree.
pub fn inlay_hints(holders: &[IrActionHolder]) -> Vec<InlayHint> {
    let mut hints = Vec::new();
    for holder in holders {
        hint_actions(&holder.actions, &mut hints);
    }
    hints
}

fn hint_actions(actions: &[IrAction], hints: &mut Vec<InlayHint>) {
    for action in actions {
        if !matches!(
            action.action_kind(),
            ActionKind::ChangeStat
                | ActionKind::ChangeGlobalStat
                | ActionKind::ChangeTeamStat
                | ActionKind::Conditional
                | ActionKind::Random
        ) {
            hint_fields(action.fields(), hints);
        }
        for condition in action.conditions() {
            hint_fields(condition.fields(), hints);
        }
        for block in action.child_blocks() {
            hint_actions(block, hints);
        }
    }
}

fn hint_fields(fields: Vec<htsl_parser::ir::IrFieldDesc<'_>>, hints: &mut Vec<InlayHint>) {
    for field in fields {
        if matches!(
            field.kind,
            SemanticKind::Actions
                | SemanticKind::Conditions
                | SemanticKind::Inversion
                | SemanticKind::ConditionalMode
                | SemanticKind::Operation
                | SemanticKind::Comparison
        ) {
            continue;
        }
        if let IrFieldRef::Present(span, _) = field.field {
            hints.push(InlayHint {
                offset: span.start,
                label: field.name,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints_for(src: &str) -> Vec<InlayHint> {
        inlay_hints(&htsl_parser::parse(src).holders)
    }

    #[test]
    fn potion_arguments_are_labeled() {
        let hints = hints_for("applyPotion speed 600 2");
        let labels: Vec<&str> = hints.iter().map(|h| h.label).collect();
        assert_eq!(labels, vec!["effect", "duration", "level"]);
    }

    #[test]
    fn stat_changes_get_no_hints() {
        assert!(hints_for("stat kills += 1").is_empty());
    }

    #[test]
    fn hints_reach_into_blocks() {
        let hints = hints_for("if (hasGroup \"vip\") {\n    pause 20\n}");
        let labels: Vec<&str> = hints.iter().map(|h| h.label).collect();
        assert_eq!(labels, vec!["group", "ticks"]);
    }

    #[test]
    fn hint_offsets_point_at_the_argument() {
        let src = "pause 20";
        let hints = hints_for(src);
        assert_eq!(hints.len(), 1);
        assert_eq!(&src[hints[0].offset..], "20");
    }
}
