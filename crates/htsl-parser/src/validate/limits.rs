//! Per-kind action count limits.
//!
//! The server caps how many actions of each kind a single block may contain.
//! Each block starts from a fresh budget, so a conditional or random body is
//! counted independently of the block that encloses it. Every action past a
//! kind's limit gets its own diagnostic.

use htsl_core::ActionKind;

use crate::error::{Diagnostic, DiagnosticCollector, ErrorCode};
use crate::ir::{IrAction, IrActionHolder};

/// How many actions of this kind one holder may contain.
pub(crate) fn limit(kind: ActionKind) -> usize {
    match kind {
        ActionKind::Conditional => 15,
        ActionKind::SetGroup => 1,
        ActionKind::Kill => 1,
        ActionKind::Heal => 5,
        ActionKind::Title => 5,
        ActionKind::ActionBar => 5,
        ActionKind::ResetInventory => 1,
        ActionKind::ChangeMaxHealth => 5,
        ActionKind::GiveItem => 20,
        ActionKind::RemoveItem => 20,
        ActionKind::Message => 20,
        ActionKind::ApplyPotionEffect => 22,
        ActionKind::ClearPotionEffects => 5,
        ActionKind::GiveExperienceLevels => 5,
        ActionKind::SendToLobby => 1,
        ActionKind::ChangeStat => 10,
        ActionKind::ChangeGlobalStat => 10,
        ActionKind::ChangeTeamStat => 10,
        ActionKind::ChangeHealth => 5,
        ActionKind::ChangeHunger => 5,
        ActionKind::Random => 5,
        ActionKind::Function => 10,
        ActionKind::ApplyInventoryLayout => 5,
        ActionKind::EnchantHeldItem => 5,
        ActionKind::Pause => 30,
        ActionKind::SetTeam => 1,
        ActionKind::SetMenu => 10,
        ActionKind::DropItem => 5,
        ActionKind::SetVelocity => 5,
        ActionKind::Launch => 5,
        ActionKind::Teleport => 5,
        ActionKind::FailParkour => 1,
        ActionKind::PlaySound => 25,
        ActionKind::SetCompassTarget => 5,
        ActionKind::SetGamemode => 1,
        ActionKind::Exit => 1,
        ActionKind::CancelEvent => 1,
    }
}

pub(super) fn check(holders: &[IrActionHolder], collector: &mut DiagnosticCollector) {
    for holder in holders {
        check_block(&holder.actions, collector);
    }
}

fn check_block(actions: &[IrAction], collector: &mut DiagnosticCollector) {
    let mut counts = [0usize; ActionKind::ALL.len()];
    for action in actions {
        let kind = action.action_kind();
        let index = kind as usize;
        counts[index] += 1;
        let max = limit(kind);
        if counts[index] > max {
            collector.push(
                Diagnostic::error(format!(
                    "too many `{}` actions, the limit is {max}",
                    kind.keyword()
                ))
                .with_code(ErrorCode::LimitExceeded)
                .with_label(action.kw_span),
            );
        }
        for block in action.child_blocks() {
            check_block(block, collector);
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
    fn nested_blocks_get_their_own_budget() {
        let diags = check_src("kill\nif () {\nkill\n}");
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn every_excess_action_is_reported() {
        let diags = check_src("kill\nkill\nkill");
        assert_eq!(diags.len(), 2);
        for diag in &diags {
            assert_eq!(diag.code, Some(ErrorCode::LimitExceeded));
        }
    }

    #[test]
    fn limits_reset_per_holder() {
        let diags = check_src("goto function \"a\"\nkill\ngoto function \"b\"\nkill");
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn every_kind_has_a_positive_limit() {
        for kind in htsl_core::ActionKind::ALL {
            assert!(limit(kind) >= 1);
        }
    }
}
