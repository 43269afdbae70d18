//! Editor-facing analysis helpers.
//!
//! Everything in here works on the spanned IR, so positions map straight
//! back to the source the user is looking at. The helpers tolerate broken
//! input: they operate on whatever the parser recovered.

mod completions;
mod inlay_hints;
mod rename;
mod signature_help;

pub use completions::{completions, Completion};
pub use inlay_hints::{inlay_hints, InlayHint};
pub use rename::{rename_locations, resolve_rename, RenameTarget};
pub use signature_help::{signature_help, SignatureHelp};

use htsl_parser::ir::IrFieldDesc;
use htsl_parser::{IrAction, IrActionHolder, IrCondition};

/// Calls `visit` for every described field in the tree: holder headers,
/// action arguments and condition arguments, in source order.
pub(crate) fn walk_fields<'a>(
    holders: &'a [IrActionHolder],
    visit: &mut impl FnMut(&IrFieldDesc<'a>),
) {
    for holder in holders {
        for field in holder.fields() {
            visit(&field);
        }
        walk_action_fields(&holder.actions, visit);
    }
}

fn walk_action_fields<'a>(actions: &'a [IrAction], visit: &mut impl FnMut(&IrFieldDesc<'a>)) {
    for action in actions {
        for field in action.fields() {
            visit(&field);
        }
        for condition in action.conditions() {
            for field in condition.fields() {
                visit(&field);
            }
        }
        for block in action.child_blocks() {
            walk_action_fields(block, visit);
        }
    }
}

/// The innermost action whose span contains `offset`.
pub(crate) fn action_at(holders: &[IrActionHolder], offset: usize) -> Option<&IrAction> {
    fn narrow<'a>(actions: &'a [IrAction], offset: usize) -> Option<&'a IrAction> {
        let hit = actions
            .iter()
            .find(|action| action.span.touches(offset))?;
        for block in hit.child_blocks() {
            if let Some(inner) = narrow(block, offset) {
                return Some(inner);
            }
        }
        Some(hit)
    }
    holders
        .iter()
        .find(|holder| holder.span.touches(offset))
        .and_then(|holder| narrow(&holder.actions, offset))
}

/// Like [`action_at`], but also claims a cursor sitting after the end of a
/// statement on the same line, where the user is still typing arguments.
pub(crate) fn action_on_line<'a>(
    src: &str,
    holders: &'a [IrActionHolder],
    offset: usize,
) -> Option<&'a IrAction> {
    if let Some(action) = action_at(holders, offset) {
        return Some(action);
    }
    fn scan<'a>(src: &str, actions: &'a [IrAction], offset: usize) -> Option<&'a IrAction> {
        let mut best: Option<&IrAction> = None;
        for action in actions {
            if action.span.end <= offset && !src[action.span.end..offset].contains('\n') {
                best = Some(action);
            }
            for block in action.child_blocks() {
                if let Some(inner) = scan(src, block, offset) {
                    best = Some(inner);
                }
            }
        }
        best
    }
    holders
        .iter()
        .find_map(|holder| scan(src, &holder.actions, offset))
}

/// The condition under `offset` inside the given action, if any.
pub(crate) fn condition_at(action: &IrAction, offset: usize) -> Option<&IrCondition> {
    action
        .conditions()
        .iter()
        .find(|condition| condition.span.touches(offset))
}
