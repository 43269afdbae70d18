//! Rename resolution for named entities.
//!
//! Stats, functions, teams and regions are referenced by name in many
//! places; renaming one means editing every same-kind occurrence of the
//! same name. Kinds are kept apart: a player stat and a global stat may
//! share a name without being the same thing.

use htsl_core::SemanticKind;
use htsl_parser::ir::{IrFieldRef, IrValueRef};
use htsl_parser::{IrActionHolder, Span};

/// The entity under the cursor that a rename would target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTarget {
    pub kind: SemanticKind,
    pub value: String,
    pub span: Span,
}

/// Finds the renameable entity at `offset`, if the cursor is on one.
pub fn resolve_rename(holders: &[IrActionHolder], offset: usize) -> Option<RenameTarget> {
    let mut target = None;
    super::walk_fields(holders, &mut |field| {
        if target.is_some() || !field.kind.is_renameable() {
            return;
        }
        if let IrFieldRef::Present(span, IrValueRef::Str(value)) = field.field {
            if span.touches(offset) {
                target = Some(RenameTarget {
                    kind: field.kind,
                    value: value.to_string(),
                    span,
                });
            }
        }
    });
    target
}

/// Every written occurrence of the entity, the one under the cursor
/// included.
pub fn rename_locations(
    holders: &[IrActionHolder],
    kind: SemanticKind,
    value: &str,
) -> Vec<Span> {
    let mut spans = Vec::new();
    super::walk_fields(holders, &mut |field| {
        if field.kind != kind {
            return;
        }
        if let IrFieldRef::Present(span, IrValueRef::Str(written)) = field.field {
            if written == value {
                spans.push(span);
            }
        }
    });
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holders(src: &str) -> Vec<IrActionHolder> {
        htsl_parser::parse(src).holders
    }

    #[test]
    fn stat_name_resolves_under_the_cursor() {
        let src = "stat kills += 1";
        let tree = holders(src);
        let target = resolve_rename(&tree, 6).unwrap();
        assert_eq!(target.kind, SemanticKind::StatName);
        assert_eq!(target.value, "kills");
    }

    #[test]
    fn literals_are_not_renameable() {
        let src = "stat kills += 1";
        let tree = holders(src);
        assert!(resolve_rename(&tree, 14).is_none());
    }

    #[test]
    fn locations_cover_actions_and_conditions() {
        let src = "if (stat kills > 10) {\n    stat kills += 1\n}";
        let tree = holders(src);
        let spans = rename_locations(&tree, SemanticKind::StatName, "kills");
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn kinds_do_not_bleed_into_each_other() {
        let src = "stat kills += 1\nglobalstat kills += 1";
        let tree = holders(src);
        let spans = rename_locations(&tree, SemanticKind::StatName, "kills");
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn function_header_and_calls_rename_together() {
        let src = "goto function \"tick\"\nkill\nfunction \"tick\"";
        let tree = holders(src);
        let target = resolve_rename(&tree, 16).unwrap();
        assert_eq!(target.kind, SemanticKind::FunctionName);
        let spans = rename_locations(&tree, SemanticKind::FunctionName, &target.value);
        assert_eq!(spans.len(), 2);
    }
}
