//! Source-preserving transformation.
//!
//! [`transform`] takes the original source text plus a target model and
//! produces new source where everything the author wrote stays exactly as
//! written: only the statements, conditions and arguments that actually
//! differ are touched. Unchanged lines keep their spacing, comments between
//! statements survive, and inserted statements are rendered with the
//! configured [`CodeStyle`].
//!
//! The engine diffs the parsed tree against the target level by level:
//! holders, then statement lists, then the argument fields of matched
//! statements.

mod diff;
mod edit;

pub use edit::TextEdit;

use htsl_core::{Action, ActionHolder, Condition, SemanticKind, ValueRef};
use htsl_parser::ir::{IrFieldDesc, IrFieldRef, IrValueRef};
use htsl_parser::{IrAction, IrActionHolder, IrActionKind, IrCondition, IrHolderKind, Span};

use crate::error::HtslError;
use crate::generate;
use crate::style::CodeStyle;

use diff::Edit;

/// Rewrites `src` so it expresses `target`, changing as little text as
/// possible.
///
/// Fails if `src` itself does not parse cleanly; a broken tree has no
/// reliable spans to edit against.
pub fn transform(src: &str, target: &[ActionHolder], style: &CodeStyle) -> Result<String, HtslError> {
    let result = htsl_parser::parse(src);
    if result.has_errors() {
        let err = htsl_parser::ParseError::from(result.diagnostics);
        return Err(HtslError::new_parse_error(err, src));
    }
    let mut edits = Vec::new();
    diff_holders(src, &result.holders, target, style, &mut edits);
    log::debug!(edits = edits.len(); "applying transform edits");
    Ok(edit::apply(src, edits))
}

/// Start of the line containing `pos`, but only when everything before
/// `pos` on that line is indentation.
fn line_start(src: &str, pos: usize) -> usize {
    let begin = src[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
    if src[begin..pos].chars().all(|c| c == ' ' || c == '\t') {
        begin
    } else {
        pos
    }
}

/// Offset just past the newline that ends the line containing `pos`.
fn line_end(src: &str, pos: usize) -> usize {
    match src[pos..].find('\n') {
        Some(i) => pos + i + 1,
        None => src.len(),
    }
}

fn holder_matches(old: &IrActionHolder, new: &ActionHolder) -> bool {
    old.holder_kind() == new.kind()
}

fn diff_holders(
    src: &str,
    old: &[IrActionHolder],
    new: &[ActionHolder],
    style: &CodeStyle,
    edits: &mut Vec<TextEdit>,
) {
    let script = diff::diff(old.len(), new.len(), |i, j| {
        holder_matches(&old[i], &new[j])
    });
    let mut anchor = 0;
    for step in script {
        match step {
            Edit::Keep { old: i, new: j } => {
                rename_header(&old[i], &new[j], edits);
                let body_anchor = match old[i].kind {
                    IrHolderKind::Unknown => line_start(src, old[i].span.start),
                    _ => line_end(src, old[i].kw_span.end),
                };
                diff_actions(
                    src,
                    &old[i].actions,
                    new[j].actions(),
                    0,
                    body_anchor,
                    style,
                    edits,
                );
                anchor = line_end(src, old[i].span.end);
            }
            Edit::Delete { old: i } => {
                let start = line_start(src, old[i].span.start);
                let end = line_end(src, old[i].span.end);
                edits.push(TextEdit::delete(Span::new(start, end)));
                anchor = end;
            }
            Edit::Insert { new: j } => {
                let mut text = generate::render_holder(&new[j], style);
                if anchor > 0 && !src[..anchor].ends_with('\n') {
                    text.insert(0, '\n');
                }
                edits.push(TextEdit::insert(anchor, text));
            }
        }
    }
}

/// Replaces the holder's name when the target renames it.
fn rename_header(old: &IrActionHolder, new: &ActionHolder, edits: &mut Vec<TextEdit>) {
    let (old_name, new_name) = match (&old.kind, new) {
        (IrHolderKind::Function { name }, ActionHolder::Function { name: target, .. }) => {
            (name, target)
        }
        (IrHolderKind::Event { event }, ActionHolder::Event { event: target, .. }) => {
            (event, target)
        }
        _ => return,
    };
    if let (Some(span), Some(current), Some(target)) =
        (old_name.span(), old_name.value(), new_name.as_deref())
    {
        if current != target {
            edits.push(TextEdit::replace(span, generate::quote(target)));
        }
    }
}

fn diff_actions(
    src: &str,
    old: &[IrAction],
    new: &[Action],
    depth: usize,
    start_anchor: usize,
    style: &CodeStyle,
    edits: &mut Vec<TextEdit>,
) {
    let script = diff::diff(old.len(), new.len(), |i, j| {
        old[i].action_kind() == new[j].kind()
    });
    let mut anchor = start_anchor;
    for step in script {
        match step {
            Edit::Keep { old: i, new: j } => {
                diff_matched_action(src, &old[i], &new[j], depth, style, edits);
                anchor = line_end(src, old[i].span.end);
            }
            Edit::Delete { old: i } => {
                let start = line_start(src, old[i].span.start);
                let end = line_end(src, old[i].span.end);
                edits.push(TextEdit::delete(Span::new(start, end)));
                anchor = end;
            }
            Edit::Insert { new: j } => {
                let mut text = generate::render_action(&new[j], style, depth);
                if anchor > 0 && !src[..anchor].ends_with('\n') {
                    text.insert(0, '\n');
                }
                edits.push(TextEdit::insert(anchor, text));
            }
        }
    }
}

fn diff_matched_action(
    src: &str,
    old: &IrAction,
    new: &Action,
    depth: usize,
    style: &CodeStyle,
    edits: &mut Vec<TextEdit>,
) {
    match (&old.kind, new) {
        (
            IrActionKind::Conditional { .. },
            Action::Conditional {
                match_any,
                conditions,
                if_actions,
                else_actions,
            },
        ) => {
            diff_conditional(
                src,
                old,
                match_any,
                conditions.as_deref().unwrap_or_default(),
                if_actions.as_deref().unwrap_or_default(),
                else_actions.as_deref(),
                depth,
                style,
                edits,
            );
        }
        (IrActionKind::Random { actions: old_block }, Action::Random { actions }) => {
            if let Some(span) = old_block.span() {
                diff_actions(
                    src,
                    old_block.value().map(Vec::as_slice).unwrap_or_default(),
                    actions.as_deref().unwrap_or_default(),
                    depth + 1,
                    line_end(src, span.start),
                    style,
                    edits,
                );
            }
        }
        _ => {
            let old_fields = old.fields();
            let new_fields = new.fields();
            diff_scalar_fields(&old_fields, &new_fields, old.kw_span.end, style, edits);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn diff_conditional(
    src: &str,
    old: &IrAction,
    new_match_any: &Option<bool>,
    new_conditions: &[Condition],
    new_if: &[Action],
    new_else: Option<&[Action]>,
    depth: usize,
    style: &CodeStyle,
    edits: &mut Vec<TextEdit>,
) {
    let IrActionKind::Conditional {
        match_any,
        conditions,
        if_actions,
        else_actions,
    } = &old.kind
    else {
        return;
    };

    // Mode keyword.
    match (match_any.span(), match_any.value(), new_match_any) {
        (Some(span), Some(current), Some(target)) if current != target => {
            edits.push(TextEdit::replace(span, mode_keyword(*target)));
        }
        (Some(span), Some(_), None) => {
            let mut end = span.end;
            while src[end..].starts_with(' ') {
                end += 1;
            }
            edits.push(TextEdit::delete(Span::new(span.start, end)));
        }
        (None, _, Some(target)) => {
            edits.push(TextEdit::insert(
                old.kw_span.end,
                format!(" {}", mode_keyword(*target)),
            ));
        }
        _ => {}
    }

    // Condition list.
    if let (Some(list_span), Some(old_list)) = (conditions.span(), conditions.value()) {
        diff_conditions(src, old_list, new_conditions, list_span, style, edits);
    }

    // If block.
    let if_span = if_actions.span();
    if let (Some(span), Some(old_block)) = (if_span, if_actions.value()) {
        diff_actions(
            src,
            old_block,
            new_if,
            depth + 1,
            line_end(src, span.start),
            style,
            edits,
        );
    }

    // Else block.
    match (else_actions.span(), else_actions.value(), new_else) {
        (Some(span), Some(old_block), Some(target)) => {
            diff_actions(
                src,
                old_block,
                target,
                depth + 1,
                line_end(src, span.start),
                style,
                edits,
            );
        }
        (Some(span), Some(_), None) => {
            // Drop from right after the if block's `}` through the else
            // block's closing brace.
            let start = if_span.map(|s| s.end).unwrap_or(span.start);
            edits.push(TextEdit::delete(Span::new(start, span.end)));
        }
        (None, _, Some(target)) => {
            if let Some(if_span) = if_span {
                let mut text = String::from(" else {\n");
                for action in target {
                    text.push_str(&generate::render_action(action, style, depth + 1));
                }
                text.push_str(&style.indent(depth));
                text.push('}');
                edits.push(TextEdit::insert(if_span.end, text));
            }
        }
        _ => {}
    }
}

fn mode_keyword(match_any: bool) -> &'static str {
    if match_any { "or" } else { "and" }
}

fn diff_conditions(
    src: &str,
    old: &[IrCondition],
    new: &[Condition],
    list_span: Span,
    style: &CodeStyle,
    edits: &mut Vec<TextEdit>,
) {
    let script = diff::diff(old.len(), new.len(), |i, j| {
        old[i].condition_kind() == new[j].kind()
    });
    let mut anchor = list_span.start + 1;
    let mut has_prev = false;
    for (position, step) in script.iter().enumerate() {
        match *step {
            Edit::Keep { old: i, new: j } => {
                diff_matched_condition(&old[i], &new[j], style, edits);
                anchor = old[i].span.end;
                has_prev = true;
            }
            Edit::Delete { old: i } => {
                let mut start = old[i].span.start;
                let mut end = old[i].span.end;
                // Take a separator with the condition: the following comma
                // if there is one, the preceding one otherwise.
                let after: usize = src[end..].bytes().take_while(|&b| b == b' ').count();
                if src[end + after..].starts_with(',') {
                    end += after + 1;
                    if src[end..].starts_with(' ') {
                        end += 1;
                    }
                } else {
                    let before = src[..start]
                        .bytes()
                        .rev()
                        .take_while(|&b| b == b' ')
                        .count();
                    if src[..start - before].ends_with(',') {
                        start -= before + 1;
                    }
                }
                edits.push(TextEdit::delete(Span::new(start, end)));
            }
            Edit::Insert { new: j } => {
                let text = generate::generate_condition(&new[j], style);
                let keeps_follow = script[position + 1..]
                    .iter()
                    .any(|s| matches!(s, Edit::Keep { .. }));
                let rendered = if has_prev {
                    format!(", {text}")
                } else if keeps_follow {
                    format!("{text}, ")
                } else {
                    text
                };
                edits.push(TextEdit::insert(anchor, rendered));
            }
        }
    }
}

fn diff_matched_condition(
    old: &IrCondition,
    new: &Condition,
    style: &CodeStyle,
    edits: &mut Vec<TextEdit>,
) {
    match (old.inverted.value, new.inverted()) {
        (true, false) => edits.push(TextEdit::delete(old.inverted.span)),
        (false, true) => edits.push(TextEdit::insert(old.kw_span.start, "!")),
        _ => {}
    }
    let old_fields = old.fields();
    let new_fields = new.fields();
    // Index 0 is the inversion marker on both sides.
    diff_scalar_fields(&old_fields[1..], &new_fields[1..], old.kw_span.end, style, edits);
}

/// Diffs positional scalar arguments of a matched statement or condition.
///
/// A `None` in the target cuts the argument list there: positional syntax
/// cannot express a hole, so everything from that point on is removed.
fn diff_scalar_fields(
    old_fields: &[IrFieldDesc<'_>],
    new_fields: &[htsl_core::FieldDesc<'_>],
    mut last_end: usize,
    style: &CodeStyle,
    edits: &mut Vec<TextEdit>,
) {
    debug_assert_eq!(old_fields.len(), new_fields.len());
    for (index, (old_field, new_field)) in old_fields.iter().zip(new_fields).enumerate() {
        if matches!(
            old_field.kind,
            SemanticKind::Actions | SemanticKind::Conditions | SemanticKind::Inversion
        ) {
            continue;
        }
        match (&old_field.field, &new_field.value) {
            (IrFieldRef::Present(span, old_value), Some(new_value)) => {
                if !value_eq(old_value, new_value) {
                    edits.push(TextEdit::replace(
                        *span,
                        generate::value_text(new_field.kind, new_value, style),
                    ));
                }
                last_end = span.end;
            }
            (IrFieldRef::Present(_, _), None) => {
                // Remove this and every later written argument.
                let trailing_end = old_fields[index..]
                    .iter()
                    .filter_map(|field| field.field.span())
                    .map(|span| span.end)
                    .max();
                if let Some(end) = trailing_end {
                    edits.push(TextEdit::delete(Span::new(last_end, end)));
                }
                break;
            }
            (IrFieldRef::Absent | IrFieldRef::Errored(_), Some(new_value)) => {
                edits.push(TextEdit::insert(
                    last_end,
                    format!(" {}", generate::value_text(new_field.kind, new_value, style)),
                ));
            }
            _ => {}
        }
    }
}

fn value_eq(old: &IrValueRef<'_>, new: &ValueRef<'_>) -> bool {
    match (old, new) {
        (IrValueRef::Str(a), ValueRef::Str(b)) => a == b,
        (IrValueRef::Int(a), ValueRef::Int(b)) => a == b,
        (IrValueRef::Float(a), ValueRef::Float(b)) => a == b,
        (IrValueRef::Bool(a), ValueRef::Bool(b)) => a == b,
        (IrValueRef::Operation(a), ValueRef::Operation(b)) => a == b,
        (IrValueRef::Comparison(a), ValueRef::Comparison(b)) => a == b,
        (IrValueRef::Amount(a), ValueRef::Amount(b)) => a == b,
        (IrValueRef::Location(a), ValueRef::Location(b)) => a == b,
        (IrValueRef::Gamemode(a), ValueRef::Gamemode(b)) => a == b,
        (IrValueRef::Slot(a), ValueRef::Slot(b)) => a == b,
        (IrValueRef::Potion(a), ValueRef::Potion(b)) => a == b,
        (IrValueRef::Lobby(a), ValueRef::Lobby(b)) => a == b,
        (IrValueRef::Enchantment(a), ValueRef::Enchantment(b)) => a == b,
        (IrValueRef::Permission(a), ValueRef::Permission(b)) => a == b,
        (IrValueRef::ItemAmount(a), ValueRef::ItemAmount(b)) => a == b,
        (IrValueRef::ItemProperty(a), ValueRef::ItemProperty(b)) => a == b,
        (IrValueRef::ItemLocation(a), ValueRef::ItemLocation(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use htsl_core::arguments::Amount;

    fn style() -> CodeStyle {
        CodeStyle::default()
    }

    fn model(src: &str) -> Vec<ActionHolder> {
        let result = htsl_parser::parse(src);
        assert!(!result.has_errors(), "{:?}", result.diagnostics);
        result.lower()
    }

    #[test]
    fn unchanged_input_is_untouched() {
        let src = "stat   kills  +=  1\nkill\n";
        let target = model(src);
        assert_eq!(transform(src, &target, &style()).unwrap(), src);
    }

    #[test]
    fn argument_edit_preserves_spacing() {
        let src = "stat   kills  +=  1";
        let mut target = model(src);
        let ActionHolder::Unknown { actions } = &mut target[0] else {
            panic!("expected bare holder");
        };
        let Some(Action::ChangeStat { amount, .. }) = actions.as_mut().map(|a| &mut a[0]) else {
            panic!("expected stat change");
        };
        *amount = Some(Amount::Literal(64));
        let out = transform(src, &target, &style()).unwrap();
        assert_eq!(out, "stat   kills  +=  64");
    }

    #[test]
    fn inserted_action_lands_between_existing_lines() {
        let src = "chat \"one\"\nchat \"three\"\n";
        let mut target = model(src);
        let ActionHolder::Unknown { actions } = &mut target[0] else {
            panic!("expected bare holder");
        };
        if let Some(list) = actions.as_mut() {
            list.insert(1, Action::Kill);
        }
        let out = transform(src, &target, &style()).unwrap();
        assert_eq!(out, "chat \"one\"\nkill\nchat \"three\"\n");
    }

    #[test]
    fn deleted_action_takes_its_line() {
        let src = "chat \"one\"\nkill\nchat \"three\"\n";
        let mut target = model(src);
        let ActionHolder::Unknown { actions } = &mut target[0] else {
            panic!("expected bare holder");
        };
        if let Some(list) = actions.as_mut() {
            list.remove(1);
        }
        let out = transform(src, &target, &style()).unwrap();
        assert_eq!(out, "chat \"one\"\nchat \"three\"\n");
    }

    #[test]
    fn condition_inversion_toggles_in_place() {
        let src = "if (isSneaking) {\n    kill\n}\n";
        let mut target = model(src);
        let ActionHolder::Unknown { actions } = &mut target[0] else {
            panic!("expected bare holder");
        };
        let Some(Action::Conditional { conditions, .. }) = actions.as_mut().map(|a| &mut a[0])
        else {
            panic!("expected conditional");
        };
        let Some(Condition::IsSneaking { inverted }) =
            conditions.as_mut().map(|c| &mut c[0])
        else {
            panic!("expected sneaking condition");
        };
        *inverted = true;
        let out = transform(src, &target, &style()).unwrap();
        assert_eq!(out, "if (!isSneaking) {\n    kill\n}\n");
    }

    #[test]
    fn appended_else_branch_is_rendered() {
        let src = "if (isSneaking) {\n    kill\n}\n";
        let mut target = model(src);
        let ActionHolder::Unknown { actions } = &mut target[0] else {
            panic!("expected bare holder");
        };
        let Some(Action::Conditional { else_actions, .. }) = actions.as_mut().map(|a| &mut a[0])
        else {
            panic!("expected conditional");
        };
        *else_actions = Some(vec![Action::Heal]);
        let out = transform(src, &target, &style()).unwrap();
        assert_eq!(out, "if (isSneaking) {\n    kill\n} else {\n    fullHeal\n}\n");
    }

    #[test]
    fn broken_source_is_rejected() {
        let target = model("kill");
        let err = transform("bogusAction", &target, &style());
        assert!(matches!(err, Err(HtslError::Parse { .. })));
    }

    #[test]
    fn nested_statements_are_edited_in_their_block() {
        let src = "if (isSneaking) {\n    chat \"a\"\n}\n";
        let mut target = model(src);
        let ActionHolder::Unknown { actions } = &mut target[0] else {
            panic!("expected bare holder");
        };
        let Some(Action::Conditional { if_actions, .. }) = actions.as_mut().map(|a| &mut a[0])
        else {
            panic!("expected conditional");
        };
        if let Some(list) = if_actions.as_mut() {
            list.push(Action::Kill);
        }
        let out = transform(src, &target, &style()).unwrap();
        assert_eq!(out, "if (isSneaking) {\n    chat \"a\"\n    kill\n}\n");
    }
}
