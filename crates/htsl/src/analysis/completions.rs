//! Context-aware keyword completion.

use htsl_core::{ActionKind, ConditionKind, SemanticKind};
use htsl_parser::ir::IrFieldRef;
use htsl_parser::IrAction;

/// One completion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub label: String,
}

impl Completion {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// Completion candidates for the cursor position.
///
/// At statement level this is every action keyword plus `goto`; inside a
/// condition list it is the condition keywords; on an argument with a
/// closed keyword set it is that set.
pub fn completions(src: &str, offset: usize) -> Vec<Completion> {
    let result = htsl_parser::parse(src);

    let Some(action) = super::action_on_line(src, &result.holders, offset) else {
        return statement_completions();
    };

    // Inside the parenthesized condition list?
    if let Some(list_span) = condition_list_span(action) {
        if list_span.touches(offset) {
            if let Some(condition) = super::condition_at(action, offset) {
                if offset > condition.kw_span.end {
                    return field_completions(condition.fields().as_slice(), offset);
                }
            }
            return ConditionKind::ALL
                .iter()
                .map(|kind| Completion::new(kind.keyword()))
                .collect();
        }
    }

    if offset <= action.kw_span.end {
        return statement_completions();
    }
    field_completions(action.fields().as_slice(), offset)
}

fn statement_completions() -> Vec<Completion> {
    let mut items: Vec<Completion> = ActionKind::ALL
        .iter()
        .map(|kind| Completion::new(kind.keyword()))
        .collect();
    items.push(Completion::new("goto"));
    items
}

fn condition_list_span(action: &IrAction) -> Option<htsl_parser::Span> {
    action
        .fields()
        .iter()
        .find(|field| field.kind == SemanticKind::Conditions)
        .and_then(|field| field.field.span())
}

/// Options for the argument field the cursor is on or about to type.
fn field_completions(
    fields: &[htsl_parser::ir::IrFieldDesc<'_>],
    offset: usize,
) -> Vec<Completion> {
    let mut active = None;
    for field in fields {
        if matches!(field.kind, SemanticKind::Actions | SemanticKind::Conditions) {
            continue;
        }
        match field.field {
            IrFieldRef::Present(span, _) if span.touches(offset) => {
                active = Some(field.kind);
                break;
            }
            IrFieldRef::Present(span, _) if span.start > offset => {
                active = Some(field.kind);
                break;
            }
            IrFieldRef::Present(_, _) => {}
            IrFieldRef::Absent | IrFieldRef::Errored(_) => {
                active = Some(field.kind);
                break;
            }
        }
    }
    active
        .and_then(|kind| kind.options())
        .map(|options| options.iter().map(|option| Completion::new(*option)).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(src: &str, offset: usize) -> Vec<String> {
        completions(src, offset)
            .into_iter()
            .map(|c| c.label)
            .collect()
    }

    #[test]
    fn statement_position_offers_action_keywords() {
        let items = labels("", 0);
        assert!(items.contains(&"chat".to_string()));
        assert!(items.contains(&"goto".to_string()));
        assert_eq!(items.len(), ActionKind::ALL.len() + 1);
    }

    #[test]
    fn condition_list_offers_condition_keywords() {
        let src = "if () {\n}";
        let items = labels(src, 4);
        assert!(items.contains(&"isSneaking".to_string()));
        assert!(items.contains(&"hasGroup".to_string()));
        assert_eq!(items.len(), ConditionKind::ALL.len());
    }

    #[test]
    fn closed_keyword_argument_offers_its_options() {
        let src = "gamemode ";
        let items = labels(src, 9);
        assert_eq!(items, vec!["survival", "adventure", "creative"]);
    }

    #[test]
    fn potion_argument_offers_effects() {
        let src = "applyPotion ";
        let items = labels(src, 12);
        assert!(items.contains(&"speed".to_string()));
    }

    #[test]
    fn free_form_arguments_offer_nothing() {
        let src = "chat ";
        assert!(labels(src, 5).is_empty());
    }
}
