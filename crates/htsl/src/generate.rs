//! Canonical HTSL text from the bare model.
//!
//! The writer walks the descriptor fields of each action and condition, so
//! argument order and omission rules live in one place (`htsl-core`'s
//! `fields()`), not here. Trailing `None` arguments are left out; an
//! argument after the first `None` cannot be expressed positionally and is
//! dropped with it.

use htsl_core::arguments::{Amount, Location};
use htsl_core::{Action, ActionHolder, Condition, SemanticKind, ValueRef};

use crate::style::{Capitalization, CodeStyle, OperatorStyle, PlaceholderStyle, WrittenStyle};

/// Renders holders as canonical HTSL source.
pub fn generate(holders: &[ActionHolder], style: &CodeStyle) -> String {
    let mut writer = Writer {
        out: String::new(),
        style,
    };
    for (index, holder) in holders.iter().enumerate() {
        if index > 0 {
            writer.out.push('\n');
        }
        writer.write_holder(holder);
    }
    if !style.trailing_newline() {
        while writer.out.ends_with('\n') {
            writer.out.pop();
        }
    }
    writer.out
}

/// Renders a single action on one line (or several for block actions).
pub fn generate_action(action: &Action, style: &CodeStyle) -> String {
    let mut writer = Writer {
        out: String::new(),
        style,
    };
    writer.write_action(action, 0);
    if !style.trailing_newline() {
        while writer.out.ends_with('\n') {
            writer.out.pop();
        }
    }
    writer.out
}

/// Renders a single condition, without any surrounding list syntax.
pub fn generate_condition(condition: &Condition, style: &CodeStyle) -> String {
    let mut writer = Writer {
        out: String::new(),
        style,
    };
    writer.write_condition(condition);
    writer.out
}

/// Renders one action at the given nesting depth, always ending with a
/// newline. Used by the transformer when inserting new statements.
pub(crate) fn render_action(action: &Action, style: &CodeStyle, depth: usize) -> String {
    let mut writer = Writer {
        out: String::new(),
        style,
    };
    writer.write_action(action, depth);
    writer.out
}

/// Renders one holder, always ending with a newline.
pub(crate) fn render_holder(holder: &ActionHolder, style: &CodeStyle) -> String {
    let mut writer = Writer {
        out: String::new(),
        style,
    };
    writer.write_holder(holder);
    writer.out
}

struct Writer<'a> {
    out: String,
    style: &'a CodeStyle,
}

impl Writer<'_> {
    fn write_holder(&mut self, holder: &ActionHolder) {
        match holder {
            ActionHolder::Unknown { actions } => {
                self.write_actions(actions.as_deref().unwrap_or_default(), 0);
            }
            ActionHolder::Function { name, actions } => {
                self.out.push_str("goto function ");
                self.out.push_str(&quote(name.as_deref().unwrap_or("")));
                self.out.push('\n');
                self.write_actions(actions.as_deref().unwrap_or_default(), 0);
            }
            ActionHolder::Event { event, actions } => {
                self.out.push_str("goto event ");
                self.out.push_str(&quote(event.as_deref().unwrap_or("")));
                self.out.push('\n');
                self.write_actions(actions.as_deref().unwrap_or_default(), 0);
            }
        }
    }

    fn write_actions(&mut self, actions: &[Action], depth: usize) {
        for action in actions {
            self.write_action(action, depth);
        }
    }

    fn write_action(&mut self, action: &Action, depth: usize) {
        self.out.push_str(&self.style.indent(depth));
        match action {
            Action::Conditional {
                match_any,
                conditions,
                if_actions,
                else_actions,
            } => {
                self.out.push_str("if ");
                match match_any {
                    Some(true) => self.out.push_str("or "),
                    Some(false) if self.style.explicit_conditional_and() => {
                        self.out.push_str("and ");
                    }
                    _ => {}
                }
                self.write_condition_list(
                    conditions.as_deref().unwrap_or_default(),
                    depth,
                );
                self.out.push_str(" {\n");
                self.write_actions(if_actions.as_deref().unwrap_or_default(), depth + 1);
                self.out.push_str(&self.style.indent(depth));
                self.out.push('}');
                if let Some(else_actions) = else_actions {
                    if self.style.inline_else() {
                        self.out.push_str(" else {\n");
                    } else {
                        self.out.push('\n');
                        self.out.push_str(&self.style.indent(depth));
                        self.out.push_str("else {\n");
                    }
                    self.write_actions(else_actions, depth + 1);
                    self.out.push_str(&self.style.indent(depth));
                    self.out.push('}');
                }
                self.out.push('\n');
            }
            Action::Random { actions } => {
                self.out.push_str("random {\n");
                self.write_actions(actions.as_deref().unwrap_or_default(), depth + 1);
                self.out.push_str(&self.style.indent(depth));
                self.out.push_str("}\n");
            }
            _ => {
                self.out.push_str(action.kind().keyword());
                for field in action.fields() {
                    let Some(value) = field.value else {
                        break;
                    };
                    self.out.push(' ');
                    self.out.push_str(&value_text(field.kind, &value, self.style));
                }
                self.out.push('\n');
            }
        }
    }

    /// The parenthesized condition list, wrapped one-per-line when the
    /// rendered text runs past the configured line length.
    fn write_condition_list(&mut self, conditions: &[Condition], depth: usize) {
        let rendered: Vec<String> = conditions
            .iter()
            .map(|condition| generate_condition(condition, self.style))
            .collect();
        let inline_len: usize = rendered.iter().map(|text| text.len() + 2).sum();
        self.out.push('(');
        if inline_len > self.style.line_length() {
            self.out.push('\n');
            for (index, text) in rendered.iter().enumerate() {
                self.out.push_str(&self.style.indent(depth + 1));
                self.out.push_str(text);
                if index + 1 < rendered.len() {
                    self.out.push(',');
                }
                self.out.push('\n');
            }
            self.out.push_str(&self.style.indent(depth));
        } else {
            for (index, text) in rendered.iter().enumerate() {
                if index > 0 {
                    self.out.push_str(", ");
                }
                self.out.push_str(text);
            }
        }
        self.out.push(')');
    }

    fn write_condition(&mut self, condition: &Condition) {
        if condition.inverted() {
            self.out.push('!');
        }
        self.out.push_str(condition.kind().keyword());
        for field in condition.fields() {
            if field.kind == SemanticKind::Inversion {
                continue;
            }
            let Some(value) = field.value else {
                break;
            };
            self.out.push(' ');
            self.out.push_str(&value_text(field.kind, &value, self.style));
        }
    }
}

/// One argument as source text.
pub(crate) fn value_text(kind: SemanticKind, value: &ValueRef<'_>, style: &CodeStyle) -> String {
    match value {
        ValueRef::Str(text) => match kind {
            SemanticKind::Placeholder => placeholder_text(text, style),
            SemanticKind::StatName
            | SemanticKind::GlobalStatName
            | SemanticKind::TeamStatName => (*text).to_string(),
            _ => quote(text),
        },
        ValueRef::Int(value) => value.to_string(),
        ValueRef::Float(value) => value.to_string(),
        ValueRef::Bool(value) => value.to_string(),
        ValueRef::Operation(op) => match style.operation_style() {
            OperatorStyle::Symbolic => op.symbol().to_string(),
            OperatorStyle::Written(written) => written_text(op.written(), written),
        },
        ValueRef::Comparison(cmp) => match style.comparison_style() {
            OperatorStyle::Symbolic => cmp.symbol().to_string(),
            OperatorStyle::Written(written) => written_text(cmp.written(), written),
        },
        ValueRef::Amount(amount) => match amount {
            Amount::Literal(value) => value.to_string(),
            Amount::Placeholder(text) => placeholder_text(text, style),
        },
        ValueRef::Location(location) => match location {
            Location::Custom { coordinates } => {
                format!("{} {}", location.keyword(), quote(coordinates))
            }
            _ => location.keyword().to_string(),
        },
        ValueRef::Gamemode(gamemode) => gamemode.keyword().to_string(),
        ValueRef::Slot(slot) => slot.to_string(),
        ValueRef::Potion(effect) => effect.keyword().to_string(),
        ValueRef::Lobby(lobby) => lobby.keyword().to_string(),
        ValueRef::Enchantment(enchantment) => enchantment.keyword().to_string(),
        ValueRef::Permission(permission) => permission.keyword().to_string(),
        ValueRef::ItemAmount(amount) => amount.keyword().to_string(),
        ValueRef::ItemProperty(property) => property.keyword().to_string(),
        ValueRef::ItemLocation(location) => location.keyword().to_string(),
        // Blocks are rendered by the writer, never as a single token.
        ValueRef::Actions(_) | ValueRef::Conditions(_) => String::new(),
    }
}

pub(crate) fn quote(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

fn placeholder_text(text: &str, style: &CodeStyle) -> String {
    match style.placeholder_style() {
        PlaceholderStyle::Normal => text.to_string(),
        PlaceholderStyle::Quoted => quote(text),
    }
}

/// A written operator name under the configured casing and quoting. The
/// canonical spelling is already lowercase-leaning camel case, so
/// `Lowercase` leaves it untouched.
fn written_text(name: &str, style: WrittenStyle) -> String {
    let cased = match style.capitalization {
        Capitalization::Lowercase => name.to_string(),
        Capitalization::Uppercase => name.to_ascii_uppercase(),
        Capitalization::Capitalized => {
            let mut chars = name.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        }
    };
    if style.quoted { quote(&cased) } else { cased }
}

#[cfg(test)]
mod tests {
    use super::*;
    use htsl_core::arguments::{Amount, Operation};

    fn style() -> CodeStyle {
        CodeStyle::default()
    }

    fn unknown(actions: Vec<Action>) -> ActionHolder {
        ActionHolder::Unknown {
            actions: Some(actions),
        }
    }

    #[test]
    fn bare_action_is_just_the_keyword() {
        let out = generate(&[unknown(vec![Action::Kill])], &style());
        assert_eq!(out, "kill\n");
    }

    #[test]
    fn trailing_none_arguments_are_omitted() {
        let action = Action::Title {
            title: Some("Welcome".into()),
            subtitle: None,
            fadein: None,
            stay: None,
            fadeout: None,
        };
        let out = generate_action(&action, &style());
        assert_eq!(out, "title \"Welcome\"\n");
    }

    #[test]
    fn stat_change_uses_operator_symbols() {
        let action = Action::ChangeStat {
            stat: Some("kills".into()),
            op: Some(Operation::Increment),
            amount: Some(Amount::Literal(1)),
        };
        let out = generate_action(&action, &style());
        assert_eq!(out, "stat kills += 1\n");
    }

    #[test]
    fn conditional_renders_block_and_else() {
        let action = Action::Conditional {
            match_any: Some(true),
            conditions: Some(vec![Condition::IsSneaking { inverted: true }]),
            if_actions: Some(vec![Action::Kill]),
            else_actions: Some(vec![Action::Heal]),
        };
        let out = generate_action(&action, &style());
        assert_eq!(
            out,
            "if or (!isSneaking) {\n    kill\n} else {\n    fullHeal\n}\n"
        );
    }

    #[test]
    fn function_holder_gets_a_goto_header() {
        let holder = ActionHolder::Function {
            name: Some("greet".into()),
            actions: Some(vec![Action::Message {
                message: Some("hi".into()),
            }]),
        };
        let out = generate(&[holder], &style());
        assert_eq!(out, "goto function \"greet\"\nchat \"hi\"\n");
    }

    #[test]
    fn strings_are_escaped() {
        let action = Action::Message {
            message: Some("say \"hi\"".into()),
        };
        let out = generate_action(&action, &style());
        assert_eq!(out, "chat \"say \\\"hi\\\"\"\n");
    }

    fn style_from(src: &str) -> CodeStyle {
        toml::from_str(src).unwrap()
    }

    fn simple_conditional(match_any: Option<bool>) -> Action {
        Action::Conditional {
            match_any,
            conditions: Some(vec![Condition::IsSneaking { inverted: false }]),
            if_actions: Some(vec![Action::Kill]),
            else_actions: None,
        }
    }

    #[test]
    fn default_and_mode_is_elided() {
        let out = generate_action(&simple_conditional(Some(false)), &style());
        assert_eq!(out, "if (isSneaking) {\n    kill\n}\n");
    }

    #[test]
    fn explicit_and_mode_is_written_on_request() {
        let style = style_from("explicit_conditional_and = true");
        let out = generate_action(&simple_conditional(Some(false)), &style);
        assert_eq!(out, "if and (isSneaking) {\n    kill\n}\n");
    }

    #[test]
    fn written_operator_style_renders_names() {
        let style = style_from("operation_style = { written = { quoted = true } }");
        let action = Action::ChangeStat {
            stat: Some("kills".into()),
            op: Some(Operation::Increment),
            amount: Some(Amount::Literal(1)),
        };
        let out = generate_action(&action, &style);
        assert_eq!(out, "stat kills \"increment\" 1\n");
    }

    #[test]
    fn long_condition_lists_wrap() {
        let style = style_from("line_length = 16");
        let action = Action::Conditional {
            match_any: None,
            conditions: Some(vec![
                Condition::IsSneaking { inverted: false },
                Condition::IsFlying { inverted: true },
            ]),
            if_actions: Some(vec![Action::Kill]),
            else_actions: None,
        };
        let out = generate_action(&action, &style);
        assert_eq!(
            out,
            "if (\n    isSneaking,\n    !isFlying\n) {\n    kill\n}\n"
        );
    }

    #[test]
    fn quoted_placeholder_style_wraps_amounts() {
        let style = style_from("placeholder_style = \"quoted\"");
        let action = Action::ChangeStat {
            stat: Some("kills".into()),
            op: Some(Operation::Set),
            amount: Some(Amount::Placeholder("%stat.player/deaths%".into())),
        };
        let out = generate_action(&action, &style);
        assert_eq!(out, "stat kills = \"%stat.player/deaths%\"\n");
    }

    mod props {
        use proptest::prelude::*;

        use super::*;

        fn stat_name() -> impl Strategy<Value = String> {
            "[a-zA-Z][a-zA-Z0-9_]{0,15}"
        }

        fn operation() -> impl Strategy<Value = Operation> {
            prop_oneof![
                Just(Operation::Set),
                Just(Operation::Increment),
                Just(Operation::Decrement),
                Just(Operation::Multiply),
                Just(Operation::Divide),
            ]
        }

        proptest! {
            #[test]
            fn stat_mutations_round_trip(
                stat in stat_name(),
                op in operation(),
                value in any::<i64>(),
            ) {
                let holder = ActionHolder::Unknown {
                    actions: Some(vec![Action::ChangeStat {
                        stat: Some(stat),
                        op: Some(op),
                        amount: Some(Amount::Literal(value)),
                    }]),
                };
                let src = generate(std::slice::from_ref(&holder), &style());

                let result = htsl_parser::parse(&src);
                prop_assert!(!result.has_errors(), "generated source failed to parse: {src}");
                prop_assert_eq!(result.lower(), vec![holder]);
            }

            #[test]
            fn messages_round_trip(message in "[ -~]{0,40}") {
                let holder = ActionHolder::Unknown {
                    actions: Some(vec![Action::Message {
                        message: Some(message),
                    }]),
                };
                let src = generate(std::slice::from_ref(&holder), &style());

                let result = htsl_parser::parse(&src);
                prop_assert!(!result.has_errors(), "generated source failed to parse: {src}");
                prop_assert_eq!(result.lower(), vec![holder]);
            }
        }
    }
}
