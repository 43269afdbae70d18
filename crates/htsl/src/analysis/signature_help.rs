//! Signature help for the statement under the cursor.

use htsl_core::SemanticKind;

/// A rendered signature with the active parameter highlighted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHelp {
    /// Full signature, e.g. `applyPotion <effect> <duration> <level> ...`.
    pub label: String,
    /// Parameter names in positional order.
    pub parameters: Vec<&'static str>,
    /// Index into `parameters` for the argument the cursor is on.
    pub active: Option<usize>,
}

/// Signature help for the action or condition at `offset` in `src`.
pub fn signature_help(src: &str, offset: usize) -> Option<SignatureHelp> {
    let result = htsl_parser::parse(src);
    let action = super::action_on_line(src, &result.holders, offset)?;

    if let Some(condition) = super::condition_at(action, offset) {
        let fields = condition.fields();
        let spans: Vec<_> = fields
            .iter()
            .skip(1) // inversion marker
            .map(|field| field.field.span())
            .collect();
        let parameters: Vec<&'static str> =
            fields.iter().skip(1).map(|field| field.name).collect();
        let mut inverted_kw = String::new();
        if condition.inverted.value {
            inverted_kw.push('!');
        }
        return Some(SignatureHelp {
            label: format!(
                "{inverted_kw}{}{}",
                condition.condition_kind().keyword(),
                render_params(&parameters)
            ),
            active: active_param(&spans, offset),
            parameters,
        });
    }

    let fields = action.fields();
    let mut parameters = Vec::new();
    let mut spans = Vec::new();
    for field in &fields {
        if matches!(field.kind, SemanticKind::Actions | SemanticKind::Conditions) {
            continue;
        }
        parameters.push(field.name);
        spans.push(field.field.span());
    }
    Some(SignatureHelp {
        label: format!(
            "{}{}",
            action.action_kind().keyword(),
            render_params(&parameters)
        ),
        active: active_param(&spans, offset),
        parameters,
    })
}

fn render_params(parameters: &[&'static str]) -> String {
    let mut out = String::new();
    for name in parameters {
        out.push_str(" <");
        out.push_str(name);
        out.push('>');
    }
    out
}

/// The parameter whose written argument covers `offset`, or the next one to
/// be typed.
fn active_param(spans: &[Option<htsl_parser::Span>], offset: usize) -> Option<usize> {
    for (index, span) in spans.iter().enumerate() {
        match span {
            Some(span) if span.touches(offset) => return Some(index),
            Some(span) if span.start > offset => return Some(index),
            Some(_) => {}
            None => return Some(index),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_signature_lists_parameters() {
        let src = "applyPotion speed 600";
        let help = signature_help(src, src.len()).unwrap();
        assert_eq!(
            help.label,
            "applyPotion <effect> <duration> <level> <override_existing> <show_icon>"
        );
        assert_eq!(help.parameters.len(), 5);
    }

    #[test]
    fn active_parameter_tracks_the_cursor() {
        let src = "applyPotion speed 600";
        // On "speed".
        let help = signature_help(src, 13).unwrap();
        assert_eq!(help.active, Some(0));
        // On "600".
        let help = signature_help(src, 19).unwrap();
        assert_eq!(help.active, Some(1));
    }

    #[test]
    fn next_absent_parameter_is_active() {
        let src = "pause ";
        let help = signature_help(src, 6).unwrap();
        assert_eq!(help.label, "pause <ticks>");
        assert_eq!(help.active, Some(0));
    }

    #[test]
    fn condition_signature_inside_a_list() {
        let src = "if (hasGroup \"vip\") {\n}";
        let help = signature_help(src, 15).unwrap();
        assert_eq!(help.label, "hasGroup <group> <include_higher_groups>");
        assert_eq!(help.active, Some(0));
    }

    #[test]
    fn no_help_outside_any_statement() {
        assert!(signature_help("", 0).is_none());
    }
}
