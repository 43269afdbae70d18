//! Text edits and patch application.

use htsl_parser::Span;

/// A single replacement: `span` in the original text becomes `text`.
/// Insertions use an empty span, deletions an empty `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub span: Span,
    pub text: String,
}

impl TextEdit {
    pub fn replace(span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(Span::point(at), text)
    }

    pub fn delete(span: Span) -> Self {
        Self::replace(span, "")
    }
}

/// Applies non-overlapping edits to `src` in one pass.
pub fn apply(src: &str, mut edits: Vec<TextEdit>) -> String {
    edits.sort_by_key(|edit| (edit.span.start, edit.span.end));
    let mut out = String::with_capacity(src.len());
    let mut cursor = 0;
    for edit in edits {
        let start = edit.span.start.max(cursor);
        out.push_str(&src[cursor..start]);
        out.push_str(&edit.text);
        cursor = edit.span.end.max(start);
    }
    out.push_str(&src[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_apply_in_position_order() {
        let src = "kill\nheal\n";
        let edits = vec![
            TextEdit::delete(Span::new(0, 5)),
            TextEdit::insert(10, "exit\n"),
        ];
        assert_eq!(apply(src, edits), "heal\nexit\n");
    }

    #[test]
    fn replacement_keeps_surrounding_text() {
        let src = "stat kills += 1";
        let edits = vec![TextEdit::replace(Span::new(14, 15), "5")];
        assert_eq!(apply(src, edits), "stat kills += 5");
    }

    #[test]
    fn insertion_at_the_same_point_preserves_order() {
        let src = "ab";
        let edits = vec![TextEdit::insert(1, "x"), TextEdit::insert(1, "y")];
        let out = apply(src, edits);
        assert_eq!(out, "axyb");
    }
}
