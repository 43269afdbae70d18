use crate::error::Diagnostic;

/// A failed parse, carrying every diagnostic that was collected.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}{}", first_message(diagnostics), more_suffix(diagnostics))]
pub struct ParseError {
    pub diagnostics: Vec<Diagnostic>,
}

fn first_message(diagnostics: &[Diagnostic]) -> &str {
    diagnostics
        .first()
        .map(|d| d.message.as_str())
        .unwrap_or("parse failed")
}

fn more_suffix(diagnostics: &[Diagnostic]) -> String {
    match diagnostics.len() {
        0 | 1 => String::new(),
        n => format!(" (+{} more)", n - 1),
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_summarizes_extra_diagnostics() {
        let err = ParseError::from(vec![
            Diagnostic::error("first problem"),
            Diagnostic::error("second problem"),
            Diagnostic::warning("third problem"),
        ]);
        assert_eq!(err.to_string(), "first problem (+2 more)");

        let single = ParseError::from(Diagnostic::error("only problem"));
        assert_eq!(single.to_string(), "only problem");
    }
}
