use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, Label, LabelStyle, Severity};
use crate::span::Span;

/// A single reported problem, built with a fluent API:
///
/// ```
/// use htsl_parser::error::{Diagnostic, ErrorCode};
/// use htsl_parser::span::Span;
///
/// let diag = Diagnostic::error("expected a string, found `5`")
///     .with_code(ErrorCode::UnexpectedToken)
///     .with_label(Span::new(10, 11))
///     .with_help("wrap the message in double quotes");
/// assert!(diag.severity.is_error());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: Option<ErrorCode>,
    pub message: String,
    pub labels: Vec<Label>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn bug(message: impl Into<String>) -> Self {
        Self::new(Severity::Bug, message)
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_label(mut self, span: Span) -> Self {
        self.labels.push(Label::primary(span));
        self
    }

    pub fn with_labeled_span(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span).with_message(message));
        self
    }

    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span).with_message(message));
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// The primary span, if any label was attached.
    pub fn span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.style == LabelStyle::Primary)
            .or_else(|| self.labels.first())
            .map(|label| label.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_labels() {
        let diag = Diagnostic::error("boom")
            .with_code(ErrorCode::UnexpectedToken)
            .with_label(Span::new(1, 2))
            .with_secondary_label(Span::new(5, 8), "because of this");
        assert_eq!(diag.labels.len(), 2);
        assert_eq!(diag.span(), Some(Span::new(1, 2)));
        assert_eq!(diag.code, Some(ErrorCode::UnexpectedToken));
    }

    #[test]
    fn span_falls_back_to_first_label() {
        let diag = Diagnostic::warning("w").with_secondary_label(Span::new(3, 4), "here");
        assert_eq!(diag.span(), Some(Span::new(3, 4)));
        assert_eq!(Diagnostic::error("none").span(), None);
    }
}
