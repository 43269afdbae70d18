//! Bridges [`HtslError`] and [`Diagnostic`] to miette's report types.
//!
//! The core crates stay free of miette; this adapter is the only place the
//! CLI converts structured diagnostics into rich terminal reports. A parse
//! failure carrying several diagnostics is rendered as several independent
//! reports.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use htsl::HtslError;
use htsl_parser::Span;
use htsl_parser::error::{Diagnostic, LabelStyle, Severity};

/// Adapter for a single diagnostic plus the source it points into.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.diag.message)
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code
            .map(|code| Box::new(code) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diag.severity {
            Severity::Info => miette::Severity::Advice,
            Severity::Warning => miette::Severity::Warning,
            Severity::Error | Severity::Bug => miette::Severity::Error,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.diag.labels.is_empty() {
            return None;
        }

        Some(Box::new(self.diag.labels.iter().map(|label| {
            let span = span_to_miette(label.span);
            let message = label.message.clone();
            match label.style {
                LabelStyle::Primary => LabeledSpan::new_primary_with_span(message, span),
                LabelStyle::Secondary => LabeledSpan::new_with_span(message, span),
            }
        })))
    }
}

/// Adapter for [`HtslError`] variants with no diagnostic payload.
pub struct ErrorAdapter<'a>(pub &'a HtslError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            HtslError::Io(_) => "htsl::io",
            HtslError::Parse { .. } => return None,
        };
        Some(Box::new(code))
    }
}

/// A reportable error that miette can render, either a rich diagnostic or
/// a plain error.
#[derive(Debug)]
pub enum Reportable<'a> {
    Diagnostic(DiagnosticAdapter<'a>),
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start.into(), span.len())
}

/// One [`Reportable`] per diagnostic for parse failures, a single one for
/// everything else.
pub fn to_reportables(err: &HtslError) -> Vec<Reportable<'_>> {
    match err {
        HtslError::Parse {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use htsl_parser::error::{ErrorCode, ParseError};

    use super::*;

    #[test]
    fn parse_error_yields_one_reportable_per_diagnostic() {
        let diags = vec![
            Diagnostic::error("first problem")
                .with_code(ErrorCode::UnexpectedToken)
                .with_labeled_span(Span::new(0, 4), "here"),
            Diagnostic::warning("second problem").with_label(Span::new(5, 9)),
        ];
        let err = HtslError::new_parse_error(ParseError::from(diags), "kill heal");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "first problem");
        assert_eq!(
            reportables[1].severity(),
            Some(miette::Severity::Warning)
        );
    }

    #[test]
    fn io_error_yields_plain_reportable() {
        let err = HtslError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        assert_eq!(reportables[0].code().map(|c| c.to_string()).as_deref(), Some("htsl::io"));
        assert!(reportables[0].labels().is_none());
    }

    #[test]
    fn diagnostic_adapter_maps_labels_and_help() {
        let diag = Diagnostic::error("expected a string")
            .with_code(ErrorCode::UnexpectedToken)
            .with_labeled_span(Span::new(0, 4), "this token")
            .with_help("wrap the value in quotes");
        let adapter = DiagnosticAdapter::new(&diag, "kill");

        assert_eq!(adapter.code().map(|c| c.to_string()).as_deref(), Some("E100"));
        assert_eq!(
            adapter.help().map(|h| h.to_string()).as_deref(),
            Some("wrap the value in quotes")
        );
        let labels: Vec<_> = adapter.labels().into_iter().flatten().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
    }
}
