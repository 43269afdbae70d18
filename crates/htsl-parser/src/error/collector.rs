use crate::error::Diagnostic;

/// Accumulates diagnostics across compilation phases.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        log::debug!(
            severity = diagnostic.severity.to_string(),
            message = diagnostic.message.as_str();
            "collected diagnostic"
        );
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.push(diagnostic);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Consumes the collector, sorting by primary span position.
    pub fn into_sorted(mut self) -> Vec<Diagnostic> {
        self.diagnostics
            .sort_by_key(|d| d.span().map(|s| (s.start, s.end)).unwrap_or((usize::MAX, 0)));
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    #[test]
    fn sorts_by_span_start() {
        let mut collector = DiagnosticCollector::new();
        collector.push(Diagnostic::error("late").with_label(Span::new(20, 22)));
        collector.push(Diagnostic::warning("early").with_label(Span::new(3, 5)));
        let sorted = collector.into_sorted();
        assert_eq!(sorted[0].message, "early");
        assert_eq!(sorted[1].message, "late");
    }

    #[test]
    fn tracks_errors() {
        let mut collector = DiagnosticCollector::new();
        collector.push(Diagnostic::warning("only a warning"));
        assert!(!collector.has_errors());
        collector.push(Diagnostic::error("now an error"));
        assert!(collector.has_errors());
        assert_eq!(collector.len(), 2);
    }
}
