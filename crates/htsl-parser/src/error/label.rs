use serde::{Deserialize, Serialize};

use crate::span::Span;

/// Whether a label points at the main location or a supporting one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelStyle {
    Primary,
    Secondary,
}

/// A span annotation attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub style: LabelStyle,
    pub span: Span,
    pub message: Option<String>,
}

impl Label {
    pub fn primary(span: Span) -> Self {
        Self {
            style: LabelStyle::Primary,
            span,
            message: None,
        }
    }

    pub fn secondary(span: Span) -> Self {
        Self {
            style: LabelStyle::Secondary,
            span,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
