use std::fmt;

use serde::{Deserialize, Serialize};

/// How serious a diagnostic is.
///
/// `Bug` marks internal invariant violations surfaced as diagnostics instead
/// of panics; compilation treats it like an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Bug,
}

impl Severity {
    /// True when this severity should fail compilation.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error | Self::Bug)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Bug => "bug",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_and_bug_fail_compilation() {
        assert!(Severity::Error.is_error());
        assert!(Severity::Bug.is_error());
        assert!(!Severity::Warning.is_error());
        assert!(!Severity::Info.is_error());
    }
}
