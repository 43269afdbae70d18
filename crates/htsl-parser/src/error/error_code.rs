use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable codes for every diagnostic the front-end can emit.
///
/// Codes are grouped by phase: `E0xx` lexer, `E1xx` parser, `E2xx`
/// validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Lexer
    UnknownCharacter,
    UnterminatedString,
    UnterminatedComment,
    UnterminatedPlaceholder,
    IntegerOverflow,

    // Parser
    UnexpectedToken,
    UnknownAction,
    UnknownCondition,
    InvalidArgument,
    ValueOutOfRange,
    InvalidStatName,
    InvalidPlaceholder,
    InvalidCoordinates,

    // Validation
    LimitExceeded,
    IllegalNesting,
    InvalidEventContext,
    MisplacedExit,
    FunctionCooldown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownCharacter => "E001",
            Self::UnterminatedString => "E002",
            Self::UnterminatedComment => "E003",
            Self::UnterminatedPlaceholder => "E004",
            Self::IntegerOverflow => "E005",
            Self::UnexpectedToken => "E100",
            Self::UnknownAction => "E101",
            Self::UnknownCondition => "E102",
            Self::InvalidArgument => "E103",
            Self::ValueOutOfRange => "E104",
            Self::InvalidStatName => "E105",
            Self::InvalidPlaceholder => "E106",
            Self::InvalidCoordinates => "E107",
            Self::LimitExceeded => "E200",
            Self::IllegalNesting => "E201",
            Self::InvalidEventContext => "E202",
            Self::MisplacedExit => "E203",
            Self::FunctionCooldown => "E204",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::UnknownCharacter => "the source contains a character outside the language",
            Self::UnterminatedString => "a string literal runs to the end of the input",
            Self::UnterminatedComment => "a block comment is never closed",
            Self::UnterminatedPlaceholder => "a placeholder is missing its closing `%`",
            Self::IntegerOverflow => "an integer literal does not fit in 64 bits",
            Self::UnexpectedToken => "the parser found a token it did not expect",
            Self::UnknownAction => "the keyword does not name an action",
            Self::UnknownCondition => "the keyword does not name a condition",
            Self::InvalidArgument => "the argument is not one of the accepted values",
            Self::ValueOutOfRange => "the numeric argument is outside its allowed range",
            Self::InvalidStatName => "stat names are 1-16 characters without spaces",
            Self::InvalidPlaceholder => "the placeholder name or its arguments are invalid",
            Self::InvalidCoordinates => "the coordinate expression is malformed",
            Self::LimitExceeded => "too many actions of one kind in a single scope",
            Self::IllegalNesting => "conditionals and random actions cannot nest inside each other",
            Self::InvalidEventContext => "the action or condition requires a specific event",
            Self::MisplacedExit => "exit is only meaningful inside a conditional",
            Self::FunctionCooldown => "a re-triggered function will be skipped by its cooldown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_grouped_by_phase() {
        assert!(ErrorCode::UnknownCharacter.as_str().starts_with("E0"));
        assert!(ErrorCode::UnexpectedToken.as_str().starts_with("E1"));
        assert!(ErrorCode::LimitExceeded.as_str().starts_with("E2"));
    }

    #[test]
    fn every_code_has_a_description() {
        for code in [
            ErrorCode::UnknownCharacter,
            ErrorCode::IntegerOverflow,
            ErrorCode::InvalidPlaceholder,
            ErrorCode::FunctionCooldown,
        ] {
            assert!(!code.description().is_empty());
        }
    }
}
