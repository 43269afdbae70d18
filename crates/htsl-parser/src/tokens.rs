//! Token definitions.

use std::fmt;

use crate::span::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Str(String),
    /// Placeholder contents without the surrounding `%` pair.
    Placeholder(String),
    Int(i64),
    Float(f64),

    Plus,
    PlusAssign,
    Minus,
    MinusAssign,
    Star,
    StarStar,
    StarAssign,
    Slash,
    SlashAssign,
    Assign,
    EqEq,
    Lt,
    Le,
    Gt,
    Ge,
    Not,

    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Comma,

    Eol,
    Eof,
}

impl TokenKind {
    /// The operator's source spelling, for operator-family tokens.
    pub fn op_str(&self) -> Option<&'static str> {
        match self {
            Self::Plus => Some("+"),
            Self::PlusAssign => Some("+="),
            Self::Minus => Some("-"),
            Self::MinusAssign => Some("-="),
            Self::Star => Some("*"),
            Self::StarStar => Some("**"),
            Self::StarAssign => Some("*="),
            Self::Slash => Some("/"),
            Self::SlashAssign => Some("/="),
            Self::Assign => Some("="),
            Self::EqEq => Some("=="),
            Self::Lt => Some("<"),
            Self::Le => Some("<="),
            Self::Gt => Some(">"),
            Self::Ge => Some(">="),
            _ => None,
        }
    }

    /// A short description used in "expected X, found Y" messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Ident(name) => format!("`{name}`"),
            Self::Str(_) => "a string".to_string(),
            Self::Placeholder(_) => "a placeholder".to_string(),
            Self::Int(value) => format!("`{value}`"),
            Self::Float(value) => format!("`{value}`"),
            Self::OpenParen => "`(`".to_string(),
            Self::CloseParen => "`)`".to_string(),
            Self::OpenBrace => "`{`".to_string(),
            Self::CloseBrace => "`}`".to_string(),
            Self::OpenBracket => "`[`".to_string(),
            Self::CloseBracket => "`]`".to_string(),
            Self::Comma => "`,`".to_string(),
            Self::Not => "`!`".to_string(),
            Self::Eol => "end of line".to_string(),
            Self::Eof => "end of input".to_string(),
            other => match other.op_str() {
                Some(op) => format!("`{op}`"),
                None => "token".to_string(),
            },
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_spellings() {
        assert_eq!(TokenKind::PlusAssign.op_str(), Some("+="));
        assert_eq!(TokenKind::Ge.op_str(), Some(">="));
        assert_eq!(TokenKind::Comma.op_str(), None);
    }

    #[test]
    fn describe_names_idents() {
        assert_eq!(TokenKind::Ident("kill".to_string()).describe(), "`kill`");
        assert_eq!(TokenKind::Eol.describe(), "end of line");
    }
}
