//! The lexer.
//!
//! A single-pass cursor over the source text. The lexer never fails: invalid
//! input produces a diagnostic and scanning continues, so the parser always
//! sees a terminated token stream. Newlines are significant and lex as
//! [`TokenKind::Eol`].

use crate::error::{Diagnostic, ErrorCode};
use crate::span::Span;
use crate::tokens::{Token, TokenKind};

pub struct Lexer<'src> {
    src: &'src str,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Diagnostics produced so far. Call after the parse loop finishes.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.src[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn bump_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, Span::new(start, self.pos))
    }

    /// Produces the next token, emitting diagnostics for invalid input.
    pub fn next_token(&mut self) -> Token {
        loop {
            let start = self.pos;
            let Some(c) = self.bump() else {
                return Token::new(TokenKind::Eof, Span::point(self.pos));
            };

            match c {
                ' ' | '\t' | '\r' => continue,
                '\n' => return self.token(TokenKind::Eol, start),

                '/' => match self.peek() {
                    Some('/') => {
                        while let Some(c) = self.peek() {
                            if c == '\n' {
                                break;
                            }
                            self.bump();
                        }
                        continue;
                    }
                    Some('*') => {
                        self.bump();
                        self.skip_block_comment(start);
                        continue;
                    }
                    Some('=') => {
                        self.bump();
                        return self.token(TokenKind::SlashAssign, start);
                    }
                    _ => return self.token(TokenKind::Slash, start),
                },

                '(' => return self.token(TokenKind::OpenParen, start),
                ')' => return self.token(TokenKind::CloseParen, start),
                '{' => return self.token(TokenKind::OpenBrace, start),
                '}' => return self.token(TokenKind::CloseBrace, start),
                '[' => return self.token(TokenKind::OpenBracket, start),
                ']' => return self.token(TokenKind::CloseBracket, start),
                ',' => return self.token(TokenKind::Comma, start),
                '!' => return self.token(TokenKind::Not, start),

                '+' => {
                    let kind = if self.bump_if('=') {
                        TokenKind::PlusAssign
                    } else {
                        TokenKind::Plus
                    };
                    return self.token(kind, start);
                }
                '-' => {
                    if self.bump_if('=') {
                        return self.token(TokenKind::MinusAssign, start);
                    }
                    if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                        return self.lex_number(start);
                    }
                    return self.token(TokenKind::Minus, start);
                }
                '*' => {
                    let kind = if self.bump_if('*') {
                        TokenKind::StarStar
                    } else if self.bump_if('=') {
                        TokenKind::StarAssign
                    } else {
                        TokenKind::Star
                    };
                    return self.token(kind, start);
                }
                '=' => {
                    let kind = if self.bump_if('=') {
                        TokenKind::EqEq
                    } else {
                        TokenKind::Assign
                    };
                    return self.token(kind, start);
                }
                '<' => {
                    let kind = if self.bump_if('=') {
                        TokenKind::Le
                    } else {
                        TokenKind::Lt
                    };
                    return self.token(kind, start);
                }
                '>' => {
                    let kind = if self.bump_if('=') {
                        TokenKind::Ge
                    } else {
                        TokenKind::Gt
                    };
                    return self.token(kind, start);
                }

                '"' => return self.lex_string(start),
                '%' => return self.lex_placeholder(start),

                c if c.is_ascii_digit() => return self.lex_number(start),
                c if c.is_ascii_alphabetic() || c == '_' => return self.lex_ident(start),

                c => {
                    self.diagnostics.push(
                        Diagnostic::error(format!("unknown character `{c}`"))
                            .with_code(ErrorCode::UnknownCharacter)
                            .with_label(Span::new(start, self.pos)),
                    );
                    continue;
                }
            }
        }
    }

    fn skip_block_comment(&mut self, start: usize) {
        let mut depth = 1usize;
        while depth > 0 {
            match self.bump() {
                Some('/') if self.bump_if('*') => depth += 1,
                Some('*') if self.bump_if('/') => depth -= 1,
                Some(_) => {}
                None => {
                    self.diagnostics.push(
                        Diagnostic::error("unterminated block comment")
                            .with_code(ErrorCode::UnterminatedComment)
                            .with_label(Span::new(start, start + 2)),
                    );
                    return;
                }
            }
        }
    }

    fn lex_string(&mut self, start: usize) -> Token {
        let mut value = String::new();
        loop {
            match self.peek() {
                Some('"') => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    self.bump();
                    if let Some(escaped) = self.bump() {
                        value.push(escaped);
                    }
                }
                Some('\n') | None => {
                    self.diagnostics.push(
                        Diagnostic::error("unterminated string")
                            .with_code(ErrorCode::UnterminatedString)
                            .with_label(Span::new(start, self.pos)),
                    );
                    break;
                }
                Some(c) => {
                    self.bump();
                    value.push(c);
                }
            }
        }
        self.token(TokenKind::Str(value), start)
    }

    fn lex_placeholder(&mut self, start: usize) -> Token {
        let mut value = String::new();
        loop {
            match self.peek() {
                Some('%') => {
                    self.bump();
                    break;
                }
                Some('\n') | None => {
                    self.diagnostics.push(
                        Diagnostic::error("unterminated placeholder")
                            .with_code(ErrorCode::UnterminatedPlaceholder)
                            .with_label(Span::new(start, self.pos)),
                    );
                    break;
                }
                Some(c) => {
                    self.bump();
                    value.push(c);
                }
            }
        }
        self.token(TokenKind::Placeholder(value), start)
    }

    fn lex_number(&mut self, start: usize) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        let is_float = self.peek() == Some('.')
            && self.peek_second().is_some_and(|c| c.is_ascii_digit());
        if is_float {
            self.bump();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.bump();
            }
            let value = self.src[start..self.pos].parse::<f64>().unwrap_or_default();
            return self.token(TokenKind::Float(value), start);
        }

        let text = &self.src[start..self.pos];
        let value = match text.parse::<i64>() {
            Ok(value) => value,
            Err(_) => {
                let clamped = if text.starts_with('-') { i64::MIN } else { i64::MAX };
                self.diagnostics.push(
                    Diagnostic::error(format!("integer `{text}` does not fit in 64 bits"))
                        .with_code(ErrorCode::IntegerOverflow)
                        .with_label(Span::new(start, self.pos))
                        .with_help(format!("values are clamped to {clamped}")),
                );
                clamped
            }
        };
        self.token(TokenKind::Int(value), start)
    }

    fn lex_ident(&mut self, start: usize) -> Token {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.bump();
            } else if c == '/' {
                // Identifiers may contain `/` (e.g. stat paths), but a
                // doubled slash starts a comment.
                match self.peek_second() {
                    Some(next) if next.is_ascii_alphanumeric() || next == '_' => {
                        self.bump();
                    }
                    _ => break,
                }
            } else {
                break;
            }
        }
        let text = self.src[start..self.pos].to_string();
        self.token(TokenKind::Ident(text), start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(src: &str) -> (Vec<TokenKind>, Vec<Diagnostic>) {
        let mut lexer = Lexer::new(src);
        let mut kinds = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = token.kind == TokenKind::Eof;
            kinds.push(token.kind);
            if done {
                break;
            }
        }
        (kinds, lexer.take_diagnostics())
    }

    #[test]
    fn lexes_a_chat_action() {
        let (kinds, diags) = lex_all("chat \"Hello\"");
        assert!(diags.is_empty());
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident("chat".to_string()),
                TokenKind::Str("Hello".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_compound_operators() {
        let (kinds, diags) = lex_all("+= -= *= /= ** == <= >= < > =");
        assert!(diags.is_empty());
        assert_eq!(
            kinds,
            vec![
                TokenKind::PlusAssign,
                TokenKind::MinusAssign,
                TokenKind::StarAssign,
                TokenKind::SlashAssign,
                TokenKind::StarStar,
                TokenKind::EqEq,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Assign,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn spans_track_byte_offsets() {
        let mut lexer = Lexer::new("stat kills");
        let first = lexer.next_token();
        assert_eq!(first.span, Span::new(0, 4));
        let second = lexer.next_token();
        assert_eq!(second.span, Span::new(5, 10));
    }

    #[test]
    fn nested_block_comments() {
        let (kinds, diags) = lex_all("kill /* outer /* inner */ still outer */ exit");
        assert!(diags.is_empty());
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident("kill".to_string()),
                TokenKind::Ident("exit".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unterminated_block_comment_reports() {
        let (_, diags) = lex_all("kill /* never closed");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, Some(ErrorCode::UnterminatedComment));
    }

    #[test]
    fn line_comments_run_to_eol() {
        let (kinds, diags) = lex_all("kill // the rest is ignored\nexit");
        assert!(diags.is_empty());
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident("kill".to_string()),
                TokenKind::Eol,
                TokenKind::Ident("exit".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn string_escapes() {
        let (kinds, _) = lex_all(r#""say \"hi\" \\ done""#);
        assert_eq!(
            kinds[0],
            TokenKind::Str("say \"hi\" \\ done".to_string())
        );
    }

    #[test]
    fn unterminated_string_recovers_at_eol() {
        let (kinds, diags) = lex_all("chat \"oops\nkill");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, Some(ErrorCode::UnterminatedString));
        assert_eq!(kinds[1], TokenKind::Str("oops".to_string()));
        assert_eq!(kinds[2], TokenKind::Eol);
    }

    #[test]
    fn placeholders_strip_their_delimiters() {
        let (kinds, diags) = lex_all("%stat.player/kills%");
        assert!(diags.is_empty());
        assert_eq!(
            kinds[0],
            TokenKind::Placeholder("stat.player/kills".to_string())
        );
    }

    #[test]
    fn integer_overflow_is_clamped() {
        let (kinds, diags) = lex_all("99999999999999999999");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, Some(ErrorCode::IntegerOverflow));
        assert_eq!(kinds[0], TokenKind::Int(i64::MAX));

        let (kinds, diags) = lex_all("-99999999999999999999");
        assert_eq!(diags.len(), 1);
        assert_eq!(kinds[0], TokenKind::Int(i64::MIN));
    }

    #[test]
    fn negative_and_float_literals() {
        let (kinds, diags) = lex_all("-5 0.5 3.25");
        assert!(diags.is_empty());
        assert_eq!(kinds[0], TokenKind::Int(-5));
        assert_eq!(kinds[1], TokenKind::Float(0.5));
        assert_eq!(kinds[2], TokenKind::Float(3.25));
    }

    #[test]
    fn ident_with_slash_path() {
        let (kinds, _) = lex_all("team/red");
        assert_eq!(kinds[0], TokenKind::Ident("team/red".to_string()));
    }

    #[test]
    fn ident_followed_by_comment() {
        let (kinds, diags) = lex_all("kill// trailing");
        assert!(diags.is_empty());
        assert_eq!(kinds[0], TokenKind::Ident("kill".to_string()));
        assert_eq!(kinds[1], TokenKind::Eof);
    }

    #[test]
    fn unknown_character_skips_and_continues() {
        let (kinds, diags) = lex_all("kill @ exit");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, Some(ErrorCode::UnknownCharacter));
        assert_eq!(kinds.len(), 3);
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        fn ident_strategy() -> impl Strategy<Value = String> {
            "[a-zA-Z_][a-zA-Z0-9_]{0,20}"
        }

        proptest! {
            #[test]
            fn identifiers_lex_cleanly(ident in ident_strategy()) {
                let (kinds, diags) = lex_all(&ident);
                prop_assert!(diags.is_empty());
                prop_assert_eq!(kinds.len(), 2);
                prop_assert_eq!(&kinds[0], &TokenKind::Ident(ident));
            }

            #[test]
            fn integers_round_trip(value in any::<i64>()) {
                let (kinds, diags) = lex_all(&value.to_string());
                prop_assert!(diags.is_empty());
                prop_assert_eq!(&kinds[0], &TokenKind::Int(value));
            }

            #[test]
            fn lexer_terminates_on_arbitrary_input(src in "\\PC{0,100}") {
                let mut lexer = Lexer::new(&src);
                for _ in 0..src.len() + 1 {
                    if lexer.next_token().kind == TokenKind::Eof {
                        return Ok(());
                    }
                }
                prop_assert_eq!(lexer.next_token().kind, TokenKind::Eof);
            }
        }
    }
}
