//! The recursive-descent parser.
//!
//! One token of lookahead, plus a small pushback stack for the `else`
//! lookahead across a newline. Errors never abort the parse: each statement
//! (and each condition inside a list) is parsed inside a recovery scope that
//! records the diagnostic, skips to a synchronization token and leaves the
//! remaining fields of the construct in the errored state.

mod actions;
mod arguments;
mod conditions;
mod placeholders;

use htsl_core::ActionKind;

use crate::error::{Diagnostic, DiagnosticCollector, ErrorCode};
use crate::ir::{IrAction, IrActionHolder, IrHolderKind};
use crate::lexer::Lexer;
use crate::span::{Field, Span, Spanned};
use crate::tokens::{Token, TokenKind};

/// Tokens a recovery scope synchronizes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sync {
    Eol,
    Comma,
    CloseParen,
}

impl Sync {
    fn matches(&self, kind: &TokenKind) -> bool {
        match self {
            Self::Eol => matches!(kind, TokenKind::Eol),
            Self::Comma => matches!(kind, TokenKind::Comma),
            Self::CloseParen => matches!(kind, TokenKind::CloseParen),
        }
    }
}

/// Sync set for statement-level recovery.
pub(crate) const SYNC_LINE: &[Sync] = &[Sync::Eol];
/// Sync set for recovery inside a condition list.
pub(crate) const SYNC_CONDITION: &[Sync] = &[Sync::Comma, Sync::CloseParen, Sync::Eol];

/// Marks every still-absent field as errored at the given span.
macro_rules! mark_errored {
    ($span:expr, $($field:ident),+ $(,)?) => {
        $($field.mark_errored($span);)+
    };
}
pub(crate) use mark_errored;

pub struct Parser<'src> {
    lexer: Lexer<'src>,
    pub(crate) token: Token,
    pub(crate) prev: Token,
    pushback: Vec<Token>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl<'src> Parser<'src> {
    pub fn new(src: &'src str) -> Self {
        let mut lexer = Lexer::new(src);
        let token = lexer.next_token();
        Self {
            lexer,
            token,
            prev: Token::new(TokenKind::Eof, Span::point(0)),
            pushback: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Parses the whole input into holders plus all collected diagnostics.
    pub fn parse(mut self) -> (Vec<IrActionHolder>, Vec<Diagnostic>) {
        let holders = self.parse_holders();
        let mut collector = DiagnosticCollector::new();
        collector.extend(self.lexer.take_diagnostics());
        collector.extend(self.diagnostics);
        (holders, collector.into_sorted())
    }

    // ------------------------------------------------------------------
    // Token plumbing
    // ------------------------------------------------------------------

    pub(crate) fn advance(&mut self) {
        let next = self
            .pushback
            .pop()
            .unwrap_or_else(|| self.lexer.next_token());
        self.prev = std::mem::replace(&mut self.token, next);
    }

    /// Makes `token` current again, stashing the present lookahead.
    pub(crate) fn push_back(&mut self, token: Token) {
        let current = std::mem::replace(&mut self.token, token);
        self.pushback.push(current);
    }

    pub(crate) fn at_eof(&self) -> bool {
        matches!(self.token.kind, TokenKind::Eof)
    }

    pub(crate) fn at_eol(&self) -> bool {
        matches!(self.token.kind, TokenKind::Eol)
    }

    /// End of an action's argument list.
    pub(crate) fn at_args_end(&self) -> bool {
        matches!(self.token.kind, TokenKind::Eol | TokenKind::Eof)
    }

    /// End of a condition's argument list.
    pub(crate) fn at_condition_end(&self) -> bool {
        matches!(
            self.token.kind,
            TokenKind::Comma | TokenKind::CloseParen | TokenKind::Eol | TokenKind::Eof
        )
    }

    pub(crate) fn at_ident(&self, word: &str) -> bool {
        matches!(&self.token.kind, TokenKind::Ident(name) if name == word)
    }

    pub(crate) fn eat_ident(&mut self, word: &str) -> bool {
        if self.at_ident(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if &self.token.kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_eols(&mut self) {
        while self.at_eol() {
            self.advance();
        }
    }

    pub(crate) fn unexpected(&self, expected: &str) -> Diagnostic {
        Diagnostic::error(format!(
            "expected {expected}, found {}",
            self.token.kind.describe()
        ))
        .with_code(ErrorCode::UnexpectedToken)
        .with_label(self.token.span)
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<Span, Diagnostic> {
        if &self.token.kind == kind {
            let span = self.token.span;
            self.advance();
            Ok(span)
        } else {
            Err(self.unexpected(expected))
        }
    }

    // ------------------------------------------------------------------
    // Recovery
    // ------------------------------------------------------------------

    /// Runs `f`; on error records the diagnostic, skips to a sync token and
    /// returns the span to mark unparsed fields with.
    pub(crate) fn recovering(
        &mut self,
        sync: &[Sync],
        f: impl FnOnce(&mut Self) -> Result<(), Diagnostic>,
    ) -> Option<Span> {
        match f(self) {
            Ok(()) => None,
            Err(diagnostic) => {
                log::trace!(
                    message = diagnostic.message.as_str(),
                    at = self.token.span.to_string();
                    "recovering from parse error"
                );
                self.diagnostics.push(diagnostic);
                self.recover(sync);
                Some(self.token.span)
            }
        }
    }

    fn recover(&mut self, sync: &[Sync]) {
        while !self.at_eof() && !sync.iter().any(|s| s.matches(&self.token.kind)) {
            self.advance();
        }
    }

    /// Runs `f` and wraps its result in a span covering the consumed tokens.
    pub(crate) fn spanned<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, Diagnostic>,
    ) -> Result<Spanned<T>, Diagnostic> {
        let start = self.token.span.start;
        let value = f(self)?;
        let end = self.prev.span.end.max(start);
        Ok(Spanned::new(value, Span::new(start, end)))
    }

    // ------------------------------------------------------------------
    // Holders and statements
    // ------------------------------------------------------------------

    fn parse_holders(&mut self) -> Vec<IrActionHolder> {
        let mut holders = Vec::new();
        loop {
            self.skip_eols();
            if self.at_eof() {
                break;
            }
            if self.at_ident("goto") {
                holders.push(self.parse_holder_header());
            } else {
                let start = self.token.span.start;
                let actions = self.parse_statements_until_header();
                let end = self.prev.span.end.max(start);
                holders.push(IrActionHolder {
                    kind: IrHolderKind::Unknown,
                    actions,
                    span: Span::new(start, end),
                    kw_span: Span::point(start),
                });
            }
        }
        holders
    }

    fn parse_holder_header(&mut self) -> IrActionHolder {
        let kw_span = self.token.span;
        self.advance();
        let mut name = Field::Absent;
        let mut event = Field::Absent;
        let mut is_event = false;
        let err = self.recovering(SYNC_LINE, |p| {
            match &p.token.kind {
                TokenKind::Ident(target) if target == "function" => {
                    p.advance();
                    name = Field::present(p.expect_name()?);
                }
                TokenKind::Ident(target) if target == "event" => {
                    is_event = true;
                    p.advance();
                    event = Field::present(p.expect_name()?);
                }
                _ => return Err(p.unexpected("`function` or `event`")),
            }
            Ok(())
        });
        if let Some(span) = err {
            if is_event {
                event.mark_errored(span);
            } else {
                name.mark_errored(span);
            }
        }

        let kind = if is_event {
            IrHolderKind::Event { event }
        } else {
            IrHolderKind::Function { name }
        };
        let actions = self.parse_statements_until_header();
        let end = self.prev.span.end.max(kw_span.end);
        IrActionHolder {
            kind,
            actions,
            span: Span::new(kw_span.start, end),
            kw_span,
        }
    }

    fn parse_statements_until_header(&mut self) -> Vec<IrAction> {
        let mut actions = Vec::new();
        loop {
            self.skip_eols();
            if self.at_eof() || self.at_ident("goto") {
                break;
            }
            if let Some(action) = self.parse_statement() {
                actions.push(action);
            }
        }
        actions
    }

    /// Parses the statements of a `{ ... }` block, including the braces.
    pub(crate) fn parse_block(&mut self) -> Result<Spanned<Vec<IrAction>>, Diagnostic> {
        let start = self.token.span.start;
        self.expect(&TokenKind::OpenBrace, "`{`")?;
        let mut actions = Vec::new();
        loop {
            self.skip_eols();
            if self.eat(&TokenKind::CloseBrace) {
                break;
            }
            if self.at_eof() {
                return Err(self.unexpected("`}`"));
            }
            if let Some(action) = self.parse_statement() {
                actions.push(action);
            }
        }
        let end = self.prev.span.end;
        Ok(Spanned::new(actions, Span::new(start, end)))
    }

    fn parse_statement(&mut self) -> Option<IrAction> {
        let token = self.token.clone();
        let TokenKind::Ident(word) = &token.kind else {
            let diagnostic = self.unexpected("an action keyword");
            self.diagnostics.push(diagnostic);
            self.recover(SYNC_LINE);
            return None;
        };

        let Some(kind) = ActionKind::from_keyword(word) else {
            self.diagnostics.push(
                Diagnostic::error(format!("unknown action `{word}`"))
                    .with_code(ErrorCode::UnknownAction)
                    .with_label(token.span)
                    .with_help("see the action reference for the list of keywords"),
            );
            self.recover(SYNC_LINE);
            return None;
        };

        self.advance();
        let action = self.parse_action(kind, token.span);

        // Anything left on the line after the arguments is an error.
        if !self.at_args_end() && !matches!(self.token.kind, TokenKind::CloseBrace) {
            let diagnostic = self.unexpected("end of line");
            self.diagnostics.push(diagnostic);
            self.recover(SYNC_LINE);
        }
        Some(action)
    }

    /// Span of a finished statement: keyword start through the last token.
    pub(crate) fn statement_span(&self, kw_span: Span) -> Span {
        Span::new(kw_span.start, self.prev.span.end.max(kw_span.end))
    }
}
