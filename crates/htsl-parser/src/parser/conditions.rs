//! Condition list and per-condition argument parsers.
//!
//! Conditions live inside the parenthesized list of an `if` statement. A
//! failed condition synchronizes on the next `,` or `)` so its siblings
//! still parse.

use htsl_core::arguments::{ItemAmount, ItemLocation, ItemProperty, Permission, PotionEffect};
use htsl_core::ConditionKind;

use crate::error::{Diagnostic, ErrorCode};
use crate::ir::{IrCondition, IrConditionKind};
use crate::parser::{mark_errored, placeholders, Parser, SYNC_CONDITION};
use crate::span::{Field, Span, Spanned};
use crate::tokens::TokenKind;

impl Parser<'_> {
    /// Parses `( cond, cond, ... )`, including the parentheses.
    pub(crate) fn parse_condition_list(
        &mut self,
    ) -> Result<Spanned<Vec<IrCondition>>, Diagnostic> {
        let start = self.token.span.start;
        self.expect(&TokenKind::OpenParen, "`(`")?;
        let mut conditions = Vec::new();
        loop {
            self.skip_eols();
            if self.eat(&TokenKind::CloseParen) {
                break;
            }
            if self.at_eof() {
                return Err(self.unexpected("`)`"));
            }
            if let Some(condition) = self.parse_condition_statement() {
                conditions.push(condition);
            }
            self.skip_eols();
            if self.eat(&TokenKind::Comma) {
                continue;
            }
            if self.eat(&TokenKind::CloseParen) {
                break;
            }
            if self.at_eof() {
                return Err(self.unexpected("`)`"));
            }
            let diagnostic = self.unexpected("`,` or `)`");
            self.diagnostics.push(diagnostic);
            self.recover(SYNC_CONDITION);
            self.eat(&TokenKind::Comma);
        }
        let end = self.prev.span.end;
        Ok(Spanned::new(conditions, Span::new(start, end)))
    }

    /// One condition: an optional `!`, a keyword, then its arguments.
    fn parse_condition_statement(&mut self) -> Option<IrCondition> {
        let not_span = if matches!(self.token.kind, TokenKind::Not) {
            let span = self.token.span;
            self.advance();
            Some(span)
        } else {
            None
        };

        let token = self.token.clone();
        let TokenKind::Ident(word) = &token.kind else {
            let diagnostic = self.unexpected("a condition keyword");
            self.diagnostics.push(diagnostic);
            self.recover(SYNC_CONDITION);
            return None;
        };

        let Some(kind) = ConditionKind::from_keyword(word) else {
            self.diagnostics.push(
                Diagnostic::error(format!("unknown condition `{word}`"))
                    .with_code(ErrorCode::UnknownCondition)
                    .with_label(token.span)
                    .with_help("see the condition reference for the list of keywords"),
            );
            self.recover(SYNC_CONDITION);
            return None;
        };

        self.advance();
        let ir_kind = self.parse_condition(kind);

        let start = not_span.map(|s| s.start).unwrap_or(token.span.start);
        let end = self.prev.span.end.max(token.span.end);
        let inverted = Spanned::new(
            not_span.is_some(),
            not_span.unwrap_or_else(|| Span::point(token.span.start)),
        );
        Some(IrCondition {
            kind: ir_kind,
            inverted,
            span: Span::new(start, end),
            kw_span: token.span,
        })
    }

    fn parse_condition(&mut self, kind: ConditionKind) -> IrConditionKind {
        match kind {
            ConditionKind::RequireGroup => self.parse_require_group(),
            ConditionKind::CompareStat => {
                let (stat, op, amount) = self.parse_stat_comparison();
                IrConditionKind::CompareStat { stat, op, amount }
            }
            ConditionKind::CompareGlobalStat => {
                let (stat, op, amount) = self.parse_stat_comparison();
                IrConditionKind::CompareGlobalStat { stat, op, amount }
            }
            ConditionKind::CompareTeamStat => self.parse_compare_team_stat(),
            ConditionKind::RequirePermission => self.parse_require_permission(),
            ConditionKind::IsInRegion => self.parse_in_region(),
            ConditionKind::RequireItem => self.parse_require_item(),
            ConditionKind::IsDoingParkour => IrConditionKind::IsDoingParkour,
            ConditionKind::RequirePotionEffect => self.parse_require_potion(),
            ConditionKind::IsSneaking => IrConditionKind::IsSneaking,
            ConditionKind::IsFlying => IrConditionKind::IsFlying,
            ConditionKind::CompareHealth => {
                let (op, amount) = self.parse_comparison_tail();
                IrConditionKind::CompareHealth { op, amount }
            }
            ConditionKind::CompareMaxHealth => {
                let (op, amount) = self.parse_comparison_tail();
                IrConditionKind::CompareMaxHealth { op, amount }
            }
            ConditionKind::CompareHunger => {
                let (op, amount) = self.parse_comparison_tail();
                IrConditionKind::CompareHunger { op, amount }
            }
            ConditionKind::RequireGamemode => self.parse_require_gamemode(),
            ConditionKind::ComparePlaceholder => self.parse_compare_placeholder(),
            ConditionKind::RequireTeam => self.parse_require_team(),
            ConditionKind::CompareDamage => {
                let (op, amount) = self.parse_comparison_tail();
                IrConditionKind::CompareDamage { op, amount }
            }
        }
    }

    fn parse_require_group(&mut self) -> IrConditionKind {
        let mut group = Field::Absent;
        let mut include_higher_groups = Field::Absent;
        let err = self.recovering(SYNC_CONDITION, |p| {
            group = Field::present(p.expect_name()?);
            if p.at_condition_end() {
                return Ok(());
            }
            include_higher_groups = Field::present(p.expect_bool()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, group, include_higher_groups);
        }
        IrConditionKind::RequireGroup {
            group,
            include_higher_groups,
        }
    }

    /// Shared `<stat> <cmp> <amount>` tail.
    fn parse_stat_comparison(
        &mut self,
    ) -> (
        Field<String>,
        Field<htsl_core::Comparison>,
        Field<htsl_core::Amount>,
    ) {
        let mut stat = Field::Absent;
        let mut op = Field::Absent;
        let mut amount = Field::Absent;
        let err = self.recovering(SYNC_CONDITION, |p| {
            stat = Field::present(p.expect_stat_name()?);
            op = Field::present(p.expect_comparison()?);
            amount = Field::present(p.expect_amount()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, stat, op, amount);
        }
        (stat, op, amount)
    }

    fn parse_compare_team_stat(&mut self) -> IrConditionKind {
        let mut stat = Field::Absent;
        let mut team = Field::Absent;
        let mut op = Field::Absent;
        let mut amount = Field::Absent;
        let err = self.recovering(SYNC_CONDITION, |p| {
            stat = Field::present(p.expect_stat_name()?);
            team = Field::present(p.expect_name()?);
            op = Field::present(p.expect_comparison()?);
            amount = Field::present(p.expect_amount()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, stat, team, op, amount);
        }
        IrConditionKind::CompareTeamStat {
            stat,
            team,
            op,
            amount,
        }
    }

    fn parse_require_permission(&mut self) -> IrConditionKind {
        let mut permission = Field::Absent;
        let err = self.recovering(SYNC_CONDITION, |p| {
            permission = Field::present(p.expect_keyword_arg(
                "a permission",
                Permission::from_keyword,
                &Permission::KEYWORDS,
            )?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, permission);
        }
        IrConditionKind::RequirePermission { permission }
    }

    fn parse_in_region(&mut self) -> IrConditionKind {
        let mut region = Field::Absent;
        let err = self.recovering(SYNC_CONDITION, |p| {
            region = Field::present(p.expect_name()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, region);
        }
        IrConditionKind::IsInRegion { region }
    }

    fn parse_require_item(&mut self) -> IrConditionKind {
        let mut item = Field::Absent;
        let mut what_to_check = Field::Absent;
        let mut where_to_check = Field::Absent;
        let mut amount = Field::Absent;
        let err = self.recovering(SYNC_CONDITION, |p| {
            item = Field::present(p.expect_name()?);
            if p.at_condition_end() {
                return Ok(());
            }
            what_to_check = Field::present(p.expect_keyword_arg(
                "an item property",
                ItemProperty::from_keyword,
                &ItemProperty::KEYWORDS,
            )?);
            if p.at_condition_end() {
                return Ok(());
            }
            where_to_check = Field::present(p.expect_keyword_arg(
                "an item location",
                ItemLocation::from_keyword,
                &ItemLocation::KEYWORDS,
            )?);
            if p.at_condition_end() {
                return Ok(());
            }
            amount = Field::present(p.expect_keyword_arg(
                "an item amount",
                ItemAmount::from_keyword,
                &ItemAmount::KEYWORDS,
            )?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, item, what_to_check, where_to_check, amount);
        }
        IrConditionKind::RequireItem {
            item,
            what_to_check,
            where_to_check,
            amount,
        }
    }

    fn parse_require_potion(&mut self) -> IrConditionKind {
        let mut effect = Field::Absent;
        let err = self.recovering(SYNC_CONDITION, |p| {
            effect = Field::present(p.expect_keyword_arg(
                "a potion effect",
                PotionEffect::from_keyword,
                &PotionEffect::KEYWORDS,
            )?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, effect);
        }
        IrConditionKind::RequirePotionEffect { effect }
    }

    fn parse_comparison_tail(
        &mut self,
    ) -> (Field<htsl_core::Comparison>, Field<htsl_core::Amount>) {
        let mut op = Field::Absent;
        let mut amount = Field::Absent;
        let err = self.recovering(SYNC_CONDITION, |p| {
            op = Field::present(p.expect_comparison()?);
            amount = Field::present(p.expect_amount()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, op, amount);
        }
        (op, amount)
    }

    fn parse_require_gamemode(&mut self) -> IrConditionKind {
        let gamemode = Field::present(self.expect_gamemode());
        IrConditionKind::RequireGamemode { gamemode }
    }

    fn parse_compare_placeholder(&mut self) -> IrConditionKind {
        let mut placeholder = Field::Absent;
        let mut op = Field::Absent;
        let mut amount = Field::Absent;
        let err = self.recovering(SYNC_CONDITION, |p| {
            placeholder = Field::present(p.expect_placeholder()?);
            op = Field::present(p.expect_comparison()?);
            amount = Field::present(p.expect_amount()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, placeholder, op, amount);
        }
        IrConditionKind::ComparePlaceholder {
            placeholder,
            op,
            amount,
        }
    }

    /// A numeric placeholder, either lexed as one or given as a `%`-wrapped
    /// string.
    fn expect_placeholder(&mut self) -> Result<Spanned<String>, Diagnostic> {
        let span = self.token.span;
        match &self.token.kind {
            TokenKind::Placeholder(content) => {
                let canonical = placeholders::canonical_numeric(content, span)?;
                self.advance();
                Ok(Spanned::new(canonical, span))
            }
            TokenKind::Str(content) => {
                let trimmed = content
                    .strip_prefix('%')
                    .and_then(|rest| rest.strip_suffix('%'))
                    .ok_or_else(|| {
                        Diagnostic::error("expected a placeholder wrapped in `%`")
                            .with_code(ErrorCode::InvalidPlaceholder)
                            .with_label(span)
                    })?;
                let canonical = placeholders::canonical_numeric(trimmed, span)?;
                self.advance();
                Ok(Spanned::new(canonical, span))
            }
            _ => Err(self.unexpected("a placeholder")),
        }
    }

    fn parse_require_team(&mut self) -> IrConditionKind {
        let mut team = Field::Absent;
        let err = self.recovering(SYNC_CONDITION, |p| {
            team = Field::present(p.expect_name()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, team);
        }
        IrConditionKind::RequireTeam { team }
    }
}
