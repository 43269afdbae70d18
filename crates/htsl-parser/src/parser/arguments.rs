//! Argument parsers shared by actions and conditions.

use htsl_core::arguments::{
    Amount, Comparison, Gamemode, InventorySlot, Location, Operation,
};

use crate::error::{Diagnostic, ErrorCode};
use crate::parser::placeholders;
use crate::parser::Parser;
use crate::span::{Span, Spanned};
use crate::tokens::TokenKind;

impl Parser<'_> {
    /// A quoted string.
    pub(crate) fn expect_str(&mut self) -> Result<Spanned<String>, Diagnostic> {
        match &self.token.kind {
            TokenKind::Str(value) => {
                let spanned = Spanned::new(value.clone(), self.token.span);
                self.advance();
                Ok(spanned)
            }
            _ => Err(self.unexpected("a string")),
        }
    }

    /// A bare identifier or a quoted string.
    pub(crate) fn expect_name(&mut self) -> Result<Spanned<String>, Diagnostic> {
        match &self.token.kind {
            TokenKind::Ident(value) | TokenKind::Str(value) => {
                let spanned = Spanned::new(value.clone(), self.token.span);
                self.advance();
                Ok(spanned)
            }
            _ => Err(self.unexpected("a name")),
        }
    }

    /// A stat name: 1-16 characters, no spaces.
    pub(crate) fn expect_stat_name(&mut self) -> Result<Spanned<String>, Diagnostic> {
        let name = self.expect_name()?;
        if name.value.is_empty() || name.value.len() > 16 || name.value.contains(' ') {
            return Err(Diagnostic::error(format!("invalid stat name `{}`", name.value))
                .with_code(ErrorCode::InvalidStatName)
                .with_label(name.span)
                .with_help("stat names are 1-16 characters and cannot contain spaces"));
        }
        Ok(name)
    }

    pub(crate) fn expect_bool(&mut self) -> Result<Spanned<bool>, Diagnostic> {
        match &self.token.kind {
            TokenKind::Ident(word) if word == "true" => {
                let spanned = Spanned::new(true, self.token.span);
                self.advance();
                Ok(spanned)
            }
            TokenKind::Ident(word) if word == "false" => {
                let spanned = Spanned::new(false, self.token.span);
                self.advance();
                Ok(spanned)
            }
            _ => Err(self.unexpected("`true` or `false`")),
        }
    }

    pub(crate) fn expect_int(&mut self) -> Result<Spanned<i64>, Diagnostic> {
        match self.token.kind {
            TokenKind::Int(value) => {
                let spanned = Spanned::new(value, self.token.span);
                self.advance();
                Ok(spanned)
            }
            _ => Err(self.unexpected("a number")),
        }
    }

    /// An integer clamped to `[min, max]`. Out-of-range values produce a
    /// diagnostic but parsing continues with the clamped value.
    pub(crate) fn expect_bounded(
        &mut self,
        what: &str,
        min: i64,
        max: i64,
    ) -> Result<Spanned<i64>, Diagnostic> {
        let value = self.expect_int()?;
        if value.value < min || value.value > max {
            self.diagnostics.push(
                Diagnostic::error(format!(
                    "{what} must be between {min} and {max}, got {}",
                    value.value
                ))
                .with_code(ErrorCode::ValueOutOfRange)
                .with_label(value.span),
            );
            return Ok(Spanned::new(value.value.clamp(min, max), value.span));
        }
        Ok(value)
    }

    pub(crate) fn expect_float(&mut self) -> Result<Spanned<f64>, Diagnostic> {
        match self.token.kind {
            TokenKind::Float(value) => {
                let spanned = Spanned::new(value, self.token.span);
                self.advance();
                Ok(spanned)
            }
            TokenKind::Int(value) => {
                let spanned = Spanned::new(value as f64, self.token.span);
                self.advance();
                Ok(spanned)
            }
            _ => Err(self.unexpected("a number")),
        }
    }

    pub(crate) fn expect_operation(&mut self) -> Result<Spanned<Operation>, Diagnostic> {
        let parsed = match &self.token.kind {
            TokenKind::Ident(word) => Operation::from_keyword(word),
            TokenKind::Str(word) => Operation::from_keyword(word),
            kind => kind.op_str().and_then(Operation::from_keyword),
        };
        match parsed {
            Some(op) => {
                let spanned = Spanned::new(op, self.token.span);
                self.advance();
                Ok(spanned)
            }
            None => Err(self
                .unexpected("an operation")
                .with_help("valid operations are `=`, `+=`, `-=`, `*=` and `/=`")),
        }
    }

    pub(crate) fn expect_comparison(&mut self) -> Result<Spanned<Comparison>, Diagnostic> {
        let parsed = match &self.token.kind {
            TokenKind::Ident(word) => Comparison::from_keyword(word),
            TokenKind::Str(word) => Comparison::from_keyword(word),
            kind => kind.op_str().and_then(Comparison::from_keyword),
        };
        match parsed {
            Some(cmp) => {
                let spanned = Spanned::new(cmp, self.token.span);
                self.advance();
                Ok(spanned)
            }
            None => Err(self
                .unexpected("a comparison")
                .with_help("valid comparisons are `<`, `<=`, `=`, `>` and `>=`")),
        }
    }

    /// A gamemode. Invalid input reports a diagnostic, eats the offending
    /// token and continues with `survival`.
    pub(crate) fn expect_gamemode(&mut self) -> Spanned<Gamemode> {
        if let TokenKind::Ident(word) | TokenKind::Str(word) = &self.token.kind {
            if let Some(gamemode) = Gamemode::from_keyword(word) {
                let spanned = Spanned::new(gamemode, self.token.span);
                self.advance();
                return spanned;
            }
        }
        let span = self.token.span;
        self.diagnostics.push(
            self.unexpected("a gamemode")
                .with_code(ErrorCode::InvalidArgument)
                .with_help("valid gamemodes are `survival`, `adventure` and `creative`"),
        );
        if !self.at_args_end() && !self.at_condition_end() {
            self.advance();
        }
        Spanned::new(Gamemode::Survival, span)
    }

    /// A keyword-set argument (potion effects, lobbies, enchantments, ...).
    pub(crate) fn expect_keyword_arg<T>(
        &mut self,
        what: &str,
        from_keyword: impl Fn(&str) -> Option<T>,
        options: &'static [&'static str],
    ) -> Result<Spanned<T>, Diagnostic> {
        if let TokenKind::Ident(word) | TokenKind::Str(word) = &self.token.kind {
            if let Some(value) = from_keyword(word) {
                let spanned = Spanned::new(value, self.token.span);
                self.advance();
                return Ok(spanned);
            }
            return Err(Diagnostic::error(format!("unknown {what} `{word}`"))
                .with_code(ErrorCode::InvalidArgument)
                .with_label(self.token.span)
                .with_help(format!("valid values: {}", options.join(", "))));
        }
        Err(self.unexpected(what))
    }

    /// A numeric amount: an integer literal, a placeholder, or one of the
    /// stat shorthands (`stat <name>`, `health`, ...).
    pub(crate) fn expect_amount(&mut self) -> Result<Spanned<Amount>, Diagnostic> {
        let start = self.token.span.start;
        match &self.token.kind {
            TokenKind::Int(value) => {
                let spanned = Spanned::new(Amount::Literal(*value), self.token.span);
                self.advance();
                Ok(spanned)
            }
            TokenKind::Placeholder(content) => {
                let span = self.token.span;
                let canonical = placeholders::canonical_numeric(content, span)?;
                self.advance();
                Ok(Spanned::new(Amount::Placeholder(canonical), span))
            }
            TokenKind::Str(content) => {
                let span = self.token.span;
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
                Ok(Spanned::new(Amount::Placeholder(canonical), span))
            }
            TokenKind::Ident(word) => {
                let shorthand = word.clone();
                let placeholder = self.parse_amount_shorthand(&shorthand)?;
                let end = self.prev.span.end;
                Ok(Spanned::new(
                    Amount::Placeholder(placeholder),
                    Span::new(start, end),
                ))
            }
            _ => Err(self.unexpected("a number or placeholder")),
        }
    }

    fn parse_amount_shorthand(&mut self, word: &str) -> Result<String, Diagnostic> {
        match word {
            "stat" => {
                self.advance();
                let name = self.expect_stat_name()?;
                Ok(format!("%stat.player/{}%", name.value))
            }
            "globalstat" => {
                self.advance();
                let name = self.expect_stat_name()?;
                Ok(format!("%stat.global/{}%", name.value))
            }
            "teamstat" => {
                self.advance();
                let stat = self.expect_stat_name()?;
                let team = self.expect_name()?;
                Ok(format!("%stat.team/{} {}%", stat.value, team.value))
            }
            "health" => {
                self.advance();
                Ok("%player.health%".to_string())
            }
            "maxHealth" => {
                self.advance();
                Ok("%player.maxhealth%".to_string())
            }
            "hunger" => {
                self.advance();
                Ok("%player.hunger%".to_string())
            }
            _ => Err(self.unexpected("a number or placeholder")),
        }
    }

    pub(crate) fn expect_location(&mut self) -> Result<Spanned<Location>, Diagnostic> {
        let start = self.token.span.start;
        let TokenKind::Ident(word) = &self.token.kind else {
            return Err(self.unexpected("a location"));
        };
        let location = match word.as_str() {
            "custom_coordinates" | "custom_location" => {
                self.advance();
                let coordinates = self.expect_coordinates()?;
                Location::Custom {
                    coordinates: coordinates.value,
                }
            }
            "house_spawn" => {
                self.advance();
                Location::HouseSpawn
            }
            "invokers_location" => {
                self.advance();
                Location::InvokersLocation
            }
            _ => {
                return Err(self
                    .unexpected("a location")
                    .with_help(
                        "valid locations: custom_coordinates, house_spawn, invokers_location",
                    ))
            }
        };
        let end = self.prev.span.end;
        Ok(Spanned::new(location, Span::new(start, end)))
    }

    /// A quoted coordinate expression: 3 position components plus optional
    /// yaw and pitch. Components may be relative (`~`) or directional (`^`),
    /// but directional components are all-or-none.
    pub(crate) fn expect_coordinates(&mut self) -> Result<Spanned<String>, Diagnostic> {
        let raw = self.expect_str()?;
        let text = raw.value.trim();
        let components: Vec<&str> = text.split_whitespace().collect();

        // Component sub-spans are exact when the string had no escapes.
        let sub_span = |component: &str| -> Span {
            if raw.value.contains('\\') {
                return raw.span;
            }
            match text.find(component).map(|i| {
                let offset = raw.span.start + 1 + (raw.value.len() - raw.value.trim_start().len());
                Span::new(offset + i, offset + i + component.len())
            }) {
                Some(span) => span,
                None => raw.span,
            }
        };

        if !(3..=5).contains(&components.len()) {
            return Err(Diagnostic::error(format!(
                "expected 3 to 5 coordinate components, got {}",
                components.len()
            ))
            .with_code(ErrorCode::InvalidCoordinates)
            .with_label(raw.span));
        }

        let directional = components[..3].iter().filter(|c| c.starts_with('^')).count();
        if directional != 0 && directional != 3 {
            self.diagnostics.push(
                Diagnostic::error("directional coordinates (`^`) must be used for all three axes")
                    .with_code(ErrorCode::InvalidCoordinates)
                    .with_label(raw.span),
            );
        }

        for (index, component) in components.iter().enumerate() {
            let body = component
                .strip_prefix(['~', '^'])
                .unwrap_or(component);
            let is_positional = index < 3;
            if !is_positional && body.len() != component.len() {
                self.diagnostics.push(
                    Diagnostic::error("yaw and pitch cannot be relative")
                        .with_code(ErrorCode::InvalidCoordinates)
                        .with_label(sub_span(component)),
                );
                continue;
            }
            if body.is_empty() && is_positional {
                continue;
            }
            match body.parse::<f64>() {
                Ok(value) => {
                    if index == 4 && !(-90.0..=90.0).contains(&value) {
                        self.diagnostics.push(
                            Diagnostic::error("pitch must be between -90 and 90")
                                .with_code(ErrorCode::InvalidCoordinates)
                                .with_label(sub_span(component)),
                        );
                    }
                }
                Err(_) => {
                    self.diagnostics.push(
                        Diagnostic::error(format!("invalid coordinate component `{component}`"))
                            .with_code(ErrorCode::InvalidCoordinates)
                            .with_label(sub_span(component)),
                    );
                }
            }
        }

        Ok(Spanned::new(components.join(" "), raw.span))
    }

    /// An inventory slot: a raw index from -1 to 39 or a named slot.
    pub(crate) fn expect_slot(&mut self) -> Result<Spanned<InventorySlot>, Diagnostic> {
        match &self.token.kind {
            TokenKind::Int(_) => {
                let index = self.expect_bounded("inventory slot", -1, 39)?;
                Ok(index.map(InventorySlot::Index))
            }
            TokenKind::Ident(word) => match InventorySlot::from_keyword(word) {
                Some(slot) => {
                    let spanned = Spanned::new(slot, self.token.span);
                    self.advance();
                    Ok(spanned)
                }
                None => Err(Diagnostic::error(format!("unknown inventory slot `{word}`"))
                    .with_code(ErrorCode::InvalidArgument)
                    .with_label(self.token.span)
                    .with_help(
                        "use a slot index (-1 to 39) or first_available, hand, helmet, \
                         chestplate, leggings, boots",
                    )),
            },
            _ => Err(self.unexpected("an inventory slot")),
        }
    }
}
