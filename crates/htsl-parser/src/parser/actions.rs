//! Per-action argument parsers.
//!
//! Every parser runs inside a statement-level recovery scope: a failed
//! argument records its diagnostic, skips to the end of the line and leaves
//! the remaining fields errored. Trailing arguments that may be omitted
//! check [`Parser::at_args_end`] and return early.

use htsl_core::arguments::{resolve_sound, Enchantment, Lobby, PotionEffect};
use htsl_core::ActionKind;

use crate::ir::{IrAction, IrActionKind};
use crate::parser::{mark_errored, Parser, SYNC_LINE};
use crate::span::{Field, Span, Spanned};
use crate::tokens::TokenKind;

impl Parser<'_> {
    pub(crate) fn parse_action(&mut self, kind: ActionKind, kw_span: Span) -> IrAction {
        let ir_kind = match kind {
            ActionKind::Conditional => self.parse_conditional(),
            ActionKind::SetGroup => self.parse_set_group(),
            ActionKind::Kill => IrActionKind::Kill,
            ActionKind::Heal => IrActionKind::Heal,
            ActionKind::Title => self.parse_title(),
            ActionKind::ActionBar => self.parse_action_bar(),
            ActionKind::ResetInventory => IrActionKind::ResetInventory,
            ActionKind::ChangeMaxHealth => self.parse_change_max_health(),
            ActionKind::GiveItem => self.parse_give_item(),
            ActionKind::RemoveItem => self.parse_remove_item(),
            ActionKind::Message => self.parse_message(),
            ActionKind::ApplyPotionEffect => self.parse_apply_potion(),
            ActionKind::ClearPotionEffects => IrActionKind::ClearPotionEffects,
            ActionKind::GiveExperienceLevels => self.parse_xp_levels(),
            ActionKind::SendToLobby => self.parse_send_to_lobby(),
            ActionKind::ChangeStat => self.parse_change_stat(),
            ActionKind::ChangeGlobalStat => self.parse_change_global_stat(),
            ActionKind::ChangeTeamStat => self.parse_change_team_stat(),
            ActionKind::ChangeHealth => self.parse_change_health(),
            ActionKind::ChangeHunger => self.parse_change_hunger(),
            ActionKind::Random => self.parse_random(),
            ActionKind::Function => self.parse_function(),
            ActionKind::ApplyInventoryLayout => self.parse_apply_layout(),
            ActionKind::EnchantHeldItem => self.parse_enchant(),
            ActionKind::Pause => self.parse_pause(),
            ActionKind::SetTeam => self.parse_set_team(),
            ActionKind::SetMenu => self.parse_set_menu(),
            ActionKind::DropItem => self.parse_drop_item(),
            ActionKind::SetVelocity => self.parse_set_velocity(),
            ActionKind::Launch => self.parse_launch(),
            ActionKind::Teleport => self.parse_teleport(),
            ActionKind::FailParkour => self.parse_fail_parkour(),
            ActionKind::PlaySound => self.parse_play_sound(),
            ActionKind::SetCompassTarget => self.parse_compass_target(),
            ActionKind::SetGamemode => self.parse_set_gamemode(),
            ActionKind::Exit => IrActionKind::Exit,
            ActionKind::CancelEvent => IrActionKind::CancelEvent,
        };
        IrAction::new(ir_kind, self.statement_span(kw_span), kw_span)
    }

    fn parse_conditional(&mut self) -> IrActionKind {
        let mut match_any = Field::Absent;
        let mut conditions = Field::Absent;
        let mut if_actions = Field::Absent;
        let mut else_actions = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            match &p.token.kind {
                TokenKind::Ident(word) if word == "and" || word == "false" => {
                    match_any = Field::present(Spanned::new(false, p.token.span));
                    p.advance();
                }
                TokenKind::Ident(word) if word == "or" || word == "true" => {
                    match_any = Field::present(Spanned::new(true, p.token.span));
                    p.advance();
                }
                TokenKind::Ident(_) => return Err(p.unexpected("`and`, `or` or `(`")),
                _ => {}
            }
            conditions = Field::present(p.parse_condition_list()?);
            if_actions = Field::present(p.parse_block()?);

            // `else` may sit on the same line or the next one.
            if p.eat_ident("else") {
                else_actions = Field::present(p.parse_block()?);
            } else if p.at_eol() {
                let eol = p.token.clone();
                p.advance();
                if p.eat_ident("else") {
                    else_actions = Field::present(p.parse_block()?);
                } else {
                    p.push_back(eol);
                }
            }
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, match_any, conditions, if_actions, else_actions);
        }
        IrActionKind::Conditional {
            match_any,
            conditions,
            if_actions,
            else_actions,
        }
    }

    fn parse_set_group(&mut self) -> IrActionKind {
        let mut group = Field::Absent;
        let mut demotion_protection = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            group = Field::present(p.expect_name()?);
            if p.at_args_end() {
                return Ok(());
            }
            demotion_protection = Field::present(p.expect_bool()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, group, demotion_protection);
        }
        IrActionKind::SetGroup {
            group,
            demotion_protection,
        }
    }

    fn parse_title(&mut self) -> IrActionKind {
        let mut title = Field::Absent;
        let mut subtitle = Field::Absent;
        let mut fadein = Field::Absent;
        let mut stay = Field::Absent;
        let mut fadeout = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            title = Field::present(p.expect_str()?);
            if p.at_args_end() {
                return Ok(());
            }
            subtitle = Field::present(p.expect_str()?);
            if p.at_args_end() {
                return Ok(());
            }
            fadein = Field::present(p.expect_bounded("fade-in", 0, 5)?);
            if p.at_args_end() {
                return Ok(());
            }
            stay = Field::present(p.expect_bounded("stay time", 0, 10)?);
            if p.at_args_end() {
                return Ok(());
            }
            fadeout = Field::present(p.expect_bounded("fade-out", 0, 5)?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, title, subtitle, fadein, stay, fadeout);
        }
        IrActionKind::Title {
            title,
            subtitle,
            fadein,
            stay,
            fadeout,
        }
    }

    fn parse_action_bar(&mut self) -> IrActionKind {
        let mut message = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            message = Field::present(p.expect_str()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, message);
        }
        IrActionKind::ActionBar { message }
    }

    fn parse_message(&mut self) -> IrActionKind {
        let mut message = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            message = Field::present(p.expect_str()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, message);
        }
        IrActionKind::Message { message }
    }

    fn parse_change_max_health(&mut self) -> IrActionKind {
        let mut op = Field::Absent;
        let mut amount = Field::Absent;
        let mut heal = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            op = Field::present(p.expect_operation()?);
            amount = Field::present(p.expect_amount()?);
            if p.at_args_end() {
                return Ok(());
            }
            heal = Field::present(p.expect_bool()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, op, amount, heal);
        }
        IrActionKind::ChangeMaxHealth { op, amount, heal }
    }

    fn parse_give_item(&mut self) -> IrActionKind {
        let mut item = Field::Absent;
        let mut allow_multiple = Field::Absent;
        let mut slot = Field::Absent;
        let mut replace_existing = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            item = Field::present(p.expect_name()?);
            if p.at_args_end() {
                return Ok(());
            }
            allow_multiple = Field::present(p.expect_bool()?);
            if p.at_args_end() {
                return Ok(());
            }
            slot = Field::present(p.expect_slot()?);
            if p.at_args_end() {
                return Ok(());
            }
            replace_existing = Field::present(p.expect_bool()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, item, allow_multiple, slot, replace_existing);
        }
        IrActionKind::GiveItem {
            item,
            allow_multiple,
            slot,
            replace_existing,
        }
    }

    fn parse_remove_item(&mut self) -> IrActionKind {
        let mut item = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            item = Field::present(p.expect_name()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, item);
        }
        IrActionKind::RemoveItem { item }
    }

    fn parse_apply_potion(&mut self) -> IrActionKind {
        let mut effect = Field::Absent;
        let mut duration = Field::Absent;
        let mut level = Field::Absent;
        let mut override_existing = Field::Absent;
        let mut show_icon = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            effect = Field::present(p.expect_keyword_arg(
                "a potion effect",
                PotionEffect::from_keyword,
                &PotionEffect::KEYWORDS,
            )?);
            if p.at_args_end() {
                return Ok(());
            }
            duration = Field::present(p.expect_bounded("duration", 1, 2_592_000)?);
            if p.at_args_end() {
                return Ok(());
            }
            level = Field::present(p.expect_bounded("level", 1, 10)?);
            if p.at_args_end() {
                return Ok(());
            }
            override_existing = Field::present(p.expect_bool()?);
            if p.at_args_end() {
                return Ok(());
            }
            show_icon = Field::present(p.expect_bool()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, effect, duration, level, override_existing, show_icon);
        }
        IrActionKind::ApplyPotionEffect {
            effect,
            duration,
            level,
            override_existing,
            show_icon,
        }
    }

    fn parse_xp_levels(&mut self) -> IrActionKind {
        let mut amount = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            amount = Field::present(p.expect_amount()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, amount);
        }
        IrActionKind::GiveExperienceLevels { amount }
    }

    fn parse_send_to_lobby(&mut self) -> IrActionKind {
        let mut lobby = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            lobby = Field::present(p.expect_keyword_arg(
                "a lobby",
                Lobby::from_keyword,
                &Lobby::KEYWORDS,
            )?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, lobby);
        }
        IrActionKind::SendToLobby { lobby }
    }

    fn parse_change_stat(&mut self) -> IrActionKind {
        let (stat, op, amount) = self.parse_stat_mutation();
        IrActionKind::ChangeStat { stat, op, amount }
    }

    fn parse_change_global_stat(&mut self) -> IrActionKind {
        let (stat, op, amount) = self.parse_stat_mutation();
        IrActionKind::ChangeGlobalStat { stat, op, amount }
    }

    /// Shared `<stat> <op> <amount>` tail.
    fn parse_stat_mutation(
        &mut self,
    ) -> (
        Field<String>,
        Field<htsl_core::Operation>,
        Field<htsl_core::Amount>,
    ) {
        let mut stat = Field::Absent;
        let mut op = Field::Absent;
        let mut amount = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            stat = Field::present(p.expect_stat_name()?);
            op = Field::present(p.expect_operation()?);
            amount = Field::present(p.expect_amount()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, stat, op, amount);
        }
        (stat, op, amount)
    }

    fn parse_change_team_stat(&mut self) -> IrActionKind {
        let mut stat = Field::Absent;
        let mut team = Field::Absent;
        let mut op = Field::Absent;
        let mut amount = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            stat = Field::present(p.expect_stat_name()?);
            team = Field::present(p.expect_name()?);
            op = Field::present(p.expect_operation()?);
            amount = Field::present(p.expect_amount()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, stat, team, op, amount);
        }
        IrActionKind::ChangeTeamStat {
            stat,
            team,
            op,
            amount,
        }
    }

    fn parse_change_health(&mut self) -> IrActionKind {
        let (op, amount) = self.parse_op_amount();
        IrActionKind::ChangeHealth { op, amount }
    }

    fn parse_change_hunger(&mut self) -> IrActionKind {
        let (op, amount) = self.parse_op_amount();
        IrActionKind::ChangeHunger { op, amount }
    }

    fn parse_op_amount(&mut self) -> (Field<htsl_core::Operation>, Field<htsl_core::Amount>) {
        let mut op = Field::Absent;
        let mut amount = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            op = Field::present(p.expect_operation()?);
            amount = Field::present(p.expect_amount()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, op, amount);
        }
        (op, amount)
    }

    fn parse_random(&mut self) -> IrActionKind {
        let mut actions = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            actions = Field::present(p.parse_block()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, actions);
        }
        IrActionKind::Random { actions }
    }

    fn parse_function(&mut self) -> IrActionKind {
        let mut function = Field::Absent;
        let mut global = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            function = Field::present(p.expect_name()?);
            if p.at_args_end() {
                return Ok(());
            }
            global = Field::present(p.expect_bool()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, function, global);
        }
        IrActionKind::Function { function, global }
    }

    fn parse_apply_layout(&mut self) -> IrActionKind {
        let mut layout = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            layout = Field::present(p.expect_name()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, layout);
        }
        IrActionKind::ApplyInventoryLayout { layout }
    }

    fn parse_enchant(&mut self) -> IrActionKind {
        let mut enchant = Field::Absent;
        let mut level = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            enchant = Field::present(p.expect_keyword_arg(
                "an enchantment",
                Enchantment::from_keyword,
                &Enchantment::KEYWORDS,
            )?);
            if p.at_args_end() {
                return Ok(());
            }
            level = Field::present(p.expect_bounded("enchantment level", 1, 10)?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, enchant, level);
        }
        IrActionKind::EnchantHeldItem { enchant, level }
    }

    fn parse_pause(&mut self) -> IrActionKind {
        let mut ticks = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            if p.at_args_end() {
                return Ok(());
            }
            ticks = Field::present(p.expect_bounded("pause ticks", 1, 1000)?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, ticks);
        }
        IrActionKind::Pause { ticks }
    }

    fn parse_set_team(&mut self) -> IrActionKind {
        let mut team = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            team = Field::present(p.expect_name()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, team);
        }
        IrActionKind::SetTeam { team }
    }

    fn parse_set_menu(&mut self) -> IrActionKind {
        let mut menu = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            menu = Field::present(p.expect_name()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, menu);
        }
        IrActionKind::SetMenu { menu }
    }

    fn parse_drop_item(&mut self) -> IrActionKind {
        let mut item = Field::Absent;
        let mut location = Field::Absent;
        let mut drop_naturally = Field::Absent;
        let mut disable_merging = Field::Absent;
        let mut prioritize_player = Field::Absent;
        let mut inventory_fallback = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            item = Field::present(p.expect_name()?);
            location = Field::present(p.expect_location()?);
            if p.at_args_end() {
                return Ok(());
            }
            drop_naturally = Field::present(p.expect_bool()?);
            if p.at_args_end() {
                return Ok(());
            }
            disable_merging = Field::present(p.expect_bool()?);
            if p.at_args_end() {
                return Ok(());
            }
            prioritize_player = Field::present(p.expect_bool()?);
            if p.at_args_end() {
                return Ok(());
            }
            inventory_fallback = Field::present(p.expect_bool()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(
                span,
                item,
                location,
                drop_naturally,
                disable_merging,
                prioritize_player,
                inventory_fallback,
            );
        }
        IrActionKind::DropItem {
            item,
            location,
            drop_naturally,
            disable_merging,
            prioritize_player,
            inventory_fallback,
        }
    }

    fn parse_set_velocity(&mut self) -> IrActionKind {
        let mut x = Field::Absent;
        let mut y = Field::Absent;
        let mut z = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            x = Field::present(p.expect_amount()?);
            y = Field::present(p.expect_amount()?);
            z = Field::present(p.expect_amount()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, x, y, z);
        }
        IrActionKind::SetVelocity { x, y, z }
    }

    fn parse_launch(&mut self) -> IrActionKind {
        let mut location = Field::Absent;
        let mut strength = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            location = Field::present(p.expect_location()?);
            if p.at_args_end() {
                return Ok(());
            }
            strength = Field::present(p.expect_bounded("launch strength", 1, 10)?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, location, strength);
        }
        IrActionKind::Launch { location, strength }
    }

    fn parse_teleport(&mut self) -> IrActionKind {
        let mut location = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            location = Field::present(p.expect_location()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, location);
        }
        IrActionKind::Teleport { location }
    }

    fn parse_fail_parkour(&mut self) -> IrActionKind {
        let mut message = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            message = Field::present(p.expect_str()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, message);
        }
        IrActionKind::FailParkour { message }
    }

    fn parse_play_sound(&mut self) -> IrActionKind {
        let mut sound = Field::Absent;
        let mut volume = Field::Absent;
        let mut pitch = Field::Absent;
        let mut location = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            let name = p.expect_name()?;
            let resolved = resolve_sound(&name.value)
                .map(str::to_string)
                .unwrap_or(name.value);
            sound = Field::present(Spanned::new(resolved, name.span));
            if p.at_args_end() {
                return Ok(());
            }
            volume = Field::present(p.expect_float()?);
            if p.at_args_end() {
                return Ok(());
            }
            pitch = Field::present(p.expect_float()?);
            if p.at_args_end() {
                return Ok(());
            }
            location = Field::present(p.expect_location()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, sound, volume, pitch, location);
        }
        IrActionKind::PlaySound {
            sound,
            volume,
            pitch,
            location,
        }
    }

    fn parse_compass_target(&mut self) -> IrActionKind {
        let mut location = Field::Absent;
        let err = self.recovering(SYNC_LINE, |p| {
            location = Field::present(p.expect_location()?);
            Ok(())
        });
        if let Some(span) = err {
            mark_errored!(span, location);
        }
        IrActionKind::SetCompassTarget { location }
    }

    fn parse_set_gamemode(&mut self) -> IrActionKind {
        let gamemode = Field::present(self.expect_gamemode());
        IrActionKind::SetGamemode { gamemode }
    }
}
