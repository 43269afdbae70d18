//! The spanned intermediate representation.
//!
//! Parsing produces this tree. Every node records its full extent (`span`)
//! and the extent of its introducing keyword (`kw_span`, always contained in
//! `span`). Argument fields are [`Field`] values so partially-parsed lines
//! keep whatever arguments did parse.
//!
//! [`IrAction::lower`] and friends drop spans and error states to produce
//! the bare `htsl-core` model.

mod fields;

pub use fields::{IrFieldDesc, IrFieldRef, IrValueRef};

use htsl_core::arguments::{
    Amount, Comparison, Enchantment, Gamemode, InventorySlot, ItemAmount, ItemLocation,
    ItemProperty, Lobby, Location, Operation, PotionEffect,
};
use htsl_core::{Action, ActionHolder, ActionHolderKind, ActionKind, Condition, ConditionKind};

use crate::span::{Field, Span, Spanned};

/// A parsed top-level holder and its statement list.
#[derive(Debug, Clone, PartialEq)]
pub struct IrActionHolder {
    pub kind: IrHolderKind,
    pub actions: Vec<IrAction>,
    pub span: Span,
    pub kw_span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IrHolderKind {
    Unknown,
    Function { name: Field<String> },
    Event { event: Field<String> },
}

impl IrActionHolder {
    pub fn holder_kind(&self) -> ActionHolderKind {
        match self.kind {
            IrHolderKind::Unknown => ActionHolderKind::Unknown,
            IrHolderKind::Function { .. } => ActionHolderKind::Function,
            IrHolderKind::Event { .. } => ActionHolderKind::Event,
        }
    }

    pub fn lower(&self) -> ActionHolder {
        let actions = Some(self.actions.iter().map(IrAction::lower).collect());
        match &self.kind {
            IrHolderKind::Unknown => ActionHolder::Unknown { actions },
            IrHolderKind::Function { name } => ActionHolder::Function {
                name: name.lower(),
                actions,
            },
            IrHolderKind::Event { event } => ActionHolder::Event {
                event: event.lower(),
                actions,
            },
        }
    }
}

/// A parsed action statement.
#[derive(Debug, Clone, PartialEq)]
pub struct IrAction {
    pub kind: IrActionKind,
    pub span: Span,
    pub kw_span: Span,
}

impl IrAction {
    pub fn new(kind: IrActionKind, span: Span, kw_span: Span) -> Self {
        debug_assert!(
            span.start <= kw_span.start && kw_span.end <= span.end,
            "keyword span {kw_span} escapes action span {span}"
        );
        Self { kind, span, kw_span }
    }

    /// The nested statement blocks of a conditional or random action, in
    /// source order. Leaf actions yield nothing.
    pub fn child_blocks(&self) -> Vec<&[IrAction]> {
        match &self.kind {
            IrActionKind::Conditional {
                if_actions,
                else_actions,
                ..
            } => [if_actions, else_actions]
                .into_iter()
                .filter_map(|field| field.value().map(Vec::as_slice))
                .collect(),
            IrActionKind::Random { actions } => actions
                .value()
                .map(Vec::as_slice)
                .into_iter()
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The conditions of a conditional action. Empty for everything else.
    pub fn conditions(&self) -> &[IrCondition] {
        match &self.kind {
            IrActionKind::Conditional { conditions, .. } => {
                conditions.value().map(Vec::as_slice).unwrap_or_default()
            }
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IrActionKind {
    Conditional {
        match_any: Field<bool>,
        conditions: Field<Vec<IrCondition>>,
        if_actions: Field<Vec<IrAction>>,
        else_actions: Field<Vec<IrAction>>,
    },
    SetGroup {
        group: Field<String>,
        demotion_protection: Field<bool>,
    },
    Kill,
    Heal,
    Title {
        title: Field<String>,
        subtitle: Field<String>,
        fadein: Field<i64>,
        stay: Field<i64>,
        fadeout: Field<i64>,
    },
    ActionBar {
        message: Field<String>,
    },
    ResetInventory,
    ChangeMaxHealth {
        op: Field<Operation>,
        amount: Field<Amount>,
        heal: Field<bool>,
    },
    GiveItem {
        item: Field<String>,
        allow_multiple: Field<bool>,
        slot: Field<InventorySlot>,
        replace_existing: Field<bool>,
    },
    RemoveItem {
        item: Field<String>,
    },
    Message {
        message: Field<String>,
    },
    ApplyPotionEffect {
        effect: Field<PotionEffect>,
        duration: Field<i64>,
        level: Field<i64>,
        override_existing: Field<bool>,
        show_icon: Field<bool>,
    },
    ClearPotionEffects,
    GiveExperienceLevels {
        amount: Field<Amount>,
    },
    SendToLobby {
        lobby: Field<Lobby>,
    },
    ChangeStat {
        stat: Field<String>,
        op: Field<Operation>,
        amount: Field<Amount>,
    },
    ChangeGlobalStat {
        stat: Field<String>,
        op: Field<Operation>,
        amount: Field<Amount>,
    },
    ChangeTeamStat {
        stat: Field<String>,
        team: Field<String>,
        op: Field<Operation>,
        amount: Field<Amount>,
    },
    ChangeHealth {
        op: Field<Operation>,
        amount: Field<Amount>,
    },
    ChangeHunger {
        op: Field<Operation>,
        amount: Field<Amount>,
    },
    Random {
        actions: Field<Vec<IrAction>>,
    },
    Function {
        function: Field<String>,
        global: Field<bool>,
    },
    ApplyInventoryLayout {
        layout: Field<String>,
    },
    EnchantHeldItem {
        enchant: Field<Enchantment>,
        level: Field<i64>,
    },
    Pause {
        ticks: Field<i64>,
    },
    SetTeam {
        team: Field<String>,
    },
    SetMenu {
        menu: Field<String>,
    },
    DropItem {
        item: Field<String>,
        location: Field<Location>,
        drop_naturally: Field<bool>,
        disable_merging: Field<bool>,
        prioritize_player: Field<bool>,
        inventory_fallback: Field<bool>,
    },
    SetVelocity {
        x: Field<Amount>,
        y: Field<Amount>,
        z: Field<Amount>,
    },
    Launch {
        location: Field<Location>,
        strength: Field<i64>,
    },
    Teleport {
        location: Field<Location>,
    },
    FailParkour {
        message: Field<String>,
    },
    PlaySound {
        sound: Field<String>,
        volume: Field<f64>,
        pitch: Field<f64>,
        location: Field<Location>,
    },
    SetCompassTarget {
        location: Field<Location>,
    },
    SetGamemode {
        gamemode: Field<Gamemode>,
    },
    Exit,
    CancelEvent,
}

fn lower_actions(actions: &Field<Vec<IrAction>>) -> Option<Vec<Action>> {
    actions
        .value()
        .map(|list| list.iter().map(IrAction::lower).collect())
}

fn lower_conditions(conditions: &Field<Vec<IrCondition>>) -> Option<Vec<Condition>> {
    conditions
        .value()
        .map(|list| list.iter().map(IrCondition::lower).collect())
}

impl IrAction {
    pub fn action_kind(&self) -> ActionKind {
        match &self.kind {
            IrActionKind::Conditional { .. } => ActionKind::Conditional,
            IrActionKind::SetGroup { .. } => ActionKind::SetGroup,
            IrActionKind::Kill => ActionKind::Kill,
            IrActionKind::Heal => ActionKind::Heal,
            IrActionKind::Title { .. } => ActionKind::Title,
            IrActionKind::ActionBar { .. } => ActionKind::ActionBar,
            IrActionKind::ResetInventory => ActionKind::ResetInventory,
            IrActionKind::ChangeMaxHealth { .. } => ActionKind::ChangeMaxHealth,
            IrActionKind::GiveItem { .. } => ActionKind::GiveItem,
            IrActionKind::RemoveItem { .. } => ActionKind::RemoveItem,
            IrActionKind::Message { .. } => ActionKind::Message,
            IrActionKind::ApplyPotionEffect { .. } => ActionKind::ApplyPotionEffect,
            IrActionKind::ClearPotionEffects => ActionKind::ClearPotionEffects,
            IrActionKind::GiveExperienceLevels { .. } => ActionKind::GiveExperienceLevels,
            IrActionKind::SendToLobby { .. } => ActionKind::SendToLobby,
            IrActionKind::ChangeStat { .. } => ActionKind::ChangeStat,
            IrActionKind::ChangeGlobalStat { .. } => ActionKind::ChangeGlobalStat,
            IrActionKind::ChangeTeamStat { .. } => ActionKind::ChangeTeamStat,
            IrActionKind::ChangeHealth { .. } => ActionKind::ChangeHealth,
            IrActionKind::ChangeHunger { .. } => ActionKind::ChangeHunger,
            IrActionKind::Random { .. } => ActionKind::Random,
            IrActionKind::Function { .. } => ActionKind::Function,
            IrActionKind::ApplyInventoryLayout { .. } => ActionKind::ApplyInventoryLayout,
            IrActionKind::EnchantHeldItem { .. } => ActionKind::EnchantHeldItem,
            IrActionKind::Pause { .. } => ActionKind::Pause,
            IrActionKind::SetTeam { .. } => ActionKind::SetTeam,
            IrActionKind::SetMenu { .. } => ActionKind::SetMenu,
            IrActionKind::DropItem { .. } => ActionKind::DropItem,
            IrActionKind::SetVelocity { .. } => ActionKind::SetVelocity,
            IrActionKind::Launch { .. } => ActionKind::Launch,
            IrActionKind::Teleport { .. } => ActionKind::Teleport,
            IrActionKind::FailParkour { .. } => ActionKind::FailParkour,
            IrActionKind::PlaySound { .. } => ActionKind::PlaySound,
            IrActionKind::SetCompassTarget { .. } => ActionKind::SetCompassTarget,
            IrActionKind::SetGamemode { .. } => ActionKind::SetGamemode,
            IrActionKind::Exit => ActionKind::Exit,
            IrActionKind::CancelEvent => ActionKind::CancelEvent,
        }
    }

    pub fn lower(&self) -> Action {
        match &self.kind {
            IrActionKind::Conditional {
                match_any,
                conditions,
                if_actions,
                else_actions,
            } => Action::Conditional {
                match_any: match_any.lower(),
                conditions: lower_conditions(conditions),
                if_actions: lower_actions(if_actions),
                else_actions: lower_actions(else_actions),
            },
            IrActionKind::SetGroup {
                group,
                demotion_protection,
            } => Action::SetGroup {
                group: group.lower(),
                demotion_protection: demotion_protection.lower(),
            },
            IrActionKind::Kill => Action::Kill,
            IrActionKind::Heal => Action::Heal,
            IrActionKind::Title {
                title,
                subtitle,
                fadein,
                stay,
                fadeout,
            } => Action::Title {
                title: title.lower(),
                subtitle: subtitle.lower(),
                fadein: fadein.lower(),
                stay: stay.lower(),
                fadeout: fadeout.lower(),
            },
            IrActionKind::ActionBar { message } => Action::ActionBar {
                message: message.lower(),
            },
            IrActionKind::ResetInventory => Action::ResetInventory,
            IrActionKind::ChangeMaxHealth { op, amount, heal } => Action::ChangeMaxHealth {
                op: op.lower(),
                amount: amount.lower(),
                heal: heal.lower(),
            },
            IrActionKind::GiveItem {
                item,
                allow_multiple,
                slot,
                replace_existing,
            } => Action::GiveItem {
                item: item.lower(),
                allow_multiple: allow_multiple.lower(),
                slot: slot.lower(),
                replace_existing: replace_existing.lower(),
            },
            IrActionKind::RemoveItem { item } => Action::RemoveItem { item: item.lower() },
            IrActionKind::Message { message } => Action::Message {
                message: message.lower(),
            },
            IrActionKind::ApplyPotionEffect {
                effect,
                duration,
                level,
                override_existing,
                show_icon,
            } => Action::ApplyPotionEffect {
                effect: effect.lower(),
                duration: duration.lower(),
                level: level.lower(),
                override_existing: override_existing.lower(),
                show_icon: show_icon.lower(),
            },
            IrActionKind::ClearPotionEffects => Action::ClearPotionEffects,
            IrActionKind::GiveExperienceLevels { amount } => Action::GiveExperienceLevels {
                amount: amount.lower(),
            },
            IrActionKind::SendToLobby { lobby } => Action::SendToLobby {
                lobby: lobby.lower(),
            },
            IrActionKind::ChangeStat { stat, op, amount } => Action::ChangeStat {
                stat: stat.lower(),
                op: op.lower(),
                amount: amount.lower(),
            },
            IrActionKind::ChangeGlobalStat { stat, op, amount } => Action::ChangeGlobalStat {
                stat: stat.lower(),
                op: op.lower(),
                amount: amount.lower(),
            },
            IrActionKind::ChangeTeamStat {
                stat,
                team,
                op,
                amount,
            } => Action::ChangeTeamStat {
                stat: stat.lower(),
                team: team.lower(),
                op: op.lower(),
                amount: amount.lower(),
            },
            IrActionKind::ChangeHealth { op, amount } => Action::ChangeHealth {
                op: op.lower(),
                amount: amount.lower(),
            },
            IrActionKind::ChangeHunger { op, amount } => Action::ChangeHunger {
                op: op.lower(),
                amount: amount.lower(),
            },
            IrActionKind::Random { actions } => Action::Random {
                actions: lower_actions(actions),
            },
            IrActionKind::Function { function, global } => Action::Function {
                function: function.lower(),
                global: global.lower(),
            },
            IrActionKind::ApplyInventoryLayout { layout } => Action::ApplyInventoryLayout {
                layout: layout.lower(),
            },
            IrActionKind::EnchantHeldItem { enchant, level } => Action::EnchantHeldItem {
                enchant: enchant.lower(),
                level: level.lower(),
            },
            IrActionKind::Pause { ticks } => Action::Pause {
                ticks: ticks.lower(),
            },
            IrActionKind::SetTeam { team } => Action::SetTeam { team: team.lower() },
            IrActionKind::SetMenu { menu } => Action::SetMenu { menu: menu.lower() },
            IrActionKind::DropItem {
                item,
                location,
                drop_naturally,
                disable_merging,
                prioritize_player,
                inventory_fallback,
            } => Action::DropItem {
                item: item.lower(),
                location: location.lower(),
                drop_naturally: drop_naturally.lower(),
                disable_merging: disable_merging.lower(),
                prioritize_player: prioritize_player.lower(),
                inventory_fallback: inventory_fallback.lower(),
            },
            IrActionKind::SetVelocity { x, y, z } => Action::SetVelocity {
                x: x.lower(),
                y: y.lower(),
                z: z.lower(),
            },
            IrActionKind::Launch { location, strength } => Action::Launch {
                location: location.lower(),
                strength: strength.lower(),
            },
            IrActionKind::Teleport { location } => Action::Teleport {
                location: location.lower(),
            },
            IrActionKind::FailParkour { message } => Action::FailParkour {
                message: message.lower(),
            },
            IrActionKind::PlaySound {
                sound,
                volume,
                pitch,
                location,
            } => Action::PlaySound {
                sound: sound.lower(),
                volume: volume.lower(),
                pitch: pitch.lower(),
                location: location.lower(),
            },
            IrActionKind::SetCompassTarget { location } => Action::SetCompassTarget {
                location: location.lower(),
            },
            IrActionKind::SetGamemode { gamemode } => Action::SetGamemode {
                gamemode: gamemode.lower(),
            },
            IrActionKind::Exit => Action::Exit,
            IrActionKind::CancelEvent => Action::CancelEvent,
        }
    }
}

/// A parsed condition.
#[derive(Debug, Clone, PartialEq)]
pub struct IrCondition {
    pub kind: IrConditionKind,
    /// True when the condition is prefixed with `!`. The span covers the
    /// `!` itself, or is empty at the keyword start when absent.
    pub inverted: Spanned<bool>,
    pub span: Span,
    pub kw_span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IrConditionKind {
    RequireGroup {
        group: Field<String>,
        include_higher_groups: Field<bool>,
    },
    CompareStat {
        stat: Field<String>,
        op: Field<Comparison>,
        amount: Field<Amount>,
    },
    CompareGlobalStat {
        stat: Field<String>,
        op: Field<Comparison>,
        amount: Field<Amount>,
    },
    CompareTeamStat {
        stat: Field<String>,
        team: Field<String>,
        op: Field<Comparison>,
        amount: Field<Amount>,
    },
    RequirePermission {
        permission: Field<htsl_core::Permission>,
    },
    IsInRegion {
        region: Field<String>,
    },
    RequireItem {
        item: Field<String>,
        what_to_check: Field<ItemProperty>,
        where_to_check: Field<ItemLocation>,
        amount: Field<ItemAmount>,
    },
    IsDoingParkour,
    RequirePotionEffect {
        effect: Field<PotionEffect>,
    },
    IsSneaking,
    IsFlying,
    CompareHealth {
        op: Field<Comparison>,
        amount: Field<Amount>,
    },
    CompareMaxHealth {
        op: Field<Comparison>,
        amount: Field<Amount>,
    },
    CompareHunger {
        op: Field<Comparison>,
        amount: Field<Amount>,
    },
    RequireGamemode {
        gamemode: Field<Gamemode>,
    },
    ComparePlaceholder {
        placeholder: Field<String>,
        op: Field<Comparison>,
        amount: Field<Amount>,
    },
    RequireTeam {
        team: Field<String>,
    },
    CompareDamage {
        op: Field<Comparison>,
        amount: Field<Amount>,
    },
}

impl IrCondition {
    pub fn condition_kind(&self) -> ConditionKind {
        match &self.kind {
            IrConditionKind::RequireGroup { .. } => ConditionKind::RequireGroup,
            IrConditionKind::CompareStat { .. } => ConditionKind::CompareStat,
            IrConditionKind::CompareGlobalStat { .. } => ConditionKind::CompareGlobalStat,
            IrConditionKind::CompareTeamStat { .. } => ConditionKind::CompareTeamStat,
            IrConditionKind::RequirePermission { .. } => ConditionKind::RequirePermission,
            IrConditionKind::IsInRegion { .. } => ConditionKind::IsInRegion,
            IrConditionKind::RequireItem { .. } => ConditionKind::RequireItem,
            IrConditionKind::IsDoingParkour => ConditionKind::IsDoingParkour,
            IrConditionKind::RequirePotionEffect { .. } => ConditionKind::RequirePotionEffect,
            IrConditionKind::IsSneaking => ConditionKind::IsSneaking,
            IrConditionKind::IsFlying => ConditionKind::IsFlying,
            IrConditionKind::CompareHealth { .. } => ConditionKind::CompareHealth,
            IrConditionKind::CompareMaxHealth { .. } => ConditionKind::CompareMaxHealth,
            IrConditionKind::CompareHunger { .. } => ConditionKind::CompareHunger,
            IrConditionKind::RequireGamemode { .. } => ConditionKind::RequireGamemode,
            IrConditionKind::ComparePlaceholder { .. } => ConditionKind::ComparePlaceholder,
            IrConditionKind::RequireTeam { .. } => ConditionKind::RequireTeam,
            IrConditionKind::CompareDamage { .. } => ConditionKind::CompareDamage,
        }
    }

    pub fn lower(&self) -> Condition {
        let inverted = self.inverted.value;
        match &self.kind {
            IrConditionKind::RequireGroup {
                group,
                include_higher_groups,
            } => Condition::RequireGroup {
                inverted,
                group: group.lower(),
                include_higher_groups: include_higher_groups.lower(),
            },
            IrConditionKind::CompareStat { stat, op, amount } => Condition::CompareStat {
                inverted,
                stat: stat.lower(),
                op: op.lower(),
                amount: amount.lower(),
            },
            IrConditionKind::CompareGlobalStat { stat, op, amount } => {
                Condition::CompareGlobalStat {
                    inverted,
                    stat: stat.lower(),
                    op: op.lower(),
                    amount: amount.lower(),
                }
            }
            IrConditionKind::CompareTeamStat {
                stat,
                team,
                op,
                amount,
            } => Condition::CompareTeamStat {
                inverted,
                stat: stat.lower(),
                team: team.lower(),
                op: op.lower(),
                amount: amount.lower(),
            },
            IrConditionKind::RequirePermission { permission } => Condition::RequirePermission {
                inverted,
                permission: permission.lower(),
            },
            IrConditionKind::IsInRegion { region } => Condition::IsInRegion {
                inverted,
                region: region.lower(),
            },
            IrConditionKind::RequireItem {
                item,
                what_to_check,
                where_to_check,
                amount,
            } => Condition::RequireItem {
                inverted,
                item: item.lower(),
                what_to_check: what_to_check.lower(),
                where_to_check: where_to_check.lower(),
                amount: amount.lower(),
            },
            IrConditionKind::IsDoingParkour => Condition::IsDoingParkour { inverted },
            IrConditionKind::RequirePotionEffect { effect } => Condition::RequirePotionEffect {
                inverted,
                effect: effect.lower(),
            },
            IrConditionKind::IsSneaking => Condition::IsSneaking { inverted },
            IrConditionKind::IsFlying => Condition::IsFlying { inverted },
            IrConditionKind::CompareHealth { op, amount } => Condition::CompareHealth {
                inverted,
                op: op.lower(),
                amount: amount.lower(),
            },
            IrConditionKind::CompareMaxHealth { op, amount } => Condition::CompareMaxHealth {
                inverted,
                op: op.lower(),
                amount: amount.lower(),
            },
            IrConditionKind::CompareHunger { op, amount } => Condition::CompareHunger {
                inverted,
                op: op.lower(),
                amount: amount.lower(),
            },
            IrConditionKind::RequireGamemode { gamemode } => Condition::RequireGamemode {
                inverted,
                gamemode: gamemode.lower(),
            },
            IrConditionKind::ComparePlaceholder {
                placeholder,
                op,
                amount,
            } => Condition::ComparePlaceholder {
                inverted,
                placeholder: placeholder.lower(),
                op: op.lower(),
                amount: amount.lower(),
            },
            IrConditionKind::RequireTeam { team } => Condition::RequireTeam {
                inverted,
                team: team.lower(),
            },
            IrConditionKind::CompareDamage { op, amount } => Condition::CompareDamage {
                inverted,
                op: op.lower(),
                amount: amount.lower(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowering_drops_error_states() {
        let action = IrAction::new(
            IrActionKind::ChangeStat {
                stat: Field::present(Spanned::new("kills".to_string(), Span::new(5, 10))),
                op: Field::Errored(Span::point(11)),
                amount: Field::Absent,
            },
            Span::new(0, 11),
            Span::new(0, 4),
        );
        assert_eq!(
            action.lower(),
            Action::ChangeStat {
                stat: Some("kills".to_string()),
                op: None,
                amount: None,
            }
        );
        assert_eq!(action.action_kind(), ActionKind::ChangeStat);
    }

    #[test]
    fn holder_lowering_always_yields_actions() {
        let holder = IrActionHolder {
            kind: IrHolderKind::Function {
                name: Field::present(Spanned::new("spawn".to_string(), Span::new(14, 21))),
            },
            actions: vec![IrAction::new(
                IrActionKind::Kill,
                Span::new(22, 26),
                Span::new(22, 26),
            )],
            span: Span::new(0, 26),
            kw_span: Span::new(0, 4),
        };
        let lowered = holder.lower();
        assert_eq!(lowered.actions(), &[Action::Kill]);
    }
}
