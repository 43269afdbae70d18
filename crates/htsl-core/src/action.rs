//! The bare action model.
//!
//! An [`Action`] is a fully-resolved action with no source information
//! attached. Every argument field is optional: `None` means the source either
//! omitted a trailing shorthand argument or failed to parse it. The
//! discriminant-only view [`ActionKind`] drives keyword dispatch, diffing and
//! the per-kind limit table.

use serde::{Deserialize, Serialize};

use crate::arguments::{
    Amount, Enchantment, Gamemode, InventorySlot, Lobby, Location, Operation, PotionEffect,
};
use crate::condition::Condition;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Conditional {
        match_any: Option<bool>,
        conditions: Option<Vec<Condition>>,
        if_actions: Option<Vec<Action>>,
        else_actions: Option<Vec<Action>>,
    },
    SetGroup {
        group: Option<String>,
        demotion_protection: Option<bool>,
    },
    Kill,
    Heal,
    Title {
        title: Option<String>,
        subtitle: Option<String>,
        fadein: Option<i64>,
        stay: Option<i64>,
        fadeout: Option<i64>,
    },
    ActionBar {
        message: Option<String>,
    },
    ResetInventory,
    ChangeMaxHealth {
        op: Option<Operation>,
        amount: Option<Amount>,
        heal: Option<bool>,
    },
    GiveItem {
        item: Option<String>,
        allow_multiple: Option<bool>,
        slot: Option<InventorySlot>,
        replace_existing: Option<bool>,
    },
    RemoveItem {
        item: Option<String>,
    },
    Message {
        message: Option<String>,
    },
    ApplyPotionEffect {
        effect: Option<PotionEffect>,
        duration: Option<i64>,
        level: Option<i64>,
        override_existing: Option<bool>,
        show_icon: Option<bool>,
    },
    ClearPotionEffects,
    GiveExperienceLevels {
        amount: Option<Amount>,
    },
    SendToLobby {
        lobby: Option<Lobby>,
    },
    ChangeStat {
        stat: Option<String>,
        op: Option<Operation>,
        amount: Option<Amount>,
    },
    ChangeGlobalStat {
        stat: Option<String>,
        op: Option<Operation>,
        amount: Option<Amount>,
    },
    ChangeTeamStat {
        stat: Option<String>,
        team: Option<String>,
        op: Option<Operation>,
        amount: Option<Amount>,
    },
    ChangeHealth {
        op: Option<Operation>,
        amount: Option<Amount>,
    },
    ChangeHunger {
        op: Option<Operation>,
        amount: Option<Amount>,
    },
    Random {
        actions: Option<Vec<Action>>,
    },
    Function {
        function: Option<String>,
        global: Option<bool>,
    },
    ApplyInventoryLayout {
        layout: Option<String>,
    },
    EnchantHeldItem {
        enchant: Option<Enchantment>,
        level: Option<i64>,
    },
    Pause {
        ticks: Option<i64>,
    },
    SetTeam {
        team: Option<String>,
    },
    SetMenu {
        menu: Option<String>,
    },
    DropItem {
        item: Option<String>,
        location: Option<Location>,
        drop_naturally: Option<bool>,
        disable_merging: Option<bool>,
        prioritize_player: Option<bool>,
        inventory_fallback: Option<bool>,
    },
    SetVelocity {
        x: Option<Amount>,
        y: Option<Amount>,
        z: Option<Amount>,
    },
    Launch {
        location: Option<Location>,
        strength: Option<i64>,
    },
    Teleport {
        location: Option<Location>,
    },
    FailParkour {
        message: Option<String>,
    },
    PlaySound {
        sound: Option<String>,
        volume: Option<f64>,
        pitch: Option<f64>,
        location: Option<Location>,
    },
    SetCompassTarget {
        location: Option<Location>,
    },
    SetGamemode {
        gamemode: Option<Gamemode>,
    },
    Exit,
    CancelEvent,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Conditional { .. } => ActionKind::Conditional,
            Self::SetGroup { .. } => ActionKind::SetGroup,
            Self::Kill => ActionKind::Kill,
            Self::Heal => ActionKind::Heal,
            Self::Title { .. } => ActionKind::Title,
            Self::ActionBar { .. } => ActionKind::ActionBar,
            Self::ResetInventory => ActionKind::ResetInventory,
            Self::ChangeMaxHealth { .. } => ActionKind::ChangeMaxHealth,
            Self::GiveItem { .. } => ActionKind::GiveItem,
            Self::RemoveItem { .. } => ActionKind::RemoveItem,
            Self::Message { .. } => ActionKind::Message,
            Self::ApplyPotionEffect { .. } => ActionKind::ApplyPotionEffect,
            Self::ClearPotionEffects => ActionKind::ClearPotionEffects,
            Self::GiveExperienceLevels { .. } => ActionKind::GiveExperienceLevels,
            Self::SendToLobby { .. } => ActionKind::SendToLobby,
            Self::ChangeStat { .. } => ActionKind::ChangeStat,
            Self::ChangeGlobalStat { .. } => ActionKind::ChangeGlobalStat,
            Self::ChangeTeamStat { .. } => ActionKind::ChangeTeamStat,
            Self::ChangeHealth { .. } => ActionKind::ChangeHealth,
            Self::ChangeHunger { .. } => ActionKind::ChangeHunger,
            Self::Random { .. } => ActionKind::Random,
            Self::Function { .. } => ActionKind::Function,
            Self::ApplyInventoryLayout { .. } => ActionKind::ApplyInventoryLayout,
            Self::EnchantHeldItem { .. } => ActionKind::EnchantHeldItem,
            Self::Pause { .. } => ActionKind::Pause,
            Self::SetTeam { .. } => ActionKind::SetTeam,
            Self::SetMenu { .. } => ActionKind::SetMenu,
            Self::DropItem { .. } => ActionKind::DropItem,
            Self::SetVelocity { .. } => ActionKind::SetVelocity,
            Self::Launch { .. } => ActionKind::Launch,
            Self::Teleport { .. } => ActionKind::Teleport,
            Self::FailParkour { .. } => ActionKind::FailParkour,
            Self::PlaySound { .. } => ActionKind::PlaySound,
            Self::SetCompassTarget { .. } => ActionKind::SetCompassTarget,
            Self::SetGamemode { .. } => ActionKind::SetGamemode,
            Self::Exit => ActionKind::Exit,
            Self::CancelEvent => ActionKind::CancelEvent,
        }
    }
}

/// The discriminant of an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Conditional,
    SetGroup,
    Kill,
    Heal,
    Title,
    ActionBar,
    ResetInventory,
    ChangeMaxHealth,
    GiveItem,
    RemoveItem,
    Message,
    ApplyPotionEffect,
    ClearPotionEffects,
    GiveExperienceLevels,
    SendToLobby,
    ChangeStat,
    ChangeGlobalStat,
    ChangeTeamStat,
    ChangeHealth,
    ChangeHunger,
    Random,
    Function,
    ApplyInventoryLayout,
    EnchantHeldItem,
    Pause,
    SetTeam,
    SetMenu,
    DropItem,
    SetVelocity,
    Launch,
    Teleport,
    FailParkour,
    PlaySound,
    SetCompassTarget,
    SetGamemode,
    Exit,
    CancelEvent,
}

impl ActionKind {
    pub const ALL: [ActionKind; 37] = [
        Self::Conditional,
        Self::SetGroup,
        Self::Kill,
        Self::Heal,
        Self::Title,
        Self::ActionBar,
        Self::ResetInventory,
        Self::ChangeMaxHealth,
        Self::GiveItem,
        Self::RemoveItem,
        Self::Message,
        Self::ApplyPotionEffect,
        Self::ClearPotionEffects,
        Self::GiveExperienceLevels,
        Self::SendToLobby,
        Self::ChangeStat,
        Self::ChangeGlobalStat,
        Self::ChangeTeamStat,
        Self::ChangeHealth,
        Self::ChangeHunger,
        Self::Random,
        Self::Function,
        Self::ApplyInventoryLayout,
        Self::EnchantHeldItem,
        Self::Pause,
        Self::SetTeam,
        Self::SetMenu,
        Self::DropItem,
        Self::SetVelocity,
        Self::Launch,
        Self::Teleport,
        Self::FailParkour,
        Self::PlaySound,
        Self::SetCompassTarget,
        Self::SetGamemode,
        Self::Exit,
        Self::CancelEvent,
    ];

    /// The source keyword that introduces this action.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Conditional => "if",
            Self::SetGroup => "changePlayerGroup",
            Self::Kill => "kill",
            Self::Heal => "fullHeal",
            Self::Title => "title",
            Self::ActionBar => "actionBar",
            Self::ResetInventory => "resetInventory",
            Self::ChangeMaxHealth => "maxHealth",
            Self::GiveItem => "giveItem",
            Self::RemoveItem => "removeItem",
            Self::Message => "chat",
            Self::ApplyPotionEffect => "applyPotion",
            Self::ClearPotionEffects => "clearEffects",
            Self::GiveExperienceLevels => "xpLevel",
            Self::SendToLobby => "lobby",
            Self::ChangeStat => "stat",
            Self::ChangeGlobalStat => "globalstat",
            Self::ChangeTeamStat => "teamstat",
            Self::ChangeHealth => "changeHealth",
            Self::ChangeHunger => "hungerLevel",
            Self::Random => "random",
            Self::Function => "function",
            Self::ApplyInventoryLayout => "applyLayout",
            Self::EnchantHeldItem => "enchant",
            Self::Pause => "pause",
            Self::SetTeam => "setTeam",
            Self::SetMenu => "displayMenu",
            Self::DropItem => "dropItem",
            Self::SetVelocity => "changeVelocity",
            Self::Launch => "launch",
            Self::Teleport => "tp",
            Self::FailParkour => "failParkour",
            Self::PlaySound => "sound",
            Self::SetCompassTarget => "compassTarget",
            Self::SetGamemode => "gamemode",
            Self::Exit => "exit",
            Self::CancelEvent => "cancelEvent",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.keyword() == word)
    }

    /// A human-readable name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Conditional => "conditional",
            Self::SetGroup => "Change Player Group",
            Self::Kill => "Kill Player",
            Self::Heal => "Full Heal",
            Self::Title => "Display Title",
            Self::ActionBar => "Display Action Bar",
            Self::ResetInventory => "Reset Inventory",
            Self::ChangeMaxHealth => "Change Max Health",
            Self::GiveItem => "Give Item",
            Self::RemoveItem => "Remove Item",
            Self::Message => "Send a Chat Message",
            Self::ApplyPotionEffect => "Apply Potion Effect",
            Self::ClearPotionEffects => "Clear All Potion Effects",
            Self::GiveExperienceLevels => "Give Experience Levels",
            Self::SendToLobby => "Send to Lobby",
            Self::ChangeStat => "Change Player Stat",
            Self::ChangeGlobalStat => "Change Global Stat",
            Self::ChangeTeamStat => "Change Team Stat",
            Self::ChangeHealth => "Change Health",
            Self::ChangeHunger => "Change Hunger Level",
            Self::Random => "random action",
            Self::Function => "Trigger Function",
            Self::ApplyInventoryLayout => "Apply Inventory Layout",
            Self::EnchantHeldItem => "Enchant Held Item",
            Self::Pause => "Pause Execution",
            Self::SetTeam => "Set Player Team",
            Self::SetMenu => "Display Menu",
            Self::DropItem => "Drop Item",
            Self::SetVelocity => "Change Velocity",
            Self::Launch => "Launch to Target",
            Self::Teleport => "Teleport Player",
            Self::FailParkour => "Fail Parkour",
            Self::PlaySound => "Play Sound",
            Self::SetCompassTarget => "Set Compass Target",
            Self::SetGamemode => "Set Gamemode",
            Self::Exit => "Exit",
            Self::CancelEvent => "Cancel Event",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_unique() {
        for (i, a) in ActionKind::ALL.iter().enumerate() {
            for b in &ActionKind::ALL[i + 1..] {
                assert_ne!(a.keyword(), b.keyword(), "{a:?} and {b:?} share a keyword");
            }
        }
    }

    #[test]
    fn keyword_lookup_round_trips() {
        for kind in ActionKind::ALL {
            assert_eq!(ActionKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(ActionKind::from_keyword("notAnAction"), None);
    }

    #[test]
    fn kind_matches_variant() {
        let action = Action::Message {
            message: Some("hi".to_string()),
        };
        assert_eq!(action.kind(), ActionKind::Message);
        assert_eq!(Action::Kill.kind(), ActionKind::Kill);
    }
}
