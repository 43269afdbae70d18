//! The bare condition model.
//!
//! Conditions appear inside a [`Conditional`](crate::Action::Conditional)
//! action's parenthesized list. Every condition carries an `inverted` flag
//! written as a leading `!` in source.

use serde::{Deserialize, Serialize};

use crate::arguments::{
    Amount, Comparison, Gamemode, ItemAmount, ItemLocation, ItemProperty, Permission, PotionEffect,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    RequireGroup {
        inverted: bool,
        group: Option<String>,
        include_higher_groups: Option<bool>,
    },
    CompareStat {
        inverted: bool,
        stat: Option<String>,
        op: Option<Comparison>,
        amount: Option<Amount>,
    },
    CompareGlobalStat {
        inverted: bool,
        stat: Option<String>,
        op: Option<Comparison>,
        amount: Option<Amount>,
    },
    CompareTeamStat {
        inverted: bool,
        stat: Option<String>,
        team: Option<String>,
        op: Option<Comparison>,
        amount: Option<Amount>,
    },
    RequirePermission {
        inverted: bool,
        permission: Option<Permission>,
    },
    IsInRegion {
        inverted: bool,
        region: Option<String>,
    },
    RequireItem {
        inverted: bool,
        item: Option<String>,
        what_to_check: Option<ItemProperty>,
        where_to_check: Option<ItemLocation>,
        amount: Option<ItemAmount>,
    },
    IsDoingParkour {
        inverted: bool,
    },
    RequirePotionEffect {
        inverted: bool,
        effect: Option<PotionEffect>,
    },
    IsSneaking {
        inverted: bool,
    },
    IsFlying {
        inverted: bool,
    },
    CompareHealth {
        inverted: bool,
        op: Option<Comparison>,
        amount: Option<Amount>,
    },
    CompareMaxHealth {
        inverted: bool,
        op: Option<Comparison>,
        amount: Option<Amount>,
    },
    CompareHunger {
        inverted: bool,
        op: Option<Comparison>,
        amount: Option<Amount>,
    },
    RequireGamemode {
        inverted: bool,
        gamemode: Option<Gamemode>,
    },
    ComparePlaceholder {
        inverted: bool,
        placeholder: Option<String>,
        op: Option<Comparison>,
        amount: Option<Amount>,
    },
    RequireTeam {
        inverted: bool,
        team: Option<String>,
    },
    CompareDamage {
        inverted: bool,
        op: Option<Comparison>,
        amount: Option<Amount>,
    },
}

impl Condition {
    pub fn kind(&self) -> ConditionKind {
        match self {
            Self::RequireGroup { .. } => ConditionKind::RequireGroup,
            Self::CompareStat { .. } => ConditionKind::CompareStat,
            Self::CompareGlobalStat { .. } => ConditionKind::CompareGlobalStat,
            Self::CompareTeamStat { .. } => ConditionKind::CompareTeamStat,
            Self::RequirePermission { .. } => ConditionKind::RequirePermission,
            Self::IsInRegion { .. } => ConditionKind::IsInRegion,
            Self::RequireItem { .. } => ConditionKind::RequireItem,
            Self::IsDoingParkour { .. } => ConditionKind::IsDoingParkour,
            Self::RequirePotionEffect { .. } => ConditionKind::RequirePotionEffect,
            Self::IsSneaking { .. } => ConditionKind::IsSneaking,
            Self::IsFlying { .. } => ConditionKind::IsFlying,
            Self::CompareHealth { .. } => ConditionKind::CompareHealth,
            Self::CompareMaxHealth { .. } => ConditionKind::CompareMaxHealth,
            Self::CompareHunger { .. } => ConditionKind::CompareHunger,
            Self::RequireGamemode { .. } => ConditionKind::RequireGamemode,
            Self::ComparePlaceholder { .. } => ConditionKind::ComparePlaceholder,
            Self::RequireTeam { .. } => ConditionKind::RequireTeam,
            Self::CompareDamage { .. } => ConditionKind::CompareDamage,
        }
    }

    pub fn inverted(&self) -> bool {
        match self {
            Self::RequireGroup { inverted, .. }
            | Self::CompareStat { inverted, .. }
            | Self::CompareGlobalStat { inverted, .. }
            | Self::CompareTeamStat { inverted, .. }
            | Self::RequirePermission { inverted, .. }
            | Self::IsInRegion { inverted, .. }
            | Self::RequireItem { inverted, .. }
            | Self::IsDoingParkour { inverted }
            | Self::RequirePotionEffect { inverted, .. }
            | Self::IsSneaking { inverted }
            | Self::IsFlying { inverted }
            | Self::CompareHealth { inverted, .. }
            | Self::CompareMaxHealth { inverted, .. }
            | Self::CompareHunger { inverted, .. }
            | Self::RequireGamemode { inverted, .. }
            | Self::ComparePlaceholder { inverted, .. }
            | Self::RequireTeam { inverted, .. }
            | Self::CompareDamage { inverted, .. } => *inverted,
        }
    }
}

/// The discriminant of a [`Condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionKind {
    RequireGroup,
    CompareStat,
    CompareGlobalStat,
    CompareTeamStat,
    RequirePermission,
    IsInRegion,
    RequireItem,
    IsDoingParkour,
    RequirePotionEffect,
    IsSneaking,
    IsFlying,
    CompareHealth,
    CompareMaxHealth,
    CompareHunger,
    RequireGamemode,
    ComparePlaceholder,
    RequireTeam,
    CompareDamage,
}

impl ConditionKind {
    pub const ALL: [ConditionKind; 18] = [
        Self::RequireGroup,
        Self::CompareStat,
        Self::CompareGlobalStat,
        Self::CompareTeamStat,
        Self::RequirePermission,
        Self::IsInRegion,
        Self::RequireItem,
        Self::IsDoingParkour,
        Self::RequirePotionEffect,
        Self::IsSneaking,
        Self::IsFlying,
        Self::CompareHealth,
        Self::CompareMaxHealth,
        Self::CompareHunger,
        Self::RequireGamemode,
        Self::ComparePlaceholder,
        Self::RequireTeam,
        Self::CompareDamage,
    ];

    /// The source keyword that introduces this condition.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::RequireGroup => "hasGroup",
            Self::CompareStat => "stat",
            Self::CompareGlobalStat => "globalstat",
            Self::CompareTeamStat => "teamstat",
            Self::RequirePermission => "hasPermission",
            Self::IsInRegion => "inRegion",
            Self::RequireItem => "hasItem",
            Self::IsDoingParkour => "doingParkour",
            Self::RequirePotionEffect => "hasPotion",
            Self::IsSneaking => "isSneaking",
            Self::IsFlying => "isFlying",
            Self::CompareHealth => "health",
            Self::CompareMaxHealth => "maxHealth",
            Self::CompareHunger => "hunger",
            Self::RequireGamemode => "gamemode",
            Self::ComparePlaceholder => "placeholder",
            Self::RequireTeam => "hasTeam",
            Self::CompareDamage => "damageAmount",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.keyword() == word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_round_trips() {
        for kind in ConditionKind::ALL {
            assert_eq!(ConditionKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(ConditionKind::from_keyword("notACondition"), None);
    }

    #[test]
    fn inverted_is_reachable_on_every_variant() {
        let condition = Condition::IsSneaking { inverted: true };
        assert!(condition.inverted());
        let condition = Condition::CompareHealth {
            inverted: false,
            op: None,
            amount: None,
        };
        assert!(!condition.inverted());
    }
}
