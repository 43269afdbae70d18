//! Semantic field descriptors.
//!
//! Every action, condition and holder variant exposes its arguments through
//! [`fields`](Action::fields): an ordered list of `(name, semantic kind,
//! value)` entries. The descriptor layer is what the code generator, the
//! diff-based transformer and the editor helpers iterate instead of matching
//! on every variant themselves.
//!
//! The field order matches the argument order in source.

use crate::action::Action;
use crate::arguments::{
    Amount, Comparison, Enchantment, Gamemode, InventorySlot, ItemAmount, ItemLocation,
    ItemProperty, Lobby, Location, Operation, Permission, PotionEffect,
};
use crate::condition::Condition;
use crate::holder::ActionHolder;

/// What an argument field means, independent of which variant it sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticKind {
    String,
    Operation,
    Comparison,
    Amount,
    Boolean,
    Number,
    ConditionalMode,
    Conditions,
    Actions,
    Location,
    Gamemode,
    Item,
    Potion,
    Lobby,
    Enchantment,
    Sound,
    Inversion,
    Placeholder,
    RegionName,
    Permission,
    ItemAmount,
    ItemProperty,
    ItemLocation,
    InventorySlot,
    GroupName,
    FunctionName,
    Event,
    StatName,
    GlobalStatName,
    TeamStatName,
    TeamName,
}

impl SemanticKind {
    /// The closed set of keyword options for this kind, if it has one.
    ///
    /// Used by completions and by diagnostics listing valid values.
    pub fn options(&self) -> Option<&'static [&'static str]> {
        match self {
            Self::Operation => Some(&["+=", "-=", "=", "*=", "/="]),
            Self::Comparison => Some(&["<", "<=", "=", ">", ">="]),
            Self::ConditionalMode => Some(&["and", "or"]),
            Self::Boolean => Some(&["true", "false"]),
            Self::Gamemode => Some(&Gamemode::KEYWORDS),
            Self::Potion => Some(&PotionEffect::KEYWORDS),
            Self::Lobby => Some(&Lobby::KEYWORDS),
            Self::Enchantment => Some(&Enchantment::KEYWORDS),
            Self::Permission => Some(&Permission::KEYWORDS),
            Self::ItemAmount => Some(&["any_amount", "equal_or_greater_amount"]),
            Self::ItemProperty => Some(&["item_type", "metadata"]),
            Self::ItemLocation => Some(&["hand", "armor", "hotbar", "inventory", "anywhere"]),
            Self::Location => Some(&["custom_coordinates", "house_spawn", "invokers_location"]),
            _ => None,
        }
    }

    /// True for the stat-like name kinds that support rename.
    pub fn is_renameable(&self) -> bool {
        matches!(
            self,
            Self::StatName
                | Self::GlobalStatName
                | Self::TeamStatName
                | Self::FunctionName
                | Self::TeamName
                | Self::RegionName
        )
    }
}

/// A borrowed view of one argument value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueRef<'a> {
    Str(&'a str),
    Int(i64),
    Float(f64),
    Bool(bool),
    Operation(Operation),
    Comparison(Comparison),
    Amount(&'a Amount),
    Location(&'a Location),
    Gamemode(Gamemode),
    Slot(InventorySlot),
    Potion(PotionEffect),
    Lobby(Lobby),
    Enchantment(Enchantment),
    Permission(Permission),
    ItemAmount(ItemAmount),
    ItemProperty(ItemProperty),
    ItemLocation(ItemLocation),
    Actions(&'a [Action]),
    Conditions(&'a [Condition]),
}

/// One described argument field: its name, meaning and (optional) value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDesc<'a> {
    pub name: &'static str,
    pub kind: SemanticKind,
    pub value: Option<ValueRef<'a>>,
}

fn field<'a>(
    name: &'static str,
    kind: SemanticKind,
    value: Option<ValueRef<'a>>,
) -> FieldDesc<'a> {
    FieldDesc { name, kind, value }
}

fn str_field<'a>(name: &'static str, kind: SemanticKind, value: &'a Option<String>) -> FieldDesc<'a> {
    field(name, kind, value.as_deref().map(ValueRef::Str))
}

fn int_field<'a>(name: &'static str, value: &Option<i64>) -> FieldDesc<'a> {
    field(name, SemanticKind::Number, value.map(ValueRef::Int))
}

fn bool_field<'a>(name: &'static str, value: &Option<bool>) -> FieldDesc<'a> {
    field(name, SemanticKind::Boolean, value.map(ValueRef::Bool))
}

fn op_field<'a>(value: &Option<Operation>) -> FieldDesc<'a> {
    field("op", SemanticKind::Operation, value.map(ValueRef::Operation))
}

fn cmp_field<'a>(value: &Option<Comparison>) -> FieldDesc<'a> {
    field("op", SemanticKind::Comparison, value.map(ValueRef::Comparison))
}

fn amount_field<'a>(name: &'static str, value: &'a Option<Amount>) -> FieldDesc<'a> {
    field(name, SemanticKind::Amount, value.as_ref().map(ValueRef::Amount))
}

fn location_field<'a>(value: &'a Option<Location>) -> FieldDesc<'a> {
    field(
        "location",
        SemanticKind::Location,
        value.as_ref().map(ValueRef::Location),
    )
}

fn actions_field<'a>(name: &'static str, value: &'a Option<Vec<Action>>) -> FieldDesc<'a> {
    field(name, SemanticKind::Actions, value.as_deref().map(ValueRef::Actions))
}

fn inversion_field<'a>(inverted: bool) -> FieldDesc<'a> {
    field("inverted", SemanticKind::Inversion, Some(ValueRef::Bool(inverted)))
}

impl Action {
    /// Describes this action's argument fields in source order.
    pub fn fields(&self) -> Vec<FieldDesc<'_>> {
        use SemanticKind as K;
        match self {
            Self::Conditional {
                match_any,
                conditions,
                if_actions,
                else_actions,
            } => vec![
                field("match_any", K::ConditionalMode, match_any.map(ValueRef::Bool)),
                field(
                    "conditions",
                    K::Conditions,
                    conditions.as_deref().map(ValueRef::Conditions),
                ),
                actions_field("if_actions", if_actions),
                actions_field("else_actions", else_actions),
            ],
            Self::SetGroup {
                group,
                demotion_protection,
            } => vec![
                str_field("group", K::GroupName, group),
                bool_field("demotion_protection", demotion_protection),
            ],
            Self::Kill | Self::Heal | Self::ResetInventory | Self::ClearPotionEffects => vec![],
            Self::Exit | Self::CancelEvent => vec![],
            Self::Title {
                title,
                subtitle,
                fadein,
                stay,
                fadeout,
            } => vec![
                str_field("title", K::String, title),
                str_field("subtitle", K::String, subtitle),
                int_field("fadein", fadein),
                int_field("stay", stay),
                int_field("fadeout", fadeout),
            ],
            Self::ActionBar { message } => vec![str_field("message", K::String, message)],
            Self::ChangeMaxHealth { op, amount, heal } => vec![
                op_field(op),
                amount_field("amount", amount),
                bool_field("heal", heal),
            ],
            Self::GiveItem {
                item,
                allow_multiple,
                slot,
                replace_existing,
            } => vec![
                str_field("item", K::Item, item),
                bool_field("allow_multiple", allow_multiple),
                field("slot", K::InventorySlot, slot.map(ValueRef::Slot)),
                bool_field("replace_existing", replace_existing),
            ],
            Self::RemoveItem { item } => vec![str_field("item", K::Item, item)],
            Self::Message { message } => vec![str_field("message", K::String, message)],
            Self::ApplyPotionEffect {
                effect,
                duration,
                level,
                override_existing,
                show_icon,
            } => vec![
                field("effect", K::Potion, effect.map(ValueRef::Potion)),
                int_field("duration", duration),
                int_field("level", level),
                bool_field("override_existing", override_existing),
                bool_field("show_icon", show_icon),
            ],
            Self::GiveExperienceLevels { amount } => vec![amount_field("amount", amount)],
            Self::SendToLobby { lobby } => {
                vec![field("lobby", K::Lobby, lobby.map(ValueRef::Lobby))]
            }
            Self::ChangeStat { stat, op, amount } => vec![
                str_field("stat", K::StatName, stat),
                op_field(op),
                amount_field("amount", amount),
            ],
            Self::ChangeGlobalStat { stat, op, amount } => vec![
                str_field("stat", K::GlobalStatName, stat),
                op_field(op),
                amount_field("amount", amount),
            ],
            Self::ChangeTeamStat {
                stat,
                team,
                op,
                amount,
            } => vec![
                str_field("stat", K::TeamStatName, stat),
                str_field("team", K::TeamName, team),
                op_field(op),
                amount_field("amount", amount),
            ],
            Self::ChangeHealth { op, amount } | Self::ChangeHunger { op, amount } => {
                vec![op_field(op), amount_field("amount", amount)]
            }
            Self::Random { actions } => vec![actions_field("actions", actions)],
            Self::Function { function, global } => vec![
                str_field("function", K::FunctionName, function),
                bool_field("global", global),
            ],
            Self::ApplyInventoryLayout { layout } => {
                vec![str_field("layout", K::String, layout)]
            }
            Self::EnchantHeldItem { enchant, level } => vec![
                field("enchant", K::Enchantment, enchant.map(ValueRef::Enchantment)),
                int_field("level", level),
            ],
            Self::Pause { ticks } => vec![int_field("ticks", ticks)],
            Self::SetTeam { team } => vec![str_field("team", K::TeamName, team)],
            Self::SetMenu { menu } => vec![str_field("menu", K::String, menu)],
            Self::DropItem {
                item,
                location,
                drop_naturally,
                disable_merging,
                prioritize_player,
                inventory_fallback,
            } => vec![
                str_field("item", K::Item, item),
                location_field(location),
                bool_field("drop_naturally", drop_naturally),
                bool_field("disable_merging", disable_merging),
                bool_field("prioritize_player", prioritize_player),
                bool_field("inventory_fallback", inventory_fallback),
            ],
            Self::SetVelocity { x, y, z } => vec![
                amount_field("x", x),
                amount_field("y", y),
                amount_field("z", z),
            ],
            Self::Launch { location, strength } => {
                vec![location_field(location), int_field("strength", strength)]
            }
            Self::Teleport { location } => vec![location_field(location)],
            Self::FailParkour { message } => vec![str_field("message", K::String, message)],
            Self::PlaySound {
                sound,
                volume,
                pitch,
                location,
            } => vec![
                str_field("sound", K::Sound, sound),
                field("volume", K::Number, volume.map(ValueRef::Float)),
                field("pitch", K::Number, pitch.map(ValueRef::Float)),
                location_field(location),
            ],
            Self::SetCompassTarget { location } => vec![location_field(location)],
            Self::SetGamemode { gamemode } => {
                vec![field("gamemode", K::Gamemode, gamemode.map(ValueRef::Gamemode))]
            }
        }
    }
}

impl Condition {
    /// Describes this condition's argument fields in source order.
    ///
    /// The leading `inverted` entry is always present; it renders as a `!`
    /// prefix rather than a positional argument.
    pub fn fields(&self) -> Vec<FieldDesc<'_>> {
        use SemanticKind as K;
        match self {
            Self::RequireGroup {
                inverted,
                group,
                include_higher_groups,
            } => vec![
                inversion_field(*inverted),
                str_field("group", K::GroupName, group),
                bool_field("include_higher_groups", include_higher_groups),
            ],
            Self::CompareStat {
                inverted,
                stat,
                op,
                amount,
            } => vec![
                inversion_field(*inverted),
                str_field("stat", K::StatName, stat),
                cmp_field(op),
                amount_field("amount", amount),
            ],
            Self::CompareGlobalStat {
                inverted,
                stat,
                op,
                amount,
            } => vec![
                inversion_field(*inverted),
                str_field("stat", K::GlobalStatName, stat),
                cmp_field(op),
                amount_field("amount", amount),
            ],
            Self::CompareTeamStat {
                inverted,
                stat,
                team,
                op,
                amount,
            } => vec![
                inversion_field(*inverted),
                str_field("stat", K::TeamStatName, stat),
                str_field("team", K::TeamName, team),
                cmp_field(op),
                amount_field("amount", amount),
            ],
            Self::RequirePermission {
                inverted,
                permission,
            } => vec![
                inversion_field(*inverted),
                field(
                    "permission",
                    K::Permission,
                    permission.map(ValueRef::Permission),
                ),
            ],
            Self::IsInRegion { inverted, region } => vec![
                inversion_field(*inverted),
                str_field("region", K::RegionName, region),
            ],
            Self::RequireItem {
                inverted,
                item,
                what_to_check,
                where_to_check,
                amount,
            } => vec![
                inversion_field(*inverted),
                str_field("item", K::Item, item),
                field(
                    "what_to_check",
                    K::ItemProperty,
                    what_to_check.map(ValueRef::ItemProperty),
                ),
                field(
                    "where_to_check",
                    K::ItemLocation,
                    where_to_check.map(ValueRef::ItemLocation),
                ),
                field("amount", K::ItemAmount, amount.map(ValueRef::ItemAmount)),
            ],
            Self::IsDoingParkour { inverted }
            | Self::IsSneaking { inverted }
            | Self::IsFlying { inverted } => vec![inversion_field(*inverted)],
            Self::RequirePotionEffect { inverted, effect } => vec![
                inversion_field(*inverted),
                field("effect", K::Potion, effect.map(ValueRef::Potion)),
            ],
            Self::CompareHealth {
                inverted,
                op,
                amount,
            }
            | Self::CompareMaxHealth {
                inverted,
                op,
                amount,
            }
            | Self::CompareHunger {
                inverted,
                op,
                amount,
            }
            | Self::CompareDamage {
                inverted,
                op,
                amount,
            } => vec![
                inversion_field(*inverted),
                cmp_field(op),
                amount_field("amount", amount),
            ],
            Self::RequireGamemode { inverted, gamemode } => vec![
                inversion_field(*inverted),
                field("gamemode", K::Gamemode, gamemode.map(ValueRef::Gamemode)),
            ],
            Self::ComparePlaceholder {
                inverted,
                placeholder,
                op,
                amount,
            } => vec![
                inversion_field(*inverted),
                str_field("placeholder", K::Placeholder, placeholder),
                cmp_field(op),
                amount_field("amount", amount),
            ],
            Self::RequireTeam { inverted, team } => vec![
                inversion_field(*inverted),
                str_field("team", K::TeamName, team),
            ],
        }
    }
}

impl ActionHolder {
    /// Describes this holder's fields: an optional header name plus the
    /// action list.
    pub fn fields(&self) -> Vec<FieldDesc<'_>> {
        use SemanticKind as K;
        match self {
            Self::Unknown { actions } => vec![actions_field("actions", actions)],
            Self::Function { name, actions } => vec![
                str_field("name", K::FunctionName, name),
                actions_field("actions", actions),
            ],
            Self::Event { event, actions } => vec![
                str_field("event", K::Event, event),
                actions_field("actions", actions),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_order_matches_source_order() {
        let action = Action::ChangeStat {
            stat: Some("kills".to_string()),
            op: Some(Operation::Increment),
            amount: Some(Amount::Literal(1)),
        };
        let fields = action.fields();
        let names: Vec<_> = fields.iter().map(|f| f.name).collect();
        assert_eq!(names, ["stat", "op", "amount"]);
        assert_eq!(fields[0].kind, SemanticKind::StatName);
        assert_eq!(fields[0].value, Some(ValueRef::Str("kills")));
    }

    #[test]
    fn absent_fields_have_no_value() {
        let action = Action::Title {
            title: Some("hi".to_string()),
            subtitle: None,
            fadein: None,
            stay: None,
            fadeout: None,
        };
        let fields = action.fields();
        assert_eq!(fields.len(), 5);
        assert!(fields[0].value.is_some());
        assert!(fields[1..].iter().all(|f| f.value.is_none()));
    }

    #[test]
    fn conditions_lead_with_inversion() {
        let condition = Condition::CompareStat {
            inverted: true,
            stat: Some("deaths".to_string()),
            op: Some(Comparison::GreaterThan),
            amount: Some(Amount::Literal(10)),
        };
        let fields = condition.fields();
        assert_eq!(fields[0].kind, SemanticKind::Inversion);
        assert_eq!(fields[0].value, Some(ValueRef::Bool(true)));
    }

    #[test]
    fn renameable_kinds() {
        assert!(SemanticKind::StatName.is_renameable());
        assert!(SemanticKind::FunctionName.is_renameable());
        assert!(!SemanticKind::String.is_renameable());
        assert!(!SemanticKind::Amount.is_renameable());
    }

    #[test]
    fn options_cover_keyword_kinds() {
        assert_eq!(SemanticKind::ConditionalMode.options(), Some(&["and", "or"][..]));
        assert!(SemanticKind::Potion.options().is_some());
        assert!(SemanticKind::String.options().is_none());
    }
}
