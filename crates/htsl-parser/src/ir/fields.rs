//! Field descriptor views over the IR.
//!
//! The IR-side counterpart of the bare model's `fields()`: each entry names
//! the field, its [`SemanticKind`] and where (and whether) it was parsed.
//! Editor helpers and the source-preserving transformer consume these
//! instead of matching on IR variants.

use htsl_core::arguments::{
    Amount, Comparison, Enchantment, Gamemode, InventorySlot, ItemAmount, ItemLocation,
    ItemProperty, Lobby, Location, Operation, Permission, PotionEffect,
};
use htsl_core::SemanticKind;

use crate::ir::{IrAction, IrActionHolder, IrActionKind, IrCondition, IrConditionKind, IrHolderKind};
use crate::span::{Field, Span};

/// A borrowed view of one parsed argument value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IrValueRef<'a> {
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
    Actions(&'a [IrAction]),
    Conditions(&'a [IrCondition]),
}

/// A field's parse state together with its value when present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IrFieldRef<'a> {
    Present(Span, IrValueRef<'a>),
    Absent,
    Errored(Span),
}

impl<'a> IrFieldRef<'a> {
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Present(span, _) => Some(*span),
            Self::Absent => None,
            Self::Errored(span) => Some(*span),
        }
    }

    pub fn value(&self) -> Option<IrValueRef<'a>> {
        match self {
            Self::Present(_, value) => Some(*value),
            _ => None,
        }
    }
}

/// One described IR field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrFieldDesc<'a> {
    pub name: &'static str,
    pub kind: SemanticKind,
    pub field: IrFieldRef<'a>,
}

fn desc<'a>(name: &'static str, kind: SemanticKind, field: IrFieldRef<'a>) -> IrFieldDesc<'a> {
    IrFieldDesc { name, kind, field }
}

fn field_ref<'a, T>(
    field: &'a Field<T>,
    to_value: impl FnOnce(&'a T) -> IrValueRef<'a>,
) -> IrFieldRef<'a> {
    match field {
        Field::Present(spanned) => IrFieldRef::Present(spanned.span, to_value(&spanned.value)),
        Field::Absent => IrFieldRef::Absent,
        Field::Errored(span) => IrFieldRef::Errored(*span),
    }
}

fn str_desc<'a>(name: &'static str, kind: SemanticKind, f: &'a Field<String>) -> IrFieldDesc<'a> {
    desc(name, kind, field_ref(f, |v| IrValueRef::Str(v)))
}

fn int_desc<'a>(name: &'static str, f: &'a Field<i64>) -> IrFieldDesc<'a> {
    desc(name, SemanticKind::Number, field_ref(f, |v| IrValueRef::Int(*v)))
}

fn float_desc<'a>(name: &'static str, f: &'a Field<f64>) -> IrFieldDesc<'a> {
    desc(name, SemanticKind::Number, field_ref(f, |v| IrValueRef::Float(*v)))
}

fn bool_desc<'a>(name: &'static str, f: &'a Field<bool>) -> IrFieldDesc<'a> {
    desc(name, SemanticKind::Boolean, field_ref(f, |v| IrValueRef::Bool(*v)))
}

fn op_desc<'a>(f: &'a Field<Operation>) -> IrFieldDesc<'a> {
    desc(
        "op",
        SemanticKind::Operation,
        field_ref(f, |v| IrValueRef::Operation(*v)),
    )
}

fn cmp_desc<'a>(f: &'a Field<Comparison>) -> IrFieldDesc<'a> {
    desc(
        "op",
        SemanticKind::Comparison,
        field_ref(f, |v| IrValueRef::Comparison(*v)),
    )
}

fn amount_desc<'a>(name: &'static str, f: &'a Field<Amount>) -> IrFieldDesc<'a> {
    desc(name, SemanticKind::Amount, field_ref(f, IrValueRef::Amount))
}

fn location_desc<'a>(f: &'a Field<Location>) -> IrFieldDesc<'a> {
    desc(
        "location",
        SemanticKind::Location,
        field_ref(f, IrValueRef::Location),
    )
}

fn actions_desc<'a>(name: &'static str, f: &'a Field<Vec<IrAction>>) -> IrFieldDesc<'a> {
    desc(
        name,
        SemanticKind::Actions,
        field_ref(f, |v| IrValueRef::Actions(v)),
    )
}

impl IrAction {
    /// Describes this action's argument fields in source order.
    ///
    /// The order and semantic kinds match
    /// [`Action::fields`](htsl_core::Action::fields) on the lowered value.
    pub fn fields(&self) -> Vec<IrFieldDesc<'_>> {
        use SemanticKind as K;
        match &self.kind {
            IrActionKind::Conditional {
                match_any,
                conditions,
                if_actions,
                else_actions,
            } => vec![
                desc(
                    "match_any",
                    K::ConditionalMode,
                    field_ref(match_any, |v| IrValueRef::Bool(*v)),
                ),
                desc(
                    "conditions",
                    K::Conditions,
                    field_ref(conditions, |v| IrValueRef::Conditions(v)),
                ),
                actions_desc("if_actions", if_actions),
                actions_desc("else_actions", else_actions),
            ],
            IrActionKind::SetGroup {
                group,
                demotion_protection,
            } => vec![
                str_desc("group", K::GroupName, group),
                bool_desc("demotion_protection", demotion_protection),
            ],
            IrActionKind::Kill
            | IrActionKind::Heal
            | IrActionKind::ResetInventory
            | IrActionKind::ClearPotionEffects
            | IrActionKind::Exit
            | IrActionKind::CancelEvent => vec![],
            IrActionKind::Title {
                title,
                subtitle,
                fadein,
                stay,
                fadeout,
            } => vec![
                str_desc("title", K::String, title),
                str_desc("subtitle", K::String, subtitle),
                int_desc("fadein", fadein),
                int_desc("stay", stay),
                int_desc("fadeout", fadeout),
            ],
            IrActionKind::ActionBar { message } => vec![str_desc("message", K::String, message)],
            IrActionKind::ChangeMaxHealth { op, amount, heal } => vec![
                op_desc(op),
                amount_desc("amount", amount),
                bool_desc("heal", heal),
            ],
            IrActionKind::GiveItem {
                item,
                allow_multiple,
                slot,
                replace_existing,
            } => vec![
                str_desc("item", K::Item, item),
                bool_desc("allow_multiple", allow_multiple),
                desc(
                    "slot",
                    K::InventorySlot,
                    field_ref(slot, |v| IrValueRef::Slot(*v)),
                ),
                bool_desc("replace_existing", replace_existing),
            ],
            IrActionKind::RemoveItem { item } => vec![str_desc("item", K::Item, item)],
            IrActionKind::Message { message } => vec![str_desc("message", K::String, message)],
            IrActionKind::ApplyPotionEffect {
                effect,
                duration,
                level,
                override_existing,
                show_icon,
            } => vec![
                desc(
                    "effect",
                    K::Potion,
                    field_ref(effect, |v| IrValueRef::Potion(*v)),
                ),
                int_desc("duration", duration),
                int_desc("level", level),
                bool_desc("override_existing", override_existing),
                bool_desc("show_icon", show_icon),
            ],
            IrActionKind::GiveExperienceLevels { amount } => vec![amount_desc("amount", amount)],
            IrActionKind::SendToLobby { lobby } => vec![desc(
                "lobby",
                K::Lobby,
                field_ref(lobby, |v| IrValueRef::Lobby(*v)),
            )],
            IrActionKind::ChangeStat { stat, op, amount } => vec![
                str_desc("stat", K::StatName, stat),
                op_desc(op),
                amount_desc("amount", amount),
            ],
            IrActionKind::ChangeGlobalStat { stat, op, amount } => vec![
                str_desc("stat", K::GlobalStatName, stat),
                op_desc(op),
                amount_desc("amount", amount),
            ],
            IrActionKind::ChangeTeamStat {
                stat,
                team,
                op,
                amount,
            } => vec![
                str_desc("stat", K::TeamStatName, stat),
                str_desc("team", K::TeamName, team),
                op_desc(op),
                amount_desc("amount", amount),
            ],
            IrActionKind::ChangeHealth { op, amount }
            | IrActionKind::ChangeHunger { op, amount } => {
                vec![op_desc(op), amount_desc("amount", amount)]
            }
            IrActionKind::Random { actions } => vec![actions_desc("actions", actions)],
            IrActionKind::Function { function, global } => vec![
                str_desc("function", K::FunctionName, function),
                bool_desc("global", global),
            ],
            IrActionKind::ApplyInventoryLayout { layout } => {
                vec![str_desc("layout", K::String, layout)]
            }
            IrActionKind::EnchantHeldItem { enchant, level } => vec![
                desc(
                    "enchant",
                    K::Enchantment,
                    field_ref(enchant, |v| IrValueRef::Enchantment(*v)),
                ),
                int_desc("level", level),
            ],
            IrActionKind::Pause { ticks } => vec![int_desc("ticks", ticks)],
            IrActionKind::SetTeam { team } => vec![str_desc("team", K::TeamName, team)],
            IrActionKind::SetMenu { menu } => vec![str_desc("menu", K::String, menu)],
            IrActionKind::DropItem {
                item,
                location,
                drop_naturally,
                disable_merging,
                prioritize_player,
                inventory_fallback,
            } => vec![
                str_desc("item", K::Item, item),
                location_desc(location),
                bool_desc("drop_naturally", drop_naturally),
                bool_desc("disable_merging", disable_merging),
                bool_desc("prioritize_player", prioritize_player),
                bool_desc("inventory_fallback", inventory_fallback),
            ],
            IrActionKind::SetVelocity { x, y, z } => vec![
                amount_desc("x", x),
                amount_desc("y", y),
                amount_desc("z", z),
            ],
            IrActionKind::Launch { location, strength } => {
                vec![location_desc(location), int_desc("strength", strength)]
            }
            IrActionKind::Teleport { location } => vec![location_desc(location)],
            IrActionKind::FailParkour { message } => vec![str_desc("message", K::String, message)],
            IrActionKind::PlaySound {
                sound,
                volume,
                pitch,
                location,
            } => vec![
                str_desc("sound", K::Sound, sound),
                float_desc("volume", volume),
                float_desc("pitch", pitch),
                location_desc(location),
            ],
            IrActionKind::SetCompassTarget { location } => vec![location_desc(location)],
            IrActionKind::SetGamemode { gamemode } => vec![desc(
                "gamemode",
                K::Gamemode,
                field_ref(gamemode, |v| IrValueRef::Gamemode(*v)),
            )],
        }
    }
}

impl IrCondition {
    /// Describes this condition's fields, leading with the inversion flag.
    pub fn fields(&self) -> Vec<IrFieldDesc<'_>> {
        use SemanticKind as K;
        let inverted = desc(
            "inverted",
            K::Inversion,
            IrFieldRef::Present(self.inverted.span, IrValueRef::Bool(self.inverted.value)),
        );
        let mut fields = vec![inverted];
        match &self.kind {
            IrConditionKind::RequireGroup {
                group,
                include_higher_groups,
            } => {
                fields.push(str_desc("group", K::GroupName, group));
                fields.push(bool_desc("include_higher_groups", include_higher_groups));
            }
            IrConditionKind::CompareStat { stat, op, amount } => {
                fields.push(str_desc("stat", K::StatName, stat));
                fields.push(cmp_desc(op));
                fields.push(amount_desc("amount", amount));
            }
            IrConditionKind::CompareGlobalStat { stat, op, amount } => {
                fields.push(str_desc("stat", K::GlobalStatName, stat));
                fields.push(cmp_desc(op));
                fields.push(amount_desc("amount", amount));
            }
            IrConditionKind::CompareTeamStat {
                stat,
                team,
                op,
                amount,
            } => {
                fields.push(str_desc("stat", K::TeamStatName, stat));
                fields.push(str_desc("team", K::TeamName, team));
                fields.push(cmp_desc(op));
                fields.push(amount_desc("amount", amount));
            }
            IrConditionKind::RequirePermission { permission } => {
                fields.push(desc(
                    "permission",
                    K::Permission,
                    field_ref(permission, |v| IrValueRef::Permission(*v)),
                ));
            }
            IrConditionKind::IsInRegion { region } => {
                fields.push(str_desc("region", K::RegionName, region));
            }
            IrConditionKind::RequireItem {
                item,
                what_to_check,
                where_to_check,
                amount,
            } => {
                fields.push(str_desc("item", K::Item, item));
                fields.push(desc(
                    "what_to_check",
                    K::ItemProperty,
                    field_ref(what_to_check, |v| IrValueRef::ItemProperty(*v)),
                ));
                fields.push(desc(
                    "where_to_check",
                    K::ItemLocation,
                    field_ref(where_to_check, |v| IrValueRef::ItemLocation(*v)),
                ));
                fields.push(desc(
                    "amount",
                    K::ItemAmount,
                    field_ref(amount, |v| IrValueRef::ItemAmount(*v)),
                ));
            }
            IrConditionKind::IsDoingParkour
            | IrConditionKind::IsSneaking
            | IrConditionKind::IsFlying => {}
            IrConditionKind::RequirePotionEffect { effect } => {
                fields.push(desc(
                    "effect",
                    K::Potion,
                    field_ref(effect, |v| IrValueRef::Potion(*v)),
                ));
            }
            IrConditionKind::CompareHealth { op, amount }
            | IrConditionKind::CompareMaxHealth { op, amount }
            | IrConditionKind::CompareHunger { op, amount }
            | IrConditionKind::CompareDamage { op, amount } => {
                fields.push(cmp_desc(op));
                fields.push(amount_desc("amount", amount));
            }
            IrConditionKind::RequireGamemode { gamemode } => {
                fields.push(desc(
                    "gamemode",
                    K::Gamemode,
                    field_ref(gamemode, |v| IrValueRef::Gamemode(*v)),
                ));
            }
            IrConditionKind::ComparePlaceholder {
                placeholder,
                op,
                amount,
            } => {
                fields.push(str_desc("placeholder", K::Placeholder, placeholder));
                fields.push(cmp_desc(op));
                fields.push(amount_desc("amount", amount));
            }
            IrConditionKind::RequireTeam { team } => {
                fields.push(str_desc("team", K::TeamName, team));
            }
        }
        fields
    }
}

impl IrActionHolder {
    /// Describes the holder header's fields (empty for unknown holders).
    pub fn fields(&self) -> Vec<IrFieldDesc<'_>> {
        use SemanticKind as K;
        match &self.kind {
            IrHolderKind::Unknown => vec![],
            IrHolderKind::Function { name } => vec![str_desc("name", K::FunctionName, name)],
            IrHolderKind::Event { event } => vec![str_desc("event", K::Event, event)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Spanned;

    #[test]
    fn ir_fields_mirror_bare_fields() {
        let action = IrAction::new(
            IrActionKind::ChangeStat {
                stat: Field::present(Spanned::new("kills".to_string(), Span::new(5, 10))),
                op: Field::present(Spanned::new(Operation::Increment, Span::new(11, 13))),
                amount: Field::Absent,
            },
            Span::new(0, 13),
            Span::new(0, 4),
        );
        let ir_fields = action.fields();
        let lowered = action.lower();
        let bare_fields = lowered.fields();
        assert_eq!(ir_fields.len(), bare_fields.len());
        for (ir, bare) in ir_fields.iter().zip(&bare_fields) {
            assert_eq!(ir.name, bare.name);
            assert_eq!(ir.kind, bare.kind);
        }
        assert_eq!(ir_fields[0].field.span(), Some(Span::new(5, 10)));
        assert_eq!(ir_fields[2].field.span(), None);
    }

    #[test]
    fn errored_fields_keep_their_span() {
        let action = IrAction::new(
            IrActionKind::Pause {
                ticks: Field::Errored(Span::point(6)),
            },
            Span::new(0, 6),
            Span::new(0, 5),
        );
        let fields = action.fields();
        assert_eq!(fields[0].field, IrFieldRef::Errored(Span::point(6)));
        assert_eq!(fields[0].field.value(), None);
    }
}
