//! Argument enumerations shared by actions and conditions.
//!
//! Every enumeration here has a fixed keyword surface in HTSL source. Each
//! type exposes `from_keyword` (used by the parser) and `keyword` (the
//! canonical source spelling, used by the code generator and completions).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A numeric argument: either a literal 64-bit integer or a `%...%`
/// placeholder expression in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Amount {
    Literal(i64),
    Placeholder(String),
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Placeholder(text) => write!(f, "{text}"),
        }
    }
}

/// A stat mutation operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Set,
    Increment,
    Decrement,
    Multiply,
    Divide,
}

impl Operation {
    /// Parses any accepted source spelling, symbolic or written.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "=" | "set" => Some(Self::Set),
            "+=" | "increment" | "inc" => Some(Self::Increment),
            "-=" | "decrement" | "dec" => Some(Self::Decrement),
            "*=" | "multiply" | "mult" | "mul" => Some(Self::Multiply),
            "/=" | "divide" | "div" => Some(Self::Divide),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Set => "=",
            Self::Increment => "+=",
            Self::Decrement => "-=",
            Self::Multiply => "*=",
            Self::Divide => "/=",
        }
    }

    pub fn written(&self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A comparison operator used by `Compare*` conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    Equals,
    LessThan,
    LessThanOrEquals,
    GreaterThan,
    GreaterThanOrEquals,
}

impl Comparison {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "=" | "==" | "equal" | "equals" => Some(Self::Equals),
            "<" | "less" | "lessThan" => Some(Self::LessThan),
            "<=" | "lessThanOrEqual" | "lessThanOrEquals" => Some(Self::LessThanOrEquals),
            ">" | "greater" | "greaterThan" => Some(Self::GreaterThan),
            ">=" | "greaterThanOrEqual" | "greaterThanOrEquals" => Some(Self::GreaterThanOrEquals),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::LessThan => "<",
            Self::LessThanOrEquals => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEquals => ">=",
        }
    }

    pub fn written(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::LessThan => "lessThan",
            Self::LessThanOrEquals => "lessThanOrEquals",
            Self::GreaterThan => "greaterThan",
            Self::GreaterThanOrEquals => "greaterThanOrEquals",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A target gamemode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gamemode {
    Survival,
    Adventure,
    Creative,
}

impl Gamemode {
    pub const KEYWORDS: [&'static str; 3] = ["survival", "adventure", "creative"];

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "survival" => Some(Self::Survival),
            "adventure" => Some(Self::Adventure),
            "creative" => Some(Self::Creative),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Survival => "survival",
            Self::Adventure => "adventure",
            Self::Creative => "creative",
        }
    }
}

impl fmt::Display for Gamemode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A location argument.
///
/// `Custom` keeps the coordinate expression exactly as written (after
/// normalizing whitespace between components), e.g. `~ ~1.5 ~ 90 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Location {
    Custom { coordinates: String },
    HouseSpawn,
    InvokersLocation,
}

impl Location {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Custom { .. } => "custom_coordinates",
            Self::HouseSpawn => "house_spawn",
            Self::InvokersLocation => "invokers_location",
        }
    }
}

/// An inventory slot: either a raw index (-1 through 39) or a named slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventorySlot {
    Index(i64),
    FirstAvailable,
    Hand,
    Helmet,
    Chestplate,
    Leggings,
    Boots,
}

impl InventorySlot {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "first_available" => Some(Self::FirstAvailable),
            "hand" => Some(Self::Hand),
            "helmet" => Some(Self::Helmet),
            "chestplate" => Some(Self::Chestplate),
            "leggings" => Some(Self::Leggings),
            "boots" => Some(Self::Boots),
            _ => None,
        }
    }
}

impl fmt::Display for InventorySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::FirstAvailable => f.write_str("first_available"),
            Self::Hand => f.write_str("hand"),
            Self::Helmet => f.write_str("helmet"),
            Self::Chestplate => f.write_str("chestplate"),
            Self::Leggings => f.write_str("leggings"),
            Self::Boots => f.write_str("boots"),
        }
    }
}

/// How `hasItem` counts matching items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemAmount {
    Any,
    EqualOrGreater,
}

impl ItemAmount {
    pub const KEYWORDS: [&'static str; 2] = ["any_amount", "equal_or_greater_amount"];

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "any_amount" => Some(Self::Any),
            "equal_or_greater_amount" => Some(Self::EqualOrGreater),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Any => "any_amount",
            Self::EqualOrGreater => "equal_or_greater_amount",
        }
    }
}

/// Which item property `hasItem` compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemProperty {
    ItemType,
    Metadata,
}

impl ItemProperty {
    pub const KEYWORDS: [&'static str; 2] = ["item_type", "metadata"];

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "item_type" => Some(Self::ItemType),
            "metadata" => Some(Self::Metadata),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::ItemType => "item_type",
            Self::Metadata => "metadata",
        }
    }
}

/// Where `hasItem` searches for the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemLocation {
    Hand,
    Armor,
    Hotbar,
    Inventory,
    Anywhere,
}

impl ItemLocation {
    pub const KEYWORDS: [&'static str; 5] = ["hand", "armor", "hotbar", "inventory", "anywhere"];

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "hand" => Some(Self::Hand),
            "armor" => Some(Self::Armor),
            "hotbar" => Some(Self::Hotbar),
            "inventory" => Some(Self::Inventory),
            "anywhere" => Some(Self::Anywhere),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Hand => "hand",
            Self::Armor => "armor",
            Self::Hotbar => "hotbar",
            Self::Inventory => "inventory",
            Self::Anywhere => "anywhere",
        }
    }
}

macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $keyword:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const KEYWORDS: [&'static str; keyword_enum!(@count $($variant)+)] =
                [$($keyword,)+];

            pub fn from_keyword(word: &str) -> Option<Self> {
                match word {
                    $($keyword => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn keyword(&self) -> &'static str {
                match self {
                    $(Self::$variant => $keyword,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.keyword())
            }
        }
    };
    (@count $($tok:tt)*) => { 0usize $(+ keyword_enum!(@one $tok))* };
    (@one $tok:tt) => { 1usize };
}

keyword_enum! {
    /// A potion effect applied by `applyPotion` or checked by `hasPotion`.
    PotionEffect {
        Speed => "speed",
        Slowness => "slowness",
        Haste => "haste",
        MiningFatigue => "mining_fatigue",
        Strength => "strength",
        InstantHealth => "instant_health",
        InstantDamage => "instant_damage",
        JumpBoost => "jump_boost",
        Nausea => "nausea",
        Regeneration => "regeneration",
        Resistance => "resistance",
        FireResistance => "fire_resistance",
        WaterBreathing => "water_breathing",
        Invisibility => "invisibility",
        Blindness => "blindness",
        NightVision => "night_vision",
        Hunger => "hunger",
        Weakness => "weakness",
        Poison => "poison",
        Wither => "wither",
        HealthBoost => "health_boost",
        Absorption => "absorption",
    }
}

keyword_enum! {
    /// An enchantment applied by `enchant`.
    Enchantment {
        Protection => "protection",
        FireProtection => "fire_protection",
        FeatherFalling => "feather_falling",
        BlastProtection => "blast_protection",
        ProjectileProtection => "projectile_protection",
        Respiration => "respiration",
        AquaAffinity => "aqua_affinity",
        Thorns => "thorns",
        DepthStrider => "depth_strider",
        Sharpness => "sharpness",
        Smite => "smite",
        BaneOfArthropods => "bane_of_arthropods",
        Knockback => "knockback",
        FireAspect => "fire_aspect",
        Looting => "looting",
        Efficiency => "efficiency",
        SilkTouch => "silk_touch",
        Unbreaking => "unbreaking",
        Fortune => "fortune",
        Power => "power",
        Punch => "punch",
        Flame => "flame",
        Infinity => "infinity",
    }
}

keyword_enum! {
    /// A lobby destination for the `lobby` action.
    Lobby {
        Main => "main",
        TourneyHall => "tourney_hall",
        BlitzSg => "blitz_sg",
        TntGames => "tnt_games",
        MegaWalls => "mega_walls",
        ArcadeGames => "arcade_games",
        CopsAndCrims => "cops_and_crims",
        Uhc => "uhc",
        Warlords => "warlords",
        SmashHeroes => "smash_heroes",
        Housing => "housing",
        SkyWars => "skywars",
        SpeedUhc => "speed_uhc",
        Classic => "classic",
        Prototype => "prototype",
        BedWars => "bed_wars",
        MurderMystery => "murder_mystery",
        BuildBattle => "build_battle",
        Duels => "duels",
        WoolGames => "wool_games",
        Pit => "pit",
    }
}

keyword_enum! {
    /// A house permission checked by `hasPermission`.
    Permission {
        Fly => "fly",
        WoodDoor => "wood_door",
        IronDoor => "iron_door",
        WoodTrapDoor => "wood_trap_door",
        IronTrapDoor => "iron_trap_door",
        FenceGate => "fence_gate",
        Button => "button",
        Lever => "lever",
        UseLaunchPads => "use_launch_pads",
        Teleport => "tp",
        TeleportOtherPlayers => "tp_other_players",
        Jukebox => "jukebox",
        Kick => "kick",
        Ban => "ban",
        Mute => "mute",
        PetSpawning => "pet_spawning",
        Build => "build",
        OfflineBuild => "offline_build",
        Fluid => "fluid",
        ProTools => "pro_tools",
        UseChests => "use_chests",
        UseEnderChests => "use_ender_chests",
        ItemEditor => "item_editor",
        SwitchGamemode => "switch_game_mode",
        EditStats => "edit_stats",
        ChangePlayerGroup => "change_player_group",
        HousingMenu => "housing_menu",
    }
}

/// Friendly sound names mapped to their resource paths.
///
/// Unknown names are passed through untouched, so the full sound catalog
/// stays usable without an exhaustive table here.
pub const SOUNDS: [(&str, &str); 12] = [
    ("Cat Meow", "mob.cat.meow"),
    ("Chest Open", "random.chestopen"),
    ("Click", "random.click"),
    ("Enderman Teleport", "mob.endermen.portal"),
    ("Explosion", "random.explode"),
    ("Firework Blast", "fireworks.blast"),
    ("Ghast Shoot", "mob.ghast.fireball"),
    ("Lava Pop", "liquid.lavapop"),
    ("Level Up", "random.levelup"),
    ("Note Pling", "note.pling"),
    ("Splash", "random.splash"),
    ("Wolf Bark", "mob.wolf.bark"),
];

/// Resolves a friendly sound name to its resource path, if known.
pub fn resolve_sound(name: &str) -> Option<&'static str> {
    SOUNDS
        .iter()
        .find(|(friendly, _)| friendly.eq_ignore_ascii_case(name))
        .map(|(_, path)| *path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_accepts_all_spellings() {
        for word in ["+=", "increment", "inc"] {
            assert_eq!(Operation::from_keyword(word), Some(Operation::Increment));
        }
        assert_eq!(Operation::from_keyword("="), Some(Operation::Set));
        assert_eq!(Operation::from_keyword("add"), None);
    }

    #[test]
    fn comparison_symbols_round_trip() {
        for cmp in [
            Comparison::Equals,
            Comparison::LessThan,
            Comparison::LessThanOrEquals,
            Comparison::GreaterThan,
            Comparison::GreaterThanOrEquals,
        ] {
            assert_eq!(Comparison::from_keyword(cmp.symbol()), Some(cmp));
            assert_eq!(Comparison::from_keyword(cmp.written()), Some(cmp));
        }
    }

    #[test]
    fn keyword_enums_round_trip() {
        for keyword in PotionEffect::KEYWORDS {
            let effect = PotionEffect::from_keyword(keyword).unwrap();
            assert_eq!(effect.keyword(), keyword);
        }
        for keyword in Lobby::KEYWORDS {
            let lobby = Lobby::from_keyword(keyword).unwrap();
            assert_eq!(lobby.keyword(), keyword);
        }
    }

    #[test]
    fn sound_lookup_is_case_insensitive() {
        assert_eq!(resolve_sound("note pling"), Some("note.pling"));
        assert_eq!(resolve_sound("Note Pling"), Some("note.pling"));
        assert_eq!(resolve_sound("nope"), None);
    }

    mod props {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn sound_lookup_survives_any_casing(
                index in 0usize..SOUNDS.len(),
                flips in proptest::collection::vec(any::<bool>(), 0..24),
            ) {
                let (friendly, path) = SOUNDS[index];
                let mangled: String = friendly
                    .chars()
                    .enumerate()
                    .map(|(i, c)| {
                        if flips.get(i).copied().unwrap_or(false) {
                            if c.is_ascii_lowercase() {
                                c.to_ascii_uppercase()
                            } else {
                                c.to_ascii_lowercase()
                            }
                        } else {
                            c
                        }
                    })
                    .collect();
                prop_assert_eq!(resolve_sound(&mangled), Some(path));
            }

            #[test]
            fn amount_display_round_trips_literals(value in any::<i64>()) {
                let amount = Amount::Literal(value);
                prop_assert_eq!(amount.to_string().parse::<i64>(), Ok(value));
            }
        }
    }
}
