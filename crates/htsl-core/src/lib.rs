//! HTSL Core Types and Definitions
//!
//! This crate provides the foundational types for the HTSL language. It
//! includes:
//!
//! - **Actions**: The bare action model ([`action::Action`]) and its
//!   discriminant ([`action::ActionKind`])
//! - **Conditions**: The bare condition model ([`condition::Condition`])
//! - **Holders**: Top-level containers for action lists ([`holder::ActionHolder`])
//! - **Arguments**: Supporting argument enumerations ([`arguments`] module)
//! - **Semantics**: Per-variant field descriptors driving code generation and
//!   editor tooling ([`semantics`] module)
//!
//! The bare model is fully owned and span-free. Parsed trees (which carry
//! spans and parse-failure states) live in the `htsl-parser` crate and lower
//! into these types.

pub mod action;
pub mod arguments;
pub mod condition;
pub mod holder;
pub mod semantics;

pub use action::{Action, ActionKind};
pub use arguments::{
    Amount, Comparison, Enchantment, Gamemode, InventorySlot, ItemAmount, ItemLocation,
    ItemProperty, Lobby, Location, Operation, Permission, PotionEffect,
};
pub use condition::{Condition, ConditionKind};
pub use holder::{ActionHolder, ActionHolderKind};
pub use semantics::{FieldDesc, SemanticKind, ValueRef};
