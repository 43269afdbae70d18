//! Top-level containers for action lists.
//!
//! A source file compiles to a sequence of holders. Actions before any
//! `goto` header land in an [`Unknown`](ActionHolder::Unknown) holder;
//! `goto function "name"` and `goto event "name"` open the other two.

use serde::{Deserialize, Serialize};

use crate::action::Action;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionHolder {
    Unknown {
        actions: Option<Vec<Action>>,
    },
    Function {
        name: Option<String>,
        actions: Option<Vec<Action>>,
    },
    Event {
        event: Option<String>,
        actions: Option<Vec<Action>>,
    },
}

impl ActionHolder {
    pub fn kind(&self) -> ActionHolderKind {
        match self {
            Self::Unknown { .. } => ActionHolderKind::Unknown,
            Self::Function { .. } => ActionHolderKind::Function,
            Self::Event { .. } => ActionHolderKind::Event,
        }
    }

    pub fn actions(&self) -> &[Action] {
        match self {
            Self::Unknown { actions }
            | Self::Function { actions, .. }
            | Self::Event { actions, .. } => actions.as_deref().unwrap_or_default(),
        }
    }
}

/// The discriminant of an [`ActionHolder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionHolderKind {
    Unknown,
    Function,
    Event,
}

impl ActionHolderKind {
    /// The `goto` target keyword, if this holder kind has a header.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Unknown => None,
            Self::Function => Some("function"),
            Self::Event => Some("event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_accessor_covers_all_variants() {
        let holder = ActionHolder::Function {
            name: Some("spawn".to_string()),
            actions: Some(vec![Action::Kill]),
        };
        assert_eq!(holder.kind(), ActionHolderKind::Function);
        assert_eq!(holder.actions().len(), 1);

        let empty = ActionHolder::Unknown { actions: None };
        assert!(empty.actions().is_empty());
    }
}
