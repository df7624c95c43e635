//! Action error types.

use crate::body::BodyError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, EquipSlot, MapError};
use crate::templates::TemplateError;

/// A precondition the player can see and react to.
///
/// The display text is the exact line shown in the message log. Raising one
/// aborts the action before anything changed, and the turn is not spent.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ImpossibleAction {
    #[error("That way is blocked.")]
    Blocked,

    #[error("Nothing to attack.")]
    NothingToAttack,

    #[error("There is nothing here to pick up.")]
    NothingToPickUp,

    #[error("Your inventory is full.")]
    InventoryFull,

    #[error("You cannot fit more to your body.")]
    BodyFull,

    #[error("There are no stairs here.")]
    NoStairs,

    #[error("Your health is already full.")]
    HealthFull,

    #[error("No enemy is close enough to strike.")]
    NoEnemyInRange,

    #[error("You cannot target an area that you cannot see.")]
    TargetNotVisible,

    #[error("You must select an enemy to target.")]
    NoEnemyAtTarget,

    #[error("You cannot confuse yourself!")]
    ConfuseSelf,

    #[error("There are no targets in the radius.")]
    NoTargetsInRadius,

    #[error("The {0} cannot be used.")]
    NotUsable(String),

    #[error("The {0} cannot be equipped.")]
    NotEquippable(String),

    #[error("The {0} is not a fit offering.")]
    NotAnOffering(String),

    #[error("Missing: {}", .0.join(", "))]
    RitualIncomplete(Vec<&'static str>),

    #[error("You are not ready to level up.")]
    NoLevelUpPending,
}

/// Errors raised by action transitions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Impossible(#[from] ImpossibleAction),

    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("actor {0} is dead")]
    ActorDead(EntityId),

    #[error("inventory slot {0} is empty")]
    NoSuchItem(usize),

    #[error("nothing equipped in the {0} slot")]
    EmptySlot(EquipSlot),

    #[error("inventory slot {0} is offered twice")]
    DuplicateOffering(usize),

    #[error(transparent)]
    Body(#[from] BodyError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Map(#[from] MapError),
}

impl ActionError {
    /// The player-facing failure, if this is one.
    pub fn as_impossible(&self) -> Option<&ImpossibleAction> {
        match self {
            ActionError::Impossible(impossible) => Some(impossible),
            _ => None,
        }
    }
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::Impossible(_) => ErrorSeverity::Recoverable,
            ActionError::ActorNotFound(_)
            | ActionError::ActorDead(_)
            | ActionError::NoSuchItem(_)
            | ActionError::EmptySlot(_)
            | ActionError::DuplicateOffering(_)
            | ActionError::Body(_) => ErrorSeverity::Validation,
            ActionError::Template(error) => error.severity(),
            ActionError::Map(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::Impossible(_) => "ACTION_IMPOSSIBLE",
            ActionError::ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            ActionError::ActorDead(_) => "ACTION_ACTOR_DEAD",
            ActionError::NoSuchItem(_) => "ACTION_NO_SUCH_ITEM",
            ActionError::EmptySlot(_) => "ACTION_EMPTY_SLOT",
            ActionError::DuplicateOffering(_) => "ACTION_DUPLICATE_OFFERING",
            ActionError::Body(_) => "ACTION_BODY",
            ActionError::Template(error) => error.error_code(),
            ActionError::Map(error) => error.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impossible_text_is_the_log_line() {
        assert_eq!(ImpossibleAction::Blocked.to_string(), "That way is blocked.");
        assert_eq!(
            ImpossibleAction::RitualIncomplete(vec!["an implement", "an offering"]).to_string(),
            "Missing: an implement, an offering"
        );
    }

    #[test]
    fn only_impossible_is_recoverable() {
        let impossible = ActionError::from(ImpossibleAction::NoStairs);
        assert!(impossible.severity().is_recoverable());
        assert!(impossible.as_impossible().is_some());
        let missing = ActionError::NoSuchItem(3);
        assert_eq!(missing.severity(), ErrorSeverity::Validation);
        assert!(missing.as_impossible().is_none());
    }
}
