//! Action resolver.
//!
//! Every command is a small struct implementing [`ActionTransition`]. The
//! engine drives it through `pre_validate → apply → post_validate`. Each
//! action checks everything it can in `pre_validate` and only then mutates,
//! so an [`ImpossibleAction`] never leaves a half-applied turn behind.
//!
//! # Module Structure
//!
//! - `error`: [`ImpossibleAction`] (player-facing) and [`ActionError`]
//! - `movement`: wait, bump, move, melee, take stairs
//! - `inventory`: pick up, drop, equip, attach/detach body parts
//! - `consumable`: using items from the inventory
//! - `ritual`: sacrificing a body part
//! - `progression`: level-up choices
//! - `system`: per-turn AI timers

mod consumable;
mod error;
mod inventory;
mod movement;
mod progression;
mod ritual;
mod system;

pub use consumable::UseItemAction;
pub use error::{ActionError, ImpossibleAction};
pub use inventory::{AttachAction, DropAction, DropTarget, EquipAction, EquipTarget, PickupAction};
pub use movement::{BumpAction, MeleeAction, MoveAction, TakeStairsAction, WaitAction};
pub use progression::{LevelUpAction, LevelUpChoice};
pub use ritual::{RitualOutcome, SacrificeAction, plan_offerings, ritual_shortfall};
pub use system::PrepareTurnAction;

use crate::body::Toggle;
use crate::combat::Hit;
use crate::env::GameEnv;
use crate::state::{Actor, AiTick, EntityId, EquipSlot, GameMap, Position, Stowed};

/// Defines how a concrete action mutates the map.
///
/// `pre_validate` and `post_validate` are side-effect free. `apply` may assume
/// `pre_validate` succeeded against the same map.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Entity performing this action.
    fn actor(&self) -> EntityId;

    /// Validates pre-conditions using the map **before** mutation.
    fn pre_validate(&self, _map: &GameMap, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the map directly.
    fn apply(&self, map: &mut GameMap, env: &mut GameEnv<'_>) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the map **after** mutation.
    fn post_validate(&self, _map: &GameMap, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// One of the eight compass steps. `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// `(dx, dy)` offset of one step.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    /// Direction of a single step, if `(dx, dy)` is one.
    pub fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.offset() == (dx, dy))
    }

    pub fn step(self, from: Position) -> Position {
        let (dx, dy) = self.offset();
        from.offset(dx, dy)
    }
}

/// A command bound to the actor performing it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Wait(WaitAction),
    Bump(BumpAction),
    Move(MoveAction),
    Melee(MeleeAction),
    Pickup(PickupAction),
    Drop(DropAction),
    Equip(EquipAction),
    Attach(AttachAction),
    UseItem(UseItemAction),
    TakeStairs(TakeStairsAction),
    Sacrifice(SacrificeAction),
    LevelUp(LevelUpAction),
    /// Ticks timed AI states before a non-player actor chooses its move.
    PrepareTurn(PrepareTurnAction),
}

impl Action {
    pub fn actor(&self) -> EntityId {
        match self {
            Action::Wait(a) => a.actor(),
            Action::Bump(a) => a.actor(),
            Action::Move(a) => a.actor(),
            Action::Melee(a) => a.actor(),
            Action::Pickup(a) => a.actor(),
            Action::Drop(a) => a.actor(),
            Action::Equip(a) => a.actor(),
            Action::Attach(a) => a.actor(),
            Action::UseItem(a) => a.actor(),
            Action::TakeStairs(a) => a.actor(),
            Action::Sacrifice(a) => a.actor(),
            Action::LevelUp(a) => a.actor(),
            Action::PrepareTurn(a) => a.actor(),
        }
    }

    /// Stable snake_case name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Wait(_) => "wait",
            Action::Bump(_) => "bump",
            Action::Move(_) => "move",
            Action::Melee(_) => "melee",
            Action::Pickup(_) => "pickup",
            Action::Drop(_) => "drop",
            Action::Equip(_) => "equip",
            Action::Attach(_) => "attach",
            Action::UseItem(_) => "use_item",
            Action::TakeStairs(_) => "take_stairs",
            Action::Sacrifice(_) => "sacrifice",
            Action::LevelUp(_) => "level_up",
            Action::PrepareTurn(_) => "prepare_turn",
        }
    }

    pub fn wait(actor: EntityId) -> Self {
        Action::Wait(WaitAction::new(actor))
    }

    pub fn bump(actor: EntityId, direction: Direction) -> Self {
        Action::Bump(BumpAction::new(actor, direction))
    }

    pub fn pickup(actor: EntityId) -> Self {
        Action::Pickup(PickupAction::new(actor))
    }

    pub fn take_stairs(actor: EntityId) -> Self {
        Action::TakeStairs(TakeStairsAction::new(actor))
    }
}

/// What an action did, for callers that need more than the log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionResult {
    Wait,
    Move { to: Position },
    Attack(Option<Hit>),
    Pickup(Stowed),
    Drop,
    Equip { slot: EquipSlot },
    Attach(Toggle),
    UseItem { hits: Vec<Hit> },
    Descend,
    Ritual(RitualOutcome),
    LevelUp(LevelUpChoice),
    PrepareTurn(AiTick),
}

impl ActionResult {
    /// True when this result hands the floor over to the next generator.
    pub fn is_descend(&self) -> bool {
        matches!(self, ActionResult::Descend)
    }
}

/// Looks up a living actor.
pub(crate) fn living_actor(map: &GameMap, id: EntityId) -> Result<&Actor, ActionError> {
    let actor = map.actor(id).ok_or(ActionError::ActorNotFound(id))?;
    if !actor.is_alive() {
        return Err(ActionError::ActorDead(id));
    }
    Ok(actor)
}

pub(crate) fn living_actor_mut(map: &mut GameMap, id: EntityId) -> Result<&mut Actor, ActionError> {
    let actor = map.actor_mut(id).ok_or(ActionError::ActorNotFound(id))?;
    if !actor.is_alive() {
        return Err(ActionError::ActorDead(id));
    }
    Ok(actor)
}
