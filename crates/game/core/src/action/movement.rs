//! Directional actions and the stairs.

use crate::action::{
    ActionError, ActionResult, ActionTransition, Direction, ImpossibleAction, living_actor,
    living_actor_mut,
};
use crate::combat::{self, Hit};
use crate::env::GameEnv;
use crate::log::MessageTag;
use crate::state::{EntityId, GameMap, Position};

/// Skips the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitAction {
    pub actor: EntityId,
}

impl WaitAction {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }
}

impl ActionTransition for WaitAction {
    type Error = ActionError;
    type Result = ();

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, map: &GameMap, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        living_actor(map, self.actor).map(|_| ())
    }

    fn apply(&self, _map: &mut GameMap, _env: &mut GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn destination(map: &GameMap, actor: EntityId, direction: Direction) -> Result<Position, ActionError> {
    Ok(direction.step(living_actor(map, actor)?.position()))
}

/// Step into a tile: attacks whoever stands there, otherwise moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BumpAction {
    pub actor: EntityId,
    pub direction: Direction,
}

impl BumpAction {
    pub fn new(actor: EntityId, direction: Direction) -> Self {
        Self { actor, direction }
    }

    fn attacks(&self, map: &GameMap) -> Result<bool, ActionError> {
        let dest = destination(map, self.actor, self.direction)?;
        Ok(map
            .living_actor_at(dest)
            .is_some_and(|target| target != self.actor))
    }
}

impl ActionTransition for BumpAction {
    type Error = ActionError;
    type Result = ActionResult;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, map: &GameMap, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if self.attacks(map)? {
            MeleeAction::new(self.actor, self.direction).pre_validate(map, env)
        } else {
            MoveAction::new(self.actor, self.direction).pre_validate(map, env)
        }
    }

    fn apply(&self, map: &mut GameMap, env: &mut GameEnv<'_>) -> Result<ActionResult, Self::Error> {
        if self.attacks(map)? {
            MeleeAction::new(self.actor, self.direction)
                .apply(map, env)
                .map(ActionResult::Attack)
        } else {
            MoveAction::new(self.actor, self.direction)
                .apply(map, env)
                .map(|to| ActionResult::Move { to })
        }
    }
}

/// Walks one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: EntityId,
    pub direction: Direction,
}

impl MoveAction {
    pub fn new(actor: EntityId, direction: Direction) -> Self {
        Self { actor, direction }
    }
}

impl ActionTransition for MoveAction {
    type Error = ActionError;
    type Result = Position;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, map: &GameMap, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let dest = destination(map, self.actor, self.direction)?;
        if !map.in_bounds(dest)
            || !map.is_walkable(dest)
            || map.blocking_actor_at(dest).is_some()
        {
            return Err(ImpossibleAction::Blocked.into());
        }
        Ok(())
    }

    fn apply(&self, map: &mut GameMap, _env: &mut GameEnv<'_>) -> Result<Position, Self::Error> {
        let actor = living_actor_mut(map, self.actor)?;
        let (dx, dy) = self.direction.offset();
        actor.move_by(dx, dy);
        Ok(actor.position())
    }

    fn post_validate(&self, map: &GameMap, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let position = living_actor(map, self.actor)?.position();
        map.tile(position)?;
        Ok(())
    }
}

/// Hits whoever stands in the given direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeleeAction {
    pub actor: EntityId,
    pub direction: Direction,
}

impl MeleeAction {
    pub fn new(actor: EntityId, direction: Direction) -> Self {
        Self { actor, direction }
    }

    fn target(&self, map: &GameMap) -> Result<EntityId, ActionError> {
        let dest = destination(map, self.actor, self.direction)?;
        map.living_actor_at(dest)
            .filter(|target| *target != self.actor)
            .ok_or_else(|| ImpossibleAction::NothingToAttack.into())
    }
}

impl ActionTransition for MeleeAction {
    type Error = ActionError;
    type Result = Option<Hit>;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, map: &GameMap, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        self.target(map).map(|_| ())
    }

    fn apply(&self, map: &mut GameMap, env: &mut GameEnv<'_>) -> Result<Option<Hit>, Self::Error> {
        let target_id = self.target(map)?;
        let attacker = living_actor(map, self.actor)?;
        let target = living_actor(map, target_id)?;

        let damage = combat::melee_damage(attacker.power(), target.defense());
        let description = format!(
            "{} attacks {}",
            combat::capitalize(attacker.name()),
            target.name()
        );
        let tag = combat::attack_tag(self.actor);

        if damage <= 0 {
            env.log
                .add_message(format!("{description} but does no damage."), tag);
            return Ok(None);
        }

        env.log.add_message(format!("{description} for {damage}."), tag);
        let hit = combat::apply_damage(map, target_id, damage, Some(self.actor), env);
        combat::provoke(map, target_id, self.actor, env.config.flee_turns);
        Ok(hit)
    }
}

/// Descends when standing on the down stairs.
///
/// The caller is responsible for generating the next floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TakeStairsAction {
    pub actor: EntityId,
}

impl TakeStairsAction {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }
}

impl ActionTransition for TakeStairsAction {
    type Error = ActionError;
    type Result = ();

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, map: &GameMap, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let position = living_actor(map, self.actor)?.position();
        if map.downstairs != Some(position) {
            return Err(ImpossibleAction::NoStairs.into());
        }
        Ok(())
    }

    fn apply(&self, _map: &mut GameMap, env: &mut GameEnv<'_>) -> Result<(), Self::Error> {
        env.log
            .add_message("You descend the staircase.".to_string(), MessageTag::Descend);
        Ok(())
    }
}
