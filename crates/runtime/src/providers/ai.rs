//! Decision making for monsters, driven by each actor's [`Ai`] state.

use game_core::{
    Action, Ai, BumpAction, Direction, EntityId, GameMap, GameRng, MeleeAction, MoveAction,
    Position,
};
use rand::seq::SliceRandom;

use crate::api::{ActionProvider, ProviderKind, Result, RuntimeError};
use crate::providers::pathfinding::bfs_path;

/// Default NPC policy.
///
/// - Hostile: while its tile is visible, attacks the player when adjacent and
///   otherwise walks the BFS path toward them; waits when out of sight.
/// - Neutral: wanders one random step.
/// - Fleeing: steps to the free neighbour farthest from the attacker.
/// - Confused: bumps in a random direction, attacking whatever is there.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonsterAiProvider;

impl MonsterAiProvider {
    fn hostile(entity: EntityId, position: Position, map: &GameMap) -> Action {
        let Some(target) = map.player().filter(|p| p.is_alive()) else {
            return Action::wait(entity);
        };
        if !map.is_visible(position) {
            return Action::wait(entity);
        }
        let goal = target.position();
        if position.chebyshev(goal) <= 1 {
            if let Some(direction) = Direction::from_offset(goal.x - position.x, goal.y - position.y) {
                return Action::Melee(MeleeAction::new(entity, direction));
            }
        }
        let next = bfs_path(map, position, goal).and_then(|path| path.first().copied());
        match next.and_then(|step| Direction::from_offset(step.x - position.x, step.y - position.y)) {
            Some(direction) => Action::Move(MoveAction::new(entity, direction)),
            None => Action::wait(entity),
        }
    }

    fn wander(entity: EntityId, position: Position, map: &GameMap, rng: &mut GameRng) -> Action {
        let open: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|d| {
                let next = d.step(position);
                map.is_walkable(next) && map.blocking_actor_at(next).is_none()
            })
            .collect();
        match open.choose(rng) {
            Some(&direction) => Action::Move(MoveAction::new(entity, direction)),
            None => Action::wait(entity),
        }
    }

    fn flee(entity: EntityId, position: Position, from: EntityId, map: &GameMap) -> Action {
        let Some(threat) = map.actor(from).map(|a| a.position()) else {
            return Action::wait(entity);
        };
        let current = position.distance(threat);
        let best = Direction::ALL
            .into_iter()
            .filter(|d| {
                let next = d.step(position);
                map.is_walkable(next) && map.blocking_actor_at(next).is_none()
            })
            .map(|d| (d, d.step(position).distance(threat)))
            .filter(|&(_, distance)| distance > current)
            .max_by(|a, b| a.1.total_cmp(&b.1));
        match best {
            Some((direction, _)) => Action::Move(MoveAction::new(entity, direction)),
            None => Action::wait(entity),
        }
    }
}

impl ActionProvider for MonsterAiProvider {
    fn provide_action(&self, entity: EntityId, map: &GameMap, rng: &mut GameRng) -> Result<Action> {
        let actor = map
            .actor(entity)
            .ok_or_else(|| RuntimeError::provider(ProviderKind::Npc, entity, "actor not on map"))?;
        let position = actor.position();
        let action = match &actor.ai {
            None => {
                return Err(RuntimeError::provider(ProviderKind::Npc, entity, "actor is dead"));
            }
            Some(Ai::Controlled) => Action::wait(entity),
            Some(Ai::Hostile) => Self::hostile(entity, position, map),
            Some(Ai::Neutral) => Self::wander(entity, position, map, rng),
            Some(Ai::Fleeing { from, .. }) => Self::flee(entity, position, *from, map),
            Some(Ai::Confused { .. }) => {
                let direction = Direction::ALL
                    .choose(rng)
                    .copied()
                    .unwrap_or(Direction::North);
                Action::Bump(BumpAction::new(entity, direction))
            }
        };
        tracing::debug!(%entity, action = action.name(), "npc decided");
        Ok(action)
    }
}
