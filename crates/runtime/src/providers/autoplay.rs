//! Scripted player policy for headless runs.

use game_core::{
    Action, Actor, Ai, Consumable, Direction, EntityId, GameMap, GameRng, LevelUpAction,
    LevelUpChoice, MeleeAction, MoveAction, Position, UseItemAction,
};

use crate::api::{ActionProvider, ProviderKind, Result, RuntimeError};
use crate::providers::pathfinding::bfs_path;

/// Plays the player character without input.
///
/// In priority order: spend a pending level-up on Constitution, drink a
/// healing item below half health, attack an adjacent hostile, pick up what
/// lies underfoot, take the stairs, chase the nearest visible hostile, walk
/// to the stairs, wait.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoPlayProvider;

fn is_threat(actor: &Actor) -> bool {
    matches!(actor.ai, Some(Ai::Hostile) | Some(Ai::Confused { .. }))
}

fn step_toward(entity: EntityId, map: &GameMap, from: Position, to: Position) -> Option<Action> {
    let next = *bfs_path(map, from, to)?.first()?;
    let direction = Direction::from_offset(next.x - from.x, next.y - from.y)?;
    Some(Action::Move(MoveAction::new(entity, direction)))
}

impl ActionProvider for AutoPlayProvider {
    fn provide_action(&self, entity: EntityId, map: &GameMap, _rng: &mut GameRng) -> Result<Action> {
        let player = map
            .actor(entity)
            .filter(|actor| actor.is_alive())
            .ok_or_else(|| RuntimeError::provider(ProviderKind::Player, entity, "no living actor"))?;
        let here = player.position();

        if player.level.requires_level_up() {
            return Ok(Action::LevelUp(LevelUpAction::new(
                entity,
                LevelUpChoice::Constitution,
            )));
        }

        if player.hp() * 2 < player.max_hp() {
            let potion = player
                .inventory
                .items()
                .iter()
                .position(|item| matches!(item.consumable, Some(Consumable::Healing { .. })));
            if let Some(index) = potion {
                return Ok(Action::UseItem(UseItemAction::new(entity, index, None)));
            }
        }

        let threats: Vec<&Actor> = map
            .living_actors()
            .filter(|actor| actor.id != entity && is_threat(actor))
            .filter(|actor| map.is_visible(actor.position()))
            .collect();

        if let Some(adjacent) = threats.iter().find(|a| a.position().chebyshev(here) <= 1) {
            let target = adjacent.position();
            if let Some(direction) = Direction::from_offset(target.x - here.x, target.y - here.y) {
                return Ok(Action::Melee(MeleeAction::new(entity, direction)));
            }
        }

        if map.item_index_at(here).is_some() && !player.inventory.is_full() {
            return Ok(Action::pickup(entity));
        }

        if map.downstairs == Some(here) {
            return Ok(Action::take_stairs(entity));
        }

        let nearest = threats
            .iter()
            .min_by(|a, b| a.position().distance(here).total_cmp(&b.position().distance(here)));
        if let Some(action) = nearest.and_then(|t| step_toward(entity, map, here, t.position())) {
            return Ok(action);
        }

        if let Some(action) = map
            .downstairs
            .and_then(|stairs| step_toward(entity, map, here, stairs))
        {
            return Ok(action);
        }

        Ok(Action::wait(entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Entity, Fighter, Rgb, Tile};

    fn open_floor() -> GameMap {
        let mut map = GameMap::new(10, 10);
        for y in 1..9 {
            for x in 1..9 {
                map.set_tile(Position::new(x, y), Tile::FLOOR).expect("in bounds");
            }
        }
        let player = Actor::new(
            Entity::new("Player", '@', Rgb::WHITE),
            Ai::Controlled,
            Fighter::new(30, 10, 0, 0, 1, 5),
        );
        map.place_player(player, Position::new(2, 2));
        map.reveal_all();
        map
    }

    fn orc() -> Actor {
        Actor::new(
            Entity::new("Orc", 'o', Rgb(63, 127, 63)),
            Ai::Hostile,
            Fighter::new(10, 1, 0, 0, 0, 3),
        )
    }

    fn decide(map: &GameMap) -> Action {
        AutoPlayProvider
            .provide_action(EntityId::PLAYER, map, &mut GameRng::new(0))
            .expect("decides")
    }

    #[test]
    fn attacks_adjacent_hostiles() {
        let mut map = open_floor();
        map.spawn_actor(orc(), Position::new(3, 2));
        assert_eq!(
            decide(&map),
            Action::Melee(MeleeAction::new(EntityId::PLAYER, Direction::East))
        );
    }

    #[test]
    fn heads_for_the_stairs_when_idle() {
        let mut map = open_floor();
        map.set_downstairs(Position::new(2, 6)).expect("in bounds");
        assert_eq!(
            decide(&map),
            Action::Move(MoveAction::new(EntityId::PLAYER, Direction::South))
        );

        map.player_mut().expect("player").entity.position = Position::new(2, 6);
        assert_eq!(decide(&map), Action::take_stairs(EntityId::PLAYER));
    }

    #[test]
    fn spends_pending_level_ups_first() {
        let mut map = open_floor();
        map.spawn_actor(orc(), Position::new(3, 2));
        let level = &mut map.player_mut().expect("player").level;
        level.level_up_base = 10;
        level.current_xp = level.experience_to_next_level() + 1;
        assert_eq!(
            decide(&map),
            Action::LevelUp(LevelUpAction::new(EntityId::PLAYER, LevelUpChoice::Constitution))
        );
    }

    #[test]
    fn waits_with_nothing_to_do() {
        assert_eq!(decide(&open_floor()), Action::wait(EntityId::PLAYER));
    }
}
