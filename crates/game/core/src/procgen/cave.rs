use rand::Rng;

use crate::config::CaveSettings;
use crate::procgen::{
    FloorGenerator, FloorRequest, GeneratedFloor, GenerationError, GeneratorKind, spawn_at,
};
use crate::rng::GameRng;
use crate::state::{Actor, GameMap, Grid, MapError, Position, Tile};

/// Monsters and items drawn up front; spawns pick from these pools.
const SPAWN_POOL: usize = 100;

/// Cellular-automaton cave with a carved diagonal exit.
///
/// Disconnected pockets are possible and left as they are.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaveGenerator;

/// Wall mask after seeding and smoothing. `true` is wall.
fn smoothed_walls<R: Rng + ?Sized>(
    width: i32,
    height: i32,
    settings: &CaveSettings,
    rng: &mut R,
) -> Result<Grid<bool>, MapError> {
    let mut walls = Grid::new(width, height, true);
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            if rng.r#gen::<f64>() < settings.floor_chance {
                walls.set(Position::new(x, y), false)?;
            }
        }
    }

    for _ in 0..settings.smoothing_passes {
        let mut next = Grid::new(width, height, true);
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let here = Position::new(x, y);
                let wall_neighbours = (-1..=1)
                    .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
                    .filter(|&(dx, dy)| (dx, dy) != (0, 0))
                    .filter(|&(dx, dy)| walls.get(here.offset(dx, dy)).is_ok_and(|w| *w))
                    .count() as u32;
                next.set(here, wall_neighbours >= settings.wall_threshold)?;
            }
        }
        walls = next;
    }
    Ok(walls)
}

fn is_floor(map: &GameMap, position: Position) -> bool {
    map.is_walkable(position)
}

/// First floor tile found walking left from the centre, row by row upward.
fn find_start(map: &GameMap) -> Option<Position> {
    let (width, height) = (map.width(), map.height());
    let (mut x, mut y) = (width >> 1, height >> 1);
    for _ in 0..(width * height * 2) {
        if is_floor(map, Position::new(x, y)) {
            return Some(Position::new(x, y));
        }
        x -= 1;
        if x <= 1 {
            y -= 1;
            x = width >> 1;
            if y <= 1 {
                y = height - 1;
            }
        }
    }
    None
}

/// First floor tile on the diagonal walking from the inset far corner
/// towards the origin.
fn find_exit(map: &GameMap, inset: i32) -> Option<Position> {
    let mut position = Position::new(map.width() - inset, map.height() - inset);
    while position.x >= 1 && position.y >= 1 {
        if is_floor(map, position) {
            return Some(position);
        }
        position = position.offset(-1, -1);
    }
    None
}

impl FloorGenerator for CaveGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Cave
    }

    fn generate(
        &self,
        request: &FloorRequest<'_>,
        player: Actor,
        rng: &mut GameRng,
    ) -> Result<GeneratedFloor, GenerationError> {
        let settings = request.config.cave;
        let (width, height) = (request.width(), request.height());
        if width < settings.exit_inset + 2 || height < settings.exit_inset + 2 || width < 4 || height < 4 {
            return Err(GenerationError::MapTooSmall {
                kind: self.kind(),
                width,
                height,
            });
        }

        let walls = smoothed_walls(width, height, &settings, rng)?;
        let mut map = GameMap::new(width, height);
        for (position, wall) in walls.iter() {
            let on_border =
                position.x == 0 || position.y == 0 || position.x == width - 1 || position.y == height - 1;
            if !*wall && !on_border {
                map.set_tile(position, Tile::FLOOR)?;
            }
        }

        let start = match find_start(&map) {
            Some(start) => start,
            None => {
                let center = Position::new(width >> 1, height >> 1);
                tracing::debug!(%center, "cave has no floor near the centre; carving start");
                map.set_tile(center, Tile::FLOOR)?;
                center
            }
        };
        map.place_player(player, start);

        let exit = find_exit(&map, settings.exit_inset)
            .unwrap_or_else(|| Position::new(width - settings.exit_inset, height - settings.exit_inset));
        let interior = |p: &Position| p.x >= 1 && p.y >= 1 && p.x <= width - 2 && p.y <= height - 2;
        for i in 0..settings.exit_path_length {
            let step = exit.offset(-i, -i);
            for tile in [step, step.offset(1, 0), step.offset(0, 1)] {
                if interior(&tile) {
                    map.set_tile(tile, Tile::FLOOR)?;
                }
            }
        }
        map.set_downstairs(exit)?;

        populate(&mut map, start, request, rng)?;
        Ok(GeneratedFloor {
            map,
            rooms: Vec::new(),
            start,
        })
    }
}

/// Scatters entities over floor tiles other than the start.
///
/// Each tile spawns with `spawn_per_mille / 1000` odds; the monster/item
/// split follows the floor caps.
fn populate<R: Rng + ?Sized>(
    map: &mut GameMap,
    start: Position,
    request: &FloorRequest<'_>,
    rng: &mut R,
) -> Result<(), GenerationError> {
    let tables = request.tables;
    let floor = request.floor;
    let monsters = tables.monsters.sample(floor, SPAWN_POOL, rng);
    let items = tables.items.sample(floor, SPAWN_POOL, rng);
    let monster_num = tables.max_monsters.value_at(floor);
    let entity_num = tables.max_items.value_at(floor) + monster_num;
    let spawn_per_mille = request.config.cave.spawn_per_mille;

    for x in 1..map.width() - 1 {
        for y in 1..map.height() - 1 {
            let position = Position::new(x, y);
            if position == start || map.tile(position)? != &Tile::FLOOR {
                continue;
            }
            if rng.gen_range(0..=1000) >= spawn_per_mille {
                continue;
            }
            let pool = if rng.gen_range(0..=entity_num) < monster_num {
                &monsters
            } else {
                &items
            };
            if pool.is_empty() {
                continue;
            }
            let id = &pool[rng.gen_range(0..pool.len())];
            spawn_at(map, request.templates, id, position)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::procgen::standard_tables;
    use crate::procgen::test_support::{player, registry};
    use crate::state::TerrainKind;

    fn generate(seed: u64, floor: u32) -> GeneratedFloor {
        let config = GameConfig::default();
        let templates = registry();
        let tables = standard_tables();
        let request = FloorRequest::new(floor, &config, &templates, &tables);
        CaveGenerator
            .generate(&request, player(), &mut GameRng::new(seed))
            .expect("cave")
    }

    #[test]
    fn border_is_solid_and_start_is_walkable() {
        for seed in 0..10 {
            let floor = generate(seed, 3);
            let map = &floor.map;
            for (position, tile) in map.tiles().iter() {
                let border = position.x == 0
                    || position.y == 0
                    || position.x == map.width() - 1
                    || position.y == map.height() - 1;
                if border {
                    assert_eq!(tile.terrain, TerrainKind::Wall, "seed {seed} at {position}");
                }
            }
            assert!(map.is_walkable(floor.start));
            assert_eq!(map.player().map(|p| p.position()), Some(floor.start));
        }
    }

    #[test]
    fn exit_is_stairs_with_a_carved_approach() {
        let floor = generate(21, 1);
        let exit = floor.map.downstairs.expect("stairs");
        assert_eq!(
            floor.map.tile(exit).map(|t| t.terrain),
            Ok(TerrainKind::DownStairs)
        );
        for i in 1..5 {
            let step = exit.offset(-i, -i);
            if step.x >= 1 && step.y >= 1 {
                assert!(floor.map.is_walkable(step));
            }
        }
    }

    #[test]
    fn nothing_spawns_on_the_start_tile() {
        let floor = generate(8, 6);
        let start = floor.start;
        assert!(
            floor
                .map
                .actors()
                .filter(|a| a.position() == start)
                .all(|a| a.id.is_player())
        );
        assert!(floor.map.items.iter().all(|i| i.entity.position != start));
    }

    #[test]
    fn smoothing_keeps_the_border_walled() {
        let settings = CaveSettings::default();
        let walls = smoothed_walls(30, 20, &settings, &mut GameRng::new(2)).expect("in bounds");
        for (position, wall) in walls.iter() {
            if position.x == 0 || position.y == 0 || position.x == 29 || position.y == 19 {
                assert!(*wall);
            }
        }
    }
}
