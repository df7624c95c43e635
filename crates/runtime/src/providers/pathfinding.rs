//! Breadth-first pathfinding over the tile grid.

use std::collections::VecDeque;

use game_core::state::Grid;
use game_core::{Direction, GameMap, Position};

/// Shortest 8-connected walk from `from` to `to`.
///
/// Returns the steps after `from`, ending with `to`; empty when they are the
/// same tile and `None` when `to` cannot be reached. Tiles holding a blocking
/// actor are impassable except for `to` itself, so a path can end on the
/// target being chased.
pub fn bfs_path(map: &GameMap, from: Position, to: Position) -> Option<Vec<Position>> {
    if from == to {
        return Some(Vec::new());
    }
    if !map.in_bounds(from) || !map.in_bounds(to) || !map.is_walkable(to) {
        return None;
    }

    let mut parent: Grid<Option<Position>> = Grid::new(map.width(), map.height(), None);
    let mut queue = VecDeque::new();
    parent.set(from, Some(from)).ok()?;
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        for direction in Direction::ALL {
            let next = direction.step(current);
            if !map.in_bounds(next) || !map.is_walkable(next) {
                continue;
            }
            if matches!(parent.get(next), Ok(Some(_))) {
                continue;
            }
            if next != to && map.blocking_actor_at(next).is_some() {
                continue;
            }
            parent.set(next, Some(current)).ok()?;
            if next == to {
                return Some(walk_back(&parent, from, to));
            }
            queue.push_back(next);
        }
    }
    None
}

fn walk_back(parent: &Grid<Option<Position>>, from: Position, to: Position) -> Vec<Position> {
    let mut path = vec![to];
    let mut current = to;
    while let Ok(Some(previous)) = parent.get(current) {
        if *previous == from {
            break;
        }
        current = *previous;
        path.push(current);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Tile;

    fn open_map() -> GameMap {
        let mut map = GameMap::new(10, 10);
        for y in 1..9 {
            for x in 1..9 {
                map.set_tile(Position::new(x, y), Tile::FLOOR).expect("in bounds");
            }
        }
        map
    }

    #[test]
    fn diagonal_steps_are_used() {
        let map = open_map();
        let path = bfs_path(&map, Position::new(1, 1), Position::new(4, 4)).expect("reachable");
        assert_eq!(
            path,
            vec![Position::new(2, 2), Position::new(3, 3), Position::new(4, 4)]
        );
    }

    #[test]
    fn walls_are_routed_around() {
        let mut map = open_map();
        for y in 1..8 {
            map.set_tile(Position::new(4, y), Tile::WALL).expect("in bounds");
        }
        let path = bfs_path(&map, Position::new(2, 2), Position::new(6, 2)).expect("reachable");
        assert!(path.iter().all(|p| p.x != 4 || p.y == 8));
        assert_eq!(path.last(), Some(&Position::new(6, 2)));
        for pair in path.windows(2) {
            assert_eq!(pair[0].chebyshev(pair[1]), 1);
        }
    }

    #[test]
    fn sealed_target_is_unreachable() {
        let mut map = open_map();
        for (x, y) in [(5, 5), (6, 5), (7, 5), (5, 6), (7, 6), (5, 7), (6, 7), (7, 7)] {
            map.set_tile(Position::new(x, y), Tile::WALL).expect("in bounds");
        }
        assert_eq!(bfs_path(&map, Position::new(1, 1), Position::new(6, 6)), None);
        assert_eq!(bfs_path(&map, Position::new(3, 3), Position::new(3, 3)), Some(Vec::new()));
    }
}
