use rand::Rng;

use crate::state::{GameMap, MapError, Position, Tile};

/// Tiles of an L-shaped corridor from `start` to `end`, both inclusive.
///
/// A coin flip picks whether the horizontal or the vertical leg comes first.
pub fn l_tunnel<R: Rng + ?Sized>(start: Position, end: Position, rng: &mut R) -> Vec<Position> {
    let corner = if rng.gen_bool(0.5) {
        Position::new(end.x, start.y)
    } else {
        Position::new(start.x, end.y)
    };
    let mut tiles = straight(start, corner);
    tiles.extend(straight(corner, end));
    tiles
}

/// Axis-aligned segment; the endpoints share a row or a column.
fn straight(from: Position, to: Position) -> Vec<Position> {
    let (dx, dy) = ((to.x - from.x).signum(), (to.y - from.y).signum());
    let steps = (to.x - from.x).abs().max((to.y - from.y).abs());
    (0..=steps).map(|i| from.offset(dx * i, dy * i)).collect()
}

/// Carves every tile in `path` to floor.
pub fn carve(map: &mut GameMap, path: &[Position]) -> Result<(), MapError> {
    for &position in path {
        map.set_tile(position, Tile::FLOOR)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;

    #[test]
    fn tunnel_connects_both_ends_with_one_corner() {
        let mut rng = GameRng::new(3);
        for _ in 0..8 {
            let (start, end) = (Position::new(2, 2), Position::new(7, 5));
            let path = l_tunnel(start, end, &mut rng);
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&end));
            // 5 + 3 steps plus both endpoints, the corner listed twice.
            assert_eq!(path.len(), 10);
            assert!(path.windows(2).all(|w| w[0].chebyshev(w[1]) <= 1));
        }
    }
}
