//! Field of view: fills the map's visibility overlay from one viewpoint.
//!
//! A tile is visible when it lies within `radius` (Euclidean) and the
//! Bresenham line from the origin reaches it without passing through an
//! opaque tile. Opaque tiles themselves are visible, so walls are lit.

use game_core::{GameMap, Position};

/// Clears the overlay and marks everything visible from `origin`.
///
/// Returns the number of visible tiles.
pub fn compute_fov(map: &mut GameMap, origin: Position, radius: i32) -> usize {
    map.clear_visibility();
    if !map.in_bounds(origin) {
        return 0;
    }
    let radius = radius.max(0);
    let limit = f64::from(radius) + 0.5;
    let mut lit = Vec::new();
    for y in (origin.y - radius)..=(origin.y + radius) {
        for x in (origin.x - radius)..=(origin.x + radius) {
            let target = Position::new(x, y);
            if !map.in_bounds(target) || origin.distance(target) > limit {
                continue;
            }
            if line_is_clear(map, origin, target) {
                lit.push(target);
            }
        }
    }
    let count = lit.len();
    for position in lit {
        // In bounds by construction.
        let _ = map.mark_visible(position);
    }
    count
}

/// True when every tile strictly between `from` and `to` is transparent.
fn line_is_clear(map: &GameMap, from: Position, to: Position) -> bool {
    bresenham(from, to)
        .into_iter()
        .skip(1)
        .take_while(|&p| p != to)
        .all(|p| map.is_transparent(p))
}

/// Integer line from `from` to `to`, both ends included.
pub fn bresenham(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (from.x, from.y);
    let mut line = Vec::with_capacity((dx - dy) as usize + 1);
    loop {
        line.push(Position::new(x, y));
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    line
}
