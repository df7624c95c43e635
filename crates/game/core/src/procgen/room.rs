use crate::state::{GameMap, MapError, Position, Tile};

/// Axis-aligned room. The outer edge (`x1`, `y1`, `x2`, `y2`) stays wall;
/// only the inner area is carved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RectangularRoom {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectangularRoom {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub const fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Carvable tiles: `x1 + 1 .. x2` by `y1 + 1 .. y2`.
    pub fn inner(&self) -> impl Iterator<Item = Position> + use<> {
        let (x1, y1, x2, y2) = (self.x1, self.y1, self.x2, self.y2);
        (y1 + 1..y2).flat_map(move |y| (x1 + 1..x2).map(move |x| Position::new(x, y)))
    }

    /// Overlap test including shared edges, so accepted rooms never touch.
    pub const fn intersects(&self, other: &RectangularRoom) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    pub const fn contains(&self, position: Position) -> bool {
        position.x > self.x1 && position.x < self.x2 && position.y > self.y1 && position.y < self.y2
    }

    pub fn carve(&self, map: &mut GameMap) -> Result<(), MapError> {
        for position in self.inner() {
            map.set_tile(position, Tile::FLOOR)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_and_inner_follow_the_outer_edge() {
        let room = RectangularRoom::new(2, 3, 5, 4);
        assert_eq!(room.center(), Position::new(4, 5));
        let inner: Vec<_> = room.inner().collect();
        assert_eq!(inner.len(), 4 * 3);
        assert_eq!(inner.first(), Some(&Position::new(3, 4)));
        assert_eq!(inner.last(), Some(&Position::new(6, 6)));
    }

    #[test]
    fn touching_rooms_intersect() {
        let a = RectangularRoom::new(0, 0, 5, 5);
        let b = RectangularRoom::new(5, 0, 5, 5);
        let c = RectangularRoom::new(6, 0, 5, 5);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }
}
