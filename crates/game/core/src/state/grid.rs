use super::{MapError, Position};

/// Dense row-major 2D array with checked access.
///
/// Dimensions are fixed at construction. Out-of-bounds reads and writes are
/// reported as [`MapError::OutOfBounds`], never clamped.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T> {
    width: i32,
    height: i32,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Grid filled with `fill`. Non-positive dimensions give an empty grid.
    pub fn new(width: i32, height: i32, fill: T) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![fill; (width as usize) * (height as usize)],
        }
    }

    pub fn fill(&mut self, value: T) {
        self.cells.iter_mut().for_each(|cell| *cell = value.clone());
    }
}

impl<T> Grid<T> {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && position.x < self.width && position.y < self.height
    }

    fn index(&self, position: Position) -> Result<usize, MapError> {
        if self.contains(position) {
            Ok((position.y as usize) * (self.width as usize) + position.x as usize)
        } else {
            Err(MapError::OutOfBounds {
                position,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn get(&self, position: Position) -> Result<&T, MapError> {
        let index = self.index(position)?;
        Ok(&self.cells[index])
    }

    pub fn get_mut(&mut self, position: Position) -> Result<&mut T, MapError> {
        let index = self.index(position)?;
        Ok(&mut self.cells[index])
    }

    pub fn set(&mut self, position: Position, value: T) -> Result<(), MapError> {
        *self.get_mut(position)? = value;
        Ok(())
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<T> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        self.positions().zip(self.cells.iter())
    }
}
