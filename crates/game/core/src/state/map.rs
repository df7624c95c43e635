//! Floor state: tile grid, down stairs, actors, ground items and the
//! visibility overlay.

use super::{Actor, EntityId, Grid, Item, Position};
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapError {
    #[error("position {position} is outside the {width}x{height} map")]
    OutOfBounds {
        position: Position,
        width: i32,
        height: i32,
    },
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            MapError::OutOfBounds { .. } => "MAP_OUT_OF_BOUNDS",
        }
    }
}

/// Kind of terrain a tile represents.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    #[default]
    Wall,
    Floor,
    DownStairs,
}

impl TerrainKind {
    pub const fn glyph(self) -> char {
        match self {
            TerrainKind::Wall => '#',
            TerrainKind::Floor => '.',
            TerrainKind::DownStairs => '>',
        }
    }
}

/// One map cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub walkable: bool,
    pub transparent: bool,
    pub terrain: TerrainKind,
}

impl Tile {
    pub const WALL: Self = Self {
        walkable: false,
        transparent: false,
        terrain: TerrainKind::Wall,
    };
    pub const FLOOR: Self = Self {
        walkable: true,
        transparent: true,
        terrain: TerrainKind::Floor,
    };
    pub const DOWN_STAIRS: Self = Self {
        walkable: true,
        transparent: true,
        terrain: TerrainKind::DownStairs,
    };

    pub const fn glyph(&self) -> char {
        self.terrain.glyph()
    }
}

/// A single dungeon floor.
///
/// Owns every entity on it. Actor ids are unique per map; the player always
/// holds [`EntityId::PLAYER`]. Dead actors stay in `actors` as corpses.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameMap {
    tiles: Grid<Tile>,
    pub downstairs: Option<Position>,
    actors: Vec<Actor>,
    pub items: Vec<Item>,
    visible: Grid<bool>,
    explored: Grid<bool>,
    next_actor_id: u32,
}

impl GameMap {
    /// Solid map of walls with no entities.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            tiles: Grid::new(width, height, Tile::WALL),
            downstairs: None,
            actors: Vec::new(),
            items: Vec::new(),
            visible: Grid::new(width, height, false),
            explored: Grid::new(width, height, false),
            next_actor_id: EntityId::PLAYER.0 + 1,
        }
    }

    pub fn width(&self) -> i32 {
        self.tiles.width()
    }

    pub fn height(&self) -> i32 {
        self.tiles.height()
    }

    pub fn tiles(&self) -> &Grid<Tile> {
        &self.tiles
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        self.tiles.contains(position)
    }

    pub fn tile(&self, position: Position) -> Result<&Tile, MapError> {
        self.tiles.get(position)
    }

    pub fn set_tile(&mut self, position: Position, tile: Tile) -> Result<(), MapError> {
        self.tiles.set(position, tile)
    }

    /// Walkable terrain. Out-of-bounds positions are not walkable.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.tiles.get(position).is_ok_and(|tile| tile.walkable)
    }

    pub fn is_transparent(&self, position: Position) -> bool {
        self.tiles.get(position).is_ok_and(|tile| tile.transparent)
    }

    /// Marks the down stairs. The tile must be inside the map.
    pub fn set_downstairs(&mut self, position: Position) -> Result<(), MapError> {
        self.tiles.set(position, Tile::DOWN_STAIRS)?;
        self.downstairs = Some(position);
        Ok(())
    }

    // ===== visibility overlay =====

    pub fn is_visible(&self, position: Position) -> bool {
        self.visible.get(position).is_ok_and(|v| *v)
    }

    pub fn is_explored(&self, position: Position) -> bool {
        self.explored.get(position).is_ok_and(|v| *v)
    }

    /// Clears the visible overlay; explored tiles stay explored.
    pub fn clear_visibility(&mut self) {
        self.visible.fill(false);
    }

    /// Marks a tile visible (and explored).
    pub fn mark_visible(&mut self, position: Position) -> Result<(), MapError> {
        self.visible.set(position, true)?;
        self.explored.set(position, true)
    }

    /// Everything visible, for tests and tooling.
    pub fn reveal_all(&mut self) {
        self.visible.fill(true);
        self.explored.fill(true);
    }

    // ===== actors =====

    /// Adds an actor at `position` and assigns it a fresh id.
    pub fn spawn_actor(&mut self, mut actor: Actor, position: Position) -> EntityId {
        let id = EntityId(self.next_actor_id);
        self.next_actor_id += 1;
        actor.id = id;
        actor.entity.position = position;
        self.actors.push(actor);
        id
    }

    /// Places the player at `position`, keeping its reserved id.
    pub fn place_player(&mut self, mut player: Actor, position: Position) {
        player.id = EntityId::PLAYER;
        player.entity.position = position;
        self.actors.retain(|actor| actor.id != EntityId::PLAYER);
        self.actors.insert(0, player);
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn living_actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter().filter(|actor| actor.is_alive())
    }

    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.actors.iter().find(|actor| actor.id == id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|actor| actor.id == id)
    }

    pub fn player(&self) -> Option<&Actor> {
        self.actor(EntityId::PLAYER)
    }

    pub fn player_mut(&mut self) -> Option<&mut Actor> {
        self.actor_mut(EntityId::PLAYER)
    }

    /// Removes an actor from the map, transferring ownership to the caller.
    pub fn take_actor(&mut self, id: EntityId) -> Option<Actor> {
        let index = self.actors.iter().position(|actor| actor.id == id)?;
        Some(self.actors.remove(index))
    }

    /// Snapshot of living actor ids in map order.
    pub fn living_ids(&self) -> Vec<EntityId> {
        self.living_actors().map(|actor| actor.id).collect()
    }

    pub fn blocking_actor_at(&self, position: Position) -> Option<EntityId> {
        self.actors
            .iter()
            .find(|actor| actor.entity.blocks_movement && actor.position() == position)
            .map(|actor| actor.id)
    }

    pub fn living_actor_at(&self, position: Position) -> Option<EntityId> {
        self.living_actors()
            .find(|actor| actor.position() == position)
            .map(|actor| actor.id)
    }

    /// Living actors other than `exclude` within Euclidean `radius` of `center`.
    ///
    /// Returns a snapshot so callers can mutate the map while applying effects.
    pub fn living_within(
        &self,
        center: Position,
        radius: f64,
        exclude: Option<EntityId>,
    ) -> Vec<EntityId> {
        self.living_actors()
            .filter(|actor| Some(actor.id) != exclude)
            .filter(|actor| actor.position().distance(center) <= radius)
            .map(|actor| actor.id)
            .collect()
    }

    // ===== items =====

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn item_index_at(&self, position: Position) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.entity.position == position)
    }

    pub fn take_item(&mut self, index: usize) -> Option<Item> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// True if any actor (alive or dead) or item stands on `position`.
    pub fn has_entity_at(&self, position: Position) -> bool {
        self.actors.iter().any(|actor| actor.position() == position)
            || self.items.iter().any(|item| item.entity.position == position)
    }
}
