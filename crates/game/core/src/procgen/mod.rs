//! Dungeon floor generators.
//!
//! Each generator takes the player actor (moved onto the new floor, not
//! recreated), carves a fresh [`GameMap`], places the down-stairs and
//! populates the floor from the [`SpawnTables`].
//!
//! # Module Structure
//!
//! - `room`/`tunnel`: carving primitives
//! - `tables`: floor-indexed caps and weighted candidates
//! - `rooms`: random non-overlapping rooms joined by L-shaped corridors
//! - `bsp`: binary space partition, one room per leaf
//! - `cave`: cellular automaton with a carved exit path

mod bsp;
mod cave;
mod room;
mod rooms;
mod tables;
mod tunnel;

pub use bsp::BspGenerator;
pub use cave::CaveGenerator;
pub use room::RectangularRoom;
pub use rooms::RoomsGenerator;
pub use tables::{FloorCap, FloorStep, SpawnEntry, SpawnTables, WeightTable};
pub use tunnel::l_tunnel;

#[cfg(test)]
pub(crate) use tables::standard_tables;

use rand::Rng;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::rng::GameRng;
use crate::state::{Actor, GameMap, MapError, Position};
use crate::templates::{Spawned, TemplateError, TemplateId, TemplateRegistry};

/// Which algorithm builds a floor.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GeneratorKind {
    Rooms,
    Bsp,
    Cave,
}

impl GeneratorKind {
    /// Builds a floor with this algorithm.
    pub fn generate(
        self,
        request: &FloorRequest<'_>,
        player: Actor,
        rng: &mut GameRng,
    ) -> Result<GeneratedFloor, GenerationError> {
        let floor = match self {
            GeneratorKind::Rooms => RoomsGenerator.generate(request, player, rng),
            GeneratorKind::Bsp => BspGenerator.generate(request, player, rng),
            GeneratorKind::Cave => CaveGenerator.generate(request, player, rng),
        }?;
        tracing::debug!(
            kind = %self,
            floor = request.floor,
            rooms = floor.rooms.len(),
            actors = floor.map.actors().count(),
            items = floor.map.items.len(),
            "floor generated"
        );
        Ok(floor)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("map {width}x{height} is too small for the {kind} generator")]
    MapTooSmall {
        kind: GeneratorKind,
        width: i32,
        height: i32,
    },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Map(#[from] MapError),
}

impl GameError for GenerationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            GenerationError::MapTooSmall { .. } => ErrorSeverity::Validation,
            GenerationError::Template(error) => error.severity(),
            GenerationError::Map(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            GenerationError::MapTooSmall { .. } => "GENERATION_MAP_TOO_SMALL",
            GenerationError::Template(error) => error.error_code(),
            GenerationError::Map(error) => error.error_code(),
        }
    }
}

/// Inputs shared by every generator.
#[derive(Clone, Copy, Debug)]
pub struct FloorRequest<'a> {
    /// 1-based floor number; drives the spawn tables.
    pub floor: u32,
    pub config: &'a GameConfig,
    pub templates: &'a TemplateRegistry,
    pub tables: &'a SpawnTables,
}

impl<'a> FloorRequest<'a> {
    pub fn new(
        floor: u32,
        config: &'a GameConfig,
        templates: &'a TemplateRegistry,
        tables: &'a SpawnTables,
    ) -> Self {
        Self {
            floor,
            config,
            templates,
            tables,
        }
    }

    pub fn width(&self) -> i32 {
        self.config.map.width
    }

    pub fn height(&self) -> i32 {
        self.config.map.height
    }
}

/// A finished floor.
#[derive(Clone, Debug)]
pub struct GeneratedFloor {
    pub map: GameMap,
    /// Carved rooms in placement order; empty for caves.
    pub rooms: Vec<RectangularRoom>,
    pub start: Position,
}

/// A floor-building algorithm.
pub trait FloorGenerator {
    fn kind(&self) -> GeneratorKind;

    fn generate(
        &self,
        request: &FloorRequest<'_>,
        player: Actor,
        rng: &mut GameRng,
    ) -> Result<GeneratedFloor, GenerationError>;
}

/// Places a fresh copy of template `id` at `position`.
pub(crate) fn spawn_at(
    map: &mut GameMap,
    templates: &TemplateRegistry,
    id: &TemplateId,
    position: Position,
) -> Result<(), TemplateError> {
    match templates.spawn(id)? {
        Spawned::Actor(actor) => {
            map.spawn_actor(*actor, position);
        }
        Spawned::Item(mut item) => {
            item.entity.position = position;
            map.add_item(item);
        }
    }
    Ok(())
}

/// Fills one room with `0..=cap` monsters and items drawn from the tables.
///
/// Positions landing on an occupied tile are skipped, not retried.
pub(crate) fn place_entities<R: Rng + ?Sized>(
    map: &mut GameMap,
    room: &RectangularRoom,
    request: &FloorRequest<'_>,
    rng: &mut R,
) -> Result<(), TemplateError> {
    if room.x2 - room.x1 < 2 || room.y2 - room.y1 < 2 {
        return Ok(());
    }
    let tables = request.tables;
    let monster_count = rng.gen_range(0..=tables.max_monsters.value_at(request.floor)) as usize;
    let item_count = rng.gen_range(0..=tables.max_items.value_at(request.floor)) as usize;

    let mut chosen = tables.monsters.sample(request.floor, monster_count, rng);
    chosen.extend(tables.items.sample(request.floor, item_count, rng));

    for id in chosen {
        let x = rng.gen_range(room.x1 + 1..=room.x2 - 1);
        let y = rng.gen_range(room.y1 + 1..=room.y2 - 1);
        let position = Position::new(x, y);
        if !map.has_entity_at(position) {
            spawn_at(map, request.templates, &id, position)?;
        }
    }
    Ok(())
}
