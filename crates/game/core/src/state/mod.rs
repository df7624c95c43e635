//! World state for a single floor.
//!
//! ```text
//! GameMap
//!  ├─ Grid<Tile>            terrain, fixed size
//!  ├─ actors: Vec<Actor>    living actors and corpses
//!  │    ├─ Body             attached parts
//!  │    ├─ Inventory        carried items (detached parts live here)
//!  │    └─ Equipment        weapon / armor slots
//!  ├─ items: Vec<Item>      ground items
//!  └─ visible / explored    overlay written by the FOV step
//! ```
//!
//! Every entity has exactly one owner. Moving an item or part between
//! containers moves the value; nothing is shared.

mod grid;
mod map;
mod types;

pub use grid::Grid;
pub use map::{GameMap, MapError, TerrainKind, Tile};
pub use types::{
    Actor, Ai, AiTick, Consumable, Death, Entity, EntityId, EquipSlot, Equippable, Equipment,
    Fighter, Inventory, Item, Level, LootTable, Position, RenderOrder, Rgb, Stackable, Stowed,
};
