//! Plain data records owned by a [`GameMap`](super::GameMap).

mod actor;
mod common;
mod entity;
mod item;

pub use actor::{
    Actor, Ai, AiTick, Death, Equipment, Fighter, Inventory, Level, LootTable, Stowed,
};
pub use common::{EntityId, Position, Rgb};
pub use entity::{Entity, RenderOrder};
pub use item::{Consumable, EquipSlot, Equippable, Item, Stackable};
