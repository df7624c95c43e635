use super::{Entity, Rgb};
use crate::body::Part;

/// Effect applied when an item is used from the inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Consumable {
    Healing { amount: i32 },
    Lightning { damage: i32, maximum_range: i32 },
    Fireball { damage: i32, radius: i32 },
    Confusion { turns: u32 },
}

impl Consumable {
    /// True when the effect needs a target tile chosen by the player.
    pub const fn needs_target(&self) -> bool {
        matches!(self, Consumable::Fireball { .. } | Consumable::Confusion { .. })
    }
}

/// Equipment slot.
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
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EquipSlot {
    #[default]
    Weapon,
    Armor,
}

/// Flat bonuses granted while the item sits in an equipment slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Equippable {
    pub slot: EquipSlot,
    pub power: i32,
    pub defense: i32,
    pub spiritual_defense: i32,
    pub spiritual_power: i32,
    /// Ritual implement.
    pub sacrificial: bool,
}

/// Fungible count plus per-unit quality.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stackable {
    pub count: i32,
    pub quality: i32,
}

impl Stackable {
    pub const fn new(count: i32, quality: i32) -> Self {
        Self { count, quality }
    }

    /// Offering value of the whole stack.
    pub const fn total_quality(&self) -> i32 {
        self.count * self.quality
    }
}

/// Anything that can lie on the ground or sit in an inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub entity: Entity,
    pub consumable: Option<Consumable>,
    pub equippable: Option<Equippable>,
    pub part: Option<Part>,
    pub stack: Option<Stackable>,
}

impl Item {
    pub fn new(name: impl Into<String>, glyph: char, color: Rgb) -> Self {
        Self {
            entity: Entity::new(name, glyph, color),
            consumable: None,
            equippable: None,
            part: None,
            stack: None,
        }
    }

    /// Wraps a detached part in an item shell named after it.
    pub fn from_part(part: Part) -> Self {
        let entity = Entity::new(part.name.clone(), part.kind.glyph(), Rgb::RED)
            .with_description(part.description.clone());
        Self {
            entity,
            consumable: None,
            equippable: None,
            part: Some(part),
            stack: None,
        }
    }

    #[must_use]
    pub fn with_consumable(mut self, consumable: Consumable) -> Self {
        self.consumable = Some(consumable);
        self
    }

    #[must_use]
    pub fn with_equippable(mut self, equippable: Equippable) -> Self {
        self.equippable = Some(equippable);
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: Stackable) -> Self {
        self.stack = Some(stack);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.entity.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.entity.name
    }

    /// Unwraps the shell, keeping only the part.
    pub fn into_part(self) -> Option<Part> {
        self.part
    }

    pub fn is_sacrificial(&self) -> bool {
        self.equippable.is_some_and(|e| e.sacrificial)
    }

    /// True when `other` can merge into this item's stack.
    pub fn stacks_with(&self, other: &Item) -> bool {
        self.stack.is_some() && other.stack.is_some() && self.name() == other.name()
    }
}
