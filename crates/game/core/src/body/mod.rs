//! Body model: the bounded set of parts attached to one actor.
//!
//! Each part is in exactly one of two states: attached (held by a [`Body`]) or
//! detached (wrapped in an [`Item`] inside an inventory or on the ground).
//! Moving between the two always transfers ownership; parts are never copied
//! except when a template is instantiated.

mod part;

pub use part::{Part, PartBonuses, PartForm, PartKind};

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::log::{MessageLog, MessageTag};
use crate::state::{Inventory, Item, Position};
use crate::stats::BonusTotals;

/// Errors raised when a body operation references something that is not there.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BodyError {
    #[error("no attached part at index {0}")]
    NoSuchPart(usize),

    #[error("inventory slot {0} does not hold a part")]
    NotAPart(usize),

    #[error("inventory is full")]
    InventoryFull,
}

/// A part that could not be attached because the body is at capacity.
///
/// Returned so the caller keeps ownership of the rejected part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BodyFull(pub Part);

/// Location of a part for [`Body::toggle_equip`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PartRef {
    /// Index into the body's part list.
    Attached(usize),
    /// Index into the owner's inventory.
    Carried(usize),
}

/// Result of a toggle request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    Attached,
    Detached,
    /// The body was full; nothing changed.
    Rejected,
}

/// Ordered collection of attached parts.
///
/// Order matters: [`Body::set_health`] walks parts front to back, so earlier
/// parts absorb damage and healing first.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Body {
    parts: ArrayVec<Part, { GameConfig::MAX_BODY_PARTS }>,
    max_parts: usize,
}

impl Body {
    pub const FULL_MESSAGE: &'static str = "You cannot fit more to your body.";

    /// Empty body holding at most `max_parts` (never more than the hard limit).
    pub fn new(max_parts: usize) -> Self {
        Self {
            parts: ArrayVec::new(),
            max_parts: max_parts.min(GameConfig::MAX_BODY_PARTS),
        }
    }

    /// Body at default capacity holding the given parts in order.
    ///
    /// Parts beyond capacity are discarded.
    pub fn from_parts(parts: impl IntoIterator<Item = Part>) -> Self {
        let mut body = Self::default();
        for part in parts {
            if body.is_full() {
                break;
            }
            body.parts.push(part);
        }
        body
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn part(&self, index: usize) -> Option<&Part> {
        self.parts.get(index)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn max_parts(&self) -> usize {
        self.max_parts
    }

    pub fn is_full(&self) -> bool {
        self.parts.len() >= self.max_parts
    }

    /// Current pooled health of all parts.
    pub fn health(&self) -> i32 {
        self.parts.iter().map(Part::current_health).sum()
    }

    /// Health capacity of all parts.
    pub fn max_health(&self) -> i32 {
        self.parts.iter().map(Part::health_bonus).sum()
    }

    /// Sum of every part's contributions.
    pub fn totals(&self) -> BonusTotals {
        self.parts
            .iter()
            .map(|part| BonusTotals {
                defense: part.bonuses.defense,
                power: part.bonuses.power,
                spiritual_defense: part.bonuses.spiritual_defense,
                spiritual_power: part.bonuses.spiritual_power,
                mental_strength: part.bonuses.mental_strength,
                health: part.current_health(),
                max_health: part.health_bonus(),
            })
            .sum()
    }

    /// Appends a part.
    ///
    /// A full body logs a notice and hands the part back unchanged.
    pub fn equip(
        &mut self,
        part: Part,
        announce: bool,
        log: &mut dyn MessageLog,
    ) -> Result<(), BodyFull> {
        if self.is_full() {
            log.add_message(Self::FULL_MESSAGE.to_string(), MessageTag::Invalid);
            return Err(BodyFull(part));
        }
        if announce {
            log.add_message(format!("You equip the {}.", part.name), MessageTag::Neutral);
        }
        self.parts.push(part);
        Ok(())
    }

    /// Detaches the part at `index`. Its current health is preserved.
    pub fn unequip(
        &mut self,
        index: usize,
        announce: bool,
        log: &mut dyn MessageLog,
    ) -> Option<Part> {
        if index >= self.parts.len() {
            return None;
        }
        let part = self.parts.remove(index);
        if announce {
            log.add_message(format!("You remove the {}.", part.name), MessageTag::Neutral);
        }
        Some(part)
    }

    /// Detaches an attached part into the inventory, or attaches a carried one.
    ///
    /// All checks run before anything moves.
    pub fn toggle_equip(
        &mut self,
        target: PartRef,
        inventory: &mut Inventory,
        log: &mut dyn MessageLog,
    ) -> Result<Toggle, BodyError> {
        match target {
            PartRef::Attached(index) => {
                if index >= self.parts.len() {
                    return Err(BodyError::NoSuchPart(index));
                }
                if inventory.is_full() {
                    return Err(BodyError::InventoryFull);
                }
                let part = self
                    .unequip(index, true, log)
                    .ok_or(BodyError::NoSuchPart(index))?;
                inventory
                    .add(Item::from_part(part))
                    .map_err(|_| BodyError::InventoryFull)?;
                Ok(Toggle::Detached)
            }
            PartRef::Carried(index) => {
                let holds_part = inventory
                    .get(index)
                    .map(|item| item.part.is_some())
                    .ok_or(BodyError::NotAPart(index))?;
                if !holds_part {
                    return Err(BodyError::NotAPart(index));
                }
                if self.is_full() {
                    log.add_message(Self::FULL_MESSAGE.to_string(), MessageTag::Invalid);
                    return Ok(Toggle::Rejected);
                }
                let part = inventory
                    .remove(index)
                    .and_then(Item::into_part)
                    .ok_or(BodyError::NotAPart(index))?;
                self.equip(part, true, log)
                    .map_err(|_| BodyError::NotAPart(index))?;
                Ok(Toggle::Attached)
            }
        }
    }

    /// Spreads a signed health change across parts in order.
    ///
    /// Damage drains each part down to zero before moving on; healing fills
    /// each part to its capacity. Stops once the change is used up. Every
    /// visited part with nonzero capacity reports its new health. Returns the
    /// amount actually applied.
    pub fn set_health(&mut self, delta: i32, log: &mut dyn MessageLog) -> i32 {
        let mut remaining = delta;
        for part in self.parts.iter_mut() {
            if remaining == 0 {
                break;
            }
            remaining -= part.adjust_health(remaining);
            if part.health_bonus() > 0 {
                log.add_message(
                    format!(
                        "{} max: {}, current: {}.",
                        part.name,
                        part.health_bonus(),
                        part.current_health()
                    ),
                    MessageTag::BodyStatus,
                );
            }
        }
        delta - remaining
    }

    /// Detaches the part at `index` and returns it as a ground item at `at`.
    pub fn drop(
        &mut self,
        index: usize,
        at: Position,
        owner: &str,
        log: &mut dyn MessageLog,
    ) -> Option<Item> {
        if index >= self.parts.len() {
            return None;
        }
        let part = self.parts.remove(index);
        log.add_message(format!("{} dropped a {}.", owner, part.name), MessageTag::Neutral);
        let mut item = Item::from_part(part);
        item.entity.position = at;
        Some(item)
    }

    /// Removes the part at `index` and appends `replacement` at the end.
    ///
    /// Returns the removed part. The replacement never fails for capacity
    /// because a slot is freed first.
    pub fn substitute(&mut self, index: usize, replacement: Part) -> Option<Part> {
        if index >= self.parts.len() {
            return None;
        }
        let removed = self.parts.remove(index);
        self.parts.push(replacement);
        Some(removed)
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::new(GameConfig::MAX_BODY_PARTS)
    }
}
