//! Equipment slots for actors.
//!
//! Equipping moves an item out of the inventory into a slot; the slot owns it
//! until it is unequipped back into the inventory.

use crate::state::{EquipSlot, Item};
use crate::stats::BonusTotals;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
}

impl Equipment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn slot(&self, slot: EquipSlot) -> Option<&Item> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<Item> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
        }
    }

    /// Puts an equippable item into its slot, returning whatever was there.
    ///
    /// Items without an [`Equippable`](crate::state::Equippable) are handed
    /// straight back.
    pub fn insert(&mut self, item: Item) -> Option<Item> {
        match item.equippable {
            Some(equippable) => self.slot_mut(equippable.slot).replace(item),
            None => Some(item),
        }
    }

    pub fn take(&mut self, slot: EquipSlot) -> Option<Item> {
        self.slot_mut(slot).take()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.weapon.iter().chain(self.armor.iter())
    }

    /// True when a ritual implement is equipped.
    pub fn has_sacrificial(&self) -> bool {
        self.items().any(Item::is_sacrificial)
    }

    /// Power, defense and spiritual bonuses of everything equipped.
    pub fn totals(&self) -> BonusTotals {
        self.items()
            .filter_map(|item| item.equippable)
            .map(|e| BonusTotals {
                defense: e.defense,
                power: e.power,
                spiritual_defense: e.spiritual_defense,
                spiritual_power: e.spiritual_power,
                ..BonusTotals::ZERO
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Equippable, Rgb};

    fn armor(name: &str, defense: i32) -> Item {
        Item::new(name, '[', Rgb(139, 69, 19)).with_equippable(Equippable {
            slot: EquipSlot::Armor,
            defense,
            ..Equippable::default()
        })
    }

    #[test]
    fn insert_replaces_slot_occupant() {
        let mut equipment = Equipment::empty();
        assert!(equipment.insert(armor("Leather Hide", 1)).is_none());
        let displaced = equipment.insert(armor("Chain Mail", 3));
        assert_eq!(displaced.map(|i| i.entity.name), Some("Leather Hide".to_string()));
        assert_eq!(equipment.totals().defense, 3);
    }

    #[test]
    fn non_equippable_is_returned() {
        let mut equipment = Equipment::empty();
        let potion = Item::new("Health Potion", '!', Rgb::WHITE);
        assert!(equipment.insert(potion).is_some());
        assert!(equipment.weapon.is_none());
    }
}
