//! Floor-indexed spawn tables.
//!
//! Every table is keyed by a minimum floor. An entry applies on its floor and
//! every deeper one; a later entry for the same template overrides the weight
//! of an earlier one.

use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use crate::templates::TemplateId;

/// One `(floor, value)` step of a [`FloorCap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorStep {
    pub floor: u32,
    pub value: u32,
}

/// Step function from floor number to a per-room maximum.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FloorCap(Vec<FloorStep>);

impl FloorCap {
    pub fn new(steps: impl IntoIterator<Item = (u32, u32)>) -> Self {
        Self(
            steps
                .into_iter()
                .map(|(floor, value)| FloorStep { floor, value })
                .collect(),
        )
    }

    /// Value of the deepest step at or above `floor`; zero before the first.
    pub fn value_at(&self, floor: u32) -> u32 {
        self.0
            .iter()
            .filter(|step| step.floor <= floor)
            .max_by_key(|step| step.floor)
            .map_or(0, |step| step.value)
    }

    pub fn steps(&self) -> &[FloorStep] {
        &self.0
    }
}

/// `template` becomes available at `floor` with the given relative weight.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnEntry {
    pub floor: u32,
    pub template: TemplateId,
    pub weight: u32,
}

/// Weighted candidates per minimum floor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WeightTable(Vec<SpawnEntry>);

impl WeightTable {
    pub fn new(entries: impl IntoIterator<Item = (u32, &'static str, u32)>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(floor, template, weight)| SpawnEntry {
                    floor,
                    template: TemplateId::new(template),
                    weight,
                })
                .collect(),
        )
    }

    pub fn entries(&self) -> &[SpawnEntry] {
        &self.0
    }

    /// Effective candidates on `floor`, in first-seen order, zero weights removed.
    pub fn weights_at(&self, floor: u32) -> Vec<(TemplateId, u32)> {
        let mut applicable: Vec<&SpawnEntry> =
            self.0.iter().filter(|entry| entry.floor <= floor).collect();
        applicable.sort_by_key(|entry| entry.floor);

        let mut merged: Vec<(TemplateId, u32)> = Vec::new();
        for entry in applicable {
            match merged.iter_mut().find(|(id, _)| *id == entry.template) {
                Some((_, weight)) => *weight = entry.weight,
                None => merged.push((entry.template.clone(), entry.weight)),
            }
        }
        merged.retain(|(_, weight)| *weight > 0);
        merged
    }

    /// Draws `count` templates with replacement. Empty when nothing applies.
    pub fn sample<R: Rng + ?Sized>(&self, floor: u32, count: usize, rng: &mut R) -> Vec<TemplateId> {
        let candidates = self.weights_at(floor);
        let Ok(index) = WeightedIndex::new(candidates.iter().map(|(_, weight)| *weight)) else {
            return Vec::new();
        };
        (0..count)
            .map(|_| candidates[index.sample(rng)].0.clone())
            .collect()
    }
}

/// Everything the generators need to populate a floor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpawnTables {
    pub max_items: FloorCap,
    pub max_monsters: FloorCap,
    pub items: WeightTable,
    pub monsters: WeightTable,
}

#[cfg(test)]
pub(crate) fn standard_tables() -> SpawnTables {
    SpawnTables {
        max_items: FloorCap::new([(1, 1), (4, 2)]),
        max_monsters: FloorCap::new([(1, 2), (4, 3), (6, 5)]),
        items: WeightTable::new([
            (0, "health_potion", 35),
            (2, "confusion_scroll", 10),
            (4, "lightning_scroll", 25),
            (4, "sword", 5),
            (6, "fireball_scroll", 25),
            (6, "chain_mail", 15),
        ]),
        monsters: WeightTable::new([
            (0, "orc", 50),
            (0, "dwarf", 15),
            (0, "librarian", 80),
            (2, "mad_librarian", 40),
            (2, "librarian", 40),
            (3, "dwarf", 0),
            (1, "mad_dwarf", 15),
            (1, "max", 3),
            (3, "troll", 15),
            (5, "troll", 30),
            (7, "troll", 60),
        ]),
    }
}
