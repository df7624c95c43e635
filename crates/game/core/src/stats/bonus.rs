//! Bonus totals contributed by bodies and equipment.

use core::ops::{Add, AddAssign};

use crate::body::Body;
use crate::state::Equipment;

/// Sum of stat contributions from one or more sources.
///
/// `health` is the current pooled hit points held by body parts and
/// `max_health` their capacity. Equipment never contributes to either, nor
/// to mental strength.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusTotals {
    pub defense: i32,
    pub power: i32,
    pub spiritual_defense: i32,
    pub spiritual_power: i32,
    pub mental_strength: i32,
    pub health: i32,
    pub max_health: i32,
}

impl BonusTotals {
    pub const ZERO: Self = Self {
        defense: 0,
        power: 0,
        spiritual_defense: 0,
        spiritual_power: 0,
        mental_strength: 0,
        health: 0,
        max_health: 0,
    };
}

impl Add for BonusTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            defense: self.defense + rhs.defense,
            power: self.power + rhs.power,
            spiritual_defense: self.spiritual_defense + rhs.spiritual_defense,
            spiritual_power: self.spiritual_power + rhs.spiritual_power,
            mental_strength: self.mental_strength + rhs.mental_strength,
            health: self.health + rhs.health,
            max_health: self.max_health + rhs.max_health,
        }
    }
}

impl AddAssign for BonusTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl core::iter::Sum for BonusTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Combined bonuses of an optional body and optional equipment.
pub fn aggregate_bonuses(body: Option<&Body>, equipment: Option<&Equipment>) -> BonusTotals {
    let from_body = body.map(Body::totals).unwrap_or_default();
    let from_equipment = equipment.map(Equipment::totals).unwrap_or_default();
    from_body + from_equipment
}
