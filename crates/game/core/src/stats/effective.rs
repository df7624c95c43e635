//! Effective (base + bonus) values exposed to the rest of the game.

use crate::body::Body;
use crate::state::{Equipment, Fighter};

use super::{BonusTotals, aggregate_bonuses};

/// Read-only view of an actor's combat numbers at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectiveStats {
    pub hp: i32,
    pub max_hp: i32,
    pub power: i32,
    pub defense: i32,
    pub mental_strength: i32,
    pub spiritual_defense: i32,
    pub spiritual_power: i32,
}

impl EffectiveStats {
    pub fn compute(
        fighter: &Fighter,
        body: Option<&Body>,
        equipment: Option<&Equipment>,
    ) -> Self {
        Self::from_totals(fighter, aggregate_bonuses(body, equipment))
    }

    pub fn from_totals(fighter: &Fighter, bonus: BonusTotals) -> Self {
        Self {
            hp: fighter.hp() + bonus.health,
            max_hp: fighter.max_hp() + bonus.max_health,
            power: fighter.base_power + bonus.power,
            defense: fighter.base_defense + bonus.defense,
            mental_strength: fighter.base_mental_strength() + bonus.mental_strength,
            spiritual_defense: fighter.base_spiritual_defense + bonus.spiritual_defense,
            spiritual_power: fighter.base_spiritual_power + bonus.spiritual_power,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Part, PartBonuses, PartForm, PartKind};

    #[test]
    fn body_only_actor_has_body_health() {
        let fighter = Fighter::new(0, 0, 0, 0, 0, 0);
        let heart = Part::new(
            "Human Heart",
            PartKind::Heart,
            PartForm::Flesh,
            3,
            PartBonuses {
                power: 2,
                spiritual_defense: 1,
                spiritual_power: 1,
                ..PartBonuses::default()
            },
        );
        let body = Body::from_parts([heart]);
        let stats = EffectiveStats::compute(&fighter, Some(&body), None);
        assert_eq!(stats.hp, 3);
        assert_eq!(stats.max_hp, 3);
        assert_eq!(stats.power, 2);
        assert_eq!(stats.spiritual_power, 1);
    }

    #[test]
    fn base_values_pass_through_without_collaborators() {
        let fighter = Fighter::new(10, 1, 0, 0, 0, 3);
        let stats = EffectiveStats::compute(&fighter, None, None);
        assert_eq!(stats.hp, 10);
        assert_eq!(stats.max_hp, 10);
        assert_eq!(stats.power, 3);
        assert_eq!(stats.mental_strength, 1);
    }
}
