//! The sacrifice ritual: trade a flesh part and offerings for an explosion.
//!
//! The part is replaced by its phantom counterpart, offerings are consumed up
//! to the quality cap, and every other living actor within
//! `3 + part health` tiles takes `10 + offered quality` damage.

use std::collections::BTreeSet;

use crate::action::{
    ActionError, ActionTransition, ImpossibleAction, living_actor, living_actor_mut,
};
use crate::body::{BodyError, Part};
use crate::combat;
use crate::env::GameEnv;
use crate::log::MessageTag;
use crate::state::{Actor, EntityId, GameMap, Stackable};

/// Sacrifices the attached part at `part`, paying with the inventory stacks at
/// `offerings` (consumed in the given order).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SacrificeAction {
    pub actor: EntityId,
    pub part: usize,
    pub offerings: Vec<usize>,
}

/// What a completed ritual did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RitualOutcome {
    pub sum_quality: i32,
    pub damage: i32,
    pub radius: i32,
    /// Units taken from each offering, aligned with the action's list.
    pub consumed: Vec<i32>,
    pub hit: Vec<EntityId>,
}

/// Greedy offering plan.
///
/// Walks `offerings` in order; each contributes
/// `min((max_quality - sum) / quality, count)` units until the sum reaches
/// `max_quality`. Offerings with non-positive quality contribute nothing.
/// Returns the reached sum and the units consumed per offering.
pub fn plan_offerings(offerings: &[Stackable], max_quality: i32) -> (i32, Vec<i32>) {
    let mut sum = 0;
    let mut consumed = vec![0; offerings.len()];
    for (taken, offering) in consumed.iter_mut().zip(offerings) {
        if sum >= max_quality {
            break;
        }
        if offering.quality <= 0 {
            continue;
        }
        let ideal = (max_quality - sum) / offering.quality;
        let actual = ideal.min(offering.count).max(0);
        sum += actual * offering.quality;
        *taken = actual;
    }
    (sum, consumed)
}

/// Requirements the actor is missing for sacrificing `part` with `offered`
/// total quality. Empty when the ritual may proceed.
pub fn ritual_shortfall(actor: &Actor, part: &Part, offered: i32) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if !actor.has_sacrificial_implement() {
        missing.push("an implement");
    }
    if !part.is_flesh() {
        missing.push("living flesh");
    }
    if offered < part.kind.ritual_requirement() {
        missing.push("an offering");
    }
    missing
}

impl SacrificeAction {
    pub fn new(actor: EntityId, part: usize, offerings: Vec<usize>) -> Self {
        Self {
            actor,
            part,
            offerings,
        }
    }

    /// Stacks named by `offerings`, checked for existence and duplicates.
    fn stacks(&self, actor: &Actor) -> Result<Vec<Stackable>, ActionError> {
        let mut seen = BTreeSet::new();
        self.offerings
            .iter()
            .map(|&index| {
                if !seen.insert(index) {
                    return Err(ActionError::DuplicateOffering(index));
                }
                let item = actor
                    .inventory
                    .get(index)
                    .ok_or(ActionError::NoSuchItem(index))?;
                item.stack
                    .ok_or_else(|| ImpossibleAction::NotAnOffering(item.name().to_string()).into())
            })
            .collect()
    }
}

impl ActionTransition for SacrificeAction {
    type Error = ActionError;
    type Result = RitualOutcome;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, map: &GameMap, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let actor = living_actor(map, self.actor)?;
        let part = actor
            .body
            .part(self.part)
            .ok_or(BodyError::NoSuchPart(self.part))?;
        let stacks = self.stacks(actor)?;
        let offered = stacks.iter().map(Stackable::total_quality).sum();
        let missing = ritual_shortfall(actor, part, offered);
        if !missing.is_empty() {
            return Err(ImpossibleAction::RitualIncomplete(missing).into());
        }
        env.templates.phantom_part(part.kind)?;
        Ok(())
    }

    fn apply(&self, map: &mut GameMap, env: &mut GameEnv<'_>) -> Result<RitualOutcome, Self::Error> {
        let max_quality = env.config.ritual_max_quality;
        let actor = living_actor_mut(map, self.actor)?;
        let stacks = self.stacks(actor)?;
        let (sum_quality, consumed) = plan_offerings(&stacks, max_quality);

        let mut emptied = Vec::new();
        for (&index, &taken) in self.offerings.iter().zip(&consumed) {
            if let Some(stack) = actor
                .inventory
                .get_mut(index)
                .and_then(|item| item.stack.as_mut())
            {
                stack.count -= taken;
                if stack.count <= 0 {
                    emptied.push(index);
                }
            }
        }
        emptied.sort_unstable_by(|a, b| b.cmp(a));
        for index in emptied {
            actor.inventory.remove(index);
        }

        let kind = actor
            .body
            .part(self.part)
            .ok_or(BodyError::NoSuchPart(self.part))?
            .kind;
        let phantom = env.templates.phantom_part(kind)?;
        let sacrificed = actor
            .body
            .substitute(self.part, phantom)
            .ok_or(BodyError::NoSuchPart(self.part))?;
        let center = actor.position();
        combat::settle_part_loss(map, self.actor, env);

        let radius = 3 + sacrificed.current_health();
        let damage = 10 + sum_quality;
        tracing::debug!(
            part = %sacrificed.name,
            sum_quality,
            radius,
            damage,
            "ritual performed"
        );
        env.log.add_message(
            "The flesh explodes in a burst of energy".to_string(),
            MessageTag::Spiritual,
        );

        let targets = map.living_within(center, f64::from(radius), Some(self.actor));
        let mut hit = Vec::with_capacity(targets.len());
        for target in targets {
            let Some(name) = map.actor(target).map(|a| a.name().to_string()) else {
                continue;
            };
            env.log.add_message(
                format!("The {name} is engulfed in the explosion, taking {damage} damage!"),
                MessageTag::PlayerAttack,
            );
            if combat::apply_damage(map, target, damage, Some(self.actor), env).is_some() {
                hit.push(target);
            }
        }

        Ok(RitualOutcome {
            sum_quality,
            damage,
            radius,
            consumed,
            hit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::test_support::{Fixture, flesh, monster};
    use crate::body::{Body, PartForm, PartKind};
    use crate::state::{Ai, EquipSlot, Equippable, Fighter, Inventory, Item, Rgb};

    fn offering(name: &str, count: i32, quality: i32) -> Item {
        Item::new(name, '*', Rgb::WHITE).with_stack(Stackable::new(count, quality))
    }

    fn dagger() -> Item {
        Item::new("Sacrificial Dagger", '/', Rgb::WHITE).with_equippable(Equippable {
            slot: EquipSlot::Weapon,
            power: 1,
            sacrificial: true,
            ..Equippable::default()
        })
    }

    #[test]
    fn offerings_are_capped_by_count() {
        let (sum, consumed) =
            plan_offerings(&[Stackable::new(5, 5), Stackable::new(5, 1)], 50);
        assert_eq!(sum, 30);
        assert_eq!(consumed, vec![5, 5]);
    }

    #[test]
    fn offerings_stop_at_the_cap() {
        let (sum, consumed) = plan_offerings(
            &[Stackable::new(20, 3), Stackable::new(5, 1), Stackable::new(5, 5)],
            50,
        );
        // 16 x 3 = 48, then 2 x 1 = 50, the third is untouched.
        assert_eq!(sum, 50);
        assert_eq!(consumed, vec![16, 2, 0]);
    }

    #[test]
    fn worthless_offerings_are_skipped() {
        let (sum, consumed) = plan_offerings(&[Stackable::new(3, 0), Stackable::new(2, 4)], 50);
        assert_eq!(sum, 8);
        assert_eq!(consumed, vec![0, 2]);
    }

    #[test]
    fn ritual_consumes_offerings_and_explodes() {
        let mut fx = Fixture::new();
        fx.player_mut().inventory = Inventory::with_items(
            26,
            [
                dagger(),
                offering("Ornate Shell", 5, 5),
                offering("Torn Scrap", 5, 1),
            ],
        );
        let near = fx.spawn(monster("Orc", Ai::Hostile, 100, 0, 3), 7, 5);
        let far = fx.spawn(monster("Troll", Ai::Hostile, 100, 0, 3), 1, 1);

        let action = SacrificeAction::new(EntityId::PLAYER, 0, vec![1, 2]);
        let (map, mut env) = fx.env();
        action.pre_validate(map, &env).expect("requirements met");
        let outcome = action.apply(map, &mut env).expect("ritual");

        assert_eq!(outcome.sum_quality, 30);
        assert_eq!(outcome.damage, 40);
        // Human Arm at full health 2.
        assert_eq!(outcome.radius, 5);
        assert_eq!(outcome.consumed, vec![5, 5]);
        assert_eq!(outcome.hit, vec![near]);

        let player = fx.player();
        assert_eq!(player.inventory.len(), 1);
        assert_eq!(player.inventory.items()[0].name(), "Sacrificial Dagger");
        let phantom = player.body.parts().last().expect("phantom");
        assert_eq!(phantom.kind, PartKind::Arm);
        assert_eq!(phantom.form, PartForm::Spirit);
        assert_eq!(player.body.parts()[0].kind, PartKind::Leg);

        assert_eq!(fx.map.actor(near).map(|a| a.hp()), Some(60));
        assert_eq!(fx.map.actor(far).map(|a| a.hp()), Some(100));
        assert!(fx.log.contains("The flesh explodes in a burst of energy"));
        assert!(
            fx.log
                .contains("The Orc is engulfed in the explosion, taking 40 damage!")
        );
    }

    #[test]
    fn sacrificing_the_last_healthy_part_kills() {
        let mut fx = Fixture::new();
        let player = fx.player_mut();
        player.fighter = Fighter::new(0, 10, 0, 0, 1, 12);
        player.body = Body::from_parts([flesh("Human Torso", PartKind::Torso, 6)]);
        player.inventory = Inventory::with_items(
            26,
            [
                dagger(),
                offering("Ornate Shell", 5, 5),
                offering("Torn Scrap", 5, 1),
            ],
        );
        let near = fx.spawn(monster("Orc", Ai::Hostile, 100, 0, 3), 7, 5);

        let action = SacrificeAction::new(EntityId::PLAYER, 0, vec![1, 2]);
        let (map, mut env) = fx.env();
        action.pre_validate(map, &env).expect("requirements met");
        let outcome = action.apply(map, &mut env).expect("ritual");

        assert_eq!(outcome.radius, 9);
        assert_eq!(outcome.hit, vec![near]);
        let player = fx.player();
        assert_eq!(player.hp(), 0);
        assert!(!player.is_alive());
        assert!(fx.log.contains("You died!"));
    }

    #[test]
    fn missing_requirements_are_listed() {
        let mut fx = Fixture::new();
        fx.player_mut().inventory = Inventory::with_items(26, [offering("Torn Scrap", 5, 1)]);
        let (map, env) = fx.env();
        let err = SacrificeAction::new(EntityId::PLAYER, 0, vec![0])
            .pre_validate(map, &env)
            .unwrap_err();
        assert_eq!(
            err.as_impossible(),
            Some(&ImpossibleAction::RitualIncomplete(vec![
                "an implement",
                "an offering"
            ]))
        );
    }

    #[test]
    fn offerings_must_be_distinct_stacks() {
        let mut fx = Fixture::new();
        fx.player_mut().inventory =
            Inventory::with_items(26, [dagger(), offering("Ornate Shell", 5, 5)]);
        let (map, env) = fx.env();
        let duplicate = SacrificeAction::new(EntityId::PLAYER, 0, vec![1, 1]);
        assert_eq!(
            duplicate.pre_validate(map, &env),
            Err(ActionError::DuplicateOffering(1))
        );
        let not_a_stack = SacrificeAction::new(EntityId::PLAYER, 0, vec![0]);
        assert_eq!(
            not_a_stack.pre_validate(map, &env).unwrap_err().to_string(),
            "The Sacrificial Dagger is not a fit offering."
        );
    }
}
