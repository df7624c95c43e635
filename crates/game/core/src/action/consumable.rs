//! Using consumable items from the inventory.

use crate::action::{
    ActionError, ActionTransition, ImpossibleAction, living_actor, living_actor_mut,
};
use crate::combat::{self, Hit};
use crate::env::GameEnv;
use crate::log::MessageTag;
use crate::state::{Consumable, EntityId, GameMap, Position};

/// Uses the inventory item at `index`, optionally aimed at a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseItemAction {
    pub actor: EntityId,
    pub index: usize,
    pub target: Option<Position>,
}

/// Who an effect lands on, resolved before anything changes.
enum Effect {
    Heal(i32),
    Strike { target: EntityId, damage: i32 },
    Explode { targets: Vec<EntityId>, damage: i32 },
    Confuse { target: EntityId, turns: u32 },
}

impl UseItemAction {
    pub fn new(actor: EntityId, index: usize, target: Option<Position>) -> Self {
        Self {
            actor,
            index,
            target,
        }
    }

    fn consumable(&self, map: &GameMap) -> Result<(String, Consumable), ActionError> {
        let item = living_actor(map, self.actor)?
            .inventory
            .get(self.index)
            .ok_or(ActionError::NoSuchItem(self.index))?;
        let consumable = item
            .consumable
            .ok_or_else(|| ImpossibleAction::NotUsable(item.name().to_string()))?;
        Ok((item.name().to_string(), consumable))
    }

    fn visible_target(&self, map: &GameMap) -> Result<Position, ActionError> {
        match self.target {
            Some(target) if map.is_visible(target) => Ok(target),
            _ => Err(ImpossibleAction::TargetNotVisible.into()),
        }
    }

    fn resolve(&self, map: &GameMap) -> Result<Effect, ActionError> {
        let user = living_actor(map, self.actor)?;
        let (_, consumable) = self.consumable(map)?;
        match consumable {
            Consumable::Healing { amount } => {
                if user.hp() >= user.max_hp() {
                    return Err(ImpossibleAction::HealthFull.into());
                }
                Ok(Effect::Heal(amount))
            }
            Consumable::Lightning {
                damage,
                maximum_range,
            } => {
                let origin = user.position();
                let reach = f64::from(maximum_range) + 1.0;
                let target = map
                    .living_actors()
                    .filter(|actor| actor.id != self.actor && map.is_visible(actor.position()))
                    .map(|actor| (actor.id, origin.distance(actor.position())))
                    .filter(|(_, distance)| *distance < reach)
                    .min_by(|a, b| a.1.total_cmp(&b.1))
                    .map(|(id, _)| id)
                    .ok_or(ImpossibleAction::NoEnemyInRange)?;
                Ok(Effect::Strike { target, damage })
            }
            Consumable::Fireball { damage, radius } => {
                let center = self.visible_target(map)?;
                let targets = map.living_within(center, f64::from(radius), None);
                if targets.is_empty() {
                    return Err(ImpossibleAction::NoTargetsInRadius.into());
                }
                Ok(Effect::Explode { targets, damage })
            }
            Consumable::Confusion { turns } => {
                let at = self.visible_target(map)?;
                let target = map
                    .living_actor_at(at)
                    .ok_or(ImpossibleAction::NoEnemyAtTarget)?;
                if target == self.actor {
                    return Err(ImpossibleAction::ConfuseSelf.into());
                }
                Ok(Effect::Confuse { target, turns })
            }
        }
    }

    /// Spends one use: stacks lose one unit, everything else disappears.
    fn consume(&self, map: &mut GameMap) -> Result<(), ActionError> {
        let inventory = &mut living_actor_mut(map, self.actor)?.inventory;
        let item = inventory
            .get_mut(self.index)
            .ok_or(ActionError::NoSuchItem(self.index))?;
        let exhausted = match item.stack.as_mut() {
            Some(stack) => {
                stack.count -= 1;
                stack.count <= 0
            }
            None => true,
        };
        if exhausted {
            inventory.remove(self.index);
        }
        Ok(())
    }
}

impl ActionTransition for UseItemAction {
    type Error = ActionError;
    type Result = Vec<Hit>;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, map: &GameMap, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        self.resolve(map).map(|_| ())
    }

    fn apply(&self, map: &mut GameMap, env: &mut GameEnv<'_>) -> Result<Vec<Hit>, Self::Error> {
        let (item_name, _) = self.consumable(map)?;
        let effect = self.resolve(map)?;
        let mut hits = Vec::new();

        match effect {
            Effect::Heal(amount) => {
                let user = living_actor_mut(map, self.actor)?;
                let recovered = user.heal(amount, env.log);
                env.log.add_message(
                    format!("You consume the {item_name}, and recover {recovered} HP!"),
                    MessageTag::HealthRecovered,
                );
            }
            Effect::Strike { target, damage } => {
                let name = living_actor(map, target)?.name().to_string();
                env.log.add_message(
                    format!(
                        "A lighting bolt strikes the {name} with a loud thunder, for {damage} damage!"
                    ),
                    MessageTag::PlayerAttack,
                );
                hits.extend(combat::apply_damage(map, target, damage, Some(self.actor), env));
            }
            Effect::Explode { targets, damage } => {
                for target in targets {
                    let Some(name) = map.actor(target).map(|a| a.name().to_string()) else {
                        continue;
                    };
                    env.log.add_message(
                        format!("The {name} is engulfed in a fiery explosion, taking {damage} damage!"),
                        MessageTag::PlayerAttack,
                    );
                    hits.extend(combat::apply_damage(map, target, damage, Some(self.actor), env));
                }
            }
            Effect::Confuse { target, turns } => {
                let actor = living_actor_mut(map, target)?;
                env.log.add_message(
                    format!(
                        "The eyes of the {} look vacant, as it starts to stumble around!",
                        actor.name()
                    ),
                    MessageTag::StatusEffect,
                );
                actor.ai = actor.ai.take().map(|ai| ai.confused(turns));
            }
        }

        // A user killed by its own blast keeps the spent item in its remains.
        if map.actor(self.actor).is_some_and(|user| user.is_alive()) {
            self.consume(map)?;
        }
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::test_support::{Fixture, monster};
    use crate::state::{Ai, Inventory, Item, Rgb, Stackable};

    fn potion(count: Option<i32>) -> Item {
        let item = Item::new("Health Potion", '!', Rgb(127, 0, 255))
            .with_consumable(Consumable::Healing { amount: 4 });
        match count {
            Some(count) => item.with_stack(Stackable::new(count, 1)),
            None => item,
        }
    }

    fn scroll(name: &str, consumable: Consumable) -> Item {
        Item::new(name, '~', Rgb(255, 255, 0)).with_consumable(consumable)
    }

    fn give(fx: &mut Fixture, item: Item) {
        fx.player_mut().inventory = Inventory::with_items(26, [item]);
    }

    #[test]
    fn healing_refuses_at_full_health() {
        let mut fx = Fixture::new();
        give(&mut fx, potion(None));
        let (map, env) = fx.env();
        let err = UseItemAction::new(EntityId::PLAYER, 0, None)
            .pre_validate(map, &env)
            .unwrap_err();
        assert_eq!(err.as_impossible(), Some(&ImpossibleAction::HealthFull));
        assert_eq!(fx.player().inventory.len(), 1);
    }

    #[test]
    fn healing_decrements_a_stack() {
        let mut fx = Fixture::new();
        give(&mut fx, potion(Some(2)));
        let (map, mut env) = fx.env();
        map.player_mut()
            .expect("player")
            .take_damage(6, env.rng, env.log);
        let action = UseItemAction::new(EntityId::PLAYER, 0, None);
        action.pre_validate(map, &env).expect("hurt");
        action.apply(map, &mut env).expect("heals");
        assert_eq!(fx.player().hp(), fx.player().max_hp() - 2);
        assert!(fx.log.contains("You consume the Health Potion, and recover 4 HP!"));
        let stack = fx.player().inventory.items()[0].stack.expect("stack");
        assert_eq!(stack.count, 1);
    }

    #[test]
    fn lightning_strikes_the_closest_visible_enemy() {
        let mut fx = Fixture::new();
        give(
            &mut fx,
            scroll(
                "Lightning Scroll",
                Consumable::Lightning {
                    damage: 20,
                    maximum_range: 5,
                },
            ),
        );
        let near = fx.spawn(monster("Orc", Ai::Hostile, 10, 0, 3), 7, 5);
        let far = fx.spawn(monster("Troll", Ai::Hostile, 16, 1, 4), 1, 1);
        let (map, mut env) = fx.env();
        let hits = UseItemAction::new(EntityId::PLAYER, 0, None)
            .apply(map, &mut env)
            .expect("strikes");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, near);
        assert!(hits[0].killed);
        assert!(fx.map.actor(far).is_some_and(|a| a.is_alive()));
        assert!(fx.player().inventory.is_empty());
        assert!(
            fx.log
                .contains("A lighting bolt strikes the Orc with a loud thunder, for 20 damage!")
        );
    }

    #[test]
    fn lightning_without_a_target_in_range() {
        let mut fx = Fixture::new();
        give(
            &mut fx,
            scroll(
                "Lightning Scroll",
                Consumable::Lightning {
                    damage: 20,
                    maximum_range: 1,
                },
            ),
        );
        fx.spawn(monster("Orc", Ai::Hostile, 10, 0, 3), 8, 8);
        let (map, env) = fx.env();
        let err = UseItemAction::new(EntityId::PLAYER, 0, None)
            .pre_validate(map, &env)
            .unwrap_err();
        assert_eq!(err.to_string(), "No enemy is close enough to strike.");
    }

    #[test]
    fn fireball_needs_a_visible_tile_and_hits_the_user_too() {
        let mut fx = Fixture::new();
        give(
            &mut fx,
            scroll(
                "Fireball Scroll",
                Consumable::Fireball {
                    damage: 3,
                    radius: 2,
                },
            ),
        );
        let orc = fx.spawn(monster("Orc", Ai::Hostile, 10, 0, 3), 6, 5);

        fx.map.clear_visibility();
        let (map, env) = fx.env();
        let action = UseItemAction::new(EntityId::PLAYER, 0, Some(Position::new(6, 5)));
        let err = action.pre_validate(map, &env).unwrap_err();
        assert_eq!(err.as_impossible(), Some(&ImpossibleAction::TargetNotVisible));

        fx.map.reveal_all();
        let (map, mut env) = fx.env();
        let hits = action.apply(map, &mut env).expect("explodes");
        let targets: Vec<_> = hits.iter().map(|hit| hit.target).collect();
        assert!(targets.contains(&orc));
        assert!(targets.contains(&EntityId::PLAYER));
        assert!(
            fx.log
                .contains("The Orc is engulfed in a fiery explosion, taking 3 damage!")
        );
    }

    #[test]
    fn confusion_rejects_self_and_empty_tiles() {
        let mut fx = Fixture::new();
        give(&mut fx, scroll("Confusion Scroll", Consumable::Confusion { turns: 10 }));
        let (map, env) = fx.env();
        let at_self = UseItemAction::new(EntityId::PLAYER, 0, Some(Position::new(5, 5)));
        assert_eq!(
            at_self.pre_validate(map, &env).unwrap_err().as_impossible(),
            Some(&ImpossibleAction::ConfuseSelf)
        );
        let at_floor = UseItemAction::new(EntityId::PLAYER, 0, Some(Position::new(2, 2)));
        assert_eq!(
            at_floor.pre_validate(map, &env).unwrap_err().as_impossible(),
            Some(&ImpossibleAction::NoEnemyAtTarget)
        );
    }

    #[test]
    fn confusion_wraps_the_previous_ai() {
        let mut fx = Fixture::new();
        give(&mut fx, scroll("Confusion Scroll", Consumable::Confusion { turns: 10 }));
        let orc = fx.spawn(monster("Orc", Ai::Hostile, 10, 0, 3), 3, 3);
        let (map, mut env) = fx.env();
        UseItemAction::new(EntityId::PLAYER, 0, Some(Position::new(3, 3)))
            .apply(map, &mut env)
            .expect("confuses");
        let ai = fx.map.actor(orc).and_then(|a| a.ai.clone());
        assert_eq!(
            ai,
            Some(Ai::Confused {
                turns_remaining: 10,
                previous: Box::new(Ai::Hostile),
            })
        );
    }

    #[test]
    fn items_without_an_effect_cannot_be_used() {
        let mut fx = Fixture::new();
        give(&mut fx, Item::new("Rock", '*', Rgb::WHITE));
        let (map, env) = fx.env();
        let err = UseItemAction::new(EntityId::PLAYER, 0, None)
            .pre_validate(map, &env)
            .unwrap_err();
        assert_eq!(err.to_string(), "The Rock cannot be used.");
    }
}
