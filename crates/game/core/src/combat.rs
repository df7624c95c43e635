//! Damage arithmetic and death bookkeeping shared by every damaging action.

use crate::env::GameEnv;
use crate::log::MessageTag;
use crate::state::{Ai, Death, EntityId, GameMap};

/// Melee damage: a fifth of the power/defense gap, rounded toward zero.
///
/// Never negative; a defender at least as tough as the attacker takes nothing.
pub fn melee_damage(power: i32, defense: i32) -> i32 {
    ((power - defense) / 5).max(0)
}

/// First letter upper-cased, the rest lower-cased.
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Damage dealt to one actor, and whether it died.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hit {
    pub target: EntityId,
    pub damage: i32,
    pub killed: bool,
}

/// Applies `amount` damage to `target`.
///
/// On death the dropped loot is put on the map and `xp_given` goes to the
/// attacker, or to the player when the damage had no attacker. Dead or
/// missing targets are ignored.
pub fn apply_damage(
    map: &mut GameMap,
    target: EntityId,
    amount: i32,
    attacker: Option<EntityId>,
    env: &mut GameEnv<'_>,
) -> Option<Hit> {
    let actor = map.actor_mut(target).filter(|actor| actor.is_alive())?;
    let death = actor.take_damage(amount, env.rng, env.log);
    let killed = death.is_some();
    if let Some(death) = death {
        settle_death(map, death, attacker.unwrap_or(EntityId::PLAYER), env);
    }
    Some(Hit {
        target,
        damage: amount,
        killed,
    })
}

/// Places drops and awards experience for a death that already happened.
pub fn settle_death(map: &mut GameMap, death: Death, killer: EntityId, env: &mut GameEnv<'_>) {
    tracing::debug!(victim = %death.victim, killer = %killer, drops = death.drops.len(), "actor died");
    for item in death.drops {
        map.add_item(item);
    }
    if killer == death.victim {
        return;
    }
    if let Some(killer) = map.actor_mut(killer).filter(|actor| actor.is_alive()) {
        killer.level.add_xp(death.xp_given, env.log);
    }
}

/// Settles the death of `id` if it was left at zero hit points outside
/// combat (a dropped, detached or sacrificed part). Returns true on death.
pub fn settle_part_loss(map: &mut GameMap, id: EntityId, env: &mut GameEnv<'_>) -> bool {
    let Some(death) = map
        .actor_mut(id)
        .and_then(|actor| actor.check_death(env.rng, env.log))
    else {
        return false;
    };
    settle_death(map, death, id, env);
    true
}

/// Neutral actors that get hurt run from whoever hurt them.
pub(crate) fn provoke(map: &mut GameMap, target: EntityId, attacker: EntityId, turns: u32) {
    if let Some(actor) = map.actor_mut(target)
        && actor.ai.as_ref().is_some_and(Ai::is_neutral)
    {
        actor.ai = Some(Ai::Fleeing {
            from: attacker,
            turns_remaining: turns,
        });
    }
}

/// Tag for an attack message depending on who swings.
pub(crate) fn attack_tag(attacker: EntityId) -> MessageTag {
    if attacker.is_player() {
        MessageTag::PlayerAttack
    } else {
        MessageTag::EnemyAttack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_is_a_fifth_of_the_gap() {
        assert_eq!(melee_damage(12, 2), 2);
        assert_eq!(melee_damage(10, 10), 0);
        assert_eq!(melee_damage(14, 0), 2);
        assert_eq!(melee_damage(15, 0), 3);
        assert_eq!(melee_damage(1, 9), 0);
    }

    #[test]
    fn capitalize_matches_sentence_case() {
        assert_eq!(capitalize("orc"), "Orc");
        assert_eq!(capitalize("Mad Librarian"), "Mad librarian");
        assert_eq!(capitalize(""), "");
    }
}
