//! Bookkeeping actions the runtime issues on behalf of non-player actors.

use crate::action::{ActionError, ActionTransition, living_actor, living_actor_mut};
use crate::env::GameEnv;
use crate::log::MessageTag;
use crate::state::{Ai, AiTick, EntityId, GameMap};

/// Advances the actor's timed AI state by one turn.
///
/// Runs before the actor chooses its move. When a timer expires the prior
/// state is restored and the actor loses the rest of its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrepareTurnAction {
    pub actor: EntityId,
}

impl PrepareTurnAction {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }
}

impl ActionTransition for PrepareTurnAction {
    type Error = ActionError;
    type Result = AiTick;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, map: &GameMap, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        living_actor(map, self.actor).map(|_| ())
    }

    fn apply(&self, map: &mut GameMap, env: &mut GameEnv<'_>) -> Result<AiTick, Self::Error> {
        let actor = living_actor_mut(map, self.actor)?;
        let Some(ai) = actor.ai.as_mut() else {
            return Ok(AiTick::Continue);
        };
        let was_confused = matches!(ai, Ai::Confused { .. });
        let tick = ai.tick();
        if tick == AiTick::Expired {
            let name = actor.name();
            let text = if was_confused {
                format!("The {name} is no longer confused.")
            } else {
                format!("The {name} stops running away.")
            };
            env.log.add_message(text, MessageTag::StatusEffect);
        }
        Ok(tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::test_support::{Fixture, monster};

    fn tick(fx: &mut Fixture, id: EntityId) -> AiTick {
        let (map, mut env) = fx.env();
        PrepareTurnAction::new(id).apply(map, &mut env).expect("alive")
    }

    #[test]
    fn confusion_counts_down_then_restores() {
        let mut fx = Fixture::new();
        let orc = fx.spawn(monster("Orc", Ai::Hostile.confused(1), 10, 0, 3), 3, 3);
        assert_eq!(tick(&mut fx, orc), AiTick::Continue);
        assert_eq!(tick(&mut fx, orc), AiTick::Expired);
        assert_eq!(fx.map.actor(orc).and_then(|a| a.ai.clone()), Some(Ai::Hostile));
        assert!(fx.log.contains("The Orc is no longer confused."));
        assert_eq!(tick(&mut fx, orc), AiTick::Continue);
    }

    #[test]
    fn fleeing_reverts_to_neutral() {
        let mut fx = Fixture::new();
        let ai = Ai::Fleeing {
            from: EntityId::PLAYER,
            turns_remaining: 0,
        };
        let librarian = fx.spawn(monster("Librarian", ai, 10, 0, 3), 3, 3);
        assert_eq!(tick(&mut fx, librarian), AiTick::Expired);
        assert_eq!(
            fx.map.actor(librarian).and_then(|a| a.ai.clone()),
            Some(Ai::Neutral)
        );
    }
}
