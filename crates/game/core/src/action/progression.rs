//! Spending a pending level-up.

use crate::action::{ActionError, ActionTransition, ImpossibleAction, living_actor, living_actor_mut};
use crate::env::GameEnv;
use crate::log::MessageTag;
use crate::state::{EntityId, GameMap};

/// Stat raised by a level-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LevelUpChoice {
    /// +20 max hit points.
    Constitution,
    /// +1 attack.
    Strength,
    /// +1 defense.
    Agility,
}

impl LevelUpChoice {
    pub const MAX_HP_GAIN: i32 = 20;

    fn message(self) -> &'static str {
        match self {
            LevelUpChoice::Constitution => "Your health improves!",
            LevelUpChoice::Strength => "You feel stronger!",
            LevelUpChoice::Agility => "Your movements are getting swifter!",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUpAction {
    pub actor: EntityId,
    pub choice: LevelUpChoice,
}

impl LevelUpAction {
    pub fn new(actor: EntityId, choice: LevelUpChoice) -> Self {
        Self { actor, choice }
    }
}

impl ActionTransition for LevelUpAction {
    type Error = ActionError;
    type Result = LevelUpChoice;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, map: &GameMap, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if !living_actor(map, self.actor)?.level.requires_level_up() {
            return Err(ImpossibleAction::NoLevelUpPending.into());
        }
        Ok(())
    }

    fn apply(&self, map: &mut GameMap, env: &mut GameEnv<'_>) -> Result<LevelUpChoice, Self::Error> {
        let actor = living_actor_mut(map, self.actor)?;
        match self.choice {
            LevelUpChoice::Constitution => actor.fighter.raise_max_hp(LevelUpChoice::MAX_HP_GAIN),
            LevelUpChoice::Strength => actor.fighter.base_power += 1,
            LevelUpChoice::Agility => actor.fighter.base_defense += 1,
        }
        env.log
            .add_message(self.choice.message().to_string(), MessageTag::LevelUp);
        actor.level.increase_level();
        tracing::debug!(actor = %self.actor, choice = %self.choice, level = actor.level.current_level, "level up");
        Ok(self.choice)
    }
}
