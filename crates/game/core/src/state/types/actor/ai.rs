use crate::state::EntityId;

/// Behaviour state of a living actor. `None` on the actor means dead.
///
/// Only the state lives here; choosing an action from it is the job of the
/// runtime's action providers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Ai {
    /// Driven by external input (the player).
    Controlled,
    Hostile,
    Neutral,
    /// Running from `from`; reverts to [`Ai::Neutral`].
    Fleeing { from: EntityId, turns_remaining: u32 },
    /// Stumbling randomly; reverts to `previous`.
    Confused {
        turns_remaining: u32,
        previous: Box<Ai>,
    },
}

/// What happened when a timed state was advanced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiTick {
    /// Nothing timed, or the timer still runs.
    Continue,
    /// The timed state ended; the actor spends this turn recovering.
    Expired,
}

impl Ai {
    pub fn is_neutral(&self) -> bool {
        matches!(self, Ai::Neutral)
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self, Ai::Controlled)
    }

    /// Wraps the current state in a timed confusion.
    pub fn confused(self, turns: u32) -> Self {
        let previous = match self {
            Ai::Confused { previous, .. } => previous,
            other => Box::new(other),
        };
        Ai::Confused {
            turns_remaining: turns,
            previous,
        }
    }

    /// Counts a timed state down by one turn, restoring the prior state when
    /// the counter is already exhausted.
    pub fn tick(&mut self) -> AiTick {
        match self {
            Ai::Fleeing {
                turns_remaining, ..
            }
            | Ai::Confused {
                turns_remaining, ..
            } if *turns_remaining > 0 => {
                *turns_remaining -= 1;
                AiTick::Continue
            }
            Ai::Fleeing { .. } => {
                *self = Ai::Neutral;
                AiTick::Expired
            }
            Ai::Confused { previous, .. } => {
                let restored = std::mem::replace(previous.as_mut(), Ai::Neutral);
                *self = restored;
                AiTick::Expired
            }
            _ => AiTick::Continue,
        }
    }
}
