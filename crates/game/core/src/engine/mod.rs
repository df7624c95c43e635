//! Action execution pipeline.
//!
//! The [`GameEngine`] is the only place that mutates a [`GameMap`] on behalf of
//! an [`Action`]. Player commands and the system actions the runtime issues for
//! monsters flow through the same `pre_validate → apply → post_validate`
//! pipeline.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::{Action, ActionResult};
use crate::env::GameEnv;
use crate::state::GameMap;

/// Applies actions to one floor.
pub struct GameEngine<'a> {
    map: &'a mut GameMap,
}

impl<'a> GameEngine<'a> {
    pub fn new(map: &'a mut GameMap) -> Self {
        Self { map }
    }

    /// Executes `action` through the transition pipeline.
    ///
    /// A pre-validation failure leaves the map untouched; the runtime reports
    /// [`ExecuteError::impossible`] refusals to the player without spending
    /// the turn.
    pub fn execute(
        &mut self,
        env: &mut GameEnv<'_>,
        action: &Action,
    ) -> Result<ActionResult, ExecuteError> {
        let result = transition::execute_transition(action, self.map, env);
        match &result {
            Ok(_) => tracing::debug!(action = action.name(), actor = %action.actor(), "action applied"),
            Err(error) => tracing::debug!(action = action.name(), actor = %action.actor(), %error, "action rejected"),
        }
        result
    }
}
