//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionError, ActionResult, ActionTransition};
use crate::env::GameEnv;
use crate::state::GameMap;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the map and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    map: &mut GameMap,
    env: &mut GameEnv<'_>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(map, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(map, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(map, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each action to its transition and wraps the result in [`ActionResult`].
pub(super) fn execute_transition(
    action: &Action,
    map: &mut GameMap,
    env: &mut GameEnv<'_>,
) -> Result<ActionResult, ExecuteError> {
    let result: Result<ActionResult, TransitionPhaseError<ActionError>> = match action {
        Action::Wait(t) => drive_transition(t, map, env).map(|()| ActionResult::Wait),
        Action::Bump(t) => drive_transition(t, map, env),
        Action::Move(t) => drive_transition(t, map, env).map(|to| ActionResult::Move { to }),
        Action::Melee(t) => drive_transition(t, map, env).map(ActionResult::Attack),
        Action::Pickup(t) => drive_transition(t, map, env).map(ActionResult::Pickup),
        Action::Drop(t) => drive_transition(t, map, env).map(|()| ActionResult::Drop),
        Action::Equip(t) => drive_transition(t, map, env).map(|slot| ActionResult::Equip { slot }),
        Action::Attach(t) => drive_transition(t, map, env).map(ActionResult::Attach),
        Action::UseItem(t) => drive_transition(t, map, env).map(|hits| ActionResult::UseItem { hits }),
        Action::TakeStairs(t) => drive_transition(t, map, env).map(|()| ActionResult::Descend),
        Action::Sacrifice(t) => drive_transition(t, map, env).map(ActionResult::Ritual),
        Action::LevelUp(t) => drive_transition(t, map, env).map(ActionResult::LevelUp),
        Action::PrepareTurn(t) => drive_transition(t, map, env).map(ActionResult::PrepareTurn),
    };
    result.map_err(|source| ExecuteError::transition(action.name(), action.actor(), source))
}
