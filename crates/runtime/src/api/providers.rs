//! Abstraction for sourcing player and NPC intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so the simulation
//! can run with human input, scripted fixtures, or AI policies.
use game_core::{Action, EntityId, GameMap, GameRng};

use super::errors::Result;

/// Trait for providing actions based on the current floor.
///
/// Different implementations can handle:
/// - NPC AI decisions
/// - Scripted/replayed actions
/// - Headless auto-play
/// - Testing fixtures
///
/// Providers read the map but never mutate it; randomness comes from the
/// session's generator so a snapshot replays the same choices.
pub trait ActionProvider: Send + Sync {
    /// Provide an action for `entity` on `map`.
    fn provide_action(&self, entity: EntityId, map: &GameMap, rng: &mut GameRng) -> Result<Action>;
}

/// A simple action provider that always returns Wait action.
/// Useful for testing or as a fallback.
pub struct WaitActionProvider;

impl ActionProvider for WaitActionProvider {
    fn provide_action(&self, entity: EntityId, _map: &GameMap, _rng: &mut GameRng) -> Result<Action> {
        Ok(Action::wait(entity))
    }
}
