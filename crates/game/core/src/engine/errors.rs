//! Error types for the action execution pipeline.

use crate::action::{ActionError, ImpossibleAction};
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::EntityId;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("{action} action failed: {source}")]
    Transition {
        action: &'static str,
        context: ErrorContext,
        source: TransitionPhaseError<ActionError>,
    },
}

impl ExecuteError {
    pub(crate) fn transition(
        action: &'static str,
        actor: EntityId,
        source: TransitionPhaseError<ActionError>,
    ) -> Self {
        ExecuteError::Transition {
            action,
            context: ErrorContext::new().with_actor(actor),
            source,
        }
    }

    /// The player-facing refusal, if the action was impossible.
    pub fn impossible(&self) -> Option<&ImpossibleAction> {
        self.action_error().as_impossible()
    }

    pub fn action_error(&self) -> &ActionError {
        match self {
            ExecuteError::Transition { source, .. } => &source.error,
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        match self {
            ExecuteError::Transition { source, .. } => source.phase,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        // A failure after mutation began means the world may be inconsistent.
        match self.phase() {
            TransitionPhase::PreValidate => self.action_error().severity(),
            TransitionPhase::Apply | TransitionPhase::PostValidate => ErrorSeverity::Internal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            ExecuteError::Transition { context, .. } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        self.action_error().error_code()
    }
}
