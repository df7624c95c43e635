//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from floor generation, the core engine, action providers
//! and repositories so clients can bubble them up with consistent context.
use std::fmt;

use game_core::{
    EntityId, ErrorContext, ErrorSeverity, ExecuteError, GameError, GenerationError, TemplateError,
};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("the player is not on the current floor")]
    PlayerMissing,

    #[error("the player is dead")]
    PlayerDead,

    #[error("a level-up choice must be made first")]
    LevelUpPending,

    #[error("action actor {provided} does not match current entity {expected}")]
    InvalidActionActor {
        expected: EntityId,
        provided: EntityId,
    },

    #[error("{kind} action provider failed for {entity}: {reason}")]
    Provider {
        kind: ProviderKind,
        entity: EntityId,
        reason: String,
    },

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error("failed to generate floor {floor}")]
    Generation {
        floor: u32,
        #[source]
        source: GenerationError,
    },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RuntimeError {
    pub(crate) fn provider(kind: ProviderKind, entity: EntityId, reason: impl Into<String>) -> Self {
        Self::Provider {
            kind,
            entity,
            reason: reason.into(),
        }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::PlayerDead | RuntimeError::LevelUpPending => ErrorSeverity::Validation,
            RuntimeError::InvalidActionActor { .. } => ErrorSeverity::Validation,
            RuntimeError::Execute(e) => e.severity(),
            RuntimeError::Generation { source, .. } => source.severity(),
            RuntimeError::Template(e) => e.severity(),
            RuntimeError::PlayerMissing
            | RuntimeError::Provider { .. }
            | RuntimeError::Repository(_) => ErrorSeverity::Fatal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            RuntimeError::Execute(e) => e.context(),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::PlayerMissing => "RUNTIME_PLAYER_MISSING",
            RuntimeError::PlayerDead => "RUNTIME_PLAYER_DEAD",
            RuntimeError::LevelUpPending => "RUNTIME_LEVEL_UP_PENDING",
            RuntimeError::InvalidActionActor { .. } => "RUNTIME_INVALID_ACTOR",
            RuntimeError::Provider { .. } => "RUNTIME_PROVIDER",
            RuntimeError::Execute(e) => e.error_code(),
            RuntimeError::Generation { source, .. } => source.error_code(),
            RuntimeError::Template(e) => e.error_code(),
            RuntimeError::Repository(_) => "RUNTIME_REPOSITORY",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    Player,
    Npc,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Player => "player",
            ProviderKind::Npc => "npc",
        };
        write!(f, "{}", label)
    }
}
