//! Runtime orchestration for the turn-based game.
//!
//! This crate wires content, the core engine and action providers into a
//! synchronous turn loop. Consumers build a [`GameSession`] from loaded
//! [`GameContent`](game_content::GameContent), submit player actions and read
//! back [`TurnReport`]s.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the turn loop and its builder
//! - [`api`] exposes the error and provider types clients interact with
//! - [`providers`] holds the monster AI, auto-play and pathfinding
//! - [`fov`] refreshes the visibility overlay after each turn
//! - [`repository`] saves and restores session snapshots
pub mod api;
pub mod fov;
pub mod providers;
pub mod repository;
pub mod session;

pub use api::{ActionProvider, ProviderKind, Result, RuntimeError, WaitActionProvider};
pub use providers::{AutoPlayProvider, MonsterAiProvider};
pub use repository::{
    FileStateRepository, InMemoryStateRepo, RepositoryError, SessionSnapshot, StateRepository,
};
pub use session::{GameSession, PLAYER_TEMPLATE, SessionBuilder, TurnReport};
