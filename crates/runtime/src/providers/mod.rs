//! Built-in [`ActionProvider`](crate::api::ActionProvider) implementations.

mod ai;
mod autoplay;
pub mod pathfinding;

pub use ai::MonsterAiProvider;
pub use autoplay::AutoPlayProvider;
