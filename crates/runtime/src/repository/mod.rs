//! Persistence for running sessions.
//!
//! A [`SessionSnapshot`] captures everything a [`GameSession`](crate::GameSession)
//! needs to resume: the current floor, the generator state and the message
//! log. Repositories store snapshots under named save slots.

mod error;
mod file;
mod memory;
mod snapshot;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileStateRepository;
pub use memory::InMemoryStateRepo;
pub use snapshot::SessionSnapshot;
pub use traits::StateRepository;
