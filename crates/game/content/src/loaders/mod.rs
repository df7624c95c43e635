//! Content loaders for reading game data from files.
//!
//! Catalogs (parts, items, actors) are RON; configuration and spawn tables
//! are TOML. Every loader offers `load(path)` for files and `parse(text)` for
//! in-memory sources such as the embedded defaults.

pub mod actors;
pub mod config;
pub mod factory;
pub mod item;
pub mod parts;
pub mod registry;
pub mod tables;

pub use actors::{ActorLoader, ActorSpec, FighterSpec, InventorySpec, LevelSpec};
pub use config::ConfigLoader;
pub use factory::{ContentFactory, GameContent};
pub use item::{ItemLoader, ItemSpec};
pub use parts::{PartLoader, PartSpec};
pub use registry::{build_registry, validate_tables};
pub use tables::TablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
