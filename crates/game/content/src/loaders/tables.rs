//! Spawn tables loader.

use std::path::Path;

use game_core::SpawnTables;

use crate::loaders::{LoadResult, read_file};

/// Loader for floor-indexed spawn tables from TOML files.
pub struct TablesLoader;

impl TablesLoader {
    /// Load spawn tables from a TOML file.
    ///
    /// Template ids are not checked here; see
    /// [`validate_tables`](crate::loaders::validate_tables).
    pub fn load(path: &Path) -> LoadResult<SpawnTables> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SpawnTables> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse spawn tables TOML: {}", e))
    }
}
