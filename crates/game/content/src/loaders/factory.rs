//! Content factory for building game content from data files.

use std::path::{Path, PathBuf};

use game_core::{GameConfig, SpawnTables, TemplateRegistry};

use crate::loaders::{
    ActorLoader, ActorSpec, ConfigLoader, ItemLoader, ItemSpec, LoadResult, PartLoader, PartSpec,
    TablesLoader, build_registry, validate_tables,
};

/// Everything a session needs from content: rules, templates and tables.
#[derive(Clone, Debug, PartialEq)]
pub struct GameContent {
    pub config: GameConfig,
    pub templates: TemplateRegistry,
    pub tables: SpawnTables,
}

impl GameContent {
    /// Builds and cross-checks content from already-parsed pieces.
    pub fn assemble(
        config: GameConfig,
        parts: &[PartSpec],
        items: &[ItemSpec],
        actors: &[ActorSpec],
        tables: SpawnTables,
    ) -> LoadResult<Self> {
        let templates = build_registry(parts, items, actors)?;
        validate_tables(&tables, &templates)?;
        Ok(Self {
            config,
            templates,
            tables,
        })
    }

    /// The default content compiled into the binary.
    pub fn embedded() -> LoadResult<Self> {
        Self::assemble(
            ConfigLoader::parse(crate::embedded::CONFIG)?,
            &PartLoader::parse(crate::embedded::PARTS)?,
            &ItemLoader::parse(crate::embedded::ITEMS)?,
            &ActorLoader::parse(crate::embedded::ACTORS)?,
            TablesLoader::parse(crate::embedded::SPAWN_TABLES)?,
        )
    }
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── spawn_tables.toml
/// ├── parts.ron
/// ├── items.ron
/// └── actors.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load spawn tables from `spawn_tables.toml`.
    pub fn load_tables(&self) -> LoadResult<SpawnTables> {
        TablesLoader::load(&self.data_dir.join("spawn_tables.toml"))
    }

    /// Load part presets from `parts.ron`.
    pub fn load_parts(&self) -> LoadResult<Vec<PartSpec>> {
        PartLoader::load(&self.data_dir.join("parts.ron"))
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemSpec>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load actor catalog from `actors.ron`.
    pub fn load_actors(&self) -> LoadResult<Vec<ActorSpec>> {
        ActorLoader::load(&self.data_dir.join("actors.ron"))
    }

    /// Load the three catalogs and register them.
    pub fn load_templates(&self) -> LoadResult<TemplateRegistry> {
        build_registry(&self.load_parts()?, &self.load_items()?, &self.load_actors()?)
    }

    /// Load and cross-check the whole directory.
    pub fn load_content(&self) -> LoadResult<GameContent> {
        let content = GameContent::assemble(
            self.load_config()?,
            &self.load_parts()?,
            &self.load_items()?,
            &self.load_actors()?,
            self.load_tables()?,
        )?;
        tracing::info!(
            data_dir = %self.data_dir.display(),
            templates = content.templates.len(),
            "content loaded"
        );
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_directory_reports_the_file() {
        let factory = ContentFactory::new("/nonexistent/dungeon-data");
        let err = factory.load_config().unwrap_err();
        assert!(
            err.to_string()
                .starts_with("Failed to read file /nonexistent/dungeon-data/config.toml")
        );
    }
}
