//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing sections and keys keep the values of [`GameConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        anyhow::ensure!(
            config.map.width > 2 && config.map.height > 2,
            "Map must be at least 3x3, got {}x{}",
            config.map.width,
            config.map.height
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::procgen::GeneratorKind;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            generator_rotation = ["cave"]

            [rooms]
            max_rooms = 5
            "#,
        )
        .expect("valid config");

        assert_eq!(config.generator_rotation, vec![GeneratorKind::Cave]);
        assert_eq!(config.rooms.max_rooms, 5);
        assert_eq!(config.rooms.room_max_size, 10);
        assert_eq!(config.map, GameConfig::default().map);
        assert_eq!(config.ritual_max_quality, GameConfig::DEFAULT_RITUAL_MAX_QUALITY);
    }

    #[test]
    fn unknown_generator_is_rejected() {
        let err = ConfigLoader::parse(r#"generator_rotation = ["maze"]"#).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config TOML"));
    }

    #[test]
    fn degenerate_map_is_rejected() {
        let err = ConfigLoader::parse("[map]\nwidth = 2\nheight = 40\n").unwrap_err();
        assert_eq!(err.to_string(), "Map must be at least 3x3, got 2x40");
    }
}
