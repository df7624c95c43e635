//! Body part preset loader.

use std::path::Path;

use game_core::{Part, PartBonuses, PartForm, PartKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One part preset as written in `parts.ron`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartSpec {
    pub id: String,
    pub name: String,
    pub kind: PartKind,
    #[serde(default)]
    pub form: PartForm,
    /// Health capacity; the part starts at full health.
    #[serde(default)]
    pub health: i32,
    #[serde(default)]
    pub bonuses: PartBonuses,
    #[serde(default)]
    pub description: String,
}

impl PartSpec {
    pub fn build(&self) -> Part {
        Part::new(
            self.name.clone(),
            self.kind,
            self.form,
            self.health,
            self.bonuses,
        )
        .with_description(self.description.clone())
    }
}

/// Part catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartCatalog {
    pub parts: Vec<PartSpec>,
}

/// Loader for part presets from RON files.
pub struct PartLoader;

impl PartLoader {
    /// Load part presets from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<PartSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<PartSpec>> {
        let catalog: PartCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse part catalog RON: {}", e))?;

        for spec in &catalog.parts {
            anyhow::ensure!(
                spec.health >= 0,
                "Part '{}' has negative health {}",
                spec.id,
                spec.health
            );
        }
        Ok(catalog.parts)
    }
}
