//! Item catalog loader.

use std::path::Path;

use game_core::{Consumable, Equippable, Item, Rgb, Stackable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One item as written in `items.ron`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub id: String,
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
    #[serde(default)]
    pub consumable: Option<Consumable>,
    #[serde(default)]
    pub equippable: Option<Equippable>,
    #[serde(default)]
    pub stack: Option<Stackable>,
    #[serde(default)]
    pub description: String,
}

impl ItemSpec {
    pub fn build(&self) -> Item {
        let mut item = Item::new(self.name.clone(), self.glyph, self.color)
            .with_description(self.description.clone());
        if let Some(consumable) = self.consumable {
            item = item.with_consumable(consumable);
        }
        if let Some(equippable) = self.equippable {
            item = item.with_equippable(equippable);
        }
        if let Some(stack) = self.stack {
            item = item.with_stack(stack);
        }
        item
    }
}

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemSpec>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing an ItemCatalog
    pub fn load(path: &Path) -> LoadResult<Vec<ItemSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ItemSpec>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        for spec in &catalog.items {
            if let Some(stack) = spec.stack {
                anyhow::ensure!(
                    stack.count > 0,
                    "Item '{}' has an empty stack",
                    spec.id
                );
            }
            if spec.equippable.is_some() && spec.stack.is_some() {
                tracing::warn!(item = %spec.id, "equippable item is also stackable");
            }
        }
        Ok(catalog.items)
    }
}
