//! Actor catalog loader.
//!
//! Actors reference part and item templates by id; they are resolved against
//! a [`TemplateRegistry`] that already holds the parts and items.

use std::path::Path;

use game_core::{
    Actor, Ai, Body, Entity, Fighter, GameConfig, Inventory, Level, LootTable, Rgb, TemplateId,
    TemplateRegistry,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Base fighter values. Body and equipment bonuses come on top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FighterSpec {
    pub hp: i32,
    pub mental_strength: i32,
    pub spiritual_defense: i32,
    pub spiritual_power: i32,
    pub defense: i32,
    pub power: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventorySpec {
    pub capacity: usize,
    /// Item template ids, one spawned copy each.
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSpec {
    /// Zero for actors that never level up.
    pub level_up_base: i32,
    pub xp_given: i32,
}

/// One actor as written in `actors.ron`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSpec {
    pub id: String,
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
    pub ai: Ai,
    #[serde(default)]
    pub fighter: FighterSpec,
    /// Part template ids, attached in order.
    #[serde(default)]
    pub body: Vec<String>,
    #[serde(default)]
    pub inventory: InventorySpec,
    #[serde(default)]
    pub level: LevelSpec,
    #[serde(default)]
    pub loot: Option<LootTable>,
    #[serde(default)]
    pub description: String,
}

impl ActorSpec {
    /// Drop table used when an actor does not name its own.
    pub const DEFAULT_LOOT: LootTable = LootTable {
        inventory_chance: 0.1,
        inventory_rolls: 3,
        body_chance: 0.8,
        body_rolls: 1,
    };

    /// Resolves part and item references and assembles the actor.
    pub fn build(&self, templates: &TemplateRegistry) -> LoadResult<Actor> {
        anyhow::ensure!(
            self.body.len() <= GameConfig::MAX_BODY_PARTS,
            "Actor '{}' has {} body parts, at most {} fit",
            self.id,
            self.body.len(),
            GameConfig::MAX_BODY_PARTS
        );
        anyhow::ensure!(
            self.inventory.items.len() <= self.inventory.capacity,
            "Actor '{}' carries {} items but has room for {}",
            self.id,
            self.inventory.items.len(),
            self.inventory.capacity
        );

        let parts = self
            .body
            .iter()
            .map(|id| {
                templates.spawn_part(&TemplateId::new(id.as_str())).map_err(|e| {
                    anyhow::anyhow!("Failed to resolve body part for actor '{}': {}", self.id, e)
                })
            })
            .collect::<LoadResult<Vec<_>>>()?;
        let items = self
            .inventory
            .items
            .iter()
            .map(|id| {
                templates.spawn_item(&TemplateId::new(id.as_str())).map_err(|e| {
                    anyhow::anyhow!("Failed to resolve inventory item for actor '{}': {}", self.id, e)
                })
            })
            .collect::<LoadResult<Vec<_>>>()?;

        let f = self.fighter;
        let fighter = Fighter::new(
            f.hp,
            f.mental_strength,
            f.spiritual_defense,
            f.spiritual_power,
            f.defense,
            f.power,
        );
        let entity = Entity::new(self.name.clone(), self.glyph, self.color)
            .with_description(self.description.clone());

        Ok(Actor::new(entity, self.ai.clone(), fighter)
            .with_body(Body::from_parts(parts))
            .with_inventory(Inventory::with_items(self.inventory.capacity, items))
            .with_level(Level::new(self.level.level_up_base, self.level.xp_given))
            .with_loot_table(self.loot.unwrap_or(Self::DEFAULT_LOOT)))
    }
}

/// Actor catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorCatalog {
    pub actors: Vec<ActorSpec>,
}

/// Loader for actor catalog from RON files.
pub struct ActorLoader;

impl ActorLoader {
    /// Load actor catalog from a RON file.
    ///
    /// References are not resolved here; call [`ActorSpec::build`] once the
    /// part and item templates are registered.
    pub fn load(path: &Path) -> LoadResult<Vec<ActorSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ActorSpec>> {
        let catalog: ActorCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse actor catalog RON: {}", e))?;

        for spec in &catalog.actors {
            anyhow::ensure!(
                !matches!(spec.ai, Ai::Fleeing { .. } | Ai::Confused { .. }),
                "Actor '{}' cannot start in a timed AI state",
                spec.id
            );
        }
        Ok(catalog.actors)
    }
}
