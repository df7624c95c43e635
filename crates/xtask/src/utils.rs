//! Utility functions for xtask commands

use std::path::Path;

use anyhow::{Context, Result};
use game_content::{ContentFactory, GameContent};
use game_core::{GameMap, Position};

/// Content from `data_dir`, or the copy embedded in the binary.
pub fn load_content(data_dir: Option<&Path>) -> Result<GameContent> {
    match data_dir {
        Some(dir) => ContentFactory::new(dir)
            .load_content()
            .with_context(|| format!("Failed to load content from {}", dir.display())),
        None => GameContent::embedded().context("Failed to load embedded content"),
    }
}

/// ASCII rows of `map`: actors over items over terrain.
///
/// With `explored_only`, unexplored tiles render blank.
pub fn render_map(map: &GameMap, explored_only: bool) -> Vec<String> {
    let mut rows = Vec::with_capacity(map.height() as usize);
    for y in 0..map.height() {
        let mut row = String::with_capacity(map.width() as usize);
        for x in 0..map.width() {
            let position = Position::new(x, y);
            if explored_only && !map.is_explored(position) {
                row.push(' ');
                continue;
            }
            row.push(glyph_at(map, position));
        }
        rows.push(row);
    }
    rows
}

fn glyph_at(map: &GameMap, position: Position) -> char {
    let actor = map
        .actors()
        .filter(|actor| actor.position() == position)
        .max_by_key(|actor| (actor.is_alive(), actor.entity.render_order));
    if let Some(actor) = actor.filter(|actor| actor.is_alive()) {
        return actor.entity.glyph;
    }
    if let Some(index) = map.item_index_at(position) {
        return map.items[index].entity.glyph;
    }
    if let Some(corpse) = actor {
        return corpse.entity.glyph;
    }
    map.tile(position).map(|tile| tile.glyph()).unwrap_or(' ')
}
