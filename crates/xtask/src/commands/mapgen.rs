//! Generate a floor and print it as ASCII.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use game_core::{FloorRequest, GameRng, GeneratorKind, TemplateId};
use runtime::PLAYER_TEMPLATE;

use crate::utils::{load_content, render_map};

/// Generate a floor and print it as ASCII
#[derive(Parser, Debug)]
pub struct Mapgen {
    /// RNG seed
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// 1-based floor number (drives spawn tables and the default generator)
    #[arg(short, long, default_value_t = 1)]
    floor: u32,

    /// Generator to use instead of the configured rotation (rooms, bsp, cave)
    #[arg(short, long, value_name = "KIND")]
    kind: Option<GeneratorKind>,

    /// Content directory (defaults to the embedded content)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl Mapgen {
    pub fn execute(self) -> Result<()> {
        anyhow::ensure!(self.floor >= 1, "Floor numbers start at 1");
        let content = load_content(self.data_dir.as_deref())?;
        let kind = self
            .kind
            .unwrap_or_else(|| content.config.generator_for_floor(self.floor));

        let player = content
            .templates
            .spawn_actor(&TemplateId::from(PLAYER_TEMPLATE))
            .context("Content has no player template")?;
        let request = FloorRequest::new(
            self.floor,
            &content.config,
            &content.templates,
            &content.tables,
        );
        let floor = kind
            .generate(&request, player, &mut GameRng::new(self.seed))
            .with_context(|| format!("Failed to generate floor {} with {kind}", self.floor))?;

        println!(
            "{} {} {} {} {} {}",
            style("Generator:").bold().cyan(),
            kind,
            style("Seed:").bold().cyan(),
            self.seed,
            style("Floor:").bold().cyan(),
            self.floor
        );
        for row in render_map(&floor.map, false) {
            println!("{row}");
        }
        println!();
        println!(
            "{} {}  {} {}  {} {}",
            style("Rooms:").bold().yellow(),
            floor.rooms.len(),
            style("Monsters:").bold().yellow(),
            floor.map.living_actors().count().saturating_sub(1),
            style("Items:").bold().yellow(),
            floor.map.items.len()
        );
        println!(
            "{} ({}, {})  {} {}",
            style("Start:").bold().yellow(),
            floor.start.x,
            floor.start.y,
            style("Stairs:").bold().yellow(),
            floor
                .map
                .downstairs
                .map(|p| format!("({}, {})", p.x, p.y))
                .unwrap_or_else(|| "none".to_string())
        );
        Ok(())
    }
}
