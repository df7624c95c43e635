//! Read and inspect save files written by the runtime.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use runtime::SessionSnapshot;

use crate::utils::render_map;

/// Read and inspect a save file
#[derive(Parser)]
pub struct ReadSave {
    /// Path to a `.sav` file
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Floor, turn, actors and recent messages
    Summary,
    /// Explored part of the floor as ASCII
    Map,
    /// Pretty-printed debug format
    Debug,
}

impl ReadSave {
    pub fn execute(self) -> Result<()> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("Failed to read save file: {}", self.path.display()))?;
        let snapshot = SessionSnapshot::from_bytes(&bytes).with_context(|| {
            format!("Failed to deserialize save file: {}", self.path.display())
        })?;

        println!(
            "{} {}",
            style("Save File:").bold().cyan(),
            self.path.display()
        );
        println!("{} {} bytes", style("File Size:").bold().cyan(), bytes.len());
        println!();

        match self.format {
            OutputFormat::Summary => print_summary(&snapshot),
            OutputFormat::Map => {
                for row in render_map(&snapshot.map, true) {
                    println!("{row}");
                }
            }
            OutputFormat::Debug => println!("{snapshot:#?}"),
        }
        Ok(())
    }
}

fn print_summary(snapshot: &SessionSnapshot) {
    println!("{}", style("=== Session Summary ===").bold().green());
    println!("  Floor: {}", snapshot.floor);
    println!("  Turn: {}", snapshot.turn);
    println!("  RNG state: {:#018x}", snapshot.rng.state());
    println!();

    println!("{}", style("Actors:").bold().yellow());
    for actor in snapshot.map.actors() {
        let status = if actor.is_alive() { "alive" } else { "dead" };
        println!(
            "  {} {} - HP: {}/{}, Position: ({}, {}), {status}",
            actor.id,
            actor.name(),
            actor.hp(),
            actor.max_hp(),
            actor.position().x,
            actor.position().y
        );
    }
    println!();

    println!("{}", style("Recent messages:").bold().yellow());
    let mut tail: Vec<_> = snapshot.log.recent(10).collect();
    tail.reverse();
    for entry in tail {
        println!("  {}", entry.full_text());
    }
}
