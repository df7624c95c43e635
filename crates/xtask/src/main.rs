//! Development tasks for the dungeon workspace.
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{CheckContent, Mapgen, ReadSave, Simulate};

/// Development tasks for the dungeon workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the dungeon", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate a floor and print it as ASCII
    Mapgen(Mapgen),

    /// Play a session headlessly with the auto-play policy
    Simulate(Simulate),

    /// Load and cross-check a content directory
    CheckContent(CheckContent),

    /// Read and inspect a save file
    ReadSave(ReadSave),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Mapgen(cmd) => cmd.execute(),
        Command::Simulate(cmd) => cmd.execute(),
        Command::CheckContent(cmd) => cmd.execute(),
        Command::ReadSave(cmd) => cmd.execute(),
    }
}
