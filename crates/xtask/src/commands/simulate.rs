//! Headless auto-play.
//!
//! Drives a [`GameSession`] with [`AutoPlayProvider`] until the player dies or
//! the turn budget runs out, then prints a summary and the tail of the log.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use game_core::{Action, EntityId};
use runtime::{AutoPlayProvider, FileStateRepository, GameSession};

use crate::utils::{load_content, render_map};

/// Play a session headlessly with the auto-play policy
#[derive(Parser, Debug)]
pub struct Simulate {
    /// RNG seed
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Maximum number of submitted actions
    #[arg(short, long, default_value_t = 1000)]
    turns: u32,

    /// Content directory (defaults to the embedded content)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Number of trailing log lines to print
    #[arg(long, default_value_t = 15)]
    messages: usize,

    /// Print the explored part of the final floor
    #[arg(long)]
    show_map: bool,

    /// Save the final session into this directory (slot "simulation")
    #[arg(long, value_name = "DIR")]
    save_dir: Option<PathBuf>,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let content = load_content(self.data_dir.as_deref())?;
        let mut session = GameSession::builder(content).seed(self.seed).build()?;

        let mut refused = 0u32;
        for _ in 0..self.turns {
            if session.is_player_dead() {
                break;
            }
            let report = session.play_turn(&AutoPlayProvider)?;
            if !report.consumed {
                refused += 1;
                session.submit(Action::wait(EntityId::PLAYER))?;
            }
            if report.descended {
                tracing::info!(floor = report.floor, turn = session.turn(), "auto-play descended");
            }
        }

        println!("{}", style("=== Simulation Summary ===").bold().green());
        println!("  Seed: {}", self.seed);
        println!("  Turns: {}", session.turn());
        println!("  Floor reached: {}", session.floor());
        println!("  Refused actions: {refused}");
        match session.player() {
            Some(player) if player.is_alive() => println!(
                "  Player: level {}, {}/{} HP",
                player.level.current_level,
                player.hp(),
                player.max_hp()
            ),
            _ => println!("  Player: {}", style("dead").red().bold()),
        }
        println!();

        println!("{}", style("Last messages:").bold().yellow());
        let mut tail: Vec<_> = session.log().recent(self.messages).collect();
        tail.reverse();
        for entry in tail {
            println!("  [{}] {}", style(entry.tag).dim(), entry.full_text());
        }

        if self.show_map {
            println!();
            for row in render_map(session.map(), true) {
                println!("{row}");
            }
        }

        if let Some(dir) = self.save_dir {
            let repo = FileStateRepository::new(&dir)?;
            session.save(&repo, "simulation")?;
            println!();
            println!(
                "{} {}",
                style("Saved:").bold().cyan(),
                dir.join("simulation.sav").display()
            );
        }
        Ok(())
    }
}
