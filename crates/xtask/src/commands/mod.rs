//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod check_content;
mod mapgen;
mod read_save;
mod simulate;

pub use check_content::CheckContent;
pub use mapgen::Mapgen;
pub use read_save::ReadSave;
pub use simulate::Simulate;
