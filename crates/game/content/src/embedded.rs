//! Default data files, compiled in.

pub const CONFIG: &str = include_str!("../data/config.toml");
pub const SPAWN_TABLES: &str = include_str!("../data/spawn_tables.toml");
pub const PARTS: &str = include_str!("../data/parts.ron");
pub const ITEMS: &str = include_str!("../data/items.ron");
pub const ACTORS: &str = include_str!("../data/actors.ron");

/// Directory the embedded files were read from at build time.
pub fn source_dir() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/data")
}
