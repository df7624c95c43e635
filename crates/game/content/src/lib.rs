//! Data-driven content definitions and loaders.
//!
//! This crate houses the default game content and provides loaders for
//! RON/TOML data files:
//! - Body part presets (RON)
//! - Item catalogs (RON)
//! - Actor catalogs referencing parts and items by id (RON)
//! - Floor-indexed spawn tables (TOML)
//! - Game configuration (TOML)
//!
//! Loaded content becomes an immutable [`game_core::TemplateRegistry`] plus
//! the tables and config a session is started with.

#[cfg(feature = "loaders")]
pub mod embedded;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActorLoader, ActorSpec, ConfigLoader, ContentFactory, GameContent, ItemLoader, ItemSpec,
    PartLoader, PartSpec, TablesLoader, build_registry, validate_tables,
};
