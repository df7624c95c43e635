//! Deterministic rules and data types of the dungeon.
//!
//! `game-core` defines the canonical rules (actions, engine, world state,
//! floor generation) and exposes pure APIs shared by the runtime and offline
//! tools. It performs no I/O. All per-turn mutation flows through
//! [`engine::GameEngine`]; floors are built by [`procgen`].
pub mod action;
pub mod body;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod log;
pub mod procgen;
pub mod rng;
pub mod state;
pub mod stats;
pub mod templates;

pub use action::{
    Action, ActionError, ActionResult, ActionTransition, AttachAction, BumpAction, Direction,
    DropAction, DropTarget, EquipAction, EquipTarget, ImpossibleAction, LevelUpAction,
    LevelUpChoice, MeleeAction, MoveAction, PickupAction, PrepareTurnAction, RitualOutcome,
    SacrificeAction, TakeStairsAction, UseItemAction, WaitAction,
};
pub use body::{Body, BodyError, Part, PartBonuses, PartForm, PartKind, PartRef, Toggle};
pub use combat::{Hit, melee_damage};
pub use config::GameConfig;
pub use engine::{ExecuteError, GameEngine, TransitionPhase, TransitionPhaseError};
pub use env::GameEnv;
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use log::{MessageBuffer, MessageEntry, MessageLog, MessageTag};
pub use procgen::{
    FloorGenerator, FloorRequest, GeneratedFloor, GenerationError, GeneratorKind, SpawnTables,
};
pub use rng::GameRng;
pub use state::{
    Actor, Ai, AiTick, Consumable, Entity, EntityId, EquipSlot, Equippable, Equipment, Fighter,
    GameMap, Inventory, Item, Level, LootTable, MapError, Position, RenderOrder, Rgb, Stackable,
    TerrainKind, Tile,
};
pub use stats::EffectiveStats;
pub use templates::{Template, TemplateError, TemplateId, TemplateRegistry};
