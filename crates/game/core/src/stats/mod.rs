//! Stat aggregation.
//!
//! # Architecture
//!
//! ```text
//! [ Fighter base values ]
//!      +
//! [ Body part bonuses ]      power, defense, spiritual x2, mental, health
//!      +
//! [ Equipment bonuses ]      power, defense, spiritual x2
//!      ↓
//! [ EffectiveStats ]
//! ```
//!
//! ## Principles
//!
//! 1. **Never cached**: every read recomputes from the owned collections, so
//!    totals always match current part membership and slot contents
//! 2. **Pure**: no side effects, safe to call every frame
//! 3. **Missing collaborators count as zero**: an actor without a body or
//!    equipment still aggregates

pub mod bonus;
pub mod effective;

pub use bonus::{BonusTotals, aggregate_bonuses};
pub use effective::EffectiveStats;
