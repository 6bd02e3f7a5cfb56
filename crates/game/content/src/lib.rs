//! Data-driven content definitions and loaders.
//!
//! This crate provides loaders for the RON/TOML files that configure a game:
//! - Game configuration (board size, enemy queue, move cost) via TOML
//! - Skill tables (per-kind, level-indexed damage and area) via RON
//!
//! Content is validated on load, so an incomplete skill table is a load
//! error rather than a missing skill at trigger time. A default data set
//! ships under `data/`.
//!
//! All loaders use stone-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, SkillCatalog, SkillEntry, SkillLoader};
