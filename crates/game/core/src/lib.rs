//! Deterministic rules for the rotating-stones puzzle.
//!
//! `stone-core` defines the canonical board model, the cascade pipeline
//! (fill, fall, match-and-merge), combat resolution against the enemy queue,
//! and the move/turn protocol that decides whether a move commits or rolls
//! back. Every transform is a pure function from one [`GameState`] to the
//! next; randomness and combat tables are injected through [`GameEnv`].
//!
//! The async controller that paces these steps for a renderer lives in the
//! `stone-runtime` crate and drives [`engine::Resolution`] frame by frame.
pub mod action;
pub mod cascade;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod grid;
pub mod snapshot;
pub mod state;

pub use action::{Move, rotate_column, rotate_row};
pub use cascade::{CascadeStep, fall, fill, match_and_merge, matching_runs, turn, turns_to_stability};
pub use combat::{
    CombatRules, EnemyKind, ResolvedSkill, Skill, SkillLevel, SkillTable, StoneKind,
    damage_vector, preview_damage, trigger,
};
pub use config::{CombatMode, GameConfig};
pub use engine::{Frame, FrameKind, GameOver, Pace, Resolution, ResolutionSummary, Verdict};
pub use env::{GameEnv, PcgRng, RngOracle, compute_seed};
pub use error::{CascadeError, ConfigError, ErrorSeverity, GameError};
pub use grid::Grid;
pub use snapshot::{CellView, GameSnapshot};
pub use state::{Board, Enemy, GameState, Player, Position, Stone, StoneId};
