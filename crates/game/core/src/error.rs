//! Common error infrastructure for stone-core.
//!
//! The puzzle rules model most failures as no-ops (triggering an empty cell,
//! rotating into an unchanged board), so errors here are limited to
//! configuration that cannot be played and cascades that refuse to settle.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each concern has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies

use crate::combat::StoneKind;
use crate::config::CombatMode;
use crate::state::GameState;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not retry without changes.
    ///
    /// Examples: board too small, skill without levels
    Validation,

    /// Unexpected engine behavior that should be investigated.
    ///
    /// Examples: a cascade that never settles
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all stone-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Configuration the engine refuses to run with.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("board size {size} is smaller than the run length {minimum}")]
    BoardTooSmall { size: u32, minimum: u32 },

    #[error("enemy hp spread must be at least 1")]
    EmptyHpSpread,

    #[error("move cost must not be negative (got {0})")]
    NegativeMoveCost(i32),

    #[error("skill table has no entry for stone kind {0}")]
    MissingSkill(StoneKind),

    #[error("skill for stone kind {0} defines no levels")]
    EmptySkill(StoneKind),

    #[error("skill for stone kind {0} is defined more than once")]
    DuplicateSkill(StoneKind),

    #[error("flat power base must be at least 1")]
    ZeroPowerBase,

    #[error("config selects {configured:?} combat but the rules are {rules:?}")]
    CombatModeMismatch {
        configured: CombatMode,
        rules: CombatMode,
    },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BoardTooSmall { .. } => "CONFIG_BOARD_TOO_SMALL",
            Self::EmptyHpSpread => "CONFIG_EMPTY_HP_SPREAD",
            Self::NegativeMoveCost(_) => "CONFIG_NEGATIVE_MOVE_COST",
            Self::MissingSkill(_) => "CONFIG_MISSING_SKILL",
            Self::EmptySkill(_) => "CONFIG_EMPTY_SKILL",
            Self::DuplicateSkill(_) => "CONFIG_DUPLICATE_SKILL",
            Self::ZeroPowerBase => "CONFIG_ZERO_POWER_BASE",
            Self::CombatModeMismatch { .. } => "CONFIG_COMBAT_MODE_MISMATCH",
        }
    }
}

/// Failures of the cascade pipeline.
#[derive(Clone, Debug, thiserror::Error)]
pub enum CascadeError {
    /// Turns-to-stability hit its cut-off with empty cells left.
    ///
    /// Carries the partially settled state so callers can keep playing.
    #[error("board did not settle after {turns} cascade turns")]
    Unsettled { turns: usize, state: Box<GameState> },
}

impl GameError for CascadeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unsettled { .. } => "CASCADE_UNSETTLED",
        }
    }
}
