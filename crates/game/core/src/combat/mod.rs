//! Combat resolution between triggered stones and the enemy queue.
//!
//! This module provides pure functions: [`trigger`] consumes a stone and
//! returns the damaged queue, [`preview_damage`] computes the same damage
//! vector without applying it.
//!
//! # Core Functions
//!
//! - `CombatRules::skill_for`: stone kind and level to damage, area and effectiveness
//! - `damage_vector`: per-enemy damage over the ordered queue
//! - `trigger`: apply damage, ghost the stone, remove the dead, reward kills

pub mod damage;
pub mod skill;

pub use damage::{damage_vector, preview_damage, trigger};
pub use skill::{CombatRules, EnemyKind, ResolvedSkill, Skill, SkillLevel, SkillTable, StoneKind};
