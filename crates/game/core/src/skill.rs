//! Skill → effect boundary.
//!
//! Skills are external content and the only producers of effect lists. The
//! engine never inspects a skill beyond its id and the effects it returns.

use crate::effect::AtomicEffect;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, GameState, Position};

/// Effects produced by one skill use.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillExecution {
    pub effects: Vec<AtomicEffect>,
    /// Whether the use ends the caster's turn.
    pub consumes_turn: bool,
}

impl SkillExecution {
    pub fn new(effects: Vec<AtomicEffect>) -> Self {
        Self {
            effects,
            consumes_turn: true,
        }
    }

    /// Marks the use as free: the caster keeps its turn.
    pub fn free(mut self) -> Self {
        self.consumes_turn = false;
        self
    }
}

pub trait Skill {
    fn id(&self) -> &str;

    /// Hexes the caster may target from the given state.
    fn valid_targets(&self, state: &GameState, caster: EntityId) -> Vec<Position>;

    fn execute(&self, state: &GameState, caster: EntityId, target: Position) -> SkillExecution;
}

/// Rejections raised before a skill's effects are applied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SkillError {
    #[error("caster {0} is not on the board")]
    UnknownCaster(EntityId),

    #[error("{caster} is silenced and cannot use {skill}")]
    Silenced { skill: String, caster: EntityId },

    #[error("{target} is not a valid target for {skill}")]
    InvalidTarget { skill: String, target: Position },
}

impl GameError for SkillError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCaster(_) => "SKILL_UNKNOWN_CASTER",
            Self::Silenced { .. } => "SKILL_SILENCED",
            Self::InvalidTarget { .. } => "SKILL_INVALID_TARGET",
        }
    }
}
