//! Observability logs carried by the state.
//!
//! Simulation events describe *what happened* structurally; timeline and
//! visual events exist for presentation. None of them feed back into rules,
//! and none are part of the replay fingerprint.

use super::{AilmentId, EntityId, Position, StatusKind, TileEffectId};
use crate::effect::EffectKind;

/// Structural record of a state change.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimulationEvent {
    DamageTaken {
        target: EntityId,
        source: Option<EntityId>,
        absorbed: u32,
        hp_lost: u32,
    },
    Healed {
        target: EntityId,
        amount: u32,
    },
    ArmorGained {
        target: EntityId,
        amount: u32,
    },
    UnitMoved {
        actor: EntityId,
        from: Position,
        to: Position,
    },
    StatusApplied {
        target: EntityId,
        status: StatusKind,
        duration: u32,
    },
    StatusRemoved {
        target: EntityId,
        status: StatusKind,
    },
    AilmentApplied {
        target: EntityId,
        ailment: AilmentId,
        roll: u32,
        trigger: f64,
        amount: u32,
    },
    AilmentResisted {
        target: EntityId,
        ailment: AilmentId,
        roll: u32,
        trigger: f64,
    },
    AilmentDeposited {
        target: EntityId,
        ailment: AilmentId,
        incoming: u32,
        deposited: u32,
    },
    AilmentAnnihilated {
        target: EntityId,
        incoming: AilmentId,
        opposing: AilmentId,
        neutralized: u32,
        consumed: u32,
    },
    AilmentTicked {
        target: EntityId,
        ailment: AilmentId,
        damage: u32,
        decay: u32,
        remaining: u32,
    },
    AilmentThresholdCrossed {
        target: EntityId,
        ailment: AilmentId,
        threshold: u32,
        bonus_effect: Option<String>,
    },
    AilmentsCleared {
        target: EntityId,
        ailment: Option<AilmentId>,
    },
    UnitSpawned {
        actor: EntityId,
        position: Position,
    },
    UnitDied {
        actor: EntityId,
        position: Position,
    },
    PlayerDefeated,
    CorpseRemoved {
        position: Position,
    },
    TileEffectPlaced {
        position: Position,
        effect: TileEffectId,
    },
    TileEffectExpired {
        position: Position,
        effect: TileEffectId,
    },
    HazardInterrupted {
        actor: EntityId,
        position: Position,
    },
}

/// One dispatched effect, grouped by the originating step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimelineEvent {
    pub step_id: Option<String>,
    pub kind: EffectKind,
    /// Cascade depth (0 for effects supplied by the caller).
    pub depth: u32,
    pub source: Option<EntityId>,
    pub target: Option<EntityId>,
}

/// Recorded juice request; emission itself is a presentation concern.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisualEvent {
    pub step_id: Option<String>,
    pub signature: String,
    pub position: Option<Position>,
}
