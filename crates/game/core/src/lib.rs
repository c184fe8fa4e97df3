//! Deterministic effect resolution for the hex tactics simulator.
//!
//! `tactics-core` defines the canonical rules for turning declarative
//! [`AtomicEffect`]s into new [`GameState`] values: the effect dispatcher,
//! the displacement/kinetic resolver, the tile hazard resolver and the
//! ailment engine, all driven by a seed + counter RNG so that any action log
//! can be replayed and fingerprinted bit-for-bit.
//!
//! All state transitions flow through [`EffectEngine`], which is constructed
//! from explicitly injected content tables.
pub mod ailment;
pub mod config;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod kinetic;
#[cfg(feature = "serde")]
pub mod replay;
pub mod skill;
pub mod state;
pub mod tile;

pub use ailment::{
    AilmentCatalog, AilmentDefinition, AilmentInteraction, AilmentThreshold, HardeningSpec,
    RoundingMode, TickFormula, TickSpec,
};
pub use config::GameConfig;
pub use effect::{AtomicEffect, EffectContext, EffectKind, TargetRef};
pub use engine::{EffectEngine, HandlerApi, HandlerRegistry};
pub use env::{RngState, consume_random, draw};
pub use error::{ContentError, ErrorSeverity, GameError};
pub use kinetic::{Board, DisplacementOutcome, DisplacementRequest, KineticOutcome};
#[cfg(feature = "serde")]
pub use replay::{ActionRecord, Fingerprint, ReplayError, compute_log_root, replay, verify_replay};
pub use skill::{Skill, SkillError, SkillExecution};
pub use state::{
    Actor, ActorStats, AilmentId, AilmentState, BaseTile, Corpse, CubeCoord, DamageElement,
    EntityId, FIRE_ABSORPTION_SKILL, Faction, GameState, GameStatus, HexDirection, Position,
    Resilience, SimulationEvent, StatKind, StatusEffects, StatusKind, Tile, TileEffectId,
    TileEffectState, TileMap, TileTraits, TimelineEvent, TurnPhase, VisualEvent,
};
pub use tile::{MovePhase, TileEffectHook, TileEffectRegistry, TileHookResult, TileMutation};
