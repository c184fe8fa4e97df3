mod actor;
mod ailment;
mod common;
mod events;
mod hex;
mod status;
mod world;

pub use actor::{Actor, ActorStats, DamageOutcome, FIRE_ABSORPTION_SKILL};
pub use ailment::{AilmentId, AilmentState, Resilience};
pub use common::{DamageElement, EntityId, Faction, GameStatus, StatKind, TurnPhase};
pub use events::{SimulationEvent, TimelineEvent, VisualEvent};
pub use hex::{CubeCoord, HexDirection, Position, hex_line};
pub use status::{StatusEffect, StatusEffects, StatusKind};
pub use world::{BaseTile, Corpse, Tile, TileEffectId, TileEffectState, TileMap, TileTraits};
