//! Displacement and kinetic-momentum resolver.
//!
//! Simulates teleports, pushes, dashes and slides hex by hex against the tile
//! map, consulting the tile hazard resolver on the way. Resolution is pure:
//! the outcome lists the final positions plus the effects, messages and tile
//! mutations the movement triggered, and the effect handlers apply them.
//!
//! # Guarantee
//!
//! No actor is ever placed out of bounds, on a `BLOCKS_MOVEMENT` tile or on a
//! hex held by another actor. When no legal destination exists the actor
//! stays where it is.
mod path;
mod push;

pub use path::resolve_displacement;
pub use push::resolve_kinetic_push;

use crate::config::GameConfig;
use crate::effect::AtomicEffect;
use crate::state::{Actor, EntityId, GameState, Position, StatusKind, Tile};
use crate::tile::{MovePhase, TileEffectRegistry, TileHookResult, TileMutation, resolve_tile};

/// Read-only view of everything movement resolution needs.
#[derive(Clone, Copy, Debug)]
pub struct Board<'a> {
    pub state: &'a GameState,
    pub config: &'a GameConfig,
    pub tile_effects: &'a TileEffectRegistry,
}

impl<'a> Board<'a> {
    pub fn new(
        state: &'a GameState,
        config: &'a GameConfig,
        tile_effects: &'a TileEffectRegistry,
    ) -> Self {
        Self {
            state,
            config,
            tile_effects,
        }
    }

    pub fn tile(&self, position: Position) -> Option<&'a Tile> {
        self.state.map.tile(position)
    }

    pub fn is_walkable(&self, position: Position) -> bool {
        self.state.map.is_walkable(position)
    }

    /// Occupant of `position` other than `mover`.
    pub fn blocker(&self, position: Position, mover: EntityId) -> Option<EntityId> {
        self.state.actor_at(position).filter(|id| *id != mover)
    }

    fn is_anchored(&self, id: EntityId) -> bool {
        self.state
            .actor(id)
            .is_some_and(|actor| actor.statuses.has(StatusKind::Anchored))
    }

    /// Consults the tile at `position`, or returns nothing off the map.
    fn consult(
        &self,
        actor: &Actor,
        position: Position,
        phase: MovePhase,
        momentum: u32,
    ) -> TileHookResult {
        match self.tile(position) {
            Some(tile) => resolve_tile(actor, tile, phase, momentum, self.tile_effects, self.config),
            None => TileHookResult::none(),
        }
    }
}

/// Parameters of a single-actor displacement.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplacementRequest {
    pub destination: Position,
    /// Explicit hexes to walk (origin excluded). `None` walks the hex line.
    #[cfg_attr(feature = "serde", serde(default))]
    pub path: Option<Vec<Position>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub simulate_path: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ignore_collisions: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ignore_ground_hazards: bool,
    /// Residual momentum carried past the path terminus.
    #[cfg_attr(feature = "serde", serde(default))]
    pub momentum: u32,
}

impl DisplacementRequest {
    pub fn teleport(destination: Position) -> Self {
        Self {
            destination,
            path: None,
            simulate_path: false,
            ignore_collisions: false,
            ignore_ground_hazards: false,
            momentum: 0,
        }
    }

    pub fn simulated(destination: Position) -> Self {
        Self {
            simulate_path: true,
            ..Self::teleport(destination)
        }
    }

    pub fn with_path(mut self, path: Vec<Position>) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_momentum(mut self, momentum: u32) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn ignoring_collisions(mut self) -> Self {
        self.ignore_collisions = true;
        self
    }

    pub fn ignoring_hazards(mut self) -> Self {
        self.ignore_ground_hazards = true;
        self
    }
}

/// Side effects gathered while resolving movement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Triggered {
    pub effects: Vec<AtomicEffect>,
    pub messages: Vec<String>,
    pub tile_mutations: Vec<(Position, TileMutation)>,
}

impl Triggered {
    /// Folds a tile result in and reports whether it interrupted movement.
    fn absorb(&mut self, position: Position, result: TileHookResult) -> bool {
        self.effects.extend(result.effects);
        self.messages.extend(result.messages);
        self.tile_mutations
            .extend(result.tile_mutations.into_iter().map(|m| (position, m)));
        result.interrupt
    }
}

/// Result of [`resolve_displacement`].
#[derive(Clone, Debug, PartialEq)]
pub struct DisplacementOutcome {
    pub actor: EntityId,
    pub origin: Position,
    pub final_position: Position,
    pub interrupted: bool,
    /// Momentum left when the actor came to rest.
    pub momentum: u32,
    /// Hexes entered, in order (slides included).
    pub traversed: Vec<Position>,
    pub triggered: Triggered,
}

impl DisplacementOutcome {
    fn stationary(actor: EntityId, origin: Position, momentum: u32) -> Self {
        Self {
            actor,
            origin,
            final_position: origin,
            interrupted: false,
            momentum,
            traversed: Vec::new(),
            triggered: Triggered::default(),
        }
    }

    pub fn moved(&self) -> bool {
        self.final_position != self.origin
    }
}

/// Result of [`resolve_kinetic_push`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KineticOutcome {
    /// `(actor, from, to)` for every cluster member, lead first.
    pub moves: Vec<(EntityId, Position, Position)>,
    /// Members stunned by a wall slam.
    pub stunned: Vec<EntityId>,
    pub interrupted: bool,
    /// Hexes the cluster advanced.
    pub steps: u32,
    pub momentum: u32,
    pub triggered: Triggered,
}
