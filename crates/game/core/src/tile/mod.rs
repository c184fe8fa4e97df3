//! Tile hazard resolver.
//!
//! Answers "what happens if this actor passes through, lands on or ends its
//! turn on this tile". Static terrain traits are evaluated first, then every
//! planted effect-state in list order through its hook from the injected
//! [`TileEffectRegistry`]. The resolver is pure: it only describes effects,
//! messages and tile mutations for the caller to apply.
mod hooks;

pub use hooks::{
    FireHook, FrostHook, HookContext, MiasmaHook, OilHook, TileEffectHook, TileEffectRegistry,
    WebHook,
};

use crate::config::GameConfig;
use crate::effect::{AtomicEffect, TargetRef};
use crate::state::{Actor, Tile, TileEffectId, TileEffectState, TileTraits};

/// Movement phase a tile is consulted for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovePhase {
    /// Mid-path, non-terminal hex.
    Pass,
    /// Path terminus.
    Enter,
    /// End-of-turn residency.
    Stay,
}

/// Change to a tile's effect-states requested by a hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileMutation {
    AddEffect(TileEffectState),
    RemoveEffect(TileEffectId),
}

impl TileMutation {
    pub fn apply(&self, tile: &mut Tile) {
        match self {
            Self::AddEffect(state) => tile.add_effect(*state),
            Self::RemoveEffect(id) => {
                tile.remove_effect(*id);
            }
        }
    }
}

/// Merged outcome of consulting one tile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TileHookResult {
    pub effects: Vec<AtomicEffect>,
    pub messages: Vec<String>,
    /// Revised momentum, if any rule or hook overrides the default friction.
    pub momentum: Option<u32>,
    /// Halts further path simulation.
    pub interrupt: bool,
    pub tile_mutations: Vec<TileMutation>,
}

impl TileHookResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_effect(mut self, effect: AtomicEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    pub fn with_momentum(mut self, momentum: u32) -> Self {
        self.momentum = Some(momentum);
        self
    }

    pub fn interrupting(mut self) -> Self {
        self.interrupt = true;
        self
    }

    pub fn with_mutation(mut self, mutation: TileMutation) -> Self {
        self.tile_mutations.push(mutation);
        self
    }

    /// Folds `other` into `self`: effects, messages and tile mutations are
    /// concatenated in order, momentum is overwritten when provided, and
    /// interrupts are OR-ed.
    pub fn merge(&mut self, other: TileHookResult) {
        self.effects.extend(other.effects);
        self.messages.extend(other.messages);
        if other.momentum.is_some() {
            self.momentum = other.momentum;
        }
        self.interrupt |= other.interrupt;
        self.tile_mutations.extend(other.tile_mutations);
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
            && self.messages.is_empty()
            && self.momentum.is_none()
            && !self.interrupt
            && self.tile_mutations.is_empty()
    }
}

/// Consults `tile` for `actor` in the given movement phase.
pub fn resolve_tile(
    actor: &Actor,
    tile: &Tile,
    phase: MovePhase,
    momentum: u32,
    registry: &TileEffectRegistry,
    config: &GameConfig,
) -> TileHookResult {
    let mut result = static_rules(actor, tile, phase, momentum, config);
    if result.interrupt {
        return result;
    }

    for state in &tile.effects {
        let Some(hook) = registry.get(state.id) else {
            continue;
        };
        let ctx = HookContext {
            actor,
            tile,
            state,
            momentum: result.momentum.unwrap_or(momentum),
        };
        let outcome = match phase {
            MovePhase::Pass => hook.on_pass(&ctx),
            MovePhase::Enter => hook.on_enter(&ctx),
            MovePhase::Stay => hook.on_stay(&ctx),
        };
        if let Some(outcome) = outcome {
            result.merge(outcome);
            if result.interrupt {
                break;
            }
        }
    }

    result
}

fn static_rules(
    actor: &Actor,
    tile: &Tile,
    phase: MovePhase,
    momentum: u32,
    config: &GameConfig,
) -> TileHookResult {
    let mut result = TileHookResult::none();
    if actor.is_airborne() {
        return result;
    }

    let traits = tile.traits();
    if traits.contains(TileTraits::HAZARDOUS) {
        let base = tile.base();
        result = result
            .with_effect(AtomicEffect::damage(
                TargetRef::Actor(actor.id),
                config.hazard_damage,
                base.hazard_element(),
            ))
            .with_message(format!("{} is engulfed by the {}!", actor.name, base.name()));
        if phase != MovePhase::Stay {
            result.interrupt = true;
        }
    } else if traits.contains(TileTraits::SLIPPERY) {
        result.momentum = Some(momentum);
    } else if traits.contains(TileTraits::LIQUID) {
        result.momentum = Some(momentum.saturating_sub(1));
    }

    result
}

/// Pathing cost of a tile. Blocked tiles cost `u32::MAX`.
pub fn movement_cost(tile: &Tile) -> u32 {
    if !tile.is_walkable() {
        return u32::MAX;
    }

    let mut cost = 1;
    if tile.has_trait(TileTraits::HAZARDOUS) {
        cost += 5;
    }
    if tile.has_trait(TileTraits::LIQUID) {
        cost += 1;
    }
    if tile.has_effect(TileEffectId::Fire) {
        cost += 2;
    }
    cost
}
