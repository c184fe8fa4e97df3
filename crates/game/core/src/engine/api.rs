//! Surface handed to effect handlers.

use tracing::debug;

use super::EffectEngine;
use crate::ailment::AilmentCatalog;
use crate::config::GameConfig;
use crate::effect::{AtomicEffect, EffectContext, TargetRef};
use crate::kinetic::Board;
use crate::state::{
    Actor, Corpse, EntityId, Faction, GameState, GameStatus, Position, SimulationEvent,
    TimelineEvent, VisualEvent,
};
use crate::tile::{TileEffectRegistry, TileMutation};

/// Working state plus the tables and context of the effect being applied.
///
/// Handlers mutate the working copy owned by the dispatcher; callers of the
/// engine only ever see the finished result. Effects emitted here are applied
/// depth-first right after the current handler returns.
pub struct HandlerApi<'a> {
    state: &'a mut GameState,
    engine: &'a EffectEngine,
    context: &'a EffectContext,
    depth: u32,
    emitted: Vec<(AtomicEffect, EffectContext)>,
}

impl<'a> HandlerApi<'a> {
    pub(crate) fn new(
        state: &'a mut GameState,
        engine: &'a EffectEngine,
        context: &'a EffectContext,
        depth: u32,
    ) -> Self {
        Self {
            state,
            engine,
            context,
            depth,
            emitted: Vec::new(),
        }
    }

    pub(crate) fn into_emitted(self) -> Vec<(AtomicEffect, EffectContext)> {
        self.emitted
    }

    // ===== tables and context =====

    pub fn state(&self) -> &GameState {
        self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        self.state
    }

    pub fn config(&self) -> &'a GameConfig {
        self.engine.config()
    }

    pub fn ailments(&self) -> &'a AilmentCatalog {
        self.engine.ailments()
    }

    pub fn tile_effects(&self) -> &'a TileEffectRegistry {
        self.engine.tile_effects()
    }

    pub fn context(&self) -> &EffectContext {
        self.context
    }

    /// Cascade depth of the effect being applied.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Read-only view used by the displacement resolver.
    pub fn board(&self) -> Board<'_> {
        Board::new(self.state, self.engine.config(), self.engine.tile_effects())
    }

    // ===== actor resolution =====

    /// Resolves a target reference to a living actor on the board.
    pub fn resolve(&self, target: &TargetRef) -> Option<EntityId> {
        let id = match target {
            TargetRef::Source => self.context.source_id?,
            TargetRef::Target => self.context.target_id?,
            TargetRef::Actor(id) => *id,
            TargetRef::At(position) => self.state.actor_at(*position)?,
        };
        self.state.actor(id).map(|actor| actor.id)
    }

    /// Resolves a target reference to a hex: the position itself for
    /// [`TargetRef::At`], otherwise the referenced actor's position.
    pub fn resolve_position(&self, target: &TargetRef) -> Option<Position> {
        match target {
            TargetRef::At(position) => Some(*position),
            other => self
                .resolve(other)
                .and_then(|id| self.actor(id))
                .map(Actor::position),
        }
    }

    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.state.actor(id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.state.actor_mut(id)
    }

    pub fn actor_at(&self, position: Position) -> Option<EntityId> {
        self.state.actor_at(position)
    }

    // ===== cascades =====

    /// Queues an effect under the current context.
    pub fn emit(&mut self, effect: AtomicEffect) {
        self.emitted.push((effect, self.context.clone()));
    }

    pub fn emit_all(&mut self, effects: impl IntoIterator<Item = AtomicEffect>) {
        for effect in effects {
            self.emit(effect);
        }
    }

    /// Queues an effect under a different context.
    pub fn emit_for(&mut self, effect: AtomicEffect, context: EffectContext) {
        self.emitted.push((effect, context));
    }

    // ===== logs =====

    pub fn push_simulation_event(&mut self, event: SimulationEvent) {
        self.state.simulation_events.push(event);
    }

    pub fn push_timeline(&mut self, event: TimelineEvent) {
        self.state.timeline.push(event);
    }

    pub fn push_message(&mut self, message: impl Into<String>) {
        self.state.message_log.push(message.into());
    }

    pub fn push_visual(&mut self, signature: impl Into<String>, position: Option<Position>) {
        let event = VisualEvent {
            step_id: self.context.step_id.clone(),
            signature: signature.into(),
            position,
        };
        self.state.visual_events.push(event);
    }

    // ===== shared mutations =====

    /// Moves an actor, keeping cube and occupancy in sync, and records the move.
    pub fn move_actor(&mut self, id: EntityId, to: Position) {
        if let Some(from) = self.state.move_actor(id, to)
            && from != to
        {
            self.push_simulation_event(SimulationEvent::UnitMoved { actor: id, from, to });
        }
    }

    /// Applies hook-requested tile mutations in order.
    pub fn apply_tile_mutations(&mut self, mutations: &[(Position, TileMutation)]) {
        for (position, mutation) in mutations {
            match self.state.map.tile_mut(*position) {
                Some(tile) => mutation.apply(tile),
                None => debug!(?position, "tile mutation outside map"),
            }
        }
    }

    /// Applies death rules to an actor at 0 hp.
    ///
    /// Non-players leave a corpse and are removed; enemies count as kills. The
    /// player instead ends the run.
    pub fn settle_death(&mut self, id: EntityId) {
        let Some(actor) = self.state.actor(id) else {
            return;
        };
        if actor.is_alive() {
            return;
        }

        if id.is_player() {
            if self.state.status != GameStatus::Lost {
                self.state.status = GameStatus::Lost;
                self.push_simulation_event(SimulationEvent::PlayerDefeated);
                self.push_message("You have fallen.");
            }
            return;
        }

        let Some(actor) = self.state.remove_actor(id) else {
            return;
        };
        let position = actor.position();
        if actor.faction == Faction::Enemy {
            self.state.kill_count += 1;
        }
        self.push_message(format!("{} dies.", actor.name));
        self.state.corpses.push(Corpse {
            position,
            actor: id,
            name: actor.name,
            faction: actor.faction,
        });
        self.push_simulation_event(SimulationEvent::UnitDied { actor: id, position });
    }
}
