//! Turn-phase upkeep for a single actor.

use tracing::{debug, trace};

use super::{AtomicEffect, TargetRef};
use crate::ailment::tick_actor_ailments;
use crate::engine::HandlerApi;
use crate::state::{EntityId, SimulationEvent, TurnPhase};
use crate::tile::{MovePhase, resolve_tile};

/// Run an actor's start- or end-of-turn upkeep.
///
/// At end of turn the tile the actor stands on fires its `Stay` hooks and
/// status durations tick down. In both phases ailments whose definitions tick
/// in that phase deal damage, decay and harden the actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnPhaseEffect {
    pub target: TargetRef,
    pub phase: TurnPhase,
}

impl TurnPhaseEffect {
    pub(crate) fn apply(&self, api: &mut HandlerApi<'_>) {
        let Some(id) = api.resolve(&self.target) else {
            debug!(target_ref = ?self.target, "phase target not found");
            return;
        };

        if self.phase == TurnPhase::End {
            self.stay_on_tile(api, id);
            self.tick_statuses(api, id);
        }
        if api.config().ailments_enabled {
            self.tick_ailments(api, id);
        }
    }

    fn stay_on_tile(&self, api: &mut HandlerApi<'_>, id: EntityId) {
        let Some(actor) = api.actor(id) else {
            return;
        };
        let position = actor.position();
        let Some(tile) = api.state().map.tile(position) else {
            return;
        };
        let result = resolve_tile(
            actor,
            tile,
            MovePhase::Stay,
            0,
            api.tile_effects(),
            api.config(),
        );
        if result.is_empty() {
            return;
        }

        let mutations: Vec<_> = result
            .tile_mutations
            .into_iter()
            .map(|m| (position, m))
            .collect();
        api.apply_tile_mutations(&mutations);
        for message in result.messages {
            api.push_message(message);
        }
        api.emit_all(result.effects);
    }

    fn tick_statuses(&self, api: &mut HandlerApi<'_>, id: EntityId) {
        let Some(actor) = api.actor_mut(id) else {
            return;
        };
        for status in actor.statuses.tick() {
            api.push_simulation_event(SimulationEvent::StatusRemoved { target: id, status });
        }
    }

    fn tick_ailments(&self, api: &mut HandlerApi<'_>, id: EntityId) {
        let catalog = api.ailments();
        let Some(actor) = api.actor_mut(id) else {
            return;
        };
        let ticks = tick_actor_ailments(actor, catalog, self.phase);

        for tick in ticks {
            trace!(actor = ?id, ailment = %tick.ailment, damage = tick.damage, "ailment tick");
            api.push_simulation_event(SimulationEvent::AilmentTicked {
                target: id,
                ailment: tick.ailment,
                damage: tick.damage,
                decay: tick.decay,
                remaining: tick.remaining,
            });
            for threshold in tick.thresholds {
                api.push_message(threshold.message);
                api.push_simulation_event(SimulationEvent::AilmentThresholdCrossed {
                    target: id,
                    ailment: tick.ailment,
                    threshold: threshold.counter,
                    bonus_effect: threshold.bonus_effect,
                });
            }
            if tick.damage > 0 {
                api.emit(AtomicEffect::damage(TargetRef::Actor(id), tick.damage, tick.element));
            }
        }
    }
}
