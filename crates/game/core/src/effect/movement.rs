//! Displacement and kinetic push effects.

use tracing::{debug, trace};

use super::TargetRef;
use crate::engine::HandlerApi;
use crate::kinetic::{DisplacementRequest, resolve_displacement, resolve_kinetic_push};
use crate::state::{HexDirection, Position, SimulationEvent};

/// Move one actor, either straight to the destination or simulated hex by
/// hex with tile hooks and collisions.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplacementEffect {
    pub target: TargetRef,
    pub request: DisplacementRequest,
}

impl DisplacementEffect {
    pub fn teleport(target: TargetRef, destination: Position) -> Self {
        Self {
            target,
            request: DisplacementRequest::teleport(destination),
        }
    }

    pub fn simulated(target: TargetRef, destination: Position) -> Self {
        Self {
            target,
            request: DisplacementRequest::simulated(destination),
        }
    }

    pub fn with_momentum(mut self, momentum: u32) -> Self {
        self.request.momentum = momentum;
        self
    }

    pub fn with_request(target: TargetRef, request: DisplacementRequest) -> Self {
        Self { target, request }
    }

    pub(crate) fn apply(&self, api: &mut HandlerApi<'_>) {
        let Some(id) = api.resolve(&self.target) else {
            debug!(target_ref = ?self.target, "displacement target not found");
            return;
        };
        let Some(outcome) = resolve_displacement(&api.board(), id, &self.request) else {
            return;
        };
        trace!(
            actor = ?id,
            from = %outcome.origin,
            to = %outcome.final_position,
            interrupted = outcome.interrupted,
            "displacement resolved"
        );

        api.move_actor(id, outcome.final_position);
        if outcome.interrupted {
            api.push_simulation_event(SimulationEvent::HazardInterrupted {
                actor: id,
                position: outcome.final_position,
            });
        }

        let triggered = outcome.triggered;
        api.apply_tile_mutations(&triggered.tile_mutations);
        for message in triggered.messages {
            api.push_message(message);
        }
        api.emit_all(triggered.effects);
    }
}

/// Push a target (and everything lined up in front of it) along a direction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KineticPushEffect {
    pub target: TargetRef,
    pub direction: HexDirection,
    pub momentum: u32,
}

impl KineticPushEffect {
    pub(crate) fn apply(&self, api: &mut HandlerApi<'_>) {
        let Some(id) = api.resolve(&self.target) else {
            debug!(target_ref = ?self.target, "push target not found");
            return;
        };
        let Some(outcome) = resolve_kinetic_push(&api.board(), id, self.direction, self.momentum)
        else {
            return;
        };
        trace!(
            actor = ?id,
            steps = outcome.steps,
            stunned = outcome.stunned.len(),
            "kinetic push resolved"
        );

        // Lead first so every destination is free when its mover arrives.
        for (mover, _, to) in &outcome.moves {
            api.move_actor(*mover, *to);
        }
        if outcome.interrupted
            && let Some((lead, _, to)) = outcome.moves.first()
        {
            api.push_simulation_event(SimulationEvent::HazardInterrupted {
                actor: *lead,
                position: *to,
            });
        }

        let triggered = outcome.triggered;
        api.apply_tile_mutations(&triggered.tile_mutations);
        for message in triggered.messages {
            api.push_message(message);
        }
        api.emit_all(triggered.effects);
    }
}
