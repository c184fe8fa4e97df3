//! Status effect application and removal.

use tracing::debug;

use super::TargetRef;
use crate::engine::HandlerApi;
use crate::state::{SimulationEvent, StatusKind};

/// Apply (or refresh) a status for a number of turns.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApplyStatusEffect {
    pub target: TargetRef,
    pub status: StatusKind,
    pub duration: u32,
}

impl ApplyStatusEffect {
    pub(crate) fn apply(&self, api: &mut HandlerApi<'_>) {
        let Some(id) = api.resolve(&self.target) else {
            debug!(target_ref = ?self.target, "status target not found");
            return;
        };
        let Some(actor) = api.actor_mut(id) else {
            return;
        };
        if !actor.statuses.add(self.status, self.duration) {
            debug!(actor = ?id, status = ?self.status, "status slots full");
            return;
        }
        api.push_simulation_event(SimulationEvent::StatusApplied {
            target: id,
            status: self.status,
            duration: self.duration,
        });
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemoveStatusEffect {
    pub target: TargetRef,
    pub status: StatusKind,
}

impl RemoveStatusEffect {
    pub(crate) fn apply(&self, api: &mut HandlerApi<'_>) {
        let Some(id) = api.resolve(&self.target) else {
            debug!(target_ref = ?self.target, "status target not found");
            return;
        };
        let removed = api
            .actor_mut(id)
            .is_some_and(|actor| actor.statuses.remove(self.status));
        if removed {
            api.push_simulation_event(SimulationEvent::StatusRemoved {
                target: id,
                status: self.status,
            });
        }
    }
}
