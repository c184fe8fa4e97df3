//! Healing and temporary armor.

use tracing::debug;

use super::TargetRef;
use crate::engine::HandlerApi;
use crate::state::SimulationEvent;

/// Restore hit points, capped at max hp.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealEffect {
    pub target: TargetRef,
    pub amount: u32,
}

impl HealEffect {
    pub(crate) fn apply(&self, api: &mut HandlerApi<'_>) {
        let Some(id) = api.resolve(&self.target) else {
            debug!(target_ref = ?self.target, "heal target not found");
            return;
        };
        let Some(actor) = api.actor_mut(id) else {
            return;
        };
        if !actor.is_alive() {
            return;
        }
        let restored = actor.heal(self.amount);
        if restored > 0 {
            api.push_simulation_event(SimulationEvent::Healed {
                target: id,
                amount: restored,
            });
        }
    }
}

/// Grant temporary armor that absorbs damage before hit points.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GainArmorEffect {
    pub target: TargetRef,
    pub amount: u32,
}

impl GainArmorEffect {
    pub(crate) fn apply(&self, api: &mut HandlerApi<'_>) {
        let Some(id) = api.resolve(&self.target) else {
            debug!(target_ref = ?self.target, "armor target not found");
            return;
        };
        let Some(actor) = api.actor_mut(id) else {
            return;
        };
        actor.temporary_armor = actor.temporary_armor.saturating_add(self.amount);
        api.push_simulation_event(SimulationEvent::ArmorGained {
            target: id,
            amount: self.amount,
        });
    }
}
