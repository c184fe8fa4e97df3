//! Damage effect implementation.

use tracing::debug;

use super::{AtomicEffect, TargetRef};
use crate::engine::HandlerApi;
use crate::state::{DamageElement, SimulationEvent};

/// Deal damage to a target. Armor absorbs first.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageEffect {
    pub target: TargetRef,
    pub amount: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: DamageElement,
}

impl DamageEffect {
    pub(crate) fn apply(&self, api: &mut HandlerApi<'_>) {
        let Some(id) = api.resolve(&self.target) else {
            debug!(target_ref = ?self.target, "damage target not found");
            return;
        };
        let Some(actor) = api.actor(id) else {
            return;
        };
        if !actor.is_alive() {
            return;
        }

        // Fire-absorbing actors turn fire damage into healing.
        if self.element == DamageElement::Fire && actor.absorbs_fire() {
            let message = format!("{} drinks in the flames.", actor.name);
            api.push_message(message);
            api.emit(AtomicEffect::heal(TargetRef::Actor(id), self.amount));
            return;
        }

        let source = api.context().source_id;
        let Some(actor) = api.actor_mut(id) else {
            return;
        };
        let outcome = actor.apply_damage(self.amount);

        api.push_simulation_event(SimulationEvent::DamageTaken {
            target: id,
            source,
            absorbed: outcome.absorbed,
            hp_lost: outcome.hp_lost,
        });
        api.settle_death(id);
    }
}
