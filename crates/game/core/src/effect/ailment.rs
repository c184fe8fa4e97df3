//! Ailment application, counter deposit and cleansing.

use tracing::debug;

use super::{AtomicEffect, TargetRef};
use crate::ailment::{apply_ailment_to_target, deposit_ailment_counters};
use crate::engine::HandlerApi;
use crate::state::{AilmentId, SimulationEvent};

/// Roll an ailment against a target. On success the rolled amount is
/// deposited through [`DepositAilmentEffect`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApplyAilmentEffect {
    pub target: TargetRef,
    pub ailment: AilmentId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skill_multiplier: f64,
}

impl ApplyAilmentEffect {
    pub(crate) fn apply(&self, api: &mut HandlerApi<'_>) {
        if !api.config().ailments_enabled {
            return;
        }
        let Some(id) = api.resolve(&self.target) else {
            debug!(target_ref = ?self.target, "ailment target not found");
            return;
        };
        let Some(definition) = api.ailments().get(self.ailment) else {
            debug!(ailment = %self.ailment, "ailment has no definition");
            return;
        };

        let attacker = api.context().source_id.and_then(|s| api.actor(s)).cloned();
        let Some(defender) = api.actor(id).cloned() else {
            return;
        };
        let roll = apply_ailment_to_target(
            attacker.as_ref(),
            &defender,
            definition,
            self.skill_multiplier,
            &mut api.state_mut().rng,
        );

        if !roll.applied {
            api.push_simulation_event(SimulationEvent::AilmentResisted {
                target: id,
                ailment: self.ailment,
                roll: roll.roll,
                trigger: roll.trigger,
            });
            return;
        }

        api.push_simulation_event(SimulationEvent::AilmentApplied {
            target: id,
            ailment: self.ailment,
            roll: roll.roll,
            trigger: roll.trigger,
            amount: roll.amount,
        });
        if roll.amount > 0 {
            api.emit(AtomicEffect::deposit_ailment(
                TargetRef::Actor(id),
                self.ailment,
                roll.amount,
            ));
        }
    }
}

/// Add counters directly, neutralizing opposing ailments first.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepositAilmentEffect {
    pub target: TargetRef,
    pub ailment: AilmentId,
    pub amount: u32,
}

impl DepositAilmentEffect {
    pub(crate) fn apply(&self, api: &mut HandlerApi<'_>) {
        if !api.config().ailments_enabled || self.amount == 0 {
            return;
        }
        let Some(id) = api.resolve(&self.target) else {
            debug!(target_ref = ?self.target, "ailment target not found");
            return;
        };
        let catalog = api.ailments();
        if catalog.get(self.ailment).is_none() {
            debug!(ailment = %self.ailment, "ailment has no definition");
            return;
        }
        let Some(actor) = api.actor_mut(id) else {
            return;
        };
        let outcome = deposit_ailment_counters(&mut actor.ailments, catalog, self.ailment, self.amount);

        for n in &outcome.neutralizations {
            api.push_simulation_event(SimulationEvent::AilmentAnnihilated {
                target: id,
                incoming: self.ailment,
                opposing: n.opposing,
                neutralized: n.neutralized,
                consumed: n.consumed,
            });
        }
        api.push_simulation_event(SimulationEvent::AilmentDeposited {
            target: id,
            ailment: self.ailment,
            incoming: self.amount,
            deposited: outcome.deposited,
        });
    }
}

/// Cleanse one ailment, or every ailment when `ailment` is `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClearAilmentEffect {
    pub target: TargetRef,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ailment: Option<AilmentId>,
}

impl ClearAilmentEffect {
    pub(crate) fn apply(&self, api: &mut HandlerApi<'_>) {
        if !api.config().ailments_enabled {
            return;
        }
        let Some(id) = api.resolve(&self.target) else {
            debug!(target_ref = ?self.target, "ailment target not found");
            return;
        };
        let Some(actor) = api.actor_mut(id) else {
            return;
        };
        match self.ailment {
            Some(ailment) => {
                if actor.ailments.clear(ailment) == 0 {
                    return;
                }
            }
            None => {
                if !actor.ailments.has_any() {
                    return;
                }
                actor.ailments.clear_all();
            }
        }
        api.push_simulation_event(SimulationEvent::AilmentsCleared {
            target: id,
            ailment: self.ailment,
        });
    }
}
