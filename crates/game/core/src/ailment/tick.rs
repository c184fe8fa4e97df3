//! Per-phase ailment upkeep: damage, decay, tick hardening and thresholds.

use super::catalog::AilmentCatalog;
use super::definition::{AilmentThreshold, TickInputs};
use super::hardening::grant_resilience_xp;
use crate::state::{Actor, AilmentId, DamageElement, TurnPhase};

/// Result of ticking one ailment counter.
#[derive(Clone, Debug, PartialEq)]
pub struct AilmentTick {
    pub ailment: AilmentId,
    /// Damage the caller must route through the dispatcher.
    pub damage: u32,
    pub element: DamageElement,
    /// Counters actually removed.
    pub decay: u32,
    pub remaining: u32,
    /// Thresholds crossed on the way down, in definition order.
    pub thresholds: Vec<AilmentThreshold>,
}

/// Ticks every positive counter whose definition runs in `phase`.
///
/// Mutates counters and resilience on `actor`. Damage is returned rather than
/// applied so armor, absorption and death stay in one place.
pub fn tick_actor_ailments(
    actor: &mut Actor,
    catalog: &AilmentCatalog,
    phase: TurnPhase,
) -> Vec<AilmentTick> {
    let active: Vec<(AilmentId, u32)> = actor.ailments.counters().collect();
    let mut ticks = Vec::new();

    for (id, before) in active {
        let Some(definition) = catalog.get(id) else {
            continue;
        };
        if definition.tick.phase != phase {
            continue;
        }

        let inputs = TickInputs {
            counter: before,
            resistance_pct: actor.ailments.resistance_pct(id),
            max_hp: actor.max_hp,
            stats: actor.stats,
        };
        let damage = definition.tick.damage.evaluate(&inputs);
        let decay = actor
            .ailments
            .reduce_counter(id, definition.tick.decay.evaluate(&inputs));
        let after = actor.ailments.counter(id);

        grant_resilience_xp(
            &mut actor.ailments,
            id,
            &definition.hardening,
            before,
            definition.hardening.tick_xp_rate,
        );

        let thresholds = definition
            .thresholds
            .iter()
            .filter(|t| before >= t.counter && t.counter > after)
            .cloned()
            .collect();

        ticks.push(AilmentTick {
            ailment: id,
            damage,
            element: definition.damage_element,
            decay,
            remaining: after,
            thresholds,
        });
    }

    ticks
}
