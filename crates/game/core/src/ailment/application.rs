//! Rolling an ailment application against a defender.

use super::definition::AilmentDefinition;
use crate::env::RngState;
use crate::state::Actor;

/// Outcome of one application roll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AilmentRoll {
    /// Chance in percent, clamped to `[0, 100]`.
    pub trigger: f64,
    /// d100 roll in `[1, 100]`.
    pub roll: u32,
    pub applied: bool,
    /// Counters to deposit; zero when the roll failed.
    pub amount: u32,
}

/// `(attack − defense) + multiplier − (base resistance + hardened resistance)`,
/// clamped to `[0, 100]`. A missing attacker contributes 0 attack.
pub fn trigger_value(
    attacker: Option<&Actor>,
    defender: &Actor,
    definition: &AilmentDefinition,
    skill_multiplier: f64,
) -> f64 {
    let attack = attacker.map_or(0, |a| a.stats.get(definition.attack_stat)) as f64;
    let defense = defender.stats.get(definition.defense_stat) as f64;
    let resistance =
        defender.ailments.base_resistance_pct + defender.ailments.resistance_pct(definition.id);

    let trigger = (attack - defense) + skill_multiplier - resistance;
    if trigger.is_finite() {
        trigger.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Consumes exactly one RNG draw; applied iff `roll <= trigger`.
pub fn apply_ailment_to_target(
    attacker: Option<&Actor>,
    defender: &Actor,
    definition: &AilmentDefinition,
    skill_multiplier: f64,
    rng: &mut RngState,
) -> AilmentRoll {
    let trigger = trigger_value(attacker, defender, definition, skill_multiplier);
    let roll = rng.roll_d100();
    let applied = roll as f64 <= trigger;
    let amount = if applied {
        definition.deposit_for(trigger)
    } else {
        0
    };

    AilmentRoll {
        trigger,
        roll,
        applied,
        amount,
    }
}
