//! Status-ailment engine.
//!
//! Ailments are stacking counters (burn, wet, poison, ...) on each actor.
//! This module holds the pure math: application rolls, deposits with
//! annihilation against opposing stacks, resistance hardening and per-phase
//! ticks. The effect handlers in [`crate::effect`] wire it to the state.
mod annihilation;
mod application;
mod catalog;
mod definition;
mod hardening;
mod tick;

pub use annihilation::{DepositOutcome, Neutralization, deposit_ailment_counters};
pub use application::{AilmentRoll, apply_ailment_to_target, trigger_value};
pub use catalog::AilmentCatalog;
pub use definition::{
    AilmentDefinition, AilmentInteraction, AilmentThreshold, HardeningSpec, RoundingMode,
    TickFormula, TickInputs, TickSpec,
};
pub use hardening::grant_resilience_xp;
pub use tick::{AilmentTick, tick_actor_ailments};
