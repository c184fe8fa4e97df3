//! Resistance growth from enduring or neutralizing ailments.

use super::definition::HardeningSpec;
use crate::state::{AilmentId, AilmentState};

/// Credits `points × rate × growth_rate` XP to the bearer's resilience against
/// `id` and re-derives the capped resistance. Returns the new resistance.
pub fn grant_resilience_xp(
    state: &mut AilmentState,
    id: AilmentId,
    spec: &HardeningSpec,
    points: u32,
    rate: f64,
) -> f64 {
    let xp = points as f64 * rate * state.growth_rate;
    let resilience = state.resilience_mut(id);
    if xp > 0.0 && xp.is_finite() {
        resilience.xp += xp;
    }
    resilience.resistance_pct = spec.resistance_for(resilience.xp);
    resilience.resistance_pct
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> HardeningSpec {
        HardeningSpec {
            tick_xp_rate: 1.0,
            shock_xp_rate: 2.0,
            resistance_cap_pct: 30.0,
            xp_to_resistance: 4.0,
        }
    }

    #[test]
    fn xp_converts_and_caps() {
        let mut state = AilmentState::default();
        assert_eq!(grant_resilience_xp(&mut state, AilmentId::Burn, &spec(), 10, 1.0), 2.5);
        assert_eq!(state.resilience(AilmentId::Burn).xp, 10.0);

        let pct = grant_resilience_xp(&mut state, AilmentId::Burn, &spec(), 500, 2.0);
        assert_eq!(pct, 30.0);
        assert_eq!(state.resistance_pct(AilmentId::Burn), 30.0);
    }

    #[test]
    fn growth_rate_scales_xp() {
        let mut state = AilmentState::default();
        state.growth_rate = 0.5;
        grant_resilience_xp(&mut state, AilmentId::Wet, &spec(), 8, 1.0);
        assert_eq!(state.resilience(AilmentId::Wet).xp, 4.0);
        assert_eq!(state.resistance_pct(AilmentId::Wet), 1.0);
    }
}
