//! Depositing counters, with incoming stacks first neutralizing opposing ones.

use super::catalog::AilmentCatalog;
use super::hardening::grant_resilience_xp;
use crate::state::{AilmentId, AilmentState};

/// One opposing ailment reduced by an incoming deposit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neutralization {
    pub opposing: AilmentId,
    /// Incoming points absorbed.
    pub neutralized: u32,
    /// Opposing counters removed.
    pub consumed: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DepositOutcome {
    pub neutralizations: Vec<Neutralization>,
    /// Points added to the incoming ailment's own counter.
    pub deposited: u32,
}

impl DepositOutcome {
    pub fn total_neutralized(&self) -> u32 {
        self.neutralizations.iter().map(|n| n.neutralized).sum()
    }
}

/// Offers `amount` of `incoming` to every opposing ailment present, in
/// priority order, then deposits the remainder.
///
/// For an opposing counter `C` at ratio `R` the capacity is `C × R`.
/// A remainder `n ≤ C × R` is fully neutralized and costs `ceil(n / R)`
/// opposing counters. A remainder above capacity wipes the opposing counter
/// and carries `floor(n − C × R)` onward, so a fractional capacity absorbs
/// `ceil(C × R)` incoming points. Neutralized points grant shock XP against
/// the incoming ailment. Greedy single pass.
pub fn deposit_ailment_counters(
    state: &mut AilmentState,
    catalog: &AilmentCatalog,
    incoming: AilmentId,
    amount: u32,
) -> DepositOutcome {
    let mut outcome = DepositOutcome::default();
    let Some(definition) = catalog.get(incoming) else {
        return outcome;
    };

    let mut remaining = amount;
    for edge in catalog.interactions_of(incoming) {
        if remaining == 0 {
            break;
        }
        let current = state.counter(edge.target);
        if current == 0 {
            continue;
        }

        let capacity = current as f64 * edge.ratio;
        let (neutralized, consumed) = if remaining as f64 > capacity {
            ((capacity.ceil() as u32).min(remaining), current)
        } else {
            let cost = (remaining as f64 / edge.ratio).ceil() as u32;
            (remaining, cost.min(current))
        };

        state.reduce_counter(edge.target, consumed);
        remaining -= neutralized;
        outcome.neutralizations.push(Neutralization {
            opposing: edge.target,
            neutralized,
            consumed,
        });
    }

    let shock = outcome.total_neutralized();
    if shock > 0 {
        grant_resilience_xp(
            state,
            incoming,
            &definition.hardening,
            shock,
            definition.hardening.shock_xp_rate,
        );
    }

    state.add_counter(incoming, remaining);
    outcome.deposited = remaining;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ailment::{AilmentDefinition, HardeningSpec};
    use crate::state::StatKind;

    fn catalog(ratio: f64) -> AilmentCatalog {
        AilmentCatalog::new(vec![
            AilmentDefinition::new(AilmentId::Wet, StatKind::Mind, StatKind::Body)
                .with_interaction(AilmentId::Burn, ratio, 0)
                .with_hardening(HardeningSpec {
                    shock_xp_rate: 1.0,
                    resistance_cap_pct: 50.0,
                    ..HardeningSpec::default()
                }),
            AilmentDefinition::new(AilmentId::Burn, StatKind::Mind, StatKind::Body),
        ])
        .unwrap()
    }

    #[test]
    fn no_opposition_deposits_everything() {
        let mut state = AilmentState::default();
        let outcome = deposit_ailment_counters(&mut state, &catalog(2.0), AilmentId::Wet, 7);
        assert_eq!(outcome.deposited, 7);
        assert!(outcome.neutralizations.is_empty());
        assert_eq!(state.counter(AilmentId::Wet), 7);
    }

    #[test]
    fn partial_fit_is_fully_neutralized() {
        let mut state = AilmentState::default();
        state.set_counter(AilmentId::Burn, 5);

        // capacity 10, incoming 3 -> ceil(3 / 2) = 2 burn removed.
        let outcome = deposit_ailment_counters(&mut state, &catalog(2.0), AilmentId::Wet, 3);
        assert_eq!(outcome.deposited, 0);
        assert_eq!(
            outcome.neutralizations,
            vec![Neutralization {
                opposing: AilmentId::Burn,
                neutralized: 3,
                consumed: 2,
            }]
        );
        assert_eq!(state.counter(AilmentId::Burn), 3);
        assert_eq!(state.counter(AilmentId::Wet), 0);
        assert_eq!(state.resilience(AilmentId::Wet).xp, 3.0);
    }

    #[test]
    fn overflow_wipes_opposition_and_deposits_rest() {
        let mut state = AilmentState::default();
        state.set_counter(AilmentId::Burn, 4);

        let outcome = deposit_ailment_counters(&mut state, &catalog(2.0), AilmentId::Wet, 11);
        assert_eq!(outcome.total_neutralized(), 8);
        assert_eq!(outcome.deposited, 3);
        assert_eq!(state.counter(AilmentId::Burn), 0);
        assert_eq!(state.counter(AilmentId::Wet), 3);
    }

    #[test]
    fn fractional_capacity_overflow_rounds_the_remainder_down() {
        let mut state = AilmentState::default();
        state.set_counter(AilmentId::Burn, 3);

        // capacity 3 × 0.5 = 1.5; 4 − 1.5 = 2.5 -> 2 deposited, all burn gone.
        let outcome = deposit_ailment_counters(&mut state, &catalog(0.5), AilmentId::Wet, 4);
        assert_eq!(outcome.total_neutralized(), 2);
        assert_eq!(outcome.deposited, 2);
        assert_eq!(state.counter(AilmentId::Burn), 0);
        assert_eq!(state.counter(AilmentId::Wet), 2);
    }

    #[test]
    fn capacity_below_one_still_wipes_the_opposing_counter() {
        let mut state = AilmentState::default();
        state.set_counter(AilmentId::Burn, 1);

        let outcome = deposit_ailment_counters(&mut state, &catalog(0.5), AilmentId::Wet, 10);
        assert_eq!(state.counter(AilmentId::Burn), 0);
        assert_eq!(
            outcome.neutralizations,
            vec![Neutralization {
                opposing: AilmentId::Burn,
                neutralized: 1,
                consumed: 1,
            }]
        );
        assert_eq!(outcome.deposited, 9);
        assert_eq!(state.counter(AilmentId::Wet), 9);
    }

    #[test]
    fn fractional_capacity_that_fits_rounds_the_cost_up() {
        let mut state = AilmentState::default();
        state.set_counter(AilmentId::Burn, 4);

        // capacity 2.0; 1 incoming costs ceil(1 / 0.5) = 2 burn.
        let outcome = deposit_ailment_counters(&mut state, &catalog(0.5), AilmentId::Wet, 1);
        assert_eq!(outcome.deposited, 0);
        assert_eq!(state.counter(AilmentId::Burn), 2);
    }

    #[test]
    fn unknown_ailment_is_ignored() {
        let mut state = AilmentState::default();
        let outcome = deposit_ailment_counters(&mut state, &catalog(1.0), AilmentId::Bleed, 4);
        assert_eq!(outcome, DepositOutcome::default());
        assert!(!state.has_any());
    }
}
