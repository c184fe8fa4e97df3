mod common;

use common::{arena, engine, grunt};
use tactics_core::{
    ActionRecord, ActorStats, AilmentId, AtomicEffect, DamageElement, EffectContext, EntityId,
    Fingerprint, GameState, HexDirection, Position, ReplayError, RngState, TargetRef, TurnPhase,
    compute_log_root, consume_random, draw, replay, verify_replay,
};

fn initial(seed: &str) -> GameState {
    let mut state = arena(8, 3)
        .with_actor(grunt(1, 2, 1).with_stats(ActorStats::new(3, 0, 0)))
        .with_actor(grunt(2, 5, 1));
    state.rng = RngState::new(seed);
    state.player.stats = ActorStats::new(0, 40, 0);
    state
}

fn log() -> Vec<ActionRecord> {
    let strike = EffectContext::between(EntityId::PLAYER, EntityId(1)).with_step("fire_bolt");
    let shove = EffectContext::between(EntityId::PLAYER, EntityId(2)).with_step("shove");
    vec![
        ActionRecord::new(
            strike.clone(),
            vec![
                AtomicEffect::damage(TargetRef::Target, 3, DamageElement::Fire),
                AtomicEffect::apply_ailment(TargetRef::Target, AilmentId::Burn, 10.0),
            ],
        ),
        ActionRecord::new(
            shove,
            vec![AtomicEffect::kinetic_push(TargetRef::Target, HexDirection::West, 2)],
        ),
        ActionRecord::new(
            strike,
            vec![AtomicEffect::apply_ailment(TargetRef::Target, AilmentId::Burn, 10.0)],
        ),
        ActionRecord::free(
            EffectContext::default(),
            vec![AtomicEffect::turn_phase(TargetRef::Actor(EntityId(1)), TurnPhase::End)],
        ),
    ]
}

#[test]
fn same_seed_and_log_give_identical_fingerprints() {
    let engine = engine();
    let a = replay(&engine, &initial("seed-42"), &log());
    let b = replay(&engine, &initial("seed-42"), &log());

    assert_eq!(a, b);
    let fa = Fingerprint::of(&a);
    assert_eq!(fa, Fingerprint::of(&b));
    assert_eq!(fa.canonical_json().unwrap(), Fingerprint::of(&b).canonical_json().unwrap());
    assert_eq!(fa.turn_number, 3);
    assert_eq!(fa.rng_counter, 2);
}

#[test]
fn verifier_accepts_the_honest_digest_and_rejects_a_tampered_log() {
    let engine = engine();
    let honest = Fingerprint::of(&replay(&engine, &initial("seed-42"), &log()))
        .digest()
        .unwrap();
    let verified = verify_replay(&engine, &initial("seed-42"), &log(), &honest).unwrap();
    assert_eq!(verified.player.q, 7);

    let mut tampered = log();
    tampered[0].effects[0] = AtomicEffect::damage(TargetRef::Target, 30, DamageElement::Fire);
    let err = verify_replay(&engine, &initial("seed-42"), &tampered, &honest).unwrap_err();
    assert!(matches!(err, ReplayError::FingerprintMismatch { .. }));
}

#[test]
fn log_root_is_a_stable_commitment() {
    let root = compute_log_root(&log()).unwrap();
    assert_eq!(root, compute_log_root(&log()).unwrap());

    let mut shorter = log();
    shorter.pop();
    assert_ne!(root, compute_log_root(&shorter).unwrap());
}

#[test]
fn random_draws_are_pure_and_counted() {
    let state = initial("purity");
    assert_eq!(draw("purity", 3), draw("purity", 3));

    let (value, next) = consume_random(&state);
    assert_eq!(value, draw("purity", 0));
    assert_eq!(next.rng.counter, state.rng.counter + 1);
    assert_eq!(state.rng.counter, 0);
}

#[test]
fn replay_input_survives_json() {
    let json = serde_json::to_string(&log()).unwrap();
    let parsed: Vec<ActionRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, log());

    let engine = engine();
    let a = Fingerprint::of(&replay(&engine, &initial("json"), &parsed));
    let b = Fingerprint::of(&replay(&engine, &initial("json"), &log()));
    assert_eq!(a, b);
    assert_eq!(a.player.q, Position::new(7, 3).q);
}
