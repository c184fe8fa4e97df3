use tactics_content::ContentFactory;
use tactics_core::{ActionRecord, EntityId, Fingerprint, Position, replay, verify_replay};

fn sample_log() -> Vec<ActionRecord> {
    serde_json::from_str(include_str!("../data/scenarios/ember_duel.log.json")).unwrap()
}

#[test]
fn bundled_log_replays_deterministically() {
    let factory = ContentFactory::bundled();
    let engine = factory.build_engine().unwrap();
    let initial = factory.load_scenario("ember_duel").unwrap();
    let log = sample_log();
    assert_eq!(log.len(), 3);

    let first = replay(&engine, &initial, &log);
    let second = replay(&engine, &factory.load_scenario("ember_duel").unwrap(), &log);
    assert_eq!(first, second);
    assert_eq!(first.turn_number, 2);

    let brute = first.actor(EntityId(1)).unwrap();
    assert_eq!(brute.position(), Position::new(4, 4));
    assert!(brute.hp <= brute.max_hp - 4);
    // One roll for the burn application.
    assert_eq!(first.rng.counter, 1);

    let digest = Fingerprint::of(&first).digest().unwrap();
    assert!(verify_replay(&engine, &initial, &log, &digest).is_ok());
    assert!(verify_replay(&engine, &initial, &log[..1], &digest).is_err());
}
