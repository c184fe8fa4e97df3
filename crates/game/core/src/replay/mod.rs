//! Action-log replay and fingerprint verification.
//!
//! A leaderboard verifier rebuilds the initial state from the seed, replays
//! the submitted log through the same [`EffectEngine`] and compares the
//! resulting [`Fingerprint`] digest with the one the client claimed.
mod fingerprint;

pub use fingerprint::{ActorSummary, Fingerprint, PlayerSummary};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::effect::{AtomicEffect, EffectContext};
use crate::engine::EffectEngine;
use crate::error::{ErrorSeverity, GameError};
use crate::state::GameState;

/// One resolved player or enemy action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    #[serde(default)]
    pub context: EffectContext,
    pub effects: Vec<AtomicEffect>,
    #[serde(default = "consumes_turn_default")]
    pub consumes_turn: bool,
}

fn consumes_turn_default() -> bool {
    true
}

impl ActionRecord {
    pub fn new(context: EffectContext, effects: Vec<AtomicEffect>) -> Self {
        Self {
            context,
            effects,
            consumes_turn: true,
        }
    }

    /// Record that resolves without using up the turn.
    pub fn free(context: EffectContext, effects: Vec<AtomicEffect>) -> Self {
        Self {
            consumes_turn: false,
            ..Self::new(context, effects)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("fingerprint mismatch: expected {expected}, replay produced {actual}")]
    FingerprintMismatch { expected: String, actual: String },

    #[error("failed to encode: {0}")]
    Encode(String),
}

impl GameError for ReplayError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::FingerprintMismatch { .. } => ErrorSeverity::Validation,
            Self::Encode(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::FingerprintMismatch { .. } => "REPLAY_FINGERPRINT_MISMATCH",
            Self::Encode(_) => "REPLAY_ENCODE",
        }
    }
}

/// Applies every record in order. Each record that consumes a turn advances
/// `turn_number` by one.
pub fn replay(engine: &EffectEngine, initial: &GameState, log: &[ActionRecord]) -> GameState {
    let mut state = initial.clone();
    state.refresh_occupancy();
    for (index, record) in log.iter().enumerate() {
        if state.is_over() {
            debug!(index, "run already lost, ignoring remaining records");
            break;
        }
        engine.resolve(&mut state, &record.effects, &record.context);
        if record.consumes_turn {
            state.turn_number += 1;
        }
    }
    state
}

/// Replays `log` and checks the resulting digest against `expected_digest`.
pub fn verify_replay(
    engine: &EffectEngine,
    initial: &GameState,
    log: &[ActionRecord],
    expected_digest: &str,
) -> Result<Fingerprint, ReplayError> {
    let fingerprint = Fingerprint::of(&replay(engine, initial, log));
    let actual = fingerprint.digest()?;
    if !actual.eq_ignore_ascii_case(expected_digest.trim()) {
        return Err(ReplayError::FingerprintMismatch {
            expected: expected_digest.to_owned(),
            actual,
        });
    }
    Ok(fingerprint)
}

/// Commitment over an action log: SHA-256 of the bincode encoding of every
/// record, in order.
///
/// Fails on the first record that cannot be encoded.
pub fn compute_log_root(log: &[ActionRecord]) -> Result<[u8; 32], ReplayError> {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    for (index, record) in log.iter().enumerate() {
        let bytes = bincode::serialize(record)
            .map_err(|e| ReplayError::Encode(format!("record {index}: {e}")))?;
        hasher.update(&bytes);
    }
    Ok(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ailment::AilmentCatalog;
    use crate::config::GameConfig;
    use crate::effect::TargetRef;
    use crate::state::{
        Actor, BaseTile, DamageElement, EntityId, Faction, Position, TileMap,
    };
    use crate::tile::TileEffectRegistry;

    fn engine() -> EffectEngine {
        EffectEngine::new(
            GameConfig::default(),
            Arc::new(AilmentCatalog::empty()),
            Arc::new(TileEffectRegistry::standard()),
        )
    }

    fn initial() -> GameState {
        GameState::new("replay")
            .with_map(TileMap::filled(6, 6, BaseTile::Floor))
            .with_actor(Actor::new(EntityId(1), "rat", Faction::Enemy, Position::new(2, 0), 4))
    }

    fn log() -> Vec<ActionRecord> {
        let hit = AtomicEffect::damage(TargetRef::Actor(EntityId(1)), 2, DamageElement::Physical);
        let context = EffectContext::between(EntityId::PLAYER, EntityId(1));
        vec![
            ActionRecord::new(context.clone(), vec![hit]),
            ActionRecord::free(context.clone(), vec![AtomicEffect::message("again")]),
            ActionRecord::new(
                context,
                vec![AtomicEffect::damage(TargetRef::Actor(EntityId(1)), 3, DamageElement::Fire)],
            ),
        ]
    }

    #[test]
    fn replay_counts_consumed_turns() {
        let state = replay(&engine(), &initial(), &log());
        assert_eq!(state.turn_number, 2);
        assert_eq!(state.kill_count, 1);
        assert!(state.actors.is_empty());
    }

    #[test]
    fn verify_accepts_matching_digest_and_rejects_others() {
        let engine = engine();
        let expected = Fingerprint::of(&replay(&engine, &initial(), &log()))
            .digest()
            .unwrap();
        assert!(verify_replay(&engine, &initial(), &log(), &expected).is_ok());

        let err = verify_replay(&engine, &initial(), &log()[..1], &expected).unwrap_err();
        assert!(matches!(err, ReplayError::FingerprintMismatch { .. }));
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn log_root_depends_on_order() {
        let mut reversed = log();
        reversed.reverse();
        let root = compute_log_root(&log()).unwrap();
        assert_ne!(root, compute_log_root(&reversed).unwrap());
        assert_eq!(root, compute_log_root(&log()).unwrap());
    }

    #[test]
    fn log_root_hashes_every_record() {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        for record in log() {
            hasher.update(bincode::serialize(&record).unwrap());
        }
        let expected: [u8; 32] = hasher.finalize().into();
        assert_eq!(compute_log_root(&log()).unwrap(), expected);

        let empty: [u8; 32] = Sha256::digest(b"").into();
        assert_eq!(compute_log_root(&[]).unwrap(), empty);
    }
}
