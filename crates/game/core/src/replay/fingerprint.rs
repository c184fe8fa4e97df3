//! Canonical structural summary of a game state.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::ReplayError;
use crate::state::GameState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub hp: u32,
    pub max_hp: u32,
    pub q: i32,
    pub r: i32,
    /// Sorted so acquisition order does not matter.
    pub upgrades: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSummary {
    pub id: u32,
    pub name: String,
    pub hp: u32,
    pub q: i32,
    pub r: i32,
}

/// Projection of everything a replay verifier compares.
///
/// Field order is fixed by the struct definition, so [`canonical_json`]
/// yields the same bytes for equal fingerprints on every platform. Logs and
/// presentation data are deliberately left out.
///
/// [`canonical_json`]: Fingerprint::canonical_json
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub player: PlayerSummary,
    /// Non-player actors, sorted by id.
    pub enemies: Vec<ActorSummary>,
    pub floor: u32,
    pub turn_number: u32,
    pub kill_count: u32,
    pub rng_counter: u64,
}

impl Fingerprint {
    pub fn of(state: &GameState) -> Self {
        let player = &state.player;
        let mut upgrades = player.upgrades.clone();
        upgrades.sort();

        let mut enemies: Vec<ActorSummary> = state
            .actors
            .iter()
            .map(|actor| ActorSummary {
                id: actor.id.0,
                name: actor.name.clone(),
                hp: actor.hp,
                q: actor.position().q,
                r: actor.position().r,
            })
            .collect();
        enemies.sort_by_key(|summary| summary.id);

        Self {
            player: PlayerSummary {
                hp: player.hp,
                max_hp: player.max_hp,
                q: player.position().q,
                r: player.position().r,
                upgrades,
            },
            enemies,
            floor: state.floor,
            turn_number: state.turn_number,
            kill_count: state.kill_count,
            rng_counter: state.rng.counter,
        }
    }

    /// Compact JSON with struct field order.
    pub fn canonical_json(&self) -> Result<String, ReplayError> {
        serde_json::to_string(self).map_err(|e| ReplayError::Encode(e.to_string()))
    }

    /// Lowercase hex SHA-256 of the canonical JSON.
    pub fn digest(&self) -> Result<String, ReplayError> {
        let json = self.canonical_json()?;
        Ok(hex::encode(Sha256::digest(json.as_bytes())))
    }
}
