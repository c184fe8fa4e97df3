//! Scenario loader.
//!
//! A scenario is everything needed to rebuild the initial state of a run:
//! the seed, the floor, the map and the starting actors. Replay verifiers
//! start from the same scenario file the client did.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, bail, ensure};
use serde::{Deserialize, Serialize};
use tactics_core::{
    Actor, ActorStats, AilmentId, EntityId, Faction, GameState, Position, StatusKind, TileMap,
};
use tracing::debug;

use crate::loaders::{LoadResult, MapSpec, read_file};

fn default_floor() -> u32 {
    1
}

fn default_faction() -> Faction {
    Faction::Enemy
}

/// Starting actor placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSpec {
    /// Ignored for the player, who always gets [`EntityId::PLAYER`].
    #[serde(default)]
    pub id: u32,
    pub name: String,
    #[serde(default = "default_faction")]
    pub faction: Faction,
    pub position: (i32, i32),
    pub max_hp: u32,
    /// Starting hp, defaults to `max_hp`.
    #[serde(default)]
    pub hp: Option<u32>,
    #[serde(default)]
    pub armor: u32,
    #[serde(default)]
    pub stats: ActorStats,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub upgrades: Vec<String>,
    #[serde(default)]
    pub statuses: Vec<(StatusKind, u32)>,
    #[serde(default)]
    pub ailments: Vec<(AilmentId, u32)>,
    #[serde(default)]
    pub base_resistance_pct: f64,
    #[serde(default)]
    pub growth_rate: Option<f64>,
}

impl ActorSpec {
    pub fn position(&self) -> Position {
        Position::new(self.position.0, self.position.1)
    }

    fn build(&self, id: EntityId) -> Actor {
        let mut actor = Actor::new(id, self.name.clone(), self.faction, self.position(), self.max_hp)
            .with_stats(self.stats)
            .with_armor(self.armor);
        if let Some(hp) = self.hp {
            actor = actor.with_hp(hp);
        }
        actor.skills = self.skills.clone();
        actor.upgrades = self.upgrades.clone();
        for &(kind, duration) in &self.statuses {
            actor = actor.with_status(kind, duration);
        }
        for &(ailment, counter) in &self.ailments {
            actor.ailments.set_counter(ailment, counter);
        }
        actor.ailments.base_resistance_pct = self.base_resistance_pct;
        if let Some(rate) = self.growth_rate {
            actor.ailments.growth_rate = rate;
        }
        actor
    }
}

/// Scenario file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub seed: String,
    #[serde(default = "default_floor")]
    pub floor: u32,
    pub map: MapSpec,
    pub player: ActorSpec,
    #[serde(default)]
    pub actors: Vec<ActorSpec>,
}

impl ScenarioSpec {
    /// Builds the initial game state.
    ///
    /// Actor ids must be non-zero and unique. Every actor, the player
    /// included, must stand alone on a walkable hex.
    pub fn build(&self) -> LoadResult<GameState> {
        let map = self.map.build()?;

        let mut occupied = BTreeSet::new();
        check_placement(&map, &self.player, &mut occupied)?;
        let player = self.player.build(EntityId::PLAYER);

        let mut state = GameState::new(self.seed.clone())
            .with_floor(self.floor)
            .with_map(map.clone())
            .with_player(player);

        let mut ids = BTreeSet::new();
        for spec in &self.actors {
            ensure!(spec.id != EntityId::PLAYER.0, "Actor '{}' uses the player id", spec.name);
            ensure!(ids.insert(spec.id), "Duplicate actor id {}", spec.id);
            check_placement(&map, spec, &mut occupied)?;
            state = state.with_actor(spec.build(EntityId(spec.id)));
        }

        debug!(
            seed = %self.seed,
            actors = state.actors.len(),
            tiles = state.map.len(),
            "built scenario"
        );
        Ok(state)
    }
}

fn check_placement(
    map: &TileMap,
    spec: &ActorSpec,
    occupied: &mut BTreeSet<Position>,
) -> LoadResult<()> {
    let position = spec.position();
    if !map.is_walkable(position) {
        bail!("Actor '{}' placed on unwalkable hex {}", spec.name, position);
    }
    if !occupied.insert(position) {
        bail!("Actor '{}' shares hex {} with another actor", spec.name, position);
    }
    Ok(())
}

/// Loader for scenario files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<GameState> {
        let content = read_file(path)?;
        Self::from_str(&content).with_context(|| format!("Invalid scenario {}", path.display()))
    }

    pub fn from_str(content: &str) -> LoadResult<GameState> {
        Self::parse(content)?.build()
    }

    /// Parses without building, for callers that adjust the scenario first.
    pub fn parse(content: &str) -> LoadResult<ScenarioSpec> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))
    }
}
