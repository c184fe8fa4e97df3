//! Summoning and corpse cleanup.

use tracing::debug;

use crate::engine::HandlerApi;
use crate::state::{Actor, ActorStats, Faction, Position, SimulationEvent};

/// Bring a new actor onto the board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnActorEffect {
    pub name: String,
    pub faction: Faction,
    pub position: Position,
    pub max_hp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: ActorStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<String>,
}

impl SpawnActorEffect {
    pub fn new(name: impl Into<String>, faction: Faction, position: Position, max_hp: u32) -> Self {
        Self {
            name: name.into(),
            faction,
            position,
            max_hp,
            stats: ActorStats::default(),
            skills: Vec::new(),
        }
    }

    pub(crate) fn apply(&self, api: &mut HandlerApi<'_>) {
        if !api.state().can_enter(self.position) {
            debug!(position = %self.position, name = %self.name, "spawn hex not free");
            return;
        }
        let Some(id) = api.state_mut().allocate_entity_id() else {
            debug!("entity id space exhausted");
            return;
        };

        let mut actor = Actor::new(id, self.name.clone(), self.faction, self.position, self.max_hp)
            .with_stats(self.stats);
        actor.skills = self.skills.clone();
        api.state_mut().add_actor(actor);
        api.push_simulation_event(SimulationEvent::UnitSpawned {
            actor: id,
            position: self.position,
        });
    }
}

/// Clear the corpse lying on a hex, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemoveCorpseEffect {
    pub position: Position,
}

impl RemoveCorpseEffect {
    pub(crate) fn apply(&self, api: &mut HandlerApi<'_>) {
        let corpses = &mut api.state_mut().corpses;
        let Some(index) = corpses.iter().position(|c| c.position == self.position) else {
            return;
        };
        corpses.remove(index);
        api.push_simulation_event(SimulationEvent::CorpseRemoved {
            position: self.position,
        });
    }
}
