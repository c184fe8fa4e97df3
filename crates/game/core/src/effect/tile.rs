//! Tile effect placement and aging.

use tracing::debug;

use crate::engine::HandlerApi;
use crate::state::{Position, SimulationEvent, TileEffectId, TileEffectState};

/// Plant a transient effect on a tile.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TilePlacement {
    pub position: Position,
    pub effect: TileEffectId,
    pub duration: u32,
    pub potency: u32,
}

impl TilePlacement {
    pub fn new(position: Position, effect: TileEffectId, duration: u32, potency: u32) -> Self {
        Self {
            position,
            effect,
            duration,
            potency,
        }
    }

    pub(crate) fn apply(&self, api: &mut HandlerApi<'_>) {
        if self.duration == 0 {
            return;
        }
        let Some(tile) = api.state_mut().map.tile_mut(self.position) else {
            debug!(position = %self.position, "tile effect placed off the map");
            return;
        };
        tile.add_effect(TileEffectState::new(self.effect, self.duration, self.potency));
        api.push_simulation_event(SimulationEvent::TileEffectPlaced {
            position: self.position,
            effect: self.effect,
        });
    }
}

/// Age tile effects by one round: a single tile, or the whole map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileTick {
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: Option<Position>,
}

impl TileTick {
    pub fn all() -> Self {
        Self { position: None }
    }

    pub fn at(position: Position) -> Self {
        Self {
            position: Some(position),
        }
    }

    pub(crate) fn apply(&self, api: &mut HandlerApi<'_>) {
        let map = &mut api.state_mut().map;
        let expired: Vec<(Position, TileEffectId)> = match self.position {
            Some(position) => map
                .tile_mut(position)
                .map(|tile| {
                    tile.tick_effects()
                        .into_iter()
                        .map(|id| (position, id))
                        .collect()
                })
                .unwrap_or_default(),
            None => map
                .tiles_mut()
                .flat_map(|tile| {
                    let position = tile.position;
                    tile.tick_effects().into_iter().map(move |id| (position, id))
                })
                .collect(),
        };

        for (position, effect) in expired {
            api.push_simulation_event(SimulationEvent::TileEffectExpired { position, effect });
        }
    }
}
