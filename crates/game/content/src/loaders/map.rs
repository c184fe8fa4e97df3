//! Map data loader.
//!
//! Loads terrain and planted tile effects from map RON files.
//! Actor placement is handled separately via scenario files.

use std::path::Path;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use tactics_core::{BaseTile, Position, TileEffectId, TileEffectState, TileMap};

use crate::loaders::{LoadResult, read_file};

/// Map data structure for RON files.
///
/// Every hex of the `dimensions` rectangle starts as `default`; `tiles`
/// overrides individual hexes and `effects` plants
/// `(q, r, effect, duration, potency)` entries on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSpec {
    pub dimensions: (u32, u32),
    #[serde(default)]
    pub default: BaseTile,
    #[serde(default)]
    pub tiles: Vec<(i32, i32, BaseTile)>,
    #[serde(default)]
    pub effects: Vec<(i32, i32, TileEffectId, u32, u32)>,
}

impl MapSpec {
    /// Builds the tile map, rejecting coordinates outside the rectangle.
    pub fn build(&self) -> LoadResult<TileMap> {
        let (width, height) = self.dimensions;
        if width == 0 || height == 0 {
            bail!("Map dimensions must be non-zero, got {}x{}", width, height);
        }

        let mut map = TileMap::filled(width, height, self.default);

        for &(q, r, base) in &self.tiles {
            let position = Position::new(q, r);
            if !map.in_bounds(position) {
                bail!("Tile {} lies outside the {}x{} map", position, width, height);
            }
            map.set_base(position, base);
        }

        for &(q, r, effect, duration, potency) in &self.effects {
            let position = Position::new(q, r);
            let Some(tile) = map.tile_mut(position) else {
                bail!("Tile effect {:?} at {} lies outside the map", effect, position);
            };
            if duration > 0 {
                tile.add_effect(TileEffectState::new(effect, duration, potency));
            }
        }

        Ok(map)
    }
}

/// Loader for map data from RON files.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<TileMap> {
        let content = read_file(path)?;
        Self::from_str(&content).with_context(|| format!("Invalid map {}", path.display()))
    }

    pub fn from_str(content: &str) -> LoadResult<TileMap> {
        let spec: MapSpec =
            ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;
        spec.build()
    }
}
