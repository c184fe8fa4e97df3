//! Tile map: static terrain traits plus transient tile effect-states.

use std::collections::BTreeMap;

use bitflags::bitflags;

use super::{DamageElement, EntityId, Faction, Position};

bitflags! {
    /// Static traits derived from a tile's base terrain.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TileTraits: u8 {
        const HAZARDOUS = 1 << 0;
        const LIQUID = 1 << 1;
        const BLOCKS_MOVEMENT = 1 << 2;
        const SLIPPERY = 1 << 3;
    }
}

/// Base terrain id. Traits are a pure function of the base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseTile {
    #[default]
    Floor,
    Wall,
    Lava,
    Water,
    Ice,
    Pit,
}

impl BaseTile {
    pub const fn traits(self) -> TileTraits {
        match self {
            Self::Floor => TileTraits::empty(),
            Self::Wall => TileTraits::BLOCKS_MOVEMENT,
            Self::Lava => TileTraits::HAZARDOUS.union(TileTraits::LIQUID),
            Self::Water => TileTraits::LIQUID,
            Self::Ice => TileTraits::SLIPPERY,
            Self::Pit => TileTraits::HAZARDOUS,
        }
    }

    /// Element of the damage dealt by a hazardous base.
    pub const fn hazard_element(self) -> DamageElement {
        match self {
            Self::Lava => DamageElement::Fire,
            _ => DamageElement::Physical,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Floor => "floor",
            Self::Wall => "wall",
            Self::Lava => "lava",
            Self::Water => "water",
            Self::Ice => "ice",
            Self::Pit => "pit",
        }
    }
}

/// Transient effect that can be planted on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileEffectId {
    Fire,
    Oil,
    Web,
    Miasma,
    Frost,
}

/// One planted effect with its remaining duration and potency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileEffectState {
    pub id: TileEffectId,
    /// Rounds left before the effect expires.
    pub duration: u32,
    pub potency: u32,
}

impl TileEffectState {
    pub const fn new(id: TileEffectId, duration: u32, potency: u32) -> Self {
        Self {
            id,
            duration,
            potency,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub position: Position,
    base: BaseTile,
    /// Active effect-states, evaluated in list order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<TileEffectState>,
}

impl Tile {
    pub fn new(position: Position, base: BaseTile) -> Self {
        Self {
            position,
            base,
            effects: Vec::new(),
        }
    }

    pub fn base(&self) -> BaseTile {
        self.base
    }

    /// Static traits of the base terrain.
    pub fn traits(&self) -> TileTraits {
        self.base.traits()
    }

    pub fn has_trait(&self, flag: TileTraits) -> bool {
        self.traits().contains(flag)
    }

    pub fn set_base(&mut self, base: BaseTile) {
        self.base = base;
    }

    pub fn is_walkable(&self) -> bool {
        !self.has_trait(TileTraits::BLOCKS_MOVEMENT)
    }

    pub fn is_hazardous(&self) -> bool {
        self.has_trait(TileTraits::HAZARDOUS)
    }

    pub fn effect(&self, id: TileEffectId) -> Option<&TileEffectState> {
        self.effects.iter().find(|e| e.id == id)
    }

    pub fn has_effect(&self, id: TileEffectId) -> bool {
        self.effect(id).is_some()
    }

    /// Plants an effect; an existing effect of the same id is refreshed to
    /// the larger duration and potency.
    pub fn add_effect(&mut self, state: TileEffectState) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.id == state.id) {
            existing.duration = existing.duration.max(state.duration);
            existing.potency = existing.potency.max(state.potency);
        } else {
            self.effects.push(state);
        }
    }

    pub fn remove_effect(&mut self, id: TileEffectId) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.id != id);
        self.effects.len() != before
    }

    /// Decrements effect durations by one round. Returns the expired ids.
    pub fn tick_effects(&mut self) -> Vec<TileEffectId> {
        let mut expired = Vec::new();
        for effect in self.effects.iter_mut() {
            effect.duration = effect.duration.saturating_sub(1);
            if effect.duration == 0 {
                expired.push(effect.id);
            }
        }
        self.effects.retain(|e| e.duration > 0);
        expired
    }
}

/// Bounded hex map. A position is in bounds iff it lies inside the
/// `width × height` axial rectangle and has a tile.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileMap {
    pub width: u32,
    pub height: u32,
    #[cfg_attr(feature = "serde", serde(with = "tile_entries"))]
    tiles: BTreeMap<Position, Tile>,
}

impl TileMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: BTreeMap::new(),
        }
    }

    /// A rectangle of `base` tiles covering the whole bounds.
    pub fn filled(width: u32, height: u32, base: BaseTile) -> Self {
        let mut map = Self::new(width, height);
        for r in 0..height as i32 {
            for q in 0..width as i32 {
                let pos = Position::new(q, r);
                map.tiles.insert(pos, Tile::new(pos, base));
            }
        }
        map
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.q >= 0
            && position.r >= 0
            && (position.q as u32) < self.width
            && (position.r as u32) < self.height
            && self.tiles.contains_key(&position)
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        if self.in_bounds(position) {
            self.tiles.get(&position)
        } else {
            None
        }
    }

    pub fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        if self.in_bounds(position) {
            self.tiles.get_mut(&position)
        } else {
            None
        }
    }

    /// Inserts or replaces the tile at `position`. Out-of-rectangle positions
    /// are ignored.
    pub fn set_base(&mut self, position: Position, base: BaseTile) {
        let inside = position.q >= 0
            && position.r >= 0
            && (position.q as u32) < self.width
            && (position.r as u32) < self.height;
        if !inside {
            return;
        }
        self.tiles
            .entry(position)
            .and_modify(|tile| tile.set_base(base))
            .or_insert_with(|| Tile::new(position, base));
    }

    /// In bounds and not `BLOCKS_MOVEMENT`.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.tile(position).is_some_and(Tile::is_walkable)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.values_mut()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Remains of a dead non-player actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Corpse {
    pub position: Position,
    pub actor: EntityId,
    pub name: String,
    pub faction: Faction,
}

/// Tiles serialize as a sequence because JSON maps need string keys.
#[cfg(feature = "serde")]
mod tile_entries {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Position, Tile};

    pub fn serialize<S>(tiles: &BTreeMap<Position, Tile>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(tiles.values())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<Position, Tile>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tiles = Vec::<Tile>::deserialize(deserializer)?;
        Ok(tiles.into_iter().map(|tile| (tile.position, tile)).collect())
    }
}
