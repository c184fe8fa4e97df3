//! Data-driven content definitions and loaders.
//!
//! This crate houses the static tables the effect engine is built from and
//! provides loaders for RON/TOML data files:
//! - Ailment catalogs (data-driven via RON, validated for an acyclic
//!   annihilation graph)
//! - Tile maps (data-driven via RON)
//! - Scenarios: seed, map and starting actors (data-driven via RON)
//! - Engine configuration (data-driven via TOML)
//!
//! Content is read once at startup and handed to the engine as immutable
//! tables. It never appears in game state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActorSpec, AilmentLoader, ConfigLoader, ContentFactory, LoadResult, MapLoader, MapSpec,
    ScenarioLoader, ScenarioSpec,
};
