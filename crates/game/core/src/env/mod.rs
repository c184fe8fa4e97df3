//! Environment services that sit below the game state.
//!
//! The only ambient service the engine needs is deterministic randomness;
//! content tables are injected into [`crate::EffectEngine`] instead.
mod rng;

pub use rng::{RngState, consume_random, draw};
