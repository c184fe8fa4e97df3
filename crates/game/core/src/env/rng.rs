//! Deterministic random number generation keyed by (seed, counter).
//!
//! Every draw is a pure function of the run seed and a monotonically
//! increasing counter stored in [`GameState`]. Consuming a draw advances the
//! counter by exactly one, so an action log replayed against the same initial
//! state reproduces every roll.
//!
//! # Determinism
//!
//! Nothing in this module (or anywhere in the engine) reads the wall clock or
//! an ambient random source. The seed string is hashed with FNV-1a, mixed with
//! the counter through a SplitMix64 finalizer, then permuted with the
//! PCG-XSH-RR output function.

use crate::state::GameState;

/// Seed and draw counter carried by the game state.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RngState {
    /// Run seed, set once at game creation.
    pub seed: String,
    /// Number of draws consumed so far.
    pub counter: u64,
}

impl RngState {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            counter: 0,
        }
    }

    /// Draws the next float in `[0, 1)` and advances the counter by one.
    pub fn next_float(&mut self) -> f64 {
        let value = draw(&self.seed, self.counter);
        self.counter += 1;
        value
    }

    /// Draws an integer roll in `[1, 100]`, consuming exactly one draw.
    pub fn roll_d100(&mut self) -> u32 {
        let roll = (self.next_float() * 100.0).floor() as u32 + 1;
        roll.min(100)
    }

    /// Returns the value the next draw would produce without consuming it.
    pub fn peek(&self) -> f64 {
        draw(&self.seed, self.counter)
    }
}

/// Pure draw: the same `(seed, counter)` always yields the same float in `[0, 1)`.
pub fn draw(seed: &str, counter: u64) -> f64 {
    let mixed = mix(hash_seed(seed), counter);
    let state = PcgRng::step(mixed);
    let high = PcgRng::output(state) as u64;
    let low = PcgRng::output(PcgRng::step(state)) as u64;
    // 53 significant bits keep the result strictly below 1.0.
    let bits = ((high << 32) | low) >> 11;
    bits as f64 / (1u64 << 53) as f64
}

/// Reads `state.rng.counter`, draws, and returns the value with a state whose
/// counter is incremented by exactly one.
pub fn consume_random(state: &GameState) -> (f64, GameState) {
    let mut next = state.clone();
    let value = next.rng.next_float();
    (value, next)
}

/// FNV-1a over the UTF-8 bytes of the seed.
fn hash_seed(seed: &str) -> u64 {
    const OFFSET: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    seed.bytes().fold(OFFSET, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(PRIME)
    })
}

/// SplitMix64-style avalanche of the seed hash and the draw counter.
fn mix(seed_hash: u64, counter: u64) -> u64 {
    let mut hash = seed_hash ^ counter.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ceb9fe1a85ec53);
    hash ^= hash >> 33;
    hash
}

/// PCG-XSH-RR permutation (32-bit output from 64-bit state).
struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}
