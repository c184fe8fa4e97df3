//! Status effect set for actors.
//!
//! Status effects are short, binary conditions (stunned, rooted, flying)
//! measured in whole turns. They are distinct from ailments, which are
//! stacking counters handled by [`crate::ailment`].
//!
//! # Turn-based Duration
//!
//! Each effect stores the number of remaining turns. [`StatusEffects::tick`]
//! runs at the end of the bearer's turn and drops effects that reach zero.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Active status effects on an actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

/// A single status effect with its remaining duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Turns left before the effect expires.
    pub remaining: u32,
}

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    // ========================================================================
    // Crowd Control
    // ========================================================================
    /// Loses its next turn.
    Stunned,

    /// Cannot move voluntarily.
    Rooted,

    /// Cannot use skills.
    Silenced,

    // ========================================================================
    // Buffs
    // ========================================================================
    /// Airborne: ignores ground hazards and liquid drag.
    Flying,

    /// Cannot be displaced by pushes.
    Anchored,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if a specific status effect is active.
    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind && e.remaining > 0)
    }

    /// Remaining turns of a status effect, if active.
    pub fn remaining(&self, kind: StatusKind) -> Option<u32> {
        self.effects
            .iter()
            .find(|e| e.kind == kind && e.remaining > 0)
            .map(|e| e.remaining)
    }

    /// Adds a status effect.
    ///
    /// If the effect already exists, keeps the longer duration. Effects with
    /// zero duration and additions beyond capacity are ignored.
    pub fn add(&mut self, kind: StatusKind, duration: u32) -> bool {
        if duration == 0 {
            return false;
        }

        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.remaining = existing.remaining.max(duration);
            return true;
        }

        self.effects
            .try_push(StatusEffect {
                kind,
                remaining: duration,
            })
            .is_ok()
    }

    /// Removes a status effect immediately. Returns true if it was present.
    pub fn remove(&mut self, kind: StatusKind) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        self.effects.len() != before
    }

    /// Decrements every duration by one turn and returns the kinds that expired.
    pub fn tick(&mut self) -> Vec<StatusKind> {
        let mut expired = Vec::new();
        for effect in self.effects.iter_mut() {
            effect.remaining = effect.remaining.saturating_sub(1);
            if effect.remaining == 0 {
                expired.push(effect.kind);
            }
        }
        self.effects.retain(|e| e.remaining > 0);
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
