//! Persistent per-actor ailment state: counters and resilience.

use std::collections::BTreeMap;

use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Fixed, enumerable set of ailment types.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AilmentId {
    Burn,
    Wet,
    Poison,
    Frozen,
    Bleed,
}

/// Hardening progress against a single ailment.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resilience {
    /// Accumulated resilience experience.
    pub xp: f64,
    /// Derived resistance percentage, capped by the ailment definition.
    pub resistance_pct: f64,
}

/// Sparse ailment counters plus resistance bookkeeping for one actor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AilmentState {
    /// Current stacked potency per ailment. Zero entries are never stored.
    counters: BTreeMap<AilmentId, u32>,
    resilience: BTreeMap<AilmentId, Resilience>,
    /// Resistance percentage applied against every ailment.
    pub base_resistance_pct: f64,
    /// Multiplier applied to all resilience XP the actor earns.
    pub growth_rate: f64,
}

impl Default for AilmentState {
    fn default() -> Self {
        Self {
            counters: BTreeMap::new(),
            resilience: BTreeMap::new(),
            base_resistance_pct: 0.0,
            growth_rate: 1.0,
        }
    }
}

impl AilmentState {
    pub fn counter(&self, id: AilmentId) -> u32 {
        self.counters.get(&id).copied().unwrap_or(0)
    }

    /// Sets a counter, removing the entry when it drops to zero.
    pub fn set_counter(&mut self, id: AilmentId, value: u32) {
        if value == 0 {
            self.counters.remove(&id);
        } else {
            self.counters.insert(id, value);
        }
    }

    pub fn add_counter(&mut self, id: AilmentId, amount: u32) {
        let value = self.counter(id).saturating_add(amount);
        self.set_counter(id, value);
    }

    /// Reduces a counter, flooring at zero. Returns the amount actually removed.
    pub fn reduce_counter(&mut self, id: AilmentId, amount: u32) -> u32 {
        let current = self.counter(id);
        let removed = amount.min(current);
        self.set_counter(id, current - removed);
        removed
    }

    pub fn clear(&mut self, id: AilmentId) -> u32 {
        self.counters.remove(&id).unwrap_or(0)
    }

    pub fn clear_all(&mut self) {
        self.counters.clear();
    }

    /// Active (positive) counters in ailment id order.
    pub fn counters(&self) -> impl Iterator<Item = (AilmentId, u32)> + '_ {
        self.counters.iter().map(|(id, value)| (*id, *value))
    }

    pub fn has_any(&self) -> bool {
        !self.counters.is_empty()
    }

    pub fn resilience(&self, id: AilmentId) -> Resilience {
        self.resilience.get(&id).copied().unwrap_or_default()
    }

    pub fn resilience_mut(&mut self, id: AilmentId) -> &mut Resilience {
        self.resilience.entry(id).or_default()
    }

    /// Hardened resistance percentage against a specific ailment.
    pub fn resistance_pct(&self, id: AilmentId) -> f64 {
        self.resilience(id).resistance_pct
    }
}
