//! Ailment definitions (read-only content).

use crate::state::{ActorStats, AilmentId, DamageElement, StatKind, TurnPhase};

/// How a tick formula's raw value is turned into an integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundingMode {
    #[default]
    Floor,
    Ceil,
    Round,
}

impl RoundingMode {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Floor => value.floor(),
            Self::Ceil => value.ceil(),
            Self::Round => value.round(),
        }
    }
}

/// Values a tick formula can read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickInputs {
    pub counter: u32,
    pub resistance_pct: f64,
    pub max_hp: u32,
    pub stats: ActorStats,
}

/// Weighted sum over the tick inputs plus a base, rounded and clamped.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TickFormula {
    pub base: f64,
    pub counter: f64,
    pub resistance: f64,
    pub max_hp: f64,
    pub body: f64,
    pub mind: f64,
    pub instinct: f64,
    pub rounding: RoundingMode,
    pub min: u32,
    pub max: u32,
}

impl Default for TickFormula {
    fn default() -> Self {
        Self {
            base: 0.0,
            counter: 0.0,
            resistance: 0.0,
            max_hp: 0.0,
            body: 0.0,
            mind: 0.0,
            instinct: 0.0,
            rounding: RoundingMode::Floor,
            min: 0,
            max: u32::MAX,
        }
    }
}

impl TickFormula {
    /// Formula that always evaluates to `value`.
    pub fn constant(value: u32) -> Self {
        Self {
            base: value as f64,
            ..Self::default()
        }
    }

    /// `counter × weight`, floored.
    pub fn per_counter(weight: f64) -> Self {
        Self {
            counter: weight,
            ..Self::default()
        }
    }

    pub fn evaluate(&self, inputs: &TickInputs) -> u32 {
        let raw = self.base
            + self.counter * inputs.counter as f64
            + self.resistance * inputs.resistance_pct
            + self.max_hp * inputs.max_hp as f64
            + self.body * inputs.stats.body as f64
            + self.mind * inputs.stats.mind as f64
            + self.instinct * inputs.stats.instinct as f64;
        let rounded = self.rounding.apply(raw);
        if !rounded.is_finite() {
            return self.min;
        }
        // `as` saturates: negatives become 0, huge values become u32::MAX.
        (rounded as u32).clamp(self.min, self.max.max(self.min))
    }
}

/// Per-turn upkeep of an ailment counter.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickSpec {
    pub phase: TurnPhase,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: TickFormula,
    #[cfg_attr(feature = "serde", serde(default))]
    pub decay: TickFormula,
}

/// Directed annihilation edge: incoming stacks of the owning ailment
/// neutralize stacks of `target` at `ratio` incoming points per target point.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AilmentInteraction {
    pub target: AilmentId,
    pub ratio: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: i32,
}

/// Message (and optional bonus effect id) fired when decay takes the counter
/// through `counter` on its way down.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AilmentThreshold {
    pub counter: u32,
    pub message: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_effect: Option<String>,
}

/// Resistance growth parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardeningSpec {
    /// XP per counter point present during a tick.
    pub tick_xp_rate: f64,
    /// XP per point neutralized by annihilation.
    pub shock_xp_rate: f64,
    pub resistance_cap_pct: f64,
    /// XP needed per resistance percentage point.
    pub xp_to_resistance: f64,
}

impl Default for HardeningSpec {
    fn default() -> Self {
        Self {
            tick_xp_rate: 0.0,
            shock_xp_rate: 0.0,
            resistance_cap_pct: 0.0,
            xp_to_resistance: 1.0,
        }
    }
}

impl HardeningSpec {
    /// Resistance percentage earned by `xp`, capped.
    pub fn resistance_for(&self, xp: f64) -> f64 {
        (xp / self.xp_to_resistance).clamp(0.0, self.resistance_cap_pct)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AilmentDefinition {
    pub id: AilmentId,
    pub attack_stat: StatKind,
    pub defense_stat: StatKind,
    /// Trigger points per extra deposited counter. Zero disables scaling.
    pub scaling_factor: f64,
    pub base_deposit: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_element: DamageElement,
    #[cfg_attr(feature = "serde", serde(default))]
    pub interactions: Vec<AilmentInteraction>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tick: TickSpec,
    #[cfg_attr(feature = "serde", serde(default))]
    pub thresholds: Vec<AilmentThreshold>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hardening: HardeningSpec,
}

impl AilmentDefinition {
    /// Minimal definition: no interactions, no tick, no hardening.
    pub fn new(id: AilmentId, attack_stat: StatKind, defense_stat: StatKind) -> Self {
        Self {
            id,
            attack_stat,
            defense_stat,
            scaling_factor: 0.0,
            base_deposit: 1.0,
            damage_element: DamageElement::Physical,
            interactions: Vec::new(),
            tick: TickSpec::default(),
            thresholds: Vec::new(),
            hardening: HardeningSpec::default(),
        }
    }

    pub fn with_deposit(mut self, base_deposit: f64, scaling_factor: f64) -> Self {
        self.base_deposit = base_deposit;
        self.scaling_factor = scaling_factor;
        self
    }

    pub fn with_element(mut self, element: DamageElement) -> Self {
        self.damage_element = element;
        self
    }

    pub fn with_interaction(mut self, target: AilmentId, ratio: f64, priority: i32) -> Self {
        self.interactions.push(AilmentInteraction {
            target,
            ratio,
            priority,
        });
        self
    }

    pub fn with_tick(mut self, tick: TickSpec) -> Self {
        self.tick = tick;
        self
    }

    pub fn with_threshold(mut self, counter: u32, message: impl Into<String>) -> Self {
        self.thresholds.push(AilmentThreshold {
            counter,
            message: message.into(),
            bonus_effect: None,
        });
        self
    }

    pub fn with_hardening(mut self, hardening: HardeningSpec) -> Self {
        self.hardening = hardening;
        self
    }

    /// Counters deposited for a successful application at `trigger`.
    pub fn deposit_for(&self, trigger: f64) -> u32 {
        let raw = if self.scaling_factor > 0.0 {
            (self.base_deposit + (trigger / self.scaling_factor).floor()).floor()
        } else {
            self.base_deposit.floor()
        };
        raw.max(0.0) as u32
    }
}
