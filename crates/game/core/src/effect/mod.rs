//! Atomic effects: the only way state changes.
//!
//! Effects are plain data produced by skills, tile hooks and other handlers.
//! They reference actors only through [`TargetRef`] ids and positions, never
//! engine internals, so any effect list can be serialized and replayed.
//!
//! # Architecture
//!
//! Each payload is a struct in its own file with an `apply` method working on
//! a [`HandlerApi`]. [`AtomicEffect`] wraps them for serialization and
//! dispatches with an exhaustive match, so a new variant is a compile error
//! everywhere it is not handled.

mod ailment;
mod damage;
mod movement;
mod phase;
mod presentation;
mod resource;
mod spawn;
mod status;
mod tile;

pub use ailment::{ApplyAilmentEffect, ClearAilmentEffect, DepositAilmentEffect};
pub use damage::DamageEffect;
pub use movement::{DisplacementEffect, KineticPushEffect};
pub use phase::TurnPhaseEffect;
pub use presentation::{JuiceEffect, MessageEffect};
pub use resource::{GainArmorEffect, HealEffect};
pub use spawn::{RemoveCorpseEffect, SpawnActorEffect};
pub use status::{ApplyStatusEffect, RemoveStatusEffect};
pub use tile::{TilePlacement, TileTick};

use strum::{AsRefStr, Display, EnumIter};

use crate::engine::HandlerApi;
use crate::state::{
    AilmentId, DamageElement, EntityId, HexDirection, Position, StatusKind, TurnPhase,
};

// ============================================================================
// Target references
// ============================================================================

/// How an effect names the actor (or hex) it applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetRef {
    /// The context's source actor.
    Source,
    /// The context's target actor.
    Target,
    Actor(EntityId),
    /// Whoever occupies the hex when the effect resolves.
    At(Position),
}

/// Resolution context shared by an effect list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectContext {
    #[cfg_attr(feature = "serde", serde(default))]
    pub source_id: Option<EntityId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_id: Option<EntityId>,
    /// Groups timeline and visual events emitted by one step.
    #[cfg_attr(feature = "serde", serde(default))]
    pub step_id: Option<String>,
}

impl EffectContext {
    pub fn new(source_id: Option<EntityId>, target_id: Option<EntityId>) -> Self {
        Self {
            source_id,
            target_id,
            step_id: None,
        }
    }

    /// Context for an actor acting on another.
    pub fn between(source: EntityId, target: EntityId) -> Self {
        Self::new(Some(source), Some(target))
    }

    pub fn with_step(mut self, step_id: impl Into<String>) -> Self {
        self.step_id = Some(step_id.into());
        self
    }
}

// ============================================================================
// Effect enum
// ============================================================================

/// Closed set of declarative state-change requests.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AtomicEffect {
    // ========================================================================
    // Vitals
    // ========================================================================
    Damage(DamageEffect),
    Heal(HealEffect),
    GainArmor(GainArmorEffect),

    // ========================================================================
    // Movement
    // ========================================================================
    Displacement(DisplacementEffect),
    KineticPush(KineticPushEffect),

    // ========================================================================
    // Statuses and ailments
    // ========================================================================
    ApplyStatus(ApplyStatusEffect),
    RemoveStatus(RemoveStatusEffect),
    ApplyAilment(ApplyAilmentEffect),
    DepositAilmentCounters(DepositAilmentEffect),
    ClearAilmentCounters(ClearAilmentEffect),
    TurnPhase(TurnPhaseEffect),

    // ========================================================================
    // World
    // ========================================================================
    PlaceTileEffect(TilePlacement),
    TickTileEffects(TileTick),
    SpawnActor(SpawnActorEffect),
    RemoveCorpse(RemoveCorpseEffect),

    // ========================================================================
    // Presentation (recorded only)
    // ========================================================================
    Message(MessageEffect),
    Juice(JuiceEffect),
}

/// Fieldless discriminant of [`AtomicEffect`], used for handler registration
/// and timeline logging.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, Display, EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    Damage,
    Heal,
    GainArmor,
    Displacement,
    KineticPush,
    ApplyStatus,
    RemoveStatus,
    ApplyAilment,
    DepositAilmentCounters,
    ClearAilmentCounters,
    TurnPhase,
    PlaceTileEffect,
    TickTileEffects,
    SpawnActor,
    RemoveCorpse,
    Message,
    Juice,
}

impl AtomicEffect {
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::Damage(_) => EffectKind::Damage,
            Self::Heal(_) => EffectKind::Heal,
            Self::GainArmor(_) => EffectKind::GainArmor,
            Self::Displacement(_) => EffectKind::Displacement,
            Self::KineticPush(_) => EffectKind::KineticPush,
            Self::ApplyStatus(_) => EffectKind::ApplyStatus,
            Self::RemoveStatus(_) => EffectKind::RemoveStatus,
            Self::ApplyAilment(_) => EffectKind::ApplyAilment,
            Self::DepositAilmentCounters(_) => EffectKind::DepositAilmentCounters,
            Self::ClearAilmentCounters(_) => EffectKind::ClearAilmentCounters,
            Self::TurnPhase(_) => EffectKind::TurnPhase,
            Self::PlaceTileEffect(_) => EffectKind::PlaceTileEffect,
            Self::TickTileEffects(_) => EffectKind::TickTileEffects,
            Self::SpawnActor(_) => EffectKind::SpawnActor,
            Self::RemoveCorpse(_) => EffectKind::RemoveCorpse,
            Self::Message(_) => EffectKind::Message,
            Self::Juice(_) => EffectKind::Juice,
        }
    }

    /// The actor reference this effect is aimed at, if it has one.
    pub fn target(&self) -> Option<TargetRef> {
        match self {
            Self::Damage(e) => Some(e.target),
            Self::Heal(e) => Some(e.target),
            Self::GainArmor(e) => Some(e.target),
            Self::Displacement(e) => Some(e.target),
            Self::KineticPush(e) => Some(e.target),
            Self::ApplyStatus(e) => Some(e.target),
            Self::RemoveStatus(e) => Some(e.target),
            Self::ApplyAilment(e) => Some(e.target),
            Self::DepositAilmentCounters(e) => Some(e.target),
            Self::ClearAilmentCounters(e) => Some(e.target),
            Self::TurnPhase(e) => Some(e.target),
            Self::PlaceTileEffect(_)
            | Self::TickTileEffects(_)
            | Self::SpawnActor(_)
            | Self::RemoveCorpse(_)
            | Self::Message(_)
            | Self::Juice(_) => None,
        }
    }

    /// Dispatches to the payload's handler.
    pub(crate) fn apply(&self, api: &mut HandlerApi<'_>) {
        match self {
            Self::Damage(e) => e.apply(api),
            Self::Heal(e) => e.apply(api),
            Self::GainArmor(e) => e.apply(api),
            Self::Displacement(e) => e.apply(api),
            Self::KineticPush(e) => e.apply(api),
            Self::ApplyStatus(e) => e.apply(api),
            Self::RemoveStatus(e) => e.apply(api),
            Self::ApplyAilment(e) => e.apply(api),
            Self::DepositAilmentCounters(e) => e.apply(api),
            Self::ClearAilmentCounters(e) => e.apply(api),
            Self::TurnPhase(e) => e.apply(api),
            Self::PlaceTileEffect(e) => e.apply(api),
            Self::TickTileEffects(e) => e.apply(api),
            Self::SpawnActor(e) => e.apply(api),
            Self::RemoveCorpse(e) => e.apply(api),
            Self::Message(e) => e.apply(api),
            Self::Juice(e) => e.apply(api),
        }
    }

    // ===== constructors =====

    pub fn damage(target: TargetRef, amount: u32, element: DamageElement) -> Self {
        Self::Damage(DamageEffect {
            target,
            amount,
            element,
        })
    }

    pub fn heal(target: TargetRef, amount: u32) -> Self {
        Self::Heal(HealEffect { target, amount })
    }

    pub fn gain_armor(target: TargetRef, amount: u32) -> Self {
        Self::GainArmor(GainArmorEffect { target, amount })
    }

    /// Simulated straight-line displacement with residual momentum.
    pub fn push_to(target: TargetRef, destination: Position, momentum: u32) -> Self {
        Self::Displacement(DisplacementEffect::simulated(target, destination).with_momentum(momentum))
    }

    pub fn teleport(target: TargetRef, destination: Position) -> Self {
        Self::Displacement(DisplacementEffect::teleport(target, destination))
    }

    pub fn kinetic_push(target: TargetRef, direction: HexDirection, momentum: u32) -> Self {
        Self::KineticPush(KineticPushEffect {
            target,
            direction,
            momentum,
        })
    }

    pub fn apply_status(target: TargetRef, status: StatusKind, duration: u32) -> Self {
        Self::ApplyStatus(ApplyStatusEffect {
            target,
            status,
            duration,
        })
    }

    pub fn remove_status(target: TargetRef, status: StatusKind) -> Self {
        Self::RemoveStatus(RemoveStatusEffect { target, status })
    }

    pub fn apply_ailment(target: TargetRef, ailment: AilmentId, skill_multiplier: f64) -> Self {
        Self::ApplyAilment(ApplyAilmentEffect {
            target,
            ailment,
            skill_multiplier,
        })
    }

    pub fn deposit_ailment(target: TargetRef, ailment: AilmentId, amount: u32) -> Self {
        Self::DepositAilmentCounters(DepositAilmentEffect {
            target,
            ailment,
            amount,
        })
    }

    pub fn clear_ailments(target: TargetRef, ailment: Option<AilmentId>) -> Self {
        Self::ClearAilmentCounters(ClearAilmentEffect { target, ailment })
    }

    pub fn turn_phase(target: TargetRef, phase: TurnPhase) -> Self {
        Self::TurnPhase(TurnPhaseEffect { target, phase })
    }

    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(MessageEffect { text: text.into() })
    }

    pub fn juice(signature: impl Into<String>, position: Option<Position>) -> Self {
        Self::Juice(JuiceEffect {
            signature: signature.into(),
            position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_kind_has_a_distinct_name() {
        let names: std::collections::BTreeSet<_> =
            EffectKind::iter().map(|k| k.to_string()).collect();
        assert_eq!(names.len(), 17);
        assert!(names.contains("DepositAilmentCounters"));
    }

    #[test]
    fn kind_matches_variant() {
        let effect = AtomicEffect::deposit_ailment(TargetRef::Target, AilmentId::Wet, 2);
        assert_eq!(effect.kind(), EffectKind::DepositAilmentCounters);
        assert_eq!(effect.target(), Some(TargetRef::Target));
        assert_eq!(AtomicEffect::message("hi").target(), None);
    }
}
