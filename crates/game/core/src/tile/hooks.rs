//! Per-effect-state tile hooks and their injected registry.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::{TileHookResult, TileMutation};
use crate::effect::{AtomicEffect, TargetRef};
use crate::state::{Actor, AilmentId, DamageElement, StatusKind, Tile, TileEffectId, TileEffectState};

/// Everything a hook may look at when it fires.
#[derive(Clone, Copy, Debug)]
pub struct HookContext<'a> {
    pub actor: &'a Actor,
    pub tile: &'a Tile,
    /// The effect-state this hook is evaluated for.
    pub state: &'a TileEffectState,
    /// Momentum after the rules evaluated so far on this tile.
    pub momentum: u32,
}

impl HookContext<'_> {
    fn target(&self) -> TargetRef {
        TargetRef::Actor(self.actor.id)
    }
}

/// Behavior of one tile effect-state id.
///
/// Each phase defaults to "nothing happens". A hook returns `None` when it has
/// nothing to contribute for the phase.
pub trait TileEffectHook: Send + Sync {
    fn id(&self) -> TileEffectId;

    fn on_pass(&self, _ctx: &HookContext<'_>) -> Option<TileHookResult> {
        None
    }

    fn on_enter(&self, _ctx: &HookContext<'_>) -> Option<TileHookResult> {
        None
    }

    fn on_stay(&self, _ctx: &HookContext<'_>) -> Option<TileHookResult> {
        None
    }
}

/// Immutable lookup table from effect-state id to hook.
#[derive(Clone, Default)]
pub struct TileEffectRegistry {
    hooks: BTreeMap<TileEffectId, Arc<dyn TileEffectHook>>,
}

impl TileEffectRegistry {
    /// Registry without any hooks: effect-states are inert.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in fire, oil, web, miasma and frost hooks.
    pub fn standard() -> Self {
        Self::new()
            .with_hook(FireHook)
            .with_hook(OilHook)
            .with_hook(WebHook)
            .with_hook(MiasmaHook)
            .with_hook(FrostHook)
    }

    /// Registers a hook, replacing any previous hook for the same id.
    pub fn with_hook(mut self, hook: impl TileEffectHook + 'static) -> Self {
        self.hooks.insert(hook.id(), Arc::new(hook));
        self
    }

    pub fn get(&self, id: TileEffectId) -> Option<&dyn TileEffectHook> {
        self.hooks.get(&id).map(|hook| hook.as_ref())
    }

    pub fn ids(&self) -> impl Iterator<Item = TileEffectId> + '_ {
        self.hooks.keys().copied()
    }
}

impl fmt::Debug for TileEffectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileEffectRegistry")
            .field("hooks", &self.hooks.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// Standard hooks
// ============================================================================

/// Burning ground: scorches and deposits burn.
#[derive(Clone, Copy, Debug, Default)]
pub struct FireHook;

impl FireHook {
    fn scorch(ctx: &HookContext<'_>) -> TileHookResult {
        let potency = ctx.state.potency;
        TileHookResult::none()
            .with_effect(AtomicEffect::damage(ctx.target(), potency, DamageElement::Fire))
            .with_effect(AtomicEffect::deposit_ailment(
                ctx.target(),
                AilmentId::Burn,
                potency,
            ))
            .with_message(format!("{} is scorched by flames.", ctx.actor.name))
    }
}

impl TileEffectHook for FireHook {
    fn id(&self) -> TileEffectId {
        TileEffectId::Fire
    }

    fn on_pass(&self, ctx: &HookContext<'_>) -> Option<TileHookResult> {
        Some(TileHookResult::none().with_effect(AtomicEffect::deposit_ailment(
            ctx.target(),
            AilmentId::Burn,
            ctx.state.potency,
        )))
    }

    fn on_enter(&self, ctx: &HookContext<'_>) -> Option<TileHookResult> {
        Some(Self::scorch(ctx))
    }

    fn on_stay(&self, ctx: &HookContext<'_>) -> Option<TileHookResult> {
        Some(Self::scorch(ctx))
    }
}

/// Oil slick: preserves momentum through it; landing smears the slick away.
#[derive(Clone, Copy, Debug, Default)]
pub struct OilHook;

impl TileEffectHook for OilHook {
    fn id(&self) -> TileEffectId {
        TileEffectId::Oil
    }

    fn on_pass(&self, ctx: &HookContext<'_>) -> Option<TileHookResult> {
        if ctx.actor.is_airborne() {
            return None;
        }
        Some(TileHookResult::none().with_momentum(ctx.momentum))
    }

    fn on_enter(&self, ctx: &HookContext<'_>) -> Option<TileHookResult> {
        if ctx.actor.is_airborne() {
            return None;
        }
        Some(
            TileHookResult::none()
                .with_message(format!("{} slips through the oil.", ctx.actor.name))
                .with_mutation(TileMutation::RemoveEffect(TileEffectId::Oil)),
        )
    }
}

/// Web: catches anything walking into it and tears.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebHook;

impl WebHook {
    fn snare(ctx: &HookContext<'_>) -> Option<TileHookResult> {
        if ctx.actor.is_airborne() {
            return None;
        }
        Some(
            TileHookResult::none()
                .with_effect(AtomicEffect::apply_status(
                    ctx.target(),
                    StatusKind::Rooted,
                    1,
                ))
                .with_message(format!("{} is caught in a web.", ctx.actor.name))
                .with_mutation(TileMutation::RemoveEffect(TileEffectId::Web))
                .interrupting(),
        )
    }
}

impl TileEffectHook for WebHook {
    fn id(&self) -> TileEffectId {
        TileEffectId::Web
    }

    fn on_pass(&self, ctx: &HookContext<'_>) -> Option<TileHookResult> {
        Self::snare(ctx)
    }

    fn on_enter(&self, ctx: &HookContext<'_>) -> Option<TileHookResult> {
        Self::snare(ctx)
    }
}

/// Toxic cloud lingering over a tile.
#[derive(Clone, Copy, Debug, Default)]
pub struct MiasmaHook;

impl MiasmaHook {
    fn choke(ctx: &HookContext<'_>) -> Option<TileHookResult> {
        Some(TileHookResult::none().with_effect(AtomicEffect::deposit_ailment(
            ctx.target(),
            AilmentId::Poison,
            ctx.state.potency,
        )))
    }
}

impl TileEffectHook for MiasmaHook {
    fn id(&self) -> TileEffectId {
        TileEffectId::Miasma
    }

    fn on_enter(&self, ctx: &HookContext<'_>) -> Option<TileHookResult> {
        Self::choke(ctx)
    }

    fn on_stay(&self, ctx: &HookContext<'_>) -> Option<TileHookResult> {
        Self::choke(ctx)
    }
}

/// Frosted ground: slick to cross, numbing to stand on.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrostHook;

impl FrostHook {
    fn chill(ctx: &HookContext<'_>) -> Option<TileHookResult> {
        if ctx.actor.is_airborne() {
            return None;
        }
        Some(TileHookResult::none().with_effect(AtomicEffect::deposit_ailment(
            ctx.target(),
            AilmentId::Frozen,
            ctx.state.potency,
        )))
    }
}

impl TileEffectHook for FrostHook {
    fn id(&self) -> TileEffectId {
        TileEffectId::Frost
    }

    fn on_pass(&self, ctx: &HookContext<'_>) -> Option<TileHookResult> {
        if ctx.actor.is_airborne() {
            return None;
        }
        Some(TileHookResult::none().with_momentum(ctx.momentum))
    }

    fn on_enter(&self, ctx: &HookContext<'_>) -> Option<TileHookResult> {
        Self::chill(ctx)
    }

    fn on_stay(&self, ctx: &HookContext<'_>) -> Option<TileHookResult> {
        Self::chill(ctx)
    }
}
