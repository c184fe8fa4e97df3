//! Atomic effect dispatcher.
//!
//! [`EffectEngine`] is the single entry point for state changes. It owns the
//! injected content tables and applies effect lists against a working copy of
//! the caller's state.
//!
//! # Ordering
//!
//! Effects in one list apply left to right. Anything a handler emits is
//! pushed onto an explicit work stack and resolves depth-first before the
//! next sibling, so cascade order never depends on native recursion depth.

mod api;
mod registry;

pub use api::HandlerApi;
pub use registry::HandlerRegistry;

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::ailment::AilmentCatalog;
use crate::config::GameConfig;
use crate::effect::{AtomicEffect, EffectContext};
use crate::skill::{Skill, SkillError};
use crate::state::{EntityId, GameState, Position, StatusKind, TimelineEvent};
use crate::tile::TileEffectRegistry;

/// Pending effect on the work stack.
struct WorkItem {
    effect: AtomicEffect,
    context: EffectContext,
    depth: u32,
}

/// Effect dispatcher with explicitly injected tables.
#[derive(Clone, Debug)]
pub struct EffectEngine {
    config: GameConfig,
    ailments: Arc<AilmentCatalog>,
    tile_effects: Arc<TileEffectRegistry>,
    handlers: HandlerRegistry,
}

impl EffectEngine {
    /// Creates an engine with every built-in handler registered.
    pub fn new(
        config: GameConfig,
        ailments: Arc<AilmentCatalog>,
        tile_effects: Arc<TileEffectRegistry>,
    ) -> Self {
        Self {
            config,
            ailments,
            tile_effects,
            handlers: HandlerRegistry::standard(),
        }
    }

    pub fn with_handlers(mut self, handlers: HandlerRegistry) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ailments(&self) -> &AilmentCatalog {
        &self.ailments
    }

    pub fn tile_effects(&self) -> &TileEffectRegistry {
        &self.tile_effects
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Applies `effects` in order and returns the resulting state.
    ///
    /// `state` is never modified.
    pub fn apply_effects(
        &self,
        state: &GameState,
        effects: &[AtomicEffect],
        context: &EffectContext,
    ) -> GameState {
        let mut working = state.clone();
        working.refresh_occupancy();
        self.resolve(&mut working, effects, context);
        working
    }

    pub fn apply_atomic_effect(
        &self,
        state: &GameState,
        effect: &AtomicEffect,
        context: &EffectContext,
    ) -> GameState {
        self.apply_effects(state, std::slice::from_ref(effect), context)
    }

    /// Runs a skill against `target` on behalf of `caster`.
    ///
    /// The effects resolve under a context whose `step_id` is the skill id. A
    /// skill that consumes the turn advances `turn_number`.
    pub fn execute_skill(
        &self,
        state: &GameState,
        skill: &dyn Skill,
        caster: EntityId,
        target: Position,
    ) -> Result<GameState, SkillError> {
        let actor = state
            .actor(caster)
            .ok_or(SkillError::UnknownCaster(caster))?;
        if actor.statuses.has(StatusKind::Silenced) {
            return Err(SkillError::Silenced {
                skill: skill.id().to_owned(),
                caster,
            });
        }
        if !skill.valid_targets(state, caster).contains(&target) {
            return Err(SkillError::InvalidTarget {
                skill: skill.id().to_owned(),
                target,
            });
        }

        let execution = skill.execute(state, caster, target);
        let context = EffectContext::new(Some(caster), state.actor_at(target)).with_step(skill.id());

        let mut next = self.apply_effects(state, &execution.effects, &context);
        if execution.consumes_turn {
            next.turn_number += 1;
        }
        Ok(next)
    }

    /// Drains the work stack against `state`.
    pub(crate) fn resolve(
        &self,
        state: &mut GameState,
        effects: &[AtomicEffect],
        context: &EffectContext,
    ) {
        let mut stack: Vec<WorkItem> = effects
            .iter()
            .rev()
            .map(|effect| WorkItem {
                effect: effect.clone(),
                context: context.clone(),
                depth: 0,
            })
            .collect();

        while let Some(item) = stack.pop() {
            let kind = item.effect.kind();
            if item.depth > self.config.max_cascade_depth {
                warn!(
                    %kind,
                    depth = item.depth,
                    limit = self.config.max_cascade_depth,
                    "cascade depth exceeded, dropping effect"
                );
                continue;
            }
            if !self.handlers.is_registered(kind) {
                debug!(%kind, "no handler registered, skipping effect");
                continue;
            }

            trace!(%kind, depth = item.depth, step = ?item.context.step_id, "applying effect");

            let emitted = {
                let mut api = HandlerApi::new(state, self, &item.context, item.depth);
                let target = item.effect.target().and_then(|t| api.resolve(&t));
                api.push_timeline(TimelineEvent {
                    step_id: item.context.step_id.clone(),
                    kind,
                    depth: item.depth,
                    source: item.context.source_id,
                    target,
                });
                item.effect.apply(&mut api);
                api.into_emitted()
            };

            for (effect, context) in emitted.into_iter().rev() {
                stack.push(WorkItem {
                    effect,
                    context,
                    depth: item.depth + 1,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{EffectKind, SpawnActorEffect, TargetRef, TilePlacement, TileTick};
    use crate::skill::SkillExecution;
    use crate::state::{
        Actor, BaseTile, DamageElement, Faction, GameStatus, SimulationEvent, TileEffectId, TileMap,
        FIRE_ABSORPTION_SKILL,
    };

    fn engine() -> EffectEngine {
        EffectEngine::new(
            GameConfig::default(),
            Arc::new(AilmentCatalog::empty()),
            Arc::new(TileEffectRegistry::standard()),
        )
    }

    fn state() -> GameState {
        GameState::new("engine")
            .with_map(TileMap::filled(5, 5, BaseTile::Floor))
            .with_actor(Actor::new(EntityId(1), "imp", Faction::Enemy, Position::new(2, 0), 6))
    }

    fn imp() -> TargetRef {
        TargetRef::Actor(EntityId(1))
    }

    #[test]
    fn caller_state_is_never_modified() {
        let before = state();
        let next = engine().apply_atomic_effect(
            &before,
            &AtomicEffect::damage(imp(), 2, DamageElement::Physical),
            &EffectContext::default(),
        );
        assert_eq!(before.actor(EntityId(1)).map(|a| a.hp), Some(6));
        assert_eq!(next.actor(EntityId(1)).map(|a| a.hp), Some(4));
    }

    #[test]
    fn armor_absorbs_before_hp() {
        let effects = [
            AtomicEffect::gain_armor(imp(), 3),
            AtomicEffect::damage(imp(), 5, DamageElement::Physical),
        ];
        let next = engine().apply_effects(&state(), &effects, &EffectContext::default());
        let actor = next.actor(EntityId(1)).unwrap();
        assert_eq!(actor.temporary_armor, 0);
        assert_eq!(actor.hp, 4);
    }

    #[test]
    fn lethal_damage_leaves_a_corpse_that_can_be_cleared() {
        let effects = [
            AtomicEffect::damage(imp(), 50, DamageElement::Physical),
            AtomicEffect::RemoveCorpse(crate::effect::RemoveCorpseEffect {
                position: Position::new(2, 0),
            }),
        ];
        let next = engine().apply_effects(&state(), &effects, &EffectContext::default());
        assert!(next.actor(EntityId(1)).is_none());
        assert_eq!(next.kill_count, 1);
        assert!(next.corpses.is_empty());
        assert!(next
            .simulation_events
            .iter()
            .any(|e| matches!(e, SimulationEvent::CorpseRemoved { .. })));
    }

    #[test]
    fn player_death_ends_the_run() {
        let next = engine().apply_atomic_effect(
            &state(),
            &AtomicEffect::damage(TargetRef::Actor(EntityId::PLAYER), 10, DamageElement::Physical),
            &EffectContext::default(),
        );
        assert_eq!(next.status, GameStatus::Lost);
        assert!(next.is_over());
        assert_eq!(next.player.hp, 0);
    }

    #[test]
    fn fire_absorbers_heal_instead() {
        let mut start = state();
        if let Some(actor) = start.actor_mut(EntityId(1)) {
            actor.skills.push(FIRE_ABSORPTION_SKILL.into());
            actor.hp = 2;
        }
        let next = engine().apply_atomic_effect(
            &start,
            &AtomicEffect::damage(imp(), 3, DamageElement::Fire),
            &EffectContext::default(),
        );
        assert_eq!(next.actor(EntityId(1)).map(|a| a.hp), Some(5));
    }

    #[test]
    fn emitted_effects_resolve_before_the_next_sibling() {
        let mut start = state();
        if let Some(actor) = start.actor_mut(EntityId(1)) {
            actor.skills.push(FIRE_ABSORPTION_SKILL.into());
        }
        let effects = [
            AtomicEffect::damage(imp(), 1, DamageElement::Fire),
            AtomicEffect::message("after"),
        ];
        let next = engine().apply_effects(&start, &effects, &EffectContext::default());
        let order: Vec<(EffectKind, u32)> = next.timeline.iter().map(|t| (t.kind, t.depth)).collect();
        assert_eq!(
            order,
            vec![
                (EffectKind::Damage, 0),
                (EffectKind::Heal, 1),
                (EffectKind::Message, 0),
            ]
        );
    }

    #[test]
    fn cascades_past_the_depth_limit_are_dropped() {
        let config = GameConfig {
            max_cascade_depth: 0,
            ..GameConfig::default()
        };
        let engine = EffectEngine::new(
            config,
            Arc::new(AilmentCatalog::empty()),
            Arc::new(TileEffectRegistry::standard()),
        );
        let mut start = state();
        if let Some(actor) = start.actor_mut(EntityId(1)) {
            actor.skills.push(FIRE_ABSORPTION_SKILL.into());
            actor.hp = 2;
        }
        let next = engine.apply_atomic_effect(
            &start,
            &AtomicEffect::damage(imp(), 3, DamageElement::Fire),
            &EffectContext::default(),
        );
        assert_eq!(next.actor(EntityId(1)).map(|a| a.hp), Some(2));
        assert_eq!(next.timeline.len(), 1);
    }

    #[test]
    fn unregistered_kinds_are_skipped() {
        let engine = engine().with_handlers(HandlerRegistry::standard().without(EffectKind::Damage));
        let effects = [
            AtomicEffect::damage(imp(), 3, DamageElement::Physical),
            AtomicEffect::heal(TargetRef::Actor(EntityId::PLAYER), 1),
        ];
        let next = engine.apply_effects(&state(), &effects, &EffectContext::default());
        assert_eq!(next.actor(EntityId(1)).map(|a| a.hp), Some(6));
        assert_eq!(next.timeline.len(), 1);
    }

    #[test]
    fn missing_targets_are_no_ops() {
        let before = state();
        let next = engine().apply_atomic_effect(
            &before,
            &AtomicEffect::damage(TargetRef::Actor(EntityId(99)), 3, DamageElement::Physical),
            &EffectContext::default(),
        );
        assert_eq!(next.actors, before.actors);
        assert!(next.simulation_events.is_empty());
    }

    #[test]
    fn spawn_needs_a_free_walkable_hex() {
        let spawn = |q| {
            AtomicEffect::SpawnActor(SpawnActorEffect::new("wisp", Faction::Companion, Position::new(q, 0), 3))
        };
        let effects = [spawn(2), spawn(3), spawn(9)];
        let next = engine().apply_effects(&state(), &effects, &EffectContext::default());
        assert_eq!(next.actors.len(), 2);
        let wisp = next.actor_at(Position::new(3, 0)).and_then(|id| next.actor(id));
        assert_eq!(wisp.map(|a| a.id), Some(EntityId(2)));
    }

    #[test]
    fn tile_effects_are_placed_and_expire() {
        let at = Position::new(1, 1);
        let effects = [
            AtomicEffect::PlaceTileEffect(TilePlacement::new(at, TileEffectId::Fire, 2, 1)),
            AtomicEffect::TickTileEffects(TileTick::all()),
            AtomicEffect::TickTileEffects(TileTick::at(at)),
        ];
        let next = engine().apply_effects(&state(), &effects, &EffectContext::default());
        assert!(!next.map.tile(at).unwrap().has_effect(TileEffectId::Fire));
        assert!(next.simulation_events.iter().any(|e| matches!(
            e,
            SimulationEvent::TileEffectExpired { effect: TileEffectId::Fire, .. }
        )));
    }

    #[test]
    fn end_phase_ticks_statuses_and_burning_ground() {
        let mut start = state().with_actor(
            Actor::new(EntityId(2), "bat", Faction::Enemy, Position::new(1, 1), 10)
                .with_status(StatusKind::Stunned, 1),
        );
        if let Some(tile) = start.map.tile_mut(Position::new(1, 1)) {
            tile.add_effect(crate::state::TileEffectState::new(TileEffectId::Fire, 3, 2));
        }
        let next = engine().apply_atomic_effect(
            &start,
            &AtomicEffect::turn_phase(TargetRef::Actor(EntityId(2)), crate::state::TurnPhase::End),
            &EffectContext::default(),
        );
        let bat = next.actor(EntityId(2)).unwrap();
        assert!(!bat.statuses.has(StatusKind::Stunned));
        assert_eq!(bat.hp, 8);
    }

    #[test]
    fn juice_and_messages_are_only_recorded() {
        let context = EffectContext::default().with_step("blast");
        let effects = [
            AtomicEffect::juice("shake", Some(Position::new(1, 0))),
            AtomicEffect::message("Boom."),
        ];
        let before = state();
        let next = engine().apply_effects(&before, &effects, &context);
        assert_eq!(next.visual_events.len(), 1);
        assert_eq!(next.visual_events[0].step_id.as_deref(), Some("blast"));
        assert_eq!(next.message_log, vec!["Boom.".to_string()]);
        assert_eq!(next.actors, before.actors);
    }

    struct Jab;

    impl Skill for Jab {
        fn id(&self) -> &str {
            "jab"
        }

        fn valid_targets(&self, state: &GameState, caster: EntityId) -> Vec<Position> {
            state
                .actor(caster)
                .map(|a| a.position().neighbors().collect())
                .unwrap_or_default()
        }

        fn execute(&self, _: &GameState, _: EntityId, _: Position) -> SkillExecution {
            SkillExecution::new(vec![AtomicEffect::damage(
                TargetRef::Target,
                2,
                DamageElement::Physical,
            )])
        }
    }

    #[test]
    fn skills_validate_targets_and_consume_the_turn() {
        let engine = engine();
        let start = state().with_actor(Actor::new(EntityId(2), "rat", Faction::Enemy, Position::new(1, 0), 4));

        let next = engine
            .execute_skill(&start, &Jab, EntityId::PLAYER, Position::new(1, 0))
            .unwrap();
        assert_eq!(next.actor(EntityId(2)).map(|a| a.hp), Some(2));
        assert_eq!(next.turn_number, 1);
        assert_eq!(next.timeline[0].step_id.as_deref(), Some("jab"));

        let err = engine
            .execute_skill(&start, &Jab, EntityId::PLAYER, Position::new(3, 0))
            .unwrap_err();
        assert!(matches!(err, SkillError::InvalidTarget { .. }));

        let mut silenced = start.clone();
        silenced.player.statuses.add(StatusKind::Silenced, 2);
        assert!(matches!(
            engine.execute_skill(&silenced, &Jab, EntityId::PLAYER, Position::new(1, 0)),
            Err(SkillError::Silenced { .. })
        ));
    }
}
