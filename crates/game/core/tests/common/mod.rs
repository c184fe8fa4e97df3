//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use tactics_core::{
    Actor, AilmentCatalog, AilmentDefinition, AilmentId, BaseTile, DamageElement, EffectEngine,
    EntityId, Faction, GameConfig, GameState, HardeningSpec, Position, StatKind, TickFormula,
    TickSpec, TileEffectRegistry, TileMap, TurnPhase,
};

/// Burn and Wet, with water dousing fire one-for-one.
pub fn catalog() -> AilmentCatalog {
    let burn = AilmentDefinition::new(AilmentId::Burn, StatKind::Mind, StatKind::Body)
        .with_deposit(2.0, 0.0)
        .with_element(DamageElement::Fire)
        .with_tick(TickSpec {
            phase: TurnPhase::End,
            damage: TickFormula::per_counter(1.0),
            decay: TickFormula::constant(1),
        })
        .with_hardening(HardeningSpec {
            tick_xp_rate: 1.0,
            shock_xp_rate: 1.0,
            resistance_cap_pct: 30.0,
            xp_to_resistance: 10.0,
        });
    let wet = AilmentDefinition::new(AilmentId::Wet, StatKind::Mind, StatKind::Instinct)
        .with_interaction(AilmentId::Burn, 1.0, 0)
        .with_hardening(HardeningSpec {
            shock_xp_rate: 1.0,
            resistance_cap_pct: 50.0,
            ..HardeningSpec::default()
        });
    AilmentCatalog::new(vec![burn, wet]).expect("fixture catalog is valid")
}

pub fn engine() -> EffectEngine {
    engine_with(GameConfig::default(), catalog())
}

pub fn engine_with(config: GameConfig, catalog: AilmentCatalog) -> EffectEngine {
    EffectEngine::new(
        config,
        Arc::new(catalog),
        Arc::new(TileEffectRegistry::standard()),
    )
}

/// Floor map of `width × height` plus a spare row where the player waits.
pub fn arena(width: u32, height: u32) -> GameState {
    let parking = Position::new(width as i32 - 1, height as i32);
    let player = Actor::new(EntityId::PLAYER, "hero", Faction::Player, parking, 30);
    GameState::new("arena")
        .with_map(TileMap::filled(width, height + 1, BaseTile::Floor))
        .with_player(player)
}

pub fn grunt(id: u32, q: i32, r: i32) -> Actor {
    Actor::new(EntityId(id), format!("grunt{id}"), Faction::Enemy, Position::new(q, r), 20)
}

pub fn position_of(state: &GameState, id: u32) -> Option<Position> {
    state.actor(EntityId(id)).map(Actor::position)
}
