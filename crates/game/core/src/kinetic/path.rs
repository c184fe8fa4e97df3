//! Single-actor displacement: teleports, simulated paths and slides.

use super::{Board, DisplacementOutcome, DisplacementRequest, Triggered};
use crate::effect::{AtomicEffect, TargetRef};
use crate::state::{Actor, EntityId, HexDirection, Position, hex_line};
use crate::tile::{MovePhase, TileHookResult};

/// Resolves moving `actor` as described by `request`.
///
/// Returns `None` when the actor is not on the board.
pub fn resolve_displacement(
    board: &Board<'_>,
    actor: EntityId,
    request: &DisplacementRequest,
) -> Option<DisplacementOutcome> {
    let mover = board.state.actor(actor)?;
    let outcome = if request.simulate_path {
        simulate(board, mover, request)
    } else {
        teleport(board, mover, request)
    };
    Some(outcome)
}

fn teleport(board: &Board<'_>, actor: &Actor, request: &DisplacementRequest) -> DisplacementOutcome {
    let origin = actor.position();
    let destination = request.destination;
    let mut outcome = DisplacementOutcome::stationary(actor.id, origin, 0);

    if destination == origin
        || !board.is_walkable(destination)
        || board.blocker(destination, actor.id).is_some()
    {
        return outcome;
    }

    outcome.final_position = destination;
    outcome.traversed.push(destination);
    if !request.ignore_ground_hazards {
        let result = board.consult(actor, destination, MovePhase::Enter, 0);
        outcome.interrupted = outcome.triggered.absorb(destination, result);
    }
    outcome
}

fn walk_path(origin: Position, request: &DisplacementRequest) -> Vec<Position> {
    match &request.path {
        Some(path) => {
            let skip = usize::from(path.first() == Some(&origin));
            path[skip..].to_vec()
        }
        None => hex_line(origin, request.destination).into_iter().skip(1).collect(),
    }
}

fn simulate(board: &Board<'_>, actor: &Actor, request: &DisplacementRequest) -> DisplacementOutcome {
    let id = actor.id;
    let origin = actor.position();
    let path = walk_path(origin, request);

    let mut triggered = Triggered::default();
    let mut passes: Vec<(Position, u32, TileHookResult)> = Vec::new();
    let mut traversed = Vec::new();
    let mut momentum = request.momentum;
    let mut interrupted = false;
    let mut blocked = false;

    let mut previous = origin;
    let mut current = origin;
    let mut last_free = origin;

    for (index, &hex) in path.iter().enumerate() {
        if !board.is_walkable(hex) {
            blocked = true;
            break;
        }
        if let Some(other) = board.blocker(hex, id) {
            if !request.ignore_collisions {
                blocked = true;
                if momentum > 0
                    && let Some(direction) = HexDirection::between(current, hex)
                {
                    triggered.effects.push(AtomicEffect::kinetic_push(
                        TargetRef::Actor(other),
                        direction,
                        momentum,
                    ));
                    momentum = 0;
                }
                break;
            }
        } else {
            last_free = hex;
        }

        previous = current;
        current = hex;
        traversed.push(hex);

        let terminal = index + 1 == path.len();
        if terminal || request.ignore_ground_hazards {
            continue;
        }
        let result = board.consult(actor, hex, MovePhase::Pass, momentum);
        let before = momentum;
        if let Some(revised) = result.momentum {
            momentum = revised;
        }
        let interrupt = result.interrupt;
        passes.push((hex, before, result));
        if interrupt {
            interrupted = true;
            break;
        }
    }

    // Never end on someone else's hex.
    let backed_off = board.blocker(current, id).is_some();
    let mut rest = if backed_off { last_free } else { current };
    let enters = rest != origin && !interrupted && !request.ignore_ground_hazards;

    // A hex the walk stops on early gets `Enter` instead of `Pass`.
    let last_pass = passes.len().checked_sub(1);
    for (index, (hex, before, result)) in passes.into_iter().enumerate() {
        if enters && hex == rest {
            if Some(index) == last_pass {
                momentum = before;
            }
            continue;
        }
        triggered.absorb(hex, result);
    }

    if enters {
        let result = board.consult(actor, rest, MovePhase::Enter, momentum);
        if let Some(revised) = result.momentum {
            momentum = revised;
        }
        interrupted = triggered.absorb(rest, result);
    }

    if !interrupted && !blocked && !backed_off && momentum > 0 && rest != origin {
        let direction =
            HexDirection::between(previous, rest).or_else(|| HexDirection::toward(origin, rest));
        if let Some(direction) = direction {
            let slide = slide(board, actor, rest, direction, momentum, request.ignore_ground_hazards);
            rest = slide.rest;
            momentum = slide.momentum;
            interrupted = slide.interrupted;
            traversed.extend(slide.traversed);
            triggered.effects.extend(slide.triggered.effects);
            triggered.messages.extend(slide.triggered.messages);
            triggered.tile_mutations.extend(slide.triggered.tile_mutations);
        }
    }

    DisplacementOutcome {
        actor: id,
        origin,
        final_position: rest,
        interrupted,
        momentum,
        traversed,
        triggered,
    }
}

struct Slide {
    rest: Position,
    momentum: u32,
    interrupted: bool,
    traversed: Vec<Position>,
    triggered: Triggered,
}

/// Slides one hex per momentum unit in `direction`.
///
/// Stops before walls and the map edge, stops before another actor (handing
/// it the leftover momentum as a kinetic push), and stops on a hazard.
fn slide(
    board: &Board<'_>,
    actor: &Actor,
    start: Position,
    direction: HexDirection,
    momentum: u32,
    ignore_hazards: bool,
) -> Slide {
    let mut slide = Slide {
        rest: start,
        momentum,
        interrupted: false,
        traversed: Vec::new(),
        triggered: Triggered::default(),
    };
    let mut steps = 0;
    let mut entered = false;

    while slide.momentum > 0 && steps < board.config.max_slide_steps {
        let next = slide.rest.neighbor(direction);
        if !board.is_walkable(next) {
            break;
        }
        if let Some(other) = board.blocker(next, actor.id) {
            slide.triggered.effects.push(AtomicEffect::kinetic_push(
                TargetRef::Actor(other),
                direction,
                slide.momentum,
            ));
            slide.momentum = 0;
            break;
        }

        slide.rest = next;
        slide.traversed.push(next);
        steps += 1;

        if ignore_hazards {
            slide.momentum -= 1;
            continue;
        }

        let hazardous = board.tile(next).is_some_and(|t| t.is_hazardous());
        if hazardous && !actor.is_airborne() {
            let result = board.consult(actor, next, MovePhase::Enter, slide.momentum);
            slide.interrupted = slide.triggered.absorb(next, result);
            slide.momentum = 0;
            entered = true;
            break;
        }

        let pass = board.consult(actor, next, MovePhase::Pass, slide.momentum);
        let after = pass.momentum.unwrap_or(slide.momentum - 1);
        if pass.interrupt {
            slide.triggered.absorb(next, pass);
            slide.interrupted = true;
            slide.momentum = after;
            entered = true;
            break;
        }
        slide.momentum = after;

        // The hex the slide comes to rest on gets `Enter` instead of `Pass`.
        let ahead = next.neighbor(direction);
        let resting = slide.momentum == 0
            || steps >= board.config.max_slide_steps
            || !board.is_walkable(ahead)
            || board.blocker(ahead, actor.id).is_some();
        if !resting {
            slide.triggered.absorb(next, pass);
        }
    }

    if steps > 0 && !entered && !ignore_hazards {
        let result = board.consult(actor, slide.rest, MovePhase::Enter, slide.momentum);
        slide.interrupted = slide.triggered.absorb(slide.rest, result);
    }

    slide
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::kinetic::testing::{board, enemy, floor};
    use crate::state::{
        AilmentId, BaseTile, DamageElement, StatusKind, TileEffectId, TileEffectState,
    };
    use crate::tile::TileEffectRegistry;

    fn resolve(
        state: &crate::state::GameState,
        actor: u32,
        request: &DisplacementRequest,
    ) -> DisplacementOutcome {
        let config = GameConfig::default();
        let registry = TileEffectRegistry::standard();
        resolve_displacement(&board(state, &config, &registry), EntityId(actor), request)
            .unwrap_or_else(|| panic!("actor {actor} missing"))
    }

    #[test]
    fn teleport_into_wall_stays_put() {
        let mut state = floor(6, 3).with_actor(enemy(1, 1, 1));
        state.map.set_base(Position::new(4, 1), BaseTile::Wall);

        let outcome = resolve(&state, 1, &DisplacementRequest::teleport(Position::new(4, 1)));
        assert!(!outcome.moved());

        let outcome = resolve(&state, 1, &DisplacementRequest::teleport(Position::new(3, 1)));
        assert_eq!(outcome.final_position, Position::new(3, 1));
    }

    #[test]
    fn lava_on_path_interrupts() {
        let mut state = floor(8, 1).with_actor(enemy(1, 0, 0));
        state.map.set_base(Position::new(2, 0), BaseTile::Lava);

        let outcome = resolve(
            &state,
            1,
            &DisplacementRequest::simulated(Position::new(5, 0)).with_momentum(2),
        );
        assert!(outcome.interrupted);
        assert_eq!(outcome.final_position, Position::new(2, 0));
        assert_eq!(outcome.traversed, vec![Position::new(1, 0), Position::new(2, 0)]);
        assert_eq!(
            outcome.triggered.effects,
            vec![AtomicEffect::damage(
                TargetRef::Actor(EntityId(1)),
                GameConfig::DEFAULT_HAZARD_DAMAGE,
                DamageElement::Fire,
            )]
        );
    }

    #[test]
    fn collision_stops_before_occupant_and_transfers_momentum() {
        let state = floor(8, 1).with_actor(enemy(1, 0, 0)).with_actor(enemy(2, 3, 0));

        let outcome = resolve(
            &state,
            1,
            &DisplacementRequest::simulated(Position::new(5, 0)).with_momentum(2),
        );
        assert_eq!(outcome.final_position, Position::new(2, 0));
        assert_eq!(
            outcome.triggered.effects,
            vec![AtomicEffect::kinetic_push(
                TargetRef::Actor(EntityId(2)),
                HexDirection::East,
                2,
            )]
        );
    }

    #[test]
    fn ghosting_never_ends_on_an_occupant() {
        let state = floor(8, 1).with_actor(enemy(1, 0, 0)).with_actor(enemy(2, 3, 0));

        let through = resolve(
            &state,
            1,
            &DisplacementRequest::simulated(Position::new(5, 0)).ignoring_collisions(),
        );
        assert_eq!(through.final_position, Position::new(5, 0));

        let onto = resolve(
            &state,
            1,
            &DisplacementRequest::simulated(Position::new(3, 0)).ignoring_collisions(),
        );
        assert_eq!(onto.final_position, Position::new(2, 0));
    }

    #[test]
    fn momentum_slides_past_terminus() {
        let state = floor(10, 1).with_actor(enemy(1, 0, 0));
        let outcome = resolve(
            &state,
            1,
            &DisplacementRequest::simulated(Position::new(2, 0)).with_momentum(3),
        );
        assert_eq!(outcome.final_position, Position::new(5, 0));
        assert_eq!(outcome.momentum, 0);
    }

    #[test]
    fn slide_stops_before_wall() {
        let mut state = floor(10, 1).with_actor(enemy(1, 0, 0));
        state.map.set_base(Position::new(4, 0), BaseTile::Wall);

        let outcome = resolve(
            &state,
            1,
            &DisplacementRequest::simulated(Position::new(1, 0)).with_momentum(6),
        );
        assert_eq!(outcome.final_position, Position::new(3, 0));
        assert_eq!(outcome.momentum, 4);
    }

    #[test]
    fn ice_preserves_and_water_drags() {
        let mut state = floor(12, 1).with_actor(enemy(1, 0, 0));
        for q in 2..5 {
            state.map.set_base(Position::new(q, 0), BaseTile::Ice);
        }
        let outcome = resolve(
            &state,
            1,
            &DisplacementRequest::simulated(Position::new(1, 0)).with_momentum(2),
        );
        // Three free ice hexes, then two floor hexes.
        assert_eq!(outcome.final_position, Position::new(6, 0));

        let mut wet = floor(12, 1).with_actor(enemy(1, 0, 0));
        wet.map.set_base(Position::new(2, 0), BaseTile::Water);
        let outcome = resolve(
            &wet,
            1,
            &DisplacementRequest::simulated(Position::new(1, 0)).with_momentum(3),
        );
        assert_eq!(outcome.final_position, Position::new(4, 0));
    }

    #[test]
    fn slide_stops_on_hazard() {
        let mut state = floor(10, 1).with_actor(enemy(1, 0, 0));
        state.map.set_base(Position::new(3, 0), BaseTile::Pit);

        let outcome = resolve(
            &state,
            1,
            &DisplacementRequest::simulated(Position::new(1, 0)).with_momentum(5),
        );
        assert_eq!(outcome.final_position, Position::new(3, 0));
        assert!(outcome.interrupted);
        assert_eq!(outcome.triggered.effects.len(), 1);
    }

    #[test]
    fn web_on_path_roots_and_tears() {
        let mut state = floor(8, 1).with_actor(enemy(1, 0, 0));
        if let Some(tile) = state.map.tile_mut(Position::new(2, 0)) {
            tile.add_effect(TileEffectState::new(TileEffectId::Web, 3, 1));
        }

        let outcome = resolve(&state, 1, &DisplacementRequest::simulated(Position::new(5, 0)));
        assert!(outcome.interrupted);
        assert_eq!(outcome.final_position, Position::new(2, 0));
        assert_eq!(
            outcome.triggered.effects,
            vec![AtomicEffect::apply_status(
                TargetRef::Actor(EntityId(1)),
                StatusKind::Rooted,
                1,
            )]
        );
        assert_eq!(outcome.triggered.tile_mutations.len(), 1);
    }

    #[test]
    fn blocked_walk_enters_its_rest_hex_without_passing_it() {
        let mut state = floor(8, 1)
            .with_actor(enemy(1, 0, 0))
            .with_actor(enemy(2, 3, 0));
        if let Some(tile) = state.map.tile_mut(Position::new(2, 0)) {
            tile.add_effect(TileEffectState::new(TileEffectId::Fire, 3, 2));
        }

        let outcome = resolve(&state, 1, &DisplacementRequest::simulated(Position::new(5, 0)));
        let target = TargetRef::Actor(EntityId(1));
        assert_eq!(outcome.final_position, Position::new(2, 0));
        assert_eq!(
            outcome.triggered.effects,
            vec![
                AtomicEffect::damage(target, 2, DamageElement::Fire),
                AtomicEffect::deposit_ailment(target, AilmentId::Burn, 2),
            ]
        );
    }

    #[test]
    fn walk_through_fire_only_passes_it() {
        let mut state = floor(8, 1).with_actor(enemy(1, 0, 0));
        if let Some(tile) = state.map.tile_mut(Position::new(2, 0)) {
            tile.add_effect(TileEffectState::new(TileEffectId::Fire, 3, 2));
        }

        let outcome = resolve(&state, 1, &DisplacementRequest::simulated(Position::new(5, 0)));
        assert_eq!(outcome.final_position, Position::new(5, 0));
        assert_eq!(
            outcome.triggered.effects,
            vec![AtomicEffect::deposit_ailment(
                TargetRef::Actor(EntityId(1)),
                AilmentId::Burn,
                2,
            )]
        );
    }

    #[test]
    fn ghost_backing_off_enters_the_last_free_hex_once() {
        let mut state = floor(8, 1)
            .with_actor(enemy(1, 0, 0))
            .with_actor(enemy(2, 3, 0));
        if let Some(tile) = state.map.tile_mut(Position::new(2, 0)) {
            tile.add_effect(TileEffectState::new(TileEffectId::Fire, 3, 2));
        }

        let request = DisplacementRequest::simulated(Position::new(3, 0)).ignoring_collisions();
        let outcome = resolve(&state, 1, &request);
        assert_eq!(outcome.final_position, Position::new(2, 0));
        assert_eq!(outcome.triggered.effects.len(), 2);
    }
}
