//! Chained cluster pushes.

use super::{Board, KineticOutcome};
use crate::effect::{AtomicEffect, TargetRef};
use crate::state::{EntityId, HexDirection, Position, StatusKind};
use crate::tile::{MovePhase, TileHookResult};

/// One cluster member during simulation.
#[derive(Clone, Copy)]
struct Member {
    id: EntityId,
    origin: Position,
    position: Position,
}

/// Pushes `target` one hex per momentum unit in `direction`.
///
/// The contiguous run of actors in front of the target moves with it as a
/// cluster. Actors met on the way join the cluster as the new lead and the
/// momentum carries on through them. If the cluster cannot advance at all,
/// nothing moves and every member is stunned for `wall_slam_stun` turns.
///
/// Returns `None` when the target is not on the board.
pub fn resolve_kinetic_push(
    board: &Board<'_>,
    target: EntityId,
    direction: HexDirection,
    momentum: u32,
) -> Option<KineticOutcome> {
    let actor = board.state.actor(target)?;
    let mut outcome = KineticOutcome {
        momentum,
        ..KineticOutcome::default()
    };
    if momentum == 0 || board.is_anchored(target) {
        return Some(outcome);
    }

    let start = actor.position();
    let mut members = vec![Member {
        id: target,
        origin: start,
        position: start,
    }];
    absorb_ahead(board, &mut members, direction);

    if advance_blocked(board, lead(&members), direction) {
        slam(board, &members, &mut outcome);
        return Some(outcome);
    }

    let mut remaining = momentum;
    let mut steps = 0;
    let mut interrupted_members = Vec::new();

    while remaining > 0 && steps < board.config.max_slide_steps {
        absorb_ahead(board, &mut members, direction);
        let ahead = lead(&members).neighbor(direction);
        if !board.is_walkable(ahead) || board.state.is_occupied(ahead) {
            break;
        }

        for member in members.iter_mut() {
            member.position = member.position.neighbor(direction);
        }
        steps += 1;

        // Lead first.
        let passes: Vec<(EntityId, Position, TileHookResult)> = members
            .iter()
            .rev()
            .filter_map(|m| {
                let actor = board.state.actor(m.id)?;
                let result = board.consult(actor, m.position, MovePhase::Pass, remaining);
                Some((m.id, m.position, result))
            })
            .collect();

        let revised = passes.iter().filter_map(|(_, _, r)| r.momentum).min();
        remaining = revised.unwrap_or(remaining - 1);
        let any_interrupt = passes.iter().any(|(_, _, r)| r.interrupt);

        let resting = any_interrupt
            || remaining == 0
            || steps >= board.config.max_slide_steps
            || advance_blocked(board, lead(&members), direction);

        if !resting {
            for (_, position, result) in passes {
                outcome.triggered.absorb(position, result);
            }
            continue;
        }

        // Hexes the cluster rests on get `Enter` below; only interrupting
        // passes are kept.
        for (id, position, result) in passes {
            if result.interrupt {
                outcome.triggered.absorb(position, result);
                interrupted_members.push(id);
            }
        }
        outcome.interrupted = any_interrupt;
        break;
    }

    if steps > 0 {
        for member in members.iter().rev() {
            if interrupted_members.contains(&member.id) {
                continue;
            }
            let Some(actor) = board.state.actor(member.id) else {
                continue;
            };
            let result = board.consult(actor, member.position, MovePhase::Enter, remaining);
            if outcome.triggered.absorb(member.position, result) {
                outcome.interrupted = true;
            }
        }
    }

    outcome.steps = steps;
    outcome.momentum = remaining;
    outcome.moves = members
        .iter()
        .rev()
        .filter(|m| m.origin != m.position)
        .map(|m| (m.id, m.origin, m.position))
        .collect();
    Some(outcome)
}

fn lead(members: &[Member]) -> Position {
    members.last().map_or(Position::ORIGIN, |m| m.position)
}

/// Adds every contiguous, movable actor in front of the lead to the cluster.
fn absorb_ahead(board: &Board<'_>, members: &mut Vec<Member>, direction: HexDirection) {
    loop {
        let ahead = lead(members).neighbor(direction);
        let Some(id) = board.state.actor_at(ahead) else {
            return;
        };
        if board.is_anchored(id) || members.iter().any(|m| m.id == id) {
            return;
        }
        members.push(Member {
            id,
            origin: ahead,
            position: ahead,
        });
    }
}

/// True when no free hex can be reached in front of `lead`: the run of actors
/// ahead ends at a wall, the map edge or an anchored actor.
fn advance_blocked(board: &Board<'_>, lead: Position, direction: HexDirection) -> bool {
    let mut cursor = lead.neighbor(direction);
    loop {
        if !board.is_walkable(cursor) {
            return true;
        }
        match board.state.actor_at(cursor) {
            None => return false,
            Some(id) if board.is_anchored(id) => return true,
            Some(_) => cursor = cursor.neighbor(direction),
        }
    }
}

fn slam(board: &Board<'_>, members: &[Member], outcome: &mut KineticOutcome) {
    let stun = board.config.wall_slam_stun;
    for member in members.iter().rev() {
        outcome.stunned.push(member.id);
        outcome.triggered.effects.push(AtomicEffect::apply_status(
            TargetRef::Actor(member.id),
            StatusKind::Stunned,
            stun,
        ));
        if let Some(actor) = board.state.actor(member.id) {
            outcome
                .triggered
                .messages
                .push(format!("{} slams into an obstacle!", actor.name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::kinetic::testing::{board, enemy, floor};
    use crate::state::{BaseTile, GameState};
    use crate::tile::TileEffectRegistry;

    fn push(state: &GameState, target: u32, momentum: u32) -> KineticOutcome {
        let config = GameConfig::default();
        let registry = TileEffectRegistry::standard();
        resolve_kinetic_push(
            &board(state, &config, &registry),
            EntityId(target),
            HexDirection::East,
            momentum,
        )
        .unwrap_or_default()
    }

    #[test]
    fn chain_against_wall_moves_nobody_and_stuns_all() {
        let mut state = floor(6, 1)
            .with_actor(enemy(1, 1, 0))
            .with_actor(enemy(2, 2, 0))
            .with_actor(enemy(3, 3, 0));
        state.map.set_base(Position::new(4, 0), BaseTile::Wall);

        let outcome = push(&state, 1, 3);
        assert!(outcome.moves.is_empty());
        assert_eq!(outcome.steps, 0);
        assert_eq!(outcome.stunned, vec![EntityId(3), EntityId(2), EntityId(1)]);
        assert!(outcome.triggered.effects.iter().all(|e| matches!(
            e,
            AtomicEffect::ApplyStatus(s) if s.status == StatusKind::Stunned && s.duration == 1
        )));
    }

    #[test]
    fn cluster_advances_together() {
        let state = floor(10, 1).with_actor(enemy(1, 0, 0)).with_actor(enemy(2, 1, 0));
        let outcome = push(&state, 1, 2);
        assert_eq!(
            outcome.moves,
            vec![
                (EntityId(2), Position::new(1, 0), Position::new(3, 0)),
                (EntityId(1), Position::new(0, 0), Position::new(2, 0)),
            ]
        );
        assert!(outcome.stunned.is_empty());
    }

    #[test]
    fn collision_absorbs_new_lead() {
        let state = floor(10, 1).with_actor(enemy(1, 0, 0)).with_actor(enemy(2, 2, 0));
        let outcome = push(&state, 1, 3);
        assert_eq!(
            outcome.moves,
            vec![
                (EntityId(2), Position::new(2, 0), Position::new(4, 0)),
                (EntityId(1), Position::new(0, 0), Position::new(3, 0)),
            ]
        );
        assert_eq!(outcome.momentum, 0);
    }

    #[test]
    fn wall_after_first_step_just_stops() {
        let mut state = floor(10, 1).with_actor(enemy(1, 0, 0));
        state.map.set_base(Position::new(2, 0), BaseTile::Wall);

        let outcome = push(&state, 1, 4);
        assert_eq!(outcome.moves, vec![(EntityId(1), Position::new(0, 0), Position::new(1, 0))]);
        assert!(outcome.stunned.is_empty());
        assert_eq!(outcome.momentum, 3);
    }

    #[test]
    fn hazard_interrupts_the_push() {
        let mut state = floor(10, 1).with_actor(enemy(1, 0, 0));
        state.map.set_base(Position::new(2, 0), BaseTile::Lava);

        let outcome = push(&state, 1, 5);
        assert!(outcome.interrupted);
        assert_eq!(outcome.moves, vec![(EntityId(1), Position::new(0, 0), Position::new(2, 0))]);
        assert_eq!(outcome.triggered.effects.len(), 1);
    }

    #[test]
    fn anchored_target_does_not_move() {
        let state = floor(10, 1)
            .with_actor(enemy(1, 0, 0).with_status(StatusKind::Anchored, 3));
        let outcome = push(&state, 1, 3);
        assert!(outcome.moves.is_empty());
        assert!(outcome.stunned.is_empty());
    }
}
