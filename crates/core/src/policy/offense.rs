//! Bomb placement tiers: attacking opponents and clearing obstacles.
//! Every placement goes through `place_bomb`, which refuses unless an escape exists.

use std::collections::VecDeque;

use super::*;
use crate::pathfinding::neighbors;

/// The actor may drop a bomb right now, cooldown and footing permitting.
pub(super) fn bomb_possible(state: &PolicyState, tick: &Tick<'_>) -> bool {
    tick.actor.can_place_bomb
        && state.bomb_ready(tick.now, tick.profile.bomb_cooldown)
        && tick.is_clear(tick.pos())
}

fn place_bomb<S>(
    state: &mut PolicyState,
    tick: &Tick<'_>,
    reason: BombReason,
    sink: &mut S,
) -> Option<Intention>
where
    S: EventSink + ?Sized,
{
    let actor = tick.actor;
    let at = actor.pos;
    let Some(plan) =
        plan_escape_route(&tick.grid, at, actor.speed, actor.blast_range, actor.bomb_kind)
    else {
        sink.emit(DecisionEvent::BombWithheld { at, reason });
        return None;
    };
    state.record_bomb(tick.now);
    state.commit_escape(plan.direction, plan.refuge, tick.now, actor.speed, sink);
    sink.emit(DecisionEvent::BombPlaced { at, reason, escape: plan.direction });
    Some(Intention::bomb_and_move(plan.direction))
}

pub(super) fn attack<R, S>(
    state: &mut PolicyState,
    tick: &Tick<'_>,
    rng: &mut R,
    sink: &mut S,
) -> Option<Intention>
where
    R: Rng + ?Sized,
    S: EventSink + ?Sized,
{
    if !bomb_possible(state, tick) {
        return None;
    }
    let pos = tick.pos();
    let profile = tick.profile;
    let opponent = tick
        .world
        .live_opponents()
        .filter(|opponent| {
            manhattan(pos, opponent.pos) <= profile.attack_range
                && tick.reach.contains_key(&opponent.pos)
        })
        .min_by_key(|opponent| (manhattan(pos, opponent.pos), opponent.pos.y, opponent.pos.x))?;

    let aim = if profile.use_prediction && chance(rng, profile.prediction_accuracy) {
        predict_opponent_position(&tick.grid, opponent)
    } else {
        opponent.pos
    };
    let blast = tick.grid.blast_cells(pos, tick.actor.blast_range, tick.actor.bomb_kind);
    if blast.contains(&aim) || blast.contains(&opponent.pos) {
        return place_bomb(state, tick, BombReason::Attack, sink);
    }

    if !profile.lay_traps {
        return None;
    }
    let trap = trap_cell(tick, opponent)?;
    state.commit_target(trap, TargetKind::TrapCell, tick.now, sink);
    movement::step_toward(state, tick, trap, sink).map(Intention::moving)
}

/// The opponent's roomiest exit, which the actor can occupy to cut it off.
fn trap_cell(tick: &Tick<'_>, opponent: &OpponentView) -> Option<Pos> {
    let mut best: Option<(usize, Pos)> = None;
    for exit in neighbors(opponent.pos) {
        if !tick.grid.is_walkable(exit) {
            continue;
        }
        let room = open_space(&tick.grid, exit, opponent.pos);
        if best.is_none_or(|(best_room, _)| room > best_room) {
            best = Some((room, exit));
        }
    }
    let (_, exit) = best?;
    (exit != tick.pos() && tick.is_clear(exit) && tick.reach.contains_key(&exit)).then_some(exit)
}

/// Walkable cells reachable from `from` without crossing `blocked`, capped.
fn open_space(grid: &HazardGrid, from: Pos, blocked: Pos) -> usize {
    let mut seen = BTreeSet::from([blocked, from]);
    let mut queue = VecDeque::from([from]);
    let mut count = 0;
    while let Some(current) = queue.pop_front() {
        count += 1;
        if count >= OPEN_SPACE_NODE_CAP {
            break;
        }
        for next in neighbors(current) {
            if grid.is_walkable(next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    count
}

pub(super) fn clear_obstacles<S>(
    state: &mut PolicyState,
    tick: &Tick<'_>,
    sink: &mut S,
) -> Option<Intention>
where
    S: EventSink + ?Sized,
{
    if !bomb_possible(state, tick) {
        return None;
    }
    let blast = tick.grid.blast_cells(tick.pos(), tick.actor.blast_range, tick.actor.bomb_kind);
    let hits_crate = blast
        .iter()
        .any(|cell| tick.grid.has_destructible(*cell) && !tick.grid.is_dangerous(*cell));
    if !hits_crate {
        return None;
    }
    place_bomb(state, tick, BombReason::ClearObstacles, sink)
}
