//! Direction resolution toward a target, throttled continuation and wandering.

use super::*;

/// Next step toward `target`. Routed with A* when the profile allows it, greedy
/// otherwise, and never onto a cell that is not clear.
pub(super) fn step_toward<S>(
    state: &mut PolicyState,
    tick: &Tick<'_>,
    target: Pos,
    sink: &mut S,
) -> Option<Direction>
where
    S: EventSink + ?Sized,
{
    let pos = tick.pos();
    if pos == target {
        return None;
    }
    let routed =
        if tick.profile.use_pathfinding { routed_step(state, tick, target, sink) } else { None };
    let proposed = routed.or_else(|| {
        greedy_step(pos, target).into_iter().find(|dir| tick.is_clear(pos.step(*dir)))
    });
    match proposed {
        Some(dir) if tick.is_clear(pos.step(dir)) => Some(dir),
        _ => {
            state.forget_path();
            safe_fallback(tick, target)
        }
    }
}

fn routed_step<S>(
    state: &mut PolicyState,
    tick: &Tick<'_>,
    target: Pos,
    sink: &mut S,
) -> Option<Direction>
where
    S: EventSink + ?Sized,
{
    let pos = tick.pos();
    drop_reached_steps(state, pos);
    let stale = state.path_target != Some(target)
        || tick.now - state.path_computed_at >= PATH_RECOMPUTE_INTERVAL
        || state
            .path
            .front()
            .is_none_or(|next| manhattan(*next, pos) != 1 || !tick.is_clear(*next));
    if stale {
        state.forget_path();
        let path = find_path(&tick.grid, pos, target)?;
        sink.emit(DecisionEvent::PathRecomputed { target, len: path.len() as u16 });
        state.path = path.into();
        state.path_target = Some(target);
        state.path_computed_at = tick.now;
    }
    let next = *state.path.front()?;
    pos.direction_to(next)
}

fn drop_reached_steps(state: &mut PolicyState, pos: Pos) {
    while state.path.front() == Some(&pos) {
        state.path.pop_front();
    }
}

/// Any clear neighbor, preferring ones that close the distance to `target`.
fn safe_fallback(tick: &Tick<'_>, target: Pos) -> Option<Direction> {
    let pos = tick.pos();
    Direction::ALL
        .into_iter()
        .filter(|dir| tick.is_clear(pos.step(*dir)))
        .min_by_key(|dir| manhattan(pos.step(*dir), target))
}

/// Keeps the previous heading between evaluations, still refusing unsafe steps.
pub(super) fn continue_heading(state: &mut PolicyState, tick: &Tick<'_>) -> Intention {
    let pos = tick.pos();
    drop_reached_steps(state, pos);
    let heading = state
        .path
        .front()
        .and_then(|next| pos.direction_to(*next))
        .or(state.last_intention.direction);
    match heading {
        Some(dir) if tick.is_clear(pos.step(dir)) => Intention::moving(dir),
        _ => Intention::IDLE,
    }
}

/// Random clear neighbor, weighted against turning straight back.
pub(super) fn wander<R>(state: &PolicyState, tick: &Tick<'_>, rng: &mut R) -> Intention
where
    R: Rng + ?Sized,
{
    let pos = tick.pos();
    let options: Vec<Direction> =
        Direction::ALL.into_iter().filter(|dir| tick.is_clear(pos.step(*dir))).collect();
    let weights: Vec<u32> = options
        .iter()
        .map(|dir| {
            if state.last_direction == Some(dir.opposite()) {
                WANDER_REVERSE_WEIGHT
            } else {
                WANDER_FORWARD_WEIGHT
            }
        })
        .collect();
    match pick_weighted(rng, &weights) {
        Some(index) => Intention::moving(options[index]),
        None => Intention::IDLE,
    }
}
