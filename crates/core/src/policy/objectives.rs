//! Non-violent goals: pickups, held targets and closing the distance.

use super::*;

pub(super) fn pickup_interrupt<S>(
    state: &mut PolicyState,
    tick: &Tick<'_>,
    sink: &mut S,
) -> Option<Intention>
where
    S: EventSink + ?Sized,
{
    let target = high_priority_collectible(&tick.grid, tick.world, tick.actor, &tick.reach)?;
    let dir = movement::step_toward(state, tick, target, sink)?;
    state.commit_target(target, TargetKind::Collectible, tick.now, sink);
    Some(Intention::moving(dir))
}

/// Where a held target currently is, or why it no longer holds.
fn validate_target(tick: &Tick<'_>, held: TargetCommitment) -> Result<Pos, ClearReason> {
    if tick.now - held.committed_at > TARGET_COMMIT_WINDOW {
        return Err(ClearReason::Expired);
    }
    let target = match held.kind {
        TargetKind::Collectible => {
            tick.world.collectible_at(held.target).ok_or(ClearReason::TargetGone)?.pos
        }
        TargetKind::Opponent(id) => {
            tick.world
                .live_opponents()
                .find(|opponent| opponent.id == id)
                .ok_or(ClearReason::TargetGone)?
                .pos
        }
        TargetKind::Obstacle => {
            let beside_crate = Direction::ALL
                .into_iter()
                .any(|dir| tick.grid.has_destructible(held.target.step(dir)));
            if !beside_crate {
                return Err(ClearReason::TargetGone);
            }
            held.target
        }
        TargetKind::TrapCell => held.target,
    };
    if target == tick.pos() {
        return Err(ClearReason::Reached);
    }
    if tick.grid.is_dangerous(target) {
        return Err(ClearReason::TargetHazardous);
    }
    if !tick.reach.contains_key(&target) {
        return Err(ClearReason::Unreachable);
    }
    Ok(target)
}

/// Keeps heading for the held target until it expires or stops making sense.
pub(super) fn continue_target_commitment<S>(
    state: &mut PolicyState,
    tick: &Tick<'_>,
    sink: &mut S,
) -> Option<Intention>
where
    S: EventSink + ?Sized,
{
    let held = state.target_commitment()?;
    let target = match validate_target(tick, held) {
        Ok(target) => target,
        Err(reason) => {
            state.clear_commitment(reason, sink);
            return None;
        }
    };
    match movement::step_toward(state, tick, target, sink) {
        Some(dir) => Some(Intention::moving(dir)),
        None => {
            state.clear_commitment(ClearReason::Blocked, sink);
            None
        }
    }
}

pub(super) fn collect<S>(
    state: &mut PolicyState,
    tick: &Tick<'_>,
    sink: &mut S,
) -> Option<Intention>
where
    S: EventSink + ?Sized,
{
    let target = if tick.profile.use_pathfinding {
        best_collectible(&tick.grid, tick.world, tick.actor, &tick.reach)?.0
    } else {
        nearest_collectible(tick)?
    };
    let dir = movement::step_toward(state, tick, target, sink)?;
    state.commit_target(target, TargetKind::Collectible, tick.now, sink);
    Some(Intention::moving(dir))
}

/// Nearest safe ordinary collectible for profiles without route planning.
fn nearest_collectible(tick: &Tick<'_>) -> Option<Pos> {
    let is_item = |pos: Pos| {
        tick.world.collectible_at(pos).is_some_and(|item| !item.kind.is_harmful())
    };
    find_target_with_bfs(&tick.grid, tick.pos(), true, TARGET_BFS_NODE_CAP, is_item)
        .map(|(pos, _)| pos)
}

/// Closes in on the nearest reachable opponent, else digs toward a crate.
pub(super) fn advance<S>(
    state: &mut PolicyState,
    tick: &Tick<'_>,
    sink: &mut S,
) -> Option<Intention>
where
    S: EventSink + ?Sized,
{
    let nearest = tick
        .world
        .live_opponents()
        .filter_map(|opponent| tick.reach.get(&opponent.pos).map(|dist| (*dist, opponent)))
        .min_by_key(|(dist, opponent)| (*dist, opponent.pos.y, opponent.pos.x));
    if let Some((_, opponent)) = nearest
        && let Some(dir) = movement::step_toward(state, tick, opponent.pos, sink)
    {
        state.commit_target(opponent.pos, TargetKind::Opponent(opponent.id), tick.now, sink);
        return Some(Intention::moving(dir));
    }

    let obstacle = best_obstacle(
        &tick.grid,
        tick.world,
        tick.actor,
        &tick.reach,
        tick.profile.strategic_obstacles,
    )?;
    if obstacle.stand == tick.pos() {
        // In position: wait out the cooldown or a host refusal, otherwise fall through.
        return (!offense::bomb_possible(state, tick)).then_some(Intention::IDLE);
    }
    let dir = movement::step_toward(state, tick, obstacle.stand, sink)?;
    state.commit_target(obstacle.stand, TargetKind::Obstacle, tick.now, sink);
    Some(Intention::moving(dir))
}
