//! Danger response and the short hold that follows it.

use super::*;

/// Runs when the actor's cell is hazardous or threatened. Always yields an
/// intention so lower tiers never act while in danger.
pub(super) fn escape<R, S>(
    state: &mut PolicyState,
    tick: &Tick<'_>,
    rng: &mut R,
    sink: &mut S,
) -> Option<Intention>
where
    R: Rng + ?Sized,
    S: EventSink + ?Sized,
{
    if !tick.in_danger() {
        return None;
    }
    let pos = tick.pos();
    let speed = tick.actor.speed;
    if state.target_commitment().is_some() {
        state.clear_commitment(ClearReason::Danger, sink);
    }

    let preferred =
        state.escape_commitment().map(|escape| escape.direction).or(state.last_direction);
    let choice = preferred
        .filter(|dir| {
            leads_to_safety(&tick.grid, pos, *dir, speed, &tick.threats, ESCAPE_CONTINUE_DEPTH)
        })
        .map(|dir| (dir, pos.step(dir), EscapeSource::ContinuedHeading))
        .or_else(|| {
            safe_neighbor(tick, rng).map(|dir| (dir, pos.step(dir), EscapeSource::SafeNeighbor))
        })
        .or_else(|| {
            find_refuge(&tick.grid, pos, speed, &tick.threats, REFUGE_NODE_CAP)
                .map(|(dir, refuge, _)| (dir, refuge, EscapeSource::TimedRoute))
        })
        .or_else(|| {
            least_bad_neighbor(tick).map(|dir| (dir, pos.step(dir), EscapeSource::LeastBad))
        });

    let Some((direction, target, source)) = choice else {
        sink.emit(DecisionEvent::NoEscapeFound { at: pos });
        return Some(Intention::IDLE);
    };
    state.commit_escape(direction, target, tick.now, speed, sink);
    sink.emit(DecisionEvent::EscapeChosen { from: pos, direction, source });
    Some(Intention::moving(direction))
}

fn safe_neighbor<R>(tick: &Tick<'_>, rng: &mut R) -> Option<Direction>
where
    R: Rng + ?Sized,
{
    let pos = tick.pos();
    let options: Vec<Direction> =
        Direction::ALL.into_iter().filter(|dir| tick.is_clear(pos.step(*dir))).collect();
    if options.is_empty() {
        return None;
    }
    Some(options[pick_index(rng, options.len())])
}

/// Walkable neighbor whose fire arrives last.
fn least_bad_neighbor(tick: &Tick<'_>) -> Option<Direction> {
    let pos = tick.pos();
    let mut best: Option<(f32, Direction)> = None;
    for dir in Direction::ALL {
        let next = pos.step(dir);
        if !tick.grid.is_walkable(next) {
            continue;
        }
        let remaining = tick.grid.time_to_ignite(next);
        if best.is_none_or(|(best_remaining, _)| remaining > best_remaining) {
            best = Some((remaining, dir));
        }
    }
    best.map(|(_, dir)| dir)
}

/// Keeps moving the committed way for a short hold after danger has passed.
pub(super) fn continue_escape_commitment<S>(
    state: &mut PolicyState,
    tick: &Tick<'_>,
    sink: &mut S,
) -> Option<Intention>
where
    S: EventSink + ?Sized,
{
    let escape = state.escape_commitment()?;
    if tick.now - escape.committed_at > escape.hold {
        state.clear_commitment(ClearReason::Expired, sink);
        return None;
    }
    if tick.pos() == escape.target {
        state.clear_commitment(ClearReason::Reached, sink);
        return None;
    }
    if !tick.is_clear(tick.pos().step(escape.direction)) {
        state.clear_commitment(ClearReason::Blocked, sink);
        return None;
    }
    Some(Intention::moving(escape.direction))
}
