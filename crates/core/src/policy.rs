//! Strict-priority tactical policy driven once per decision tick.
//! This module exists to turn one world snapshot plus caller-owned state into an intention.
//! It does not own the actor or the bombs; the host applies the returned intention.

use std::collections::{BTreeMap, BTreeSet};

use rand_chacha::rand_core::Rng;

use crate::constants::*;
use crate::escape::{find_refuge, leads_to_safety, plan_escape_route};
use crate::events::*;
use crate::hazard::{HazardGrid, build_hazard_grid};
use crate::pathfinding::{find_path, find_target_with_bfs, greedy_step, manhattan, reachable_cells};
use crate::profile::DifficultyProfile;
use crate::rng::{chance, pick_index, pick_weighted};
use crate::targeting::*;
use crate::threat::project_threat_zones;
use crate::types::*;
use crate::world::{ActorView, OpponentView, WorldSnapshot};

mod escaping;
mod movement;
mod objectives;
mod offense;
mod state;

pub use state::{Commitment, EscapeCommitment, PolicyState, TargetCommitment};

#[cfg(test)]
mod tests;

/// Everything derived from the snapshot for a single decision pass.
struct Tick<'a> {
    world: &'a WorldSnapshot,
    actor: &'a ActorView,
    profile: &'a DifficultyProfile,
    grid: HazardGrid,
    threats: BTreeSet<Pos>,
    reach: BTreeMap<Pos, u16>,
    now: f32,
}

impl Tick<'_> {
    fn pos(&self) -> Pos {
        self.actor.pos
    }

    /// Walkable, not scheduled to burn and outside every threat zone.
    fn is_clear(&self, pos: Pos) -> bool {
        self.grid.is_safe(pos) && !self.threats.contains(&pos)
    }

    fn in_danger(&self) -> bool {
        self.grid.is_dangerous(self.pos()) || self.threats.contains(&self.pos())
    }
}

/// Picks this tick's intention.
///
/// Present danger always forces a full evaluation; otherwise re-evaluation is
/// limited to once per `profile.reaction_latency` and the actor keeps following
/// its previous heading in between.
pub fn decide<R, S>(
    state: &mut PolicyState,
    world: &WorldSnapshot,
    actor: &ActorView,
    profile: &DifficultyProfile,
    rng: &mut R,
    sink: &mut S,
) -> Intention
where
    R: Rng + ?Sized,
    S: EventSink + ?Sized,
{
    let grid = build_hazard_grid(world);
    state.abilities.refresh(&world.opponents);
    let threats = project_threat_zones(&grid, &world.opponents, &state.abilities);
    let reach = reachable_cells(&grid, actor.pos, REACH_NODE_CAP);
    let tick = Tick { world, actor, profile, grid, threats, reach, now: world.now };

    let (tier, intention) = if !tick.in_danger() && tick.now < state.next_eval_at {
        (DecisionTier::Throttled, movement::continue_heading(state, &tick))
    } else {
        state.next_eval_at = tick.now + profile.reaction_latency;
        evaluate(state, &tick, rng, sink)
    };

    state.last_intention = intention;
    if intention.direction.is_some() {
        state.last_direction = intention.direction;
    }
    sink.emit(DecisionEvent::Decided { tier, intention });
    intention
}

fn evaluate<R, S>(
    state: &mut PolicyState,
    tick: &Tick<'_>,
    rng: &mut R,
    sink: &mut S,
) -> (DecisionTier, Intention)
where
    R: Rng + ?Sized,
    S: EventSink + ?Sized,
{
    if let Some(intention) = escaping::escape(state, tick, rng, sink) {
        return (DecisionTier::Escape, intention);
    }
    if let Some(intention) = escaping::continue_escape_commitment(state, tick, sink) {
        return (DecisionTier::EscapeCommitment, intention);
    }
    if let Some(intention) = objectives::pickup_interrupt(state, tick, sink) {
        return (DecisionTier::PickupInterrupt, intention);
    }
    if let Some(intention) = offense::attack(state, tick, rng, sink) {
        return (DecisionTier::Attack, intention);
    }
    if let Some(intention) = offense::clear_obstacles(state, tick, sink) {
        return (DecisionTier::ClearObstacles, intention);
    }
    if let Some(intention) = objectives::continue_target_commitment(state, tick, sink) {
        return (DecisionTier::TargetCommitment, intention);
    }
    if let Some(intention) = objectives::collect(state, tick, sink) {
        return (DecisionTier::Collect, intention);
    }
    if let Some(intention) = objectives::advance(state, tick, sink) {
        return (DecisionTier::Advance, intention);
    }
    (DecisionTier::Wander, movement::wander(state, tick, rng))
}
