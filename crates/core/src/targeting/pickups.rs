//! Collectible priority table and proximity scoring.

use std::collections::BTreeMap;

use crate::constants::{HIGH_PRIORITY_PICKUP_RANGE, MAX_BLAST_RANGE, MAX_BOMB_CAPACITY, MAX_SPEED};
use crate::hazard::HazardGrid;
use crate::pathfinding::manhattan;
use crate::types::*;
use crate::world::{ActorView, CollectibleView, WorldSnapshot};

const CAPPED_FACTOR: f32 = 0.5;
const MISSING_SURVIVAL_BOOST: f32 = 1.5;

pub fn base_priority(kind: CollectibleKind) -> i32 {
    match kind {
        CollectibleKind::Shield => 100,
        CollectibleKind::Teleport => 90,
        CollectibleKind::Kick => 85,
        CollectibleKind::SpeedUp => 70,
        CollectibleKind::BombUp => 60,
        CollectibleKind::FireUp => 60,
        CollectibleKind::PierceBomb => 50,
        CollectibleKind::Punch => 45,
        CollectibleKind::FireBomb => 40,
        CollectibleKind::IceBomb => 35,
        CollectibleKind::Skull => -1000,
    }
}

/// Whether picking `kind` up would add nothing the actor does not already have.
fn already_capped(actor: &ActorView, kind: CollectibleKind) -> bool {
    match kind {
        CollectibleKind::BombUp => actor.bomb_capacity >= MAX_BOMB_CAPACITY,
        CollectibleKind::FireUp => actor.blast_range >= MAX_BLAST_RANGE,
        CollectibleKind::SpeedUp => actor.speed >= MAX_SPEED,
        CollectibleKind::Kick => actor.abilities.can_kick,
        CollectibleKind::Punch => actor.abilities.can_punch,
        CollectibleKind::Shield => actor.abilities.has_shield,
        CollectibleKind::Teleport => actor.abilities.has_teleport,
        CollectibleKind::PierceBomb => actor.bomb_kind == BombKind::Piercing,
        CollectibleKind::FireBomb => actor.bomb_kind == BombKind::Fire,
        CollectibleKind::IceBomb => actor.bomb_kind == BombKind::Ice,
        CollectibleKind::Skull => false,
    }
}

/// `base / max(1, distance)` with context adjustments; `None` for harmful kinds.
pub fn score_collectible(actor: &ActorView, item: &CollectibleView) -> Option<f32> {
    if item.kind.is_harmful() {
        return None;
    }
    let distance = manhattan(actor.pos, item.pos).max(1);
    let mut score = base_priority(item.kind) as f32 / distance as f32;
    if already_capped(actor, item.kind) {
        score *= CAPPED_FACTOR;
    }
    let lacks_survival = !actor.abilities.has_shield && !actor.abilities.has_teleport;
    if lacks_survival && item.kind.is_survival() {
        score *= MISSING_SURVIVAL_BOOST;
    }
    Some(score)
}

fn eligible<'a>(
    grid: &'a HazardGrid,
    world: &'a WorldSnapshot,
    reach: &'a BTreeMap<Pos, u16>,
) -> impl Iterator<Item = (&'a CollectibleView, u16)> {
    world.collectibles.iter().filter_map(move |item| {
        if !item.active || item.kind.is_harmful() || !grid.is_safe(item.pos) {
            return None;
        }
        reach.get(&item.pos).map(|dist| (item, *dist))
    })
}

/// Highest-scoring reachable, currently safe collectible.
pub fn best_collectible(
    grid: &HazardGrid,
    world: &WorldSnapshot,
    actor: &ActorView,
    reach: &BTreeMap<Pos, u16>,
) -> Option<(Pos, CollectibleKind)> {
    let mut best: Option<(f32, u16, &CollectibleView)> = None;
    for (item, dist) in eligible(grid, world, reach) {
        let Some(score) = score_collectible(actor, item) else {
            continue;
        };
        let is_better = match best {
            None => true,
            Some((best_score, best_dist, best_item)) => {
                score > best_score
                    || (score == best_score
                        && (dist, item.pos.y, item.pos.x)
                            < (best_dist, best_item.pos.y, best_item.pos.x))
            }
        };
        if is_better {
            best = Some((score, dist, item));
        }
    }
    best.map(|(_, _, item)| (item.pos, item.kind))
}

/// Nearest survival-tier collectible close enough to interrupt combat for.
pub fn high_priority_collectible(
    grid: &HazardGrid,
    world: &WorldSnapshot,
    actor: &ActorView,
    reach: &BTreeMap<Pos, u16>,
) -> Option<Pos> {
    eligible(grid, world, reach)
        .filter(|(item, dist)| {
            item.kind.is_survival()
                && !already_capped(actor, item.kind)
                && u32::from(*dist) <= HIGH_PRIORITY_PICKUP_RANGE
        })
        .min_by_key(|(item, dist)| (*dist, item.pos.y, item.pos.x))
        .map(|(item, _)| item.pos)
}
