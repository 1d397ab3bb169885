//! Destructible obstacle selection, strategic or nearest-first.

use std::collections::BTreeMap;

use crate::constants::OBSTACLE_SEARCH_RADIUS;
use crate::escape::plan_escape;
use crate::hazard::HazardGrid;
use crate::pathfinding::{manhattan, neighbors};
use crate::types::*;
use crate::world::{ActorView, WorldSnapshot};

const BASE_VALUE: f32 = 10.0;
const WALL_ADJACENCY_BONUS: f32 = 3.0;
const CENTER_BONUS: f32 = 5.0;
const LINE_OF_SIGHT_BONUS: f32 = 8.0;
const CORNER_TRAP_BONUS: f32 = 4.0;
const DISTANCE_PENALTY: f32 = 1.5;

/// An obstacle worth bombing and the reachable cell to bomb it from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObstacleTarget {
    pub obstacle: Pos,
    pub stand: Pos,
}

/// Strategic worth of destroying the obstacle at `pos`, net of travel distance.
pub fn obstacle_value(grid: &HazardGrid, world: &WorldSnapshot, pos: Pos, from: Pos) -> f32 {
    let around = neighbors(pos);
    let walls: Vec<bool> = around.iter().map(|cell| grid.has_wall(*cell)).collect();
    let wall_count = walls.iter().filter(|is_wall| **is_wall).count();

    let mut value = BASE_VALUE + WALL_ADJACENCY_BONUS * wall_count as f32;

    let center = Pos { y: (grid.height() / 2) as i32, x: (grid.width() / 2) as i32 };
    let max_span = ((grid.width() + grid.height()) / 2).max(1) as f32;
    let centrality = 1.0 - (manhattan(pos, center) as f32 / max_span).min(1.0);
    value += CENTER_BONUS * centrality;

    if opens_line_of_sight(grid, world, pos) {
        value += LINE_OF_SIGHT_BONUS;
    }
    // Two walls meeting at a right angle make the cleared cell a dead-end pocket.
    let corner = (0..4).any(|index| walls[index] && walls[(index + 1) % 4]);
    if corner {
        value += CORNER_TRAP_BONUS;
    }

    value - DISTANCE_PENALTY * manhattan(pos, from) as f32
}

/// Whether an opponent sits in open line with `pos`, so clearing it exposes them.
fn opens_line_of_sight(grid: &HazardGrid, world: &WorldSnapshot, pos: Pos) -> bool {
    let opponents: Vec<Pos> = world.live_opponents().map(|opponent| opponent.pos).collect();
    if opponents.is_empty() {
        return false;
    }
    for dir in Direction::ALL {
        let mut cursor = pos;
        for _ in 0..OBSTACLE_SEARCH_RADIUS {
            cursor = cursor.step(dir);
            if opponents.contains(&cursor) {
                return true;
            }
            if !grid.is_walkable(cursor) {
                break;
            }
        }
    }
    false
}

/// Destructible obstacle within the search radius that has a safe, reachable
/// neighbor the actor could bomb it from and still escape. Strategic mode maximizes
/// `obstacle_value`; otherwise nearest stand cell wins.
pub fn best_obstacle(
    grid: &HazardGrid,
    world: &WorldSnapshot,
    actor: &ActorView,
    reach: &BTreeMap<Pos, u16>,
    strategic: bool,
) -> Option<ObstacleTarget> {
    let from = actor.pos;
    let escapable = |stand: Pos| {
        plan_escape(grid, stand, actor.speed, actor.blast_range, actor.bomb_kind).is_some()
    };
    let mut best: Option<(f32, u16, ObstacleTarget)> = None;
    for obstacle in &world.obstacles {
        if !obstacle.active
            || !obstacle.destructible
            || !grid.has_destructible(obstacle.pos)
            || manhattan(from, obstacle.pos) > OBSTACLE_SEARCH_RADIUS
            || grid.is_dangerous(obstacle.pos)
        {
            continue;
        }
        let Some((stand, dist)) = neighbors(obstacle.pos)
            .into_iter()
            .filter(|cell| *cell == from || grid.is_safe(*cell))
            .filter_map(|cell| reach.get(&cell).map(|dist| (cell, *dist)))
            .filter(|(cell, _)| escapable(*cell))
            .min_by_key(|(cell, dist)| (*dist, cell.y, cell.x))
        else {
            continue;
        };
        let score = if strategic {
            obstacle_value(grid, world, obstacle.pos, from)
        } else {
            -f32::from(dist)
        };
        let candidate = ObstacleTarget { obstacle: obstacle.pos, stand };
        let is_better = match best {
            None => true,
            Some((best_score, best_dist, best_target)) => {
                score > best_score
                    || (score == best_score
                        && (dist, obstacle.pos.y, obstacle.pos.x)
                            < (best_dist, best_target.obstacle.y, best_target.obstacle.x))
            }
        };
        if is_better {
            best = Some((score, dist, candidate));
        }
    }
    best.map(|(_, _, target)| target)
}
