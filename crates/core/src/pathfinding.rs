//! Hazard-aware shortest-path and breadth-first search primitives.
//! This module exists so navigation rules are shared by every policy tier.
//! It does not own target choice or commitment state.

use std::collections::{BTreeMap, BTreeSet, VecDeque, btree_map::Entry};

use crate::constants::{ASTAR_EXPANSION_CAP, HAZARD_STEP_PENALTY};
use crate::hazard::HazardGrid;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

/// Least-cost route from `start` to `goal`, start excluded.
///
/// Cells with pending ignition cost `HAZARD_STEP_PENALTY` extra but are never
/// excluded, so a route comes back whenever one exists topologically.
pub fn find_path(grid: &HazardGrid, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
    if !grid.is_walkable(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![]);
    }
    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let mut closed = BTreeSet::new();
    let h = manhattan(start, goal);
    open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x });
    g_score.insert(start, 0u32);
    let mut expansions = 0;
    while let Some(curr) = open_set.pop_first() {
        let p = Pos { y: curr.y, x: curr.x };
        if p == goal {
            return Some(reconstruct_path(&came_from, start, goal));
        }
        // Stale duplicate left behind by a cheaper re-queue.
        if !closed.insert(p) {
            continue;
        }
        expansions += 1;
        if expansions > ASTAR_EXPANSION_CAP {
            return None;
        }
        let Some(&cur_g) = g_score.get(&p) else {
            continue;
        };
        for n in neighbors(p) {
            if !grid.is_walkable(n) || closed.contains(&n) {
                continue;
            }
            let tg = cur_g + step_cost(grid, n);
            if tg < *g_score.get(&n).unwrap_or(&u32::MAX) {
                came_from.insert(n, p);
                g_score.insert(n, tg);
                let h = manhattan(n, goal);
                open_set.insert(OpenNode { f: tg + h, h, y: n.y, x: n.x });
            }
        }
    }
    None
}

fn step_cost(grid: &HazardGrid, pos: Pos) -> u32 {
    if grid.is_dangerous(pos) { 1 + HAZARD_STEP_PENALTY } else { 1 }
}

fn reconstruct_path(came: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut p = goal;
    let mut result = vec![p];
    while p != start {
        let Some(prev) = came.get(&p) else {
            break;
        };
        p = *prev;
        result.push(p);
    }
    result.reverse();
    result.remove(0);
    result
}

/// BFS distances over walkable cells from `start`, at most `node_cap` entries.
///
/// The start is always included even when it is not walkable (an actor standing
/// on its own bomb).
pub fn reachable_cells(grid: &HazardGrid, start: Pos, node_cap: usize) -> BTreeMap<Pos, u16> {
    let mut visited = BTreeMap::new();
    if !grid.in_bounds(start) {
        return visited;
    }
    let mut queue = VecDeque::new();
    visited.insert(start, 0u16);
    queue.push_back(start);
    while let Some(current) = queue.pop_front() {
        let dist = visited[&current];
        for neighbor in neighbors(current) {
            if visited.len() >= node_cap {
                return visited;
            }
            if !grid.is_walkable(neighbor) {
                continue;
            }
            if let Entry::Vacant(entry) = visited.entry(neighbor) {
                entry.insert(dist + 1);
                queue.push_back(neighbor);
            }
        }
    }
    visited
}

/// Nearest cell satisfying `is_target`, by BFS distance then lowest `(y, x)`.
///
/// With `avoid_hazards` the search neither enters nor returns dangerous cells.
pub fn find_target_with_bfs<IsTarget>(
    grid: &HazardGrid,
    start: Pos,
    avoid_hazards: bool,
    node_cap: usize,
    is_target: IsTarget,
) -> Option<(Pos, u16)>
where
    IsTarget: Fn(Pos) -> bool,
{
    if !grid.in_bounds(start) {
        return None;
    }
    let mut visited = BTreeMap::new();
    let mut queue = VecDeque::new();
    visited.insert(start, 0u16);
    queue.push_back(start);

    let mut best_target: Option<(u16, Pos)> = None;

    while let Some(current) = queue.pop_front() {
        let dist = visited[&current];

        if let Some((best_dist, _)) = best_target
            && dist > best_dist
        {
            break;
        }

        if current != start && is_target(current) {
            let is_better = match best_target {
                None => true,
                Some((best_dist, best_pos)) => {
                    dist < best_dist
                        || (dist == best_dist && (current.y, current.x) < (best_pos.y, best_pos.x))
                }
            };
            if is_better {
                best_target = Some((dist, current));
            }
        }

        for neighbor in neighbors(current) {
            if visited.len() >= node_cap {
                break;
            }
            if !grid.is_walkable(neighbor) {
                continue;
            }
            if avoid_hazards && grid.is_dangerous(neighbor) {
                continue;
            }
            if let Entry::Vacant(entry) = visited.entry(neighbor) {
                entry.insert(dist + 1);
                queue.push_back(neighbor);
            }
        }
    }

    best_target.map(|(dist, target)| (target, dist))
}

/// Greedy single step toward `target`, larger axis gap first.
pub fn greedy_step(from: Pos, target: Pos) -> Vec<Direction> {
    let dy = target.y - from.y;
    let dx = target.x - from.x;
    let vertical = match dy.signum() {
        -1 => Some(Direction::Up),
        1 => Some(Direction::Down),
        _ => None,
    };
    let horizontal = match dx.signum() {
        -1 => Some(Direction::Left),
        1 => Some(Direction::Right),
        _ => None,
    };
    let ordered =
        if dy.abs() >= dx.abs() { [vertical, horizontal] } else { [horizontal, vertical] };
    ordered.into_iter().flatten().collect()
}

pub fn neighbors(p: Pos) -> [Pos; 4] {
    [
        Pos { y: p.y - 1, x: p.x },
        Pos { y: p.y, x: p.x + 1 },
        Pos { y: p.y + 1, x: p.x },
        Pos { y: p.y, x: p.x - 1 },
    ]
}

pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}
