//! Time-budgeted escape search.
//! This module exists to answer "can the actor outrun this blast?" before any bomb
//! is placed, and "which way is out?" once the actor is already in danger.
//! It does not own commitment bookkeeping; the policy records what it chooses.

use std::collections::{BTreeSet, VecDeque};

use crate::constants::{DEFAULT_FUSE, ESCAPE_MARGIN, ESCAPE_MIN_SAFE_CELLS, ESCAPE_NODE_CAP};
use crate::hazard::HazardGrid;
use crate::pathfinding::neighbors;
use crate::types::*;

const MIN_SEARCH_SPEED: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EscapePlan {
    pub direction: Direction,
    /// Nearest qualifying safe cell along the chosen direction.
    pub refuge: Pos,
    pub safe_cells: usize,
}

/// Seconds available to run from a freshly placed bomb.
pub fn escape_window() -> f32 {
    DEFAULT_FUSE - ESCAPE_MARGIN
}

/// Direction to flee after dropping a bomb of `range` at `origin`, if one is survivable.
pub fn plan_escape(
    grid: &HazardGrid,
    origin: Pos,
    speed: f32,
    range: u8,
    kind: BombKind,
) -> Option<Direction> {
    plan_escape_route(grid, origin, speed, range, kind).map(|plan| plan.direction)
}

pub fn plan_escape_route(
    grid: &HazardGrid,
    origin: Pos,
    speed: f32,
    range: u8,
    kind: BombKind,
) -> Option<EscapePlan> {
    if speed <= 0.0 || !grid.in_bounds(origin) {
        return None;
    }
    let blast: BTreeSet<Pos> = grid.blast_cells(origin, range, kind).into_iter().collect();
    let mut best: Option<(EscapePlan, u16)> = None;
    for dir in Direction::ALL {
        let Some((safe_cells, refuge, refuge_dist)) =
            survey_direction(grid, origin, dir, speed, &blast)
        else {
            continue;
        };
        if safe_cells < ESCAPE_MIN_SAFE_CELLS {
            continue;
        }
        let is_better = match best {
            None => true,
            Some((plan, dist)) => {
                safe_cells > plan.safe_cells
                    || (safe_cells == plan.safe_cells && refuge_dist < dist)
            }
        };
        if is_better {
            best = Some((EscapePlan { direction: dir, refuge, safe_cells }, refuge_dist));
        }
    }
    best.map(|(plan, _)| plan)
}

/// Qualifying safe cells reachable in time when fleeing `dir` from a bomb at `origin`.
pub fn count_escape_cells(
    grid: &HazardGrid,
    origin: Pos,
    dir: Direction,
    speed: f32,
    range: u8,
    kind: BombKind,
) -> usize {
    if speed <= 0.0 {
        return 0;
    }
    let blast: BTreeSet<Pos> = grid.blast_cells(origin, range, kind).into_iter().collect();
    survey_direction(grid, origin, dir, speed, &blast).map_or(0, |(count, _, _)| count)
}

fn survey_direction(
    grid: &HazardGrid,
    origin: Pos,
    dir: Direction,
    speed: f32,
    blast: &BTreeSet<Pos>,
) -> Option<(usize, Pos, u16)> {
    let max_depth = (escape_window() * speed).floor().max(0.0) as u16;
    let mut safe_cells = 0;
    let mut nearest: Option<(Pos, u16)> = None;
    timed_search(grid, origin, &[dir], speed, ESCAPE_NODE_CAP, max_depth, |pos, dist, _| {
        if !blast.contains(&pos) && !grid.is_dangerous(pos) {
            safe_cells += 1;
            if nearest.is_none() {
                nearest = Some((pos, dist));
            }
        }
        false
    });
    nearest.map(|(refuge, dist)| (safe_cells, refuge, dist))
}

/// First step toward the nearest safe cell outside `avoid`, crossing only cells
/// that are not burning when the actor would reach them.
pub fn find_refuge(
    grid: &HazardGrid,
    origin: Pos,
    speed: f32,
    avoid: &BTreeSet<Pos>,
    node_cap: usize,
) -> Option<(Direction, Pos, u16)> {
    let mut found = None;
    timed_search(grid, origin, &Direction::ALL, speed, node_cap, u16::MAX, |pos, dist, first| {
        if grid.is_safe(pos) && !avoid.contains(&pos) {
            found = Some((first, pos, dist));
            return true;
        }
        false
    });
    found
}

/// Whether heading `dir` still reaches a safe cell within `max_depth` steps.
pub fn leads_to_safety(
    grid: &HazardGrid,
    origin: Pos,
    dir: Direction,
    speed: f32,
    avoid: &BTreeSet<Pos>,
    max_depth: u16,
) -> bool {
    let mut reached = false;
    timed_search(grid, origin, &[dir], speed, ESCAPE_NODE_CAP, max_depth, |pos, _, _| {
        reached = grid.is_safe(pos) && !avoid.contains(&pos);
        reached
    });
    reached
}

/// Breadth-first walk that never re-enters `origin` and only steps onto cells
/// passable at the moment of arrival. `on_visit` returns `true` to stop.
fn timed_search<OnVisit>(
    grid: &HazardGrid,
    origin: Pos,
    first_steps: &[Direction],
    speed: f32,
    node_cap: usize,
    max_depth: u16,
    mut on_visit: OnVisit,
) where
    OnVisit: FnMut(Pos, u16, Direction) -> bool,
{
    let speed = speed.max(MIN_SEARCH_SPEED);
    let arrival = |dist: u16| f32::from(dist) / speed;
    let mut visited = BTreeSet::from([origin]);
    let mut queue = VecDeque::new();
    if max_depth == 0 {
        return;
    }
    for dir in first_steps {
        let first = origin.step(*dir);
        if grid.is_passable_at(first, arrival(1)) && visited.insert(first) {
            queue.push_back((first, 1u16, *dir));
        }
    }
    while let Some((pos, dist, first)) = queue.pop_front() {
        if on_visit(pos, dist, first) {
            return;
        }
        if dist >= max_depth {
            continue;
        }
        let next = dist + 1;
        for neighbor in neighbors(pos) {
            if visited.len() >= node_cap {
                break;
            }
            if grid.is_passable_at(neighbor, arrival(next)) && visited.insert(neighbor) {
                queue.push_back((neighbor, next, first));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hazard::build_hazard_grid;
    use crate::test_support::*;

    #[test]
    fn open_grid_always_has_an_escape() {
        let grid = build_hazard_grid(&open_world(13, 11));
        let origin = Pos { y: 5, x: 5 };
        let dir = plan_escape(&grid, origin, 3.0, 2, BombKind::Normal).expect("open grid");
        assert!(count_escape_cells(&grid, origin, dir, 3.0, 2, BombKind::Normal) >= 3);
    }

    #[test]
    fn boxed_in_actor_has_no_escape() {
        let (world, origin) = dead_end_world();
        let grid = build_hazard_grid(&world);
        assert_eq!(plan_escape(&grid, origin, 3.0, 2, BombKind::Normal), None);
    }

    #[test]
    fn single_safe_cell_is_not_enough() {
        let (world, origin) = dead_end_world();
        let grid = build_hazard_grid(&world);
        // Range 1 leaves exactly one tail cell outside the blast.
        let count = count_escape_cells(&grid, origin, Direction::Right, 3.0, 1, BombKind::Normal);
        assert_eq!(count, 1);
        assert_eq!(plan_escape(&grid, origin, 3.0, 1, BombKind::Normal), None);
    }

    #[test]
    fn slow_actor_cannot_reach_distant_safety() {
        // Safe cells start 5 tiles away; at 1 tile/s the window allows 2.
        let (world, origin) = long_corridor_world(12);
        let grid = build_hazard_grid(&world);
        assert_eq!(plan_escape(&grid, origin, 1.0, 4, BombKind::Normal), None);
        assert_eq!(plan_escape(&grid, origin, 4.0, 4, BombKind::Normal), Some(Direction::Right));
    }

    #[test]
    fn escape_ignores_cells_already_threatened() {
        let mut world = open_world(13, 11);
        let origin = Pos { y: 5, x: 5 };
        // Existing bombs cover rows 4 and 6 and columns 4 and 6 with fuses longer than
        // the window, so every cell next to the origin is already hazardous.
        let rows = [Pos { y: 4, x: 0 }, Pos { y: 6, x: 0 }];
        let columns = [Pos { y: 0, x: 4 }, Pos { y: 0, x: 6 }];
        for pos in rows.into_iter().chain(columns) {
            world.bombs.push(bomb(pos, 9.0, 12, BombKind::Piercing));
        }
        let grid = build_hazard_grid(&world);
        let plan = plan_escape_route(&grid, origin, 3.0, 2, BombKind::Normal);
        if let Some(plan) = plan {
            assert!(!grid.is_dangerous(plan.refuge));
            assert!(!grid.blast_cells(origin, 2, BombKind::Normal).contains(&plan.refuge));
        }
    }

    #[test]
    fn refuge_search_routes_out_of_a_blast() {
        let mut world = open_world(9, 9);
        let origin = Pos { y: 4, x: 4 };
        world.bombs.push(bomb(origin, 1.5, 3, BombKind::Normal));
        let grid = build_hazard_grid(&world);
        let (first, refuge, dist) =
            find_refuge(&grid, origin, 3.0, &BTreeSet::new(), 256).expect("diagonal is safe");
        assert!(grid.is_safe(refuge));
        assert_eq!(dist, 2);
        assert_eq!(first, Direction::Up);
        assert_eq!(refuge, Pos { y: 3, x: 5 });
    }

    #[test]
    fn refuge_search_refuses_to_cross_live_fire() {
        let (world, start, _) = hazard_corridor_world();
        let grid = build_hazard_grid(&world);
        let mut avoid = BTreeSet::new();
        // Everything left of the fire is declared off-limits.
        for x in 1..4 {
            avoid.insert(Pos { y: 4, x });
        }
        assert_eq!(find_refuge(&grid, start, 3.0, &avoid, 256), None);
    }

    #[test]
    fn leads_to_safety_checks_bounded_depth() {
        let (world, origin) = long_corridor_world(12);
        let mut world = world;
        world.bombs.push(bomb(origin, 2.0, 4, BombKind::Normal));
        let grid = build_hazard_grid(&world);
        let avoid = BTreeSet::new();
        assert!(leads_to_safety(&grid, origin, Direction::Right, 4.0, &avoid, 6));
        assert!(!leads_to_safety(&grid, origin, Direction::Right, 4.0, &avoid, 3));
        assert!(!leads_to_safety(&grid, origin, Direction::Up, 4.0, &avoid, 6));
    }
}
