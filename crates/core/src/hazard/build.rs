//! Builds a `HazardGrid` from a world snapshot.

use super::{HazardGrid, burn_duration};
use crate::constants::{CHAIN_PASS_LIMIT, TIME_EPSILON};
use crate::types::*;
use crate::world::{BombView, WorldSnapshot};

pub fn build_hazard_grid(world: &WorldSnapshot) -> HazardGrid {
    let mut grid = HazardGrid::new(world.width, world.height);

    for obstacle in world.obstacles.iter().filter(|obstacle| obstacle.active) {
        if let Some(cell) = grid.cell_mut(obstacle.pos) {
            cell.walkable = false;
            if obstacle.destructible {
                cell.has_destructible = true;
            } else {
                cell.has_wall = true;
            }
        }
    }

    let bombs: Vec<&BombView> =
        world.bombs.iter().filter(|bomb| bomb.active && grid.in_bounds(bomb.pos)).collect();
    for bomb in &bombs {
        if let Some(cell) = grid.cell_mut(bomb.pos) {
            cell.walkable = false;
            cell.has_bomb = true;
        }
    }

    let mut detonations: Vec<f32> = bombs.iter().map(|bomb| bomb.fuse.max(0.0)).collect();
    for (bomb, detonate_at) in bombs.iter().zip(&detonations) {
        sweep_bomb(&mut grid, bomb, *detonate_at);
    }
    resolve_chain_reactions(&mut grid, &bombs, &mut detonations);

    for explosion in world.explosions.iter().filter(|explosion| explosion.active) {
        for tile in &explosion.tiles {
            grid.burn_now(*tile, explosion.remaining, explosion.kind.into());
        }
    }

    for item in world.collectibles.iter().filter(|item| item.active) {
        if let Some(cell) = grid.cell_mut(item.pos) {
            cell.has_collectible = true;
        }
        if item.kind.is_harmful() {
            grid.mark_permanent_hazard(item.pos);
        }
    }

    grid
}

fn sweep_bomb(grid: &mut HazardGrid, bomb: &BombView, detonate_at: f32) {
    let clears_at = detonate_at + burn_duration(bomb.kind);
    for pos in grid.blast_cells(bomb.pos, bomb.range, bomb.kind) {
        grid.ignite(pos, detonate_at, clears_at, bomb.kind.into());
    }
}

/// Pulls detonation times forward for bombs caught in an earlier blast.
///
/// Bounded to `CHAIN_PASS_LIMIT` passes; chains nested deeper than that keep
/// their later (optimistic) timing. Returns the number of passes that changed
/// anything.
fn resolve_chain_reactions(
    grid: &mut HazardGrid,
    bombs: &[&BombView],
    detonations: &mut [f32],
) -> usize {
    let mut productive_passes = 0;
    for _ in 0..CHAIN_PASS_LIMIT {
        let mut changed = false;
        for (bomb, detonate_at) in bombs.iter().zip(detonations.iter_mut()) {
            let triggered_at = grid.time_to_ignite(bomb.pos);
            if triggered_at + TIME_EPSILON < *detonate_at {
                *detonate_at = triggered_at;
                sweep_bomb(grid, bomb, triggered_at);
                changed = true;
            }
        }
        if !changed {
            break;
        }
        productive_passes += 1;
    }
    productive_passes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{EXPLOSION_DURATION, FIRE_BURN_DURATION};
    use crate::test_support::*;
    use crate::world::ExplosionView;

    #[test]
    fn open_grid_blast_covers_cross_of_range() {
        let mut world = open_world(13, 11);
        world.bombs.push(bomb(Pos { y: 5, x: 5 }, 3.0, 2, BombKind::Normal));
        let grid = build_hazard_grid(&world);

        for x in 3..=7 {
            assert_eq!(grid.time_to_ignite(Pos { y: 5, x }), 3.0, "row cell x={x}");
        }
        for y in 3..=7 {
            assert_eq!(grid.time_to_ignite(Pos { y, x: 5 }), 3.0, "column cell y={y}");
        }
        assert_eq!(grid.time_to_ignite(Pos { y: 5, x: 8 }), f32::INFINITY);
        assert_eq!(grid.time_to_ignite(Pos { y: 4, x: 4 }), f32::INFINITY);
        let centre = grid.cell(Pos { y: 5, x: 5 }).expect("in bounds");
        assert!(centre.has_bomb && !centre.walkable);
        assert_eq!(centre.clears_at, 3.0 + EXPLOSION_DURATION);
        assert_eq!(centre.hazard_kind, HazardKind::Normal);
    }

    #[test]
    fn walls_stop_rays_and_crates_absorb_them() {
        let mut world = open_world(13, 11);
        world.obstacles.push(wall(Pos { y: 5, x: 7 }));
        world.obstacles.push(crate_at(Pos { y: 3, x: 5 }));
        world.bombs.push(bomb(Pos { y: 5, x: 5 }, 2.0, 4, BombKind::Normal));
        let grid = build_hazard_grid(&world);

        assert!(grid.is_dangerous(Pos { y: 5, x: 6 }));
        assert!(!grid.is_dangerous(Pos { y: 5, x: 7 }), "wall itself is never marked");
        assert!(!grid.is_dangerous(Pos { y: 5, x: 8 }), "ray must stop at the wall");
        assert!(grid.is_dangerous(Pos { y: 4, x: 5 }));
        assert!(grid.is_dangerous(Pos { y: 3, x: 5 }), "crate is marked");
        assert!(!grid.is_dangerous(Pos { y: 2, x: 5 }), "ray ends after the crate");
    }

    #[test]
    fn piercing_blast_passes_crates_but_not_walls() {
        let mut world = open_world(13, 11);
        world.obstacles.push(crate_at(Pos { y: 5, x: 6 }));
        world.obstacles.push(crate_at(Pos { y: 5, x: 7 }));
        world.obstacles.push(wall(Pos { y: 5, x: 3 }));
        world.bombs.push(bomb(Pos { y: 5, x: 5 }, 2.0, 3, BombKind::Piercing));
        let grid = build_hazard_grid(&world);

        for x in 6..=8 {
            assert!(grid.is_dangerous(Pos { y: 5, x }), "piercing ray reaches x={x}");
        }
        assert!(grid.is_dangerous(Pos { y: 5, x: 4 }));
        assert!(!grid.is_dangerous(Pos { y: 5, x: 2 }), "wall still stops piercing");
        assert_eq!(
            grid.cell(Pos { y: 5, x: 8 }).map(|cell| cell.hazard_kind),
            Some(HazardKind::Piercing)
        );
    }

    #[test]
    fn fire_bombs_linger_longer() {
        let mut world = open_world(13, 11);
        world.bombs.push(bomb(Pos { y: 2, x: 2 }, 1.0, 1, BombKind::Fire));
        let grid = build_hazard_grid(&world);
        let cell = grid.cell(Pos { y: 2, x: 3 }).expect("in bounds");
        assert_eq!(cell.ignites_at, 1.0);
        assert_eq!(cell.clears_at, 1.0 + FIRE_BURN_DURATION);
        assert!(FIRE_BURN_DURATION > EXPLOSION_DURATION);
    }

    #[test]
    fn chain_reaction_pulls_second_bomb_forward() {
        let mut world = open_world(13, 11);
        world.bombs.push(bomb(Pos { y: 5, x: 2 }, 1.0, 2, BombKind::Normal));
        world.bombs.push(bomb(Pos { y: 5, x: 4 }, 3.0, 3, BombKind::Normal));
        let grid = build_hazard_grid(&world);

        assert_eq!(grid.time_to_ignite(Pos { y: 5, x: 4 }), 1.0);
        assert_eq!(grid.time_to_ignite(Pos { y: 5, x: 7 }), 1.0, "chained blast re-swept early");
        assert_eq!(grid.time_to_ignite(Pos { y: 2, x: 4 }), 1.0);
    }

    #[test]
    fn chain_resolution_never_raises_ignition_times() {
        let mut world = open_world(15, 7);
        for (x, fuse) in [(1, 4.0), (3, 3.5), (5, 3.0), (7, 0.5), (9, 2.0), (11, 2.5)] {
            world.bombs.push(bomb(Pos { y: 3, x }, fuse, 2, BombKind::Normal));
        }
        let bombs: Vec<&BombView> = world.bombs.iter().collect();
        let mut grid = HazardGrid::new(world.width, world.height);
        let mut detonations: Vec<f32> = bombs.iter().map(|bomb| bomb.fuse).collect();
        for (bomb, at) in bombs.iter().zip(&detonations) {
            sweep_bomb(&mut grid, bomb, *at);
        }
        let before: Vec<f32> = grid.cells().map(|(_, cell)| cell.ignites_at).collect();
        let passes = resolve_chain_reactions(&mut grid, &bombs, &mut detonations);
        assert!(passes <= CHAIN_PASS_LIMIT);
        for ((pos, cell), earlier) in grid.cells().zip(before) {
            assert!(cell.ignites_at <= earlier, "{pos:?} ignition rose from {earlier}");
            assert!(cell.clears_at >= cell.ignites_at, "{pos:?} clears before igniting");
        }
        for (bomb, at) in bombs.iter().zip(&detonations) {
            assert!(*at <= bomb.fuse);
        }
    }

    #[test]
    fn active_explosion_burns_for_remaining_time_only() {
        let mut world = open_world(9, 9);
        world.explosions.push(ExplosionView {
            tiles: vec![Pos { y: 1, x: 1 }, Pos { y: 1, x: 2 }],
            remaining: 0.25,
            kind: BombKind::Ice,
            active: true,
        });
        world.explosions.push(ExplosionView {
            tiles: vec![Pos { y: 7, x: 7 }],
            remaining: 5.0,
            kind: BombKind::Normal,
            active: false,
        });
        let grid = build_hazard_grid(&world);

        let cell = grid.cell(Pos { y: 1, x: 2 }).expect("in bounds");
        assert_eq!(cell.ignites_at, 0.0);
        assert_eq!(cell.clears_at, 0.25);
        assert_eq!(cell.hazard_kind, HazardKind::Ice);
        assert!(grid.is_burning(Pos { y: 1, x: 1 }));
        assert!(!grid.is_dangerous(Pos { y: 7, x: 7 }), "inactive explosions are ignored");
    }

    #[test]
    fn debuff_collectible_is_permanent_hazard() {
        let mut world = open_world(9, 9);
        world.collectibles.push(collectible(Pos { y: 4, x: 4 }, CollectibleKind::Skull));
        world.collectibles.push(collectible(Pos { y: 2, x: 2 }, CollectibleKind::BombUp));
        let grid = build_hazard_grid(&world);

        let skull = grid.cell(Pos { y: 4, x: 4 }).expect("in bounds");
        assert_eq!(skull.ignites_at, 0.0);
        assert_eq!(skull.clears_at, f32::INFINITY);
        assert!(skull.has_collectible);
        let bomb_up = grid.cell(Pos { y: 2, x: 2 }).expect("in bounds");
        assert!(bomb_up.has_collectible && !bomb_up.is_dangerous());
    }

    #[test]
    fn out_of_bounds_input_is_ignored_and_queries_are_total() {
        let mut world = open_world(5, 5);
        world.bombs.push(bomb(Pos { y: -1, x: 2 }, 1.0, 3, BombKind::Normal));
        world.obstacles.push(wall(Pos { y: 9, x: 9 }));
        world.bombs.push(bomb(Pos { y: 0, x: 0 }, 1.0, 6, BombKind::Piercing));
        let grid = build_hazard_grid(&world);

        assert!(!grid.is_walkable(Pos { y: -3, x: 0 }));
        assert!(!grid.is_dangerous(Pos { y: 0, x: 40 }));
        assert!(grid.has_wall(Pos { y: 5, x: 0 }));
        assert_eq!(grid.time_to_ignite(Pos { y: 100, x: -100 }), f32::INFINITY);
        assert!(grid.is_dangerous(Pos { y: 0, x: 4 }));
        assert!(!grid.is_dangerous(Pos { y: 2, x: 2 }), "out-of-bounds bomb adds no hazard");
    }

    #[test]
    fn build_is_idempotent() {
        let world = crowded_world();
        let first = build_hazard_grid(&world);
        let second = build_hazard_grid(&world);
        assert_eq!(first, second);
        assert_eq!(first.fingerprint(), second.fingerprint());
    }
}
