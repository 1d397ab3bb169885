//! Shared test fixtures for grid, escape and policy test suites.
//! This module exists to avoid repeating world and actor setup across many tests.
//! It does not own production decision logic.

use slotmap::SlotMap;

use crate::types::*;
use crate::world::*;

pub(crate) fn open_world(width: usize, height: usize) -> WorldSnapshot {
    WorldSnapshot::new(width, height)
}

pub(crate) fn bomb(pos: Pos, fuse: f32, range: u8, kind: BombKind) -> BombView {
    BombView { pos, fuse, range, kind, active: true }
}

pub(crate) fn wall(pos: Pos) -> ObstacleView {
    ObstacleView { pos, destructible: false, active: true }
}

pub(crate) fn crate_at(pos: Pos) -> ObstacleView {
    ObstacleView { pos, destructible: true, active: true }
}

pub(crate) fn collectible(pos: Pos, kind: CollectibleKind) -> CollectibleView {
    CollectibleView { pos, kind, active: true }
}

/// Walls on every cell except the listed open ones.
pub(crate) fn carved_world(width: usize, height: usize, open: &[Pos]) -> WorldSnapshot {
    let mut world = open_world(width, height);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let pos = Pos { y, x };
            if !open.contains(&pos) {
                world.obstacles.push(wall(pos));
            }
        }
    }
    world
}

/// A 3-cell dead end: the actor at (1,1) can only move right, to (1,2) and (1,3).
pub(crate) fn dead_end_world() -> (WorldSnapshot, Pos) {
    let open: Vec<Pos> = (1..=3).map(|x| Pos { y: 1, x }).collect();
    (carved_world(5, 3, &open), Pos { y: 1, x: 1 })
}

/// A one-row corridor from (1,1) to (1, width-2).
pub(crate) fn long_corridor_world(width: usize) -> (WorldSnapshot, Pos) {
    let open: Vec<Pos> = (1..width as i32 - 1).map(|x| Pos { y: 1, x }).collect();
    (carved_world(width, 3, &open), Pos { y: 1, x: 1 })
}

/// Corridor on row 4 from x=1 to x=7 with live fire at (4,4).
pub(crate) fn hazard_corridor_world() -> (WorldSnapshot, Pos, Pos) {
    let open: Vec<Pos> = (1..=7).map(|x| Pos { y: 4, x }).collect();
    let mut world = carved_world(9, 9, &open);
    world.explosions.push(ExplosionView {
        tiles: vec![Pos { y: 4, x: 4 }],
        remaining: 2.0,
        kind: BombKind::Normal,
        active: true,
    });
    (world, Pos { y: 4, x: 1 }, Pos { y: 4, x: 7 })
}

/// Every kind of input at once, for idempotence and fingerprint checks.
pub(crate) fn crowded_world() -> WorldSnapshot {
    let mut world = open_world(13, 11);
    for y in (1..11).step_by(2) {
        for x in (1..13).step_by(2) {
            world.obstacles.push(wall(Pos { y, x }));
        }
    }
    for pos in [Pos { y: 2, x: 3 }, Pos { y: 4, x: 6 }, Pos { y: 8, x: 9 }] {
        world.obstacles.push(crate_at(pos));
    }
    world.bombs.push(bomb(Pos { y: 2, x: 2 }, 0.8, 3, BombKind::Normal));
    world.bombs.push(bomb(Pos { y: 2, x: 6 }, 2.9, 2, BombKind::Fire));
    world.bombs.push(bomb(Pos { y: 6, x: 6 }, 1.7, 4, BombKind::Piercing));
    world.explosions.push(ExplosionView {
        tiles: vec![Pos { y: 10, x: 0 }, Pos { y: 10, x: 1 }, Pos { y: 9, x: 0 }],
        remaining: 0.3,
        kind: BombKind::Ice,
        active: true,
    });
    world.collectibles.push(collectible(Pos { y: 0, x: 12 }, CollectibleKind::Skull));
    world.collectibles.push(collectible(Pos { y: 10, x: 12 }, CollectibleKind::Shield));
    world
}

pub(crate) fn actor_ids(count: usize) -> Vec<ActorId> {
    let mut keys: SlotMap<ActorId, ()> = SlotMap::with_key();
    (0..count).map(|_| keys.insert(())).collect()
}

pub(crate) fn actor(id: ActorId, pos: Pos) -> ActorView {
    ActorView {
        id,
        pos,
        speed: 3.0,
        blast_range: 2,
        bomb_kind: BombKind::Normal,
        can_place_bomb: true,
        bomb_capacity: 1,
        abilities: Abilities::default(),
    }
}

pub(crate) fn opponent(id: ActorId, pos: Pos) -> OpponentView {
    OpponentView {
        id,
        pos,
        alive: true,
        facing: None,
        speed: 3.0,
        abilities: Abilities::default(),
        bomb_kind: BombKind::Normal,
    }
}
