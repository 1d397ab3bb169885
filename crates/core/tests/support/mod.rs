//! Seeded arena generator shared by the integration suites.

use blast_core::{
    Abilities, ActorId, ActorView, BombKind, BombView, CollectibleKind, CollectibleView,
    Direction, ExplosionView, ObstacleView, OpponentView, Pos, WorldSnapshot,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use slotmap::SlotMap;

const BOMB_KINDS: [BombKind; 4] =
    [BombKind::Normal, BombKind::Fire, BombKind::Ice, BombKind::Piercing];
const COLLECTIBLE_KINDS: [CollectibleKind; 6] = [
    CollectibleKind::BombUp,
    CollectibleKind::FireUp,
    CollectibleKind::Shield,
    CollectibleKind::Kick,
    CollectibleKind::Teleport,
    CollectibleKind::Skull,
];

fn roll(rng: &mut ChaCha8Rng, below: u32) -> u32 {
    rng.next_u32() % below
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    slice[rng.next_u64() as usize % slice.len()]
}

/// A random but reproducible arena and the actor under control.
pub fn random_arena(seed: u64) -> (WorldSnapshot, ActorView) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let width = 7 + roll(&mut rng, 9) as usize;
    let height = 7 + roll(&mut rng, 7) as usize;
    let mut world = WorldSnapshot::new(width, height);
    world.now = roll(&mut rng, 100) as f32 * 0.1;

    let mut open = Vec::new();
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let pos = Pos { y, x };
            match roll(&mut rng, 100) {
                0..12 => {
                    world.obstacles.push(ObstacleView { pos, destructible: false, active: true })
                }
                12..30 => {
                    world.obstacles.push(ObstacleView { pos, destructible: true, active: true })
                }
                30..36 => world.bombs.push(BombView {
                    pos,
                    fuse: (1 + roll(&mut rng, 30)) as f32 * 0.1,
                    range: 1 + roll(&mut rng, 4) as u8,
                    kind: choose(&mut rng, &BOMB_KINDS),
                    active: true,
                }),
                36..40 => {
                    world.collectibles.push(CollectibleView {
                        pos,
                        kind: choose(&mut rng, &COLLECTIBLE_KINDS),
                        active: true,
                    });
                    open.push(pos);
                }
                40..43 => {
                    world.explosions.push(ExplosionView {
                        tiles: vec![pos],
                        remaining: (1 + roll(&mut rng, 10)) as f32 * 0.1,
                        kind: choose(&mut rng, &BOMB_KINDS),
                        active: true,
                    });
                    open.push(pos);
                }
                _ => open.push(pos),
            }
        }
    }

    let mut ids: SlotMap<ActorId, ()> = SlotMap::with_key();
    let me = ids.insert(());
    let actor_pos = if open.is_empty() { Pos { y: 0, x: 0 } } else { choose(&mut rng, &open) };
    world.obstacles.retain(|obstacle| obstacle.pos != actor_pos);
    world.bombs.retain(|bomb| bomb.pos != actor_pos || roll(&mut rng, 3) == 0);

    for _ in 0..roll(&mut rng, 4) {
        if open.is_empty() {
            break;
        }
        let pos = choose(&mut rng, &open);
        world.opponents.push(OpponentView {
            id: ids.insert(()),
            pos,
            alive: roll(&mut rng, 5) != 0,
            facing: Some(choose(&mut rng, &Direction::ALL)),
            speed: 1.0 + roll(&mut rng, 4) as f32,
            abilities: Abilities {
                can_kick: roll(&mut rng, 2) == 0,
                can_punch: roll(&mut rng, 3) == 0,
                has_shield: false,
                has_teleport: false,
            },
            bomb_kind: choose(&mut rng, &BOMB_KINDS),
        });
    }

    let actor = ActorView {
        id: me,
        pos: actor_pos,
        speed: 1.0 + roll(&mut rng, 5) as f32,
        blast_range: 1 + roll(&mut rng, 4) as u8,
        bomb_kind: choose(&mut rng, &BOMB_KINDS),
        can_place_bomb: roll(&mut rng, 4) != 0,
        bomb_capacity: 1 + roll(&mut rng, 3) as u8,
        abilities: Abilities::default(),
    };
    (world, actor)
}
