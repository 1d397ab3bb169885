//! Classic arena topology: border walls, a pillar lattice and random crates.

use std::collections::BTreeSet;
use std::iter;

use blast_core::rng::chance;
use blast_core::{Direction, Pos};
use rand_chacha::ChaCha8Rng;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct Layout {
    pub(super) walls: BTreeSet<Pos>,
    pub(super) crates: BTreeSet<Pos>,
    /// Clockwise from the top-left corner.
    pub(super) spawns: [Pos; 4],
}

fn spawn_corners(width: usize, height: usize) -> [Pos; 4] {
    let (right, bottom) = (width as i32 - 2, height as i32 - 2);
    [
        Pos { y: 1, x: 1 },
        Pos { y: 1, x: right },
        Pos { y: bottom, x: right },
        Pos { y: bottom, x: 1 },
    ]
}

pub(super) fn classic_layout(
    width: usize,
    height: usize,
    crate_density: f32,
    rng: &mut ChaCha8Rng,
) -> Layout {
    let spawns = spawn_corners(width, height);
    let keep_clear: BTreeSet<Pos> = spawns
        .iter()
        .flat_map(|spawn| {
            iter::once(*spawn).chain(Direction::ALL.into_iter().map(|dir| spawn.step(dir)))
        })
        .collect();

    let mut walls = BTreeSet::new();
    let mut crates = BTreeSet::new();
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let pos = Pos { y, x };
            let border = y == 0 || x == 0 || y == height as i32 - 1 || x == width as i32 - 1;
            if border || (y % 2 == 0 && x % 2 == 0) {
                walls.insert(pos);
            } else if !keep_clear.contains(&pos) && chance(rng, crate_density) {
                crates.insert(pos);
            }
        }
    }
    Layout { walls, crates, spawns }
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    #[test]
    fn spawns_and_their_exits_stay_clear() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let layout = classic_layout(15, 13, 1.0, &mut rng);
        for spawn in layout.spawns {
            assert!(!layout.walls.contains(&spawn) && !layout.crates.contains(&spawn));
            let exits = Direction::ALL
                .into_iter()
                .map(|dir| spawn.step(dir))
                .filter(|pos| !layout.walls.contains(pos) && !layout.crates.contains(pos))
                .count();
            assert_eq!(exits, 2, "corner {spawn:?} should open along both edges");
        }
    }

    #[test]
    fn pillars_sit_on_even_coordinates() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let layout = classic_layout(9, 7, 0.0, &mut rng);
        assert!(layout.crates.is_empty());
        assert!(layout.walls.contains(&Pos { y: 2, x: 2 }));
        assert!(layout.walls.contains(&Pos { y: 4, x: 6 }));
        assert!(!layout.walls.contains(&Pos { y: 3, x: 3 }));
        assert!(layout.walls.contains(&Pos { y: 6, x: 0 }));
    }

    #[test]
    fn same_seed_same_layout() {
        let build = || classic_layout(13, 11, 0.6, &mut ChaCha8Rng::seed_from_u64(21));
        assert_eq!(build(), build());
    }
}
