//! Soft avoidance zones projected from opponents who can move bombs.
//! This module exists so kick and punch threats are handled apart from computed hazard.
//! It does not own the hazard grid; zones are returned beside it, never written into it.

use std::collections::BTreeSet;

use slotmap::SecondaryMap;

use crate::constants::{KICK_THREAT_TILES, PUNCH_THREAT_RADIUS};
use crate::hazard::HazardGrid;
use crate::pathfinding::manhattan;
use crate::types::*;
use crate::world::OpponentView;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CachedAbilities {
    pub abilities: Abilities,
    pub bomb_kind: BombKind,
}

/// Last-observed capabilities per opponent, refreshed once per tick.
#[derive(Clone, Debug, Default)]
pub struct EnemyAbilityCache {
    entries: SecondaryMap<ActorId, CachedAbilities>,
}

impl EnemyAbilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records live opponents and forgets dead ones.
    pub fn refresh(&mut self, opponents: &[OpponentView]) {
        for opponent in opponents {
            if opponent.alive {
                let cached = CachedAbilities {
                    abilities: opponent.abilities,
                    bomb_kind: opponent.bomb_kind,
                };
                self.entries.insert(opponent.id, cached);
            } else {
                self.entries.remove(opponent.id);
            }
        }
    }

    pub fn get(&self, id: ActorId) -> Option<&CachedAbilities> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cells an opponent could turn hazardous by kicking or punching an adjacent bomb.
pub fn project_threat_zones(
    grid: &HazardGrid,
    opponents: &[OpponentView],
    cache: &EnemyAbilityCache,
) -> BTreeSet<Pos> {
    let mut zones = BTreeSet::new();
    for opponent in opponents.iter().filter(|opponent| opponent.alive) {
        let Some(cached) = cache.get(opponent.id) else {
            continue;
        };
        let Abilities { can_kick, can_punch, .. } = cached.abilities;
        if !can_kick && !can_punch {
            continue;
        }
        for dir in Direction::ALL {
            let bomb_pos = opponent.pos.step(dir);
            if !grid.has_bomb(bomb_pos) {
                continue;
            }
            if can_kick {
                project_kick(grid, bomb_pos, dir, &mut zones);
            }
            if can_punch {
                project_punch(grid, bomb_pos, &mut zones);
            }
        }
    }
    zones
}

fn project_kick(grid: &HazardGrid, bomb_pos: Pos, dir: Direction, zones: &mut BTreeSet<Pos>) {
    let mut cursor = bomb_pos;
    for _ in 0..KICK_THREAT_TILES {
        cursor = cursor.step(dir);
        if !grid.is_walkable(cursor) {
            break;
        }
        zones.insert(cursor);
    }
}

fn project_punch(grid: &HazardGrid, bomb_pos: Pos, zones: &mut BTreeSet<Pos>) {
    let radius = PUNCH_THREAT_RADIUS as i32;
    for y in (bomb_pos.y - radius)..=(bomb_pos.y + radius) {
        for x in (bomb_pos.x - radius)..=(bomb_pos.x + radius) {
            let pos = Pos { y, x };
            if pos != bomb_pos
                && manhattan(pos, bomb_pos) <= PUNCH_THREAT_RADIUS
                && grid.is_walkable(pos)
            {
                zones.insert(pos);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hazard::build_hazard_grid;
    use crate::test_support::*;

    fn kicker_setup(abilities: Abilities) -> (HazardGrid, Vec<OpponentView>, EnemyAbilityCache) {
        let ids = actor_ids(1);
        let mut world = open_world(13, 11);
        world.bombs.push(bomb(Pos { y: 5, x: 4 }, 2.5, 1, BombKind::Normal));
        world.obstacles.push(wall(Pos { y: 5, x: 8 }));
        let mut kicker = opponent(ids[0], Pos { y: 5, x: 3 });
        kicker.abilities = abilities;
        world.opponents.push(kicker);
        let mut cache = EnemyAbilityCache::new();
        cache.refresh(&world.opponents);
        (build_hazard_grid(&world), world.opponents, cache)
    }

    #[test]
    fn kick_zone_runs_away_from_the_kicker_until_blocked() {
        let abilities = Abilities { can_kick: true, ..Abilities::default() };
        let (grid, opponents, cache) = kicker_setup(abilities);
        let zones = project_threat_zones(&grid, &opponents, &cache);
        let expected: BTreeSet<Pos> = (5..=7).map(|x| Pos { y: 5, x }).collect();
        assert_eq!(zones, expected, "ray stops before the wall at x=8");
        assert!(!grid.is_dangerous(Pos { y: 5, x: 7 }), "zones never leak into the grid");
    }

    #[test]
    fn punch_zone_surrounds_the_bomb() {
        let abilities = Abilities { can_punch: true, ..Abilities::default() };
        let (grid, opponents, cache) = kicker_setup(abilities);
        let zones = project_threat_zones(&grid, &opponents, &cache);
        assert!(zones.contains(&Pos { y: 3, x: 4 }));
        assert!(zones.contains(&Pos { y: 6, x: 5 }));
        assert!(!zones.contains(&Pos { y: 5, x: 4 }), "bomb cell is not walkable");
        assert!(!zones.contains(&Pos { y: 2, x: 4 }));
        assert!(zones.iter().all(|pos| manhattan(*pos, Pos { y: 5, x: 4 }) <= 2));
    }

    #[test]
    fn opponents_without_abilities_project_nothing() {
        let (grid, opponents, cache) = kicker_setup(Abilities::default());
        assert!(project_threat_zones(&grid, &opponents, &cache).is_empty());
    }

    #[test]
    fn uncached_opponents_are_ignored() {
        let abilities = Abilities { can_kick: true, ..Abilities::default() };
        let (grid, opponents, _) = kicker_setup(abilities);
        let empty = EnemyAbilityCache::new();
        assert!(project_threat_zones(&grid, &opponents, &empty).is_empty());
    }

    #[test]
    fn refresh_forgets_dead_opponents() {
        let ids = actor_ids(2);
        let mut opponents =
            vec![opponent(ids[0], Pos { y: 1, x: 1 }), opponent(ids[1], Pos { y: 2, x: 2 })];
        let mut cache = EnemyAbilityCache::new();
        cache.refresh(&opponents);
        assert_eq!(cache.len(), 2);
        opponents[1].alive = false;
        opponents[0].bomb_kind = BombKind::Ice;
        cache.refresh(&opponents);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(ids[0]).map(|cached| cached.bomb_kind), Some(BombKind::Ice));
        assert!(cache.get(ids[1]).is_none());
    }
}
