//! Short-horizon guess at where an opponent is heading.

use crate::constants::PREDICTION_LOOKAHEAD;
use crate::hazard::HazardGrid;
use crate::types::*;
use crate::world::OpponentView;

const HEADING_WEIGHT: i32 = 3;
const SAFE_WEIGHT: i32 = 2;
const DANGER_WEIGHT: i32 = -4;

/// Best-weighted cell the opponent could reach within the lookahead, walking
/// straight in one of the four directions. Continuing the current heading and
/// ending on a safe cell both weigh in; the current cell is the fallback.
pub fn predict_opponent_position(grid: &HazardGrid, opponent: &OpponentView) -> Pos {
    let max_tiles = (opponent.speed.max(0.0) * PREDICTION_LOOKAHEAD).floor() as i32;
    let mut best = (0, opponent.pos);
    for dir in Direction::ALL {
        let mut cursor = opponent.pos;
        for distance in 1..=max_tiles {
            cursor = cursor.step(dir);
            if !grid.is_walkable(cursor) {
                break;
            }
            let mut weight = distance;
            if opponent.facing == Some(dir) {
                weight += HEADING_WEIGHT;
            }
            weight += if grid.is_safe(cursor) { SAFE_WEIGHT } else { DANGER_WEIGHT };
            if weight > best.0 {
                best = (weight, cursor);
            }
        }
    }
    best.1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hazard::build_hazard_grid;
    use crate::test_support::*;

    #[test]
    fn follows_heading_in_open_space() {
        let grid = build_hazard_grid(&open_world(13, 11));
        let mut runner = opponent(actor_ids(1)[0], Pos { y: 5, x: 5 });
        runner.facing = Some(Direction::Left);
        runner.speed = 3.0;
        assert_eq!(predict_opponent_position(&grid, &runner), Pos { y: 5, x: 2 });
    }

    #[test]
    fn avoids_predicting_into_danger() {
        let mut world = open_world(13, 11);
        world.bombs.push(bomb(Pos { y: 3, x: 8 }, 1.0, 3, BombKind::Normal));
        let grid = build_hazard_grid(&world);
        let mut runner = opponent(actor_ids(1)[0], Pos { y: 5, x: 5 });
        runner.facing = Some(Direction::Right);
        runner.speed = 3.0;
        let predicted = predict_opponent_position(&grid, &runner);
        assert!(grid.is_safe(predicted));
        assert_eq!(predicted, Pos { y: 5, x: 7 });
    }

    #[test]
    fn stationary_or_boxed_opponent_stays_put() {
        let (world, origin) = dead_end_world();
        let grid = build_hazard_grid(&world);
        let mut still = opponent(actor_ids(1)[0], Pos { y: 1, x: 2 });
        still.speed = 0.0;
        assert_eq!(predict_opponent_position(&grid, &still), Pos { y: 1, x: 2 });
        let boxed = opponent(actor_ids(1)[0], origin);
        assert_eq!(predict_opponent_position(&grid, &boxed), Pos { y: 1, x: 3 });
    }
}
