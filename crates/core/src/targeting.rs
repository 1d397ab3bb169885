//! "What next" scoring for collectibles, obstacles and opponents.
//! This module exists to keep priority tables and heuristics out of the policy tiers.
//! It does not own movement; callers receive cells and route to them themselves.

mod obstacles;
mod pickups;
mod prediction;

pub use obstacles::{ObstacleTarget, best_obstacle, obstacle_value};
pub use pickups::{base_priority, best_collectible, high_priority_collectible, score_collectible};
pub use prediction::predict_opponent_position;
