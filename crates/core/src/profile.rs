//! Difficulty tiers and the immutable tuning profile each tier selects.
//! This module exists so every behavior toggle lives in one serializable struct.
//! It does not own any decision logic; the policy only reads these values.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 3] =
        [DifficultyTier::Easy, DifficultyTier::Medium, DifficultyTier::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            DifficultyTier::Easy => "easy",
            DifficultyTier::Medium => "medium",
            DifficultyTier::Hard => "hard",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseTierError {
    /// The name did not match any known tier.
    Unknown(String),
}

impl fmt::Display for ParseTierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(name) => {
                write!(f, "unknown difficulty tier {name:?} (expected easy, medium or hard)")
            }
        }
    }
}

impl Error for ParseTierError {}

impl FromStr for DifficultyTier {
    type Err = ParseTierError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseTierError::Unknown(value.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub tier: DifficultyTier,
    /// Minimum seconds between full re-evaluations outside of danger.
    pub reaction_latency: f32,
    /// Minimum seconds between two bombs placed by this actor.
    pub bomb_cooldown: f32,
    /// Manhattan distance at which opponents become attack candidates.
    pub attack_range: u32,
    pub use_pathfinding: bool,
    pub use_prediction: bool,
    pub lay_traps: bool,
    pub strategic_obstacles: bool,
    /// Probability in `[0, 1]` that a prediction is trusted on a given tick.
    pub prediction_accuracy: f32,
}

impl DifficultyProfile {
    pub fn for_tier(tier: DifficultyTier) -> Self {
        match tier {
            // The periodic nearest-target strategy: greedy steps, no lookahead.
            DifficultyTier::Easy => Self {
                tier,
                reaction_latency: 0.45,
                bomb_cooldown: 2.5,
                attack_range: 3,
                use_pathfinding: false,
                use_prediction: false,
                lay_traps: false,
                strategic_obstacles: false,
                prediction_accuracy: 0.0,
            },
            DifficultyTier::Medium => Self {
                tier,
                reaction_latency: 0.25,
                bomb_cooldown: 1.5,
                attack_range: 5,
                use_pathfinding: true,
                use_prediction: true,
                lay_traps: false,
                strategic_obstacles: true,
                prediction_accuracy: 0.5,
            },
            DifficultyTier::Hard => Self {
                tier,
                reaction_latency: 0.1,
                bomb_cooldown: 0.8,
                attack_range: 7,
                use_pathfinding: true,
                use_prediction: true,
                lay_traps: true,
                strategic_obstacles: true,
                prediction_accuracy: 0.85,
            },
        }
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self::for_tier(DifficultyTier::Medium)
    }
}
