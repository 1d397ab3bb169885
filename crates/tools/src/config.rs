//! Arena harness configuration loaded from TOML.
//! This module exists so match parameters and per-tier tuning live outside the binaries.
//! It does not own simulation rules; the arena only reads these values.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use blast_core::constants::MAX_SPEED;
use blast_core::{DifficultyProfile, DifficultyTier};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    pub width: usize,
    pub height: usize,
    /// Probability that an eligible floor tile starts as a crate.
    pub crate_density: f32,
    /// Probability that a destroyed crate leaves a pickup behind.
    pub drop_chance: f32,
    /// Simulated seconds per tick.
    pub tick_seconds: f32,
    pub max_ticks: u32,
    /// One bot per entry, spawned clockwise from the top-left corner.
    pub bots: Vec<DifficultyTier>,
    pub overrides: Vec<ProfileOverride>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 15,
            height: 13,
            crate_density: 0.6,
            drop_chance: 0.3,
            tick_seconds: 0.05,
            max_ticks: 2400,
            bots: vec![
                DifficultyTier::Hard,
                DifficultyTier::Medium,
                DifficultyTier::Easy,
                DifficultyTier::Medium,
            ],
            overrides: Vec::new(),
        }
    }
}

/// Replaces selected fields of one tier's built-in profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileOverride {
    pub tier: DifficultyTier,
    #[serde(default)]
    pub reaction_latency: Option<f32>,
    #[serde(default)]
    pub bomb_cooldown: Option<f32>,
    #[serde(default)]
    pub attack_range: Option<u32>,
    #[serde(default)]
    pub use_pathfinding: Option<bool>,
    #[serde(default)]
    pub use_prediction: Option<bool>,
    #[serde(default)]
    pub lay_traps: Option<bool>,
    #[serde(default)]
    pub prediction_accuracy: Option<f32>,
}

impl ArenaConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read arena config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("failed to parse arena config {}", path.display()))?;
        config.validate().with_context(|| format!("invalid arena config {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.width >= 7 && self.height >= 7, "arena must be at least 7x7");
        ensure!(
            self.width % 2 == 1 && self.height % 2 == 1,
            "arena dimensions must be odd so pillars line up, got {}x{}",
            self.width,
            self.height
        );
        ensure!((0.0..=1.0).contains(&self.crate_density), "crate_density must be in [0, 1]");
        ensure!((0.0..=1.0).contains(&self.drop_chance), "drop_chance must be in [0, 1]");
        ensure!(
            self.tick_seconds > 0.0 && self.tick_seconds * MAX_SPEED <= 1.0,
            "tick_seconds must be positive and short enough that no bot crosses two tiles per tick"
        );
        ensure!(self.max_ticks > 0, "max_ticks must be positive");
        ensure!((2..=4).contains(&self.bots.len()), "an arena needs two to four bots");
        for entry in &self.overrides {
            if let Some(accuracy) = entry.prediction_accuracy {
                ensure!(
                    (0.0..=1.0).contains(&accuracy),
                    "prediction_accuracy for {} must be in [0, 1]",
                    entry.tier
                );
            }
        }
        Ok(())
    }

    /// Built-in profile for `tier` with every matching override applied in order.
    pub fn profile_for(&self, tier: DifficultyTier) -> DifficultyProfile {
        let mut profile = DifficultyProfile::for_tier(tier);
        for entry in self.overrides.iter().filter(|entry| entry.tier == tier) {
            if let Some(value) = entry.reaction_latency {
                profile.reaction_latency = value;
            }
            if let Some(value) = entry.bomb_cooldown {
                profile.bomb_cooldown = value;
            }
            if let Some(value) = entry.attack_range {
                profile.attack_range = value;
            }
            if let Some(value) = entry.use_pathfinding {
                profile.use_pathfinding = value;
            }
            if let Some(value) = entry.use_prediction {
                profile.use_prediction = value;
            }
            if let Some(value) = entry.lay_traps {
                profile.lay_traps = value;
            }
            if let Some(value) = entry.prediction_accuracy {
                profile.prediction_accuracy = value;
            }
        }
        profile
    }
}
