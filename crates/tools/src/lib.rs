//! Headless arena harness for the `blast_core` decision engine.
//! This crate exists to run engine-driven bots against each other for soak tests and tuning.
//! It does not own any tactical logic; every decision comes from `blast_core::decide`.

pub mod arena;
pub mod config;

pub use arena::{Arena, Bot, MatchStats, MatchSummary};
pub use config::{ArenaConfig, ProfileOverride};

/// Plays one match to completion.
pub fn run_match(config: &ArenaConfig, seed: u64) -> MatchSummary {
    Arena::new(config, seed).run()
}
