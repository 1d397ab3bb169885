use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use blast_core::DifficultyTier;
use clap::Parser;
use tools::{ArenaConfig, run_match};
use tracing_subscriber::EnvFilter;

/// Plays engine-driven bots against each other and reports each match.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Arena configuration TOML; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seed of the first match; later matches use consecutive seeds
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1)]
    matches: u32,
    /// Comma-separated tiers, one bot each (overrides the config)
    #[arg(short, long, value_delimiter = ',')]
    bots: Vec<DifficultyTier>,
    /// Print one JSON object per match instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::default(),
    };
    if !args.bots.is_empty() {
        config.bots = args.bots.clone();
    }
    config.validate().context("invalid arena settings")?;

    let mut wins = vec![0u32; config.bots.len()];
    let mut draws = 0u32;
    for offset in 0..u64::from(args.matches) {
        let seed = args.seed.wrapping_add(offset);
        let summary = run_match(&config, seed);
        match summary.winner_slot {
            Some(slot) => wins[slot] += 1,
            None => draws += 1,
        }
        if args.json {
            println!("{}", serde_json::to_string(&summary).context("failed to encode summary")?);
        } else {
            let winner = match (summary.winner_slot, summary.winner) {
                (Some(slot), Some(tier)) => format!("bot {slot} ({tier})"),
                _ => "draw".to_string(),
            };
            println!(
                "seed {seed}: {winner} after {} ticks, {} bombs, {} crates, hash {:016x}",
                summary.ticks,
                summary.stats.bombs_placed,
                summary.stats.crates_destroyed,
                summary.state_hash
            );
        }
    }

    if !args.json {
        for (slot, tier) in config.bots.iter().enumerate() {
            println!("bot {slot} ({tier}): {} wins", wins[slot]);
        }
        println!("draws: {draws}");
    }
    Ok(())
}
