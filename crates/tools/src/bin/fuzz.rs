use std::io;

use anyhow::{Result, bail};
use blast_core::DifficultyTier;
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tools::{Arena, ArenaConfig};
use tracing_subscriber::EnvFilter;

/// Runs randomized arenas and fails on the first broken invariant.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 50)]
    runs: u32,
    #[arg(short, long, default_value_t = 1200)]
    ticks: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_config(rng: &mut ChaCha8Rng, ticks: u32) -> ArenaConfig {
    let bot_count = 2 + (rng.next_u32() % 3) as usize;
    ArenaConfig {
        width: choose(rng, &[9, 11, 13, 15]),
        height: choose(rng, &[7, 9, 11, 13]),
        crate_density: choose(rng, &[0.0, 0.3, 0.6, 0.9]),
        drop_chance: choose(rng, &[0.0, 0.3, 1.0]),
        tick_seconds: choose(rng, &[0.02, 0.05, 0.1]),
        max_ticks: ticks,
        bots: (0..bot_count).map(|_| choose(rng, &DifficultyTier::ALL)).collect(),
        overrides: Vec::new(),
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let args = Args::parse();
    println!(
        "Fuzzing {} arenas from seed {} for up to {} ticks each...",
        args.runs, args.seed, args.ticks
    );
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for run in 0..args.runs {
        let config = random_config(&mut rng, args.ticks);
        config.validate()?;
        let seed = rng.next_u64();

        let mut arena = Arena::new(&config, seed);
        while !arena.is_finished() {
            arena.step();
            let violations = arena.violations();
            if !violations.is_empty() {
                bail!(
                    "run {run} (seed {seed}) broke {} invariant(s) at tick {}: {}",
                    violations.len(),
                    arena.tick(),
                    violations.join("; ")
                );
            }
        }
        let summary = arena.summary();

        let replay = Arena::new(&config, seed).run();
        if replay != summary {
            bail!(
                "run {run} (seed {seed}) diverged on replay: {:016x} vs {:016x}",
                summary.state_hash,
                replay.state_hash
            );
        }
        println!(
            "run {run}: {}x{} with {} bots finished after {} ticks, {} alive",
            config.width,
            config.height,
            config.bots.len(),
            summary.ticks,
            summary.survivors
        );
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
