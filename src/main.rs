#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use seabattle::{
    init_logging, Sea, ShootingStrategy, ShootingStrategyName, GRID_HEIGHT, GRID_WIDTH,
};

#[cfg(feature = "std")]
use anyhow::{bail, Context};
#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use log::{debug, info};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use serde::Serialize;

/// Plays automated games: a random fleet is placed, then the chosen strategy
/// shoots until every ship is sunk.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[arg(long, value_enum, default_value_t = ShootingStrategyName::SeekThenDestroyRandom)]
    strategy: ShootingStrategyName,
    #[arg(long, default_value_t = 100)]
    games: usize,
    #[arg(long, help = "Fix RNG seed for reproducible runs (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, help = "Print the report as a single JSON object")]
    json: bool,
    #[arg(long, help = "Print the final sea of the first game")]
    show: bool,
}

#[derive(Serialize)]
#[cfg(feature = "std")]
struct Report {
    strategy: ShootingStrategyName,
    games: usize,
    seed: Option<u64>,
    min_shots: usize,
    max_shots: usize,
    mean_shots: f64,
}

/// Shoots at `sea` until its fleet is sunk and returns the number of shots.
#[cfg(feature = "std")]
fn play_out(
    strategy: &mut dyn ShootingStrategy,
    rng: &mut SmallRng,
    sea: &mut Sea,
) -> anyhow::Result<usize> {
    let budget = GRID_WIDTH * GRID_HEIGHT;
    let mut shots = 0;
    while !sea.are_ships_all_dead() {
        if shots >= budget {
            bail!("{} did not sink the fleet in {} shots", strategy.name(), budget);
        }
        let pos = strategy.play_shoot(rng, sea)?;
        if !sea.receive_shot(pos) {
            bail!("{} chose an illegal shot at {}", strategy.name(), pos);
        }
        shots += 1;
    }
    Ok(shots)
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    if cli.games == 0 {
        bail!("--games must be at least 1");
    }

    let mut rng = if let Some(s) = cli.seed {
        info!("Using fixed seed: {} (run will be reproducible)", s);
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    };

    let mut results = Vec::with_capacity(cli.games);
    for game in 0..cli.games {
        let mut sea = Sea::new();
        sea.place_fleet_randomly(&mut rng)
            .with_context(|| format!("placing fleet for game {}", game))?;
        let mut strategy = cli.strategy.build();
        let shots = play_out(strategy.as_mut(), &mut rng, &mut sea)
            .with_context(|| format!("playing game {}", game))?;
        debug!("game {} sunk in {} shots", game, shots);
        if cli.show && game == 0 {
            println!("{}\n", sea);
        }
        results.push(shots);
    }

    let report = Report {
        strategy: cli.strategy,
        games: cli.games,
        seed: cli.seed,
        min_shots: results.iter().copied().min().unwrap_or(0),
        max_shots: results.iter().copied().max().unwrap_or(0),
        mean_shots: results.iter().sum::<usize>() as f64 / results.len() as f64,
    };

    if cli.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!(
            "{} over {} games: min {} / max {} / mean {:.1} shots",
            report.strategy, report.games, report.min_shots, report.max_shots, report.mean_shots
        );
    }
    Ok(())
}
