//! `tanks`: plays bot-driven tank battles headlessly and prints a summary.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;

use tanks_app::bot::BotPilot;
use tanks_app::game_loop::{spawn_game_loop, Pacing};
use tanks_app::state::{GameLoopCommand, RunStats};
use tanks_core::config::GameConfig;
use tanks_sim::SimulationEngine;

#[derive(Parser, Debug)]
#[command(name = "tanks", about = "Headless tank battle runner")]
struct Cli {
    /// JSON game configuration. Missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many games have a winner.
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Hard cap on ticks.
    #[arg(long, default_value_t = 200_000)]
    max_ticks: u64,

    /// Tick on the wall clock instead of as fast as possible.
    #[arg(long)]
    realtime: bool,

    /// Print every Nth snapshot as JSON to stdout. 0 disables.
    #[arg(long, default_value_t = 0)]
    snapshot_every: u64,

    /// Print the final summary as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let stats = run(&cli, config)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{stats}");
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = GameConfig::from_json(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

fn run(cli: &Cli, config: GameConfig) -> Result<RunStats> {
    let dt = config.dt();
    let mut pilots: Vec<BotPilot> = (1..=config.players.len())
        .map(|p| {
            let player = p as u8;
            BotPilot::new(player, config.seed.wrapping_add(p as u64), &config.weapon, dt)
        })
        .collect();

    let engine = SimulationEngine::new(config).context("invalid game configuration")?;
    let pacing = if cli.realtime {
        Pacing::Realtime
    } else {
        Pacing::Lockstep
    };
    let handle = spawn_game_loop(engine, pacing).context("spawning game loop")?;
    info!(games = cli.games, max_ticks = cli.max_ticks, ?pacing, "run started");

    let mut stats = RunStats::default();
    while stats.games_completed < cli.games && stats.ticks < cli.max_ticks {
        if pacing == Pacing::Lockstep {
            handle
                .commands
                .send(GameLoopCommand::Step)
                .map_err(|_| anyhow!("game loop stopped unexpectedly"))?;
        }
        let snapshot = handle
            .snapshots
            .recv()
            .map_err(|_| anyhow!("game loop stopped unexpectedly"))?;

        stats.record(&snapshot);
        if cli.snapshot_every > 0 && stats.ticks % cli.snapshot_every == 0 {
            println!("{}", serde_json::to_string(&snapshot)?);
        }

        for pilot in &mut pilots {
            for command in pilot.decide(&snapshot) {
                // A send error means the loop is gone; the next recv reports it.
                let _ = handle.commands.send(GameLoopCommand::PlayerCommand(command));
            }
        }
    }

    let ticks = handle
        .shutdown()
        .map_err(|_| anyhow!("game loop thread panicked"))?;
    info!(ticks, games = stats.games_completed, "run finished");
    Ok(stats)
}
