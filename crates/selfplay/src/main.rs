//! Self-play CLI
//!
//! Plays AI-vs-AI games through the controller's tick interface and reports
//! the results.

mod report;
mod runner;

use anyhow::Result;
use chess_game::{AiLevel, GameConfig};
use clap::Parser;
use std::path::PathBuf;

use report::SelfplayReport;
use runner::{RunConfig, Runner};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML game configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of games to play
    #[arg(short, long, default_value_t = 10)]
    games: u32,

    /// Moves after which a game is abandoned
    #[arg(long, default_value_t = 300)]
    max_turns: u32,

    /// Base RNG seed (game N uses seed + N)
    #[arg(long)]
    seed: Option<u64>,

    /// AI level 0-4, overrides the config file
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=4))]
    level: Option<u8>,

    /// Milliseconds per update tick
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Write a JSON report here
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .init();

    let mut game = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(level) = args.level {
        game.level_ai = AiLevel::try_from(level)?;
    }
    if args.seed.is_some() {
        game.seed = args.seed;
    }

    let runner = Runner::new(RunConfig {
        games: args.games,
        max_turns: args.max_turns,
        frame_ms: args.frame_ms,
        game,
    });
    log::info!(
        "playing {} games at level {}",
        args.games,
        u8::from(runner.config().game.level_ai)
    );

    let games = runner.run()?;
    let report = SelfplayReport::new(runner.config().clone(), games);
    report.print_report();

    if let Some(path) = &args.report {
        report.save(path)?;
        log::info!("report written to {}", path.display());
    }
    Ok(())
}
