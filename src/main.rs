//! Headless runner (default binary).
//!
//! Plays one game with a random intent source through the reference driver and
//! prints the result. Logs go to stderr; stdout carries only the result.

use std::ops::ControlFlow;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{debug, warn, Level};

use blockfall::core::{Engine, Randomizer};
use blockfall::driver::{AutoPlayer, Driver, DriverConfig, RunSummary};
use blockfall::types::TICK_MS;

#[derive(Parser, Debug)]
#[command(name = "blockfall", version, about = "Play a headless falling-block game")]
struct Args {
    /// Seed for piece generation (and the intent source); random when omitted
    #[arg(long)]
    seed: Option<u32>,

    /// Tick length in milliseconds
    #[arg(long, default_value_t = TICK_MS as u64)]
    tick_ms: u64,

    /// Stop after this many ticks
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// Random intents queued before each tick
    #[arg(long, default_value_t = 1)]
    intents_per_tick: usize,

    /// Sleep between ticks instead of running as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Print the final snapshot as JSON instead of a summary line
    #[arg(long)]
    json: bool,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    debug!(?args, "starting");

    let config = DriverConfig {
        tick: Duration::from_millis(args.tick_ms),
        max_ticks: Some(args.max_ticks),
        max_pending_intents: args.intents_per_tick.max(1),
        realtime: args.realtime,
    };

    match args.seed {
        Some(seed) => {
            let engine = Engine::new(seed);
            let player = AutoPlayer::new(seed as u64, args.intents_per_tick);
            play(engine, player, config, args.json)
        }
        None => {
            let engine = Engine::from_entropy();
            let player = AutoPlayer::from_entropy(args.intents_per_tick);
            play(engine, player, config, args.json)
        }
    }
}

fn play<R: Randomizer>(
    engine: Engine<R>,
    mut player: AutoPlayer,
    config: DriverConfig,
    json: bool,
) -> Result<()> {
    let (mut driver, tx) = Driver::new(engine, config);

    player.feed(&tx).context("queueing first intents")?;
    let summary = driver.run(|_, _| match player.feed(&tx) {
        Ok(_) => ControlFlow::Continue(()),
        Err(e) => {
            warn!(error = %e, "intent source stopped");
            ControlFlow::Break(())
        }
    });

    if json {
        let line = serde_json::to_string(driver.snapshot()).context("encoding snapshot")?;
        println!("{}", line);
    } else {
        println!("{}", summary_line(&summary));
    }
    Ok(())
}

fn summary_line(summary: &RunSummary) -> String {
    format!(
        "score={} ticks={} lines={} pieces={} game_over={}",
        summary.score, summary.ticks, summary.lines, summary.pieces_locked, summary.game_over
    )
}
