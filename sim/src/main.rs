use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use stardust_core::*;
use std::collections::BTreeMap;

mod player;
mod session;
mod sinks;

use player::AutoPlayer;
use session::{Pace, Session};
use sinks::{Collaborators, EventLog, SoundBoard};

/// Plays rounds of the star hunt headlessly and reports the statistics.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Difficulty tier: easy, medium or hard
    #[arg(short, long, default_value = "easy")]
    difficulty: Difficulty,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// How many rounds to finish
    #[arg(short, long, default_value_t = 10)]
    rounds: u32,

    /// Follow the wall clock instead of skipping ahead to each timer
    #[arg(long)]
    realtime: bool,

    /// Don't play sound cues
    #[arg(long)]
    mute: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    seed: u64,
    difficulty: Difficulty,
    statistics: GameStatistics,
    sounds: &'a BTreeMap<&'static str, u32>,
}

fn random_seed() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(random_seed);
    log::debug!("seed: {seed}");

    let mut session = Session {
        engine: RoundEngine::new(EngineConfig::default(), GameStatistics::new(), seed, args.difficulty),
        player: AutoPlayer::new(seed.rotate_left(32)),
        collaborators: Collaborators {
            log: EventLog,
            sound: SoundBoard::new(args.mute),
        },
    };

    let pace = if args.realtime {
        Pace::Realtime
    } else {
        Pace::Simulated
    };
    session.play(args.rounds, pace)?;

    let summary = Summary {
        seed,
        difficulty: args.difficulty,
        statistics: *session.engine.statistics(),
        sounds: session.collaborators.sound.played(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let stats = &summary.statistics;
        println!("seed:       {}", summary.seed);
        println!("difficulty: {}", summary.difficulty);
        println!("games:      {}", stats.total_games());
        for difficulty in Difficulty::ALL {
            println!("wins ({}): {}", difficulty.display_name(), stats.wins_for(difficulty));
        }
        println!("losses:     {}", stats.losses());
        if let Some(rate) = stats.win_rate() {
            println!("win rate:   {:.1}%", rate * 100.0);
        }
    }

    Ok(())
}
