//! Runs AI-vs-AI games on the 6x6 board and logs the transcript.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use reversi6::config::MatchConfig;
use reversi6::{AgentKind, Side, TracingObserver};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "reversi6", about = "Self-play for 6x6 Reversi agents")]
struct Cli {
    /// TOML file with match settings; flags below override it.
    #[arg(long, default_value = "reversi6.toml")]
    config: PathBuf,

    #[arg(long, value_enum)]
    black: Option<AgentKind>,

    #[arg(long, value_enum)]
    white: Option<AgentKind>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    games: Option<u32>,

    /// Lookahead for the search agent.
    #[arg(long)]
    depth: Option<u8>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = MatchConfig::load_or_default(&cli.config)?;
    if let Some(black) = cli.black {
        config.black = black;
    }
    if let Some(white) = cli.white {
        config.white = white;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(games) = cli.games {
        config.games = games;
    }
    if let Some(depth) = cli.depth {
        config.search_depth = depth;
    }
    config.validate()?;

    info!(black = %config.black, white = %config.white, games = config.games, "starting");

    let (mut black_wins, mut white_wins, mut draws) = (0u32, 0u32, 0u32);
    for game in 0..config.games {
        let mut observer = TracingObserver;
        let report = config.build_match(game).play(&mut observer)?;
        println!("{}\n", report.board);

        match report.outcome.winner() {
            Some(Side::Black) => black_wins += 1,
            Some(Side::White) => white_wins += 1,
            None => draws += 1,
        }
    }

    info!(black_wins, white_wins, draws, "all games finished");
    Ok(())
}
