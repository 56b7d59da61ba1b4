//! Tic-tac-toe - terminal front end
//!
//! Plays in a ratatui terminal UI and manages the saved scoreboard.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use tictactoe_engine::{AppConfig, FileLedger, OpponentKind, PlacementMode, Player, ScoreLedger};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,tictactoe_engine=debug";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = AppConfig::load_or_default(&cli.config)?;

    match cli.command.unwrap_or(Command::Play {
        gravity: false,
        opponent: None,
        first: None,
        scores: None,
    }) {
        Command::Play {
            gravity,
            opponent,
            first,
            scores,
        } => {
            apply_overrides(&mut config, gravity, opponent, first, scores);
            tui::run_tui(config).await
        }
        Command::Scores { scores } => {
            init_stderr_tracing();
            show_scores(scores_path(&config, scores)?)
        }
        Command::ResetScores { scores } => {
            init_stderr_tracing();
            reset_scores(scores_path(&config, scores)?)
        }
    }
}

fn apply_overrides(
    config: &mut AppConfig,
    gravity: bool,
    opponent: Option<OpponentKind>,
    first: Option<Player>,
    scores: Option<PathBuf>,
) {
    if gravity {
        config.set_placement_mode(PlacementMode::Gravity);
    }
    if let Some(opponent) = opponent {
        config.set_opponent(opponent);
    }
    if let Some(first) = first {
        config.set_first_player(first);
    }
    if let Some(path) = scores {
        config.set_scores_path(path);
    }
}

fn scores_path(config: &AppConfig, flag: Option<PathBuf>) -> Result<PathBuf> {
    flag.or_else(|| config.scores_path().clone()).ok_or_else(|| {
        anyhow::anyhow!("No scoreboard file: pass --scores or set scores_path in the config")
    })
}

/// Prints the saved scoreboard.
#[instrument(skip(path), fields(path = %path.display()))]
fn show_scores(path: PathBuf) -> Result<()> {
    let ledger = FileLedger::open(&path)?;
    let board = ledger.scoreboard();
    println!("X wins: {}", board.wins(Player::X));
    println!("O wins: {}", board.wins(Player::O));
    println!("Draws:  {}", board.draws());
    match board.last_played() {
        Some(at) => println!("Last game: {}", at.to_rfc2822()),
        None => println!("No games played yet"),
    }
    Ok(())
}

/// Clears the saved scoreboard.
#[instrument(skip(path), fields(path = %path.display()))]
fn reset_scores(path: PathBuf) -> Result<()> {
    let mut ledger = FileLedger::open(&path)?;
    ledger.clear()?;
    info!("Scoreboard cleared");
    println!("Scores cleared in {}", path.display());
    Ok(())
}

fn init_stderr_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();
}
