//! Command-line interface for the tic-tac-toe app.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_engine::{OpponentKind, Player};

/// Tic-tac-toe in the terminal, with gravity mode and an AI opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe with gravity mode and an AI opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "tictactoe.toml")]
    pub config: PathBuf,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Marks drop to the lowest empty cell of the chosen column
        #[arg(long)]
        gravity: bool,

        /// Opponent: human (hot seat) or ai
        #[arg(long)]
        opponent: Option<OpponentKind>,

        /// Mark that moves first: X or O
        #[arg(long)]
        first: Option<Player>,

        /// Scoreboard file (JSON); scores are kept in memory without it
        #[arg(long)]
        scores: Option<PathBuf>,
    },

    /// Print the saved scoreboard
    Scores {
        /// Scoreboard file; overrides the config
        #[arg(long)]
        scores: Option<PathBuf>,
    },

    /// Clear the saved scoreboard
    ResetScores {
        /// Scoreboard file; overrides the config
        #[arg(long)]
        scores: Option<PathBuf>,
    },
}
