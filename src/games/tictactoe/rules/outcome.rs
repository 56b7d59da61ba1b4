//! Outcome evaluation: the single entry point consumers use after a move.

use super::super::{Board, Player};
use super::draw::is_full;
use super::win::{WinningLine, find_winning_line};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Moves can still be made.
    InProgress,
    /// A player completed a line.
    Won {
        /// The winning player.
        player: Player,
        /// The completed line.
        line: WinningLine,
    },
    /// Board is full with no completed line.
    Draw,
}

impl GameOutcome {
    /// Returns true for `Won` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameOutcome::Won { player, .. } => Some(*player),
            _ => None,
        }
    }

    /// Returns the winning line if there is one.
    pub fn winning_line(&self) -> Option<WinningLine> {
        match self {
            GameOutcome::Won { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::InProgress => write!(f, "In progress"),
            GameOutcome::Won { player, line } => write!(f, "{} wins on {}", player, line),
            GameOutcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Evaluates a board.
///
/// Pure: lines are scanned in fixed order and the first completed one wins;
/// otherwise a full board is a draw and anything else is in progress.
#[instrument]
pub fn evaluate(board: &Board) -> GameOutcome {
    if let Some((player, line)) = find_winning_line(board) {
        return GameOutcome::Won { player, line };
    }
    if is_full(board) {
        GameOutcome::Draw
    } else {
        GameOutcome::InProgress
    }
}
