//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They record who played,
//! what was selected and where the mark actually landed (which differs
//! from the selection under gravity placement).

use super::Player;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Where a move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum MoveOrigin {
    /// Keyboard, mouse or other human input.
    Human,
    /// The AI move provider.
    #[display("AI")]
    Ai,
}

/// An accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The selected index (a cell, or a column selector under gravity).
    pub target: usize,
    /// The cell that received the mark.
    pub cell: usize,
    /// Who submitted the move.
    pub origin: MoveOrigin,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(player: Player, target: usize, cell: usize, origin: MoveOrigin) -> Self {
        Self {
            player,
            target,
            cell,
            origin,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) -> cell {}", self.player, self.origin, self.cell)
    }
}

/// Why a move was not applied.
///
/// Every variant means "nothing changed": board, turn and outcome are
/// exactly as they were before the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Error)]
pub enum MoveRejection {
    /// Target index outside 0-8.
    #[display("Index {} is outside the board (must be 0-8)", _0)]
    OutOfRange(#[error(not(source))] usize),

    /// Direct placement on a marked cell.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(#[error(not(source))] usize),

    /// Gravity placement into a column with no empty cell.
    #[display("Column {} is full", _0)]
    ColumnFull(#[error(not(source))] usize),

    /// A human move while the AI is to play.
    #[display("It's not your turn")]
    NotYourTurn,

    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameOver,
}
