//! Request and reply formats exchanged with a remote move advisor.

use crate::games::tictactoe::{Board, CELL_COUNT, PlacementMode, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// What the remote service is told about the game.
///
/// Serializes as `{"board": ["X", null, "O", ...], "activePlayer": "O"}`:
/// one entry per cell, row-major, `null` for empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiMoveRequest {
    /// Cell marks in row-major order.
    pub board: [Option<Player>; CELL_COUNT],
    /// Mark the service should play.
    pub active_player: Player,
    /// Placement rules in force. Used to word the prompt; not part of the JSON.
    #[serde(skip)]
    pub mode: PlacementMode,
}

impl AiMoveRequest {
    /// Builds a request from a board snapshot.
    #[instrument]
    pub fn new(board: &Board, mode: PlacementMode, active_player: Player) -> Self {
        Self {
            board: board.marks(),
            active_player,
            mode,
        }
    }

    /// The request as compact JSON.
    pub fn to_json(&self) -> String {
        // Plain arrays, options and unit enums always serialize.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Parses a free-form reply into a board index.
///
/// Leading whitespace and an optional `+` are skipped, then the leading run
/// of ASCII digits is read. Returns `None` when there are no digits or the
/// number is not in 0-8.
#[instrument]
pub fn parse_reply(text: &str) -> Option<usize> {
    let trimmed = text.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits
        .parse::<usize>()
        .ok()
        .filter(|&index| index < CELL_COUNT)
}
