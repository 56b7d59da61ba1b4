//! History consistency invariant: one history entry per marked cell.

use super::{GameSnapshot, Invariant};

/// Invariant: History length equals the number of marked cells.
pub struct HistoryConsistentInvariant;

impl<'a> Invariant<GameSnapshot<'a>> for HistoryConsistentInvariant {
    fn holds(game: &GameSnapshot<'a>) -> bool {
        game.history.len() == game.board.filled()
    }

    fn description() -> &'static str {
        "History is consistent with board"
    }
}
