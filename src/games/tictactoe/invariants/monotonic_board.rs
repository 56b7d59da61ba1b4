//! Monotonic board invariant: cells never change once marked.

use super::super::{Board, Cell};
use super::{GameSnapshot, Invariant};

/// Invariant: Board cells are monotonic (never overwritten).
///
/// Once a cell transitions from Empty to Occupied, it never changes.
/// Verified by replaying the move history onto an empty board.
pub struct MonotonicBoardInvariant;

impl<'a> Invariant<GameSnapshot<'a>> for MonotonicBoardInvariant {
    fn holds(game: &GameSnapshot<'a>) -> bool {
        let mut reconstructed = Board::new();

        for mov in game.history {
            if reconstructed.get(mov.cell) != Some(Cell::Empty) {
                return false;
            }
            reconstructed = reconstructed.with_mark(mov.cell, mov.player);
        }

        reconstructed == *game.board
    }

    fn description() -> &'static str {
        "Board cells are monotonic (never overwritten)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Move, MoveOrigin, Player};

    fn snapshot<'a>(board: &'a Board, history: &'a [Move]) -> GameSnapshot<'a> {
        GameSnapshot {
            board,
            history,
            first_player: Player::X,
            active_player: Player::X,
            finished: false,
        }
    }

    #[test]
    fn test_gravity_history_replays() {
        // Column 0 filled bottom-up through gravity targets.
        let history = [
            Move::new(Player::X, 0, 6, MoveOrigin::Human),
            Move::new(Player::O, 0, 3, MoveOrigin::Human),
        ];
        let board: Board = "...|O..|X..".parse().unwrap();
        assert!(MonotonicBoardInvariant::holds(&snapshot(&board, &history)));
    }

    #[test]
    fn test_overwrite_violates() {
        let history = [
            Move::new(Player::X, 4, 4, MoveOrigin::Human),
            Move::new(Player::O, 4, 4, MoveOrigin::Human),
        ];
        let board: Board = "...|.O.|...".parse().unwrap();
        assert!(!MonotonicBoardInvariant::holds(&snapshot(&board, &history)));
    }
}
