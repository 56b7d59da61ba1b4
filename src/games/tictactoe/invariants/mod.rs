//! First-class invariants for tic-tac-toe.
//!
//! Invariants are logical properties that must hold after every accepted
//! move. The turn coordinator checks them in debug builds; they are also
//! testable on hand-built snapshots.

use super::{Board, Move, Player};

/// Read-only view of the state the invariants reason about.
#[derive(Debug, Clone, Copy)]
pub struct GameSnapshot<'a> {
    /// Current board.
    pub board: &'a Board,
    /// Moves accepted since the last reset.
    pub history: &'a [Move],
    /// Mark that moved first.
    pub first_player: Player,
    /// Mark to move next (frozen once the game ends).
    pub active_player: Player,
    /// Whether the game has ended.
    pub finished: bool,
}

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod alternating_turn;
pub mod history_consistent;
pub mod monotonic_board;

pub use alternating_turn::AlternatingTurnInvariant;
pub use history_consistent::HistoryConsistentInvariant;
pub use monotonic_board::MonotonicBoardInvariant;

/// All tic-tac-toe invariants as a composable set.
pub type TicTacToeInvariants = (
    MonotonicBoardInvariant,
    AlternatingTurnInvariant,
    HistoryConsistentInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::MoveOrigin;

    fn snapshot<'a>(board: &'a Board, history: &'a [Move], active: Player) -> GameSnapshot<'a> {
        GameSnapshot {
            board,
            history,
            first_player: Player::X,
            active_player: active,
            finished: false,
        }
    }

    #[test]
    fn test_invariant_set_holds_for_empty_game() {
        let board = Board::new();
        assert!(TicTacToeInvariants::check_all(&snapshot(&board, &[], Player::X)).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let history = [
            Move::new(Player::X, 0, 0, MoveOrigin::Human),
            Move::new(Player::O, 4, 4, MoveOrigin::Ai),
            Move::new(Player::X, 2, 2, MoveOrigin::Human),
        ];
        let board: Board = "X.X|.O.|...".parse().unwrap();
        assert!(TicTacToeInvariants::check_all(&snapshot(&board, &history, Player::O)).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let history = [Move::new(Player::X, 4, 4, MoveOrigin::Human)];
        // Board disagrees with history: an extra O appeared.
        let board: Board = "O..|.X.|...".parse().unwrap();
        let violations = TicTacToeInvariants::check_all(&snapshot(&board, &history, Player::O))
            .unwrap_err();
        assert_eq!(violations.len(), 2);
    }
}
