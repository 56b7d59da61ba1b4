//! Move resolution under the two placement modes.

use super::super::types::{CELL_COUNT, SIDE};
use super::super::{Board, MoveRejection, PlacementMode, Player};
use super::outcome::evaluate;
use tracing::{debug, instrument};

/// Resolves a target index to the cell that would receive the mark.
///
/// Under [`PlacementMode::Direct`] the target is the cell itself. Under
/// [`PlacementMode::Gravity`] the target selects column `target % 3` and the
/// mark lands on the lowest empty row of that column.
///
/// # Errors
///
/// - [`MoveRejection::GameOver`] if the board already holds a win or draw
/// - [`MoveRejection::OutOfRange`] if `target` is not in 0-8
/// - [`MoveRejection::CellOccupied`] for a marked cell in direct mode
/// - [`MoveRejection::ColumnFull`] for a full column in gravity mode
#[instrument]
pub fn resolve_target(
    board: &Board,
    mode: PlacementMode,
    target: usize,
) -> Result<usize, MoveRejection> {
    if evaluate(board).is_terminal() {
        return Err(MoveRejection::GameOver);
    }
    if target >= CELL_COUNT {
        return Err(MoveRejection::OutOfRange(target));
    }

    match mode {
        PlacementMode::Direct => {
            if board.is_empty(target) {
                Ok(target)
            } else {
                Err(MoveRejection::CellOccupied(target))
            }
        }
        PlacementMode::Gravity => {
            let col = target % SIDE;
            (0..SIDE)
                .rev()
                .map(|row| row * SIDE + col)
                .find(|&index| board.is_empty(index))
                .ok_or(MoveRejection::ColumnFull(col))
        }
    }
}

/// Attempts a move, returning the resulting board.
///
/// The input board is never modified; rejection leaves the caller holding
/// the unchanged original.
#[instrument]
pub fn attempt_move(
    board: &Board,
    mode: PlacementMode,
    target: usize,
    player: Player,
) -> Result<Board, MoveRejection> {
    let cell = resolve_target(board, mode, target)?;
    debug!(target, cell, %player, "Move resolved");
    Ok(board.with_mark(cell, player))
}

/// Returns true if `target` would be accepted on `board` under `mode`.
pub fn is_legal_target(board: &Board, mode: PlacementMode, target: usize) -> bool {
    resolve_target(board, mode, target).is_ok()
}

/// Every target currently accepted under `mode`.
///
/// Direct mode lists empty cells; gravity mode lists the column selectors
/// 0, 1 and 2 whose column still has room. Empty once the game is over.
#[instrument]
pub fn legal_targets(board: &Board, mode: PlacementMode) -> Vec<usize> {
    if evaluate(board).is_terminal() {
        return Vec::new();
    }
    match mode {
        PlacementMode::Direct => board.empty_cells().collect(),
        PlacementMode::Gravity => (0..SIDE)
            .filter(|&col| (0..SIDE).any(|row| board.is_empty(row * SIDE + col)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::super::Cell;

    #[test]
    fn test_direct_places_on_target() {
        let board = Board::new();
        let next = attempt_move(&board, PlacementMode::Direct, 4, Player::X).unwrap();
        assert_eq!(next.get(4), Some(Cell::Occupied(Player::X)));
    }

    #[test]
    fn test_direct_rejects_occupied() {
        let board = Board::new().with_mark(4, Player::X);
        assert_eq!(
            attempt_move(&board, PlacementMode::Direct, 4, Player::O),
            Err(MoveRejection::CellOccupied(4))
        );
    }

    #[test]
    fn test_out_of_range() {
        let board = Board::new();
        assert_eq!(
            attempt_move(&board, PlacementMode::Direct, 9, Player::X),
            Err(MoveRejection::OutOfRange(9))
        );
        assert_eq!(
            attempt_move(&board, PlacementMode::Gravity, 42, Player::X),
            Err(MoveRejection::OutOfRange(42))
        );
    }

    #[test]
    fn test_gravity_lands_on_bottom_row() {
        let board = Board::new();
        // Any index in column 1 drops to cell 7.
        for target in [1, 4, 7] {
            assert_eq!(resolve_target(&board, PlacementMode::Gravity, target), Ok(7));
        }
    }

    #[test]
    fn test_gravity_stacks_upward() {
        let board: Board = "...|...|X..".parse().unwrap();
        assert_eq!(resolve_target(&board, PlacementMode::Gravity, 0), Ok(3));
        let board: Board = "...|O..|X..".parse().unwrap();
        assert_eq!(resolve_target(&board, PlacementMode::Gravity, 6), Ok(0));
    }

    #[test]
    fn test_gravity_full_column() {
        let board: Board = "..X|..O|..X".parse().unwrap();
        assert_eq!(
            resolve_target(&board, PlacementMode::Gravity, 5),
            Err(MoveRejection::ColumnFull(2))
        );
    }

    #[test]
    fn test_rejects_after_game_over() {
        let board: Board = "XXX|OO.|...".parse().unwrap();
        assert_eq!(
            attempt_move(&board, PlacementMode::Direct, 8, Player::O),
            Err(MoveRejection::GameOver)
        );
        assert!(legal_targets(&board, PlacementMode::Direct).is_empty());
    }

    #[test]
    fn test_legal_targets_per_mode() {
        let board: Board = "X.O|X.O|OXX".parse().unwrap();
        assert_eq!(legal_targets(&board, PlacementMode::Direct), vec![1, 4]);
        assert_eq!(legal_targets(&board, PlacementMode::Gravity), vec![1]);
    }
}
