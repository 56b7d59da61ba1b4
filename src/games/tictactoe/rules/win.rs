//! Win detection logic for tic-tac-toe.

use super::super::{Board, Cell, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Three board indices that win when marked by the same player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine([usize; 3]);

impl WinningLine {
    /// Creates a line from three indices.
    pub const fn new(a: usize, b: usize, c: usize) -> Self {
        Self([a, b, c])
    }

    /// The three cell indices, in table order.
    pub fn cells(&self) -> [usize; 3] {
        self.0
    }

    /// Returns true if `index` lies on this line.
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }
}

impl std::fmt::Display for WinningLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "({}, {}, {})", a, b, c)
    }
}

/// The eight winning lines: rows, then columns, then diagonals.
pub const WINNING_LINES: [WinningLine; 8] = [
    // Rows
    WinningLine::new(0, 1, 2),
    WinningLine::new(3, 4, 5),
    WinningLine::new(6, 7, 8),
    // Columns
    WinningLine::new(0, 3, 6),
    WinningLine::new(1, 4, 7),
    WinningLine::new(2, 5, 8),
    // Diagonals
    WinningLine::new(0, 4, 8),
    WinningLine::new(2, 4, 6),
];

/// Finds the first completed line in table order.
///
/// Returns the owning player and the line. When several lines are complete
/// only the earliest one in [`WINNING_LINES`] is reported.
#[instrument]
pub fn find_winning_line(board: &Board) -> Option<(Player, WinningLine)> {
    WINNING_LINES.iter().find_map(|line| {
        let [a, b, c] = line.cells();
        match board.get(a)? {
            Cell::Occupied(player)
                if board.get(b) == Some(Cell::Occupied(player))
                    && board.get(c) == Some(Cell::Occupied(player)) =>
            {
                Some((player, *line))
            }
            _ => None,
        }
    })
}

/// Checks if there is a winner on the board.
#[instrument]
pub fn check_winner(board: &Board) -> Option<Player> {
    find_winning_line(board).map(|(player, _)| player)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board: Board = "XXX|OO.|...".parse().unwrap();
        assert_eq!(
            find_winning_line(&board),
            Some((Player::X, WinningLine::new(0, 1, 2)))
        );
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board: Board = "X.O|XO.|O..".parse().unwrap();
        assert_eq!(
            find_winning_line(&board),
            Some((Player::O, WinningLine::new(2, 4, 6)))
        );
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board: Board = "XX.|...|...".parse().unwrap();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board: Board = "XOX|...|...".parse().unwrap();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_earliest_line_reported_first() {
        // Top row and left column both complete: the row comes first.
        let board: Board = "XXX|X..|X..".parse().unwrap();
        assert_eq!(
            find_winning_line(&board),
            Some((Player::X, WinningLine::new(0, 1, 2)))
        );
    }
}
