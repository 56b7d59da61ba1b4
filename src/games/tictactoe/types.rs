//! Core domain types for tic-tac-toe.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Side length of the board.
pub const SIDE: usize = 3;

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Player {
    /// Player X (goes first by default).
    X,
    /// Player O.
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell marked by a player.
    Occupied(Player),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    /// Returns true if nobody has marked this cell.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// 3x3 tic-tac-toe board.
///
/// Boards are small `Copy` values. Moves never mutate a board in place; they
/// produce a new one (see [`Board::with_mark`]), so callers can keep old
/// snapshots around for diffing or undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Creates a board from raw cells.
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks if the cell at `index` exists and is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Returns a copy of this board with `player` marked at `index`.
    ///
    /// Out-of-range indices leave the copy untouched; callers validate first.
    pub fn with_mark(&self, index: usize, player: Player) -> Self {
        let mut next = *self;
        if let Some(cell) = next.cells.get_mut(index) {
            *cell = Cell::Occupied(player);
        }
        next
    }

    /// Number of marked cells.
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Indices of all empty cells, in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| i)
    }

    /// Marks as seen by a remote reader: `Some(player)` or `None` per cell.
    pub fn marks(&self) -> [Option<Player>; CELL_COUNT] {
        self.cells.map(Cell::mark)
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..SIDE {
            for col in 0..SIDE {
                let index = row * SIDE + col;
                let symbol = match self.cells[index] {
                    Cell::Empty => index.to_string(),
                    Cell::Occupied(player) => player.to_string(),
                };
                result.push_str(&symbol);
                if col < SIDE - 1 {
                    result.push('|');
                }
            }
            if row < SIDE - 1 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

/// Error parsing a board pattern.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    /// Pattern did not contain exactly nine cells.
    #[display("Board pattern must have 9 cells, found {}", _0)]
    WrongLength(#[error(not(source))] usize),
    /// Pattern contained an unknown character.
    #[display("Unexpected character {:?} in board pattern", _0)]
    BadCell(#[error(not(source))] char),
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses a row-major pattern such as `"XO.|.X.|..O"`.
    ///
    /// `X`/`O` mark cells, `.`, `-` and `_` are empty. Whitespace and `|`
    /// are ignored so patterns can be laid out in rows.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(CELL_COUNT);
        for ch in s.chars() {
            let cell = match ch {
                'X' | 'x' => Cell::Occupied(Player::X),
                'O' | 'o' => Cell::Occupied(Player::O),
                '.' | '-' | '_' => Cell::Empty,
                c if c.is_whitespace() || c == '|' => continue,
                other => return Err(BoardParseError::BadCell(other)),
            };
            cells.push(cell);
        }
        let cells: [Cell; CELL_COUNT] = cells
            .try_into()
            .map_err(|v: Vec<Cell>| BoardParseError::WrongLength(v.len()))?;
        Ok(Self { cells })
    }
}

/// How a move target is turned into a cell.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlacementMode {
    /// Mark exactly the selected cell.
    #[default]
    // "classic" is still accepted on input.
    #[display("direct")]
    #[strum(serialize = "direct", serialize = "classic")]
    Direct,
    /// Drop the mark to the lowest empty cell of the selected column.
    #[display("gravity")]
    Gravity,
}

impl PlacementMode {
    /// Toggles between `Direct` and `Gravity`.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            Self::Direct => Self::Gravity,
            Self::Gravity => Self::Direct,
        }
    }
}

/// Who plays the non-starting mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OpponentKind {
    /// Two humans share the board.
    #[default]
    // "player" is still accepted on input.
    #[display("human")]
    #[strum(serialize = "human", serialize = "player")]
    Human,
    /// The `O` mark is played by a remote reasoning service.
    #[display("ai")]
    #[serde(rename = "ai")]
    #[strum(serialize = "ai")]
    RemoteAi,
}

impl OpponentKind {
    /// Toggles between `Human` and `RemoteAi`.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            Self::Human => Self::RemoteAi,
            Self::RemoteAi => Self::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_mark_leaves_original_untouched() {
        let board = Board::new();
        let next = board.with_mark(4, Player::X);
        assert!(board.is_empty(4));
        assert_eq!(next.get(4), Some(Cell::Occupied(Player::X)));
        assert_eq!(next.filled(), 1);
    }

    #[test]
    fn test_parse_pattern_with_rows() {
        let board: Board = "XO. | .X. | ..O".parse().unwrap();
        assert_eq!(board.get(0), Some(Cell::Occupied(Player::X)));
        assert_eq!(board.get(1), Some(Cell::Occupied(Player::O)));
        assert_eq!(board.get(8), Some(Cell::Occupied(Player::O)));
        assert_eq!(board.empty_cells().collect::<Vec<_>>(), vec![2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_parse_pattern_errors() {
        assert_eq!("XO".parse::<Board>(), Err(BoardParseError::WrongLength(2)));
        assert_eq!(
            "XOZ......".parse::<Board>(),
            Err(BoardParseError::BadCell('Z'))
        );
    }

    #[test]
    fn test_mode_and_opponent_parse() {
        assert_eq!("gravity".parse::<PlacementMode>(), Ok(PlacementMode::Gravity));
        assert_eq!("classic".parse::<PlacementMode>(), Ok(PlacementMode::Direct));
        assert_eq!("ai".parse::<OpponentKind>(), Ok(OpponentKind::RemoteAi));
        assert_eq!("player".parse::<OpponentKind>(), Ok(OpponentKind::Human));
    }

    #[test]
    fn test_display_matches_config_names() {
        for mode in [PlacementMode::Direct, PlacementMode::Gravity] {
            assert_eq!(mode.to_string().parse::<PlacementMode>(), Ok(mode));
            assert_eq!(serde_json::to_string(&mode).unwrap(), format!("\"{}\"", mode));
        }
        for opponent in [OpponentKind::Human, OpponentKind::RemoteAi] {
            assert_eq!(opponent.to_string().parse::<OpponentKind>(), Ok(opponent));
            assert_eq!(serde_json::to_string(&opponent).unwrap(), format!("\"{}\"", opponent));
        }
    }

    #[test]
    fn test_display_numbers_empty_cells() {
        let board = Board::new().with_mark(0, Player::X);
        assert_eq!(board.display(), "X|1|2\n-+-+-\n3|4|5\n-+-+-\n6|7|8");
    }
}
