//! Key handling: cursor movement and key-to-command mapping.

use crossterm::event::KeyCode;
use tictactoe_engine::games::tictactoe::{CELL_COUNT, SIDE};

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the cursor.
    Cursor(usize),
    /// Place at a cell (or its column, under gravity).
    Place(usize),
    /// Start a new game.
    Reset,
    /// Toggle gravity placement.
    ToggleGravity,
    /// Toggle the AI opponent.
    ToggleOpponent,
    /// Next colour theme.
    CycleTheme,
    /// Sound on/off.
    ToggleSound,
    /// Leave the app.
    Quit,
}

/// Moves the cursor with the arrow keys, stopping at the edges.
pub fn move_cursor(cursor: usize, key: KeyCode) -> usize {
    let (row, col) = (cursor / SIDE, cursor % SIDE);
    let (row, col) = match key {
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(SIDE - 1)),
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(SIDE - 1), col),
        _ => (row, col),
    };
    row * SIDE + col
}

/// Maps a key press to a command.
pub fn command_for(key: KeyCode, cursor: usize) -> Option<Command> {
    match key {
        KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
            Some(Command::Cursor(move_cursor(cursor, key)))
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Place(cursor)),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c.to_digit(10)? as usize - 1;
            (index < CELL_COUNT).then_some(Command::Place(index))
        }
        KeyCode::Char('r') => Some(Command::Reset),
        KeyCode::Char('g') => Some(Command::ToggleGravity),
        KeyCode::Char('a') => Some(Command::ToggleOpponent),
        KeyCode::Char('t') => Some(Command::CycleTheme),
        KeyCode::Char('m') => Some(Command::ToggleSound),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_stops_at_edges() {
        assert_eq!(move_cursor(0, KeyCode::Left), 0);
        assert_eq!(move_cursor(0, KeyCode::Up), 0);
        assert_eq!(move_cursor(0, KeyCode::Right), 1);
        assert_eq!(move_cursor(4, KeyCode::Down), 7);
        assert_eq!(move_cursor(8, KeyCode::Right), 8);
        assert_eq!(move_cursor(8, KeyCode::Down), 8);
    }

    #[test]
    fn test_digits_are_one_based() {
        assert_eq!(command_for(KeyCode::Char('1'), 4), Some(Command::Place(0)));
        assert_eq!(command_for(KeyCode::Char('9'), 4), Some(Command::Place(8)));
        assert_eq!(command_for(KeyCode::Char('0'), 4), None);
    }

    #[test]
    fn test_enter_places_at_cursor() {
        assert_eq!(command_for(KeyCode::Enter, 5), Some(Command::Place(5)));
        assert_eq!(command_for(KeyCode::Char(' '), 2), Some(Command::Place(2)));
    }
}
