//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating and advancing game
//! state. Rules are separated from the turn coordinator so they can be
//! tested and reused on bare boards.

pub mod draw;
pub mod outcome;
pub mod placement;
pub mod win;

pub use draw::{is_draw, is_full};
pub use outcome::{GameOutcome, evaluate};
pub use placement::{attempt_move, is_legal_target, legal_targets, resolve_target};
pub use win::{WINNING_LINES, WinningLine, check_winner, find_winning_line};
