//! Tic-tac-toe: board, placement rules, outcome evaluation and the turn
//! coordinator.

mod action;
mod coordinator;
mod events;
pub mod invariants;
pub mod rules;
mod types;

pub use action::{Move, MoveOrigin, MoveRejection};
pub use coordinator::{
    AI_MARK, AiMoveError, AiTicket, AiTurn, GameSettings, MoveReport, Phase, TurnCoordinator,
};
pub use events::{GameEvent, Note, SoundCue, Waveform};
pub use rules::{
    GameOutcome, WINNING_LINES, WinningLine, attempt_move, evaluate, is_legal_target,
    legal_targets, resolve_target,
};
pub use types::{Board, BoardParseError, CELL_COUNT, Cell, OpponentKind, PlacementMode, Player, SIDE};
