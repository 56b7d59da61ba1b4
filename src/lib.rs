//! Tic-tac-toe engine - rules, turn coordination and an AI opponent
//!
//! This library holds the game state machine behind the `tictactoe` terminal
//! app. It knows nothing about rendering.
//!
//! # Architecture
//!
//! - **Games**: board, move resolution (direct or gravity), outcome evaluation
//!   and the turn coordinator
//! - **AI**: remote move advisor with validation and a random fallback
//! - **Session**: drives a coordinator and runs AI turns as background tasks
//! - **Ledger**: win/draw tallies, in memory or in a JSON file
//! - **Config**: TOML settings and themes
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tictactoe_engine::{AiMoveProvider, GameSession, GameSettings, MemoryLedger, OpponentKind};
//!
//! # async fn example() {
//! let settings = GameSettings::default().with_opponent(OpponentKind::RemoteAi);
//! let provider = Arc::new(AiMoveProvider::offline());
//! let mut session = GameSession::new(settings, MemoryLedger::new(), provider);
//!
//! session.cell_activated(4).ok();
//! session.run_ai_turn().await;
//! println!("{}", session.coordinator().board().display());
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod ai;
mod config;
mod ledger;
mod llm_client;
mod session;
mod theme;

pub mod games;

// Crate-level exports - AI opponent
pub use ai::{
    AdvisorError, AiMove, AiMoveProvider, AiMoveRequest, DEFAULT_TIMEOUT, MoveAdvisor, MoveSource,
    NoLegalMoves, parse_reply, random_legal_target,
};

// Crate-level exports - Configuration
pub use config::{AiConfig, AppConfig, ConfigError};
pub use theme::{Palette, Rgb, Theme};

// Crate-level exports - LLM client
pub use llm_client::{
    LlmClient, LlmConfig, LlmError, LlmProvider, move_system_prompt, move_user_message,
};

// Crate-level exports - Scores
pub use ledger::{FileLedger, LedgerError, MemoryLedger, ScoreLedger, Scoreboard};

// Crate-level exports - Session
pub use session::{AiReply, GameSession, ReplyOutcome};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    AI_MARK, AiMoveError, AiTicket, Board, Cell, GameEvent, GameOutcome, GameSettings, Move,
    MoveOrigin, MoveRejection, MoveReport, OpponentKind, Phase, PlacementMode, Player, SoundCue,
    TurnCoordinator, WinningLine,
};
