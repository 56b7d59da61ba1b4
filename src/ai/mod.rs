//! AI opponent: asks a remote advisor for moves and falls back to random play.
//!
//! # Architecture
//!
//! - **wire**: the request JSON sent to the service and reply parsing
//! - **advisor**: the [`MoveAdvisor`] trait remote services implement
//! - **fallback**: uniform random choice among legal targets
//! - **provider**: [`AiMoveProvider`], which ties the three together

mod advisor;
mod fallback;
mod provider;
mod wire;

pub use advisor::{AdvisorError, MoveAdvisor};
pub use fallback::random_legal_target;
pub use provider::{AiMove, AiMoveProvider, DEFAULT_TIMEOUT, MoveSource, NoLegalMoves};
pub use wire::{AiMoveRequest, parse_reply};
