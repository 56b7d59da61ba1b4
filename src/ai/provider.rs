//! AI move provider: remote suggestion, validation and random fallback.

use super::advisor::MoveAdvisor;
use super::fallback::random_legal_target;
use super::wire::{AiMoveRequest, parse_reply};
use crate::games::tictactoe::{Board, PlacementMode, Player, is_legal_target};
use derive_more::{Display, Error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Default bound on a single advisor call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Where an AI move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum MoveSource {
    /// Validated advisor suggestion.
    #[display("advisor")]
    Advisor,
    /// Local random policy.
    #[display("fallback")]
    Fallback,
}

/// A move chosen for the AI. Not yet applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AiMove {
    /// Target index to feed back to the coordinator.
    pub target: usize,
    /// Whether the advisor or the fallback picked it.
    pub source: MoveSource,
}

/// The provider was asked to move on a board with no legal target.
///
/// This means the caller missed a win or draw; it is a defect, not a
/// recoverable condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("No legal moves left for the AI")]
pub struct NoLegalMoves;

/// Chooses AI moves.
///
/// Asks the advisor (if any) under a timeout, checks the reply against the
/// rules and otherwise picks a uniformly random legal target. Never touches
/// the board.
pub struct AiMoveProvider {
    advisor: Option<Arc<dyn MoveAdvisor>>,
    timeout: Duration,
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for AiMoveProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiMoveProvider")
            .field("advisor", &self.advisor.as_ref().map(|a| a.name()))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AiMoveProvider {
    /// Creates a provider backed by a remote advisor.
    #[instrument(skip(advisor), fields(advisor = advisor.name()))]
    pub fn new(advisor: Arc<dyn MoveAdvisor>, timeout: Duration) -> Self {
        info!("Creating AI move provider");
        Self {
            advisor: Some(advisor),
            timeout,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Creates a provider that only plays the random fallback.
    #[instrument]
    pub fn offline() -> Self {
        info!("Creating offline AI move provider");
        Self {
            advisor: None,
            timeout: DEFAULT_TIMEOUT,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reseeds the fallback policy for reproducible play.
    #[instrument(skip(self))]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    /// Bound on a single advisor call.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns a move for `player` on `board`.
    ///
    /// Advisor failures of any kind (transport error, timeout, unparseable
    /// or illegal reply) are logged and answered with the random fallback.
    ///
    /// # Errors
    ///
    /// [`NoLegalMoves`] if the board has no legal target.
    #[instrument(skip(self))]
    pub async fn request_move(
        &self,
        board: &Board,
        mode: PlacementMode,
        player: Player,
    ) -> Result<AiMove, NoLegalMoves> {
        if let Some(advisor) = &self.advisor {
            let request = AiMoveRequest::new(board, mode, player);
            match tokio::time::timeout(self.timeout, advisor.suggest_move(&request)).await {
                Ok(Ok(reply)) => match parse_reply(&reply) {
                    Some(target) if is_legal_target(board, mode, target) => {
                        debug!(target, advisor = advisor.name(), "Advisor move accepted");
                        return Ok(AiMove {
                            target,
                            source: MoveSource::Advisor,
                        });
                    }
                    Some(target) => {
                        warn!(target, %reply, "Advisor suggested an illegal move");
                    }
                    None => {
                        warn!(%reply, "Advisor reply is not a board index");
                    }
                },
                Ok(Err(e)) => {
                    warn!(error = %e, "Advisor request failed");
                }
                Err(_) => {
                    warn!(timeout = ?self.timeout, "Advisor timed out");
                }
            }
        }

        self.make_random_move(board, mode)
    }

    /// Picks a uniformly random legal target.
    ///
    /// # Errors
    ///
    /// [`NoLegalMoves`] if the board has no legal target.
    #[instrument(skip(self))]
    pub fn make_random_move(
        &self,
        board: &Board,
        mode: PlacementMode,
    ) -> Result<AiMove, NoLegalMoves> {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match random_legal_target(board, mode, &mut *rng) {
            Some(target) => {
                debug!(target, "Fallback move chosen");
                Ok(AiMove {
                    target,
                    source: MoveSource::Fallback,
                })
            }
            None => {
                error!(board = %board.display(), "AI asked to move on a finished board");
                Err(NoLegalMoves)
            }
        }
    }
}
