//! The remote move advisor seam.

use super::wire::AiMoveRequest;
use derive_more::{Display, Error};
use tracing::{error, instrument};

/// A remote reasoning service that suggests moves.
///
/// Implementations return the raw reply text; validation is the move
/// provider's job, so advisors never need to understand the rules.
#[async_trait::async_trait]
pub trait MoveAdvisor: Send + Sync {
    /// Asks for a move. The reply should contain a single integer 0-8.
    async fn suggest_move(&self, request: &AiMoveRequest) -> Result<String, AdvisorError>;

    /// Short name for logs.
    fn name(&self) -> &str;
}

/// Transport or service failure while asking for a move.
#[derive(Debug, Clone, Display, Error)]
#[display("Advisor error: {} at {}:{}", message, file, line)]
pub struct AdvisorError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl AdvisorError {
    /// Creates a new advisor error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        error!(error_message = %message, "Advisor error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
