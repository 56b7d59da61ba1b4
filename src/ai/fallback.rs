//! Uniform random move policy used when the advisor cannot be trusted.

use crate::games::tictactoe::{Board, PlacementMode, legal_targets};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Picks a legal target uniformly at random.
///
/// Returns `None` only when no legal target exists, which means the game is
/// already over.
#[instrument(skip(rng))]
pub fn random_legal_target<R: Rng + ?Sized>(
    board: &Board,
    mode: PlacementMode,
    rng: &mut R,
) -> Option<usize> {
    let targets = legal_targets(board, mode);
    let choice = targets.choose(rng).copied();
    debug!(candidates = targets.len(), ?choice, "Random target chosen");
    choice
}
