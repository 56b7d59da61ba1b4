//! Game session: drives a turn coordinator and its AI opponent.
//!
//! The session owns the [`TurnCoordinator`] and runs each AI turn as a
//! spawned task. Replies come back over a channel tagged with the ticket
//! they were issued for; replies whose ticket went stale in the meantime
//! are dropped.

use crate::ai::{AiMove, AiMoveProvider, MoveSource, NoLegalMoves};
use crate::games::tictactoe::{
    AiMoveError, AiTicket, GameEvent, GameSettings, MoveRejection, MoveReport, OpponentKind,
    PlacementMode, TurnCoordinator,
};
use crate::ledger::ScoreLedger;
use derive_new::new;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// Result of one AI turn, sent back from the worker task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct AiReply {
    /// Ticket the turn was issued with.
    pub ticket: AiTicket,
    /// Chosen move, or the defect that prevented one.
    pub result: Result<AiMove, NoLegalMoves>,
}

/// What became of an AI reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The move was applied.
    Applied(MoveReport),
    /// The game moved on before the reply arrived.
    Stale,
    /// No move could be produced.
    Failed,
}

/// A running game with an optional AI opponent.
#[derive(Debug)]
pub struct GameSession<L> {
    coordinator: TurnCoordinator<L>,
    provider: Arc<AiMoveProvider>,
    replies_tx: mpsc::UnboundedSender<AiReply>,
    replies_rx: mpsc::UnboundedReceiver<AiReply>,
    in_flight: Option<JoinHandle<()>>,
}

impl<L: ScoreLedger> GameSession<L> {
    /// Creates a session and starts the first game.
    ///
    /// If the AI moves first its turn is dispatched immediately, so this
    /// must run inside a tokio runtime.
    #[instrument(skip(ledger, provider))]
    pub fn new(settings: GameSettings, ledger: L, provider: Arc<AiMoveProvider>) -> Self {
        info!("Creating game session");
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();
        let mut session = Self {
            coordinator: TurnCoordinator::new(settings, ledger),
            provider,
            replies_tx,
            replies_rx,
            in_flight: None,
        };
        session.dispatch_ai_turn();
        session
    }

    /// The underlying coordinator.
    pub fn coordinator(&self) -> &TurnCoordinator<L> {
        &self.coordinator
    }

    /// Registers a game event subscriber.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<GameEvent> {
        self.coordinator.subscribe()
    }

    /// The human activated a cell (or column, under gravity).
    ///
    /// # Errors
    ///
    /// Whatever the coordinator rejects; the game is unchanged.
    #[instrument(skip(self))]
    pub fn cell_activated(&mut self, target: usize) -> Result<MoveReport, MoveRejection> {
        let report = self.coordinator.apply_player_move(target)?;
        self.dispatch_ai_turn();
        Ok(report)
    }

    /// Starts a new game, abandoning any AI turn in progress.
    #[instrument(skip(self))]
    pub fn reset_requested(&mut self) {
        self.abort_in_flight();
        self.coordinator.reset();
        self.dispatch_ai_turn();
    }

    /// Switches placement mode and restarts.
    #[instrument(skip(self))]
    pub fn set_placement_mode(&mut self, mode: PlacementMode) {
        self.abort_in_flight();
        self.coordinator.set_placement_mode(mode);
        self.dispatch_ai_turn();
    }

    /// Switches the opponent and restarts.
    #[instrument(skip(self))]
    pub fn set_opponent(&mut self, opponent: OpponentKind) {
        self.abort_in_flight();
        self.coordinator.set_opponent(opponent);
        self.dispatch_ai_turn();
    }

    /// Replaces all settings and restarts.
    #[instrument(skip(self))]
    pub fn configure(&mut self, settings: GameSettings) {
        self.abort_in_flight();
        self.coordinator.configure(settings);
        self.dispatch_ai_turn();
    }

    /// Spawns the pending AI turn, if there is one.
    ///
    /// Returns `true` if a task was started.
    #[instrument(skip(self))]
    pub fn dispatch_ai_turn(&mut self) -> bool {
        let Some(turn) = self.coordinator.begin_ai_turn() else {
            return false;
        };
        let provider = Arc::clone(&self.provider);
        let tx = self.replies_tx.clone();
        debug!(generation = turn.ticket.generation(), "Dispatching AI turn");
        self.in_flight = Some(tokio::spawn(async move {
            let result = provider
                .request_move(&turn.board, turn.mode, turn.player)
                .await;
            // The receiver lives as long as the session.
            let _ = tx.send(AiReply::new(turn.ticket, result));
        }));
        true
    }

    /// Waits for the next AI reply without applying it.
    pub async fn next_ai_reply(&mut self) -> Option<AiReply> {
        self.replies_rx.recv().await
    }

    /// Takes an AI reply if one is ready.
    pub fn poll_ai_reply(&mut self) -> Option<AiReply> {
        self.replies_rx.try_recv().ok()
    }

    /// Applies an AI reply to the game.
    #[instrument(skip(self))]
    pub fn apply_ai_reply(&mut self, reply: AiReply) -> ReplyOutcome {
        let mov = match reply.result {
            Ok(mov) => mov,
            Err(e) => {
                if reply.ticket.generation() == self.coordinator.generation() {
                    error!(error = %e, "AI could not produce a move");
                    // Only a reset leaves this turn; nothing is left to wait for.
                    self.in_flight = None;
                    return ReplyOutcome::Failed;
                }
                return ReplyOutcome::Stale;
            }
        };

        let outcome = match self.coordinator.apply_ai_move(reply.ticket, mov.target) {
            Ok(report) => ReplyOutcome::Applied(report),
            Err(AiMoveError::Stale) => {
                debug!(ticket = reply.ticket.generation(), "Ignoring stale AI reply");
                ReplyOutcome::Stale
            }
            Err(AiMoveError::Rejected(rejection)) => {
                warn!(%rejection, source = %mov.source, "AI move rejected, playing fallback");
                self.apply_fallback(reply.ticket)
            }
        };

        if !matches!(outcome, ReplyOutcome::Stale) {
            self.in_flight = None;
        }
        self.dispatch_ai_turn();
        outcome
    }

    /// Runs one AI turn to completion: dispatch, wait and apply.
    ///
    /// Replies left over from before a reset are skipped. Returns `None` if
    /// no AI turn was pending.
    #[instrument(skip(self))]
    pub async fn run_ai_turn(&mut self) -> Option<ReplyOutcome> {
        if self.in_flight.is_none() && !self.dispatch_ai_turn() {
            return None;
        }
        loop {
            let reply = self.next_ai_reply().await?;
            match self.apply_ai_reply(reply) {
                ReplyOutcome::Stale if self.in_flight.is_some() => continue,
                outcome => return Some(outcome),
            }
        }
    }

    fn apply_fallback(&mut self, ticket: AiTicket) -> ReplyOutcome {
        let board = *self.coordinator.board();
        let mode = *self.coordinator.settings().placement_mode();
        match self.provider.make_random_move(&board, mode) {
            Ok(AiMove { target, .. }) => match self.coordinator.apply_ai_move(ticket, target) {
                Ok(report) => ReplyOutcome::Applied(report),
                Err(e) => {
                    error!(error = %e, source = %MoveSource::Fallback, "Fallback move rejected");
                    ReplyOutcome::Failed
                }
            },
            Err(e) => {
                error!(error = %e, "No fallback move available");
                ReplyOutcome::Failed
            }
        }
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            debug!("Aborting in-flight AI turn");
            handle.abort();
        }
    }
}

impl<L> Drop for GameSession<L> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
