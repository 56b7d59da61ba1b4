//! Turn coordinator: the state machine that owns a game session.
//!
//! Human input and AI replies both enter through the coordinator. It gates
//! them on the current phase, runs the move resolver and the outcome
//! evaluator, advances the turn and notifies the score ledger and event
//! subscribers.

use super::invariants::{GameSnapshot, InvariantSet, TicTacToeInvariants};
use super::rules::{GameOutcome, WinningLine, evaluate, resolve_target};
use super::{Board, GameEvent, Move, MoveOrigin, MoveRejection, OpponentKind, PlacementMode, Player};
use crate::ledger::ScoreLedger;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

/// Mark played by the remote AI when the opponent is [`OpponentKind::RemoteAi`].
pub const AI_MARK: Player = Player::O;

/// Session configuration. Changing any of it restarts the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GameSettings {
    /// How targets become cells.
    placement_mode: PlacementMode,
    /// Who plays `O`.
    opponent: OpponentKind,
    /// Mark that moves first after every reset.
    first_player: Player,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            placement_mode: PlacementMode::Direct,
            opponent: OpponentKind::Human,
            first_player: Player::X,
        }
    }
}

/// Coordinator phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Phase {
    /// Waiting for a human to move.
    #[display("awaiting human move")]
    AwaitingHumanMove,
    /// Waiting for the AI move provider.
    #[display("awaiting AI move")]
    AwaitingAiMove,
    /// Game won; only reset leaves this phase.
    #[display("won")]
    Won,
    /// Game drawn; only reset leaves this phase.
    #[display("draw")]
    Draw,
}

/// Identifies the game state an AI request was issued against.
///
/// The generation changes on every accepted move and every reset, so a reply
/// carrying an old ticket can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AiTicket {
    generation: u64,
}

impl AiTicket {
    /// Generation this ticket was issued for.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Everything the AI move provider needs for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiTurn {
    /// Ticket to hand back with the reply.
    pub ticket: AiTicket,
    /// Board snapshot the move is for.
    pub board: Board,
    /// Active placement mode.
    pub mode: PlacementMode,
    /// Mark the AI plays.
    pub player: Player,
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    /// The move as applied.
    pub mov: Move,
    /// Outcome after the move.
    pub outcome: GameOutcome,
}

/// Why an AI reply was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum AiMoveError {
    /// The ticket belongs to an earlier game state, or no AI turn is pending.
    #[display("Stale AI reply")]
    Stale,
    /// The move itself was rejected.
    #[display("AI move rejected: {}", _0)]
    Rejected(MoveRejection),
}

/// Game state machine for one board.
#[derive(Debug)]
pub struct TurnCoordinator<L> {
    settings: GameSettings,
    board: Board,
    active: Player,
    outcome: GameOutcome,
    phase: Phase,
    history: Vec<Move>,
    generation: u64,
    ai_in_flight: bool,
    ledger: L,
    subscribers: Vec<mpsc::UnboundedSender<GameEvent>>,
}

impl<L: ScoreLedger> TurnCoordinator<L> {
    /// Creates a coordinator and starts the first game.
    #[instrument(skip(ledger))]
    pub fn new(settings: GameSettings, ledger: L) -> Self {
        info!("Creating turn coordinator");
        let mut coordinator = Self {
            settings,
            board: Board::new(),
            active: settings.first_player,
            outcome: GameOutcome::InProgress,
            phase: Phase::AwaitingHumanMove,
            history: Vec::new(),
            generation: 0,
            ai_in_flight: false,
            ledger,
            subscribers: Vec::new(),
        };
        coordinator.phase = coordinator.phase_for_turn();
        coordinator
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark to move (frozen on the last mover once the game ends).
    pub fn active_player(&self) -> Player {
        self.active
    }

    /// Cached outcome of the current board.
    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Winning line to highlight, if any.
    pub fn winning_line(&self) -> Option<WinningLine> {
        self.outcome.winning_line()
    }

    /// True while the AI is expected to move.
    pub fn is_ai_thinking(&self) -> bool {
        self.phase == Phase::AwaitingAiMove
    }

    /// Session configuration.
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Moves accepted since the last reset.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Generation counter of the current game state.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The score ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the score ledger.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Registers a new event subscriber.
    #[instrument(skip(self))]
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<GameEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        debug!(subscribers = self.subscribers.len(), "Subscriber added");
        rx
    }

    /// Applies a human move.
    ///
    /// # Errors
    ///
    /// [`MoveRejection::NotYourTurn`] while the AI is to move,
    /// [`MoveRejection::GameOver`] after a win or draw, or any placement
    /// rejection from the move resolver. Rejections change nothing.
    #[instrument(skip(self), fields(phase = %self.phase, player = %self.active))]
    pub fn apply_player_move(&mut self, target: usize) -> Result<MoveReport, MoveRejection> {
        match self.phase {
            Phase::AwaitingHumanMove => self.commit(target, MoveOrigin::Human),
            Phase::AwaitingAiMove => {
                debug!("Human move while AI is thinking");
                Err(MoveRejection::NotYourTurn)
            }
            Phase::Won | Phase::Draw => Err(MoveRejection::GameOver),
        }
    }

    /// Hands out the pending AI turn, once.
    ///
    /// Returns `None` unless the coordinator is awaiting an AI move that has
    /// not been handed out yet, so at most one request is outstanding.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn begin_ai_turn(&mut self) -> Option<AiTurn> {
        if self.phase != Phase::AwaitingAiMove || self.ai_in_flight {
            return None;
        }
        self.ai_in_flight = true;
        self.publish(GameEvent::AiThinking);
        debug!(generation = self.generation, "AI turn issued");
        Some(AiTurn {
            ticket: AiTicket {
                generation: self.generation,
            },
            board: self.board,
            mode: self.settings.placement_mode,
            player: self.active,
        })
    }

    /// Applies an AI move issued with `ticket`.
    ///
    /// # Errors
    ///
    /// [`AiMoveError::Stale`] if the game moved on (reset, or the reply was
    /// already applied) since the ticket was issued.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn apply_ai_move(
        &mut self,
        ticket: AiTicket,
        target: usize,
    ) -> Result<MoveReport, AiMoveError> {
        if self.phase != Phase::AwaitingAiMove || ticket.generation != self.generation {
            debug!(ticket = ticket.generation, "Discarding stale AI reply");
            return Err(AiMoveError::Stale);
        }
        self.commit(target, MoveOrigin::Ai)
            .map_err(AiMoveError::Rejected)
    }

    /// Starts a new game with the current settings.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.active = self.settings.first_player;
        self.outcome = GameOutcome::InProgress;
        self.history.clear();
        self.generation += 1;
        self.ai_in_flight = false;
        self.phase = self.phase_for_turn();
        info!(generation = self.generation, phase = %self.phase, "Game reset");
        self.publish(GameEvent::Reset);
    }

    /// Replaces the settings and restarts the game.
    #[instrument(skip(self))]
    pub fn configure(&mut self, settings: GameSettings) {
        self.settings = settings;
        self.reset();
    }

    /// Switches placement mode; restarts the game.
    #[instrument(skip(self))]
    pub fn set_placement_mode(&mut self, mode: PlacementMode) {
        self.configure(self.settings.with_placement_mode(mode));
    }

    /// Switches the opponent kind; restarts the game.
    #[instrument(skip(self))]
    pub fn set_opponent(&mut self, opponent: OpponentKind) {
        self.configure(self.settings.with_opponent(opponent));
    }

    fn commit(&mut self, target: usize, origin: MoveOrigin) -> Result<MoveReport, MoveRejection> {
        let player = self.active;
        let cell = resolve_target(&self.board, self.settings.placement_mode, target)?;

        self.board = self.board.with_mark(cell, player);
        let mov = Move::new(player, target, cell, origin);
        self.history.push(mov);
        self.generation += 1;
        self.ai_in_flight = false;
        debug!(%mov, "Move applied");
        self.publish(GameEvent::Moved(mov));

        self.outcome = evaluate(&self.board);
        match self.outcome {
            GameOutcome::Won { player, line } => {
                self.phase = Phase::Won;
                info!(%player, %line, "Game won");
                self.publish(GameEvent::Won { player, line });
                self.record_outcome();
            }
            GameOutcome::Draw => {
                self.phase = Phase::Draw;
                info!("Game drawn");
                self.publish(GameEvent::Draw);
                self.record_outcome();
            }
            GameOutcome::InProgress => {
                self.active = player.opponent();
                self.phase = self.phase_for_turn();
            }
        }

        self.check_invariants();
        Ok(MoveReport {
            mov,
            outcome: self.outcome,
        })
    }

    fn phase_for_turn(&self) -> Phase {
        if self.settings.opponent == OpponentKind::RemoteAi && self.active == AI_MARK {
            Phase::AwaitingAiMove
        } else {
            Phase::AwaitingHumanMove
        }
    }

    fn record_outcome(&mut self) {
        if let Err(e) = self.ledger.record_outcome(&self.outcome) {
            warn!(error = %e, "Failed to record outcome");
        }
    }

    fn publish(&mut self, event: GameEvent) {
        // Drop subscribers whose receiver has gone away.
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    fn check_invariants(&self) {
        if cfg!(debug_assertions) {
            let snapshot = GameSnapshot {
                board: &self.board,
                history: &self.history,
                first_player: self.settings.first_player,
                active_player: self.active,
                finished: self.outcome.is_terminal(),
            };
            if let Err(violations) = TicTacToeInvariants::check_all(&snapshot) {
                error!(?violations, "Game invariants violated");
                debug_assert!(false, "Game invariants violated: {:?}", violations);
            }
        }
    }
}
