//! Application state and logic.

use super::input::Command;
use tictactoe_engine::{
    GameEvent, GameSession, MoveRejection, OpponentKind, Phase, Player, ReplyOutcome,
    ScoreLedger, SoundCue, Theme,
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Main application state.
pub struct App {
    session: GameSession<Box<dyn ScoreLedger>>,
    events: mpsc::UnboundedReceiver<GameEvent>,
    cursor: usize,
    theme: Theme,
    sound: bool,
    notice: Option<String>,
    should_quit: bool,
}

impl App {
    /// Creates a new application around a running session.
    pub fn new(mut session: GameSession<Box<dyn ScoreLedger>>, theme: Theme, sound: bool) -> Self {
        let events = session.subscribe();
        Self {
            session,
            events,
            cursor: 4,
            theme,
            sound,
            notice: None,
            should_quit: false,
        }
    }

    /// The game session.
    pub fn session(&self) -> &GameSession<Box<dyn ScoreLedger>> {
        &self.session
    }

    /// Cell under the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Active colour theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Whether sound cues are on.
    pub fn sound(&self) -> bool {
        self.sound
    }

    /// Whether the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Status line text.
    pub fn status(&self) -> String {
        if let Some(notice) = &self.notice {
            return notice.clone();
        }
        let coordinator = self.session.coordinator();
        match coordinator.phase() {
            Phase::AwaitingHumanMove => format!("{} to move", coordinator.active_player()),
            Phase::AwaitingAiMove => "AI is thinking...".to_string(),
            Phase::Won => match coordinator.outcome().winner() {
                Some(player) => format!("{} wins! Press 'r' to play again.", player),
                None => "Game over. Press 'r' to play again.".to_string(),
            },
            Phase::Draw => "Draw! Press 'r' to play again.".to_string(),
        }
    }

    /// Applies a key command.
    #[instrument(skip(self))]
    pub fn handle_command(&mut self, command: Command) {
        self.notice = None;
        match command {
            Command::Cursor(index) => self.cursor = index,
            Command::Place(index) => {
                self.cursor = index;
                if let Err(rejection) = self.session.cell_activated(index) {
                    debug!(%rejection, "Move rejected");
                    self.notice = Some(rejection_notice(rejection));
                }
            }
            Command::Reset => self.session.reset_requested(),
            Command::ToggleGravity => {
                let mode = self.session.coordinator().settings().placement_mode().toggle();
                info!(%mode, "Placement mode changed");
                self.session.set_placement_mode(mode);
            }
            Command::ToggleOpponent => {
                let opponent = self.session.coordinator().settings().opponent().toggle();
                info!(%opponent, "Opponent changed");
                self.session.set_opponent(opponent);
            }
            Command::CycleTheme => self.theme = self.theme.next(),
            Command::ToggleSound => self.sound = !self.sound,
            Command::Quit => self.should_quit = true,
        }
    }

    /// Applies ready AI replies and collects sound cues for new events.
    pub fn tick(&mut self) -> Vec<SoundCue> {
        while let Some(reply) = self.session.poll_ai_reply() {
            if let ReplyOutcome::Failed = self.session.apply_ai_reply(reply) {
                self.notice = Some("The AI could not move. Press 'r' to restart.".to_string());
            }
        }

        let mut cues = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            debug!(?event, "Game event");
            cues.extend(event.sound_cue().filter(|_| self.sound));
        }
        cues
    }

    /// Opponent label for the header.
    pub fn opponent_label(&self) -> &'static str {
        match self.session.coordinator().settings().opponent() {
            OpponentKind::Human => "2 players",
            OpponentKind::RemoteAi => "vs AI",
        }
    }

    /// Wins for `player` on the scoreboard.
    pub fn wins(&self, player: Player) -> u32 {
        self.session.coordinator().ledger().scoreboard().wins(player)
    }

    /// Draws on the scoreboard.
    pub fn draws(&self) -> u32 {
        *self.session.coordinator().ledger().scoreboard().draws()
    }
}

fn rejection_notice(rejection: MoveRejection) -> String {
    match rejection {
        MoveRejection::NotYourTurn => "Wait for the AI to move.".to_string(),
        MoveRejection::GameOver => "Game over. Press 'r' to play again.".to_string(),
        other => other.to_string(),
    }
}
