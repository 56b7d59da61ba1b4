//! Score ledger: accumulates win/draw counts across games.
//!
//! The coordinator only ever writes to a ledger, once per finished game.
//! Reading the counts back is the business of whoever renders them.

use crate::games::tictactoe::{GameOutcome, Player};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Running totals of finished games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Games won by X.
    #[serde(default)]
    x_wins: u32,
    /// Games won by O.
    #[serde(default)]
    o_wins: u32,
    /// Drawn games.
    #[serde(default)]
    draws: u32,
    /// When the last game finished.
    #[serde(default)]
    last_played: Option<DateTime<Utc>>,
}

impl Scoreboard {
    /// Adds a finished game to the totals. In-progress outcomes are ignored.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: &GameOutcome) {
        match outcome {
            GameOutcome::Won {
                player: Player::X, ..
            } => self.x_wins += 1,
            GameOutcome::Won {
                player: Player::O, ..
            } => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
            GameOutcome::InProgress => return,
        }
        self.last_played = Some(Utc::now());
    }

    /// Wins for the given player.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }

    /// Total finished games.
    pub fn games(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

/// Persistence collaborator notified on every terminal outcome.
pub trait ScoreLedger {
    /// Records a finished game.
    fn record_outcome(&mut self, outcome: &GameOutcome) -> Result<(), LedgerError>;

    /// Current totals.
    fn scoreboard(&self) -> Scoreboard;
}

impl<L: ScoreLedger + ?Sized> ScoreLedger for Box<L> {
    fn record_outcome(&mut self, outcome: &GameOutcome) -> Result<(), LedgerError> {
        (**self).record_outcome(outcome)
    }

    fn scoreboard(&self) -> Scoreboard {
        (**self).scoreboard()
    }
}

/// Ledger that keeps totals for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    scores: Scoreboard,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreLedger for MemoryLedger {
    fn record_outcome(&mut self, outcome: &GameOutcome) -> Result<(), LedgerError> {
        self.scores.record(outcome);
        Ok(())
    }

    fn scoreboard(&self) -> Scoreboard {
        self.scores
    }
}

/// Ledger persisted as a JSON file.
///
/// The file is rewritten after every recorded game.
#[derive(Debug, Clone)]
pub struct FileLedger {
    path: PathBuf,
    scores: Scoreboard,
}

impl FileLedger {
    /// Opens a ledger at `path`, loading existing totals if the file exists.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the file exists but cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let path = path.as_ref().to_path_buf();

        let scores = if path.exists() {
            debug!("Loading scoreboard");
            let content = std::fs::read_to_string(&path).map_err(|e| {
                LedgerError::new(format!("Failed to read '{}': {}", path.display(), e))
            })?;
            serde_json::from_str(&content).map_err(|e| {
                LedgerError::new(format!("Failed to parse '{}': {}", path.display(), e))
            })?
        } else {
            debug!("No scoreboard yet, starting empty");
            Scoreboard::default()
        };

        info!(games = scores.games(), "Scoreboard opened");
        Ok(Self { path, scores })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Clears the totals and writes the empty scoreboard.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn clear(&mut self) -> Result<(), LedgerError> {
        self.scores = Scoreboard::default();
        self.save()
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn save(&self) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                LedgerError::new(format!("Failed to create '{}': {}", parent.display(), e))
            })?;
        }
        let json = serde_json::to_string_pretty(&self.scores)
            .map_err(|e| LedgerError::new(format!("Failed to serialize scoreboard: {}", e)))?;
        std::fs::write(&self.path, json).map_err(|e| {
            LedgerError::new(format!("Failed to write '{}': {}", self.path.display(), e))
        })?;
        debug!("Scoreboard saved");
        Ok(())
    }
}

impl ScoreLedger for FileLedger {
    fn record_outcome(&mut self, outcome: &GameOutcome) -> Result<(), LedgerError> {
        self.scores.record(outcome);
        self.save()
    }

    fn scoreboard(&self) -> Scoreboard {
        self.scores
    }
}

/// Ledger persistence error.
#[derive(Debug, Clone, Display, Error)]
#[display("Ledger error: {} at {}:{}", message, file, line)]
pub struct LedgerError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LedgerError {
    /// Creates a new ledger error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::WinningLine;

    #[test]
    fn test_scoreboard_counts() {
        let mut scores = Scoreboard::default();
        scores.record(&GameOutcome::Won {
            player: Player::O,
            line: WinningLine::new(0, 4, 8),
        });
        scores.record(&GameOutcome::Draw);
        scores.record(&GameOutcome::InProgress);

        assert_eq!(scores.wins(Player::O), 1);
        assert_eq!(scores.wins(Player::X), 0);
        assert_eq!(*scores.draws(), 1);
        assert_eq!(scores.games(), 2);
        assert!(scores.last_played().is_some());
    }

    #[test]
    fn test_memory_ledger_records() {
        let mut ledger = MemoryLedger::new();
        ledger.record_outcome(&GameOutcome::Draw).unwrap();
        assert_eq!(*ledger.scoreboard().draws(), 1);
    }

    #[test]
    fn test_scoreboard_tolerates_missing_fields() {
        let scores: Scoreboard = serde_json::from_str(r#"{"x_wins": 3}"#).unwrap();
        assert_eq!(*scores.x_wins(), 3);
        assert_eq!(scores.games(), 3);
    }
}
