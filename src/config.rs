//! Application configuration loaded from TOML.

use crate::ai::DEFAULT_TIMEOUT;
use crate::games::tictactoe::{GameSettings, OpponentKind, PlacementMode, Player};
use crate::llm_client::{LlmConfig, LlmProvider};
use crate::theme::Theme;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Remote AI opponent settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// LLM provider (openai or anthropic).
    provider: LlmProvider,

    /// LLM model name (e.g., "gpt-4o-mini", "claude-3-5-haiku-latest").
    model: String,

    /// Maximum tokens for LLM responses.
    max_tokens: u32,

    /// Bounded wait for a reply before the random fallback plays.
    timeout_ms: u64,

    /// Alternative endpoint root for OpenAI-compatible servers.
    base_url: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::OpenAI,
            model: "gpt-4o-mini".to_string(),
            max_tokens: 16,
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            base_url: None,
        }
    }
}

impl AiConfig {
    /// Advisor timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Creates LLM configuration from these settings.
    /// Requires OPENAI_API_KEY or ANTHROPIC_API_KEY environment variable.
    #[instrument(skip(self), fields(provider = ?self.provider, model = %self.model))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");

        let var = match self.provider {
            LlmProvider::OpenAI => "OPENAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        };
        let api_key = std::env::var(var)
            .map_err(|_| ConfigError::new(format!("{} environment variable not set", var)))?;

        let config = LlmConfig::new(self.provider, api_key, self.model.clone(), self.max_tokens);
        Ok(match &self.base_url {
            Some(url) => config.with_base_url(url.clone()),
            None => config,
        })
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Direct or gravity placement.
    placement_mode: PlacementMode,

    /// Human or AI opponent.
    opponent: OpponentKind,

    /// Mark that moves first.
    first_player: Player,

    /// Board colours.
    theme: Theme,

    /// Terminal bell cues on/off.
    sound: bool,

    /// Scoreboard file; in-memory when unset.
    scores_path: Option<PathBuf>,

    /// Remote AI settings.
    ai: AiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            placement_mode: PlacementMode::Direct,
            opponent: OpponentKind::Human,
            first_player: Player::X,
            theme: Theme::Default,
            sound: true,
            scores_path: None,
            ai: AiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(mode = %config.placement_mode, opponent = %config.opponent, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if it exists, defaults otherwise.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Game settings derived from this configuration.
    pub fn game_settings(&self) -> GameSettings {
        GameSettings::default()
            .with_placement_mode(self.placement_mode)
            .with_opponent(self.opponent)
            .with_first_player(self.first_player)
    }

    /// Overrides the placement mode.
    pub fn set_placement_mode(&mut self, mode: PlacementMode) {
        self.placement_mode = mode;
    }

    /// Overrides the opponent.
    pub fn set_opponent(&mut self, opponent: OpponentKind) {
        self.opponent = opponent;
    }

    /// Overrides the first player.
    pub fn set_first_player(&mut self, player: Player) {
        self.first_player = player;
    }

    /// Overrides the scoreboard path.
    pub fn set_scores_path(&mut self, path: PathBuf) {
        self.scores_path = Some(path);
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
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

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.ai().timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_full_toml() {
        let config = AppConfig::from_toml(
            r#"
            placement_mode = "gravity"
            opponent = "ai"
            first_player = "O"
            theme = "forest"
            sound = false
            scores_path = "scores.json"

            [ai]
            provider = "anthropic"
            model = "claude-3-5-haiku-latest"
            timeout_ms = 2500
            "#,
        )
        .unwrap();

        assert_eq!(*config.placement_mode(), PlacementMode::Gravity);
        assert_eq!(*config.opponent(), OpponentKind::RemoteAi);
        assert_eq!(*config.first_player(), Player::O);
        assert_eq!(*config.theme(), Theme::Forest);
        assert!(!config.sound());
        assert_eq!(config.scores_path().as_deref(), Some(Path::new("scores.json")));
        assert_eq!(*config.ai().provider(), LlmProvider::Anthropic);
        assert_eq!(config.ai().timeout(), Duration::from_millis(2500));
        assert_eq!(*config.ai().max_tokens(), 16);

        let settings = config.game_settings();
        assert_eq!(*settings.placement_mode(), PlacementMode::Gravity);
        assert_eq!(*settings.first_player(), Player::O);
    }

    #[test]
    fn test_bad_value_is_error() {
        let err = AppConfig::from_toml(r#"placement_mode = "sideways""#).unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }
}
