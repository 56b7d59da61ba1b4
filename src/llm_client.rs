//! LLM API client for OpenAI-compatible and Anthropic endpoints.

use crate::ai::{AdvisorError, AiMoveRequest, MoveAdvisor};
use crate::games::tictactoe::{Board, Cell, PlacementMode};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";

/// LLM provider selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI (GPT models) or any server speaking its chat completions API.
    #[default]
    OpenAI,
    /// Anthropic (Claude models).
    Anthropic,
}

/// Configuration for LLM client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    provider: LlmProvider,
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: Option<String>,
}

impl LlmConfig {
    /// Creates a new LLM configuration.
    #[instrument(skip(api_key), fields(provider = ?provider, model = %model))]
    pub fn new(provider: LlmProvider, api_key: String, model: String, max_tokens: u32) -> Self {
        debug!("Creating LLM config");
        Self {
            provider,
            api_key,
            model,
            max_tokens,
            base_url: None,
        }
    }

    /// Points the client at a different endpoint (local or proxy server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Gets the provider.
    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    /// Gets the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Gets the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Gets the max tokens.
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Endpoint root, without trailing slash.
    pub fn base_url(&self) -> &str {
        let url = self.base_url.as_deref().unwrap_or(match self.provider {
            LlmProvider::OpenAI => OPENAI_BASE_URL,
            LlmProvider::Anthropic => ANTHROPIC_BASE_URL,
        });
        url.trim_end_matches('/')
    }
}

/// LLM client that abstracts over multiple providers.
#[derive(Debug, Clone)]
pub struct LlmClient {
    config: LlmConfig,
    http: reqwest::Client,
}

impl LlmClient {
    /// Creates a new LLM client.
    #[instrument(skip(config), fields(provider = ?config.provider()))]
    pub fn new(config: LlmConfig) -> Self {
        info!("Creating LLM client");
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Generates a completion from a system prompt and user message.
    #[instrument(skip(self, system_prompt, user_message), fields(provider = ?self.config.provider, model = %self.config.model))]
    pub async fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        debug!("Generating completion");
        match self.config.provider {
            LlmProvider::OpenAI => self.generate_openai(system_prompt, user_message).await,
            LlmProvider::Anthropic => self.generate_anthropic(system_prompt, user_message).await,
        }
    }

    /// Generates a completion using Anthropic Claude.
    #[instrument(skip(self, system_prompt, user_message))]
    async fn generate_anthropic(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        debug!("Building Anthropic API request");
        let request_body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "system": system_prompt,
            "messages": [
                {
                    "role": "user",
                    "content": user_message
                }
            ]
        });

        let response_json = self
            .post_json(
                format!("{}/messages", self.config.base_url()),
                &[
                    ("x-api-key", self.config.api_key.as_str()),
                    ("anthropic-version", "2023-06-01"),
                ],
                &request_body,
            )
            .await?;

        let content = response_json["content"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                error!(response = %response_json, "No text content in Anthropic response");
                LlmError::new("No text content in Anthropic response")
            })?
            .to_string();

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }

    /// Generates a completion using the OpenAI chat completions API.
    #[instrument(skip(self, system_prompt, user_message))]
    async fn generate_openai(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        debug!("Building chat completion request");
        let request_body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_message }
            ]
        });

        let bearer = format!("Bearer {}", self.config.api_key);
        let response_json = self
            .post_json(
                format!("{}/chat/completions", self.config.base_url()),
                &[("authorization", bearer.as_str())],
                &request_body,
            )
            .await?;

        let content = response_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                error!(response = %response_json, "No content in OpenAI response");
                LlmError::new("No content in OpenAI response")
            })?
            .to_string();

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }

    /// Posts a JSON body and returns the parsed JSON response.
    #[instrument(skip(self, headers, body))]
    async fn post_json(
        &self,
        url: String,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, LlmError> {
        let mut request = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        debug!("Sending request");
        let response = request.send().await.map_err(|e| {
            error!(error = ?e, "API request failed");
            LlmError::new(format!("API request failed: {}", e))
        })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read response");
            LlmError::new(format!("Failed to read response: {}", e))
        })?;

        if !status.is_success() {
            error!(status = %status, response = %response_text, "API error");
            return Err(LlmError::new(format!(
                "API error {}: {}",
                status, response_text
            )));
        }

        debug!(response_length = response_text.len(), "Parsing response");
        serde_json::from_str(&response_text).map_err(|e| {
            error!(error = ?e, response = %response_text, "Failed to parse response");
            LlmError::new(format!("Failed to parse response: {}", e))
        })
    }
}

/// Builds the system prompt for a move request.
#[instrument]
pub fn move_system_prompt(request: &AiMoveRequest) -> String {
    format!(
        "You are playing tic-tac-toe as {}. Reply with a single integer and nothing else.",
        request.active_player
    )
}

/// Builds the user message for a move request.
#[instrument]
pub fn move_user_message(request: &AiMoveRequest) -> String {
    let board = Board::from_cells(request.board.map(|mark| mark.map_or(Cell::Empty, Cell::Occupied)));
    let rules = match request.mode {
        PlacementMode::Direct => {
            "Choose an empty cell. Cells are numbered 0-8 left-to-right, top-to-bottom \
             (0=top-left, 8=bottom-right)."
        }
        PlacementMode::Gravity => {
            "Gravity is on: your number picks a column (number % 3) and your mark drops \
             to the lowest empty cell of that column. Choose a column that is not full."
        }
    };
    format!(
        "Game state: {}\n\nCurrent board:\n{}\n\n{}\nReply with the number only.",
        request.to_json(),
        board.display(),
        rules
    )
}

#[async_trait::async_trait]
impl MoveAdvisor for LlmClient {
    #[instrument(skip(self, request), fields(model = %self.config.model))]
    async fn suggest_move(&self, request: &AiMoveRequest) -> Result<String, AdvisorError> {
        let reply = self
            .generate(&move_system_prompt(request), &move_user_message(request))
            .await?;
        debug!(reply = %reply.trim(), "Advisor replied");
        Ok(reply)
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

/// LLM client error.
#[derive(Debug, Clone, Display, Error)]
#[display("LLM error: {} at {}:{}", message, file, line)]
pub struct LlmError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LlmError {
    /// Creates a new LLM error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        error!(error_message = %message, "LLM error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<LlmError> for AdvisorError {
    #[track_caller]
    fn from(err: LlmError) -> Self {
        AdvisorError::new(err.message)
    }
}
