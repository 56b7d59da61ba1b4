//! Integration test for LLM client connectivity.

use std::sync::Arc;
use std::time::Duration;
use tictactoe_engine::games::tictactoe::{Board, PlacementMode, Player, is_legal_target};
use tictactoe_engine::{
    AiMoveProvider, AiMoveRequest, LlmClient, LlmConfig, LlmProvider, MoveAdvisor, MoveSource,
    parse_reply,
};
use tracing::instrument;

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_anthropic_suggests_a_cell() {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("ANTHROPIC_API_KEY").expect("ANTHROPIC_API_KEY not set");

    let config = LlmConfig::new(
        LlmProvider::Anthropic,
        api_key,
        "claude-3-5-haiku-latest".to_string(),
        16,
    );

    let client = LlmClient::new(config);
    let board: Board = "X..|.O.|..X".parse().unwrap();
    let request = AiMoveRequest::new(&board, PlacementMode::Direct, Player::O);

    let reply = client
        .suggest_move(&request)
        .await
        .expect("Failed to generate");

    eprintln!("Reply: {}", reply);
    assert!(parse_reply(&reply).is_some(), "Reply should start with a cell index");
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_openai_plays_through_provider() {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY not set");

    let config = LlmConfig::new(LlmProvider::OpenAI, api_key, "gpt-4o-mini".to_string(), 16);

    let provider = AiMoveProvider::new(Arc::new(LlmClient::new(config)), Duration::from_secs(20));
    let board: Board = "X..|...|...".parse().unwrap();

    let mov = provider
        .request_move(&board, PlacementMode::Gravity, Player::O)
        .await
        .expect("Empty columns remain");

    eprintln!("Move: {:?}", mov);
    assert!(is_legal_target(&board, PlacementMode::Gravity, mov.target));
    assert!(matches!(mov.source, MoveSource::Advisor | MoveSource::Fallback));
}
