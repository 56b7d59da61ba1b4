//! Tests for the session driver and its background AI turns.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tictactoe_engine::games::tictactoe::{
    GameOutcome, GameSettings, OpponentKind, Phase, PlacementMode, Player,
};
use tictactoe_engine::{
    AdvisorError, AiMoveProvider, AiMoveRequest, GameSession, MemoryLedger, MoveAdvisor,
    MoveSource, ReplyOutcome, ScoreLedger,
};

/// Plays the lowest free cell, after a short delay.
struct FirstFree {
    delay: Duration,
}

#[async_trait]
impl MoveAdvisor for FirstFree {
    async fn suggest_move(&self, request: &AiMoveRequest) -> Result<String, AdvisorError> {
        tokio::time::sleep(self.delay).await;
        let index = request
            .board
            .iter()
            .position(Option::is_none)
            .ok_or_else(|| AdvisorError::new("board full"))?;
        Ok(index.to_string())
    }

    fn name(&self) -> &str {
        "first-free"
    }
}

fn ai_session(delay: Duration) -> GameSession<MemoryLedger> {
    let provider = AiMoveProvider::new(Arc::new(FirstFree { delay }), Duration::from_secs(5));
    let settings = GameSettings::default().with_opponent(OpponentKind::RemoteAi);
    GameSession::new(settings, MemoryLedger::new(), Arc::new(provider))
}

#[tokio::test]
async fn test_full_game_against_ai() {
    let mut session = ai_session(Duration::ZERO);

    // AI always takes the lowest free cell: X 4, O 0, X 8, O 1, X 2, O 3, X 6 wins 2-4-6.
    for target in [4, 8, 2] {
        session.cell_activated(target).unwrap();
        let outcome = session.run_ai_turn().await.unwrap();
        let ReplyOutcome::Applied(report) = outcome else {
            panic!("AI move not applied: {:?}", outcome);
        };
        assert_eq!(report.mov.player, Player::O);
    }
    let report = session.cell_activated(6).unwrap();

    assert_eq!(report.outcome.winner(), Some(Player::X));
    assert_eq!(session.coordinator().phase(), Phase::Won);
    assert_eq!(session.coordinator().ledger().scoreboard().wins(Player::X), 1);
    assert!(session.run_ai_turn().await.is_none());
}

#[tokio::test]
async fn test_reset_abandons_pending_reply() {
    let mut session = ai_session(Duration::from_millis(200));
    session.cell_activated(4).unwrap();
    assert!(session.coordinator().is_ai_thinking());

    session.reset_requested();
    assert_eq!(session.coordinator().phase(), Phase::AwaitingHumanMove);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(session.poll_ai_reply().is_none());
    assert_eq!(session.coordinator().board().filled(), 0);
}

#[tokio::test]
async fn test_run_ai_turn_skips_reply_queued_before_reset() {
    let provider = AiMoveProvider::offline().with_seed(5);
    let settings = GameSettings::default().with_opponent(OpponentKind::RemoteAi);
    let mut session = GameSession::new(settings, MemoryLedger::new(), Arc::new(provider));

    session.cell_activated(0).unwrap();
    // Let the offline reply land in the channel before the reset.
    tokio::time::sleep(Duration::from_millis(50)).await;
    session.reset_requested();

    session.cell_activated(4).unwrap();
    let outcome = session.run_ai_turn().await.unwrap();

    let ReplyOutcome::Applied(report) = outcome else {
        panic!("AI turn not played: {:?}", outcome);
    };
    assert_eq!(report.mov.player, Player::O);
    assert_eq!(session.coordinator().board().filled(), 2);
    assert!(!session.coordinator().is_ai_thinking());
}

#[tokio::test]
async fn test_reply_for_old_board_is_dropped() {
    let mut session = ai_session(Duration::ZERO);
    session.cell_activated(4).unwrap();
    let reply = session.next_ai_reply().await.unwrap();
    assert_eq!(reply.result.map(|m| m.source), Ok(MoveSource::Advisor));

    session.set_placement_mode(PlacementMode::Gravity);
    assert_eq!(session.apply_ai_reply(reply), ReplyOutcome::Stale);
    assert_eq!(session.coordinator().history().len(), 0);
    assert_eq!(session.coordinator().outcome(), GameOutcome::InProgress);
}

#[tokio::test]
async fn test_ai_opens_when_it_moves_first() {
    let provider = AiMoveProvider::offline().with_seed(1);
    let settings = GameSettings::default()
        .with_opponent(OpponentKind::RemoteAi)
        .with_first_player(Player::O);
    let mut session = GameSession::new(settings, MemoryLedger::new(), Arc::new(provider));

    let reply = session.next_ai_reply().await.unwrap();
    let ReplyOutcome::Applied(report) = session.apply_ai_reply(reply) else {
        panic!("opening AI move not applied");
    };
    assert_eq!(report.mov.player, Player::O);
    assert_eq!(session.coordinator().active_player(), Player::X);
}
