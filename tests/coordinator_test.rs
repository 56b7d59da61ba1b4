//! End-to-end scenarios for the turn coordinator.

use tictactoe_engine::games::tictactoe::{
    AiMoveError, Cell, GameEvent, GameOutcome, GameSettings, MoveRejection, OpponentKind, Phase,
    PlacementMode, Player, TurnCoordinator, WinningLine,
};
use tictactoe_engine::{MemoryLedger, ScoreLedger};

fn human_game() -> TurnCoordinator<MemoryLedger> {
    TurnCoordinator::new(GameSettings::default(), MemoryLedger::new())
}

fn play(game: &mut TurnCoordinator<MemoryLedger>, targets: &[usize]) {
    for &target in targets {
        game.apply_player_move(target)
            .unwrap_or_else(|e| panic!("move {} rejected: {}", target, e));
    }
}

#[test]
fn test_top_row_win() {
    let mut game = human_game();
    play(&mut game, &[0, 3, 1, 4, 2]);

    assert_eq!(
        game.outcome(),
        GameOutcome::Won {
            player: Player::X,
            line: WinningLine::new(0, 1, 2),
        }
    );
    assert_eq!(game.phase(), Phase::Won);
    assert_eq!(game.winning_line(), Some(WinningLine::new(0, 1, 2)));
    assert_eq!(game.ledger().scoreboard().wins(Player::X), 1);
}

#[test]
fn test_full_board_draw() {
    let mut game = human_game();
    play(&mut game, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

    assert_eq!(game.outcome(), GameOutcome::Draw);
    assert_eq!(game.phase(), Phase::Draw);
    assert_eq!(*game.ledger().scoreboard().draws(), 1);
}

#[test]
fn test_gravity_column_fills_bottom_up() {
    let settings = GameSettings::default().with_placement_mode(PlacementMode::Gravity);
    let mut game = TurnCoordinator::new(settings, MemoryLedger::new());
    play(&mut game, &[0, 0, 0]);

    let board = game.board();
    assert_eq!(board.get(0), Some(Cell::Occupied(Player::X)));
    assert_eq!(board.get(3), Some(Cell::Occupied(Player::O)));
    assert_eq!(board.get(6), Some(Cell::Occupied(Player::X)));
    assert_eq!(game.apply_player_move(0), Err(MoveRejection::ColumnFull(0)));
    assert_eq!(game.active_player(), Player::O);
}

#[test]
fn test_turns_alternate() {
    // Eight moves with no line: X 0 2 3 7, O 1 4 5 6.
    let mut game = human_game();
    for (n, &target) in [0, 1, 2, 4, 3, 5, 7, 6].iter().enumerate() {
        let expected = if n % 2 == 0 { Player::X } else { Player::O };
        assert_eq!(game.active_player(), expected, "before move {}", n);
        play(&mut game, &[target]);
        assert_eq!(game.outcome(), GameOutcome::InProgress);
    }
    assert_eq!(game.active_player(), Player::X);

    let players: Vec<Player> = game.history().iter().map(|m| m.player).collect();
    let expected: Vec<Player> = (0..8)
        .map(|n| if n % 2 == 0 { Player::X } else { Player::O })
        .collect();
    assert_eq!(players, expected);
}

#[test]
fn test_rejection_changes_nothing() {
    let mut game = human_game();
    play(&mut game, &[4]);
    let board = *game.board();
    let generation = game.generation();

    assert_eq!(game.apply_player_move(4), Err(MoveRejection::CellOccupied(4)));
    assert_eq!(game.apply_player_move(12), Err(MoveRejection::OutOfRange(12)));
    assert_eq!(*game.board(), board);
    assert_eq!(game.generation(), generation);
    assert_eq!(game.active_player(), Player::O);
}

#[test]
fn test_no_moves_after_win() {
    let mut game = human_game();
    play(&mut game, &[0, 3, 1, 4, 2]);
    assert_eq!(game.apply_player_move(8), Err(MoveRejection::GameOver));
}

#[test]
fn test_reset_keeps_scores_and_settings() {
    let settings = GameSettings::default().with_first_player(Player::O);
    let mut game = TurnCoordinator::new(settings, MemoryLedger::new());
    play(&mut game, &[0, 3, 1, 4, 2]);
    game.reset();

    assert_eq!(game.board().filled(), 0);
    assert_eq!(game.active_player(), Player::O);
    assert_eq!(game.outcome(), GameOutcome::InProgress);
    assert_eq!(game.ledger().scoreboard().wins(Player::O), 1);
}

#[test]
fn test_ai_turn_blocks_human_and_rejects_stale_tickets() {
    let settings = GameSettings::default().with_opponent(OpponentKind::RemoteAi);
    let mut game = TurnCoordinator::new(settings, MemoryLedger::new());
    play(&mut game, &[4]);

    assert_eq!(game.phase(), Phase::AwaitingAiMove);
    assert_eq!(game.apply_player_move(0), Err(MoveRejection::NotYourTurn));

    let old = game.begin_ai_turn().unwrap().ticket;
    game.reset();
    assert_eq!(game.apply_ai_move(old, 0), Err(AiMoveError::Stale));
    assert_eq!(game.board().filled(), 0);
}

#[test]
fn test_ai_reply_applies_with_current_ticket() {
    let settings = GameSettings::default().with_opponent(OpponentKind::RemoteAi);
    let mut game = TurnCoordinator::new(settings, MemoryLedger::new());
    play(&mut game, &[4]);

    let turn = game.begin_ai_turn().unwrap();
    let report = game.apply_ai_move(turn.ticket, 0).unwrap();
    assert_eq!(report.mov.player, Player::O);
    assert_eq!(game.phase(), Phase::AwaitingHumanMove);

    // The same reply cannot be applied twice.
    assert_eq!(game.apply_ai_move(turn.ticket, 1), Err(AiMoveError::Stale));
}

#[test]
fn test_events_follow_moves() {
    let mut game = human_game();
    let mut events = game.subscribe();
    play(&mut game, &[0, 3, 1, 4, 2]);
    game.reset();

    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    assert_eq!(seen.len(), 7);
    assert!(matches!(seen[0], GameEvent::Moved(m) if m.cell == 0));
    assert_eq!(
        seen[5],
        GameEvent::Won {
            player: Player::X,
            line: WinningLine::new(0, 1, 2),
        }
    );
    assert_eq!(seen[6], GameEvent::Reset);
}
