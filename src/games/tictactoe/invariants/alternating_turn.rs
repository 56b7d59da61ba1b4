//! Alternating turn invariant: players alternate starting from the first player.

use super::{GameSnapshot, Invariant};

/// Invariant: Players alternate turns.
///
/// History must start with the configured first player and never show the
/// same mark twice in a row. While the game runs, the active player is the
/// one after the last move; once it ends, the active player stays on the
/// mark that made the final move.
pub struct AlternatingTurnInvariant;

impl<'a> Invariant<GameSnapshot<'a>> for AlternatingTurnInvariant {
    fn holds(game: &GameSnapshot<'a>) -> bool {
        let history = game.history;

        let Some(first) = history.first() else {
            return game.active_player == game.first_player;
        };

        if first.player != game.first_player {
            return false;
        }

        if history.windows(2).any(|w| w[0].player == w[1].player) {
            return false;
        }

        let last = history[history.len() - 1].player;
        let expected = if game.finished { last } else { last.opponent() };
        game.active_player == expected
    }

    fn description() -> &'static str {
        "Players alternate turns"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Board, Move, MoveOrigin, Player};

    #[test]
    fn test_o_first_game_alternates() {
        let board = Board::new();
        let history = [
            Move::new(Player::O, 4, 4, MoveOrigin::Ai),
            Move::new(Player::X, 0, 0, MoveOrigin::Human),
        ];
        let game = GameSnapshot {
            board: &board,
            history: &history,
            first_player: Player::O,
            active_player: Player::O,
            finished: false,
        };
        assert!(AlternatingTurnInvariant::holds(&game));
    }

    #[test]
    fn test_double_move_violates() {
        let board = Board::new();
        let history = [
            Move::new(Player::X, 4, 4, MoveOrigin::Human),
            Move::new(Player::X, 0, 0, MoveOrigin::Human),
        ];
        let game = GameSnapshot {
            board: &board,
            history: &history,
            first_player: Player::X,
            active_player: Player::O,
            finished: false,
        };
        assert!(!AlternatingTurnInvariant::holds(&game));
    }

    #[test]
    fn test_turn_freezes_when_finished() {
        let board = Board::new();
        let history = [Move::new(Player::X, 4, 4, MoveOrigin::Human)];
        let game = GameSnapshot {
            board: &board,
            history: &history,
            first_player: Player::X,
            active_player: Player::X,
            finished: true,
        };
        assert!(AlternatingTurnInvariant::holds(&game));
    }
}
