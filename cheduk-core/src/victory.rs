//! Terminal-condition evaluation

use serde::{Deserialize, Serialize};

use crate::pieces::{PieceType, Player};
use crate::state::GameState;

/// Info score that wins the game
pub const WIN_INFO_SCORE: u8 = 5;

/// Result of a victory check
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VictoryStatus {
    pub game_over: bool,
    pub winner: Option<Player>,
}

impl VictoryStatus {
    fn won_by(player: Player) -> Self {
        Self {
            game_over: true,
            winner: Some(player),
        }
    }
}

/// Evaluate the state with `current_player` taken as the side that just
/// acted: an info score of at least [`WIN_INFO_SCORE`] wins (mover checked
/// first), then capturing the enemy Chief wins.
pub fn check_victory(state: &GameState) -> VictoryStatus {
    let mover = state.current_player;

    for player in [mover, mover.opponent()] {
        if state.info_scores[player] >= WIN_INFO_SCORE {
            return VictoryStatus::won_by(player);
        }
    }

    let took_chief = state.captured_pieces[mover]
        .iter()
        .any(|p| p.piece_type == PieceType::Chief && p.player != mover);
    if took_chief {
        return VictoryStatus::won_by(mover);
    }

    VictoryStatus::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Piece;

    #[test]
    fn test_fresh_game_continues() {
        assert_eq!(check_victory(&GameState::new()), VictoryStatus::default());
    }

    #[test]
    fn test_info_score_wins() {
        let mut state = GameState::new();
        state.info_scores.blue = WIN_INFO_SCORE - 1;
        assert!(!check_victory(&state).game_over);

        state.info_scores.blue = WIN_INFO_SCORE;
        let status = check_victory(&state);
        assert!(status.game_over);
        assert_eq!(status.winner, Some(Player::Blue));
    }

    #[test]
    fn test_mover_score_checked_first() {
        let mut state = GameState::new();
        state.current_player = Player::Blue;
        state.info_scores = crate::pieces::PlayerMap::new(WIN_INFO_SCORE, WIN_INFO_SCORE);
        assert_eq!(check_victory(&state).winner, Some(Player::Blue));
    }

    #[test]
    fn test_chief_capture_wins_for_mover() {
        let mut state = GameState::new();
        state.current_player = Player::Red;
        state.captured_pieces.red.push(Piece::new(3, PieceType::Guard, Player::Blue));
        assert!(!check_victory(&state).game_over);

        state.captured_pieces.red.push(Piece::new(0, PieceType::Chief, Player::Blue));
        assert_eq!(check_victory(&state).winner, Some(Player::Red));

        // only the side that just moved is credited
        state.current_player = Player::Blue;
        assert!(!check_victory(&state).game_over);
    }
}
