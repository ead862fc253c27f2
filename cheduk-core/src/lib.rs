//! CheDuk Core - Rules engine
//!
//! This crate provides the complete rules for CheDuk on an 11x12 hex grid:
//! - Board geometry (odd-r offset coordinates, cube distance)
//! - Pieces, the fixed initial layout and placement zones
//! - Per-piece move generation
//! - Legal action enumeration, including special actions
//! - The pure state transition function and victory detection

pub mod board;
pub mod pieces;
pub mod setup;
pub mod state;
pub mod moves;
pub mod actions;
pub mod engine;
pub mod victory;

// Re-exports for convenient access
pub use board::{Direction, HexCoord, COLS, ROWS};
pub use pieces::{Piece, PieceId, PieceType, Player, PlayerMap};
pub use state::{compute_territory, Board, EmbassyRecapture, GamePhase, GameState};
pub use actions::{get_piece_moves, get_valid_actions, GameAction};
pub use engine::{perform_action, try_perform_action, ActionRejected};
pub use victory::{check_victory, VictoryStatus, WIN_INFO_SCORE};

/// Fresh game: fixed pieces seated, Red to place its ambassador
pub fn create_initial_game_state() -> GameState {
    GameState::new()
}
