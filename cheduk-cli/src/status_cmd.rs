//! Status command - summarize a game state

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use cheduk_core::{GamePhase, GameState, Player, PlayerMap};

use crate::state_io::{emit, load_state};

#[derive(Args)]
pub struct StatusArgs {
    /// Game state JSON file
    #[arg(long, value_name = "FILE")]
    pub state: PathBuf,
}

/// What `status` prints
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Status {
    phase: GamePhase,
    current_player: Player,
    turn: u32,
    info_scores: PlayerMap<u8>,
    game_over: bool,
    winner: Option<Player>,
}

impl From<&GameState> for Status {
    fn from(state: &GameState) -> Self {
        Self {
            phase: state.game_phase,
            current_player: state.current_player,
            turn: state.turn,
            info_scores: state.info_scores,
            game_over: state.game_over,
            winner: state.winner,
        }
    }
}

pub fn run(args: StatusArgs) -> Result<()> {
    let state = load_state(&args.state)?;
    emit(&Status::from(&state), None)
}
