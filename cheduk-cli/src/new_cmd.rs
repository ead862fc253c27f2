//! New command - write the initial game state

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use cheduk_core::create_initial_game_state;

use crate::state_io::emit;

#[derive(Args)]
pub struct NewArgs {
    /// Write the state here instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn run(args: NewArgs) -> Result<()> {
    let state = create_initial_game_state();
    tracing::info!("New game: {:?} to move in {:?}", state.current_player, state.game_phase);
    emit(&state, args.output.as_deref())
}
