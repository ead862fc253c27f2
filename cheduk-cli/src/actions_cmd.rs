//! Actions command - list legal actions for a query point

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use cheduk_core::{get_valid_actions, HexCoord};

use crate::state_io::{emit, load_state};

#[derive(Args)]
pub struct ActionsArgs {
    /// Game state JSON file
    #[arg(long, value_name = "FILE")]
    pub state: PathBuf,

    /// Selected tile as "col,row"; omit for global actions
    #[arg(long, value_name = "Q,R", allow_hyphen_values = true)]
    pub at: Option<HexCoord>,
}

pub fn run(args: ActionsArgs) -> Result<()> {
    let state = load_state(&args.state)?;
    let actions = get_valid_actions(&state, args.at);

    match args.at {
        Some(at) => tracing::info!("{} legal actions at {}", actions.len(), at),
        None => tracing::info!("{} legal global actions", actions.len()),
    }

    emit(&actions, None)
}
