//! Apply command - apply one action to a state
//!
//! ## Architecture
//!
//! - Level 1: run() - orchestration
//! - Level 2: parse_action(), apply()

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use cheduk_core::{try_perform_action, GameAction, GameState};

use crate::state_io::{emit, load_state};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct ApplyArgs {
    /// Game state JSON file
    #[arg(long, value_name = "FILE")]
    pub state: PathBuf,

    /// Action as inline JSON, or @FILE to read it from a file
    #[arg(long, value_name = "JSON|@FILE")]
    pub action: String,

    /// Write the new state here instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: ApplyArgs) -> Result<()> {
    let state = load_state(&args.state)?;
    let action = parse_action(&args.action)?;

    let next = apply(&state, &action)?;

    if next.game_over {
        tracing::info!("Game over: {:?} wins", next.winner);
    }
    emit(&next, args.output.as_deref())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Decode an inline or `@file` action argument
fn parse_action(raw: &str) -> Result<GameAction> {
    let json = match raw.strip_prefix('@') {
        Some(path) => fs::read_to_string(path).with_context(|| format!("Failed to read action: {}", path))?,
        None => raw.to_string(),
    };
    serde_json::from_str(&json).with_context(|| format!("Invalid action JSON: {}", json.trim()))
}

fn apply(state: &GameState, action: &GameAction) -> Result<GameState> {
    match try_perform_action(state, action) {
        Ok(next) => {
            tracing::info!(
                "Applied {} on turn {}, {:?} to move",
                action.kind(),
                state.turn,
                next.current_player
            );
            Ok(next)
        }
        Err(e) => {
            tracing::warn!("Rejected {}: {}", action.kind(), e);
            bail!("action rejected: {}", e)
        }
    }
}
