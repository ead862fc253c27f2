//! Reading and writing JSON documents for the commands

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use cheduk_core::GameState;

/// Load a game state from a JSON file
pub fn load_state(path: &Path) -> Result<GameState> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read state: {}", path.display()))?;
    GameState::from_json(&json).with_context(|| format!("Invalid game state in {}", path.display()))
}

/// Pretty JSON to a file, or to stdout when no file is given
pub fn emit<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    match output {
        Some(path) => {
            fs::write(path, json + "\n").with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
