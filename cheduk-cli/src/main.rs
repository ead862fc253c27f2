//! CheDuk CLI - Command-line driver for the rules engine
//!
//! Commands:
//! - new: Write a fresh game state
//! - actions: List legal actions for a query point
//! - apply: Apply one action to a state
//! - status: Summarize phase, turn, scores and result
//!
//! States and actions travel as JSON on stdout; logs go to stderr.

mod actions_cmd;
mod apply_cmd;
mod new_cmd;
mod state_io;
mod status_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cheduk")]
#[command(about = "CheDuk rules engine driver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the initial game state
    New(new_cmd::NewArgs),
    /// List legal actions for a tile, or global actions with no tile
    Actions(actions_cmd::ActionsArgs),
    /// Apply one action and write the resulting state
    Apply(apply_cmd::ApplyArgs),
    /// Print a short status summary
    Status(status_cmd::StatusArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging (stderr, so stdout stays JSON)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::New(args) => new_cmd::run(args),
        Commands::Actions(args) => actions_cmd::run(args),
        Commands::Apply(args) => apply_cmd::run(args),
        Commands::Status(args) => status_cmd::run(args),
    }
}
