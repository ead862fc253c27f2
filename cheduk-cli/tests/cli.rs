//! End-to-end runs of the `cheduk` binary.

use std::path::PathBuf;
use std::process::{Command, Output};

use cheduk_core::{GameAction, GamePhase, GameState, Player};

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cheduk-cli-{}-{}.json", std::process::id(), name))
}

fn cheduk(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cheduk"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to launch cheduk")
}

#[test]
fn test_new_actions_apply_status() {
    let start = scratch("start");
    let next = scratch("next");
    let start_arg = start.to_str().unwrap();
    let next_arg = next.to_str().unwrap();

    let out = cheduk(&["new", "--output", start_arg]);
    assert!(out.status.success());

    let out = cheduk(&["actions", "--state", start_arg]);
    assert!(out.status.success());
    let actions: Vec<GameAction> = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(actions.len(), 18);

    let action = serde_json::to_string(&actions[0]).unwrap();
    let out = cheduk(&["apply", "--state", start_arg, "--action", &action, "--output", next_arg]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let state = GameState::from_json(&std::fs::read_to_string(&next).unwrap()).unwrap();
    assert_eq!(state.game_phase, GamePhase::PlacementAmbassadorBlue);
    assert_eq!(state.current_player, Player::Blue);

    let out = cheduk(&["status", "--state", next_arg]);
    assert!(out.status.success());
    let status: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(status["turn"], 2);
    assert_eq!(status["currentPlayer"], "Blue");

    // replaying red's placement on blue's turn fails
    let out = cheduk(&["apply", "--state", next_arg, "--action", &action]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("rejected"));

    std::fs::remove_file(start).unwrap();
    std::fs::remove_file(next).unwrap();
}

#[test]
fn test_actions_at_tile_after_setup_query() {
    let start = scratch("query");
    let start_arg = start.to_str().unwrap();
    assert!(cheduk(&["new", "--output", start_arg]).status.success());

    // during setup the query point is ignored
    let out = cheduk(&["actions", "--state", start_arg, "--at", "0,2"]);
    assert!(out.status.success());
    let actions: Vec<GameAction> = serde_json::from_slice(&out.stdout).unwrap();
    assert!(actions
        .iter()
        .all(|a| matches!(a, GameAction::PlaceAmbassador { player: Player::Red, .. })));

    let out = cheduk(&["status", "--state", "/nonexistent/state.json"]);
    assert!(!out.status.success());

    std::fs::remove_file(start).unwrap();
}
