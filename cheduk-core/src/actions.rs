//! Game actions and legal-action enumeration

use serde::{Deserialize, Serialize};

use crate::board::{Direction, HexCoord};
use crate::moves::{destinations, MoveContext};
use crate::pieces::{Piece, PieceId, PieceType, Player, PlayerMap};
use crate::setup::{ambassador_zone, spy_zone};
use crate::state::{Board, EmbassyRecapture, GamePhase, GameState};

/// Everything a player can ask the engine to do
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameAction {
    Move {
        from: HexCoord,
        to: HexCoord,
    },
    Castle {
        player: Player,
        chief: HexCoord,
        diplomat: HexCoord,
    },
    GatherInfo {
        at: HexCoord,
        #[serde(rename = "pieceId")]
        piece_id: PieceId,
    },
    Return {
        to: HexCoord,
        #[serde(rename = "pieceId")]
        piece_id: PieceId,
    },
    Resurrect {
        to: HexCoord,
        #[serde(rename = "pieceId")]
        piece_id: PieceId,
    },
    PlaceAmbassador {
        player: Player,
        to: HexCoord,
        #[serde(rename = "pieceId")]
        piece_id: PieceId,
    },
    PlaceSpy {
        player: Player,
        to: HexCoord,
        #[serde(rename = "pieceId")]
        piece_id: PieceId,
    },
}

impl GameAction {
    /// Query point under which the assembler lists this action
    pub fn origin(&self) -> Option<HexCoord> {
        match *self {
            GameAction::Move { from, .. } => Some(from),
            GameAction::Castle { chief, .. } => Some(chief),
            GameAction::GatherInfo { at, .. } => Some(at),
            GameAction::Return { .. }
            | GameAction::Resurrect { .. }
            | GameAction::PlaceAmbassador { .. }
            | GameAction::PlaceSpy { .. } => None,
        }
    }

    /// Wire tag
    pub fn kind(&self) -> &'static str {
        match self {
            GameAction::Move { .. } => "move",
            GameAction::Castle { .. } => "castle",
            GameAction::GatherInfo { .. } => "gatherInfo",
            GameAction::Return { .. } => "return",
            GameAction::Resurrect { .. } => "resurrect",
            GameAction::PlaceAmbassador { .. } => "placeAmbassador",
            GameAction::PlaceSpy { .. } => "placeSpy",
        }
    }
}

// ============================================================================
// ASSEMBLER
// ============================================================================

/// All legal actions for a query point.
///
/// `origin` is the selected tile, or `None` for "nothing selected". During
/// setup the query point is ignored and placements are listed. In the main
/// phase, no selection lists resurrections and spy returns; a selection
/// lists the actions of the current player's piece standing there.
pub fn get_valid_actions(state: &GameState, origin: Option<HexCoord>) -> Vec<GameAction> {
    if state.game_over {
        return Vec::new();
    }

    match state.game_phase {
        GamePhase::PlacementAmbassadorRed | GamePhase::PlacementAmbassadorBlue => {
            ambassador_placements(state)
        }
        GamePhase::PlacementSpyRed | GamePhase::PlacementSpyBlue => spy_placements(state),
        GamePhase::Main => match origin {
            None => global_actions(state),
            Some(origin) => piece_actions(state, origin),
        },
    }
}

/// Plain move actions for the piece at `origin`, without phase, territory or
/// special-action knowledge. Cheap pre-validation for callers that only hold
/// a board.
pub fn get_piece_moves(
    board: &Board,
    origin: HexCoord,
    embassies: &PlayerMap<Option<HexCoord>>,
) -> Vec<GameAction> {
    match MoveContext::basic(board, origin, embassies) {
        Some(ctx) => move_actions(&ctx),
        None => Vec::new(),
    }
}

fn move_actions(ctx: &MoveContext<'_>) -> Vec<GameAction> {
    destinations(ctx)
        .into_iter()
        .map(|to| GameAction::Move { from: ctx.origin, to })
        .collect()
}

// ============================================================================
// PLACEMENT
// ============================================================================

fn ambassador_placements(state: &GameState) -> Vec<GameAction> {
    let player = state.current_player;
    let Some(ambassador) = state.unplaced_pieces[player]
        .iter()
        .find(|p| p.piece_type == PieceType::Ambassador)
    else {
        return Vec::new();
    };

    ambassador_zone(player)
        .iter()
        .copied()
        .filter(|&to| state.board.is_empty_at(to))
        .map(|to| GameAction::PlaceAmbassador {
            player,
            to,
            piece_id: ambassador.id,
        })
        .collect()
}

fn spy_placements(state: &GameState) -> Vec<GameAction> {
    let player = state.current_player;
    let Some(spy) = state.next_unplaced_spy(player) else {
        return Vec::new();
    };

    spy_zone(player)
        .iter()
        .copied()
        .filter(|&to| state.board.is_empty_at(to) && state.is_in_territory(player, to))
        .map(|to| GameAction::PlaceSpy {
            player,
            to,
            piece_id: spy.id,
        })
        .collect()
}

// ============================================================================
// MAIN PHASE: NOTHING SELECTED
// ============================================================================

fn global_actions(state: &GameState) -> Vec<GameAction> {
    let player = state.current_player;
    let mut actions = Vec::new();

    for piece in &state.captured_pieces[player.opponent()] {
        if piece.player != player {
            continue;
        }
        match piece.piece_type {
            PieceType::Spy => {
                actions.extend(
                    state
                        .empty_territory_tiles(player)
                        .map(|to| GameAction::Resurrect { to, piece_id: piece.id }),
                );
            }
            PieceType::Ambassador => {
                if let Some(embassy) = ambassador_resurrection_target(state, player) {
                    actions.push(GameAction::Resurrect {
                        to: embassy,
                        piece_id: piece.id,
                    });
                }
            }
            PieceType::Chief | PieceType::Diplomat | PieceType::SpecialEnvoy | PieceType::Guard => {}
        }
    }

    for spy in &state.returning_spies[player] {
        actions.extend(
            state
                .empty_territory_tiles(player)
                .map(|to| GameAction::Return { to, piece_id: spy.id }),
        );
    }

    actions
}

/// The player's embassy, if a captured ambassador may be revived there now
fn ambassador_resurrection_target(state: &GameState, player: Player) -> Option<HexCoord> {
    let embassy = state.embassy_locations[player]?;
    if !state.board.is_empty_at(embassy) {
        return None;
    }
    let cooled_down = match state.embassy_recapture[player] {
        EmbassyRecapture::Never => true,
        EmbassyRecapture::AwaitingReclaim => false,
        EmbassyRecapture::Reclaimed(turn) => state.turn > turn,
    };
    cooled_down.then_some(embassy)
}

// ============================================================================
// MAIN PHASE: PIECE SELECTED
// ============================================================================

fn piece_actions(state: &GameState, origin: HexCoord) -> Vec<GameAction> {
    let Some(ctx) = MoveContext::for_state(state, origin) else {
        return Vec::new();
    };
    if ctx.piece.player != state.current_player {
        return Vec::new();
    }

    let mut actions = move_actions(&ctx);

    match ctx.piece.piece_type {
        PieceType::Chief | PieceType::Diplomat => {
            actions.extend(castle_action(state, origin, &ctx.piece));
        }
        PieceType::Spy => {
            actions.extend(gather_info_action(state, origin, &ctx.piece));
        }
        PieceType::SpecialEnvoy | PieceType::Ambassador | PieceType::Guard => {}
    }

    actions
}

/// Castle with the partner piece if it is the first piece along a line
fn castle_action(state: &GameState, origin: HexCoord, piece: &Piece) -> Option<GameAction> {
    let player = piece.player;
    if state.castling_used[player] {
        return None;
    }
    let partner_type = match piece.piece_type {
        PieceType::Chief => PieceType::Diplomat,
        PieceType::Diplomat => PieceType::Chief,
        _ => return None,
    };

    let partner = Direction::ALL
        .iter()
        .filter_map(|&dir| first_piece_along(&state.board, origin, dir))
        .find(|(_, p)| p.player == player && p.piece_type == partner_type)
        .map(|(coord, _)| coord)?;

    let (chief, diplomat) = if piece.piece_type == PieceType::Chief {
        (origin, partner)
    } else {
        (partner, origin)
    };
    Some(GameAction::Castle {
        player,
        chief,
        diplomat,
    })
}

fn first_piece_along(board: &Board, origin: HexCoord, dir: Direction) -> Option<(HexCoord, Piece)> {
    let mut current = origin;
    loop {
        current = current.step(dir);
        if !current.is_valid() {
            return None;
        }
        if let Some(piece) = board.get(current) {
            return Some((current, *piece));
        }
    }
}

/// Espionage from an ungathered enemy-territory tile with no enemy guard adjacent
fn gather_info_action(state: &GameState, at: HexCoord, spy: &Piece) -> Option<GameAction> {
    let enemy = spy.player.opponent();
    if !state.is_in_territory(enemy, at) || state.info_gathered_tiles.contains(&at) {
        return None;
    }
    let guarded = at.neighbors().any(|n| {
        state
            .board
            .get(n)
            .is_some_and(|p| p.player == enemy && p.piece_type == PieceType::Guard)
    });
    if guarded {
        return None;
    }
    Some(GameAction::GatherInfo { at, piece_id: spy.id })
}
