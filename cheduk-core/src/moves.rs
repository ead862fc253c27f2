//! Per-piece move generation
//!
//! Every archetype has a generator with the same shape: given a
//! [`MoveContext`] it returns candidate destinations. Generators may emit
//! tiles that are off the board or friendly-occupied; [`destinations`]
//! applies the common filter that removes both.

use crate::board::{Direction, HexCoord};
use crate::pieces::{spy_directions, Piece, PieceType, Player, PlayerMap};
use crate::state::{Board, GamePhase, GameState};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Ambassador jumps from its embassy when the embassy is on an even row
const EVEN_ROW_EMBASSY_JUMPS: [(i8, i8); 6] = [(0, -2), (1, -1), (-2, -1), (-2, 1), (1, 1), (0, 2)];

/// Ambassador jumps from its embassy when the embassy is on an odd row
const ODD_ROW_EMBASSY_JUMPS: [(i8, i8); 6] = [(0, -2), (2, -1), (-1, -1), (2, 1), (-1, 1), (0, 2)];

/// Guard step range
const GUARD_RANGE: usize = 2;

// ============================================================================
// CONTEXT
// ============================================================================

/// Everything a generator may look at
#[derive(Clone, Copy, Debug)]
pub struct MoveContext<'a> {
    pub board: &'a Board,
    pub origin: HexCoord,
    pub piece: Piece,
    pub embassies: &'a PlayerMap<Option<HexCoord>>,
    /// Full state when available; without it only basic geometry applies
    pub state: Option<&'a GameState>,
}

impl<'a> MoveContext<'a> {
    /// Context for the piece at `origin`, if there is one
    pub fn for_state(state: &'a GameState, origin: HexCoord) -> Option<Self> {
        let piece = *state.board.get(origin)?;
        Some(Self {
            board: &state.board,
            origin,
            piece,
            embassies: &state.embassy_locations,
            state: Some(state),
        })
    }

    /// Context without phase or territory information
    pub fn basic(
        board: &'a Board,
        origin: HexCoord,
        embassies: &'a PlayerMap<Option<HexCoord>>,
    ) -> Option<Self> {
        let piece = *board.get(origin)?;
        Some(Self {
            board,
            origin,
            piece,
            embassies,
            state: None,
        })
    }

    fn player(&self) -> Player {
        self.piece.player
    }

    fn occupant(&self, coord: HexCoord) -> Option<&'a Piece> {
        self.board.get(coord)
    }
}

/// Shared generator signature
pub type MoveGenerator = fn(&MoveContext<'_>) -> Vec<HexCoord>;

/// Generator for an archetype
pub fn generator_for(piece_type: PieceType) -> MoveGenerator {
    match piece_type {
        PieceType::Chief => chief_moves,
        PieceType::Guard => guard_moves,
        PieceType::Diplomat => diplomat_moves,
        PieceType::SpecialEnvoy => special_envoy_moves,
        PieceType::Ambassador => ambassador_moves,
        PieceType::Spy => spy_moves,
    }
}

/// Legal destinations for the piece in `ctx`, after the common filter
pub fn destinations(ctx: &MoveContext<'_>) -> Vec<HexCoord> {
    let mut moves = generator_for(ctx.piece.piece_type)(ctx);
    moves.retain(|&dest| {
        dest.is_valid()
            && ctx
                .occupant(dest)
                .map_or(true, |occupant| occupant.is_enemy_of(&ctx.piece))
    });
    moves
}

// ============================================================================
// GENERATORS
// ============================================================================

fn step_all(origin: HexCoord) -> Vec<HexCoord> {
    Direction::ALL.iter().map(|&dir| origin.step(dir)).collect()
}

/// One step in any direction; confined to home territory during the main
/// phase until its side has castled
pub fn chief_moves(ctx: &MoveContext<'_>) -> Vec<HexCoord> {
    let mut moves = step_all(ctx.origin);

    if let Some(state) = ctx.state {
        let restricted = state.game_phase == GamePhase::Main && !state.castling_used[ctx.player()];
        if restricted {
            moves.retain(|&dest| state.is_in_territory(ctx.player(), dest));
        }
    }

    moves
}

/// Up to two steps in a straight line, stopping at the first occupied tile
pub fn guard_moves(ctx: &MoveContext<'_>) -> Vec<HexCoord> {
    let mut moves = Vec::new();

    for dir in Direction::ALL {
        let mut current = ctx.origin;
        for _ in 0..GUARD_RANGE {
            current = current.step(dir);
            if !current.is_valid() {
                break;
            }
            if let Some(occupant) = ctx.occupant(current) {
                if occupant.is_enemy_of(&ctx.piece) {
                    moves.push(current);
                }
                break; // Blocked
            }
            moves.push(current);
        }
    }

    moves
}

/// Unlimited slide, capturing the first enemy in the way
pub fn diplomat_moves(ctx: &MoveContext<'_>) -> Vec<HexCoord> {
    let mut moves = Vec::new();

    for dir in Direction::ALL {
        let mut current = ctx.origin;
        loop {
            current = current.step(dir);
            if !current.is_valid() {
                break;
            }
            if let Some(occupant) = ctx.occupant(current) {
                if occupant.is_enemy_of(&ctx.piece) {
                    moves.push(current);
                }
                break; // Blocked
            }
            moves.push(current);
        }
    }

    moves
}

/// Cannon-style: needs a screen, then slides past it.
///
/// The screen is the first occupied tile in the direction; it must not be a
/// Special Envoy. A friendly piece standing on the enemy embassy cancels the
/// direction. Past the screen the envoy lands on empty tiles or captures the
/// first piece it meets, except Ambassadors and Special Envoys.
pub fn special_envoy_moves(ctx: &MoveContext<'_>) -> Vec<HexCoord> {
    let enemy_embassy = ctx.embassies[ctx.player().opponent()];
    let mut moves = Vec::new();

    for dir in Direction::ALL {
        let Some(screen) = find_screen(ctx, dir, enemy_embassy) else {
            continue;
        };

        let mut landing = screen;
        loop {
            landing = landing.step(dir);
            if !landing.is_valid() {
                break;
            }
            if let Some(occupant) = ctx.occupant(landing) {
                if occupant.is_enemy_of(&ctx.piece) && envoy_can_capture(occupant) {
                    moves.push(landing);
                }
                break;
            }
            moves.push(landing);
        }
    }

    moves
}

fn find_screen(ctx: &MoveContext<'_>, dir: Direction, enemy_embassy: Option<HexCoord>) -> Option<HexCoord> {
    let mut scout = ctx.origin;
    loop {
        scout = scout.step(dir);
        if !scout.is_valid() {
            return None;
        }
        let Some(occupant) = ctx.occupant(scout) else {
            continue;
        };
        if enemy_embassy == Some(scout) && occupant.is_friend_of(&ctx.piece) {
            return None;
        }
        if occupant.piece_type == PieceType::SpecialEnvoy {
            return None;
        }
        return Some(scout);
    }
}

fn envoy_can_capture(target: &Piece) -> bool {
    !matches!(target.piece_type, PieceType::Ambassador | PieceType::SpecialEnvoy)
}

/// Knight-like jumps while on its own embassy, one step anywhere otherwise
pub fn ambassador_moves(ctx: &MoveContext<'_>) -> Vec<HexCoord> {
    if ctx.embassies[ctx.player()] == Some(ctx.origin) {
        let jumps = if ctx.origin.is_odd_row() {
            &ODD_ROW_EMBASSY_JUMPS
        } else {
            &EVEN_ROW_EMBASSY_JUMPS
        };
        return jumps.iter().map(|&(dq, dr)| ctx.origin.offset(dq, dr)).collect();
    }

    step_all(ctx.origin)
}

/// One step along the four directions allowed to its side
pub fn spy_moves(ctx: &MoveContext<'_>) -> Vec<HexCoord> {
    spy_directions(ctx.player()).map(|dir| ctx.origin.step(dir)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: &mut Board, q: i8, r: i8, id: u8, piece_type: PieceType, player: Player) {
        board.set(HexCoord::new(q, r), Piece::new(id, piece_type, player));
    }

    fn moves_at(board: &Board, embassies: &PlayerMap<Option<HexCoord>>, q: i8, r: i8) -> Vec<HexCoord> {
        let ctx = MoveContext::basic(board, HexCoord::new(q, r), embassies).unwrap();
        let mut moves = destinations(&ctx);
        moves.sort();
        moves
    }

    fn sorted(coords: &[(i8, i8)]) -> Vec<HexCoord> {
        let mut v: Vec<_> = coords.iter().map(|&(q, r)| HexCoord::new(q, r)).collect();
        v.sort();
        v
    }

    #[test]
    fn test_chief_open_board() {
        let mut board = Board::empty();
        let embassies = PlayerMap::default();
        place(&mut board, 5, 5, 0, PieceType::Chief, Player::Blue);
        assert_eq!(
            moves_at(&board, &embassies, 5, 5),
            sorted(&[(6, 5), (4, 5), (5, 4), (6, 4), (5, 6), (6, 6)])
        );
    }

    #[test]
    fn test_guard_initial_layout() {
        let state = GameState::new();
        assert_eq!(
            moves_at(&state.board, &state.embassy_locations, 0, 2),
            sorted(&[(1, 2), (2, 2), (0, 3), (1, 4)])
        );
    }

    #[test]
    fn test_guard_does_not_jump() {
        let mut state = GameState::new();
        place(&mut state.board, 1, 2, 30, PieceType::Spy, Player::Red);
        place(&mut state.board, 0, 3, 31, PieceType::Spy, Player::Blue);
        assert_eq!(moves_at(&state.board, &state.embassy_locations, 0, 2), sorted(&[(1, 2)]));
    }

    #[test]
    fn test_diplomat_slide_stops_at_blockers() {
        let mut board = Board::empty();
        let embassies = PlayerMap::default();
        place(&mut board, 5, 5, 0, PieceType::Diplomat, Player::Blue);
        place(&mut board, 7, 5, 1, PieceType::Spy, Player::Blue);
        place(&mut board, 3, 5, 2, PieceType::Spy, Player::Red);

        let moves = moves_at(&board, &embassies, 5, 5);
        assert!(moves.contains(&HexCoord::new(6, 5)));
        assert!(!moves.contains(&HexCoord::new(7, 5)));
        assert!(moves.contains(&HexCoord::new(4, 5)));
        assert!(moves.contains(&HexCoord::new(3, 5)));
        assert!(!moves.contains(&HexCoord::new(2, 5)));
        // open diagonals run to the edge
        assert!(moves.contains(&HexCoord::new(7, 2)));
        assert!(moves.contains(&HexCoord::new(4, 2)));
        assert!(moves.contains(&HexCoord::new(7, 8)));
        assert!(moves.contains(&HexCoord::new(4, 8)));
    }

    #[test]
    fn test_envoy_jumps_screen() {
        let mut board = Board::empty();
        let embassies = PlayerMap::default();
        place(&mut board, 5, 5, 0, PieceType::SpecialEnvoy, Player::Blue);
        place(&mut board, 6, 5, 1, PieceType::Spy, Player::Red);

        let moves = moves_at(&board, &embassies, 5, 5);
        assert!(!moves.contains(&HexCoord::new(6, 5)));
        assert!(moves.contains(&HexCoord::new(7, 5)));
        assert!(moves.contains(&HexCoord::new(10, 5)));
        // no screen in any other direction
        assert!(moves.iter().all(|c| c.r == 5));
    }

    #[test]
    fn test_envoy_cannot_use_envoy_screen() {
        let mut board = Board::empty();
        let embassies = PlayerMap::default();
        place(&mut board, 5, 5, 0, PieceType::SpecialEnvoy, Player::Blue);
        place(&mut board, 6, 5, 1, PieceType::SpecialEnvoy, Player::Red);
        assert!(moves_at(&board, &embassies, 5, 5).is_empty());
    }

    #[test]
    fn test_envoy_never_captures_ambassador() {
        let mut board = Board::empty();
        let embassies = PlayerMap::default();
        place(&mut board, 5, 5, 0, PieceType::SpecialEnvoy, Player::Blue);
        place(&mut board, 6, 5, 1, PieceType::Spy, Player::Blue);
        place(&mut board, 7, 5, 2, PieceType::Guard, Player::Red);
        place(&mut board, 8, 5, 3, PieceType::Ambassador, Player::Red);

        let moves = moves_at(&board, &embassies, 5, 5);
        assert_eq!(moves, sorted(&[(7, 5)]));

        board.remove(HexCoord::new(7, 5));
        assert!(moves_at(&board, &embassies, 5, 5).contains(&HexCoord::new(7, 5)));
        assert!(!moves_at(&board, &embassies, 5, 5).contains(&HexCoord::new(8, 5)));
    }

    #[test]
    fn test_envoy_blocked_by_friend_on_enemy_embassy() {
        let mut board = Board::empty();
        let embassies = PlayerMap::new(Some(HexCoord::new(3, 5)), Some(HexCoord::new(8, 2)));
        place(&mut board, 1, 5, 0, PieceType::SpecialEnvoy, Player::Blue);
        place(&mut board, 3, 5, 1, PieceType::Guard, Player::Blue);
        place(&mut board, 5, 5, 2, PieceType::Spy, Player::Red);
        assert!(!moves_at(&board, &embassies, 1, 5).contains(&HexCoord::new(5, 5)));

        // an enemy piece on that embassy is an ordinary screen
        place(&mut board, 3, 5, 1, PieceType::Guard, Player::Red);
        assert!(moves_at(&board, &embassies, 1, 5).contains(&HexCoord::new(4, 5)));
    }

    #[test]
    fn test_ambassador_jumps_from_embassy() {
        let mut board = Board::empty();
        let embassy = HexCoord::new(1, 2);
        let embassies = PlayerMap::new(Some(HexCoord::new(9, 8)), Some(embassy));
        place(&mut board, 1, 2, 0, PieceType::Ambassador, Player::Blue);
        place(&mut board, 2, 1, 1, PieceType::Spy, Player::Blue);

        let moves = moves_at(&board, &embassies, 1, 2);
        // (2,1) is friendly, (-1,1) and (-1,3) are off the board
        assert_eq!(moves, sorted(&[(1, 0), (2, 3), (1, 4)]));
    }

    #[test]
    fn test_ambassador_jumps_from_odd_row_embassy() {
        let mut board = Board::empty();
        let embassies = PlayerMap::new(Some(HexCoord::new(10, 5)), Some(HexCoord::new(2, 5)));
        place(&mut board, 2, 5, 0, PieceType::Ambassador, Player::Blue);
        assert_eq!(
            moves_at(&board, &embassies, 2, 5),
            sorted(&[(2, 3), (4, 4), (1, 4), (4, 6), (1, 6), (2, 7)])
        );

        // friendly landing is dropped
        place(&mut board, 4, 4, 1, PieceType::Spy, Player::Blue);
        assert_eq!(
            moves_at(&board, &embassies, 2, 5),
            sorted(&[(2, 3), (1, 4), (4, 6), (1, 6), (2, 7)])
        );

        // on the east edge the +2 column jumps fall off the board
        place(&mut board, 10, 5, 2, PieceType::Ambassador, Player::Red);
        assert_eq!(
            moves_at(&board, &embassies, 10, 5),
            sorted(&[(10, 3), (9, 4), (9, 6), (10, 7)])
        );
    }

    #[test]
    fn test_ambassador_steps_away_from_embassy() {
        let mut board = Board::empty();
        let embassies = PlayerMap::new(None, Some(HexCoord::new(1, 2)));
        place(&mut board, 5, 5, 0, PieceType::Ambassador, Player::Blue);
        assert_eq!(moves_at(&board, &embassies, 5, 5).len(), 6);
    }

    #[test]
    fn test_spy_directions_by_side() {
        let mut board = Board::empty();
        let embassies = PlayerMap::default();
        place(&mut board, 4, 4, 0, PieceType::Spy, Player::Red);
        place(&mut board, 4, 6, 1, PieceType::Spy, Player::Blue);
        place(&mut board, 5, 6, 2, PieceType::Guard, Player::Blue);

        // red, even row: NE NW W SW
        assert_eq!(moves_at(&board, &embassies, 4, 4), sorted(&[(4, 3), (3, 3), (3, 4), (3, 5)]));
        // blue, even row: E is friendly, leaving NE SW SE
        assert_eq!(moves_at(&board, &embassies, 4, 6), sorted(&[(4, 5), (3, 7), (4, 7)]));
    }

    #[test]
    fn test_missing_piece_yields_no_context() {
        let board = Board::empty();
        let embassies = PlayerMap::default();
        assert!(MoveContext::basic(&board, HexCoord::new(3, 3), &embassies).is_none());
        assert!(MoveContext::basic(&board, HexCoord::new(30, 3), &embassies).is_none());
    }
}
