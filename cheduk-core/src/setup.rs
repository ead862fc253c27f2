//! Fixed setup tables: initial layout, placement zones, reference points
//!
//! Blue starts in the upper-left corner and Red in the lower-right. Every Red
//! table is the point reflection (q, r) -> (10 - q, 11 - r) of the Blue one.

use crate::board::HexCoord;
use crate::pieces::{Piece, PieceType, Player};

const fn hex(q: i8, r: i8) -> HexCoord {
    HexCoord::new(q, r)
}

// ============================================================================
// INITIAL LAYOUT
// ============================================================================

/// Pieces seated on the board before setup begins
pub const FIXED_PIECES: [(HexCoord, Piece); 10] = [
    (hex(0, 0), Piece::new(0, PieceType::Chief, Player::Blue)),
    (hex(0, 1), Piece::new(1, PieceType::SpecialEnvoy, Player::Blue)),
    (hex(1, 0), Piece::new(2, PieceType::SpecialEnvoy, Player::Blue)),
    (hex(0, 2), Piece::new(3, PieceType::Guard, Player::Blue)),
    (hex(0, 4), Piece::new(4, PieceType::Diplomat, Player::Blue)),
    (hex(10, 11), Piece::new(5, PieceType::Chief, Player::Red)),
    (hex(9, 11), Piece::new(6, PieceType::SpecialEnvoy, Player::Red)),
    (hex(10, 10), Piece::new(7, PieceType::SpecialEnvoy, Player::Red)),
    (hex(10, 9), Piece::new(8, PieceType::Guard, Player::Red)),
    (hex(10, 7), Piece::new(9, PieceType::Diplomat, Player::Red)),
];

/// Number of spies each side places
pub const SPIES_PER_SIDE: u8 = 5;

/// Reserve pieces (ambassador first, then spies) for one side
pub fn reserve_pieces(player: Player) -> Vec<Piece> {
    let base = match player {
        Player::Blue => 10,
        Player::Red => 16,
    };
    std::iter::once(Piece::new(base, PieceType::Ambassador, player))
        .chain((1..=SPIES_PER_SIDE).map(|i| Piece::new(base + i, PieceType::Spy, player)))
        .collect()
}

// ============================================================================
// PLACEMENT ZONES
// ============================================================================

const BLUE_AMBASSADOR_ZONE: [HexCoord; 18] = [
    hex(3, 2), hex(4, 2), hex(5, 2),
    hex(2, 3), hex(3, 3), hex(4, 3),
    hex(2, 4), hex(3, 4), hex(4, 4),
    hex(1, 5), hex(2, 5), hex(3, 5),
    hex(1, 6), hex(2, 6), hex(3, 6),
    hex(1, 7), hex(2, 7),
    hex(2, 8),
];

const RED_AMBASSADOR_ZONE: [HexCoord; 18] = [
    hex(8, 3),
    hex(8, 4), hex(9, 4),
    hex(7, 5), hex(8, 5), hex(9, 5),
    hex(7, 6), hex(8, 6), hex(9, 6),
    hex(6, 7), hex(7, 7), hex(8, 7),
    hex(6, 8), hex(7, 8), hex(8, 8),
    hex(5, 9), hex(6, 9), hex(7, 9),
];

const BLUE_SPY_ZONE: [HexCoord; 32] = [
    hex(4, 0), hex(5, 0), hex(6, 0),
    hex(3, 1), hex(4, 1), hex(5, 1),
    hex(3, 2), hex(4, 2), hex(5, 2),
    hex(2, 3), hex(3, 3), hex(4, 3),
    hex(2, 4), hex(3, 4), hex(4, 4),
    hex(1, 5), hex(2, 5), hex(3, 5),
    hex(1, 6), hex(2, 6), hex(3, 6),
    hex(0, 7), hex(1, 7), hex(2, 7),
    hex(0, 8), hex(1, 8), hex(2, 8),
    hex(0, 9), hex(1, 9),
    hex(0, 10), hex(1, 10),
    hex(0, 11),
];

const RED_SPY_ZONE: [HexCoord; 32] = [
    hex(10, 0),
    hex(9, 1), hex(10, 1),
    hex(9, 2), hex(10, 2),
    hex(8, 3), hex(9, 3), hex(10, 3),
    hex(8, 4), hex(9, 4), hex(10, 4),
    hex(7, 5), hex(8, 5), hex(9, 5),
    hex(7, 6), hex(8, 6), hex(9, 6),
    hex(6, 7), hex(7, 7), hex(8, 7),
    hex(6, 8), hex(7, 8), hex(8, 8),
    hex(5, 9), hex(6, 9), hex(7, 9),
    hex(5, 10), hex(6, 10), hex(7, 10),
    hex(4, 11), hex(5, 11), hex(6, 11),
];

/// Tiles where this side may establish its embassy
pub fn ambassador_zone(player: Player) -> &'static [HexCoord] {
    match player {
        Player::Red => &RED_AMBASSADOR_ZONE,
        Player::Blue => &BLUE_AMBASSADOR_ZONE,
    }
}

/// Tiles where this side may seat spies (further limited to its territory)
pub fn spy_zone(player: Player) -> &'static [HexCoord] {
    match player {
        Player::Red => &RED_SPY_ZONE,
        Player::Blue => &BLUE_SPY_ZONE,
    }
}

// ============================================================================
// REFERENCE POINTS
// ============================================================================

/// Point each side measures its embassy and spies against when deciding
/// turn order
pub fn reference_point(player: Player) -> HexCoord {
    match player {
        Player::Red => hex(5, 5),
        Player::Blue => hex(5, 6),
    }
}
