//! Board storage and the game state aggregate

use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashMap;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::board::{Direction, HexCoord, COLS, ROWS, TILE_COUNT};
use crate::pieces::{Piece, PieceType, Player, PlayerMap};
use crate::setup::{reserve_pieces, FIXED_PIECES};

// ============================================================================
// BOARD
// ============================================================================

/// Fixed-size tile arena indexed by packed (column, row)
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    tiles: [Option<Piece>; TILE_COUNT],
}

/// A tile as it appears on the wire
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub q: i8,
    pub r: i8,
    pub piece: Option<Piece>,
}

impl Board {
    /// All tiles empty
    pub fn empty() -> Self {
        Self {
            tiles: [None; TILE_COUNT],
        }
    }

    /// Piece at a coordinate; off-board coordinates hold nothing
    pub fn get(&self, coord: HexCoord) -> Option<&Piece> {
        coord.index().and_then(|i| self.tiles[i].as_ref())
    }

    pub fn is_empty_at(&self, coord: HexCoord) -> bool {
        coord.is_valid() && self.get(coord).is_none()
    }

    /// Seat a piece, returning whatever was there. Off-board is a no-op.
    pub fn set(&mut self, coord: HexCoord, piece: Piece) -> Option<Piece> {
        coord.index().and_then(|i| self.tiles[i].replace(piece))
    }

    pub fn remove(&mut self, coord: HexCoord) -> Option<Piece> {
        coord.index().and_then(|i| self.tiles[i].take())
    }

    /// Iterate occupied tiles
    pub fn pieces(&self) -> impl Iterator<Item = (HexCoord, Piece)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter_map(|(i, tile)| tile.map(|piece| (HexCoord::from_index(i), piece)))
    }

    /// Iterate every tile, empty or not
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.iter().enumerate().map(|(i, piece)| {
            let coord = HexCoord::from_index(i);
            Tile {
                q: coord.q,
                r: coord.r,
                piece: *piece,
            }
        })
    }

    pub fn piece_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.pieces().map(|(c, p)| (c.to_string(), p)))
            .finish()
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TILE_COUNT))?;
        for tile in self.tiles() {
            map.serialize_entry(&format!("{},{}", tile.q, tile.r), &tile)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: FxHashMap<String, Tile> = FxHashMap::deserialize(deserializer)?;
        let mut board = Board::empty();
        for (key, tile) in raw {
            let coord: HexCoord = key.parse().map_err(de::Error::custom)?;
            if !coord.is_valid() {
                return Err(de::Error::custom(format!("tile {key} is off the board")));
            }
            if coord != HexCoord::new(tile.q, tile.r) {
                return Err(de::Error::custom(format!(
                    "tile keyed {key} claims to be {},{}",
                    tile.q, tile.r
                )));
            }
            if let Some(piece) = tile.piece {
                board.set(coord, piece);
            }
        }
        Ok(board)
    }
}

// ============================================================================
// PHASES AND BOOKKEEPING TYPES
// ============================================================================

/// Game phase, in strict order of progression
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GamePhase {
    PlacementAmbassadorRed,
    PlacementAmbassadorBlue,
    PlacementSpyRed,
    PlacementSpyBlue,
    Main,
}

impl GamePhase {
    pub fn is_placement(self) -> bool {
        self != GamePhase::Main
    }

    /// Spy placement phase for the given side
    pub fn spy_placement(player: Player) -> Self {
        match player {
            Player::Red => GamePhase::PlacementSpyRed,
            Player::Blue => GamePhase::PlacementSpyBlue,
        }
    }
}

/// Recapture watermark for one embassy, gating ambassador resurrection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmbassyRecapture {
    /// Never held by the enemy
    #[default]
    Never,
    /// Enemy occupied it and no friendly piece has stood there since
    AwaitingReclaim,
    /// A friendly piece re-occupied it; the value is the turn counter after
    /// the reclaiming action
    Reclaimed(u32),
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Complete game state (clone to mutate)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub board: Board,
    pub game_phase: GamePhase,
    pub current_player: Player,
    /// Incremented once per accepted action
    pub turn: u32,
    pub info_scores: PlayerMap<u8>,
    /// Pieces captured *by* each player
    pub captured_pieces: PlayerMap<Vec<Piece>>,
    /// Pieces each player has yet to seat during setup
    pub unplaced_pieces: PlayerMap<Vec<Piece>>,
    /// Spies off the board after gathering info, waiting to return
    pub returning_spies: PlayerMap<Vec<Piece>>,
    pub embassy_locations: PlayerMap<Option<HexCoord>>,
    /// Set once an enemy piece first stands on the embassy
    pub embassy_first_capture: PlayerMap<bool>,
    /// Owner of whatever piece currently stands on each embassy
    pub embassy_occupation: PlayerMap<Option<Player>>,
    pub embassy_recapture: PlayerMap<EmbassyRecapture>,
    pub territories: PlayerMap<Vec<HexCoord>>,
    pub info_gathered_tiles: Vec<HexCoord>,
    pub castling_used: PlayerMap<bool>,
    /// Who moves first in the main phase, once decided
    pub main_game_first_player: Option<Player>,
    pub game_over: bool,
    pub winner: Option<Player>,
}

impl GameState {
    /// Fresh game at the start of ambassador placement
    pub fn new() -> Self {
        let mut board = Board::empty();
        for (coord, piece) in FIXED_PIECES {
            board.set(coord, piece);
        }

        Self {
            board,
            game_phase: GamePhase::PlacementAmbassadorRed,
            current_player: Player::Red,
            turn: 1,
            info_scores: PlayerMap::default(),
            captured_pieces: PlayerMap::default(),
            unplaced_pieces: PlayerMap::new(reserve_pieces(Player::Red), reserve_pieces(Player::Blue)),
            returning_spies: PlayerMap::default(),
            embassy_locations: PlayerMap::default(),
            embassy_first_capture: PlayerMap::default(),
            embassy_occupation: PlayerMap::default(),
            embassy_recapture: PlayerMap::default(),
            territories: PlayerMap::default(),
            info_gathered_tiles: Vec::new(),
            castling_used: PlayerMap::default(),
            main_game_first_player: None,
            game_over: false,
            winner: None,
        }
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn is_in_territory(&self, player: Player, coord: HexCoord) -> bool {
        self.territories[player].contains(&coord)
    }

    /// Empty tiles of the player's territory
    pub fn empty_territory_tiles(&self, player: Player) -> impl Iterator<Item = HexCoord> + '_ {
        self.territories[player]
            .iter()
            .copied()
            .filter(move |&c| self.board.is_empty_at(c))
    }

    pub fn is_enemy_embassy(&self, player: Player, coord: HexCoord) -> bool {
        self.embassy_locations[player.opponent()] == Some(coord)
    }

    /// Total pieces across all four collections
    pub fn total_pieces(&self) -> usize {
        let off_board: usize = Player::BOTH
            .iter()
            .map(|&p| {
                self.captured_pieces[p].len()
                    + self.unplaced_pieces[p].len()
                    + self.returning_spies[p].len()
            })
            .sum();
        self.board.piece_count() + off_board
    }

    /// Next spy this side must seat during spy placement
    pub fn next_unplaced_spy(&self, player: Player) -> Option<Piece> {
        self.unplaced_pieces[player]
            .iter()
            .copied()
            .find(|p| p.piece_type == PieceType::Spy)
    }

    // ========================================================================
    // DERIVED FIELDS
    // ========================================================================

    /// Recompute one side's territory from its embassy
    pub(crate) fn recompute_territory(&mut self, player: Player) {
        self.territories[player] = match self.embassy_locations[player] {
            Some(embassy) => compute_territory(player, embassy),
            None => Vec::new(),
        };
    }

    /// Refresh live embassy occupancy and the recapture watermarks.
    /// `self.turn` must already hold the post-action turn counter.
    pub(crate) fn refresh_embassy_occupancy(&mut self) {
        for owner in Player::BOTH {
            let Some(embassy) = self.embassy_locations[owner] else {
                continue;
            };
            let occupant = self.board.get(embassy).map(|p| p.player);
            self.embassy_occupation[owner] = occupant;

            match occupant {
                Some(p) if p != owner => {
                    self.embassy_recapture[owner] = EmbassyRecapture::AwaitingReclaim;
                }
                Some(_) if self.embassy_recapture[owner] == EmbassyRecapture::AwaitingReclaim => {
                    self.embassy_recapture[owner] = EmbassyRecapture::Reclaimed(self.turn);
                }
                _ => {}
            }
        }
    }

    // ========================================================================
    // SERIALIZATION
    // ========================================================================

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TERRITORY
// ============================================================================

/// Home territory for a side whose embassy stands at `embassy`.
///
/// Walks the diagonal from the embassy toward the side's home edge; on every
/// row visited, every column on the home side of the walk is included.
pub fn compute_territory(player: Player, embassy: HexCoord) -> Vec<HexCoord> {
    let walk = match player {
        Player::Blue => Direction::NE,
        Player::Red => Direction::SW,
    };

    // row -> walk column, so each row is swept once
    let mut sweep: BTreeMap<i8, i8> = BTreeMap::new();
    let mut cursor = embassy;
    while (0..ROWS).contains(&cursor.r) {
        sweep.insert(cursor.r, cursor.q);
        cursor = cursor.step(walk);
    }

    let mut tiles = Vec::new();
    for (r, edge) in sweep {
        let columns = match player {
            Player::Blue => 0..=edge.min(COLS - 1),
            Player::Red => edge.max(0)..=COLS - 1,
        };
        tiles.extend(columns.map(|q| HexCoord::new(q, r)).filter(HexCoord::is_valid));
    }
    tiles
}
