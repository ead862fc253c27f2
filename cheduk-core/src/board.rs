//! Hex board geometry with odd-r offset coordinates
//!
//! The board is a rectangle of 11 columns by 12 rows. Odd rows are shifted
//! half a cell to the right, so the diagonal neighbours of a tile depend on
//! the parity of its row.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of columns on the board
pub const COLS: i8 = 11;

/// Number of rows on the board
pub const ROWS: i8 = 12;

/// Total number of tiles
pub const TILE_COUNT: usize = COLS as usize * ROWS as usize;

/// Offset coordinates: `q` is the column, `r` the row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexCoord {
    pub q: i8,
    pub r: i8,
}

impl HexCoord {
    pub const fn new(q: i8, r: i8) -> Self {
        Self { q, r }
    }

    /// Check if this coordinate lies on the board
    pub fn is_valid(&self) -> bool {
        (0..COLS).contains(&self.q) && (0..ROWS).contains(&self.r)
    }

    /// Packed arena index, `None` when off the board
    pub fn index(&self) -> Option<usize> {
        if self.is_valid() {
            Some(self.r as usize * COLS as usize + self.q as usize)
        } else {
            None
        }
    }

    /// Inverse of [`HexCoord::index`]
    pub fn from_index(index: usize) -> Self {
        let cols = COLS as usize;
        Self::new((index % cols) as i8, (index / cols) as i8)
    }

    pub fn is_odd_row(&self) -> bool {
        self.r.rem_euclid(2) == 1
    }

    /// Neighbour in the given direction (may be off the board)
    pub fn step(&self, direction: Direction) -> HexCoord {
        let (dq, dr) = direction.offset(self.is_odd_row());
        HexCoord::new(self.q + dq, self.r + dr)
    }

    /// Translate by a raw (dq, dr) offset
    pub fn offset(&self, dq: i8, dr: i8) -> HexCoord {
        HexCoord::new(self.q + dq, self.r + dr)
    }

    /// All six neighbours that exist on the board
    pub fn neighbors(&self) -> impl Iterator<Item = HexCoord> + '_ {
        Direction::ALL
            .iter()
            .map(move |&dir| self.step(dir))
            .filter(HexCoord::is_valid)
    }

    /// Convert to cube coordinates (x + y + z == 0)
    pub fn to_cube(&self) -> Cube {
        let q = self.q as i32;
        let r = self.r as i32;
        let x = q - (r - (r & 1)) / 2;
        let z = r;
        Cube { x, y: -x - z, z }
    }

    /// Hex-grid distance between two tiles
    pub fn distance_to(&self, other: HexCoord) -> i32 {
        self.to_cube().distance(other.to_cube())
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

/// Error parsing a `"col,row"` board key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordParseError {
    #[error("expected \"col,row\", got {0:?}")]
    MissingSeparator(String),
    #[error("invalid coordinate component {0:?}")]
    InvalidNumber(String),
}

impl FromStr for HexCoord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (q, r) = s
            .split_once(',')
            .ok_or_else(|| CoordParseError::MissingSeparator(s.to_string()))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<i8>()
                .map_err(|_| CoordParseError::InvalidNumber(part.to_string()))
        };
        Ok(HexCoord::new(parse(q)?, parse(r)?))
    }
}

/// Cube coordinates, used only for distances
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cube {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cube {
    pub fn distance(&self, other: Cube) -> i32 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }
}

/// The six hex directions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

/// Offsets for tiles on even rows, indexed like [`Direction::ALL`]
const EVEN_ROW_OFFSETS: [(i8, i8); 6] = [
    (1, 0),   // E
    (-1, 0),  // W
    (0, -1),  // NE
    (-1, -1), // NW
    (0, 1),   // SE
    (-1, 1),  // SW
];

/// Offsets for tiles on odd rows
const ODD_ROW_OFFSETS: [(i8, i8); 6] = [
    (1, 0),  // E
    (-1, 0), // W
    (1, -1), // NE
    (0, -1), // NW
    (1, 1),  // SE
    (0, 1),  // SW
];

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::E,
        Direction::W,
        Direction::NE,
        Direction::NW,
        Direction::SE,
        Direction::SW,
    ];

    fn table_index(self) -> usize {
        match self {
            Direction::E => 0,
            Direction::W => 1,
            Direction::NE => 2,
            Direction::NW => 3,
            Direction::SE => 4,
            Direction::SW => 5,
        }
    }

    /// (dq, dr) for a step from a tile on an odd or even row
    pub fn offset(self, odd_row: bool) -> (i8, i8) {
        let table = if odd_row { &ODD_ROW_OFFSETS } else { &EVEN_ROW_OFFSETS };
        table[self.table_index()]
    }

    /// Direction for an angle in degrees, counter-clockwise from east
    pub fn from_angle(angle: u16) -> Option<Direction> {
        match angle % 360 {
            0 => Some(Direction::E),
            60 => Some(Direction::NE),
            120 => Some(Direction::NW),
            180 => Some(Direction::W),
            240 => Some(Direction::SW),
            300 => Some(Direction::SE),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_coords() -> impl Iterator<Item = HexCoord> {
        (0..TILE_COUNT).map(HexCoord::from_index)
    }

    fn opposite(dir: Direction) -> Direction {
        match dir {
            Direction::E => Direction::W,
            Direction::W => Direction::E,
            Direction::NE => Direction::SW,
            Direction::SW => Direction::NE,
            Direction::NW => Direction::SE,
            Direction::SE => Direction::NW,
        }
    }

    #[test]
    fn test_validity() {
        assert!(HexCoord::new(0, 0).is_valid());
        assert!(HexCoord::new(10, 11).is_valid());
        assert!(!HexCoord::new(11, 0).is_valid());
        assert!(!HexCoord::new(0, 12).is_valid());
        assert!(!HexCoord::new(-1, 3).is_valid());
    }

    #[test]
    fn test_index_roundtrip() {
        for coord in all_coords() {
            let idx = coord.index().unwrap();
            assert_eq!(HexCoord::from_index(idx), coord);
        }
        assert_eq!(all_coords().count(), TILE_COUNT);
        assert_eq!(HexCoord::new(-1, 0).index(), None);
    }

    #[test]
    fn test_step_depends_on_parity() {
        // even row
        let even = HexCoord::new(5, 4);
        assert_eq!(even.step(Direction::NE), HexCoord::new(5, 3));
        assert_eq!(even.step(Direction::NW), HexCoord::new(4, 3));
        assert_eq!(even.step(Direction::SW), HexCoord::new(4, 5));
        // odd row
        let odd = HexCoord::new(5, 5);
        assert_eq!(odd.step(Direction::NE), HexCoord::new(6, 4));
        assert_eq!(odd.step(Direction::NW), HexCoord::new(5, 4));
        assert_eq!(odd.step(Direction::SE), HexCoord::new(6, 6));
        assert_eq!(odd.step(Direction::E), HexCoord::new(6, 5));
    }

    #[test]
    fn test_opposite_steps_return() {
        for coord in [HexCoord::new(4, 4), HexCoord::new(4, 5)] {
            for dir in Direction::ALL {
                assert_eq!(coord.step(dir).step(opposite(dir)), coord);
            }
        }
    }

    #[test]
    fn test_distance() {
        let origin = HexCoord::new(5, 6);
        assert_eq!(origin.distance_to(origin), 0);
        for n in origin.neighbors() {
            assert_eq!(origin.distance_to(n), 1);
        }
        assert_eq!(HexCoord::new(3, 2).distance_to(origin), 4);
        assert_eq!(HexCoord::new(4, 4).distance_to(origin), 2);
        assert_eq!(HexCoord::new(0, 0).distance_to(HexCoord::new(3, 2)), 4);
    }

    #[test]
    fn test_cube_sums_to_zero() {
        for coord in all_coords() {
            let c = coord.to_cube();
            assert_eq!(c.x + c.y + c.z, 0);
        }
    }

    #[test]
    fn test_parse_key() {
        assert_eq!("3,7".parse::<HexCoord>(), Ok(HexCoord::new(3, 7)));
        assert_eq!(HexCoord::new(10, 2).to_string(), "10,2");
        assert!(matches!(
            "37".parse::<HexCoord>(),
            Err(CoordParseError::MissingSeparator(_))
        ));
        assert!(matches!(
            "a,1".parse::<HexCoord>(),
            Err(CoordParseError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_angles() {
        assert_eq!(Direction::from_angle(0), Some(Direction::E));
        assert_eq!(Direction::from_angle(240), Some(Direction::SW));
        assert_eq!(Direction::from_angle(45), None);
    }
}
