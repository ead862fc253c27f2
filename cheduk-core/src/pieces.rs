//! Players and piece definitions

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::board::Direction;

/// Player side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::Red, Player::Blue];

    pub fn opponent(self) -> Self {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }
}

/// One value per player, serialized as `{ "Red": .., "Blue": .. }`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    #[serde(rename = "Red")]
    pub red: T,
    #[serde(rename = "Blue")]
    pub blue: T,
}

impl<T> PlayerMap<T> {
    pub const fn new(red: T, blue: T) -> Self {
        Self { red, blue }
    }
}

impl<T> Index<Player> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: Player) -> &T {
        match player {
            Player::Red => &self.red,
            Player::Blue => &self.blue,
        }
    }
}

impl<T> IndexMut<Player> for PlayerMap<T> {
    fn index_mut(&mut self, player: Player) -> &mut T {
        match player {
            Player::Red => &mut self.red,
            Player::Blue => &mut self.blue,
        }
    }
}

/// The six piece archetypes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Chief,
    Diplomat,
    SpecialEnvoy,
    Ambassador,
    Spy,
    Guard,
}

/// Spy step angles (degrees) for each side
const RED_SPY_ANGLES: [u16; 4] = [60, 120, 180, 240];
const BLUE_SPY_ANGLES: [u16; 4] = [0, 60, 240, 300];

/// The four directions a spy of this side may step in
pub fn spy_directions(player: Player) -> impl Iterator<Item = Direction> {
    let angles = match player {
        Player::Red => RED_SPY_ANGLES,
        Player::Blue => BLUE_SPY_ANGLES,
    };
    angles.into_iter().filter_map(Direction::from_angle)
}

/// Stable piece identity, unique within a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub u8);

/// A piece, wherever it currently lives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    #[serde(rename = "type")]
    pub piece_type: PieceType,
    pub player: Player,
}

impl Piece {
    pub const fn new(id: u8, piece_type: PieceType, player: Player) -> Self {
        Self {
            id: PieceId(id),
            piece_type,
            player,
        }
    }

    pub fn is_enemy_of(&self, other: &Piece) -> bool {
        self.player != other.player
    }

    pub fn is_friend_of(&self, other: &Piece) -> bool {
        self.player == other.player
    }
}
