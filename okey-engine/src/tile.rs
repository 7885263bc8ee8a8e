//! Tile identity, faces, and deck composition.
//!
//! An Okey deck holds 106 physical tiles: two copies of every
//! (color, rank) face plus two false jokers. Each physical tile carries a
//! stable `TileId` in `0..106`; the face of a numbered tile is
//! recoverable from its id, so hands and piles are plain id lists.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of tile colors.
pub const NUM_COLORS: usize = 4;

/// Ranks run 1..=13 within each color.
pub const NUM_RANKS: usize = 13;

/// Distinct numbered faces: 4 colors x 13 ranks.
pub const NUM_FACES: usize = NUM_COLORS * NUM_RANKS;

/// Physical tiles in a full deck: two copies of every face plus two
/// false jokers.
pub const DECK_SIZE: usize = 2 * NUM_FACES + 2;

/// Ids of the two false jokers.
pub const FALSE_JOKER_A: u8 = 104;
pub const FALSE_JOKER_B: u8 = 105;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// The four tile colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Yellow = 0,
    Blue = 1,
    Black = 2,
    Red = 3,
}

impl Color {
    pub const ALL: [Color; NUM_COLORS] = [Color::Yellow, Color::Blue, Color::Black, Color::Red];

    /// Index in `0..4`, matching the face-id layout.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    const fn from_index(idx: u8) -> Color {
        match idx {
            0 => Color::Yellow,
            1 => Color::Blue,
            2 => Color::Black,
            _ => Color::Red,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Black => "black",
            Color::Red => "red",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Face newtype
// ---------------------------------------------------------------------------

/// A numbered tile face: one of the 52 (color, rank) combinations.
/// Wraps the face index `color * 13 + (rank - 1)` for type safety.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face(u8);

impl Face {
    /// Creates a `Face` if `rank` is in `1..=13`.
    #[inline]
    pub const fn new(color: Color, rank: u8) -> Option<Self> {
        if rank >= 1 && rank <= NUM_RANKS as u8 {
            Some(Face(color as u8 * NUM_RANKS as u8 + rank - 1))
        } else {
            None
        }
    }

    /// Creates a `Face` from a raw face index in `0..52`.
    #[inline]
    pub const fn from_index(idx: u8) -> Option<Self> {
        if idx < NUM_FACES as u8 {
            Some(Face(idx))
        } else {
            None
        }
    }

    /// Raw face index (0-51).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn color(self) -> Color {
        Color::from_index(self.0 / NUM_RANKS as u8)
    }

    /// 1-based rank (1-13).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 % NUM_RANKS as u8 + 1
    }

    /// The face one rank above in the same color, wrapping 13 back to 1.
    /// This is the okey derivation applied to the indicator.
    #[inline]
    pub const fn successor(self) -> Face {
        let rank = if self.rank() == NUM_RANKS as u8 {
            1
        } else {
            self.rank() + 1
        };
        Face(self.0 / NUM_RANKS as u8 * NUM_RANKS as u8 + rank - 1)
    }
}

impl fmt::Debug for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Face({} {})", self.color(), self.rank())
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color(), self.rank())
    }
}

// ---------------------------------------------------------------------------
// TileId newtype
// ---------------------------------------------------------------------------

/// A physical tile in the deck, identified by its id in `0..106`.
///
/// Ids `0..104` are numbered tiles: `id % 52` is the face index and
/// `id / 52` the copy (each face exists twice). Ids 104 and 105 are the
/// two false jokers.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(u8);

impl TileId {
    /// Creates a `TileId` if `id` is in range `0..106`.
    #[inline]
    pub const fn new(id: u8) -> Option<Self> {
        if id < DECK_SIZE as u8 {
            Some(TileId(id))
        } else {
            None
        }
    }

    /// Raw numeric id (0-105).
    #[inline]
    pub const fn id(self) -> u8 {
        self.0
    }

    /// True for the two false jokers.
    #[inline]
    pub const fn is_false_joker(self) -> bool {
        self.0 >= FALSE_JOKER_A
    }

    /// The numbered face of this tile, or `None` for false jokers.
    #[inline]
    pub const fn face(self) -> Option<Face> {
        if self.is_false_joker() {
            None
        } else {
            Some(Face(self.0 % NUM_FACES as u8))
        }
    }

    /// Whether this tile plays as a joker under the given okey face:
    /// false jokers always do, and so does any tile showing the okey face.
    #[inline]
    pub fn is_joker(self, okey: Face) -> bool {
        self.is_false_joker() || self.face() == Some(okey)
    }
}

impl fmt::Debug for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.face() {
            Some(face) => write!(f, "TileId({}={})", self.0, face),
            None => write!(f, "TileId({}=false joker)", self.0),
        }
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.face() {
            Some(face) => face.fmt(f),
            None => f.write_str("false joker"),
        }
    }
}

// ---------------------------------------------------------------------------
// Deck construction
// ---------------------------------------------------------------------------

/// All 106 tile ids in construction order: two full color/rank sweeps,
/// then the two false jokers. Only meaningful after shuffling.
pub fn build_deck() -> Vec<TileId> {
    (0..DECK_SIZE as u8).map(TileId).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_composition() {
        let deck = build_deck();
        assert_eq!(deck.len(), DECK_SIZE);

        let mut face_counts = [0u32; NUM_FACES];
        let mut false_jokers = 0u32;
        for tile in &deck {
            match tile.face() {
                Some(face) => face_counts[face.index()] += 1,
                None => false_jokers += 1,
            }
        }
        assert_eq!(false_jokers, 2);
        for (idx, &count) in face_counts.iter().enumerate() {
            assert_eq!(count, 2, "face {idx} appears {count} times, expected 2");
        }
    }

    #[test]
    fn face_roundtrip() {
        for color in Color::ALL {
            for rank in 1..=13u8 {
                let face = Face::new(color, rank).unwrap();
                assert_eq!(face.color(), color);
                assert_eq!(face.rank(), rank);
                assert_eq!(Face::from_index(face.index() as u8), Some(face));
            }
        }
        assert!(Face::new(Color::Red, 0).is_none());
        assert!(Face::new(Color::Red, 14).is_none());
        assert!(Face::from_index(52).is_none());
    }

    #[test]
    fn successor_wraps_thirteen_to_one() {
        let twelve = Face::new(Color::Blue, 12).unwrap();
        assert_eq!(twelve.successor(), Face::new(Color::Blue, 13).unwrap());

        let thirteen = Face::new(Color::Black, 13).unwrap();
        let wrapped = thirteen.successor();
        assert_eq!(wrapped.rank(), 1);
        assert_eq!(wrapped.color(), Color::Black);
    }

    #[test]
    fn tile_copies_share_a_face() {
        let first = TileId::new(5).unwrap();
        let second = TileId::new(5 + NUM_FACES as u8).unwrap();
        assert_eq!(first.face(), second.face());
        assert_ne!(first, second);
    }

    #[test]
    fn false_jokers_have_no_face() {
        for id in [FALSE_JOKER_A, FALSE_JOKER_B] {
            let tile = TileId::new(id).unwrap();
            assert!(tile.is_false_joker());
            assert_eq!(tile.face(), None);
        }
        assert!(TileId::new(106).is_none());
    }

    #[test]
    fn joker_detection_covers_okey_face() {
        let okey = Face::new(Color::Red, 7).unwrap();
        let okey_tile = TileId::new(okey.index() as u8).unwrap();
        let other = TileId::new(0).unwrap();
        let false_joker = TileId::new(FALSE_JOKER_A).unwrap();

        assert!(okey_tile.is_joker(okey));
        assert!(false_joker.is_joker(okey));
        assert!(!other.is_joker(okey));
    }

    #[test]
    fn color_serde_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&Color::Yellow).unwrap(), "\"yellow\"");
        assert_eq!(serde_json::to_string(&Color::Black).unwrap(), "\"black\"");
    }
}
