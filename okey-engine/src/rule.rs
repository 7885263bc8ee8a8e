//! Table configuration: scoring constants and the stock-exhaustion
//! penalty policy.

use std::fmt;
use std::sync::Arc;

use crate::tile::{Face, TileId};

/// Penalty metric applied to every seat's hand when the stock runs dry
/// and the game ends as a draw. Pluggable so tables can rank hands by
/// whatever house rule they prefer.
pub trait PenaltyPolicy: Send + Sync {
    /// Penalty points for one hand under the given okey face.
    fn penalty(&self, hand: &[TileId], okey: Face) -> u32;
}

/// Default policy: a fixed number of points per isolated tile.
///
/// A tile is isolated when the hand holds no same-face twin, no tile of
/// the same rank in another color, and no same-color neighbor one rank
/// away. Jokers are never isolated.
#[derive(Debug, Clone, Copy)]
pub struct IsolatedTilePenalty {
    pub points_per_tile: u32,
}

impl Default for IsolatedTilePenalty {
    fn default() -> Self {
        Self { points_per_tile: 10 }
    }
}

impl PenaltyPolicy for IsolatedTilePenalty {
    fn penalty(&self, hand: &[TileId], okey: Face) -> u32 {
        let isolated = hand
            .iter()
            .enumerate()
            .filter(|(i, t)| !t.is_joker(okey) && !has_partner(hand, *i, okey))
            .count() as u32;
        isolated * self.points_per_tile
    }
}

/// Whether some other tile in the hand could ever meld or pair with the
/// tile at `idx`: same face, same rank in another color, or an adjacent
/// rank in the same color.
fn has_partner(hand: &[TileId], idx: usize, okey: Face) -> bool {
    let Some(face) = hand[idx].face() else {
        return true;
    };
    hand.iter().enumerate().any(|(j, other)| {
        if j == idx {
            return false;
        }
        if other.is_joker(okey) {
            return false;
        }
        let Some(of) = other.face() else {
            return false;
        };
        if of == face {
            return true;
        }
        if of.rank() == face.rank() && of.color() != face.color() {
            return true;
        }
        of.color() == face.color() && of.rank().abs_diff(face.rank()) == 1
    })
}

/// Shared, clonable handle to a penalty policy.
#[derive(Clone)]
pub struct PenaltyFn(Arc<dyn PenaltyPolicy>);

impl PenaltyFn {
    pub fn new(policy: impl PenaltyPolicy + 'static) -> Self {
        Self(Arc::new(policy))
    }

    pub fn penalty(&self, hand: &[TileId], okey: Face) -> u32 {
        self.0.penalty(hand, okey)
    }
}

impl Default for PenaltyFn {
    fn default() -> Self {
        Self::new(IsolatedTilePenalty::default())
    }
}

impl fmt::Debug for PenaltyFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PenaltyFn(..)")
    }
}

/// Scoring knobs for one table.
#[derive(Debug, Clone)]
pub struct GameRule {
    /// Every win is worth at least this much.
    pub base_score: u32,
    /// Winner holds a false joker and no okey-face tile.
    pub hidden_joker_bonus: u32,
    /// Winner holds exactly two okey-face tiles.
    pub double_okey_bonus: u32,
    /// Win type is seven pairs.
    pub seven_pairs_bonus: u32,
    /// Applied per seat on stock exhaustion.
    pub penalty: PenaltyFn,
}

impl Default for GameRule {
    fn default() -> Self {
        Self::standard()
    }
}

impl GameRule {
    pub fn standard() -> Self {
        Self {
            base_score: 100,
            hidden_joker_bonus: 50,
            double_okey_bonus: 100,
            seven_pairs_bonus: 50,
            penalty: PenaltyFn::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{Color, TileId, FALSE_JOKER_A, NUM_FACES};

    fn tid(copy: u8, color: Color, rank: u8) -> TileId {
        let face = Face::new(color, rank).unwrap();
        TileId::new(copy * NUM_FACES as u8 + face.index() as u8).unwrap()
    }

    #[test]
    fn isolated_tiles_are_counted() {
        let okey = Face::new(Color::Red, 13).unwrap();
        // Yellow 1-2 meld together; black 9 is stranded.
        let hand = vec![
            tid(0, Color::Yellow, 1),
            tid(0, Color::Yellow, 2),
            tid(0, Color::Black, 9),
        ];
        let policy = IsolatedTilePenalty::default();
        assert_eq!(policy.penalty(&hand, okey), 10);
    }

    #[test]
    fn jokers_never_penalized() {
        let okey = Face::new(Color::Red, 5).unwrap();
        let hand = vec![
            TileId::new(FALSE_JOKER_A).unwrap(),
            tid(0, Color::Red, 5),
        ];
        let policy = IsolatedTilePenalty::default();
        assert_eq!(policy.penalty(&hand, okey), 0);
    }

    #[test]
    fn same_rank_other_color_is_a_partner() {
        let okey = Face::new(Color::Red, 13).unwrap();
        let hand = vec![tid(0, Color::Yellow, 7), tid(0, Color::Blue, 7)];
        let policy = IsolatedTilePenalty::default();
        assert_eq!(policy.penalty(&hand, okey), 0);
    }
}
