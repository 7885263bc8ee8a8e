//! Stock state: deck shuffle, indicator selection, digest, dealing.

use rand::prelude::*;
use rand::rngs::StdRng;
use sha2::{Digest, Sha256};

use crate::errors::{OkeyError, OkeyResult};
use crate::tile::{build_deck, Face, TileId, DECK_SIZE};

/// The face-down draw pile plus the indicator bookkeeping.
///
/// Tiles are stored reversed so `pop()` draws in shuffle order. The
/// shuffled order is committed to with a salted SHA-256 digest before any
/// tile is dealt, so clients can audit the shuffle after the game.
#[derive(Debug, Clone)]
pub struct StockState {
    pub tiles: Vec<TileId>,
    pub indicator: Option<TileId>,
    pub okey: Option<Face>,
    pub stock_digest: String,
    pub salt: String,
    pub seed: Option<u64>,
    pub deal_index: u64,
}

impl StockState {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            tiles: Vec::new(),
            indicator: None,
            okey: None,
            stock_digest: String::new(),
            salt: String::new(),
            seed,
            deal_index: 0,
        }
    }

    /// Shuffle a fresh 106-tile deck and pick the indicator.
    ///
    /// The indicator is the first non-false-joker tile of the shuffled
    /// order; given a uniform shuffle this is a uniformly random pick
    /// among the 104 candidates. It is removed from play and the okey
    /// face derived from it.
    pub fn shuffle(&mut self) -> OkeyResult<()> {
        let mut deck = build_deck();

        let mut rng = if let Some(seed) = self.seed {
            let deal_seed = splitmix64(seed.wrapping_add(self.deal_index));
            StdRng::seed_from_u64(deal_seed)
        } else {
            StdRng::from_entropy()
        };
        self.deal_index = self.deal_index.wrapping_add(1);

        deck.shuffle(&mut rng);
        self.salt = format!("{:016x}", rng.next_u64());
        self.install(&deck)
    }

    /// Install an externally generated deck order (deterministic replay).
    /// The order must be a permutation of the full deck.
    pub fn load_order(&mut self, order: &[TileId]) -> OkeyResult<()> {
        if order.len() != DECK_SIZE {
            return Err(OkeyError::InvalidState {
                message: format!("deck order holds {} tiles, expected {DECK_SIZE}", order.len()),
            });
        }
        let mut seen = [false; DECK_SIZE];
        for tile in order {
            let idx = tile.id() as usize;
            if seen[idx] {
                return Err(OkeyError::InvalidState {
                    message: format!("deck order repeats tile {}", tile.id()),
                });
            }
            seen[idx] = true;
        }
        self.deal_index = self.deal_index.wrapping_add(1);
        self.salt.clear();
        self.install(order)
    }

    /// Commit to `order`: digest it, extract the indicator, store the
    /// rest ready for drawing.
    fn install(&mut self, order: &[TileId]) -> OkeyResult<()> {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        for tile in order {
            hasher.update([tile.id()]);
        }
        self.stock_digest = format!("{:x}", hasher.finalize());

        let pos = order
            .iter()
            .position(|t| !t.is_false_joker())
            .ok_or_else(|| OkeyError::InvalidState {
                message: "deck holds no indicator candidate".to_owned(),
            })?;
        let indicator = order[pos];
        let Some(face) = indicator.face() else {
            return Err(OkeyError::InvalidState {
                message: "indicator tile has no face".to_owned(),
            });
        };
        self.indicator = Some(indicator);
        self.okey = Some(face.successor());

        let mut rest: Vec<TileId> = order
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != pos)
            .map(|(_, &t)| t)
            .collect();
        rest.reverse();
        self.tiles = rest;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Draw the next tile off the top.
    pub fn draw(&mut self) -> Option<TileId> {
        self.tiles.pop()
    }

    /// Deal `n` tiles off the top.
    pub fn deal(&mut self, n: usize) -> Vec<TileId> {
        let mut dealt = Vec::with_capacity(n);
        for _ in 0..n {
            if let Some(tile) = self.tiles.pop() {
                dealt.push(tile);
            }
        }
        dealt
    }
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
