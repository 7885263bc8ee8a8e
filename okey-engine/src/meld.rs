//! Winning-hand detection.
//!
//! A 14-tile hand wins when it partitions into melds (sets and runs, every
//! tile consumed, every meld at least three tiles) or into seven pairs.
//! Jokers -- the two false jokers plus any tile showing the okey face --
//! substitute for individual missing tiles out of a shared pool.
//!
//! The sets-and-runs check is an exact-cover backtracking search over a
//! per-face histogram plus the joker pool. A single greedy pass is not
//! enough: two tiles of one rank may belong either to a cross-color set or
//! to two different same-color runs, and only exhaustive search finds the
//! split that consumes all 14 tiles. The search anchors every meld on the
//! lowest remaining face, tries longer melds first, and accepts only when
//! nothing -- concrete tile or joker -- is left over.

use serde::{Deserialize, Serialize};

use crate::errors::HandFault;
use crate::tile::{Face, TileId, NUM_COLORS, NUM_FACES, NUM_RANKS};

/// Tiles in a hand presented for a finish.
pub const HAND_SIZE: usize = 14;

/// Minimum tiles in a set or run.
const MIN_MELD: usize = 3;

/// How a winning hand decomposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinType {
    SetsAndRuns,
    SevenPairs,
}

/// Decide whether `hand` forms a legal winning combination under the
/// given okey face. Seven pairs is checked first, so a hand valid both
/// ways reports `SevenPairs`.
pub fn evaluate_hand(hand: &[TileId], okey: Face) -> Result<WinType, HandFault> {
    if hand.len() != HAND_SIZE {
        return Err(HandFault::WrongTileCount { actual: hand.len() });
    }
    let (counts, jokers) = tally(hand, okey);
    if seven_pairs(&counts, jokers) {
        return Ok(WinType::SevenPairs);
    }
    if sets_and_runs(&counts, jokers) {
        return Ok(WinType::SetsAndRuns);
    }
    Err(HandFault::NoDecomposition)
}

/// Split a hand into a per-face histogram of concrete tiles and a count
/// of jokers.
fn tally(hand: &[TileId], okey: Face) -> ([u8; NUM_FACES], u8) {
    let mut counts = [0u8; NUM_FACES];
    let mut jokers = 0u8;
    for &tile in hand {
        if tile.is_joker(okey) {
            jokers += 1;
        } else if let Some(face) = tile.face() {
            counts[face.index()] += 1;
        }
    }
    (counts, jokers)
}

/// Seven-pairs acceptance. Every pair needs at least one concrete tile
/// (two jokers may never pair with each other), so the jokers must
/// exactly cover the unpaired singles.
fn seven_pairs(counts: &[u8; NUM_FACES], jokers: u8) -> bool {
    let mut pairs = 0u8;
    let mut singles = 0u8;
    for &count in counts {
        pairs += count / 2;
        singles += count % 2;
    }
    pairs + singles == 7 && jokers == singles
}

fn sets_and_runs(counts: &[u8; NUM_FACES], jokers: u8) -> bool {
    let mut counts = *counts;
    let concrete: usize = counts.iter().map(|&c| c as usize).sum();
    search(&mut counts, jokers, concrete + jokers as usize)
}

/// Form one meld containing the lowest remaining face, then recurse on
/// the rest. Succeeds only when every tile and joker is consumed.
fn search(counts: &mut [u8; NUM_FACES], jokers: u8, remaining: usize) -> bool {
    let Some(anchor) = counts.iter().position(|&c| c > 0) else {
        // Only jokers left. A meld cannot be made of jokers alone, and
        // absorbing them into earlier melds was already explored.
        return jokers == 0;
    };
    if remaining < MIN_MELD {
        return false;
    }
    try_runs(counts, jokers, remaining, anchor) || try_sets(counts, jokers, remaining, anchor)
}

/// Every run through the anchor tile. The anchor holds the lowest
/// remaining rank of its color, so slots below it can only be jokers;
/// slots above it branch between a concrete tile and a joker.
fn try_runs(counts: &mut [u8; NUM_FACES], jokers: u8, remaining: usize, anchor: usize) -> bool {
    let color = anchor / NUM_RANKS;
    let rank_idx = anchor % NUM_RANKS;

    counts[anchor] -= 1;
    let max_pad = rank_idx.min(jokers as usize);
    for pad in 0..=max_pad {
        if grow_run(
            counts,
            jokers - pad as u8,
            remaining - 1 - pad,
            color,
            rank_idx + 1,
            1 + pad,
        ) {
            counts[anchor] += 1;
            return true;
        }
    }
    counts[anchor] += 1;
    false
}

/// Extend a partial run upward one rank at a time. Extension is tried
/// before closing so longer runs are explored first; closing recurses
/// into the remainder of the hand.
fn grow_run(
    counts: &mut [u8; NUM_FACES],
    jokers: u8,
    remaining: usize,
    color: usize,
    next_rank_idx: usize,
    len: usize,
) -> bool {
    if next_rank_idx < NUM_RANKS {
        let idx = color * NUM_RANKS + next_rank_idx;
        if counts[idx] > 0 {
            counts[idx] -= 1;
            if grow_run(counts, jokers, remaining - 1, color, next_rank_idx + 1, len + 1) {
                counts[idx] += 1;
                return true;
            }
            counts[idx] += 1;
        }
        if jokers > 0
            && grow_run(counts, jokers - 1, remaining - 1, color, next_rank_idx + 1, len + 1)
        {
            return true;
        }
    }
    len >= MIN_MELD && search(counts, jokers, remaining)
}

/// Every set through the anchor tile: 3 or 4 tiles of the anchor's rank
/// in distinct colors, any subset of the other colors contributing a
/// concrete tile and jokers filling the rest. Four-tile sets are tried
/// before three-tile sets.
fn try_sets(counts: &mut [u8; NUM_FACES], jokers: u8, remaining: usize, anchor: usize) -> bool {
    let color = anchor / NUM_RANKS;
    let rank_idx = anchor % NUM_RANKS;
    let others: Vec<usize> = (0..NUM_COLORS)
        .filter(|&c| c != color)
        .map(|c| c * NUM_RANKS + rank_idx)
        .collect();

    counts[anchor] -= 1;
    for size in [4usize, 3] {
        for mask in 0..8u8 {
            let picked: Vec<usize> = others
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, &idx)| idx)
                .collect();
            if picked.len() + 1 > size || picked.iter().any(|&idx| counts[idx] == 0) {
                continue;
            }
            let fill = (size - 1 - picked.len()) as u8;
            if fill > jokers {
                continue;
            }
            for &idx in &picked {
                counts[idx] -= 1;
            }
            if search(counts, jokers - fill, remaining - size) {
                for &idx in &picked {
                    counts[idx] += 1;
                }
                counts[anchor] += 1;
                return true;
            }
            for &idx in &picked {
                counts[idx] += 1;
            }
        }
    }
    counts[anchor] += 1;
    false
}
