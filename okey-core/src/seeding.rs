//! Deterministic RNG seeding and deck-order generation.
//!
//! A session seed fans out into per-game seeds through a SHA-256 KDF;
//! each game seed expands into a full 106-tile deck order through a
//! `ChaCha8Rng` and a vendored Fisher-Yates shuffle.
//!
//! # Determinism guarantee
//!
//! Given the same `(session_seed, nonce, game_index)` tuple,
//! `generate_deck_order` produces an identical deck order on any
//! platform, any Rust version, any thread count.

use okey_engine::tile::{build_deck, TileId, DECK_SIZE};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Vendored Fisher-Yates shuffle for cross-version determinism.
///
/// Does NOT depend on `rand::seq::SliceRandom`, whose internal algorithm
/// may change across rand versions. Vendoring guarantees identical
/// shuffle output for the same RNG state forever.
pub fn fisher_yates_shuffle<T>(slice: &mut [T], rng: &mut impl Rng) {
    for i in (1..slice.len()).rev() {
        let j = rng.gen_range(0..=i);
        slice.swap(i, j);
    }
}

/// Derive a deterministic seed for one game within a session.
///
/// `SHA-256(session_seed || nonce_le || game_index_le)` produces a
/// 32-byte seed suitable for `ChaCha8Rng::from_seed`.
pub fn derive_game_seed(session_seed: &[u8; 32], nonce: u64, game_index: u64) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(session_seed);
    hasher.update(nonce.to_le_bytes());
    hasher.update(game_index.to_le_bytes());
    hasher.finalize().into()
}

/// Expand a 32-byte game seed into a deterministic 106-tile deck order,
/// ready for `GameState::start_from_order`.
pub fn generate_deck_order(seed: &[u8; 32]) -> Vec<TileId> {
    let mut rng = ChaCha8Rng::from_seed(*seed);
    let mut deck = build_deck();
    fisher_yates_shuffle(&mut deck, &mut rng);
    deck
}

/// Fold a 32-byte seed down to the `u64` form the engine's own shuffle
/// accepts.
pub fn seed_to_u64(seed: &[u8; 32]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&seed[..8]);
    u64::from_le_bytes(buf)
}

/// A deterministic session RNG that produces per-game seeds.
///
/// Each call to `next_game_seed` derives a unique 32-byte seed and
/// advances the internal counter, giving 2^64 independent game seeds
/// from a single session seed.
pub struct SessionRng {
    seed: [u8; 32],
    game_index: u64,
}

impl SessionRng {
    pub fn new(seed: [u8; 32]) -> Self {
        Self {
            seed,
            game_index: 0,
        }
    }

    /// Number of seeds handed out so far.
    pub fn game_index(&self) -> u64 {
        self.game_index
    }

    /// Seed for the next game; advances the counter.
    pub fn next_game_seed(&mut self) -> [u8; 32] {
        let seed = derive_game_seed(&self.seed, 0, self.game_index);
        self.game_index += 1;
        seed
    }
}
