//! Winner scoring.
//!
//! Invoked only after a hand has passed winning-hand validation. The
//! base score and every bonus come from the table's `GameRule`; bonuses
//! are additive and independently applicable.

use crate::meld::WinType;
use crate::rule::GameRule;
use crate::tile::{Face, TileId};

/// Score a validated winning hand.
///
/// Bonuses:
/// - hidden joker: at least one false joker held and zero okey-face tiles
/// - double okey: exactly two okey-face tiles held
/// - seven pairs: the win decomposed as seven pairs
pub fn score_hand(hand: &[TileId], okey: Face, win_type: WinType, rule: &GameRule) -> u32 {
    let okey_tiles = hand.iter().filter(|t| t.face() == Some(okey)).count();
    let false_jokers = hand.iter().filter(|t| t.is_false_joker()).count();

    let mut score = rule.base_score;
    if false_jokers >= 1 && okey_tiles == 0 {
        score += rule.hidden_joker_bonus;
    }
    if okey_tiles == 2 {
        score += rule.double_okey_bonus;
    }
    if win_type == WinType::SevenPairs {
        score += rule.seven_pairs_bonus;
    }
    score
}
