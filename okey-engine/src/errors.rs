use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a command was rejected. Rejections never mutate state; the game
/// continues and the caller may retry with a legal command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    TableFull,
    AlreadySeated,
    NotSeated,
    GameNotWaiting,
    GameNotPlaying,
    NeedFourPlayers,
    NotYourTurn,
    NotAwaitingDraw,
    NotAwaitingDiscard,
    StockEmpty,
    DiscardPileEmpty,
    TileNotInHand,
    HandNotFourteen,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            RejectReason::TableFull => "table already seats four players",
            RejectReason::AlreadySeated => "player is already seated",
            RejectReason::NotSeated => "player is not seated at this table",
            RejectReason::GameNotWaiting => "game has already started",
            RejectReason::GameNotPlaying => "game is not in progress",
            RejectReason::NeedFourPlayers => "exactly four seated players are required",
            RejectReason::NotYourTurn => "it is not this player's turn",
            RejectReason::NotAwaitingDraw => "a draw is not expected now",
            RejectReason::NotAwaitingDiscard => "a discard is not expected now",
            RejectReason::StockEmpty => "the stock is empty",
            RejectReason::DiscardPileEmpty => "the discard pile is empty",
            RejectReason::TileNotInHand => "tile is not in the player's hand",
            RejectReason::HandNotFourteen => "hand must hold exactly 14 tiles",
        };
        f.write_str(msg)
    }
}

/// Why a hand failed winning-hand validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandFault {
    /// The hand does not hold exactly 14 tiles.
    WrongTileCount { actual: usize },
    /// No partition into legal melds or seven pairs exists.
    NoDecomposition,
}

impl fmt::Display for HandFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandFault::WrongTileCount { actual } => {
                write!(f, "hand holds {actual} tiles, expected 14")
            }
            HandFault::NoDecomposition => f.write_str("no valid combination found"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OkeyError {
    /// Precondition not met; no state was mutated.
    Rejected(RejectReason),
    /// Finish was requested but the hand is not a winning combination.
    /// No state was mutated; the player keeps playing.
    InvalidHand(HandFault),
    /// Internal inconsistency that cannot occur with a legal deck
    /// (e.g. an indicator pick on an all-joker stock).
    InvalidState { message: String },
}

impl fmt::Display for OkeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OkeyError::Rejected(reason) => write!(f, "rejected: {reason}"),
            OkeyError::InvalidHand(fault) => write!(f, "invalid hand: {fault}"),
            OkeyError::InvalidState { message } => write!(f, "invalid state: {message}"),
        }
    }
}

impl std::error::Error for OkeyError {}

impl From<RejectReason> for OkeyError {
    fn from(reason: RejectReason) -> Self {
        OkeyError::Rejected(reason)
    }
}

impl From<HandFault> for OkeyError {
    fn from(fault: HandFault) -> Self {
        OkeyError::InvalidHand(fault)
    }
}

pub type OkeyResult<T> = Result<T, OkeyError>;
