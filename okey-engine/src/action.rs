//! Command vocabulary and phase machinery.

use serde::{Deserialize, Serialize};

use crate::tile::TileId;

/// Lifecycle of a table. Dealing is one atomic step inside `start` and
/// never observable as a phase of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Waiting,
    Playing,
    Finished,
}

/// What the seat whose turn it is may do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    AwaitingDraw,
    AwaitingDiscard,
}

/// A player-issued command. The acting identity is supplied alongside by
/// the (trusted) transport layer, never inside the command itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Start,
    DrawFromStock,
    DrawFromDiscard,
    Discard { tile: TileId },
    Finish,
}
