use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tile::TileId;

/// Opaque player identity supplied by the transport layer. The engine
/// never inspects it beyond equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// One seat at the table.
///
/// Hand order is a display preference carried for the client; it never
/// affects validity or scoring.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    pub hand: Vec<TileId>,
    pub is_ready: bool,
}

impl PlayerState {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Vec::new(),
            is_ready: false,
        }
    }

    pub fn holds(&self, tile: TileId) -> bool {
        self.hand.contains(&tile)
    }

    /// Remove `tile` from the hand, returning it if it was present.
    pub fn take(&mut self, tile: TileId) -> Option<TileId> {
        let pos = self.hand.iter().position(|&t| t == tile)?;
        Some(self.hand.remove(pos))
    }
}
