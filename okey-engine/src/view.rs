//! Read-only state projections.
//!
//! A `TableView` is the value snapshot sent to clients. The public part
//! shows seat summaries (tile counts only), the turn pointer, the
//! indicator/okey, the stock size, and the top of the discard pile; the
//! requesting seat's own hand is attached only when a seated identity is
//! supplied. Another seat's hand contents never appear in any view.

use serde::Serialize;

use crate::action::{GamePhase, TurnState};
use crate::meld::WinType;
use crate::state::player::PlayerId;
use crate::state::GameState;
use crate::tile::{Color, Face, TileId};

/// One physical tile, spelled out for clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileView {
    pub id: u8,
    pub color: Option<Color>,
    pub number: u8,
    pub is_false_joker: bool,
}

impl From<TileId> for TileView {
    fn from(tile: TileId) -> Self {
        match tile.face() {
            Some(face) => Self {
                id: tile.id(),
                color: Some(face.color()),
                number: face.rank(),
                is_false_joker: false,
            },
            None => Self {
                id: tile.id(),
                color: None,
                number: 0,
                is_false_joker: true,
            },
        }
    }
}

/// A face without a physical tile behind it (the okey announcement).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FaceView {
    pub color: Color,
    pub number: u8,
}

impl From<Face> for FaceView {
    fn from(face: Face) -> Self {
        Self {
            color: face.color(),
            number: face.rank(),
        }
    }
}

/// Public per-seat summary: everything about a seat except its tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatView {
    pub seat: u8,
    pub player: PlayerId,
    pub name: String,
    pub tile_count: usize,
    pub is_ready: bool,
}

/// One seat's share of the stock-exhaustion penalty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatPenalty {
    pub seat: u8,
    pub player: PlayerId,
    pub penalty: u32,
}

/// Terminal record of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GameResult {
    /// A seat finished with a valid hand.
    Won {
        seat: u8,
        player: PlayerId,
        name: String,
        score: u32,
        win_type: WinType,
    },
    /// The stock ran dry; penalties ranked worst hand first.
    Drawn { penalties: Vec<SeatPenalty> },
    /// A seat departed mid-game.
    Abandoned { seat: u8, player: PlayerId, name: String },
}

/// Full state snapshot for one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub phase: GamePhase,
    pub seats: Vec<SeatView>,
    pub current_seat: u8,
    pub turn: TurnState,
    pub indicator: Option<TileView>,
    pub okey: Option<FaceView>,
    pub stock_len: usize,
    pub discard_top: Option<TileView>,
    pub result: Option<GameResult>,
    /// The requesting seat's own hand; absent from the public view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<TileView>>,
}

impl GameState {
    /// Project the table for one recipient. With `for_player = None` the
    /// view is fully public.
    pub fn view(&self, for_player: Option<&PlayerId>) -> TableView {
        let seats = self
            .seats
            .iter()
            .enumerate()
            .map(|(seat, p)| SeatView {
                seat: seat as u8,
                player: p.id.clone(),
                name: p.name.clone(),
                tile_count: p.hand.len(),
                is_ready: p.is_ready,
            })
            .collect();

        let hand = for_player
            .and_then(|id| self.seat_of(id))
            .map(|seat| {
                self.seats[seat as usize]
                    .hand
                    .iter()
                    .map(|&t| TileView::from(t))
                    .collect()
            });

        TableView {
            phase: self.phase,
            seats,
            current_seat: self.current_seat,
            turn: self.turn,
            indicator: self.stock.indicator.map(TileView::from),
            okey: self.stock.okey.map(FaceView::from),
            stock_len: self.stock.len(),
            discard_top: self.discard_top().map(TileView::from),
            result: self.result.clone(),
            hand,
        }
    }
}
