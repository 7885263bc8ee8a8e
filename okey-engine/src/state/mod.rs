//! Table state: seats, zones, and the turn cycle.
//!
//! `GameState` owns every zone a tile can live in -- stock, four hands,
//! the discard pile, and the indicator set aside at deal time -- and the
//! turn machinery that decides which command is legal next. Command
//! handling lives in [`commands`]; read-only projections in
//! [`crate::view`].

use crate::action::{GamePhase, TurnState};
use crate::errors::{OkeyResult, RejectReason};
use crate::meld::HAND_SIZE;
use crate::rule::GameRule;
use crate::tile::{Face, TileId};
use crate::view::GameResult;

pub mod commands;
pub mod player;
pub mod stock;

use player::{PlayerId, PlayerState};
use stock::StockState;

/// Exactly four seats per table.
pub const NUM_SEATS: usize = 4;

/// The dealer starts with one extra, pre-drawn tile.
pub const DEALER_HAND_SIZE: usize = HAND_SIZE + 1;

#[derive(Debug, Clone)]
pub struct GameState {
    pub stock: StockState,
    pub seats: Vec<PlayerState>,
    /// Most recent discard on top (back of the vec).
    pub discard_pile: Vec<TileId>,
    pub phase: GamePhase,
    pub turn: TurnState,
    pub current_seat: u8,
    pub turn_count: u32,
    pub result: Option<GameResult>,
    pub rule: GameRule,
}

impl GameState {
    pub fn new(rule: GameRule, seed: Option<u64>) -> Self {
        Self {
            stock: StockState::new(seed),
            seats: Vec::with_capacity(NUM_SEATS),
            discard_pile: Vec::new(),
            phase: GamePhase::Waiting,
            turn: TurnState::AwaitingDraw,
            current_seat: 0,
            turn_count: 0,
            result: None,
            rule,
        }
    }

    /// Seat a player. Seats fill in join order and are fixed thereafter.
    pub fn join(&mut self, id: PlayerId, name: impl Into<String>) -> OkeyResult<u8> {
        if self.phase != GamePhase::Waiting {
            return Err(RejectReason::GameNotWaiting.into());
        }
        if self.seats.len() >= NUM_SEATS {
            return Err(RejectReason::TableFull.into());
        }
        if self.seat_of(&id).is_some() {
            return Err(RejectReason::AlreadySeated.into());
        }
        self.seats.push(PlayerState::new(id, name));
        Ok(self.seats.len() as u8 - 1)
    }

    /// Flag readiness before the game starts.
    pub fn set_ready(&mut self, player: &PlayerId, ready: bool) -> OkeyResult<()> {
        if self.phase != GamePhase::Waiting {
            return Err(RejectReason::GameNotWaiting.into());
        }
        let seat = self
            .seat_of(player)
            .ok_or(RejectReason::NotSeated)?;
        self.seats[seat as usize].is_ready = ready;
        Ok(())
    }

    pub fn seat_of(&self, player: &PlayerId) -> Option<u8> {
        self.seats
            .iter()
            .position(|p| &p.id == player)
            .map(|s| s as u8)
    }

    /// Start the game: shuffle, pick the indicator, deal 15/14/14/14.
    /// One atomic step; on any failure the table is left untouched in
    /// `Waiting`.
    pub fn start(&mut self) -> OkeyResult<()> {
        self.check_can_start()?;
        self.stock.shuffle()?;
        self.deal();
        Ok(())
    }

    /// Start from an externally generated deck order (deterministic
    /// replay for tests and simulations).
    pub fn start_from_order(&mut self, order: &[TileId]) -> OkeyResult<()> {
        self.check_can_start()?;
        self.stock.load_order(order)?;
        self.deal();
        Ok(())
    }

    fn check_can_start(&self) -> OkeyResult<()> {
        if self.phase != GamePhase::Waiting {
            return Err(RejectReason::GameNotWaiting.into());
        }
        if self.seats.len() != NUM_SEATS {
            return Err(RejectReason::NeedFourPlayers.into());
        }
        Ok(())
    }

    fn deal(&mut self) {
        for (seat, player) in self.seats.iter_mut().enumerate() {
            let count = if seat == 0 { DEALER_HAND_SIZE } else { HAND_SIZE };
            player.hand = self.stock.deal(count);
        }
        self.discard_pile.clear();
        self.current_seat = 0;
        // The dealer's 15th tile counts as a pre-drawn tile.
        self.turn = TurnState::AwaitingDiscard;
        self.turn_count = 0;
        self.result = None;
        self.phase = GamePhase::Playing;
    }

    /// The active okey face; `None` until dealt.
    pub fn okey(&self) -> Option<Face> {
        self.stock.okey
    }

    pub fn current_player(&self) -> Option<&PlayerState> {
        self.seats.get(self.current_seat as usize)
    }

    /// Top of the discard pile.
    pub fn discard_top(&self) -> Option<TileId> {
        self.discard_pile.last().copied()
    }
}
