//! Command handling: draw, discard, finish, departure, termination.
//!
//! Every handler follows the same shape: resolve the acting player to a
//! seat, check every precondition before touching anything, then mutate.
//! A rejected command therefore never leaves partial state behind.

use crate::action::{Command, GamePhase, TurnState};
use crate::errors::{OkeyError, OkeyResult, RejectReason};
use crate::meld::{evaluate_hand, HAND_SIZE};
use crate::score::score_hand;
use crate::state::player::PlayerId;
use crate::state::{GameState, NUM_SEATS};
use crate::tile::{Face, TileId};
use crate::view::{GameResult, SeatPenalty};

/// What a successfully applied command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Started,
    Drawn { tile: TileId, stock_exhausted: bool },
    Discarded,
    Finished(GameResult),
}

/// Result of a departure event. Departure is infallible and idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// Removed from a table that had not started.
    Unseated,
    /// Departure aborted a running game.
    Terminated,
    /// The game was already over; nothing changed.
    AlreadyOver,
    /// The player was not seated here.
    NotSeated,
}

impl GameState {
    /// Single dispatch entry: apply one command on behalf of `player`.
    pub fn apply(&mut self, player: &PlayerId, command: Command) -> OkeyResult<CommandOutcome> {
        match command {
            Command::Start => {
                self.seat_of(player).ok_or(RejectReason::NotSeated)?;
                self.start()?;
                Ok(CommandOutcome::Started)
            }
            Command::DrawFromStock => {
                let drawn = self.draw_from_stock(player)?;
                Ok(CommandOutcome::Drawn {
                    tile: drawn.tile,
                    stock_exhausted: drawn.stock_exhausted,
                })
            }
            Command::DrawFromDiscard => {
                let tile = self.draw_from_discard(player)?;
                Ok(CommandOutcome::Drawn {
                    tile,
                    stock_exhausted: false,
                })
            }
            Command::Discard { tile } => {
                self.discard(player, tile)?;
                Ok(CommandOutcome::Discarded)
            }
            Command::Finish => {
                let result = self.finish(player)?;
                Ok(CommandOutcome::Finished(result))
            }
        }
    }

    /// Draw the top stock tile. If that empties the stock, the game ends
    /// as a draw on the spot -- before the drawer could call a finish.
    pub fn draw_from_stock(&mut self, player: &PlayerId) -> OkeyResult<DrawnTile> {
        let seat = self.require_turn(player)?;
        if self.turn != TurnState::AwaitingDraw {
            return Err(RejectReason::NotAwaitingDraw.into());
        }
        if self.stock.is_empty() {
            return Err(RejectReason::StockEmpty.into());
        }
        let tile = self.stock.draw().ok_or_else(|| OkeyError::InvalidState {
            message: "stock emptied between check and draw".to_owned(),
        })?;
        self.seats[seat as usize].hand.push(tile);
        self.turn = TurnState::AwaitingDiscard;

        let stock_exhausted = self.stock.is_empty();
        if stock_exhausted {
            self.terminate_drawn()?;
        }
        Ok(DrawnTile {
            tile,
            stock_exhausted,
        })
    }

    /// Take the most recent discard into the hand.
    pub fn draw_from_discard(&mut self, player: &PlayerId) -> OkeyResult<TileId> {
        let seat = self.require_turn(player)?;
        if self.turn != TurnState::AwaitingDraw {
            return Err(RejectReason::NotAwaitingDraw.into());
        }
        let tile = self
            .discard_pile
            .pop()
            .ok_or(RejectReason::DiscardPileEmpty)?;
        self.seats[seat as usize].hand.push(tile);
        self.turn = TurnState::AwaitingDiscard;
        Ok(tile)
    }

    /// Discard one tile from the hand; the turn passes to the next seat.
    pub fn discard(&mut self, player: &PlayerId, tile: TileId) -> OkeyResult<()> {
        let seat = self.require_turn(player)?;
        if self.turn != TurnState::AwaitingDiscard {
            return Err(RejectReason::NotAwaitingDiscard.into());
        }
        let taken = self.seats[seat as usize]
            .take(tile)
            .ok_or(RejectReason::TileNotInHand)?;
        self.discard_pile.push(taken);
        self.current_seat = (seat + 1) % NUM_SEATS as u8;
        self.turn = TurnState::AwaitingDraw;
        self.turn_count += 1;
        Ok(())
    }

    /// Declare a win with the current 14-tile hand. On success the game
    /// is over; on an invalid hand nothing changes and play continues.
    pub fn finish(&mut self, player: &PlayerId) -> OkeyResult<GameResult> {
        let seat = self.require_turn(player)?;
        let hand = &self.seats[seat as usize].hand;
        if hand.len() != HAND_SIZE {
            return Err(RejectReason::HandNotFourteen.into());
        }
        let okey = self.require_okey()?;
        let win_type = evaluate_hand(hand, okey)?;
        let score = score_hand(hand, okey, win_type, &self.rule);

        let winner = &self.seats[seat as usize];
        let result = GameResult::Won {
            seat,
            player: winner.id.clone(),
            name: winner.name.clone(),
            score,
            win_type,
        };
        self.result = Some(result.clone());
        self.phase = GamePhase::Finished;
        Ok(result)
    }

    /// A seat left the table. During play this aborts the game; before
    /// play it frees the seat; after the end it is a no-op, so delivering
    /// the event twice is harmless.
    pub fn leave(&mut self, player: &PlayerId) -> LeaveOutcome {
        match self.phase {
            GamePhase::Waiting => match self.seat_of(player) {
                Some(seat) => {
                    self.seats.remove(seat as usize);
                    LeaveOutcome::Unseated
                }
                None => LeaveOutcome::NotSeated,
            },
            GamePhase::Playing => match self.seat_of(player) {
                Some(seat) => {
                    let departed = &self.seats[seat as usize];
                    self.result = Some(GameResult::Abandoned {
                        seat,
                        player: departed.id.clone(),
                        name: departed.name.clone(),
                    });
                    self.phase = GamePhase::Finished;
                    LeaveOutcome::Terminated
                }
                None => LeaveOutcome::NotSeated,
            },
            GamePhase::Finished => LeaveOutcome::AlreadyOver,
        }
    }

    /// End the game as a draw: no winner, one penalty entry per seat,
    /// worst hand first.
    fn terminate_drawn(&mut self) -> OkeyResult<()> {
        let okey = self.require_okey()?;
        let mut penalties: Vec<SeatPenalty> = self
            .seats
            .iter()
            .enumerate()
            .map(|(seat, p)| SeatPenalty {
                seat: seat as u8,
                player: p.id.clone(),
                penalty: self.rule.penalty.penalty(&p.hand, okey),
            })
            .collect();
        penalties.sort_by(|a, b| b.penalty.cmp(&a.penalty).then(a.seat.cmp(&b.seat)));
        self.result = Some(GameResult::Drawn { penalties });
        self.phase = GamePhase::Finished;
        Ok(())
    }

    /// Resolve `player` to a seat and confirm it is their turn in a
    /// running game.
    fn require_turn(&self, player: &PlayerId) -> OkeyResult<u8> {
        if self.phase != GamePhase::Playing {
            return Err(RejectReason::GameNotPlaying.into());
        }
        let seat = self.seat_of(player).ok_or(RejectReason::NotSeated)?;
        if seat != self.current_seat {
            return Err(RejectReason::NotYourTurn.into());
        }
        Ok(seat)
    }

    fn require_okey(&self) -> OkeyResult<Face> {
        self.stock.okey.ok_or_else(|| OkeyError::InvalidState {
            message: "okey face missing while playing".to_owned(),
        })
    }
}

/// A successful stock draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawnTile {
    pub tile: TileId,
    /// The draw emptied the stock and ended the game as a draw.
    pub stock_exhausted: bool,
}
