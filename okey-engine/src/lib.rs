//! Okey rules and state engine.
//!
//! Pure, synchronous four-player Okey: deck construction and dealing,
//! the draw/discard turn machine, winning-hand detection, scoring, and
//! terminal-condition handling. Rooms, seeding, and simulation live in
//! `okey-core`; transport and presence are someone else's problem.

pub mod action;
pub mod errors;
pub mod meld;
pub mod rule;
pub mod score;
pub mod state;
pub mod tile;
pub mod view;

pub use action::{Command, GamePhase, TurnState};
pub use errors::{HandFault, OkeyError, OkeyResult, RejectReason};
pub use meld::{evaluate_hand, WinType, HAND_SIZE};
pub use rule::{GameRule, IsolatedTilePenalty, PenaltyPolicy};
pub use score::score_hand;
pub use state::commands::{CommandOutcome, DrawnTile, LeaveOutcome};
pub use state::player::{PlayerId, PlayerState};
pub use state::{GameState, NUM_SEATS};
pub use tile::{build_deck, Color, Face, TileId, DECK_SIZE};
pub use view::{GameResult, TableView};
