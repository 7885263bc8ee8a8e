//! Room directory: creation, joining, leaving, and per-room command
//! serialization.
//!
//! Each room's game lives behind its own mutex, so commands for one room
//! apply strictly one at a time while distinct rooms proceed in
//! parallel. The directory map itself is guarded separately and held
//! only for lookup, insert, and remove -- never across a game mutation.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use okey_engine::action::Command;
use okey_engine::rule::GameRule;
use okey_engine::state::commands::{CommandOutcome, LeaveOutcome};
use okey_engine::state::player::PlayerId;
use okey_engine::state::GameState;
use okey_engine::view::TableView;
use okey_engine::OkeyError;
use parking_lot::Mutex;
use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

/// Room codes: six characters from A-Z and 0-9.
pub const ROOM_CODE_LEN: usize = 6;
const ROOM_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// One table plus its directory bookkeeping.
#[derive(Debug)]
pub struct Room {
    pub code: String,
    pub host: PlayerId,
    pub game: GameState,
    pub created_at: Instant,
}

/// Public listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSummary {
    pub code: String,
    pub players: usize,
    pub started: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomError {
    NotFound,
    CodeTaken,
    NotHost,
    Game(OkeyError),
}

impl fmt::Display for RoomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomError::NotFound => f.write_str("room not found"),
            RoomError::CodeTaken => f.write_str("room code already in use"),
            RoomError::NotHost => f.write_str("only the host may start the game"),
            RoomError::Game(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for RoomError {}

impl From<OkeyError> for RoomError {
    fn from(err: OkeyError) -> Self {
        RoomError::Game(err)
    }
}

/// Outcome of a departure routed through the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveReport {
    pub outcome: LeaveOutcome,
    /// The room was removed from the directory.
    pub room_closed: bool,
    /// Hosting moved to another player.
    pub new_host: Option<PlayerId>,
}

/// All live rooms. Cheap to clone handles out of; every game mutation
/// happens under the owning room's lock.
pub struct RoomDirectory {
    rooms: Mutex<HashMap<String, Arc<Mutex<Room>>>>,
    rule: GameRule,
}

impl Default for RoomDirectory {
    fn default() -> Self {
        Self::new(GameRule::standard())
    }
}

impl RoomDirectory {
    pub fn new(rule: GameRule) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            rule,
        }
    }

    /// A fresh room code not currently in use.
    fn fresh_code(rooms: &HashMap<String, Arc<Mutex<Room>>>) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let code: String = (0..ROOM_CODE_LEN)
                .map(|_| {
                    let idx = rng.gen_range(0..ROOM_CODE_CHARSET.len());
                    ROOM_CODE_CHARSET[idx] as char
                })
                .collect();
            if !rooms.contains_key(&code) {
                return code;
            }
        }
    }

    /// Create a room with a generated code and seat the host in it.
    pub fn create_room(
        &self,
        host: PlayerId,
        name: impl Into<String>,
    ) -> Result<String, RoomError> {
        let mut rooms = self.rooms.lock();
        let code = Self::fresh_code(&rooms);
        self.insert_room(&mut rooms, code.clone(), host, name)?;
        Ok(code)
    }

    /// Create a room under a caller-chosen code.
    pub fn create_room_with_code(
        &self,
        code: impl Into<String>,
        host: PlayerId,
        name: impl Into<String>,
    ) -> Result<String, RoomError> {
        let code = code.into();
        let mut rooms = self.rooms.lock();
        if rooms.contains_key(&code) {
            return Err(RoomError::CodeTaken);
        }
        self.insert_room(&mut rooms, code.clone(), host, name)?;
        Ok(code)
    }

    fn insert_room(
        &self,
        rooms: &mut HashMap<String, Arc<Mutex<Room>>>,
        code: String,
        host: PlayerId,
        name: impl Into<String>,
    ) -> Result<(), RoomError> {
        let mut game = GameState::new(self.rule.clone(), None);
        game.join(host.clone(), name)?;
        let room = Room {
            code: code.clone(),
            host: host.clone(),
            game,
            created_at: Instant::now(),
        };
        rooms.insert(code.clone(), Arc::new(Mutex::new(room)));
        info!(code = %code, host = %host, "room created");
        Ok(())
    }

    fn room(&self, code: &str) -> Result<Arc<Mutex<Room>>, RoomError> {
        self.rooms
            .lock()
            .get(code)
            .cloned()
            .ok_or(RoomError::NotFound)
    }

    /// Seat a player in an existing room.
    pub fn join(
        &self,
        code: &str,
        player: PlayerId,
        name: impl Into<String>,
    ) -> Result<TableView, RoomError> {
        let room = self.room(code)?;
        let mut room = room.lock();
        room.game.join(player.clone(), name)?;
        info!(code = %code, player = %player, "player joined");
        Ok(room.game.view(Some(&player)))
    }

    /// Apply one game command on behalf of `player`, serialized with
    /// every other command for the same room.
    pub fn command(
        &self,
        code: &str,
        player: &PlayerId,
        command: Command,
    ) -> Result<CommandOutcome, RoomError> {
        let room = self.room(code)?;
        let mut room = room.lock();
        // Starting is the host's call; everything else is the engine's.
        if matches!(command, Command::Start) && &room.host != player {
            return Err(RoomError::NotHost);
        }
        let outcome = room.game.apply(player, command)?;
        Ok(outcome)
    }

    /// Run `f` inside the room's single-writer slot. For callers that
    /// need more than one engine call atomically (e.g. command + views).
    pub fn with_room<R>(&self, code: &str, f: impl FnOnce(&mut Room) -> R) -> Result<R, RoomError> {
        let room = self.room(code)?;
        let mut room = room.lock();
        Ok(f(&mut room))
    }

    /// A player left (or its connection died). Mid-game this aborts the
    /// game and closes the room; in the lobby it frees the seat, hands
    /// hosting over if needed, and dissolves the room when empty.
    /// Safe to deliver more than once.
    pub fn leave(&self, code: &str, player: &PlayerId) -> Result<LeaveReport, RoomError> {
        let room_arc = self.room(code)?;
        let mut room = room_arc.lock();
        let outcome = room.game.leave(player);

        let mut new_host = None;
        let room_closed = match outcome {
            LeaveOutcome::Terminated | LeaveOutcome::AlreadyOver => {
                // Finished games are discarded, never reused.
                warn!(code = %code, player = %player, "game aborted by departure");
                true
            }
            LeaveOutcome::Unseated => {
                if room.game.seats.is_empty() {
                    true
                } else {
                    if &room.host == player {
                        let next = room.game.seats[0].id.clone();
                        room.host = next.clone();
                        new_host = Some(next);
                    }
                    false
                }
            }
            LeaveOutcome::NotSeated => false,
        };

        if room_closed {
            drop(room);
            self.rooms.lock().remove(code);
            info!(code = %code, "room closed");
        } else {
            info!(code = %code, player = %player, "player left");
        }

        Ok(LeaveReport {
            outcome,
            room_closed,
            new_host,
        })
    }

    /// Snapshot of every live room.
    pub fn list_rooms(&self) -> Vec<RoomSummary> {
        let rooms = self.rooms.lock();
        let mut summaries: Vec<RoomSummary> = rooms
            .values()
            .map(|room| {
                let room = room.lock();
                RoomSummary {
                    code: room.code.clone(),
                    players: room.game.seats.len(),
                    started: room.game.phase != okey_engine::GamePhase::Waiting,
                }
            })
            .collect();
        summaries.sort_by(|a, b| a.code.cmp(&b.code));
        summaries
    }

    /// The room a player is currently seated in, if any.
    pub fn find_player_room(&self, player: &PlayerId) -> Option<String> {
        let rooms = self.rooms.lock();
        for (code, room) in rooms.iter() {
            if room.lock().game.seat_of(player).is_some() {
                return Some(code.clone());
            }
        }
        None
    }
}
