//! Integration tests for the room directory's public API, including the
//! single-writer guarantee under concurrent commands.

use std::sync::Arc;
use std::thread;

use okey_core::rooms::{RoomDirectory, RoomError};
use okey_engine::action::Command;
use okey_engine::state::commands::CommandOutcome;
use okey_engine::state::player::PlayerId;
use okey_engine::GamePhase;

fn pid(n: usize) -> PlayerId {
    PlayerId::new(format!("conn-{n}"))
}

fn started_room(directory: &RoomDirectory) -> String {
    let code = directory.create_room(pid(0), "Host").unwrap();
    for n in 1..4 {
        directory
            .join(&code, pid(n), format!("Guest {n}"))
            .unwrap();
    }
    directory.command(&code, &pid(0), Command::Start).unwrap();
    code
}

#[test]
fn full_table_lifecycle_over_the_directory() {
    let directory = RoomDirectory::default();
    let code = started_room(&directory);

    // Seat 0 opens; seat 1 picks the discard up.
    let opening = directory
        .with_room(&code, |room| room.game.seats[0].hand[0])
        .unwrap();
    directory
        .command(&code, &pid(0), Command::Discard { tile: opening })
        .unwrap();
    let outcome = directory
        .command(&code, &pid(1), Command::DrawFromDiscard)
        .unwrap();
    assert!(matches!(outcome, CommandOutcome::Drawn { tile, .. } if tile == opening));

    // Views through the directory stay private.
    let view = directory
        .with_room(&code, |room| room.game.view(Some(&pid(1))))
        .unwrap();
    assert_eq!(view.hand.unwrap().len(), 15);
}

#[test]
fn concurrent_commands_serialize_per_room() {
    let directory = Arc::new(RoomDirectory::default());
    let code = started_room(&directory);

    let opening = directory
        .with_room(&code, |room| room.game.seats[0].hand[0])
        .unwrap();
    directory
        .command(&code, &pid(0), Command::Discard { tile: opening })
        .unwrap();

    // Four threads race draw commands for the same room; exactly one can
    // be legal, and the serialized game must end in a consistent state.
    let mut handles = Vec::new();
    for n in 0..4 {
        let directory = Arc::clone(&directory);
        let code = code.clone();
        handles.push(thread::spawn(move || {
            directory.command(&code, &pid(n), Command::DrawFromStock)
        }));
    }
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one racing draw may win");

    let (stock_len, hand_sizes) = directory
        .with_room(&code, |room| {
            let sizes: Vec<usize> = room.game.seats.iter().map(|s| s.hand.len()).collect();
            (room.game.stock.len(), sizes)
        })
        .unwrap();
    assert_eq!(stock_len, 47);
    assert_eq!(hand_sizes.iter().sum::<usize>(), 14 + 14 * 3 + 1);
}

#[test]
fn room_listing_serializes_for_transport() {
    let directory = RoomDirectory::default();
    let code = directory.create_room(pid(0), "Host").unwrap();

    let json = serde_json::to_value(directory.list_rooms()).unwrap();
    assert_eq!(json[0]["code"], code);
    assert_eq!(json[0]["players"], 1);
    assert_eq!(json[0]["started"], false);
}

#[test]
fn rooms_are_independent() {
    let directory = RoomDirectory::default();
    let a = started_room(&directory);
    let b = directory.create_room(pid(10), "Second host").unwrap();
    assert_ne!(a, b);

    // Aborting room A leaves room B untouched.
    directory.leave(&a, &pid(1)).unwrap();
    assert_eq!(
        directory.command(&a, &pid(0), Command::DrawFromStock).unwrap_err(),
        RoomError::NotFound
    );
    let phase = directory.with_room(&b, |room| room.game.phase).unwrap();
    assert_eq!(phase, GamePhase::Waiting);
}
