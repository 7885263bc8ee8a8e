//! Property-based invariant tests for the engine.
//!
//! Uses proptest to generate random seeds, plays full games with
//! pseudo-random discards, and verifies core invariants at every step.

use okey_core::driver::{GameDriver, SeededDiscard};
use okey_engine::action::GamePhase;
use okey_engine::state::GameState;
use okey_engine::tile::DECK_SIZE;
use okey_engine::view::GameResult;
use proptest::prelude::*;

/// The multiset union of every zone must reconstruct the full deck.
fn assert_deck_conserved(game: &GameState) {
    let mut seen = [false; DECK_SIZE];
    let mut mark = |id: u8| {
        assert!(!seen[id as usize], "tile {id} appears in two zones");
        seen[id as usize] = true;
    };
    mark(game.stock.indicator.expect("indicator set while playing").id());
    for tile in &game.stock.tiles {
        mark(tile.id());
    }
    for tile in &game.discard_pile {
        mark(tile.id());
    }
    for seat in &game.seats {
        for tile in &seat.hand {
            mark(tile.id());
        }
    }
    let total = seen.iter().filter(|&&s| s).count();
    assert_eq!(total, DECK_SIZE, "a tile vanished from play");
}

fn play_checked(seed: u64) -> (GameDriver, u32) {
    let mut driver = GameDriver::new(Some(seed)).expect("driver start");
    let mut policy = SeededDiscard::new(seed);
    let mut steps = 0u32;

    assert_deck_conserved(driver.game());
    loop {
        let continued = driver.step_once(&mut policy).expect("legal step");
        steps += 1;
        assert_deck_conserved(driver.game());
        assert!(driver.game().current_seat < 4);
        if !continued {
            break;
        }
    }
    (driver, steps)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Conservation, seat bounds, termination, and result consistency
    /// across random full games.
    #[test]
    fn full_game_invariants(seed in 0u64..1_000_000) {
        let (driver, steps) = play_checked(seed);

        prop_assert!(driver.is_done(), "game did not terminate");
        prop_assert!(steps > 4, "game too short to be real");
        prop_assert_eq!(driver.game().phase, GamePhase::Finished);

        match driver.result() {
            Some(GameResult::Won { seat, score, .. }) => {
                prop_assert!(*seat < 4);
                prop_assert!(*score >= 100);
            }
            Some(GameResult::Drawn { penalties }) => {
                prop_assert_eq!(penalties.len(), 4);
                prop_assert!(driver.game().stock.is_empty(),
                    "drawn game must have an empty stock");
            }
            other => prop_assert!(false, "unexpected terminal record: {:?}", other),
        }
    }

    /// The turn pointer advances strictly 0,1,2,3,0,... over discards.
    #[test]
    fn seats_cycle_in_order(seed in 0u64..100_000) {
        let mut driver = GameDriver::new(Some(seed)).expect("driver start");
        let mut policy = SeededDiscard::new(seed ^ 0xDEAD_BEEF);

        let mut last_seat = driver.game().current_seat;
        while driver.step_once(&mut policy).expect("legal step") {
            let seat = driver.game().current_seat;
            prop_assert!(
                seat == last_seat || seat == (last_seat + 1) % 4,
                "turn jumped from {} to {}", last_seat, seat
            );
            last_seat = seat;
        }
    }
}
