//! Integration tests for the driver and simulator public API.

use okey_core::driver::{FirstTileDiscard, GameDriver, SeededDiscard};
use okey_core::seeding::SessionRng;
use okey_core::simulator::{run_batch_summary, BatchConfig};
use okey_engine::view::GameResult;

#[test]
fn driver_accessible_and_completes() {
    let mut driver = GameDriver::new(Some(42)).unwrap();
    let mut policy = FirstTileDiscard;
    let result = driver.run_to_completion(&mut policy).unwrap();
    assert!(driver.is_done());
    assert!(matches!(
        result,
        GameResult::Won { .. } | GameResult::Drawn { .. }
    ));
}

#[test]
fn session_driver_replays_identically() {
    let play = |discard_seed: u64| {
        let mut session = SessionRng::new([42u8; 32]);
        let mut driver = GameDriver::new_with_session(&mut session).unwrap();
        let mut policy = SeededDiscard::new(discard_seed);
        driver.run_to_completion(&mut policy).unwrap();
        (driver.steps(), driver.game().stock.stock_digest.clone())
    };
    assert_eq!(play(5), play(5));
}

#[test]
fn batch_summary_accounts_for_every_game() {
    let summary = run_batch_summary(&BatchConfig {
        num_games: 6,
        base_seed: Some(99),
        num_threads: Some(2),
    })
    .unwrap();
    assert_eq!(summary.games, 6);
    assert_eq!(summary.wins + summary.draws, 6);
}
