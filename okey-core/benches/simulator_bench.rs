//! Criterion benchmarks: full-game throughput and winning-hand search.

use criterion::{criterion_group, criterion_main, Criterion};
use okey_core::simulator::{run_batch_summary, BatchConfig};
use okey_engine::meld::evaluate_hand;
use okey_engine::tile::{Color, Face, TileId, NUM_FACES};

fn tid(copy: u8, color: Color, rank: u8) -> TileId {
    let face = Face::new(color, rank).unwrap();
    TileId::new(copy * NUM_FACES as u8 + face.index() as u8).unwrap()
}

fn bench_batch(c: &mut Criterion) {
    c.bench_function("batch_10_games", |b| {
        b.iter(|| {
            let summary = run_batch_summary(&BatchConfig {
                num_games: 10,
                base_seed: Some(1),
                num_threads: Some(2),
            })
            .unwrap();
            assert_eq!(summary.games, 10);
        })
    });
}

fn bench_meld_search(c: &mut Criterion) {
    // A worst-case-ish near-miss: dense overlapping runs that force deep
    // backtracking before failing.
    let okey = Face::new(Color::Red, 13).unwrap();
    let hand: Vec<TileId> = vec![
        tid(0, Color::Yellow, 1),
        tid(1, Color::Yellow, 1),
        tid(0, Color::Yellow, 2),
        tid(1, Color::Yellow, 2),
        tid(0, Color::Yellow, 3),
        tid(1, Color::Yellow, 3),
        tid(0, Color::Yellow, 4),
        tid(1, Color::Yellow, 4),
        tid(0, Color::Yellow, 5),
        tid(1, Color::Yellow, 5),
        tid(0, Color::Yellow, 6),
        tid(1, Color::Yellow, 6),
        tid(0, Color::Yellow, 7),
        tid(0, Color::Yellow, 9),
    ];
    c.bench_function("meld_search_near_miss", |b| {
        b.iter(|| {
            let _ = evaluate_hand(&hand, okey);
        })
    });
}

criterion_group!(benches, bench_batch, bench_meld_search);
criterion_main!(benches);
