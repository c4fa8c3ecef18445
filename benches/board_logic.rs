use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::BTreeSet;

use match3::core::collapse::collapse_columns;
use match3::core::matches::{all_matches, matches_through};
use match3::core::refill::Refiller;
use match3::core::rng::SeededSource;
use match3::core::Grid;
use match3::engine::{BoardEngine, BoardEvent};
use match3::types::{BoardConfig, Cell, PieceIdGen};

fn filled_grid(seed: u32) -> Grid {
    let mut grid = Grid::new(8, 8);
    let mut source = SeededSource::new(seed);
    let mut ids = PieceIdGen::new();
    Refiller::new(100)
        .fill_empty(&mut grid, &mut source, &mut ids, 3)
        .unwrap();
    grid
}

fn bench_full_scan(c: &mut Criterion) {
    let grid = filled_grid(12345);

    c.bench_function("all_matches_8x8", |b| {
        b.iter(|| all_matches(black_box(&grid), 3))
    });
}

fn bench_matches_through(c: &mut Criterion) {
    let grid = filled_grid(12345);

    c.bench_function("matches_through_center", |b| {
        b.iter(|| matches_through(black_box(&grid), Cell::new(4, 4), 3))
    });
}

fn bench_collapse(c: &mut Criterion) {
    let base = filled_grid(12345);
    let columns: BTreeSet<u8> = (0..8).collect();

    c.bench_function("collapse_after_row_clear", |b| {
        b.iter(|| {
            let mut grid = base.clone();
            for x in 0..8 {
                grid.take(Cell::new(x, 3)).unwrap();
            }
            collapse_columns(&mut grid, &columns).unwrap()
        })
    });
}

fn bench_initial_fill(c: &mut Criterion) {
    c.bench_function("initial_fill_8x8", |b| {
        b.iter(|| {
            let source = Box::new(SeededSource::new(12345));
            BoardEngine::new(BoardConfig::default(), source).unwrap()
        })
    });
}

fn bench_resolution_cycle(c: &mut Criterion) {
    // Find a swap the seeded board accepts, then benchmark replaying the
    // whole cycle from a cloned grid.
    let engine = BoardEngine::new(BoardConfig::default(), Box::new(SeededSource::new(9)))
        .unwrap();
    let base = engine.grid().clone();
    let config = engine.config();

    let mut accepted = None;
    'search: for x in 0..7u8 {
        for y in 0..8u8 {
            let a = Cell::new(x, y);
            let b = Cell::new(x + 1, y);
            let mut probe =
                BoardEngine::from_grid(config, base.clone(), Box::new(SeededSource::new(9)))
                    .unwrap();
            if probe.request_swap(a, b).is_err() {
                continue;
            }
            probe.run_until_idle().unwrap();
            if probe
                .drain_events()
                .iter()
                .any(|e| matches!(e, BoardEvent::SwapAccepted { .. }))
            {
                accepted = Some((a, b));
                break 'search;
            }
        }
    }
    let Some((a, b)) = accepted else {
        return;
    };

    c.bench_function("resolution_cycle", |bench| {
        bench.iter(|| {
            let mut engine =
                BoardEngine::from_grid(config, base.clone(), Box::new(SeededSource::new(9)))
                    .unwrap();
            let _ = engine.request_swap(black_box(a), black_box(b));
            engine.run_until_idle().unwrap();
            engine.drain_events()
        })
    });
}

criterion_group!(
    benches,
    bench_full_scan,
    bench_matches_through,
    bench_collapse,
    bench_initial_fill,
    bench_resolution_cycle
);
criterion_main!(benches);
