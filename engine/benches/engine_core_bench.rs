// engine/benches/engine_core_bench.rs
#![forbid(unsafe_code)]

/**
 * Core engine micro-benchmarks.
 *
 * Focus:
 * - Tick kernel under autopilot steering (`Game::tick`)
 * - Item placement on a nearly full board (sampling then scan fallback)
 * - Autopilot decision latency and frame rendering on a grown snake
 */
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use snake_engine::{AutopilotInput, Board, Cell, Game, ItemPlacer, TrashKind};

fn build_grown_game(seed: u64) -> Game {
    let mut g = Game::new(seed);
    g.start();
    for _ in 0..400 {
        if g.is_over() || g.len() >= 20 {
            break;
        }
        if let Some(d) = AutopilotInput::choose(&g) {
            g.set_direction(d);
        }
        g.tick();
    }
    g
}

fn crowded_board(width: usize, height: usize, free: usize) -> Board {
    let mut b = Board::new(width, height);
    let total = width * height;
    for i in 0..total.saturating_sub(free) {
        b.occupy(Cell::new((i % width) as i32, (i / width) as i32));
    }
    b
}

fn bench_tick_autopilot(c: &mut Criterion) {
    c.bench_function("engine.tick.autopilot_256", |b| {
        b.iter_batched(
            || {
                let mut g = Game::new(20260228);
                g.start();
                g
            },
            |mut g| {
                for _ in 0..256 {
                    if g.is_over() {
                        break;
                    }
                    if let Some(d) = AutopilotInput::choose(&g) {
                        g.set_direction(d);
                    }
                    black_box(g.tick());
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_placement(c: &mut Criterion) {
    let kinds = TrashKind::defaults();

    let sparse = Board::new(24, 16);
    c.bench_function("placement.sparse_board", |b| {
        let mut placer = ItemPlacer::new(7);
        b.iter(|| black_box(placer.place(&sparse, &kinds)));
    });

    let crowded = crowded_board(24, 16, 2);
    c.bench_function("placement.crowded_board_scan", |b| {
        let mut placer = ItemPlacer::new(7);
        b.iter(|| black_box(placer.place(&crowded, &kinds)));
    });
}

fn bench_autopilot_and_render(c: &mut Criterion) {
    let g = build_grown_game(1234);

    c.bench_function("input.autopilot.choose", |b| {
        b.iter(|| black_box(AutopilotInput::choose(&g)));
    });

    c.bench_function("engine.render_ascii", |b| {
        b.iter(|| black_box(g.render_ascii()));
    });
}

criterion_group!(
    engine_core_benches,
    bench_tick_autopilot,
    bench_placement,
    bench_autopilot_and_render
);
criterion_main!(engine_core_benches);
