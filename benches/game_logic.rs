use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetris3d::core::{standard_pieces, Engine, EngineConfig, GameSnapshot, Grid, Piece};
use tetris3d::term::{FrameBuffer, GameView, Viewport};
use tetris3d::types::{Axis, Command, PieceColor, SpawnMode, Turn};

fn started_engine() -> Engine {
    let config = EngineConfig {
        spawn_mode: SpawnMode::Cyclic,
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(&config).unwrap();
    engine.start();
    engine
}

fn bench_tick(c: &mut Criterion) {
    let mut engine = started_engine();
    let mut now = 0u64;

    c.bench_function("engine_tick_16ms", |b| {
        b.iter(|| {
            now += 16;
            if engine.game_over() {
                engine.restart();
            }
            engine.tick(black_box(now));
        })
    });
}

fn bench_slice_clear(c: &mut Criterion) {
    c.bench_function("clear_4_slices", |b| {
        b.iter(|| {
            let mut grid = Grid::new(4, 4, 10).unwrap();
            for y in 0..4 {
                for z in 0..4 {
                    for x in 0..4 {
                        let _ = grid.set(x, y, z, Some(PieceColor::Cyan));
                    }
                }
            }
            black_box(grid.clear_full_slices());
        })
    });
}

fn bench_world_cells(c: &mut Criterion) {
    let defs = standard_pieces();
    let piece = Piece::spawn(&defs[5], Grid::new(4, 4, 10).unwrap().dims())
        .rotated(Axis::Y, 90)
        .and_then(|p| p.rotated(Axis::X, 270))
        .unwrap();

    c.bench_function("world_cells_rotated", |b| {
        b.iter(|| black_box(&piece).world_cells().count())
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut engine = started_engine();

    c.bench_function("try_move", |b| {
        b.iter(|| {
            engine.try_move(0, 0, black_box(1));
            engine.try_move(0, 0, black_box(-1));
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut engine = started_engine();
    engine.try_move(0, -3, 0);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            engine.apply(black_box(Command::Rotate(Axis::Z, Turn::Positive)));
        })
    });
}

fn bench_snapshot_and_render(c: &mut Criterion) {
    let mut engine = started_engine();
    engine.hard_drop();
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("snapshot_and_render_80x24", |b| {
        b.iter(|| {
            engine.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(80, 24), &mut fb);
            black_box(fb.cells().len());
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_slice_clear,
    bench_world_cells,
    bench_try_move,
    bench_rotate,
    bench_snapshot_and_render
);
criterion_main!(benches);
