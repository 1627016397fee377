use tetris3d::core::{Engine, EngineConfig, GameSnapshot, GridDims, Phase};
use tetris3d::term::{color_rgb, AnchorY, FrameBuffer, GameView, Projection, Viewport};
use tetris3d::types::{PieceColor, SpawnMode};

fn cyclic_engine() -> Engine {
    let config = EngineConfig {
        spawn_mode: SpawnMode::Cyclic,
        ..EngineConfig::default()
    };
    Engine::new(&config).unwrap()
}

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_three_framed_projections() {
    let snap = cyclic_engine().snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);

    // 4x4x10 with 2x1 cells: front 10x12, side 10x12, top 10x6, gaps of 2.
    assert_eq!(view.board_size(&snap), (34, 12));
    let fb = view.render(&snap, Viewport::new(34, 12));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(9, 11).unwrap().ch, '┘');
    assert_eq!(fb.get(12, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(24, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(33, 5).unwrap().ch, '┘');

    let text = screen_text(&fb);
    assert!(text.contains("FRONT"));
    assert!(text.contains("SIDE"));
    assert!(text.contains("TOP"));
}

#[test]
fn term_view_renders_settled_cell_two_chars_wide() {
    let mut engine = cyclic_engine();
    engine.start();
    engine.hard_drop();
    let mut snap = engine.snapshot();
    snap.active = None;
    snap.ghost.clear();

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(34, 12));

    // Front view: cyan bar on the floor (row 9 inside the border).
    for x in 1..=8 {
        assert_eq!(fb.get(x, 10).unwrap().ch, '█', "front column {x}");
    }
    // Side view: the bar is one cell deep at z = 1.
    assert_eq!(fb.get(13, 10).unwrap().ch, '·');
    assert_eq!(fb.get(15, 10).unwrap().ch, '█');
    assert_eq!(fb.get(16, 10).unwrap().ch, '█');
    assert_eq!(fb.get(17, 10).unwrap().ch, '·');

    // Nearer blocks are brighter than far ones.
    let near = fb.get(1, 10).unwrap().style.fg;
    let full = color_rgb(PieceColor::Cyan);
    assert!(near.g < full.g);
}

#[test]
fn term_view_draws_active_and_ghost() {
    let mut engine = cyclic_engine();
    engine.start();
    let snap = engine.snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(34, 12));

    // Active cyan bar at the top row, ghost on the floor.
    let active = fb.get(1, 1).unwrap();
    assert_eq!(active.ch, '█');
    assert!(active.style.bold);
    assert_eq!(active.style.fg, color_rgb(PieceColor::Cyan));
    assert_eq!(fb.get(1, 10).unwrap().ch, '░');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut engine = cyclic_engine();
    engine.start();
    let snap = engine.snapshot();
    let view = GameView::default();

    let narrow = screen_text(&view.render(&snap, Viewport::new(34, 12)));
    assert!(!narrow.contains("NEXT"));

    let wide = screen_text(&view.render(&snap, Viewport::new(70, 16)));
    assert!(wide.contains("NEXT"));
    assert!(wide.contains("blue"));
    assert!(wide.contains("PIECES"));
    assert!(wide.contains("EPISODE"));
}

#[test]
fn term_view_centers_board_by_default() {
    let snap = cyclic_engine().snapshot();
    let view = GameView::default();
    let vp = Viewport::new(44, 20);

    // start = ((44 - 34) / 2, (20 - 12) / 2)
    assert_eq!(view.frame_origin(&snap, vp, Projection::Front), (5, 4));
    let fb = view.render(&snap, vp);
    assert_eq!(fb.get(5, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_overlays_phase() {
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(34, 12);

    let ready = cyclic_engine().snapshot();
    assert_eq!(ready.phase, Phase::Ready);
    assert!(screen_text(&view.render(&ready, vp)).contains("READY"));

    let mut engine = cyclic_engine();
    engine.start();
    engine.toggle_pause();
    assert!(screen_text(&view.render(&engine.snapshot(), vp)).contains("PAUSED"));

    let over = GameSnapshot {
        phase: Phase::GameOver,
        game_over: true,
        paused: false,
        ..engine.snapshot()
    };
    assert!(screen_text(&view.render(&over, vp)).contains("GAME OVER"));
}

#[test]
fn term_view_handles_tiny_viewport() {
    let dims = GridDims::new(8, 8, 20).unwrap();
    let snap = GameSnapshot {
        dims,
        cells: vec![None; dims.volume()],
        ..GameSnapshot::default()
    };
    let fb = GameView::default().render(&snap, Viewport::new(5, 3));
    assert_eq!(fb.width(), 5);
    assert_eq!(fb.height(), 3);
}
