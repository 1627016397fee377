//! GameView: maps an engine [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! A terminal is flat, so the volume is drawn as three orthographic
//! projections. Each projection cell shows, in priority order, the live
//! piece, its ghost, or the nearest settled block along the line of sight,
//! darkened with distance.

use crate::core::{GameSnapshot, Phase};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Coord, PieceColor};

/// Columns between two projection frames.
const PANEL_GAP: u16 = 2;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// One orthographic view of the volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Projection {
    /// Looking along +z: columns are x, rows are y.
    Front,
    /// Looking along +x: columns are z, rows are y.
    Side,
    /// Looking down: columns are x, rows are z (far side at the top).
    Top,
}

impl Projection {
    pub const ALL: [Projection; 3] = [Projection::Front, Projection::Side, Projection::Top];

    pub fn title(self) -> &'static str {
        match self {
            Projection::Front => "FRONT",
            Projection::Side => "SIDE",
            Projection::Top => "TOP",
        }
    }

    /// Columns and rows of the projected image, in grid cells.
    pub fn extent(self, snap: &GameSnapshot) -> (u16, u16) {
        let d = snap.dims;
        match self {
            Projection::Front => (d.width, d.height),
            Projection::Side => (d.depth, d.height),
            Projection::Top => (d.width, d.depth),
        }
    }

    /// Screen column/row (row 0 at the top) of a world coordinate.
    fn screen_of(self, snap: &GameSnapshot, (x, y, z): Coord) -> (i32, i32) {
        let height = snap.dims.height as i32;
        let depth = snap.dims.depth as i32;
        match self {
            Projection::Front => (x, height - 1 - y),
            Projection::Side => (z, height - 1 - y),
            Projection::Top => (x, depth - 1 - z),
        }
    }

    /// World coordinate at distance `i` from the viewer behind screen cell `(col, row)`.
    fn probe(self, snap: &GameSnapshot, col: i32, row: i32, i: i32) -> Coord {
        let height = snap.dims.height as i32;
        let depth = snap.dims.depth as i32;
        match self {
            Projection::Front => (col, height - 1 - row, i),
            Projection::Side => (i, height - 1 - row, col),
            Projection::Top => (col, height - 1 - i, depth - 1 - row),
        }
    }

    /// Number of cells along the line of sight.
    fn span(self, snap: &GameSnapshot) -> u16 {
        let d = snap.dims;
        match self {
            Projection::Front => d.depth,
            Projection::Side => d.width,
            Projection::Top => d.height,
        }
    }
}

/// What a projection cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Empty,
    Settled { color: PieceColor, depth: u16, span: u16 },
    Ghost,
    Active(PieceColor),
}

fn sample(snap: &GameSnapshot, proj: Projection, col: u16, row: u16) -> Layer {
    let at = (col as i32, row as i32);

    if let Some(active) = &snap.active {
        if active.cells.iter().any(|&c| proj.screen_of(snap, c) == at) {
            return Layer::Active(active.color);
        }
    }
    if snap.ghost.iter().any(|&c| proj.screen_of(snap, c) == at) {
        return Layer::Ghost;
    }

    let span = proj.span(snap);
    (0..span)
        .find_map(|i| {
            let (x, y, z) = proj.probe(snap, at.0, at.1, i as i32);
            snap.cell(x, y, z).map(|color| Layer::Settled {
                color,
                depth: i,
                span,
            })
        })
        .unwrap_or(Layer::Empty)
}

/// Display color for a piece color.
pub fn color_rgb(color: PieceColor) -> Rgb {
    match color {
        PieceColor::Cyan => Rgb::new(80, 220, 220),
        PieceColor::Blue => Rgb::new(80, 120, 220),
        PieceColor::Orange => Rgb::new(255, 165, 0),
        PieceColor::Yellow => Rgb::new(240, 220, 80),
        PieceColor::Green => Rgb::new(100, 220, 120),
        PieceColor::Purple => Rgb::new(200, 120, 220),
        PieceColor::Red => Rgb::new(220, 80, 80),
    }
}

/// A lightweight terminal renderer for the 3D game.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Outer size of one projection frame, border included.
    pub fn frame_size(&self, snap: &GameSnapshot, proj: Projection) -> (u16, u16) {
        let (cols, rows) = proj.extent(snap);
        (
            cols.saturating_mul(self.cell_w).saturating_add(2),
            rows.saturating_mul(self.cell_h).saturating_add(2),
        )
    }

    /// Size of all three frames laid out side by side.
    pub fn board_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        Projection::ALL.iter().fold((0u16, 0u16), |(w, h), &proj| {
            let (fw, fh) = self.frame_size(snap, proj);
            let gap = if w == 0 { 0 } else { PANEL_GAP };
            (w.saturating_add(gap).saturating_add(fw), h.max(fh))
        })
    }

    /// Top-left corner of a projection frame in the viewport.
    pub fn frame_origin(&self, snap: &GameSnapshot, viewport: Viewport, proj: Projection) -> (u16, u16) {
        let (total_w, total_h) = self.board_size(snap);
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(total_h) / 2,
            AnchorY::Top => 0,
        };

        let mut x = viewport.width.saturating_sub(total_w) / 2;
        for &p in &Projection::ALL {
            if p == proj {
                break;
            }
            x = x
                .saturating_add(self.frame_size(snap, p).0)
                .saturating_add(PANEL_GAP);
        }
        (x, start_y)
    }

    /// Render the current snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        for proj in Projection::ALL {
            let (ox, oy) = self.frame_origin(snap, viewport, proj);
            self.draw_projection(fb, snap, proj, ox, oy);
        }

        let (start_x, start_y) = self.frame_origin(snap, viewport, Projection::Front);
        let (total_w, _) = self.board_size(snap);
        self.draw_side_panel(fb, snap, viewport, start_x.saturating_add(total_w), start_y);

        let (front_w, front_h) = self.frame_size(snap, Projection::Front);
        let overlay = if snap.paused {
            Some("PAUSED")
        } else {
            match snap.phase {
                Phase::Ready => Some("READY"),
                Phase::GameOver => Some("GAME OVER"),
                Phase::Falling => None,
            }
        };
        if let Some(text) = overlay {
            self.draw_overlay_text(fb, start_x, start_y, front_w, front_h, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_projection(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        proj: Projection,
        ox: u16,
        oy: u16,
    ) {
        let (cols, rows) = proj.extent(snap);
        let (frame_w, frame_h) = self.frame_size(snap, proj);

        let bg = CellStyle::plain(Rgb::new(80, 80, 90), BOARD_BG);
        let border = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

        let (inner_x, inner_y) = (ox.saturating_add(1), oy.saturating_add(1));
        fb.fill_rect(inner_x, inner_y, frame_w - 2, frame_h - 2, ' ', bg);
        self.draw_border(fb, ox, oy, frame_w, frame_h, border);
        fb.put_str(inner_x, oy, proj.title(), border.bold());

        for row in 0..rows {
            if self.cell_origin(ox, oy, 0, row).1 >= fb.height() {
                break;
            }
            for col in 0..cols {
                // Columns past the right edge are clipped anyway.
                if self.cell_origin(ox, oy, col, row).0 >= fb.width() {
                    break;
                }
                let (ch, style) = match sample(snap, proj, col, row) {
                    Layer::Active(color) => ('█', CellStyle::plain(color_rgb(color), BOARD_BG).bold()),
                    Layer::Ghost => ('░', CellStyle::plain(Rgb::new(140, 140, 140), BOARD_BG).dim()),
                    Layer::Settled { color, depth, span } => {
                        let shade = 4 * span as u32 - 2 * depth as u32;
                        let fg = color_rgb(color).scaled(shade, 5 * span as u32);
                        ('█', CellStyle::plain(fg, BOARD_BG))
                    }
                    Layer::Empty => ('·', CellStyle::plain(Rgb::new(90, 90, 100), BOARD_BG).dim()),
                };
                self.fill_cell_rect(fb, ox, oy, col, row, ch, style);
            }
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);
        fb.put_char(x, y, '┌', style);
        fb.put_char(right, y, '┐', style);
        fb.put_char(x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x.saturating_add(dx), y, '─', style);
            fb.put_char(x.saturating_add(dx), bottom, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y.saturating_add(dy), '│', style);
            fb.put_char(right, y.saturating_add(dy), '│', style);
        }
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        ox: u16,
        oy: u16,
        col: u16,
        row: u16,
        ch: char,
        style: CellStyle,
    ) {
        let (px, py) = self.cell_origin(ox, oy, col, row);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    /// Screen position of a grid cell inside the frame at `(ox, oy)`.
    fn cell_origin(&self, ox: u16, oy: u16, col: u16, row: u16) -> (u16, u16) {
        (
            ox.saturating_add(1)
                .saturating_add(col.saturating_mul(self.cell_w)),
            oy.saturating_add(1)
                .saturating_add(row.saturating_mul(self.cell_h)),
        )
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        board_right: u16,
        start_y: u16,
    ) {
        let panel_x = board_right.saturating_add(PANEL_GAP);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        let help = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        match snap.next_color {
            Some(color) => {
                let style = CellStyle::plain(color_rgb(color), PANEL_BG).bold();
                fb.put_str(panel_x, y, "██", style);
                fb.put_str(panel_x.saturating_add(3), y, color.as_str(), value);
            }
            None => fb.put_str(panel_x, y, "-", value),
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PIECES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.piece_id, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "EPISODE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.episode_id, value);
        y = y.saturating_add(2);

        for line in [
            "arrows/wasd move",
            "x y z  rotate -90",
            "X Y Z  rotate +90",
            "space  drop",
            "p pause  r reset",
            "q quit",
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}
