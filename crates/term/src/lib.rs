//! Terminal "game renderer" module.
//!
//! Renders an engine snapshot into a simple framebuffer that is flushed to
//! the terminal with crossterm. The volume is shown as three orthographic
//! projections side by side: front (x/y), side (z/y) and top (x/z).
//!
//! Goals:
//! - Keep `core` deterministic and free of rendering types
//! - Keep view code pure so it can be unit-tested without a terminal
//! - Allow precise control over aspect ratio (2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetris3d_core as core;
pub use tetris3d_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{color_rgb, AnchorY, GameView, Projection, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
