//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`]. It knows
//! nothing about the engine or the renderer; the binary feeds the resulting
//! commands to `Engine::apply`.

pub mod map;

pub use tetris3d_types as types;

pub use map::{handle_key_event, is_press, should_quit};
