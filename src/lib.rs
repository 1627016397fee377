//! tetris3d (workspace facade crate).
//!
//! Re-exports the workspace crates under `tetris3d::{core,input,term,types}`
//! and hosts the headless [`sim`] driver used by the binary and tests.

pub use tetris3d_core as core;
pub use tetris3d_input as input;
pub use tetris3d_term as term;
pub use tetris3d_types as types;

pub mod sim;
