//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the 3D falling-block game: the settled-block
//! grid, piece shapes and rotation, spawn selection, and the engine state
//! machine that ties them together. It has no dependencies on rendering,
//! terminal I/O or wall-clock time; the host passes the current time into
//! [`Engine::tick`].
//!
//! # Module Structure
//!
//! - [`grid`]: width x depth x height volume with slice clearing
//! - [`pieces`]: shape masks, standard definitions, quarter-turn rotation about three axes
//! - [`engine`]: gravity, command validation, locking, spawning, game over
//! - [`rng`]: cyclic or seeded-random spawn selection
//! - [`config`]: JSON-loadable engine configuration
//! - [`snapshot`]: read-only per-frame view for presentation layers
//!
//! # Example
//!
//! ```
//! use tetris3d_core::{Engine, EngineConfig, Phase};
//! use tetris3d_types::{Axis, Command, Turn};
//!
//! let mut engine = Engine::new(&EngineConfig::default()).unwrap();
//! engine.start();
//!
//! engine.apply(Command::MoveBackward);
//! engine.apply(Command::Rotate(Axis::Y, Turn::Positive));
//! engine.apply(Command::HardDropOrSpawn);
//!
//! assert_eq!(engine.phase(), Phase::Falling);
//! assert_eq!(engine.grid().occupied_count(), 4);
//! ```
//!
//! # Timing
//!
//! Gravity is gated by elapsed wall-clock milliseconds, not by frame count:
//! call [`Engine::tick`] every frame and the piece falls one cell per
//! `gravity_interval_ms` (500ms by default).

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use tetris3d_types as types;

// Re-export commonly used types for convenience
pub use config::{EngineConfig, PieceConfig};
pub use engine::{Engine, LockEvent, Phase};
pub use error::CoreError;
pub use grid::{Grid, GridDims};
pub use pieces::{standard_pieces, Piece, PieceDef, Rotation3, ShapeMask};
pub use rng::{SimpleRng, SpawnSelector};
pub use snapshot::{ActiveSnapshot, CellList, GameSnapshot};
