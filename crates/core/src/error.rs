//! Construction and configuration errors.
//!
//! Rejected moves and rotations are not errors: the engine reports them as a
//! `false` return. Everything here is raised while building a grid, a piece
//! definition or an engine, and is not meant to be recovered from at runtime.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("grid dimensions must be positive, got {width}x{depth}x{height}")]
    InvalidDimensions { width: u16, depth: u16, height: u16 },

    #[error("cell ({x}, {y}, {z}) is outside the {width}x{depth}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        z: i32,
        width: u16,
        depth: u16,
        height: u16,
    },

    #[error("piece mask has no occupied cells")]
    EmptyMask,

    #[error("piece mask row {row} has {len} cells, expected {expected}")]
    RaggedMask {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("piece mask value {value} at row {row}, column {col} is not 0 or 1")]
    InvalidMaskValue { row: usize, col: usize, value: u8 },

    #[error("piece mask is {width}x{height}, the limit is {max}x{max}")]
    MaskTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("{color} piece is {width}x{height} and does not fit a grid face of {grid_width}x{grid_height}")]
    PieceTooLarge {
        color: &'static str,
        width: usize,
        height: usize,
        grid_width: u16,
        grid_height: u16,
    },

    #[error("at least one piece definition is required")]
    NoPieces,

    #[error("gravity interval must be positive")]
    InvalidGravityInterval,

    #[error("grid is {actual_width}x{actual_depth}x{actual_height} but the config expects {width}x{depth}x{height}")]
    GridMismatch {
        width: u16,
        depth: u16,
        height: u16,
        actual_width: u16,
        actual_depth: u16,
        actual_height: u16,
    },

    #[error("invalid engine config: {0}")]
    Config(#[from] serde_json::Error),
}
