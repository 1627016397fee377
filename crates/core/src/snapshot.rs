//! Snapshot module - read-only copy of the engine state for one frame
//!
//! Presentation layers render from a [`GameSnapshot`] and never touch the
//! engine directly. [`crate::Engine::snapshot_into`] refills an existing
//! snapshot so a render loop can reuse its buffers.

use arrayvec::ArrayVec;

use crate::engine::Phase;
use crate::grid::GridDims;
use crate::pieces::{Piece, Rotation3, ShapeMask};
use crate::types::{Cell, Coord, PieceColor, MAX_PIECE_CELLS};

pub type CellList = ArrayVec<Coord, MAX_PIECE_CELLS>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub color: PieceColor,
    pub mask: ShapeMask,
    pub position: Coord,
    pub rotation: Rotation3,
    pub cells: CellList,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            color: value.color,
            mask: value.mask.clone(),
            position: value.position,
            rotation: value.rotation,
            cells: value.world_cells().collect(),
        }
    }
}

/// Read-only view of the engine for one frame
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub dims: GridDims,
    /// Same layout as [`crate::Grid::cells`]
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    /// Where the live piece would settle after a hard drop
    pub ghost: CellList,
    pub next_color: Option<PieceColor>,
    pub phase: Phase,
    pub paused: bool,
    pub game_over: bool,
    pub piece_id: u32,
    pub episode_id: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.dims = GridDims::default();
        self.cells.clear();
        self.active = None;
        self.ghost.clear();
        self.next_color = None;
        self.phase = Phase::Ready;
        self.paused = false;
        self.game_over = false;
        self.piece_id = 0;
        self.episode_id = 0;
    }

    pub fn cell(&self, x: i32, y: i32, z: i32) -> Cell {
        self.dims
            .index(x, y, z)
            .and_then(|idx| self.cells.get(idx).copied().flatten())
    }

    pub fn occupied(&self) -> impl Iterator<Item = (Coord, PieceColor)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.map(|color| (self.dims.coord_of(idx), color)))
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Falling && !self.paused
    }
}
