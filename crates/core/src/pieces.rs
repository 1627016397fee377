//! Pieces module - shape masks, definitions and free-axis rotation
//!
//! A piece is a single flat mask placed in the `x/y` plane. Rotation state is
//! three axis angles in quarter turns; it is applied only when the mask is
//! turned into world cells, so every rotation state maps back to the same base
//! mask and a turn followed by its inverse restores the exact cells.

use arrayvec::ArrayVec;

use crate::error::CoreError;
use crate::grid::{Grid, GridDims};
use crate::types::{Axis, Coord, PieceColor, MAX_MASK_EXTENT, MAX_PIECE_CELLS};

/// Rectangular 0/1 mask. Row 0 is the lowest row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeMask {
    width: u8,
    height: u8,
    /// Row-major, index = row * width + col
    cells: ArrayVec<bool, MAX_PIECE_CELLS>,
}

impl ShapeMask {
    /// Build a mask from rows of 0/1 values, lowest row first
    ///
    /// The mask must be rectangular, at most 4x4, and contain at least one
    /// occupied cell.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, CoreError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if width == 0 {
            return Err(CoreError::EmptyMask);
        }

        for (row, values) in rows.iter().enumerate() {
            let len = values.as_ref().len();
            if len != width {
                return Err(CoreError::RaggedMask {
                    row,
                    len,
                    expected: width,
                });
            }
        }

        if width > MAX_MASK_EXTENT || height > MAX_MASK_EXTENT {
            return Err(CoreError::MaskTooLarge {
                width,
                height,
                max: MAX_MASK_EXTENT,
            });
        }

        let mut cells = ArrayVec::new();
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.as_ref().iter().enumerate() {
                match value {
                    0 => cells.push(false),
                    1 => cells.push(true),
                    _ => return Err(CoreError::InvalidMaskValue { row, col, value }),
                }
            }
        }

        if !cells.iter().any(|&filled| filled) {
            return Err(CoreError::EmptyMask);
        }

        Ok(Self {
            width: width as u8,
            height: height as u8,
            cells,
        })
    }

    /// Build one of the built-in masks without validation
    fn builtin(rows: &[&[u8]]) -> Self {
        let width = rows[0].len() as u8;
        let height = rows.len() as u8;
        let cells = rows
            .iter()
            .flat_map(|row| row.iter().map(|&value| value == 1))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether `(col, row)` is filled; false outside the mask
    pub fn get(&self, col: u8, row: u8) -> bool {
        if col >= self.width || row >= self.height {
            return false;
        }
        self.cells[row as usize * self.width as usize + col as usize]
    }

    /// Filled cells as `(col, row)`
    pub fn occupied(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(move |(idx, _)| ((idx % width) as u8, (idx / width) as u8))
    }

    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|&&filled| filled).count()
    }
}

/// A spawnable piece: mask plus color
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PieceDef {
    pub color: PieceColor,
    pub mask: ShapeMask,
}

impl PieceDef {
    pub fn new<R: AsRef<[u8]>>(color: PieceColor, rows: &[R]) -> Result<Self, CoreError> {
        Ok(Self {
            color,
            mask: ShapeMask::from_rows(rows)?,
        })
    }
}

/// The seven standard definitions, in [`PieceColor::ALL`] order
pub fn standard_pieces() -> Vec<PieceDef> {
    const SHAPES: [(PieceColor, &[&[u8]]); 7] = [
        (PieceColor::Cyan, &[&[1, 1, 1, 1]]),
        (PieceColor::Blue, &[&[1, 1, 1], &[1, 0, 0]]),
        (PieceColor::Orange, &[&[0, 0, 1], &[1, 1, 1]]),
        (PieceColor::Yellow, &[&[1, 1], &[1, 1]]),
        (PieceColor::Green, &[&[0, 1, 1], &[1, 1, 0]]),
        (PieceColor::Purple, &[&[1, 1, 1], &[0, 1, 0]]),
        (PieceColor::Red, &[&[1, 1, 0], &[0, 1, 1]]),
    ];

    SHAPES
        .iter()
        .map(|&(color, rows)| PieceDef {
            color,
            mask: ShapeMask::builtin(rows),
        })
        .collect()
}

/// Rotation state: one angle per axis in degrees, always one of 0, 90, 180, 270
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rotation3 {
    pub x: u16,
    pub y: u16,
    pub z: u16,
}

impl Rotation3 {
    /// Add `delta_degrees` to one axis, wrapping mod 360.
    ///
    /// Returns None unless the delta is a multiple of 90.
    pub fn rotate(self, axis: Axis, delta_degrees: i32) -> Option<Self> {
        if delta_degrees % 90 != 0 {
            return None;
        }
        let delta = delta_degrees.rem_euclid(360);
        let wrap = |angle: u16| ((angle as i32 + delta) % 360) as u16;
        let mut next = self;
        match axis {
            Axis::X => next.x = wrap(self.x),
            Axis::Y => next.y = wrap(self.y),
            Axis::Z => next.z = wrap(self.z),
        }
        Some(next)
    }

    pub fn angle(&self, axis: Axis) -> u16 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Rotate an offset about the origin: Z first, then Y, then X.
    pub fn apply(&self, offset: Coord) -> Coord {
        let mut v = offset;
        for _ in 0..self.z / 90 {
            v = (-v.1, v.0, v.2);
        }
        for _ in 0..self.y / 90 {
            v = (v.2, v.1, -v.0);
        }
        for _ in 0..self.x / 90 {
            v = (v.0, -v.2, v.1);
        }
        v
    }
}

/// Active falling piece
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: PieceColor,
    pub mask: ShapeMask,
    /// Origin of the unrotated mask's bounding box
    pub position: Coord,
    pub rotation: Rotation3,
}

impl Piece {
    /// Create a piece at the top of the grid, centered on `x` and `z`.
    ///
    /// The mask's top row sits at `height - 1`.
    pub fn spawn(def: &PieceDef, dims: GridDims) -> Self {
        let w = def.mask.width() as i32;
        let h = def.mask.height() as i32;
        Self {
            color: def.color,
            mask: def.mask.clone(),
            position: (
                (dims.width as i32 - w) / 2,
                dims.height as i32 - h,
                (dims.depth as i32 - 1) / 2,
            ),
            rotation: Rotation3::default(),
        }
    }

    /// The mask currently in effect
    pub fn active_shape_mask(&self) -> &ShapeMask {
        &self.mask
    }

    /// Absolute cells occupied by this piece, recomputed on every call.
    ///
    /// Each cell is taken as a doubled offset from the mask center, rotated by
    /// exact quarter turns and floored back onto the lattice. Collision checks,
    /// locking and snapshots all go through here.
    pub fn world_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        let w = self.mask.width() as i32;
        let h = self.mask.height() as i32;
        let (px, py, pz) = self.position;
        let rotation = self.rotation;

        self.mask.occupied().map(move |(col, row)| {
            let offset = (2 * col as i32 - (w - 1), 2 * row as i32 - (h - 1), 0);
            let (dx, dy, dz) = rotation.apply(offset);
            (
                (2 * px + (w - 1) + dx).div_euclid(2),
                (2 * py + (h - 1) + dy).div_euclid(2),
                (2 * pz + dz).div_euclid(2),
            )
        })
    }

    /// Copy of this piece moved by a delta
    pub fn translated(&self, dx: i32, dy: i32, dz: i32) -> Self {
        let (x, y, z) = self.position;
        Self {
            position: (x + dx, y + dy, z + dz),
            ..self.clone()
        }
    }

    /// Copy of this piece with one axis rotated; None for non-quarter deltas
    pub fn rotated(&self, axis: Axis, delta_degrees: i32) -> Option<Self> {
        let rotation = self.rotation.rotate(axis, delta_degrees)?;
        Some(Self {
            rotation,
            ..self.clone()
        })
    }

    /// Check if every cell is inside the grid and empty
    pub fn fits(&self, grid: &Grid) -> bool {
        self.world_cells().all(|(x, y, z)| grid.is_free(x, y, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_huge_delta_stays_quarter_turn() {
        let start = Rotation3::default().rotate(Axis::X, -90).unwrap();
        assert_eq!(start.x, 270);

        // 2147483610 = 90 * 23860929, so it is a valid turn near i32::MAX.
        let next = start.rotate(Axis::X, 2_147_483_610).unwrap();
        assert!([0, 90, 180, 270].contains(&next.x), "got {}", next.x);
        assert_eq!(next.x, 0);

        let back = start.rotate(Axis::X, -2_147_483_610).unwrap();
        assert!([0, 90, 180, 270].contains(&back.x));
    }

    #[test]
    fn test_builtin_masks_pass_validation() {
        for def in standard_pieces() {
            let rows: Vec<Vec<u8>> = (0..def.mask.height())
                .map(|row| {
                    (0..def.mask.width())
                        .map(|col| def.mask.get(col, row) as u8)
                        .collect()
                })
                .collect();
            let checked = ShapeMask::from_rows(&rows).unwrap();
            assert_eq!(checked, def.mask, "{:?}", def.color);
        }
    }

    #[test]
    fn test_standard_set_is_seven_tetrominoes() {
        let defs = standard_pieces();
        assert_eq!(defs.len(), 7);
        for (def, color) in defs.iter().zip(PieceColor::ALL) {
            assert_eq!(def.color, color);
            assert_eq!(def.mask.cell_count(), 4);
        }
    }

    #[test]
    fn test_rotation_apply_quarter_turns() {
        let z = Rotation3::default().rotate(Axis::Z, 90).unwrap();
        assert_eq!(z.apply((1, 0, 0)), (0, 1, 0));

        let y = Rotation3::default().rotate(Axis::Y, 90).unwrap();
        assert_eq!(y.apply((1, 0, 0)), (0, 0, -1));

        let x = Rotation3::default().rotate(Axis::X, 90).unwrap();
        assert_eq!(x.apply((0, 1, 0)), (0, 0, 1));
    }

    #[test]
    fn test_rotation_wraps() {
        let r = Rotation3::default().rotate(Axis::Y, -90).unwrap();
        assert_eq!(r.y, 270);
        let r = r.rotate(Axis::Y, 90).unwrap();
        assert_eq!(r, Rotation3::default());
        assert_eq!(Rotation3::default().rotate(Axis::X, 45), None);
    }
}
