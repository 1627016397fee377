//! Grid module - the settled-block volume
//!
//! The grid is a `width x depth x height` volume where each cell is empty or
//! filled with the color of the piece that settled there.
//! Storage is a flat vector in slice-major order (`y`, then `z`, then `x`), so a
//! horizontal slice is one contiguous run and clearing it is a single
//! `copy_within`.
//! Coordinates: `x` in `0..width`, `y` in `0..height` (0 is the floor), `z` in `0..depth`.

use crate::error::CoreError;
use crate::types::{Cell, Coord, PieceColor};

/// Grid dimensions, fixed for the lifetime of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridDims {
    pub width: u16,
    pub depth: u16,
    pub height: u16,
}

impl GridDims {
    /// Validate and build dimensions; every side must be positive
    pub fn new(width: u16, depth: u16, height: u16) -> Result<Self, CoreError> {
        if width == 0 || depth == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions {
                width,
                depth,
                height,
            });
        }
        Ok(Self {
            width,
            depth,
            height,
        })
    }

    /// Number of cells in one horizontal slice
    pub fn slice_len(&self) -> usize {
        self.width as usize * self.depth as usize
    }

    /// Total number of cells
    pub fn volume(&self) -> usize {
        self.slice_len() * self.height as usize
    }

    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && x < self.width as i32
            && y >= 0
            && y < self.height as i32
            && z >= 0
            && z < self.depth as i32
    }

    /// Flat index of `(x, y, z)`, or `None` when out of bounds
    #[inline(always)]
    pub fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if !self.contains(x, y, z) {
            return None;
        }
        Some(y as usize * self.slice_len() + z as usize * self.width as usize + x as usize)
    }

    /// Inverse of [`GridDims::index`]
    pub fn coord_of(&self, index: usize) -> Coord {
        let slice = self.slice_len();
        let y = index / slice;
        let rem = index % slice;
        let z = rem / self.width as usize;
        let x = rem % self.width as usize;
        (x as i32, y as i32, z as i32)
    }

    fn out_of_bounds(&self, x: i32, y: i32, z: i32) -> CoreError {
        CoreError::OutOfBounds {
            x,
            y,
            z,
            width: self.width,
            depth: self.depth,
            height: self.height,
        }
    }
}

/// The settled-block volume
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dims: GridDims,
    /// Flat cells, index = y * (width * depth) + z * width + x
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: u16, depth: u16, height: u16) -> Result<Self, CoreError> {
        GridDims::new(width, depth, height).map(Self::with_dims)
    }

    /// Create a new empty grid from already validated dimensions
    pub fn with_dims(dims: GridDims) -> Self {
        Self {
            dims,
            cells: vec![None; dims.volume()],
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn width(&self) -> u16 {
        self.dims.width
    }

    pub fn depth(&self) -> u16 {
        self.dims.depth
    }

    pub fn height(&self) -> u16 {
        self.dims.height
    }

    /// Get cell at `(x, y, z)`
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<Cell> {
        self.dims.index(x, y, z).map(|idx| self.cells[idx])
    }

    /// Whether `(x, y, z)` blocks a piece: out of bounds or filled
    pub fn is_occupied(&self, x: i32, y: i32, z: i32) -> bool {
        !self.is_free(x, y, z)
    }

    /// Whether `(x, y, z)` is inside the grid and empty
    pub fn is_free(&self, x: i32, y: i32, z: i32) -> bool {
        matches!(self.get(x, y, z), Some(None))
    }

    /// Write a cell
    ///
    /// Callers are expected to have bounds-checked already; an out-of-range
    /// write leaves the grid untouched and reports [`CoreError::OutOfBounds`].
    pub fn set(&mut self, x: i32, y: i32, z: i32, cell: Cell) -> Result<(), CoreError> {
        let idx = self
            .dims
            .index(x, y, z)
            .ok_or_else(|| self.dims.out_of_bounds(x, y, z))?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Cells of the horizontal slice at height `y`, row-major in `(z, x)`
    pub fn slice(&self, y: i32) -> Option<&[Cell]> {
        if y < 0 || y >= self.dims.height as i32 {
            return None;
        }
        let len = self.dims.slice_len();
        let start = y as usize * len;
        Some(&self.cells[start..start + len])
    }

    /// Check if every `(x, z)` cell at height `y` is filled
    pub fn is_slice_full(&self, y: i32) -> bool {
        self.slice(y)
            .is_some_and(|slice| slice.iter().all(|cell| cell.is_some()))
    }

    /// Remove the slice at height `y` and shift every slice above it down by one.
    /// The topmost slice becomes empty.
    /// Returns false if `y` is out of range.
    pub fn clear_slice(&mut self, y: i32) -> bool {
        if y < 0 || y >= self.dims.height as i32 {
            return false;
        }

        let len = self.dims.slice_len();
        let y = y as usize;
        let total = self.cells.len();

        // copy_within handles the overlapping ranges
        self.cells.copy_within((y + 1) * len..total, y * len);
        self.cells[total - len..].fill(None);

        true
    }

    /// Clear every full slice, scanning upward from the floor.
    ///
    /// After a clear the same height is examined again, since the slice that
    /// moved down into it may be full as well. Returns the number of slices
    /// cleared.
    pub fn clear_full_slices(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = 0;
        while y < self.dims.height as i32 {
            if self.is_slice_full(y) {
                self.clear_slice(y);
                cleared += 1;
            } else {
                y += 1;
            }
        }
        cleared
    }

    /// Every filled cell with its color, in storage order
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, PieceColor)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.map(|color| (self.dims.coord_of(idx), color)))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty the whole grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_calculation() {
        let dims = GridDims::new(4, 3, 5).unwrap();
        assert_eq!(dims.index(0, 0, 0), Some(0));
        assert_eq!(dims.index(3, 0, 0), Some(3));
        assert_eq!(dims.index(0, 0, 1), Some(4));
        assert_eq!(dims.index(0, 1, 0), Some(12));
        assert_eq!(dims.index(3, 4, 2), Some(59));
        assert_eq!(dims.index(-1, 0, 0), None);
        assert_eq!(dims.index(4, 0, 0), None);
        assert_eq!(dims.index(0, 5, 0), None);
        assert_eq!(dims.index(0, 0, 3), None);
    }

    #[test]
    fn test_coord_of_inverts_index() {
        let dims = GridDims::new(4, 3, 5).unwrap();
        for idx in 0..dims.volume() {
            let (x, y, z) = dims.coord_of(idx);
            assert_eq!(dims.index(x, y, z), Some(idx));
        }
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            Grid::new(0, 4, 10),
            Err(CoreError::InvalidDimensions { width: 0, .. })
        ));
        assert!(Grid::new(4, 0, 10).is_err());
        assert!(Grid::new(4, 4, 0).is_err());
    }

    #[test]
    fn test_clear_slice_is_contiguous_shift() {
        let mut grid = Grid::new(2, 2, 3).unwrap();
        grid.set(0, 1, 0, Some(PieceColor::Red)).unwrap();
        grid.set(1, 2, 1, Some(PieceColor::Blue)).unwrap();

        assert!(grid.clear_slice(0));

        assert_eq!(grid.get(0, 0, 0), Some(Some(PieceColor::Red)));
        assert_eq!(grid.get(1, 1, 1), Some(Some(PieceColor::Blue)));
        assert!(grid.slice(2).unwrap().iter().all(|c| c.is_none()));
        assert_eq!(grid.occupied_count(), 2);
    }
}
