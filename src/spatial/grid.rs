//! Grid dimensions and blocked-cell bookkeeping
//!
//! A request is evaluated against one immutable [`GridSpec`] and one
//! immutable [`BlockedCells`] set. Both are validated up front so the
//! strategies can rely on every cell index fitting the occupancy mask.

use crate::io::error::{EstimatorError, Result};
use crate::spatial::mask::CellMask;

/// A single grid coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Column index, zero at the left edge
    pub x: usize,
    /// Row index, zero at the top edge
    pub y: usize,
}

impl Cell {
    /// Create a cell coordinate
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Immutable dimensions of the search grid
///
/// The production grid is fixed by the configuration constants; the engine
/// accepts any dimensions whose cell count fits [`CellMask::CAPACITY`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSpec {
    width: usize,
    height: usize,
}

impl GridSpec {
    /// Create a validated grid specification
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the cell count
    /// exceeds the occupancy mask capacity.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(crate::io::error::invalid_parameter(
                "grid",
                &format!("{width}x{height}"),
                &"grid dimensions must be nonzero",
            ));
        }
        let cell_count = width * height;
        if cell_count > CellMask::CAPACITY {
            return Err(EstimatorError::GridCapacityExceeded {
                cell_count,
                capacity: CellMask::CAPACITY,
            });
        }
        Ok(Self { width, height })
    }

    /// Grid width in cells
    pub const fn width(self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub const fn height(self) -> usize {
        self.height
    }

    /// Total number of cells
    pub const fn cell_count(self) -> usize {
        self.width * self.height
    }

    /// Flat mask index of a cell (`y * width + x`)
    pub const fn cell_index(self, cell: Cell) -> usize {
        cell.y * self.width + cell.x
    }

    /// Test whether a coordinate lies inside the grid
    pub const fn contains(self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }
}

/// Cells pre-excluded from all placements, always probability zero in output
#[derive(Clone, Debug)]
pub struct BlockedCells {
    mask: CellMask,
}

impl BlockedCells {
    /// Build the blocked set from a list of coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if any coordinate lies outside the grid.
    pub fn new(grid: &GridSpec, cells: &[Cell]) -> Result<Self> {
        let mut mask = CellMask::EMPTY;
        for &cell in cells {
            if !grid.contains(cell) {
                return Err(EstimatorError::BlockedCellOutOfBounds {
                    x: cell.x,
                    y: cell.y,
                    width: grid.width(),
                    height: grid.height(),
                });
            }
            mask.insert(grid.cell_index(cell));
        }
        Ok(Self { mask })
    }

    /// Occupancy mask of all blocked cells
    pub const fn mask(&self) -> CellMask {
        self.mask
    }

    /// Number of blocked cells
    pub const fn count(&self) -> usize {
        self.mask.count()
    }

    /// Number of cells available to placements
    pub const fn free_cells(&self, grid: &GridSpec) -> usize {
        grid.cell_count() - self.mask.count()
    }
}
