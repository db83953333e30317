//! Object specifications and placement catalog construction
//!
//! The catalog enumerates, for every requested instance, each position and
//! orientation that fits the grid and avoids blocked cells, ignoring other
//! instances. Placements are computed once per request and immutable from
//! then on; an empty list for any instance proves global infeasibility.

use crate::io::error::{EstimatorError, Result};
use crate::spatial::grid::{BlockedCells, Cell, GridSpec};
use crate::spatial::mask::CellMask;

/// A requested rectangle shape and how many interchangeable copies are needed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjectSpec {
    /// Rectangle width in cells
    pub width: usize,
    /// Rectangle height in cells
    pub height: usize,
    /// Number of independent, interchangeable instances requested
    pub count: usize,
}

impl ObjectSpec {
    /// Create an object specification
    pub const fn new(width: usize, height: usize, count: usize) -> Self {
        Self {
            width,
            height,
            count,
        }
    }

    /// Cell area of a single instance
    pub const fn area(self) -> usize {
        self.width * self.height
    }

    /// Oriented `(width, height)` variants: one if square, else the swapped pair
    pub fn orientations(self) -> Vec<(usize, usize)> {
        if self.width == self.height {
            vec![(self.width, self.height)]
        } else {
            vec![(self.width, self.height), (self.height, self.width)]
        }
    }
}

/// One concrete instantiation of an instance at a grid position
#[derive(Clone, Debug)]
pub struct Placement {
    /// Origin column of the top-left covered cell
    pub x: usize,
    /// Origin row of the top-left covered cell
    pub y: usize,
    /// Oriented width in cells
    pub width: usize,
    /// Oriented height in cells
    pub height: usize,
    /// The exact set of covered cells
    pub cells: Vec<Cell>,
    /// Occupancy bitmask over the covered cells
    pub mask: CellMask,
}

impl Placement {
    /// Cell area covered by this placement
    pub const fn area(&self) -> usize {
        self.width * self.height
    }
}

/// All feasible placements for every requested instance, in request order
///
/// Objects are expanded by `count` into individual instances so the search
/// strategies can treat each instance as an independent variable.
#[derive(Clone, Debug)]
pub struct PlacementCatalog {
    instances: Vec<Vec<Placement>>,
}

impl PlacementCatalog {
    /// Enumerate feasible placements for every requested instance
    ///
    /// # Errors
    ///
    /// Returns an error if any object spec has a zero dimension.
    pub fn build(
        grid: &GridSpec,
        blocked: &BlockedCells,
        objects: &[ObjectSpec],
    ) -> Result<Self> {
        let mut instances = Vec::new();
        for spec in objects {
            if spec.width == 0 || spec.height == 0 {
                return Err(EstimatorError::InvalidObjectSpec {
                    width: spec.width,
                    height: spec.height,
                    reason: "object dimensions must be nonzero",
                });
            }
            if spec.count == 0 {
                continue;
            }
            let placements = enumerate_placements(grid, blocked, *spec);
            for _ in 1..spec.count {
                instances.push(placements.clone());
            }
            instances.push(placements);
        }
        Ok(Self { instances })
    }

    /// Rebuild a catalog from explicit per-instance placement lists
    ///
    /// Used by the arc-consistency pre-filter to thread pruned domains back
    /// into the strategies.
    pub const fn from_instances(instances: Vec<Vec<Placement>>) -> Self {
        Self { instances }
    }

    /// Per-instance placement lists in request order
    pub fn instances(&self) -> &[Vec<Placement>] {
        &self.instances
    }

    /// Number of requested instances
    pub const fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Test whether some instance has no feasible placement at all
    pub fn has_empty_instance(&self) -> bool {
        self.instances.iter().any(Vec::is_empty)
    }
}

/// Enumerate every placement of one object shape that fits the grid and
/// avoids blocked cells
fn enumerate_placements(
    grid: &GridSpec,
    blocked: &BlockedCells,
    spec: ObjectSpec,
) -> Vec<Placement> {
    let mut placements = Vec::new();
    for (width, height) in spec.orientations() {
        if width > grid.width() || height > grid.height() {
            continue;
        }
        for y in 0..=(grid.height() - height) {
            for x in 0..=(grid.width() - width) {
                let mut mask = CellMask::EMPTY;
                let mut cells = Vec::with_capacity(width * height);
                for dy in 0..height {
                    for dx in 0..width {
                        let cell = Cell::new(x + dx, y + dy);
                        cells.push(cell);
                        mask.insert(grid.cell_index(cell));
                    }
                }
                if mask.intersects(blocked.mask()) {
                    continue;
                }
                placements.push(Placement {
                    x,
                    y,
                    width,
                    height,
                    cells,
                    mask,
                });
            }
        }
    }
    placements
}
