//! Exact-cover search for full tilings of the free area
//!
//! An optional mode with deliberately narrower semantics than the rest of
//! the engine: columns are the non-blocked cells, rows are the distinct
//! candidate placement bitmasks, and a solution is a set of rows whose
//! cells exactly partition every free cell, a full tiling. Requested
//! instance multiplicity is not enforced, which is precisely what makes
//! this formulation different from "each requested instance placed exactly
//! once"; it is therefore disabled by default and selected explicitly.
//!
//! The search uses the classic toroidal doubly-linked node structure with
//! O(size) cover/uncover and a minimum-remaining-size column heuristic, and
//! stops after a capped number of discovered tilings. Per-cell probability
//! is the fraction of discovered tilings covering the cell.

use crate::io::configuration::MAX_COVER_SOLUTIONS;
use crate::spatial::grid::{BlockedCells, GridSpec};
use crate::spatial::mask::CellMask;
use crate::spatial::placements::PlacementCatalog;
use std::collections::HashSet;

/// Tally produced by the tiling search
pub struct TilingTally {
    /// Per-cell coverage counts across discovered tilings
    pub coverage: Vec<u64>,
    /// Number of full tilings discovered before the cap
    pub tilings: u64,
}

/// Search for full tilings of the free area and tally per-cell coverage
pub fn search(grid: &GridSpec, blocked: &BlockedCells, catalog: &PlacementCatalog) -> TilingTally {
    let rows = distinct_rows(catalog);
    let columns = free_columns(grid, blocked);

    let mut matrix = LinkMatrix::new(columns.len());
    for (row_id, mask) in rows.iter().enumerate() {
        let cells: Vec<usize> = mask
            .ones()
            .filter_map(|index| columns.get(&index).copied())
            .collect();
        matrix.add_row(row_id, &cells);
    }

    let mut tally = TilingTally {
        coverage: vec![0; grid.cell_count()],
        tilings: 0,
    };
    let mut chosen = Vec::new();
    matrix.search(&rows, &mut chosen, &mut tally, MAX_COVER_SOLUTIONS);
    tally
}

/// Candidate placement masks, deduplicated across instances
///
/// Identical instances enumerate identical placements; keeping duplicate
/// rows would count each tiling once per instance that contributed it.
fn distinct_rows(catalog: &PlacementCatalog) -> Vec<CellMask> {
    let mut seen = HashSet::new();
    let mut rows = Vec::new();
    for placements in catalog.instances() {
        for placement in placements {
            if seen.insert(placement.mask) {
                rows.push(placement.mask);
            }
        }
    }
    rows
}

/// Map from free-cell index to column ordinal
fn free_columns(grid: &GridSpec, blocked: &BlockedCells) -> std::collections::HashMap<usize, usize> {
    let mut columns = std::collections::HashMap::new();
    for index in 0..grid.cell_count() {
        if !blocked.mask().contains(index) {
            let ordinal = columns.len();
            columns.insert(index, ordinal);
        }
    }
    columns
}

/// Toroidal doubly-linked sparse matrix for the dancing-links search
///
/// Node 0 is the root; nodes `1..=column_count` are column headers; row
/// nodes follow. All links are indices into the parallel vectors, so the
/// structure needs no unsafe pointer juggling.
struct LinkMatrix {
    left: Vec<usize>,
    right: Vec<usize>,
    up: Vec<usize>,
    down: Vec<usize>,
    column: Vec<usize>,
    size: Vec<usize>,
    row_id: Vec<usize>,
}

impl LinkMatrix {
    fn new(column_count: usize) -> Self {
        let headers = column_count + 1;
        let mut matrix = Self {
            left: Vec::with_capacity(headers),
            right: Vec::with_capacity(headers),
            up: Vec::with_capacity(headers),
            down: Vec::with_capacity(headers),
            column: Vec::with_capacity(headers),
            size: vec![0; headers],
            row_id: Vec::with_capacity(headers),
        };
        for node in 0..headers {
            let prev = if node == 0 { column_count } else { node - 1 };
            let next = if node == column_count { 0 } else { node + 1 };
            matrix.left.push(prev);
            matrix.right.push(next);
            matrix.up.push(node);
            matrix.down.push(node);
            matrix.column.push(node);
            matrix.row_id.push(usize::MAX);
        }
        matrix
    }

    fn get(slots: &[usize], index: usize) -> usize {
        slots.get(index).copied().unwrap_or(0)
    }

    fn set(slots: &mut [usize], index: usize, value: usize) {
        if let Some(slot) = slots.get_mut(index) {
            *slot = value;
        }
    }

    fn new_node(&mut self, header: usize, row: usize) -> usize {
        let node = self.left.len();
        self.left.push(node);
        self.right.push(node);
        self.up.push(node);
        self.down.push(node);
        self.column.push(header);
        self.row_id.push(row);
        node
    }

    fn add_row(&mut self, row: usize, columns: &[usize]) {
        let mut first = None;
        for &ordinal in columns {
            let header = ordinal + 1;
            let node = self.new_node(header, row);

            // Append at the bottom of the column
            let above = Self::get(&self.up, header);
            Self::set(&mut self.up, node, above);
            Self::set(&mut self.down, node, header);
            Self::set(&mut self.down, above, node);
            Self::set(&mut self.up, header, node);
            if let Some(size) = self.size.get_mut(header) {
                *size += 1;
            }

            // Link into the row circle
            match first {
                None => first = Some(node),
                Some(anchor) => {
                    let tail = Self::get(&self.left, anchor);
                    Self::set(&mut self.left, node, tail);
                    Self::set(&mut self.right, node, anchor);
                    Self::set(&mut self.right, tail, node);
                    Self::set(&mut self.left, anchor, node);
                }
            }
        }
    }

    fn cover(&mut self, header: usize) {
        let right = Self::get(&self.right, header);
        let left = Self::get(&self.left, header);
        Self::set(&mut self.left, right, left);
        Self::set(&mut self.right, left, right);

        let mut row = Self::get(&self.down, header);
        while row != header {
            let mut node = Self::get(&self.right, row);
            while node != row {
                let below = Self::get(&self.down, node);
                let above = Self::get(&self.up, node);
                Self::set(&mut self.up, below, above);
                Self::set(&mut self.down, above, below);
                let owner = Self::get(&self.column, node);
                if let Some(size) = self.size.get_mut(owner) {
                    *size -= 1;
                }
                node = Self::get(&self.right, node);
            }
            row = Self::get(&self.down, row);
        }
    }

    fn uncover(&mut self, header: usize) {
        let mut row = Self::get(&self.up, header);
        while row != header {
            let mut node = Self::get(&self.left, row);
            while node != row {
                let owner = Self::get(&self.column, node);
                if let Some(size) = self.size.get_mut(owner) {
                    *size += 1;
                }
                let below = Self::get(&self.down, node);
                let above = Self::get(&self.up, node);
                Self::set(&mut self.up, below, node);
                Self::set(&mut self.down, above, node);
                node = Self::get(&self.left, node);
            }
            row = Self::get(&self.up, row);
        }
        let right = Self::get(&self.right, header);
        let left = Self::get(&self.left, header);
        Self::set(&mut self.left, right, header);
        Self::set(&mut self.right, left, header);
    }

    /// Column with the fewest remaining rows, or `None` when all are covered
    fn shortest_column(&self) -> Option<usize> {
        let mut best = None;
        let mut header = Self::get(&self.right, 0);
        while header != 0 {
            let size = self.size.get(header).copied().unwrap_or(0);
            if best.is_none_or(|(_, smallest)| size < smallest) {
                best = Some((header, size));
            }
            header = Self::get(&self.right, header);
        }
        best.map(|(header, _)| header)
    }

    fn search(
        &mut self,
        rows: &[CellMask],
        chosen: &mut Vec<usize>,
        tally: &mut TilingTally,
        cap: u64,
    ) {
        if tally.tilings >= cap {
            return;
        }
        let Some(header) = self.shortest_column() else {
            Self::record_tiling(rows, chosen, tally);
            return;
        };
        if self.size.get(header).copied().unwrap_or(0) == 0 {
            return;
        }

        self.cover(header);
        let mut row = Self::get(&self.down, header);
        while row != header {
            chosen.push(Self::get(&self.row_id, row));
            let mut node = Self::get(&self.right, row);
            while node != row {
                let owner = Self::get(&self.column, node);
                self.cover(owner);
                node = Self::get(&self.right, node);
            }

            self.search(rows, chosen, tally, cap);

            let mut reverse = Self::get(&self.left, row);
            while reverse != row {
                let owner = Self::get(&self.column, reverse);
                self.uncover(owner);
                reverse = Self::get(&self.left, reverse);
            }
            chosen.pop();

            if tally.tilings >= cap {
                break;
            }
            row = Self::get(&self.down, row);
        }
        self.uncover(header);
    }

    fn record_tiling(rows: &[CellMask], chosen: &[usize], tally: &mut TilingTally) {
        tally.tilings += 1;
        for &row_id in chosen {
            let Some(mask) = rows.get(row_id) else {
                continue;
            };
            for index in mask.ones() {
                if let Some(cell) = tally.coverage.get_mut(index) {
                    *cell += 1;
                }
            }
        }
    }
}
