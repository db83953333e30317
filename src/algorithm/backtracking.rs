//! Exhaustive branch-and-bound enumeration of valid configurations
//!
//! Depth-first search over the fixed instance order. Each node carries the
//! accumulated occupancy mask; a placement enters the branch only when its
//! mask is disjoint from the accumulation. A leaf is a complete valid
//! configuration and records its covered cells into the coverage tally.
//!
//! The search is deterministic for fixed inputs when it completes. Two
//! safety valves abandon it instead of finishing: a cap on discovered
//! configurations and a periodic wall-clock deadline check at internal
//! choice points. Abandonment discards all partial tallies; the selector
//! falls back to Monte Carlo sampling instead.

use crate::algorithm::feasibility;
use crate::algorithm::selector::EstimatorConfig;
use crate::io::configuration::NODES_PER_TIME_CHECK;
use crate::spatial::grid::{BlockedCells, GridSpec};
use crate::spatial::mask::CellMask;
use crate::spatial::placements::{Placement, PlacementCatalog};
use std::time::Instant;

/// Result of an exact enumeration attempt
pub enum ExactOutcome {
    /// Search visited every valid configuration
    Complete {
        /// Per-cell coverage tallies over all discovered configurations
        coverage: Vec<u64>,
        /// Number of valid configurations discovered
        configurations: u64,
    },
    /// Search hit the configuration cap or the time budget; partial tallies
    /// were discarded
    Aborted,
}

/// Enumerate every valid configuration and tally per-cell coverage
pub fn enumerate(
    grid: &GridSpec,
    blocked: &BlockedCells,
    catalog: &PlacementCatalog,
    config: &EstimatorConfig,
) -> ExactOutcome {
    let remaining_area = feasibility::remaining_area_suffix(catalog);
    let mut search = Search {
        instances: catalog.instances(),
        remaining_area: &remaining_area,
        free_cells: blocked.free_cells(grid),
        prune_by_area: config.use_area_pruning,
        max_configurations: config.max_exact_configurations,
        deadline: Instant::now() + config.time_budget,
        nodes: 0,
        coverage: vec![0; grid.cell_count()],
        configurations: 0,
        aborted: false,
    };

    search.descend(0, CellMask::EMPTY);

    if search.aborted {
        ExactOutcome::Aborted
    } else {
        ExactOutcome::Complete {
            coverage: search.coverage,
            configurations: search.configurations,
        }
    }
}

struct Search<'a> {
    instances: &'a [Vec<Placement>],
    remaining_area: &'a [usize],
    free_cells: usize,
    prune_by_area: bool,
    max_configurations: u64,
    deadline: Instant,
    nodes: u64,
    coverage: Vec<u64>,
    configurations: u64,
    aborted: bool,
}

impl Search<'_> {
    fn descend(&mut self, depth: usize, occupied: CellMask) {
        self.nodes += 1;
        if self.nodes % NODES_PER_TIME_CHECK == 0 && Instant::now() >= self.deadline {
            self.aborted = true;
            return;
        }

        let Some(placements) = self.instances.get(depth) else {
            self.record_configuration(occupied);
            return;
        };

        if self.prune_by_area {
            let remaining = self.remaining_area.get(depth).copied().unwrap_or(0);
            if self.free_cells - occupied.count() < remaining {
                return;
            }
        }

        for placement in placements {
            if placement.mask.intersects(occupied) {
                continue;
            }
            self.descend(depth + 1, occupied.union(placement.mask));
            if self.aborted {
                return;
            }
        }
    }

    fn record_configuration(&mut self, occupied: CellMask) {
        self.configurations += 1;
        for index in occupied.ones() {
            if let Some(tally) = self.coverage.get_mut(index) {
                *tally += 1;
            }
        }
        if self.configurations >= self.max_configurations {
            self.aborted = true;
        }
    }
}
