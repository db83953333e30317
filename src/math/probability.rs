//! Probability normalization and convergence metrics

use crate::spatial::grid::{BlockedCells, Cell, GridSpec};
use ndarray::Array2;

/// Convert per-cell coverage tallies into an H×W probability matrix
///
/// Divides each tally by the population of configurations behind it, then
/// forces blocked cells to zero as the final step. A zero population yields
/// the all-zero matrix.
pub fn normalize_coverage(
    grid: &GridSpec,
    blocked: &BlockedCells,
    coverage: &[u64],
    population: u64,
) -> Array2<f64> {
    Array2::from_shape_fn((grid.height(), grid.width()), |(y, x)| {
        let index = grid.cell_index(Cell::new(x, y));
        if population == 0 || blocked.mask().contains(index) {
            0.0
        } else {
            coverage.get(index).copied().unwrap_or(0) as f64 / population as f64
        }
    })
}

/// All-zero probability matrix for a grid
pub fn zero_matrix(grid: &GridSpec) -> Array2<f64> {
    Array2::zeros((grid.height(), grid.width()))
}

/// Largest per-cell absolute difference between two probability vectors
///
/// Used as the convergence metric between successive sampling checkpoints.
pub fn max_absolute_difference(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
