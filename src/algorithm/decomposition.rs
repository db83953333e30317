//! Horizontal band decomposition, an approximate divide-and-conquer
//!
//! Splits the grid into two contiguous horizontal bands, assigns every
//! object with an orientation fitting a band to that band, estimates each
//! band with the full engine, and merges the band matrices back by row.
//!
//! This is a heuristic approximation, not a correctness-preserving
//! transform: bands are treated as independent, which ignores cross-band
//! interaction; an object eligible for both bands is estimated in both; and
//! placements spanning the band boundary cannot be represented at all. The
//! selector therefore gates it behind an instance-count threshold, and the
//! default configuration leaves it disabled entirely.

use crate::algorithm::selector::{Estimate, EstimatorConfig, Strategy, estimate as run_engine};
use crate::io::error::Result;
use crate::spatial::grid::{Cell, GridSpec};
use crate::spatial::placements::ObjectSpec;
use ndarray::Array2;

/// Estimate by splitting the grid into two independent horizontal bands
///
/// # Errors
///
/// Propagates validation errors from the per-band engine runs.
pub fn estimate(
    grid: &GridSpec,
    blocked_cells: &[Cell],
    objects: &[ObjectSpec],
    config: &EstimatorConfig,
) -> Result<Estimate> {
    let top_height = grid.height() / 2;
    let bottom_height = grid.height() - top_height;

    // Recursive band runs use the full engine minus decomposition itself
    let band_config = EstimatorConfig {
        use_decomposition: false,
        ..*config
    };

    let top_grid = GridSpec::new(grid.width(), top_height)?;
    let bottom_grid = GridSpec::new(grid.width(), bottom_height)?;

    let top_blocked: Vec<Cell> = blocked_cells
        .iter()
        .filter(|cell| cell.y < top_height)
        .copied()
        .collect();
    let bottom_blocked: Vec<Cell> = blocked_cells
        .iter()
        .filter(|cell| cell.y >= top_height)
        .map(|cell| Cell::new(cell.x, cell.y - top_height))
        .collect();

    let top_objects = band_objects(objects, grid.width(), top_height);
    let bottom_objects = band_objects(objects, grid.width(), bottom_height);

    let top = run_engine(&top_grid, &top_blocked, &top_objects, &band_config)?;
    let bottom = run_engine(&bottom_grid, &bottom_blocked, &bottom_objects, &band_config)?;

    let probabilities = Array2::from_shape_fn((grid.height(), grid.width()), |(y, x)| {
        if y < top_height {
            top.probabilities.get([y, x]).copied().unwrap_or(0.0)
        } else {
            bottom
                .probabilities
                .get([y - top_height, x])
                .copied()
                .unwrap_or(0.0)
        }
    });

    Ok(Estimate {
        probabilities,
        strategy: Strategy::Decomposed,
        population: top.population.saturating_add(bottom.population),
        constraint_filtered: top.constraint_filtered || bottom.constraint_filtered,
    })
}

/// Objects with at least one orientation fitting the band bounds
fn band_objects(objects: &[ObjectSpec], width: usize, band_height: usize) -> Vec<ObjectSpec> {
    objects
        .iter()
        .filter(|spec| {
            spec.orientations()
                .iter()
                .any(|&(w, h)| w <= width && h <= band_height)
        })
        .copied()
        .collect()
}
