//! Strategy selection and the estimation entry point
//!
//! One configuration record drives every interchangeable strategy. The
//! selector short-circuits provably infeasible requests to the all-zero
//! matrix, then picks, in order: band decomposition, the arc-consistency
//! pre-filter, the exact-cover tiling mode, exact backtracking when the raw
//! configuration bound fits the exactness budget, and Monte Carlo sampling
//! otherwise. The exact-to-sampling fallback is a designed degradation
//! path, never an error.

use crate::algorithm::backtracking::{self, ExactOutcome};
use crate::algorithm::decomposition;
use crate::algorithm::exact_cover;
use crate::algorithm::feasibility;
use crate::algorithm::propagation::{self, PropagationOutcome};
use crate::algorithm::sampling;
use crate::io::configuration::{
    DEFAULT_CONVERGENCE_CHECK_INTERVAL, DEFAULT_CONVERGENCE_TOLERANCE,
    DEFAULT_DECOMPOSITION_THRESHOLD, DEFAULT_EXACTNESS_BUDGET, DEFAULT_MAX_EXACT_CONFIGURATIONS,
    DEFAULT_SAMPLE_BUDGET, DEFAULT_SEED, DEFAULT_TIME_BUDGET_MS,
};
use crate::io::error::Result;
use crate::math::probability::{normalize_coverage, zero_matrix};
use crate::spatial::grid::{BlockedCells, Cell, GridSpec};
use crate::spatial::placements::{ObjectSpec, PlacementCatalog};
use ndarray::Array2;
use std::time::Duration;

/// Tunable budgets and switches for one estimation request
#[derive(Clone, Copy, Debug)]
pub struct EstimatorConfig {
    /// Maximum raw configuration-count bound for attempting exact enumeration
    pub exactness_budget: u128,
    /// Configurations discovered before exact enumeration abandons its results
    pub max_exact_configurations: u64,
    /// Maximum Monte Carlo samples to attempt
    pub sample_budget: usize,
    /// Sample attempts between convergence and deadline checks
    pub convergence_check_interval: usize,
    /// Maximum per-cell change between checkpoints considered converged
    pub convergence_tolerance: f64,
    /// Wall-clock budget for a single strategy run
    pub time_budget: Duration,
    /// Instance count above which band decomposition activates
    pub decomposition_threshold: usize,
    /// Whether band decomposition may run at all
    pub use_decomposition: bool,
    /// Whether the arc-consistency pre-filter narrows the catalog first
    pub use_constraint_filter: bool,
    /// Whether the exact-cover tiling mode replaces placement-space search
    pub use_exact_cover: bool,
    /// Whether exact enumeration prunes branches by remaining free area
    pub use_area_pruning: bool,
    /// Seed for the sampling strategy's random generator
    pub seed: u64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            exactness_budget: DEFAULT_EXACTNESS_BUDGET,
            max_exact_configurations: DEFAULT_MAX_EXACT_CONFIGURATIONS,
            sample_budget: DEFAULT_SAMPLE_BUDGET,
            convergence_check_interval: DEFAULT_CONVERGENCE_CHECK_INTERVAL,
            convergence_tolerance: DEFAULT_CONVERGENCE_TOLERANCE,
            time_budget: Duration::from_millis(DEFAULT_TIME_BUDGET_MS),
            decomposition_threshold: DEFAULT_DECOMPOSITION_THRESHOLD,
            use_decomposition: false,
            use_constraint_filter: true,
            use_exact_cover: false,
            use_area_pruning: true,
            seed: DEFAULT_SEED,
        }
    }
}

/// Which engine produced a probability matrix
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Exhaustive backtracking visited every valid configuration
    ExactBacktracking,
    /// Sequential randomized construction sampled the configuration space
    MonteCarlo,
    /// Dancing-links search over full tilings of the free area
    ExactCover,
    /// Independent horizontal bands estimated separately and merged
    Decomposed,
    /// No search ran: the request provably admits no coverage
    Infeasible,
}

/// Output of one estimation
#[derive(Clone, Debug)]
pub struct Estimate {
    /// Height×width matrix of per-cell coverage probabilities in `[0, 1]`
    pub probabilities: Array2<f64>,
    /// The strategy that produced the matrix
    pub strategy: Strategy,
    /// Configurations, valid samples, or tilings behind the estimate
    pub population: u64,
    /// Whether the arc-consistency pre-filter was applied to the catalog
    pub constraint_filtered: bool,
}

/// Estimate per-cell coverage probabilities for one request
///
/// Infeasible requests (an instance with no placements, a total requested
/// area exceeding the free cells, or an inconsistency proven by the
/// pre-filter) yield the all-zero matrix, not an error.
///
/// # Errors
///
/// Returns an error for malformed input: a zero-dimension object spec or a
/// blocked cell outside the grid.
pub fn estimate(
    grid: &GridSpec,
    blocked_cells: &[Cell],
    objects: &[ObjectSpec],
    config: &EstimatorConfig,
) -> Result<Estimate> {
    let blocked = BlockedCells::new(grid, blocked_cells)?;
    let catalog = PlacementCatalog::build(grid, &blocked, objects)?;

    if catalog.instance_count() == 0
        || catalog.has_empty_instance()
        || feasibility::total_requested_area(objects) > blocked.free_cells(grid)
    {
        return Ok(infeasible(grid, false));
    }

    if config.use_decomposition
        && grid.height() >= 2
        && catalog.instance_count() > config.decomposition_threshold
    {
        return decomposition::estimate(grid, blocked_cells, objects, config);
    }

    let (catalog, filtered) = if config.use_constraint_filter {
        match propagation::enforce_arc_consistency(&catalog) {
            PropagationOutcome::Consistent(pruned) => (pruned, true),
            PropagationOutcome::Inconsistent => return Ok(infeasible(grid, true)),
        }
    } else {
        (catalog, false)
    };

    if config.use_exact_cover {
        let tally = exact_cover::search(grid, &blocked, &catalog);
        return Ok(Estimate {
            probabilities: normalize_coverage(grid, &blocked, &tally.coverage, tally.tilings),
            strategy: Strategy::ExactCover,
            population: tally.tilings,
            constraint_filtered: filtered,
        });
    }

    if feasibility::configuration_count_bound(&catalog) <= config.exactness_budget {
        if let ExactOutcome::Complete {
            coverage,
            configurations,
        } = backtracking::enumerate(grid, &blocked, &catalog, config)
        {
            return Ok(Estimate {
                probabilities: normalize_coverage(grid, &blocked, &coverage, configurations),
                strategy: Strategy::ExactBacktracking,
                population: configurations,
                constraint_filtered: filtered,
            });
        }
        // Abandoned exact search degrades to sampling, never to an error
    }

    let tally = sampling::sample(grid, &catalog, config);
    Ok(Estimate {
        probabilities: normalize_coverage(grid, &blocked, &tally.coverage, tally.valid_samples),
        strategy: Strategy::MonteCarlo,
        population: tally.valid_samples,
        constraint_filtered: filtered,
    })
}

/// All-zero estimate for a request proven infeasible before search
fn infeasible(grid: &GridSpec, constraint_filtered: bool) -> Estimate {
    Estimate {
        probabilities: zero_matrix(grid),
        strategy: Strategy::Infeasible,
        population: 0,
        constraint_filtered,
    }
}
