//! Monte Carlo estimation by sequential randomized construction
//!
//! The production default strategy. Each sample processes the instances in
//! the fixed request order: the placements still compatible with the
//! occupancy accumulated so far are collected, one is chosen uniformly, and
//! its mask is committed. An instance left with no compatible placement
//! invalidates the whole sample; there is no retry inside a sample and
//! earlier choices are never revisited.
//!
//! This is a sequential construction, not independent uniform sampling over
//! the full configuration space: later instances are constrained by earlier
//! ones, so the estimator can be biased by instance order.
//!
//! Loop control: every checkpoint interval of attempted samples the loop
//! stops on an elapsed wall-clock budget, or on convergence, when the
//! maximum per-cell absolute difference between the current probability
//! vector and the previous checkpoint's falls below the tolerance.

use crate::algorithm::selector::EstimatorConfig;
use crate::math::probability::max_absolute_difference;
use crate::spatial::grid::GridSpec;
use crate::spatial::mask::CellMask;
use crate::spatial::placements::PlacementCatalog;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::Instant;

/// Tally produced by the sampling loop
pub struct SampleTally {
    /// Per-cell coverage counts across valid samples
    pub coverage: Vec<u64>,
    /// Number of samples that produced a complete configuration
    pub valid_samples: u64,
}

/// Sample valid configurations and tally per-cell coverage
pub fn sample(grid: &GridSpec, catalog: &PlacementCatalog, config: &EstimatorConfig) -> SampleTally {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut coverage = vec![0u64; grid.cell_count()];
    let mut valid_samples = 0u64;

    let interval = config.convergence_check_interval.max(1);
    let started = Instant::now();
    let mut checkpoint: Option<Vec<f64>> = None;

    // Reused across samples to keep the hot loop allocation-free
    let mut candidates: Vec<usize> = Vec::new();

    for attempt in 1..=config.sample_budget {
        if let Some(occupied) = construct_sample(catalog, &mut rng, &mut candidates) {
            valid_samples += 1;
            for index in occupied.ones() {
                if let Some(tally) = coverage.get_mut(index) {
                    *tally += 1;
                }
            }
        }

        if attempt % interval == 0 {
            if started.elapsed() >= config.time_budget {
                break;
            }
            if valid_samples > 0 {
                let current: Vec<f64> = coverage
                    .iter()
                    .map(|&tally| tally as f64 / valid_samples as f64)
                    .collect();
                if let Some(previous) = &checkpoint {
                    if max_absolute_difference(previous, &current)
                        <= config.convergence_tolerance
                    {
                        break;
                    }
                }
                checkpoint = Some(current);
            }
        }
    }

    SampleTally {
        coverage,
        valid_samples,
    }
}

/// Build one sample, returning its occupancy union or `None` when some
/// instance had no compatible placement left
fn construct_sample(
    catalog: &PlacementCatalog,
    rng: &mut StdRng,
    candidates: &mut Vec<usize>,
) -> Option<CellMask> {
    let mut occupied = CellMask::EMPTY;
    for placements in catalog.instances() {
        candidates.clear();
        candidates.extend(
            placements
                .iter()
                .enumerate()
                .filter(|(_, placement)| !placement.mask.intersects(occupied))
                .map(|(index, _)| index),
        );
        if candidates.is_empty() {
            return None;
        }
        let choice = rng.random_range(0..candidates.len());
        let placement = candidates
            .get(choice)
            .and_then(|&index| placements.get(index))?;
        occupied.union_with(placement.mask);
    }
    Some(occupied)
}
