//! Per-cell coverage probability estimation for rectangular placements on a blocked grid
//!
//! Given a fixed grid with pre-blocked cells and a multiset of axis-aligned
//! rectangular objects, the engine enumerates every feasible placement,
//! encodes occupancy as bitmasks, and estimates the probability that each
//! cell is covered across the space of valid non-overlapping configurations.

#![forbid(unsafe_code)]

/// Solving strategies: exact enumeration, Monte Carlo sampling, exact cover, constraint propagation, and decomposition
pub mod algorithm;
/// Command-line harness, configuration defaults, and error handling
pub mod io;
/// Mathematical utilities for normalization and convergence
pub mod math;
/// Request/response boundary around the engine
pub mod service;
/// Grid geometry, occupancy bitmasks, and placement catalogs
pub mod spatial;

pub use algorithm::selector::{Estimate, EstimatorConfig, Strategy, estimate};
pub use io::error::{EstimatorError, Result};
