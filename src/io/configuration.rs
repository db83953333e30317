//! Engine constants and runtime configuration defaults

// Grid dimensions shared between caller and engine, not part of the request
/// Width of the production search grid
pub const GRID_WIDTH: usize = 9;
/// Height of the production search grid
pub const GRID_HEIGHT: usize = 5;

// Exact enumeration guards
/// Maximum raw configuration-count bound for attempting exact search
pub const DEFAULT_EXACTNESS_BUDGET: u128 = 200_000;
/// Configurations discovered before exact search abandons its results
pub const DEFAULT_MAX_EXACT_CONFIGURATIONS: u64 = 250_000;
/// Search nodes expanded between deadline checks in exact enumeration
pub const NODES_PER_TIME_CHECK: u64 = 4096;

// Monte Carlo loop control
/// Default maximum samples to attempt
pub const DEFAULT_SAMPLE_BUDGET: usize = 30_000;
/// Sample attempts between convergence and deadline checks
pub const DEFAULT_CONVERGENCE_CHECK_INTERVAL: usize = 1_000;
/// Maximum per-cell change between checkpoints considered converged
pub const DEFAULT_CONVERGENCE_TOLERANCE: f64 = 0.002;
/// Default wall-clock budget per strategy in milliseconds
pub const DEFAULT_TIME_BUDGET_MS: u64 = 2_000;

// Alternate strategies
/// Instance count above which band decomposition activates when enabled
pub const DEFAULT_DECOMPOSITION_THRESHOLD: usize = 12;
/// Maximum tilings the exact-cover search will discover
pub const MAX_COVER_SOLUTIONS: u64 = 10_000;

// Reproducibility
/// Fixed seed for reproducible sampling
pub const DEFAULT_SEED: u64 = 42;
