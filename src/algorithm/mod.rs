/// Exhaustive branch-and-bound enumeration of valid configurations
pub mod backtracking;
/// Approximate horizontal band decomposition
pub mod decomposition;
/// Bitvec-backed placement domains for constraint propagation
pub mod domains;
/// Dancing-links search over full tilings of the free area
pub mod exact_cover;
/// Configuration-count and area accounting for strategy gating
pub mod feasibility;
/// Arc-consistency pre-filtering of placement domains
pub mod propagation;
/// Monte Carlo sampling by sequential randomized construction
pub mod sampling;
/// Strategy selection and the estimation entry point
pub mod selector;
