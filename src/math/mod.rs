//! Mathematical utilities for the estimator

/// Probability normalization and convergence metrics
pub mod probability;
