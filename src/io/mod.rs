//! Command-line harness, configuration defaults, and error handling

/// Command-line argument parsing and the single-run harness
pub mod cli;
/// Engine constants and runtime configuration defaults
pub mod configuration;
/// Error types for estimation requests
pub mod error;
/// Text rendering of probability matrices
pub mod report;
