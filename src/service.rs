//! Request/response boundary around the engine
//!
//! The estimator is a pure, synchronous, single-threaded computation over
//! process-local data, designed to sit behind an asynchronous message
//! channel: a request carries object specs, blocked cells, and a
//! correlation id; the response echoes the id with either the probability
//! matrix or an error string, plus the elapsed time either way. Grid
//! dimensions are the configuration constants shared between caller and
//! engine, not part of the request payload.
//!
//! The engine holds no state between requests, so concurrent requests can
//! run in separate instances without shared-mutation hazards. There is no
//! preemption of an in-flight computation; the only internal time-boxing is
//! the per-strategy wall-clock budget. Request de-duplication, response
//! caching, and discarding of superseded responses are the caller's
//! responsibility.

use crate::algorithm::selector::{EstimatorConfig, Strategy, estimate};
use crate::io::configuration::{GRID_HEIGHT, GRID_WIDTH};
use crate::spatial::grid::{Cell, GridSpec};
use crate::spatial::placements::ObjectSpec;
use ndarray::Array2;
use std::time::{Duration, Instant};

/// One estimation request
#[derive(Clone, Debug)]
pub struct EstimateRequest {
    /// Caller-chosen id echoed verbatim in the response
    pub correlation_id: u64,
    /// Requested object shapes and counts
    pub object_specs: Vec<ObjectSpec>,
    /// Cells excluded from every placement
    pub blocked_cells: Vec<Cell>,
}

/// The result of one estimation request
#[derive(Clone, Debug)]
pub struct EstimateResponse {
    /// Correlation id echoed from the request
    pub correlation_id: u64,
    /// Probability matrix on success, empty on failure
    pub probabilities: Array2<f64>,
    /// Strategy that produced the matrix, absent on failure
    pub strategy: Option<Strategy>,
    /// Failure description, absent on success
    pub error: Option<String>,
    /// Wall-clock time spent on the request, including failed ones
    pub elapsed: Duration,
}

/// Run one estimation against the production grid
///
/// Malformed input surfaces as an error string with an empty matrix; no
/// partial or best-effort matrix is returned in that case. Infeasible but
/// well-formed requests succeed with the all-zero matrix.
pub fn handle_request(request: &EstimateRequest, config: &EstimatorConfig) -> EstimateResponse {
    let started = Instant::now();
    let outcome = GridSpec::new(GRID_WIDTH, GRID_HEIGHT).and_then(|grid| {
        estimate(&grid, &request.blocked_cells, &request.object_specs, config)
    });

    match outcome {
        Ok(result) => EstimateResponse {
            correlation_id: request.correlation_id,
            probabilities: result.probabilities,
            strategy: Some(result.strategy),
            error: None,
            elapsed: started.elapsed(),
        },
        Err(failure) => EstimateResponse {
            correlation_id: request.correlation_id,
            probabilities: Array2::zeros((0, 0)),
            strategy: None,
            error: Some(failure.to_string()),
            elapsed: started.elapsed(),
        },
    }
}
