//! Command-line harness for running a single estimation
//!
//! The engine itself exposes no I/O; this binary-side harness parses object
//! and blocked-cell arguments, runs one estimation, and prints the
//! probability matrix as a text table with strategy and timing details.

use crate::algorithm::selector::{Estimate, EstimatorConfig, estimate};
use crate::io::configuration::{
    DEFAULT_SAMPLE_BUDGET, DEFAULT_SEED, DEFAULT_TIME_BUDGET_MS, GRID_HEIGHT, GRID_WIDTH,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::report::render_matrix;
use crate::spatial::grid::{Cell, GridSpec};
use crate::spatial::placements::ObjectSpec;
use clap::Parser;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "tileseer")]
#[command(
    author,
    version,
    about = "Estimate per-cell coverage probabilities for rectangular placements on a blocked grid"
)]
/// Command-line arguments for the estimation harness
pub struct Cli {
    /// Requested objects as WIDTHxHEIGHTxCOUNT (repeatable)
    #[arg(short, long = "object", value_name = "WxHxN", required = true)]
    pub objects: Vec<String>,

    /// Blocked cells as X,Y (repeatable)
    #[arg(short, long = "blocked", value_name = "X,Y")]
    pub blocked: Vec<String>,

    /// Grid width in cells
    #[arg(long, default_value_t = GRID_WIDTH)]
    pub width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = GRID_HEIGHT)]
    pub height: usize,

    /// Random seed for the sampling strategy
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum Monte Carlo samples to attempt
    #[arg(long, default_value_t = DEFAULT_SAMPLE_BUDGET)]
    pub samples: usize,

    /// Wall-clock budget per strategy in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIME_BUDGET_MS)]
    pub time_budget: u64,

    /// Skip exact enumeration and always sample
    #[arg(long)]
    pub sample_only: bool,

    /// Use the exact-cover full-tiling mode
    #[arg(long)]
    pub exact_cover: bool,

    /// Disable the arc-consistency pre-filter
    #[arg(long)]
    pub no_prefilter: bool,

    /// Allow band decomposition for large requests
    #[arg(long)]
    pub decompose: bool,
}

impl Cli {
    /// Translate the arguments into an engine configuration
    pub fn to_config(&self) -> EstimatorConfig {
        let defaults = EstimatorConfig::default();
        EstimatorConfig {
            exactness_budget: if self.sample_only {
                0
            } else {
                defaults.exactness_budget
            },
            sample_budget: self.samples,
            time_budget: Duration::from_millis(self.time_budget),
            use_decomposition: self.decompose,
            use_constraint_filter: !self.no_prefilter,
            use_exact_cover: self.exact_cover,
            seed: self.seed,
            ..defaults
        }
    }
}

/// Run one estimation from parsed arguments and print the report
///
/// # Errors
///
/// Returns an error if an argument fails to parse or the request is
/// malformed.
pub fn run(cli: &Cli) -> Result<()> {
    let grid = GridSpec::new(cli.width, cli.height)?;
    let objects = cli
        .objects
        .iter()
        .map(|raw| parse_object_spec(raw))
        .collect::<Result<Vec<_>>>()?;
    let blocked = cli
        .blocked
        .iter()
        .map(|raw| parse_cell(raw))
        .collect::<Result<Vec<_>>>()?;

    let config = cli.to_config();
    let started = Instant::now();
    let outcome = estimate(&grid, &blocked, &objects, &config)?;
    print_report(&outcome, started.elapsed());
    Ok(())
}

/// Parse an object argument of the form `WIDTHxHEIGHTxCOUNT`
///
/// # Errors
///
/// Returns an error when the argument is not three `x`-separated integers.
pub fn parse_object_spec(raw: &str) -> Result<ObjectSpec> {
    let mut parts = raw.split('x');
    let (width, height, count) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(w), Some(h), Some(n), None) => (parse_field(raw, w)?, parse_field(raw, h)?, parse_field(raw, n)?),
        _ => {
            return Err(invalid_parameter(
                "object",
                &raw,
                &"expected WIDTHxHEIGHTxCOUNT",
            ));
        }
    };
    Ok(ObjectSpec::new(width, height, count))
}

/// Parse a blocked-cell argument of the form `X,Y`
///
/// # Errors
///
/// Returns an error when the argument is not two comma-separated integers.
pub fn parse_cell(raw: &str) -> Result<Cell> {
    let mut parts = raw.split(',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(x), Some(y), None) => Ok(Cell::new(parse_field(raw, x)?, parse_field(raw, y)?)),
        _ => Err(invalid_parameter("blocked", &raw, &"expected X,Y")),
    }
}

fn parse_field(raw: &str, field: &str) -> Result<usize> {
    field
        .trim()
        .parse()
        .map_err(|error: std::num::ParseIntError| invalid_parameter("argument", &raw, &error))
}

// Allow print for end-user report output
#[allow(clippy::print_stdout)]
fn print_report(outcome: &Estimate, elapsed: Duration) {
    println!("{}", render_matrix(&outcome.probabilities));
    println!(
        "strategy: {:?}  population: {}  prefiltered: {}  elapsed: {} ms",
        outcome.strategy,
        outcome.population,
        outcome.constraint_filtered,
        elapsed.as_millis()
    );
}
