//! CLI entry point for the placement probability estimator

use clap::Parser;
use tileseer::io::cli::{Cli, run};

fn main() -> tileseer::Result<()> {
    let cli = Cli::parse();
    run(&cli)
}
