//! Text rendering of probability matrices for the command line

use ndarray::Array2;
use std::fmt::Write;

/// Render a probability matrix as an aligned percentage table
///
/// Rows are labeled `y0..`, columns `x0..`; each entry is the coverage
/// probability of that cell as a percentage with one decimal.
pub fn render_matrix(matrix: &Array2<f64>) -> String {
    let (rows, cols) = matrix.dim();
    let mut out = String::new();

    let _ = write!(out, "     ");
    for x in 0..cols {
        let _ = write!(out, "{:>7}", format!("x{x}"));
    }
    out.push('\n');

    for y in 0..rows {
        let _ = write!(out, "{:<5}", format!("y{y}"));
        for x in 0..cols {
            let value = matrix.get([y, x]).copied().unwrap_or(0.0);
            let _ = write!(out, "{:>6.1}%", value * 100.0);
        }
        out.push('\n');
    }

    out
}
