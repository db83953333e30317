//! Error types for estimation requests
//!
//! Infeasible inputs are not errors; they produce a valid all-zero matrix.
//! Errors cover malformed input and internal computation failures only.

use std::fmt;

/// Main error type for all estimation operations
#[derive(Debug)]
pub enum EstimatorError {
    /// Grid dimensions produce more cells than the occupancy mask can hold
    GridCapacityExceeded {
        /// Requested number of cells
        cell_count: usize,
        /// Maximum cells the mask supports
        capacity: usize,
    },

    /// A requested object shape cannot exist on any grid
    InvalidObjectSpec {
        /// Requested object width
        width: usize,
        /// Requested object height
        height: usize,
        /// Explanation of why the shape is invalid
        reason: &'static str,
    },

    /// A blocked cell lies outside the grid
    BlockedCellOutOfBounds {
        /// Column of the offending cell
        x: usize,
        /// Row of the offending cell
        y: usize,
        /// Grid width the cell was checked against
        width: usize,
        /// Grid height the cell was checked against
        height: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Numerical computation produced an invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for EstimatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridCapacityExceeded {
                cell_count,
                capacity,
            } => {
                write!(
                    f,
                    "Grid of {cell_count} cells exceeds the mask capacity of {capacity}"
                )
            }
            Self::InvalidObjectSpec {
                width,
                height,
                reason,
            } => {
                write!(f, "Invalid object spec {width}x{height}: {reason}")
            }
            Self::BlockedCellOutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "Blocked cell ({x}, {y}) lies outside the {width}x{height} grid"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for EstimatorError {}

/// Convenience type alias for estimation results
pub type Result<T> = std::result::Result<T, EstimatorError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> EstimatorError {
    EstimatorError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> EstimatorError {
    EstimatorError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats_context() {
        let bounds_err = EstimatorError::BlockedCellOutOfBounds {
            x: 9,
            y: 1,
            width: 9,
            height: 5,
        };
        assert_eq!(
            bounds_err.to_string(),
            "Blocked cell (9, 1) lies outside the 9x5 grid"
        );

        let parameter_err =
            invalid_parameter("object", &"0x3x1", &"object dimensions must be nonzero");
        assert!(parameter_err.to_string().contains("object"));
        assert!(parameter_err.to_string().contains("nonzero"));
    }
}
