//! Errors returned by the risk scoring engine

/// Errors that can occur while building fields or scoring risk
#[derive(Debug, Clone, PartialEq)]
pub enum RiskError {
    /// Normalization range is not `lo < hi` with finite bounds, so `(v - lo) / (hi - lo)`
    /// is undefined. Recoverable with [`crate::DegenerateRangePolicy::Uniform`].
    DegenerateRange {
        /// Lower bound of the rejected range
        lo: f64,
        /// Upper bound of the rejected range
        hi: f64,
    },
    /// Two fields combined in one computation have different dimensions
    ShapeMismatch {
        /// `(rows, cols)` of the first field
        expected: (usize, usize),
        /// `(rows, cols)` of the second field
        found: (usize, usize),
    },
    /// Field dimensions don't describe the supplied data
    InvalidShape {
        /// Requested row count
        rows: usize,
        /// Requested column count
        cols: usize,
        /// Number of values supplied
        len: usize,
    },
    /// Hourly series is not one sample for each hour 0..=23
    InvalidSeries(String),
    /// Classification thresholds are out of order or not finite
    InvalidThresholds(String),
    /// A grid or weather source failed to produce data
    Source(String),
}

impl std::fmt::Display for RiskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskError::DegenerateRange { lo, hi } => {
                write!(f, "Degenerate normalization range [{lo}, {hi}]")
            }
            RiskError::ShapeMismatch { expected, found } => write!(
                f,
                "Field shape mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            RiskError::InvalidShape { rows, cols, len } => write!(
                f,
                "Invalid field shape {rows}x{cols} for {len} values"
            ),
            RiskError::InvalidSeries(msg) => write!(f, "Invalid hourly series: {msg}"),
            RiskError::InvalidThresholds(msg) => write!(f, "Invalid thresholds: {msg}"),
            RiskError::Source(msg) => write!(f, "Data source failed: {msg}"),
        }
    }
}

impl std::error::Error for RiskError {}
