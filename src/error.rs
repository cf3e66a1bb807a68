use alloc::string::String;

/// Errors raised while building an [`AnalysisConfig`](crate::AnalysisConfig)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The lookback is not a positive whole number of minutes
    #[error("lookback must be a positive number of minutes, got {0:?}")]
    InvalidLookback(String),
}

/// Errors raised while rebuilding a [`CorrelationMatrix`](crate::CorrelationMatrix) from rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// A row does not have as many cells as the matrix has rows
    #[error("row {row} has {len} cells, expected {dim}")]
    NotSquare {
        /// Position of the offending row
        row: usize,
        /// Number of cells in the offending row
        len: usize,
        /// Number of rows in the matrix
        dim: usize,
    },
}
