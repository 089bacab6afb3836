use thiserror::Error;

use crate::Partition;

/// Errors surfaced by the coincidence computations.
///
/// Input validation fails before any pair is processed; partition emptiness is
/// reported per partition when a proportion is requested, never silently
/// coerced to 0 or NaN.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoincidenceError {
    /// A feature value was outside the {0, 1} domain.
    #[error("feature value at index {index} is not binary: {value}")]
    FeatureNotBinary {
        /// Index of the offending record
        index: usize,
        /// The rejected value
        value: f64,
    },
    /// The series and feature columns have different lengths.
    #[error("column lengths differ: {series} series values vs {features} feature values")]
    ColumnLengthMismatch {
        /// Length of the series column
        series: usize,
        /// Length of the feature column
        features: usize,
    },
    /// The partition holds no pairs, so its proportion is undefined.
    #[error("no pairs in the {partition} partition")]
    EmptyPartition {
        /// The empty partition
        partition: Partition,
    },
}
