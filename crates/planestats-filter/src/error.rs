//! Error types for planestats-filter
//!
//! The statistics kernels themselves cannot fail. Errors come from
//! filter construction (argument validation) and from frame access.

use thiserror::Error;

/// Errors that can occur while building or running a statistics filter
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] planestats_core::Error),

    /// Plane index outside the clip's plane count
    #[error("{filter}: invalid plane specified")]
    InvalidPlane {
        /// Filter name
        filter: &'static str,
        /// Requested plane
        plane: i64,
    },

    /// Threshold fraction outside [0.0, 1.0]
    #[error("{filter}: {name} should be a float between 0.0 and 1.0")]
    InvalidThreshold {
        /// Filter name
        filter: &'static str,
        /// Argument name
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Malformed argument
    #[error("{filter}: {message}")]
    InvalidArgument {
        /// Filter name
        filter: &'static str,
        /// Description of the problem
        message: String,
    },

    /// Input frame does not match the clip the filter was built for
    #[error("{filter}: frame format does not match the clip format")]
    FormatMismatch {
        /// Filter name
        filter: &'static str,
    },
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
