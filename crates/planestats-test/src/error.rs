//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while preparing regression fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Fixture frame could not be built
    #[error("failed to build fixture '{name}': {source}")]
    Fixture {
        name: String,
        #[source]
        source: planestats_core::Error,
    },

    /// Fixture sample list does not match the requested geometry
    #[error("fixture '{name}' needs {expected} samples, got {actual}")]
    SampleCount {
        name: String,
        expected: usize,
        actual: usize,
    },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
