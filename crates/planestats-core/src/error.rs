//! Error types for planestats-core
//!
//! Provides a unified error type for frame, plane and property map
//! operations. Each variant captures enough context for diagnostics
//! without exposing internal buffer layout.

use thiserror::Error;

/// planestats-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid plane dimensions
    #[error("invalid plane dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Invalid video format description
    #[error("invalid video format: {0}")]
    InvalidFormat(String),

    /// Stride smaller than the plane width
    #[error("invalid stride: {stride} < width {width}")]
    InvalidStride { stride: usize, width: u32 },

    /// Sample buffer too small for the declared geometry
    #[error("sample buffer too small: need {needed} samples, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// Plane index outside the frame's plane count
    #[error("plane index out of range: {index} >= {num_planes}")]
    PlaneOutOfRange { index: usize, num_planes: usize },

    /// Plane sample representation does not match the frame format
    #[error("sample type mismatch: expected {expected:?}, got {actual:?}")]
    SampleTypeMismatch {
        expected: crate::SampleType,
        actual: crate::SampleType,
    },

    /// Plane geometry does not match the frame format
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Property key not present
    #[error("property not found: {0}")]
    PropMissing(String),

    /// Property holds a different value type
    #[error("property '{key}' is not of type {expected}")]
    PropType { key: String, expected: &'static str },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Result type alias for planestats-core operations
pub type Result<T> = std::result::Result<T, Error>;
