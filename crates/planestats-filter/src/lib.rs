//! planestats-filter - Per-frame plane statistics
//!
//! This crate provides two statistics over one plane of a frame, each
//! available as a plain kernel function and as a [`FrameFilter`] that
//! attaches the result to the frame's properties:
//!
//! - Exclusion mean ([`plane_average`], [`PlaneAverage`]): normalized mean
//!   of all samples not in an [`ExclusionSet`], written as `psmAvg`
//! - Clipped min/max ([`plane_min_max`], [`PlaneMinMax`]): histogram
//!   percentile thresholds, written as `psmMin` / `psmMax`
//!
//! Kernels are generic over the [`Sample`] representations `u8`, `u16`
//! and `f32`, selected at run time from the plane view.

pub mod average;
pub mod clip;
pub mod exclusion;
mod error;
pub mod filter;
pub mod histogram;
pub mod minmax;
pub mod sample;

pub use error::{FilterError, FilterResult};
pub use exclusion::ExclusionSet;
pub use filter::{FrameFilter, PROP_AVERAGE, PROP_MAX, PROP_MIN};
pub use sample::{Sample, Threshold};

// Re-export commonly used functions
pub use average::{AverageArgs, PlaneAverage, plane_average};
pub use clip::process_clip;
pub use histogram::{Histogram, threshold_target};
pub use minmax::{MinMax, MinMaxArgs, PlaneMinMax, plane_min_max};
