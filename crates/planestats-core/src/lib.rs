//! planestats core - frame data structures
//!
//! This crate provides the data model the statistics filters read from
//! and write to:
//!
//! - [`SampleType`] / [`VideoFormat`] / [`VideoInfo`] - how samples are stored
//! - [`Plane`] / [`PlaneData`] - owned plane buffers
//! - [`PlaneView`] / [`PlaneSamples`] - borrowed read-only plane access
//! - [`Frame`] - planes plus per-frame metadata
//! - [`PropMap`] / [`PropValue`] - named metadata and filter arguments

pub mod error;
pub mod format;
pub mod frame;
pub mod plane;
pub mod props;

pub use error::{Error, Result};
pub use format::{MAX_PLANES, SampleType, VideoFormat, VideoInfo};
pub use frame::Frame;
pub use plane::{Plane, PlaneData, PlaneSamples, PlaneView, rows};
pub use props::{PropMap, PropValue};
