//! planestats - Per-frame plane statistics for video frames
//!
//! Computes scalar statistics over one plane of a frame and attaches
//! them to the frame's properties:
//!
//! - `psmAvg`: mean of all samples not in an exclusion list, in [0, 1]
//! - `psmMin` / `psmMax`: percentile-threshold extrema from the plane's
//!   value histogram
//!
//! 8-bit, 16-bit and 32-bit float planes are supported.
//!
//! # Example
//!
//! ```
//! use planestats::filter::{FrameFilter, MinMaxArgs, PlaneMinMax};
//! use planestats::{Frame, PlaneData, VideoFormat, VideoInfo};
//!
//! let info = VideoInfo::new(VideoFormat::gray8(), 4, 4, 1);
//! let mut frame = Frame::new(info.format, 4, 4).unwrap();
//! frame.plane_mut(0).unwrap().set_data(PlaneData::U8(vec![42; 16])).unwrap();
//!
//! let args = MinMaxArgs { minthr: 0.5, maxthr: 0.5, plane: 0 };
//! let filter = PlaneMinMax::new(&info, args).unwrap();
//! let out = filter.get_frame(0, &frame).unwrap();
//! assert_eq!(out.props().get_int("psmMin", 0).unwrap(), 42);
//! assert_eq!(out.props().get_int("psmMax", 0).unwrap(), 42);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use planestats_core::*;

// Re-export the statistics crate as a module to avoid name conflicts
pub use planestats_filter as filter;
