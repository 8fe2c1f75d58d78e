//! planestats-test - Regression test framework for planestats
//!
//! This crate provides the helpers shared by every `tests/*_reg.rs`
//! regression test in the workspace:
//!
//! - [`RegParams`]: indexed value / frame / string checks that keep going
//!   after a failure and report everything at [`RegParams::cleanup`]
//! - Synthetic frame builders for each sample representation
//! - [`init_logging`]: stderr logging for test runs
//!
//! # Usage
//!
//! ```ignore
//! use planestats_test::{RegParams, frame_from_u8};
//!
//! let mut rp = RegParams::new("plane_average");
//! rp.compare_values(0.1046, mean, 1e-4);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: log level for [`init_logging`] (default `warn`)

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::RegParams;

use planestats_core::{Frame, Plane, PlaneData, SampleType, VideoFormat};
use std::sync::Once;

static LOGGING: Once = Once::new();

/// Install a stderr logger for the test process.
///
/// Safe to call from every test; only the first call has an effect.
pub fn init_logging() {
    LOGGING.call_once(|| {
        let started = flexi_logger::Logger::try_with_env_or_str("warn")
            .and_then(|logger| logger.log_to_stderr().start());
        match started {
            // The handle must outlive every test in the process
            Ok(handle) => std::mem::forget(handle),
            Err(e) => eprintln!("logger initialization failed: {}", e),
        }
    });
}

fn single_plane_frame(
    name: &str,
    format: VideoFormat,
    width: u32,
    height: u32,
    data: PlaneData,
) -> TestResult<Frame> {
    let expected = width as usize * height as usize;
    if data.len() != expected {
        return Err(TestError::SampleCount {
            name: name.to_string(),
            expected,
            actual: data.len(),
        });
    }
    let fixture = |source: planestats_core::Error| TestError::Fixture {
        name: name.to_string(),
        source,
    };
    let plane = Plane::from_data(width, height, width as usize, data).map_err(fixture)?;
    Frame::from_planes(format, width, height, vec![plane]).map_err(fixture)
}

/// Build a single-plane 8-bit frame from row-major samples.
pub fn frame_from_u8(width: u32, height: u32, samples: &[u8]) -> TestResult<Frame> {
    single_plane_frame(
        "u8",
        VideoFormat::gray8(),
        width,
        height,
        PlaneData::U8(samples.to_vec()),
    )
}

/// Build a single-plane 16-bit-storage frame with `bits` significant bits.
pub fn frame_from_u16(width: u32, height: u32, bits: u32, samples: &[u16]) -> TestResult<Frame> {
    let format = VideoFormat::new(SampleType::U16, bits, 1, 0, 0).map_err(|source| {
        TestError::Fixture {
            name: "u16".to_string(),
            source,
        }
    })?;
    single_plane_frame(
        "u16",
        format,
        width,
        height,
        PlaneData::U16(samples.to_vec()),
    )
}

/// Build a single-plane float frame from row-major samples.
pub fn frame_from_f32(width: u32, height: u32, samples: &[f32]) -> TestResult<Frame> {
    single_plane_frame(
        "f32",
        VideoFormat::gray_f32(),
        width,
        height,
        PlaneData::F32(samples.to_vec()),
    )
}

/// Build an 8-bit frame whose every sample equals `value`.
pub fn uniform_frame(width: u32, height: u32, value: u8) -> TestResult<Frame> {
    let samples = vec![value; width as usize * height as usize];
    frame_from_u8(width, height, &samples)
}

/// Build an 8-bit horizontal gradient: sample `(x, y)` is `x % 256`.
pub fn gradient_frame(width: u32, height: u32) -> TestResult<Frame> {
    let samples: Vec<u8> = (0..height)
        .flat_map(|_| (0..width).map(|x| (x % 256) as u8))
        .collect();
    frame_from_u8(width, height, &samples)
}
