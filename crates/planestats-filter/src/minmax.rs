//! Clipped plane minimum and maximum
//!
//! Finds the percentile-threshold extrema of one plane from its value
//! histogram:
//!
//! - min: smallest value whose low-end cumulative count exceeds
//!   `floor(width * height * minthr)`
//! - max: largest value whose high-end cumulative count exceeds
//!   `floor(width * height * maxthr)`
//!
//! A fraction of exactly 0 means the statistic is not requested: its scan
//! is skipped and its property is not written. When both fractions are 0
//! no histogram is built at all.

use crate::filter::{FrameFilter, PROP_MAX, PROP_MIN, check_frame, check_plane};
use crate::histogram::{Histogram, threshold_target};
use crate::sample::{Sample, Threshold};
use crate::{FilterError, FilterResult};
use planestats_core::{Frame, PlaneSamples, PlaneView, PropMap, VideoInfo};

const NAME: &str = "PlaneMinMax";

/// Result of the threshold scans
///
/// Each side is `None` when its fraction was 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MinMax {
    pub min: Option<Threshold>,
    pub max: Option<Threshold>,
}

impl MinMax {
    /// Write the requested thresholds to `props` as `psmMin` / `psmMax`.
    ///
    /// Integer thresholds are stored as ints, float thresholds as floats.
    pub fn write_props(&self, props: &mut PropMap) {
        for (key, value) in [(PROP_MIN, self.min), (PROP_MAX, self.max)] {
            match value {
                Some(Threshold::Int(v)) => props.set_int(key, v),
                Some(Threshold::Float(v)) => props.set_float(key, v),
                None => {}
            }
        }
    }
}

/// Percentile-threshold min and max of a plane.
///
/// # Arguments
///
/// * `view` - Plane to scan
/// * `minthr` - Low-end population fraction in [0, 1]; 0 skips the min
/// * `maxthr` - High-end population fraction in [0, 1]; 0 skips the max
///
/// # Example
///
/// ```
/// use planestats_core::{PlaneSamples, PlaneView};
/// use planestats_filter::{Threshold, plane_min_max};
///
/// let samples = [0u8, 0, 0, 0, 0, 0, 0, 0, 255, 255, 255, 255, 255, 255, 255, 255];
/// let view = PlaneView::new(4, 4, 4, 8, PlaneSamples::U8(&samples)).unwrap();
/// let result = plane_min_max(&view, 0.4, 0.4);
/// assert_eq!(result.min, Some(Threshold::Int(0)));
/// assert_eq!(result.max, Some(Threshold::Int(255)));
/// ```
pub fn plane_min_max(view: &PlaneView<'_>, minthr: f64, maxthr: f64) -> MinMax {
    if minthr == 0.0 && maxthr == 0.0 {
        return MinMax::default();
    }
    match view.samples() {
        PlaneSamples::U8(s) => min_max_typed(s, view, minthr, maxthr),
        PlaneSamples::U16(s) => min_max_typed(s, view, minthr, maxthr),
        PlaneSamples::F32(s) => min_max_typed(s, view, minthr, maxthr),
    }
}

fn min_max_typed<T: Sample>(
    samples: &[T],
    view: &PlaneView<'_>,
    minthr: f64,
    maxthr: f64,
) -> MinMax {
    let hist = Histogram::from_samples(samples, view);
    let total = hist.total();

    let min = (minthr != 0.0).then(|| {
        let target = threshold_target(total, minthr);
        T::threshold(hist.scan_min(target))
    });
    let max = (maxthr != 0.0).then(|| {
        let target = threshold_target(total, maxthr);
        T::threshold(hist.scan_max(target))
    });
    MinMax { min, max }
}

/// Arguments for [`PlaneMinMax`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MinMaxArgs {
    /// Low-end population fraction in [0, 1]
    pub minthr: f64,
    /// High-end population fraction in [0, 1]
    pub maxthr: f64,
    /// Plane to analyze
    pub plane: i64,
}

/// Filter attaching clipped min/max of one plane to every frame
#[derive(Debug, Clone)]
pub struct PlaneMinMax {
    info: VideoInfo,
    minthr: f64,
    maxthr: f64,
    plane: usize,
}

impl PlaneMinMax {
    /// Build the filter for a clip.
    ///
    /// Validation order is plane, then `minthr`, then `maxthr`.
    ///
    /// # Errors
    ///
    /// - [`FilterError::InvalidPlane`] if `args.plane` is not a plane of the clip
    /// - [`FilterError::InvalidThreshold`] if a fraction is outside [0, 1] or NaN
    pub fn new(info: &VideoInfo, args: MinMaxArgs) -> FilterResult<Self> {
        let plane = check_plane(NAME, info, args.plane)?;
        check_fraction("minthr", args.minthr)?;
        check_fraction("maxthr", args.maxthr)?;

        log::debug!(
            "{NAME}: plane {plane}, minthr {}, maxthr {}",
            args.minthr,
            args.maxthr
        );

        Ok(Self {
            info: *info,
            minthr: args.minthr,
            maxthr: args.maxthr,
            plane,
        })
    }

    /// Build the filter from a host argument map.
    ///
    /// Recognized keys: `minthr`, `maxthr` (float, optional) and `plane`
    /// (int, optional). Thresholds are read at single precision.
    ///
    /// # Errors
    ///
    /// Same as [`PlaneMinMax::new`], plus [`FilterError::InvalidArgument`]
    /// for mistyped arguments.
    pub fn from_args(info: &VideoInfo, args: &PropMap) -> FilterResult<Self> {
        let mut parsed = MinMaxArgs::default();

        if args.contains("minthr") {
            parsed.minthr = args
                .get_float_saturated("minthr", 0)
                .map(f64::from)
                .map_err(invalid_argument)?;
        }
        if args.contains("maxthr") {
            parsed.maxthr = args
                .get_float_saturated("maxthr", 0)
                .map(f64::from)
                .map_err(invalid_argument)?;
        }
        if args.contains("plane") {
            parsed.plane = args
                .get_int_saturated("plane", 0)
                .map(i64::from)
                .map_err(invalid_argument)?;
        }

        Self::new(info, parsed)
    }

    pub fn plane(&self) -> usize {
        self.plane
    }

    pub fn minthr(&self) -> f64 {
        self.minthr
    }

    pub fn maxthr(&self) -> f64 {
        self.maxthr
    }
}

fn check_fraction(name: &'static str, value: f64) -> FilterResult<()> {
    if !(0.0..=1.0).contains(&value) {
        log::warn!("{NAME}: rejecting {name} {value}");
        return Err(FilterError::InvalidThreshold {
            filter: NAME,
            name,
            value,
        });
    }
    Ok(())
}

fn invalid_argument(err: planestats_core::Error) -> FilterError {
    FilterError::InvalidArgument {
        filter: NAME,
        message: err.to_string(),
    }
}

impl FrameFilter for PlaneMinMax {
    fn name(&self) -> &'static str {
        NAME
    }

    fn video_info(&self) -> &VideoInfo {
        &self.info
    }

    fn get_frame(&self, n: usize, src: &Frame) -> FilterResult<Frame> {
        check_frame(NAME, &self.info, src)?;
        let result = plane_min_max(&src.plane(self.plane)?, self.minthr, self.maxthr);
        log::trace!("{NAME}: frame {n} min {:?} max {:?}", result.min, result.max);

        let mut dst = src.clone();
        result.write_props(dst.props_mut());
        Ok(dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planestats_core::VideoFormat;

    fn half_black_half_white() -> Vec<u8> {
        let mut samples = vec![0u8; 8];
        samples.extend_from_slice(&[255; 8]);
        samples
    }

    #[test]
    fn test_min_max_split_plane() {
        let samples = half_black_half_white();
        let view = PlaneView::new(4, 4, 4, 8, PlaneSamples::U8(&samples)).unwrap();

        let result = plane_min_max(&view, 0.4, 0.0);
        assert_eq!(result.min, Some(Threshold::Int(0)));
        assert_eq!(result.max, None);

        let result = plane_min_max(&view, 0.0, 0.4);
        assert_eq!(result.min, None);
        assert_eq!(result.max, Some(Threshold::Int(255)));

        // Exactly half: low-end count 8 is not > 8
        let result = plane_min_max(&view, 0.5, 0.5);
        assert_eq!(result.min, Some(Threshold::Int(255)));
        assert_eq!(result.max, Some(Threshold::Int(0)));
    }

    #[test]
    fn test_min_max_ignores_row_padding() {
        // 2x3 region, stride 4; padding holds 0 and 255, which would
        // become the min and max if it were counted
        let samples = [
            100u8, 110, 0, 255, //
            120, 130, 0, 255, //
            140, 150,
        ];
        let view = PlaneView::new(2, 3, 4, 8, PlaneSamples::U8(&samples)).unwrap();
        let result = plane_min_max(&view, 0.1, 0.1);
        assert_eq!(result.min, Some(Threshold::Int(100)));
        assert_eq!(result.max, Some(Threshold::Int(150)));

        // target = floor(6 * 0.5) = 3
        let result = plane_min_max(&view, 0.5, 0.5);
        assert_eq!(result.min, Some(Threshold::Int(130)));
        assert_eq!(result.max, Some(Threshold::Int(120)));
    }

    #[test]
    fn test_min_max_float_ignores_row_padding() {
        let samples = [0.25f32, 0.5, -1.0, 0.75, 1.0];
        let view = PlaneView::new(2, 2, 3, 32, PlaneSamples::F32(&samples)).unwrap();
        let result = plane_min_max(&view, 0.2, 0.2);
        assert_eq!(result.min, Some(Threshold::Float(16384.0 / 65535.0)));
        assert_eq!(result.max, Some(Threshold::Float(1.0)));
    }

    #[test]
    fn test_min_max_both_zero_skips_everything() {
        let samples = half_black_half_white();
        let view = PlaneView::new(4, 4, 4, 8, PlaneSamples::U8(&samples)).unwrap();
        assert_eq!(plane_min_max(&view, 0.0, 0.0), MinMax::default());
    }

    #[test]
    fn test_min_max_full_fraction_defaults() {
        let samples = [5u8, 6, 7, 8];
        let view = PlaneView::new(2, 2, 2, 8, PlaneSamples::U8(&samples)).unwrap();
        let result = plane_min_max(&view, 1.0, 1.0);
        assert_eq!(result.min, Some(Threshold::Int(255)));
        assert_eq!(result.max, Some(Threshold::Int(0)));
    }

    #[test]
    fn test_min_max_float() {
        let samples = [0.0f32, 0.5, 1.0];
        let view = PlaneView::new(3, 1, 3, 32, PlaneSamples::F32(&samples)).unwrap();
        let result = plane_min_max(&view, 0.3, 0.3);
        assert_eq!(result.min, Some(Threshold::Float(0.0)));
        assert_eq!(result.max, Some(Threshold::Float(1.0)));

        let result = plane_min_max(&view, 0.4, 0.4);
        assert_eq!(result.min, Some(Threshold::Float(32768.0 / 65535.0)));
        assert_eq!(result.max, Some(Threshold::Float(32768.0 / 65535.0)));
    }

    #[test]
    fn test_write_props_types() {
        let mut props = PropMap::new();
        MinMax {
            min: Some(Threshold::Int(16)),
            max: Some(Threshold::Float(0.75)),
        }
        .write_props(&mut props);
        assert_eq!(props.get_int("psmMin", 0).unwrap(), 16);
        assert_eq!(props.get_float("psmMax", 0).unwrap(), 0.75);

        let mut props = PropMap::new();
        MinMax::default().write_props(&mut props);
        assert!(props.is_empty());
    }

    #[test]
    fn test_filter_validation_messages() {
        let info = VideoInfo::new(VideoFormat::gray8(), 4, 4, 1);

        let err = PlaneMinMax::new(
            &info,
            MinMaxArgs {
                plane: 1,
                minthr: 2.0,
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "PlaneMinMax: invalid plane specified");

        let err = PlaneMinMax::new(
            &info,
            MinMaxArgs {
                minthr: -0.1,
                maxthr: 2.0,
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "PlaneMinMax: minthr should be a float between 0.0 and 1.0"
        );

        let err = PlaneMinMax::new(
            &info,
            MinMaxArgs {
                maxthr: f64::NAN,
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "PlaneMinMax: maxthr should be a float between 0.0 and 1.0"
        );
    }

    #[test]
    fn test_from_args_defaults_and_parsing() {
        let info = VideoInfo::new(VideoFormat::yuv420p10(), 8, 8, 1);
        let filter = PlaneMinMax::from_args(&info, &PropMap::new()).unwrap();
        assert_eq!(filter.plane(), 0);
        assert_eq!(filter.minthr(), 0.0);
        assert_eq!(filter.maxthr(), 0.0);

        let mut args = PropMap::new();
        args.set_float("minthr", 0.01);
        args.set_int("maxthr", 1);
        args.set_int("plane", 1);
        let filter = PlaneMinMax::from_args(&info, &args).unwrap();
        assert_eq!(filter.plane(), 1);
        assert_eq!(filter.minthr(), f64::from(0.01f32));
        assert_eq!(filter.maxthr(), 1.0);

        args.set_float("maxthr", 1e300);
        assert!(matches!(
            PlaneMinMax::from_args(&info, &args),
            Err(FilterError::InvalidThreshold { name: "maxthr", .. })
        ));

        args.set_data("minthr", b"0.5");
        assert!(matches!(
            PlaneMinMax::from_args(&info, &args),
            Err(FilterError::InvalidArgument { .. })
        ));
    }
}
