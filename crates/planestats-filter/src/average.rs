//! Plane average with excluded values
//!
//! Computes the mean of every sample in one plane that is not a member
//! of a caller-supplied [`ExclusionSet`], normalized to [0, 1]:
//!
//! - integer planes: `sum / (count * (2^bits - 1))`, summed in `u64`
//! - float planes: `sum / count`, summed in `f64`
//!
//! If every sample is excluded the mean is defined as 0.0.

use crate::exclusion::ExclusionSet;
use crate::filter::{FrameFilter, PROP_AVERAGE, check_frame, check_plane};
use crate::sample::Sample;
use crate::{FilterError, FilterResult};
use planestats_core::{Frame, PlaneSamples, PlaneView, PropMap, VideoInfo, rows};

const NAME: &str = "PlaneAverage";

/// Mean of all non-excluded samples of a plane.
///
/// # Arguments
///
/// * `view` - Plane to scan
/// * `exclude` - Sample values to ignore
///
/// # Returns
///
/// The normalized mean, or 0.0 when no sample survives the exclusion.
///
/// # Example
///
/// ```
/// use planestats_core::{PlaneSamples, PlaneView};
/// use planestats_filter::{ExclusionSet, plane_average};
///
/// let samples = [10u8, 20, 30, 40];
/// let view = PlaneView::new(2, 2, 2, 8, PlaneSamples::U8(&samples)).unwrap();
/// let mean = plane_average(&view, &ExclusionSet::from_values(&[20]));
/// assert!((mean - 80.0 / (3.0 * 255.0)).abs() < 1e-12);
/// ```
pub fn plane_average(view: &PlaneView<'_>, exclude: &ExclusionSet) -> f64 {
    match view.samples() {
        PlaneSamples::U8(s) => average_typed(s, view, exclude),
        PlaneSamples::U16(s) => average_typed(s, view, exclude),
        PlaneSamples::F32(s) => average_typed(s, view, exclude),
    }
}

fn average_typed<T: Sample>(
    samples: &[T],
    view: &PlaneView<'_>,
    exclude: &ExclusionSet,
) -> f64 {
    let mut sum = T::Accum::default();
    let mut count = view.len();

    for row in rows(samples, view.width(), view.height(), view.stride()) {
        for &pixel in row {
            if pixel.is_excluded(exclude) {
                count -= 1;
            } else {
                sum += pixel.widen();
            }
        }
    }

    if count == 0 {
        return 0.0;
    }
    T::normalize(sum, count, view.bits_per_sample())
}

/// Arguments for [`PlaneAverage`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AverageArgs {
    /// Sample values left out of the mean
    pub value_exclude: Vec<i64>,
    /// Plane to analyze
    pub plane: i64,
    /// Property name for the result (`psmAvg` when `None`)
    pub prop: Option<String>,
}

/// Filter attaching the exclusion mean of one plane to every frame
#[derive(Debug, Clone)]
pub struct PlaneAverage {
    info: VideoInfo,
    exclude: ExclusionSet,
    plane: usize,
    prop: String,
}

impl PlaneAverage {
    /// Build the filter for a clip.
    ///
    /// # Errors
    ///
    /// - [`FilterError::InvalidPlane`] if `args.plane` is not a plane of the clip
    /// - [`FilterError::InvalidArgument`] if `args.prop` is empty
    pub fn new(info: &VideoInfo, args: AverageArgs) -> FilterResult<Self> {
        let plane = check_plane(NAME, info, args.plane)?;
        let prop = match args.prop {
            Some(p) if p.is_empty() => {
                return Err(FilterError::InvalidArgument {
                    filter: NAME,
                    message: "prop must not be empty".to_string(),
                });
            }
            Some(p) => p,
            None => PROP_AVERAGE.to_string(),
        };
        let exclude = ExclusionSet::from_values(&args.value_exclude);

        log::debug!(
            "{NAME}: plane {plane}, {} excluded values, writing '{prop}'",
            exclude.len()
        );

        Ok(Self {
            info: *info,
            exclude,
            plane,
            prop,
        })
    }

    /// Build the filter from a host argument map.
    ///
    /// Recognized keys: `value_exclude` (int array, optional), `plane`
    /// (int, optional) and `prop` (UTF-8 data, optional). Integers are
    /// saturated to the `i32` range.
    ///
    /// # Errors
    ///
    /// Same as [`PlaneAverage::new`], plus [`FilterError::InvalidArgument`]
    /// for mistyped arguments or a `prop` that is not UTF-8.
    pub fn from_args(info: &VideoInfo, args: &PropMap) -> FilterResult<Self> {
        let mut parsed = AverageArgs::default();

        for i in 0..args.num_elements("value_exclude") {
            let value = args
                .get_int_saturated("value_exclude", i)
                .map_err(|e| invalid_argument(e.to_string()))?;
            parsed.value_exclude.push(i64::from(value));
        }
        if args.contains("plane") {
            parsed.plane = args
                .get_int_saturated("plane", 0)
                .map(i64::from)
                .map_err(|e| invalid_argument(e.to_string()))?;
        }
        if args.contains("prop") {
            let data = args
                .get_data("prop")
                .map_err(|e| invalid_argument(e.to_string()))?;
            let prop = std::str::from_utf8(data)
                .map_err(|_| invalid_argument("prop must be valid UTF-8".to_string()))?;
            parsed.prop = Some(prop.to_string());
        }

        Self::new(info, parsed)
    }

    pub fn plane(&self) -> usize {
        self.plane
    }

    pub fn exclusion_set(&self) -> &ExclusionSet {
        &self.exclude
    }

    /// Name of the property the mean is written to.
    pub fn prop(&self) -> &str {
        &self.prop
    }
}

fn invalid_argument(message: String) -> FilterError {
    FilterError::InvalidArgument {
        filter: NAME,
        message,
    }
}

impl FrameFilter for PlaneAverage {
    fn name(&self) -> &'static str {
        NAME
    }

    fn video_info(&self) -> &VideoInfo {
        &self.info
    }

    fn get_frame(&self, n: usize, src: &Frame) -> FilterResult<Frame> {
        check_frame(NAME, &self.info, src)?;
        let mean = plane_average(&src.plane(self.plane)?, &self.exclude);
        log::trace!("{NAME}: frame {n} {} = {mean}", self.prop);

        let mut dst = src.clone();
        dst.props_mut().set_float(&self.prop, mean);
        Ok(dst)
    }
}
