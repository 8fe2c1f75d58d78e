//! Frame filter interface
//!
//! A [`FrameFilter`] turns one source frame into one output frame. The
//! statistics filters copy the source unchanged and add properties.

use crate::{FilterError, FilterResult};
use planestats_core::{Frame, VideoInfo};

/// Default property written by [`PlaneAverage`](crate::PlaneAverage).
pub const PROP_AVERAGE: &str = "psmAvg";
/// Property written by [`PlaneMinMax`](crate::PlaneMinMax) for the low threshold.
pub const PROP_MIN: &str = "psmMin";
/// Property written by [`PlaneMinMax`](crate::PlaneMinMax) for the high threshold.
pub const PROP_MAX: &str = "psmMax";

/// A per-frame filter over a clip
///
/// Implementations hold only immutable configuration, so one filter can
/// serve any number of frames on any number of threads at once.
pub trait FrameFilter: Send + Sync {
    /// Filter name used in messages.
    fn name(&self) -> &'static str;

    /// Properties of the output clip.
    fn video_info(&self) -> &VideoInfo;

    /// Produce output frame `n` from its source frame.
    fn get_frame(&self, n: usize, src: &Frame) -> FilterResult<Frame>;
}

/// Check that `frame` has the format and size the filter was built for.
pub(crate) fn check_frame(
    filter: &'static str,
    info: &VideoInfo,
    frame: &Frame,
) -> FilterResult<()> {
    if *frame.format() != info.format
        || frame.width() != info.width
        || frame.height() != info.height
    {
        return Err(FilterError::FormatMismatch { filter });
    }
    Ok(())
}

/// Validate a plane argument against the clip's plane count.
pub(crate) fn check_plane(
    filter: &'static str,
    info: &VideoInfo,
    plane: i64,
) -> FilterResult<usize> {
    if plane < 0 || plane >= i64::from(info.format.num_planes()) {
        log::warn!("{filter}: rejecting plane {plane}");
        return Err(FilterError::InvalidPlane { filter, plane });
    }
    Ok(plane as usize)
}
