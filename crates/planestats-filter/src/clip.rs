//! Parallel clip processing
//!
//! Runs a [`FrameFilter`] over a whole clip on the rayon thread pool.
//! Frames are independent, so each one is handed to whichever worker is
//! free; output order matches input order.

use crate::FilterResult;
use crate::filter::FrameFilter;
use planestats_core::Frame;
use rayon::prelude::*;

/// Filter every frame of a clip in parallel.
///
/// # Arguments
///
/// * `filter` - Filter to apply
/// * `frames` - Source frames, indexed by frame number
///
/// # Returns
///
/// The output frames in input order, or the first error encountered.
pub fn process_clip<F>(filter: &F, frames: &[Frame]) -> FilterResult<Vec<Frame>>
where
    F: FrameFilter + ?Sized,
{
    log::debug!("{}: processing {} frames", filter.name(), frames.len());
    frames
        .par_iter()
        .enumerate()
        .map(|(n, frame)| filter.get_frame(n, frame))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AverageArgs, PlaneAverage};
    use planestats_core::{PlaneData, VideoFormat, VideoInfo};

    fn frame_with_value(value: u8) -> Frame {
        let mut frame = Frame::new(VideoFormat::gray8(), 4, 4).unwrap();
        frame
            .plane_mut(0)
            .unwrap()
            .set_data(PlaneData::U8(vec![value; 16]))
            .unwrap();
        frame
    }

    #[test]
    fn test_process_clip_preserves_order() {
        let frames: Vec<Frame> = (0..32).map(|i| frame_with_value(i as u8 * 8)).collect();
        let info = VideoInfo::new(VideoFormat::gray8(), 4, 4, frames.len());
        let filter = PlaneAverage::new(&info, AverageArgs::default()).unwrap();

        let out = process_clip(&filter, &frames).unwrap();
        assert_eq!(out.len(), 32);
        for (i, frame) in out.iter().enumerate() {
            let expected = (i * 8) as f64 / 255.0;
            assert_eq!(frame.props().get_float("psmAvg", 0).unwrap(), expected);
        }
    }

    #[test]
    fn test_process_clip_propagates_errors() {
        let info = VideoInfo::new(VideoFormat::gray8(), 4, 4, 2);
        let filter = PlaneAverage::new(&info, AverageArgs::default()).unwrap();
        let frames = vec![
            frame_with_value(1),
            Frame::new(VideoFormat::gray16(), 4, 4).unwrap(),
        ];
        assert!(process_clip(&filter, &frames).is_err());
    }

    #[test]
    fn test_process_clip_dyn_filter() {
        let info = VideoInfo::new(VideoFormat::gray8(), 4, 4, 1);
        let filter: Box<dyn FrameFilter> =
            Box::new(PlaneAverage::new(&info, AverageArgs::default()).unwrap());
        let out = process_clip(filter.as_ref(), &[frame_with_value(255)]).unwrap();
        assert_eq!(out[0].props().get_float("psmAvg", 0).unwrap(), 1.0);
    }
}
