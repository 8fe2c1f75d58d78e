//! Plane value histograms and percentile-threshold scans
//!
//! A [`Histogram`] counts how many samples of one plane fall into each
//! bucket of the sample domain: `2^bits` buckets for integer planes, or
//! 65536 quantized buckets for float planes. It is built fresh for every
//! frame and dropped after the threshold scans.
//!
//! The scans walk the buckets from one end, accumulating counts, and stop
//! at the first bucket where the running count strictly exceeds the
//! target. A scan that never exceeds its target reports the far end of
//! the domain.

use crate::sample::Sample;
use planestats_core::{PlaneSamples, PlaneView, rows};

/// Per-frame sample histogram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: Vec<u64>,
    total: u64,
}

impl Histogram {
    /// Count every addressable sample of `view`.
    ///
    /// Integer samples above the declared bit depth are counted in the
    /// top bucket.
    pub fn build(view: &PlaneView<'_>) -> Self {
        match view.samples() {
            PlaneSamples::U8(s) => Self::from_samples(s, view),
            PlaneSamples::U16(s) => Self::from_samples(s, view),
            PlaneSamples::F32(s) => Self::from_samples(s, view),
        }
    }

    /// Count the addressable samples of `view`, read from its typed slice.
    pub(crate) fn from_samples<T: Sample>(samples: &[T], view: &PlaneView<'_>) -> Self {
        let len = T::histogram_len(view.bits_per_sample());
        let max_bucket = len - 1;
        let mut counts = vec![0u64; len];

        for row in rows(samples, view.width(), view.height(), view.stride()) {
            for &pixel in row {
                counts[pixel.bucket(max_bucket)] += 1;
            }
        }

        Self {
            counts,
            total: view.len(),
        }
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of samples counted.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Lowest bucket whose inclusive low-end cumulative count exceeds `target`.
    ///
    /// Returns the highest bucket if no bucket qualifies.
    pub fn scan_min(&self, target: u64) -> usize {
        let mut count = 0u64;
        for (i, &c) in self.counts.iter().enumerate() {
            count += c;
            if count > target {
                return i;
            }
        }
        self.counts.len().saturating_sub(1)
    }

    /// Highest bucket whose inclusive high-end cumulative count exceeds `target`.
    ///
    /// Returns bucket 0 if no bucket qualifies.
    pub fn scan_max(&self, target: u64) -> usize {
        let mut count = 0u64;
        for (i, &c) in self.counts.iter().enumerate().rev() {
            count += c;
            if count > target {
                return i;
            }
        }
        0
    }
}

/// Population count a scan must exceed: `floor(total * fraction)`.
///
/// `fraction` is expected in [0, 1].
pub fn threshold_target(total: u64, fraction: f64) -> u64 {
    (total as f64 * fraction).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn histogram_u8(samples: &[u8]) -> Histogram {
        let view = PlaneView::new(
            samples.len() as u32,
            1,
            samples.len(),
            8,
            PlaneSamples::U8(samples),
        )
        .unwrap();
        Histogram::build(&view)
    }

    #[test]
    fn test_build_counts() {
        let hist = histogram_u8(&[0, 0, 5, 255]);
        assert_eq!(hist.len(), 256);
        assert_eq!(hist.total(), 4);
        assert_eq!(hist.counts()[0], 2);
        assert_eq!(hist.counts()[5], 1);
        assert_eq!(hist.counts()[255], 1);
        assert_eq!(hist.counts().iter().sum::<u64>(), 4);
    }

    #[test]
    fn test_build_clamps_out_of_domain_16bit() {
        let samples = [1023u16, 1024, 65535, 0];
        let view = PlaneView::new(4, 1, 4, 10, PlaneSamples::U16(&samples)).unwrap();
        let hist = Histogram::build(&view);
        assert_eq!(hist.len(), 1024);
        assert_eq!(hist.counts()[1023], 3);
        assert_eq!(hist.counts()[0], 1);
    }

    #[test]
    fn test_build_float_quantization() {
        let samples = [0.0f32, 0.5, 1.0, 2.0, -1.0];
        let view = PlaneView::new(5, 1, 5, 32, PlaneSamples::F32(&samples)).unwrap();
        let hist = Histogram::build(&view);
        assert_eq!(hist.len(), 65536);
        assert_eq!(hist.counts()[0], 2);
        assert_eq!(hist.counts()[32768], 1);
        assert_eq!(hist.counts()[65535], 2);
    }

    #[test]
    fn test_build_skips_row_padding() {
        // 2x2 region, stride 3; the padding sample 0 is not counted
        let samples = [10u8, 10, 0, 20, 20];
        let view = PlaneView::new(2, 2, 3, 8, PlaneSamples::U8(&samples)).unwrap();
        let hist = Histogram::build(&view);
        assert_eq!(hist.total(), 4);
        assert_eq!(hist.counts()[0], 0);
        assert_eq!(hist.counts()[10], 2);
        assert_eq!(hist.counts()[20], 2);
        assert_eq!(hist.counts().iter().sum::<u64>(), 4);
        assert_eq!(hist.scan_min(0), 10);
        assert_eq!(hist.scan_max(0), 20);
    }

    #[test]
    fn test_scan_strictly_exceeds() {
        // Cumulative low-end counts: 2, 3, 4
        let hist = histogram_u8(&[1, 1, 2, 3]);
        assert_eq!(hist.scan_min(0), 1);
        assert_eq!(hist.scan_min(1), 1);
        assert_eq!(hist.scan_min(2), 2);
        assert_eq!(hist.scan_min(3), 3);
        // High-end counts: 1, 2, 4
        assert_eq!(hist.scan_max(0), 3);
        assert_eq!(hist.scan_max(1), 2);
        assert_eq!(hist.scan_max(2), 1);
        assert_eq!(hist.scan_max(3), 1);
    }

    #[test]
    fn test_scan_no_match_defaults() {
        let hist = histogram_u8(&[10, 20]);
        assert_eq!(hist.scan_min(2), 255);
        assert_eq!(hist.scan_max(2), 0);
    }

    #[test]
    fn test_threshold_target() {
        assert_eq!(threshold_target(16, 0.4), 6);
        assert_eq!(threshold_target(3, 0.3), 0);
        assert_eq!(threshold_target(10, 0.3), 3);
        assert_eq!(threshold_target(100, 1.0), 100);
        assert_eq!(threshold_target(100, 0.0), 0);
    }
}
