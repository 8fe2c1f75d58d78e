//! Sample-domain helpers shared by the statistics kernels
//!
//! Each storage representation implements [`Sample`], which fixes:
//!
//! - the accumulator used for the exclusion mean (`u64` for integers,
//!   `f64` for floats, never mixed)
//! - how the accumulated sum is normalized to a mean
//! - the histogram domain and the bucket a sample falls into
//! - how a histogram bucket is reported as a threshold value
//!
//! Integer samples are normalized by `2^bits - 1`. Float samples are
//! taken as already normalized to [0, 1] and are quantized to 65536
//! histogram buckets with `(x * 65535 + 0.5)` truncated and clamped.

use crate::exclusion::ExclusionSet;
use std::ops::AddAssign;

/// Highest float histogram bucket; also the float quantization scale.
pub const FLOAT_QUANT_MAX: usize = 65535;

/// Number of float histogram buckets.
pub const FLOAT_BUCKETS: usize = FLOAT_QUANT_MAX + 1;

/// Threshold value reported by the histogram kernel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// Raw sample value of an integer plane
    Int(i64),
    /// Normalized value of a float plane (`bucket / 65535`)
    Float(f64),
}

impl Threshold {
    /// Value as f64, whatever the representation.
    pub fn as_f64(self) -> f64 {
        match self {
            Threshold::Int(v) => v as f64,
            Threshold::Float(v) => v,
        }
    }
}

/// A sample storage representation the kernels are generic over
pub trait Sample: Copy + Send + Sync + 'static {
    /// Accumulator for the exclusion mean
    type Accum: Copy + Default + AddAssign;

    /// Widen one sample into the accumulator domain.
    fn widen(self) -> Self::Accum;

    /// Whether this sample is a member of `set`.
    fn is_excluded(self, set: &ExclusionSet) -> bool;

    /// Turn an accumulated sum over `count` samples into a mean.
    ///
    /// `count` is never 0.
    fn normalize(sum: Self::Accum, count: u64, bits_per_sample: u32) -> f64;

    /// Number of histogram buckets for this representation.
    fn histogram_len(bits_per_sample: u32) -> usize;

    /// Histogram bucket of this sample, saturated to `max_bucket`.
    fn bucket(self, max_bucket: usize) -> usize;

    /// Report a histogram bucket as a threshold value.
    fn threshold(bucket: usize) -> Threshold;
}

/// `2^bits - 1`
#[inline]
pub fn max_integer_value(bits_per_sample: u32) -> u64 {
    (1u64 << bits_per_sample) - 1
}

#[inline]
fn normalize_integer(sum: u64, count: u64, bits_per_sample: u32) -> f64 {
    sum as f64 / (count * max_integer_value(bits_per_sample)) as f64
}

#[inline]
fn integer_histogram_len(bits_per_sample: u32) -> usize {
    1usize << bits_per_sample
}

impl Sample for u8 {
    type Accum = u64;

    #[inline]
    fn widen(self) -> u64 {
        u64::from(self)
    }

    #[inline]
    fn is_excluded(self, set: &ExclusionSet) -> bool {
        set.contains_int(i64::from(self))
    }

    fn normalize(sum: u64, count: u64, bits_per_sample: u32) -> f64 {
        normalize_integer(sum, count, bits_per_sample)
    }

    fn histogram_len(bits_per_sample: u32) -> usize {
        integer_histogram_len(bits_per_sample)
    }

    #[inline]
    fn bucket(self, max_bucket: usize) -> usize {
        usize::from(self).min(max_bucket)
    }

    fn threshold(bucket: usize) -> Threshold {
        Threshold::Int(bucket as i64)
    }
}

impl Sample for u16 {
    type Accum = u64;

    #[inline]
    fn widen(self) -> u64 {
        u64::from(self)
    }

    #[inline]
    fn is_excluded(self, set: &ExclusionSet) -> bool {
        set.contains_int(i64::from(self))
    }

    fn normalize(sum: u64, count: u64, bits_per_sample: u32) -> f64 {
        normalize_integer(sum, count, bits_per_sample)
    }

    fn histogram_len(bits_per_sample: u32) -> usize {
        integer_histogram_len(bits_per_sample)
    }

    // Samples above the declared bit depth land in the top bucket
    #[inline]
    fn bucket(self, max_bucket: usize) -> usize {
        usize::from(self).min(max_bucket)
    }

    fn threshold(bucket: usize) -> Threshold {
        Threshold::Int(bucket as i64)
    }
}

impl Sample for f32 {
    type Accum = f64;

    #[inline]
    fn widen(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn is_excluded(self, set: &ExclusionSet) -> bool {
        set.contains_float(self)
    }

    fn normalize(sum: f64, count: u64, _bits_per_sample: u32) -> f64 {
        sum / count as f64
    }

    fn histogram_len(_bits_per_sample: u32) -> usize {
        FLOAT_BUCKETS
    }

    #[inline]
    fn bucket(self, max_bucket: usize) -> usize {
        quantize_float(self).min(max_bucket)
    }

    fn threshold(bucket: usize) -> Threshold {
        Threshold::Float(bucket as f64 / FLOAT_QUANT_MAX as f64)
    }
}

/// Quantize a normalized float sample to a 16-bit histogram bucket.
///
/// Rounds half up by adding 0.5 and truncating, in single precision,
/// then clamps to `[0, 65535]`. NaN maps to bucket 0.
#[inline]
pub fn quantize_float(value: f32) -> usize {
    let scaled = (FLOAT_QUANT_MAX as f32 * value + 0.5) as i32;
    scaled.clamp(0, FLOAT_QUANT_MAX as i32) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_float() {
        assert_eq!(quantize_float(0.0), 0);
        assert_eq!(quantize_float(0.5), 32768);
        assert_eq!(quantize_float(1.0), 65535);
        assert_eq!(quantize_float(-0.25), 0);
        assert_eq!(quantize_float(1.5), 65535);
        assert_eq!(quantize_float(f32::NAN), 0);
        assert_eq!(quantize_float(f32::INFINITY), 65535);
        // Just below the half-way point rounds down
        assert_eq!(quantize_float(0.4 / 65535.0), 0);
        assert_eq!(quantize_float(0.6 / 65535.0), 1);
    }

    #[test]
    fn test_integer_normalization() {
        assert_eq!(max_integer_value(8), 255);
        assert_eq!(max_integer_value(10), 1023);
        assert_eq!(max_integer_value(16), 65535);
        assert_eq!(u8::normalize(255 * 4, 4, 8), 1.0);
        assert_eq!(u16::normalize(1023, 2, 10), 0.5);
    }

    #[test]
    fn test_float_normalization_has_no_scale() {
        assert_eq!(f32::normalize(1.5, 3, 32), 0.5);
    }

    #[test]
    fn test_histogram_len() {
        assert_eq!(u8::histogram_len(8), 256);
        assert_eq!(u16::histogram_len(10), 1024);
        assert_eq!(u16::histogram_len(16), 65536);
        assert_eq!(f32::histogram_len(32), 65536);
    }

    #[test]
    fn test_bucket_saturates() {
        assert_eq!(1000u16.bucket(1023), 1000);
        assert_eq!(4000u16.bucket(1023), 1023);
        assert_eq!(200u8.bucket(255), 200);
    }

    #[test]
    fn test_threshold_output() {
        assert_eq!(u8::threshold(17), Threshold::Int(17));
        assert_eq!(f32::threshold(65535), Threshold::Float(1.0));
        assert_eq!(f32::threshold(0).as_f64(), 0.0);
    }
}
