//! Sample representation and video format descriptions
//!
//! A [`VideoFormat`] says how every plane of a frame is stored: the
//! sample representation, the number of significant bits, the number of
//! planes and the chroma subsampling applied to planes 1 and 2.

use crate::error::{Error, Result};

/// Sample storage representation
///
/// Every plane of a frame shares the same representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleType {
    /// 8-bit unsigned integer samples
    U8,
    /// 16-bit unsigned integer samples
    U16,
    /// 32-bit IEEE float samples, nominally normalized to [0, 1]
    F32,
}

impl SampleType {
    /// Whether `bits_per_sample` significant bits fit this representation.
    ///
    /// `U8` takes 1..=8, `U16` takes 1..=16 and `F32` exactly 32.
    pub fn supports_bits(self, bits_per_sample: u32) -> bool {
        match self {
            SampleType::U8 => (1..=8).contains(&bits_per_sample),
            SampleType::U16 => (1..=16).contains(&bits_per_sample),
            SampleType::F32 => bits_per_sample == 32,
        }
    }
}

/// Reject a bit depth the sample representation cannot hold.
pub(crate) fn check_bits(sample_type: SampleType, bits_per_sample: u32) -> Result<()> {
    if !sample_type.supports_bits(bits_per_sample) {
        return Err(Error::InvalidFormat(format!(
            "{bits_per_sample} bits per sample is not valid for {sample_type:?}"
        )));
    }
    Ok(())
}

/// Maximum number of planes in a frame.
pub const MAX_PLANES: u32 = 3;

/// Largest supported subsampling shift.
const MAX_SUBSAMPLING: u32 = 4;

/// Frame format shared by every frame of a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VideoFormat {
    sample_type: SampleType,
    bits_per_sample: u32,
    num_planes: u32,
    sub_sampling_w: u32,
    sub_sampling_h: u32,
}

impl VideoFormat {
    /// Create a validated format.
    ///
    /// # Arguments
    ///
    /// * `sample_type` - Storage representation
    /// * `bits_per_sample` - Significant bits: 1..=8 for `U8`, 1..=16 for
    ///   `U16`, exactly 32 for `F32`
    /// * `num_planes` - 1..=3
    /// * `sub_sampling_w`, `sub_sampling_h` - log2 chroma subsampling for
    ///   planes 1 and 2 (0..=4)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] for any out-of-range field.
    pub fn new(
        sample_type: SampleType,
        bits_per_sample: u32,
        num_planes: u32,
        sub_sampling_w: u32,
        sub_sampling_h: u32,
    ) -> Result<Self> {
        check_bits(sample_type, bits_per_sample)?;
        if num_planes == 0 || num_planes > MAX_PLANES {
            return Err(Error::InvalidFormat(format!(
                "plane count must be 1..={MAX_PLANES}, got {num_planes}"
            )));
        }
        if sub_sampling_w > MAX_SUBSAMPLING || sub_sampling_h > MAX_SUBSAMPLING {
            return Err(Error::InvalidFormat(format!(
                "subsampling {sub_sampling_w}x{sub_sampling_h} exceeds {MAX_SUBSAMPLING}"
            )));
        }
        if num_planes == 1 && (sub_sampling_w != 0 || sub_sampling_h != 0) {
            return Err(Error::InvalidFormat(
                "single-plane formats cannot be subsampled".to_string(),
            ));
        }
        Ok(Self {
            sample_type,
            bits_per_sample,
            num_planes,
            sub_sampling_w,
            sub_sampling_h,
        })
    }

    /// 8-bit single-plane format.
    pub fn gray8() -> Self {
        Self::gray(SampleType::U8, 8)
    }

    /// 16-bit single-plane format.
    pub fn gray16() -> Self {
        Self::gray(SampleType::U16, 16)
    }

    /// 32-bit float single-plane format.
    pub fn gray_f32() -> Self {
        Self::gray(SampleType::F32, 32)
    }

    /// 8-bit three-plane 4:2:0 format.
    pub fn yuv420p8() -> Self {
        Self {
            sample_type: SampleType::U8,
            bits_per_sample: 8,
            num_planes: 3,
            sub_sampling_w: 1,
            sub_sampling_h: 1,
        }
    }

    /// 16-bit storage, 10 significant bits, three-plane 4:2:0 format.
    pub fn yuv420p10() -> Self {
        Self {
            sample_type: SampleType::U16,
            bits_per_sample: 10,
            num_planes: 3,
            sub_sampling_w: 1,
            sub_sampling_h: 1,
        }
    }

    /// Three full-size float planes.
    pub fn rgbs() -> Self {
        Self {
            sample_type: SampleType::F32,
            bits_per_sample: 32,
            num_planes: 3,
            sub_sampling_w: 0,
            sub_sampling_h: 0,
        }
    }

    fn gray(sample_type: SampleType, bits_per_sample: u32) -> Self {
        Self {
            sample_type,
            bits_per_sample,
            num_planes: 1,
            sub_sampling_w: 0,
            sub_sampling_h: 0,
        }
    }

    pub fn sample_type(&self) -> SampleType {
        self.sample_type
    }

    pub fn bits_per_sample(&self) -> u32 {
        self.bits_per_sample
    }

    pub fn num_planes(&self) -> u32 {
        self.num_planes
    }

    pub fn sub_sampling_w(&self) -> u32 {
        self.sub_sampling_w
    }

    pub fn sub_sampling_h(&self) -> u32 {
        self.sub_sampling_h
    }

    /// Dimensions of `plane` for a frame of `width` x `height`.
    ///
    /// Plane 0 is always full size; the other planes are reduced by the
    /// subsampling shifts, rounding up.
    pub fn plane_dimensions(&self, width: u32, height: u32, plane: usize) -> (u32, u32) {
        if plane == 0 {
            return (width, height);
        }
        (
            width.div_ceil(1 << self.sub_sampling_w),
            height.div_ceil(1 << self.sub_sampling_h),
        )
    }
}

/// Clip-level properties a filter is constructed against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoInfo {
    /// Format shared by all frames
    pub format: VideoFormat,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Number of frames in the clip
    pub num_frames: usize,
}

impl VideoInfo {
    pub fn new(format: VideoFormat, width: u32, height: u32, num_frames: usize) -> Self {
        Self {
            format,
            width,
            height,
            num_frames,
        }
    }
}
