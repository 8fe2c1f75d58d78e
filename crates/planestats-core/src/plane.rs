//! Plane sample buffers and read-only plane views
//!
//! A [`Plane`] owns one channel of a frame as a typed sample buffer with a
//! row stride measured in samples. Statistics never touch `Plane` directly;
//! they read a borrowed [`PlaneView`], which carries the geometry, the bit
//! depth and the typed sample slice for the duration of one call.
//!
//! # Layout
//!
//! - Rows are stored top to bottom, `stride` samples apart
//! - Only the first `width` samples of each row are addressable
//! - The last row does not need padding out to `stride`

use crate::error::{Error, Result};
use crate::format::{SampleType, check_bits};

/// Owned sample storage for one plane
#[derive(Debug, Clone, PartialEq)]
pub enum PlaneData {
    U8(Vec<u8>),
    U16(Vec<u16>),
    F32(Vec<f32>),
}

impl PlaneData {
    /// Allocate `len` zeroed samples of the given representation.
    pub fn zeroed(sample_type: SampleType, len: usize) -> Self {
        match sample_type {
            SampleType::U8 => PlaneData::U8(vec![0; len]),
            SampleType::U16 => PlaneData::U16(vec![0; len]),
            SampleType::F32 => PlaneData::F32(vec![0.0; len]),
        }
    }

    pub fn sample_type(&self) -> SampleType {
        match self {
            PlaneData::U8(_) => SampleType::U8,
            PlaneData::U16(_) => SampleType::U16,
            PlaneData::F32(_) => SampleType::F32,
        }
    }

    /// Number of stored samples, including row padding.
    pub fn len(&self) -> usize {
        match self {
            PlaneData::U8(v) => v.len(),
            PlaneData::U16(v) => v.len(),
            PlaneData::F32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_samples(&self) -> PlaneSamples<'_> {
        match self {
            PlaneData::U8(v) => PlaneSamples::U8(v),
            PlaneData::U16(v) => PlaneSamples::U16(v),
            PlaneData::F32(v) => PlaneSamples::F32(v),
        }
    }
}

/// One channel of a frame
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: u32,
    height: u32,
    stride: usize,
    data: PlaneData,
}

impl Plane {
    /// Create a zero-filled plane with `stride == width`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, sample_type: SampleType) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            stride: width as usize,
            data: PlaneData::zeroed(sample_type, len),
        })
    }

    /// Wrap an existing sample buffer.
    ///
    /// # Arguments
    ///
    /// * `width`, `height` - Addressable region in samples
    /// * `stride` - Distance between row starts in samples (>= width)
    /// * `data` - Samples, at least `stride * (height - 1) + width` long
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimension`] if width or height is 0
    /// - [`Error::InvalidStride`] if `stride < width`
    /// - [`Error::BufferTooSmall`] if `data` cannot hold the region
    pub fn from_data(width: u32, height: u32, stride: usize, data: PlaneData) -> Result<Self> {
        check_geometry(width, height, stride, data.len())?;
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn sample_type(&self) -> SampleType {
        self.data.sample_type()
    }

    pub fn data(&self) -> &PlaneData {
        &self.data
    }

    /// Replace the samples, keeping width, height and stride.
    ///
    /// # Errors
    ///
    /// - [`Error::SampleTypeMismatch`] if `data` uses another representation
    /// - [`Error::BufferTooSmall`] if `data` cannot hold the region
    pub fn set_data(&mut self, data: PlaneData) -> Result<()> {
        if data.sample_type() != self.sample_type() {
            return Err(Error::SampleTypeMismatch {
                expected: self.sample_type(),
                actual: data.sample_type(),
            });
        }
        check_geometry(self.width, self.height, self.stride, data.len())?;
        self.data = data;
        Ok(())
    }

    /// Borrow the plane as a read-only view.
    ///
    /// `bits_per_sample` comes from the owning frame's format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if the bit depth does not fit the
    /// sample representation.
    pub fn view(&self, bits_per_sample: u32) -> Result<PlaneView<'_>> {
        check_bits(self.sample_type(), bits_per_sample)?;
        Ok(PlaneView {
            width: self.width,
            height: self.height,
            stride: self.stride,
            bits_per_sample,
            samples: self.data.as_samples(),
        })
    }
}

/// Borrowed typed samples of one plane
#[derive(Debug, Clone, Copy)]
pub enum PlaneSamples<'a> {
    U8(&'a [u8]),
    U16(&'a [u16]),
    F32(&'a [f32]),
}

/// Read-only view of one plane
///
/// The view never outlives the call it is handed to; nothing retains it.
#[derive(Debug, Clone, Copy)]
pub struct PlaneView<'a> {
    width: u32,
    height: u32,
    stride: usize,
    bits_per_sample: u32,
    samples: PlaneSamples<'a>,
}

impl<'a> PlaneView<'a> {
    /// Build a view directly over a sample slice.
    ///
    /// # Errors
    ///
    /// Same geometry checks as [`Plane::from_data`], plus
    /// [`Error::InvalidFormat`] if `bits_per_sample` does not fit the
    /// sample representation (see [`SampleType::supports_bits`]).
    pub fn new(
        width: u32,
        height: u32,
        stride: usize,
        bits_per_sample: u32,
        samples: PlaneSamples<'a>,
    ) -> Result<Self> {
        let len = match samples {
            PlaneSamples::U8(s) => s.len(),
            PlaneSamples::U16(s) => s.len(),
            PlaneSamples::F32(s) => s.len(),
        };
        check_geometry(width, height, stride, len)?;
        let view = Self {
            width,
            height,
            stride,
            bits_per_sample,
            samples,
        };
        check_bits(view.sample_type(), bits_per_sample)?;
        Ok(view)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn bits_per_sample(&self) -> u32 {
        self.bits_per_sample
    }

    pub fn samples(&self) -> PlaneSamples<'a> {
        self.samples
    }

    pub fn sample_type(&self) -> SampleType {
        match self.samples {
            PlaneSamples::U8(_) => SampleType::U8,
            PlaneSamples::U16(_) => SampleType::U16,
            PlaneSamples::F32(_) => SampleType::F32,
        }
    }

    /// Number of addressable samples (`width * height`).
    pub fn len(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Check that `len` samples can hold a `width` x `height` region rows
/// `stride` samples apart.
fn check_geometry(width: u32, height: u32, stride: usize, len: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    if stride < width as usize {
        return Err(Error::InvalidStride { stride, width });
    }
    let needed = stride * (height as usize - 1) + width as usize;
    if len < needed {
        return Err(Error::BufferTooSmall {
            needed,
            actual: len,
        });
    }
    Ok(())
}

/// Iterate the addressable rows of a typed sample slice.
///
/// Each item is exactly `width` samples long; padding between `width`
/// and `stride` is skipped.
pub fn rows<T>(
    samples: &[T],
    width: u32,
    height: u32,
    stride: usize,
) -> impl Iterator<Item = &[T]> {
    let width = width as usize;
    (0..height as usize).map(move |y| {
        let start = y * stride;
        &samples[start..start + width]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_new_zeroed() {
        let plane = Plane::new(4, 3, SampleType::U16).unwrap();
        assert_eq!(plane.stride(), 4);
        assert_eq!(plane.data().len(), 12);
        assert_eq!(plane.sample_type(), SampleType::U16);
    }

    #[test]
    fn test_plane_invalid_dimension() {
        assert!(Plane::new(0, 3, SampleType::U8).is_err());
        assert!(Plane::new(3, 0, SampleType::F32).is_err());
    }

    #[test]
    fn test_from_data_checks_stride_and_len() {
        let data = PlaneData::U8(vec![0; 10]);
        assert!(matches!(
            Plane::from_data(4, 2, 3, data.clone()),
            Err(Error::InvalidStride { .. })
        ));
        // 6 * 1 + 4 = 10 samples is exactly enough
        assert!(Plane::from_data(4, 2, 6, data.clone()).is_ok());
        assert!(matches!(
            Plane::from_data(4, 2, 7, data),
            Err(Error::BufferTooSmall {
                needed: 11,
                actual: 10
            })
        ));
    }

    #[test]
    fn test_rows_skip_padding() {
        let samples = [1u8, 2, 99, 3, 4, 99, 5, 6];
        let rows: Vec<&[u8]> = rows(&samples, 2, 3, 3).collect();
        assert_eq!(rows, vec![&[1u8, 2][..], &[3u8, 4][..], &[5u8, 6][..]]);
    }

    #[test]
    fn test_view_reports_geometry() {
        let plane = Plane::from_data(2, 2, 3, PlaneData::F32(vec![0.0; 5])).unwrap();
        let view = plane.view(32).unwrap();
        assert_eq!(view.len(), 4);
        assert_eq!(view.stride(), 3);
        assert_eq!(view.bits_per_sample(), 32);
        assert_eq!(view.sample_type(), SampleType::F32);
    }

    #[test]
    fn test_set_data_keeps_geometry() {
        let mut plane = Plane::from_data(2, 2, 3, PlaneData::U8(vec![0; 5])).unwrap();
        plane.set_data(PlaneData::U8(vec![1, 2, 9, 3, 4])).unwrap();
        assert_eq!(plane.stride(), 3);
        assert_eq!(plane.data(), &PlaneData::U8(vec![1, 2, 9, 3, 4]));

        assert!(matches!(
            plane.set_data(PlaneData::U8(vec![1; 4])),
            Err(Error::BufferTooSmall {
                needed: 5,
                actual: 4
            })
        ));
        assert!(matches!(
            plane.set_data(PlaneData::U16(vec![1; 5])),
            Err(Error::SampleTypeMismatch {
                expected: SampleType::U8,
                actual: SampleType::U16
            })
        ));
        // Rejected buffers leave the old samples in place
        assert_eq!(plane.data(), &PlaneData::U8(vec![1, 2, 9, 3, 4]));
    }

    #[test]
    fn test_view_rejects_bit_depth() {
        let samples = [5u16];
        for bits in [0, 17, 40, 64] {
            assert!(matches!(
                PlaneView::new(1, 1, 1, bits, PlaneSamples::U16(&samples)),
                Err(Error::InvalidFormat(_))
            ));
        }
        assert!(PlaneView::new(1, 1, 1, 16, PlaneSamples::U16(&samples)).is_ok());
        assert!(PlaneView::new(1, 1, 1, 9, PlaneSamples::U8(&[200])).is_err());
        assert!(PlaneView::new(1, 1, 1, 8, PlaneSamples::F32(&[0.5])).is_err());

        let plane = Plane::new(1, 1, SampleType::U8).unwrap();
        assert!(plane.view(64).is_err());
        assert!(plane.view(8).is_ok());
    }
}
