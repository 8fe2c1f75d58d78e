//! Video frames
//!
//! A [`Frame`] is a set of planes sharing one [`VideoFormat`] plus a
//! [`PropMap`] of per-frame metadata. Cloning a frame is the "copy frame"
//! operation filters start from: samples are duplicated unchanged and the
//! properties are copied so the filter can add its own.

use crate::error::{Error, Result};
use crate::format::VideoFormat;
use crate::plane::{Plane, PlaneView};
use crate::props::PropMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    format: VideoFormat,
    width: u32,
    height: u32,
    planes: Vec<Plane>,
    props: PropMap,
}

impl Frame {
    /// Allocate a zero-filled frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(format: VideoFormat, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let planes = (0..format.num_planes() as usize)
            .map(|p| {
                let (w, h) = format.plane_dimensions(width, height, p);
                Plane::new(w, h, format.sample_type())
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            format,
            width,
            height,
            planes,
            props: PropMap::new(),
        })
    }

    /// Assemble a frame from existing planes.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidFormat`] if the plane count differs from the format
    /// - [`Error::SampleTypeMismatch`] if a plane uses another representation
    /// - [`Error::DimensionMismatch`] if a plane has the wrong size
    pub fn from_planes(
        format: VideoFormat,
        width: u32,
        height: u32,
        planes: Vec<Plane>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if planes.len() != format.num_planes() as usize {
            return Err(Error::InvalidFormat(format!(
                "format has {} planes, got {}",
                format.num_planes(),
                planes.len()
            )));
        }
        for (p, plane) in planes.iter().enumerate() {
            if plane.sample_type() != format.sample_type() {
                return Err(Error::SampleTypeMismatch {
                    expected: format.sample_type(),
                    actual: plane.sample_type(),
                });
            }
            let expected = format.plane_dimensions(width, height, p);
            let actual = (plane.width(), plane.height());
            if expected != actual {
                return Err(Error::DimensionMismatch { expected, actual });
            }
        }
        Ok(Self {
            format,
            width,
            height,
            planes,
            props: PropMap::new(),
        })
    }

    pub fn format(&self) -> &VideoFormat {
        &self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn num_planes(&self) -> usize {
        self.planes.len()
    }

    /// Read-only view of plane `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlaneOutOfRange`] if `index >= num_planes()`.
    pub fn plane(&self, index: usize) -> Result<PlaneView<'_>> {
        let plane = self.planes.get(index).ok_or(Error::PlaneOutOfRange {
            index,
            num_planes: self.planes.len(),
        })?;
        plane.view(self.format.bits_per_sample())
    }

    /// Mutable access to plane `index` for filling samples.
    ///
    /// Samples are replaced through [`Plane::set_data`], which keeps the
    /// plane's geometry and representation.
    pub fn plane_mut(&mut self, index: usize) -> Result<&mut Plane> {
        let num_planes = self.planes.len();
        self.planes
            .get_mut(index)
            .ok_or(Error::PlaneOutOfRange { index, num_planes })
    }

    pub fn props(&self) -> &PropMap {
        &self.props
    }

    pub fn props_mut(&mut self) -> &mut PropMap {
        &mut self.props
    }

    /// Whether the sample data of both frames is identical.
    ///
    /// Properties are ignored.
    pub fn same_samples(&self, other: &Frame) -> bool {
        self.format == other.format
            && self.width == other.width
            && self.height == other.height
            && self.planes == other.planes
    }
}
