use std::sync::Arc;

use smallvec::SmallVec;

use crate::foundation::error::{DenoiseError, DenoiseResult};
use crate::format::video::{SampleType, VideoFormat};
use crate::frame::props::FrameProps;

/// Row alignment of every plane buffer, in bytes.
pub const STRIDE_ALIGN: usize = 64;

/// Shared, immutable frame as handed between nodes.
pub type FrameRef = Arc<VideoFrame>;

/// One plane's pixel storage.
#[derive(Clone, Debug)]
struct Plane {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

/// Read-only view of one plane: buffer plus row stride in bytes.
#[derive(Clone, Copy, Debug)]
pub struct PlaneRef<'a> {
    /// Backing bytes, `stride * height` long.
    pub data: &'a [u8],
    /// Byte distance between consecutive rows.
    pub stride: usize,
}

impl<'a> PlaneRef<'a> {
    /// Borrow the first `row_bytes` bytes of row `y`.
    pub fn row(&self, y: usize, row_bytes: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start..start + row_bytes]
    }
}

/// Writable view of one plane: buffer plus row stride in bytes.
#[derive(Debug)]
pub struct PlaneMut<'a> {
    /// Backing bytes, `stride * height` long.
    pub data: &'a mut [u8],
    /// Byte distance between consecutive rows.
    pub stride: usize,
}

impl PlaneMut<'_> {
    /// Mutably borrow the first `row_bytes` bytes of row `y`.
    pub fn row_mut(&mut self, y: usize, row_bytes: usize) -> &mut [u8] {
        let start = y * self.stride;
        &mut self.data[start..start + row_bytes]
    }
}

/// A planar video frame with per-plane strides and a property map.
#[derive(Clone, Debug)]
pub struct VideoFrame {
    format: VideoFormat,
    width: u32,
    height: u32,
    planes: SmallVec<[Plane; 3]>,
    props: FrameProps,
}

impl VideoFrame {
    /// Allocate a zero-filled frame.
    pub fn new(format: VideoFormat, width: u32, height: u32) -> DenoiseResult<Self> {
        format.validate()?;
        if width == 0 || height == 0 {
            return Err(DenoiseError::format("frame width and height must be > 0"));
        }
        let bps = usize::from(format.bytes_per_sample);
        let mut planes = SmallVec::new();
        for p in 0..usize::from(format.num_planes) {
            let pw = format.plane_width(p, width);
            let ph = format.plane_height(p, height);
            let row_bytes = (pw as usize)
                .checked_mul(bps)
                .ok_or_else(|| DenoiseError::format("plane row size overflow"))?;
            let stride = row_bytes
                .checked_next_multiple_of(STRIDE_ALIGN)
                .ok_or_else(|| DenoiseError::format("plane stride overflow"))?;
            let len = stride
                .checked_mul(ph as usize)
                .ok_or_else(|| DenoiseError::format("plane buffer size overflow"))?;
            planes.push(Plane {
                width: pw,
                height: ph,
                stride,
                data: vec![0u8; len],
            });
        }
        Ok(Self {
            format,
            width,
            height,
            planes,
            props: FrameProps::new(),
        })
    }

    /// Allocate a frame with the template's format and geometry, copying its properties.
    pub fn new_like(template: &VideoFrame) -> DenoiseResult<Self> {
        let mut out = Self::new(template.format, template.width, template.height)?;
        out.props = template.props.clone();
        Ok(out)
    }

    /// Pixel format.
    pub fn format(&self) -> VideoFormat {
        self.format
    }

    /// Number of planes.
    pub fn num_planes(&self) -> usize {
        self.planes.len()
    }

    /// Width of `plane` in samples. Panics if `plane` is out of range.
    pub fn width(&self, plane: usize) -> u32 {
        self.planes[plane].width
    }

    /// Height of `plane` in rows. Panics if `plane` is out of range.
    pub fn height(&self, plane: usize) -> u32 {
        self.planes[plane].height
    }

    /// Row stride of `plane` in bytes. Panics if `plane` is out of range.
    pub fn stride(&self, plane: usize) -> usize {
        self.planes[plane].stride
    }

    /// Bytes of visible samples in one row of `plane`.
    pub fn row_bytes(&self, plane: usize) -> usize {
        self.planes[plane].width as usize * usize::from(self.format.bytes_per_sample)
    }

    /// Read view of `plane`.
    pub fn plane(&self, plane: usize) -> PlaneRef<'_> {
        let p = &self.planes[plane];
        PlaneRef {
            data: &p.data,
            stride: p.stride,
        }
    }

    /// Write view of `plane`.
    pub fn plane_mut(&mut self, plane: usize) -> PlaneMut<'_> {
        let p = &mut self.planes[plane];
        PlaneMut {
            data: &mut p.data,
            stride: p.stride,
        }
    }

    /// Write views of every plane at once, in plane order.
    pub fn planes_mut(&mut self) -> impl Iterator<Item = PlaneMut<'_>> {
        self.planes.iter_mut().map(|p| PlaneMut {
            data: &mut p.data,
            stride: p.stride,
        })
    }

    /// Frame properties.
    pub fn props(&self) -> &FrameProps {
        &self.props
    }

    /// Mutable frame properties.
    pub fn props_mut(&mut self) -> &mut FrameProps {
        &mut self.props
    }

    /// Set every visible sample of `plane` to `value`.
    ///
    /// Float planes receive `value` converted to a float. Half-precision samples above 2048
    /// are rounded toward zero.
    pub fn fill_plane(&mut self, plane: usize, value: u16) {
        let sample: SmallVec<[u8; 4]> = match (self.format.sample_type, self.format.bytes_per_sample)
        {
            (SampleType::Integer, 1) => SmallVec::from_slice(&[value as u8]),
            (SampleType::Integer, _) => SmallVec::from_slice(&value.to_ne_bytes()),
            (SampleType::Float, 2) => SmallVec::from_slice(&half_bits(value).to_ne_bytes()),
            (SampleType::Float, _) => SmallVec::from_slice(&f32::from(value).to_ne_bytes()),
        };
        let row_bytes = self.row_bytes(plane);
        let height = self.height(plane) as usize;
        let mut view = self.plane_mut(plane);
        for y in 0..height {
            for px in view.row_mut(y, row_bytes).chunks_exact_mut(sample.len()) {
                px.copy_from_slice(&sample);
            }
        }
    }

    /// Copy tightly packed samples (no row padding) into `plane`.
    pub fn write_packed_plane(&mut self, plane: usize, packed: &[u8]) -> DenoiseResult<()> {
        let row_bytes = self.row_bytes(plane);
        let height = self.height(plane) as usize;
        if packed.len() != row_bytes * height {
            return Err(DenoiseError::format(format!(
                "packed plane {plane} has {} bytes, expected {}",
                packed.len(),
                row_bytes * height
            )));
        }
        let mut view = self.plane_mut(plane);
        for (y, src) in packed.chunks_exact(row_bytes).enumerate() {
            view.row_mut(y, row_bytes).copy_from_slice(src);
        }
        Ok(())
    }

    /// Copy the visible samples of `plane` into a tightly packed buffer.
    pub fn packed_plane(&self, plane: usize) -> Vec<u8> {
        let row_bytes = self.row_bytes(plane);
        let height = self.height(plane) as usize;
        let view = self.plane(plane);
        let mut out = Vec::with_capacity(row_bytes * height);
        for y in 0..height {
            out.extend_from_slice(view.row(y, row_bytes));
        }
        out
    }

    /// Stable 64-bit hash of geometry and visible samples. Stride padding is ignored.
    pub fn fingerprint(&self) -> u64 {
        let mut h = xxhash_rust::xxh3::Xxh3::new();
        h.update(&self.width.to_le_bytes());
        h.update(&self.height.to_le_bytes());
        h.update(&[self.format.bytes_per_sample, self.format.num_planes]);
        for p in 0..self.num_planes() {
            let row_bytes = self.row_bytes(p);
            let view = self.plane(p);
            for y in 0..self.height(p) as usize {
                h.update(view.row(y, row_bytes));
            }
        }
        h.digest()
    }
}

/// IEEE half-precision bit pattern for an integer sample, truncating the mantissa.
fn half_bits(value: u16) -> u16 {
    if value == 0 {
        return 0;
    }
    let exp = 15 - value.leading_zeros() as u16;
    let mantissa = if exp <= 10 {
        value << (10 - exp)
    } else {
        value >> (exp - 10)
    };
    ((exp + 15) << 10) | (mantissa & 0x3ff)
}

#[cfg(test)]
#[path = "../../tests/unit/frame/video_frame.rs"]
mod tests;
