use smallvec::SmallVec;

use crate::denoise::config::FilterConfig;
use crate::foundation::error::DenoiseResult;
use crate::format::video::VideoFormat;
use crate::frame::video_frame::{PlaneMut, PlaneRef};

/// Scalar parameters forwarded to the kernel for every plane of every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelParams {
    /// Temporal half-window size; `sources.len() == 2 * radius + 1`.
    pub radius: u32,
    /// Blend coefficient for the "low" band.
    pub alpha_low: f32,
    /// Blend coefficient for the "mid" band.
    pub alpha_mid: f32,
    /// Blend coefficient for the "high" band.
    pub alpha_high: f32,
    /// Overall scale factor.
    pub strength: f32,
}

impl From<&FilterConfig> for KernelParams {
    fn from(c: &FilterConfig) -> Self {
        Self {
            radius: c.radius,
            alpha_low: c.alpha_low,
            alpha_mid: c.alpha_mid,
            alpha_high: c.alpha_high,
            strength: c.strength,
        }
    }
}

/// One plane of one output frame, ready for a kernel call.
///
/// `sources` are in window order: index `radius` is the center frame. All sources and the target
/// share `width`, `height`, and the sample layout in `format`; strides may differ.
#[derive(Debug)]
pub struct PlaneView<'a> {
    /// Plane index within the frame.
    pub plane: usize,
    /// Width in samples.
    pub width: u32,
    /// Height in rows.
    pub height: u32,
    /// Sample layout shared by every buffer.
    pub format: VideoFormat,
    /// Read-only source planes in temporal order.
    pub sources: SmallVec<[PlaneRef<'a>; 8]>,
    /// Output plane.
    pub target: PlaneMut<'a>,
}

impl PlaneView<'_> {
    /// Bytes of visible samples per row.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * usize::from(self.format.bytes_per_sample)
    }
}

/// The pixel algorithm behind the filter.
///
/// Called once per plane per output frame. The kernel must fully initialize the target's visible
/// region and must not read beyond `height` rows of `row_bytes` per row in any buffer. It may be
/// invoked concurrently for different frames and keeps no state between calls.
pub trait DenoiseKernel: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Whether this kernel handles `format`. Checked once when the filter is created.
    fn supports(&self, _format: &VideoFormat) -> bool {
        true
    }

    /// Denoise one plane.
    fn denoise_plane(&self, view: &mut PlaneView<'_>, params: &KernelParams) -> DenoiseResult<()>;
}
