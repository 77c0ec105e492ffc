use smallvec::SmallVec;

use crate::denoise::kernel::{DenoiseKernel, KernelParams, PlaneView};
use crate::foundation::error::{DenoiseError, DenoiseResult};
use crate::format::video::{SampleType, VideoFormat};

/// Deterministic CPU kernel for 8- and 16-bit integer planes.
///
/// A source at temporal distance `d` from the center weighs `1` for `d == 0`, `alpha_low` for
/// `d == 1`, `alpha_mid` for `d == 2`, and `alpha_high` beyond; negative weights count as zero.
/// Each output sample is `center + strength * (weighted_mean - center)`, rounded and clamped to
/// the sample range.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarTemporalKernel;

impl ScalarTemporalKernel {
    /// Create the kernel.
    pub fn new() -> Self {
        Self
    }
}

fn weights(params: &KernelParams) -> SmallVec<[f32; 8]> {
    let r = i64::from(params.radius);
    (-r..=r)
        .map(|t| match t.unsigned_abs() {
            0 => 1.0,
            1 => params.alpha_low,
            2 => params.alpha_mid,
            _ => params.alpha_high,
        })
        .map(|w| if w.is_finite() { w.max(0.0) } else { 0.0 })
        .collect()
}

fn required_len(stride: usize, height: usize, row_bytes: usize) -> usize {
    (height - 1) * stride + row_bytes
}

impl DenoiseKernel for ScalarTemporalKernel {
    fn name(&self) -> &str {
        "scalar"
    }

    fn supports(&self, format: &VideoFormat) -> bool {
        format.sample_type == SampleType::Integer && matches!(format.bytes_per_sample, 1 | 2)
    }

    fn denoise_plane(&self, view: &mut PlaneView<'_>, params: &KernelParams) -> DenoiseResult<()> {
        let w = weights(params);
        if view.sources.len() != w.len() {
            return Err(DenoiseError::kernel(format!(
                "plane {}: {} sources for radius {}",
                view.plane,
                view.sources.len(),
                params.radius
            )));
        }
        if !self.supports(&view.format) {
            return Err(DenoiseError::kernel(format!(
                "plane {}: unsupported sample layout",
                view.plane
            )));
        }
        let width = view.width as usize;
        let height = view.height as usize;
        if width == 0 || height == 0 {
            return Ok(());
        }
        let row_bytes = view.row_bytes();
        let too_small = view
            .sources
            .iter()
            .map(|s| (s.data.len(), s.stride))
            .chain(std::iter::once((view.target.data.len(), view.target.stride)))
            .any(|(len, stride)| {
                stride < row_bytes || len < required_len(stride, height, row_bytes)
            });
        if too_small {
            return Err(DenoiseError::kernel(format!(
                "plane {}: buffer smaller than {width}x{height}",
                view.plane
            )));
        }

        let center = params.radius as usize;
        let norm: f32 = w.iter().sum();
        let strength = params.strength;
        let max = view.format.max_sample_value() as f32;
        let blend = |samples: &mut dyn Iterator<Item = f32>, c: f32| -> f32 {
            let acc: f32 = samples.zip(w.iter()).map(|(s, &wk)| s * wk).sum();
            let mean = acc / norm;
            (c + strength * (mean - c)).round().clamp(0.0, max)
        };

        let wide = view.format.bytes_per_sample == 2;
        let sample = |row: &[u8], x: usize| -> f32 {
            if wide {
                f32::from(u16::from_ne_bytes([row[2 * x], row[2 * x + 1]]))
            } else {
                f32::from(row[x])
            }
        };
        for y in 0..height {
            let rows: SmallVec<[&[u8]; 8]> =
                view.sources.iter().map(|s| s.row(y, row_bytes)).collect();
            let out = view.target.row_mut(y, row_bytes);
            for x in 0..width {
                let c = sample(rows[center], x);
                let v = blend(&mut rows.iter().map(|r| sample(r, x)), c);
                if wide {
                    out[2 * x..2 * x + 2].copy_from_slice(&(v as u16).to_ne_bytes());
                } else {
                    out[x] = v as u8;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/denoise/scalar.rs"]
mod tests;
