use crate::foundation::core::Fps;
use crate::foundation::error::{DenoiseError, DenoiseResult};

/// Color family of a planar video format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ColorFamily {
    /// Single luma plane.
    Gray,
    /// Luma plus two (optionally subsampled) chroma planes.
    Yuv,
    /// Three full-resolution planes.
    Rgb,
}

/// Storage type of one sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SampleType {
    /// Unsigned integer samples.
    Integer,
    /// IEEE floating-point samples.
    Float,
}

/// Planar pixel format description.
///
/// Subsampling is expressed as log2 factors and only ever applies to planes 1 and 2 of
/// [`ColorFamily::Yuv`] formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct VideoFormat {
    /// Color family.
    pub color_family: ColorFamily,
    /// Sample storage type.
    pub sample_type: SampleType,
    /// Significant bits per sample.
    pub bits_per_sample: u8,
    /// Storage bytes per sample.
    pub bytes_per_sample: u8,
    /// Horizontal chroma subsampling (log2).
    pub sub_sampling_w: u8,
    /// Vertical chroma subsampling (log2).
    pub sub_sampling_h: u8,
    /// Number of planes.
    pub num_planes: u8,
}

impl VideoFormat {
    /// Build and validate a format.
    pub fn new(
        color_family: ColorFamily,
        sample_type: SampleType,
        bits_per_sample: u8,
        sub_sampling_w: u8,
        sub_sampling_h: u8,
    ) -> DenoiseResult<Self> {
        let bytes_per_sample = match (sample_type, bits_per_sample) {
            (SampleType::Integer, 8) => 1,
            (SampleType::Integer, 9..=16) => 2,
            (SampleType::Float, 16) => 2,
            (SampleType::Float, 32) => 4,
            _ => {
                return Err(DenoiseError::format(format!(
                    "unsupported sample layout: {sample_type:?} with {bits_per_sample} bits"
                )));
            }
        };
        if sub_sampling_w > 4 || sub_sampling_h > 4 {
            return Err(DenoiseError::format("subsampling factors must be <= 4"));
        }
        if color_family != ColorFamily::Yuv && (sub_sampling_w != 0 || sub_sampling_h != 0) {
            return Err(DenoiseError::format(
                "only YUV formats may use chroma subsampling",
            ));
        }
        let num_planes = match color_family {
            ColorFamily::Gray => 1,
            ColorFamily::Yuv | ColorFamily::Rgb => 3,
        };
        Ok(Self {
            color_family,
            sample_type,
            bits_per_sample,
            bytes_per_sample,
            sub_sampling_w,
            sub_sampling_h,
            num_planes,
        })
    }

    const fn int(family: ColorFamily, bits: u8, ssw: u8, ssh: u8) -> Self {
        Self {
            color_family: family,
            sample_type: SampleType::Integer,
            bits_per_sample: bits,
            bytes_per_sample: if bits > 8 { 2 } else { 1 },
            sub_sampling_w: ssw,
            sub_sampling_h: ssh,
            num_planes: match family {
                ColorFamily::Gray => 1,
                _ => 3,
            },
        }
    }

    /// 8-bit single plane.
    pub const fn gray8() -> Self {
        Self::int(ColorFamily::Gray, 8, 0, 0)
    }

    /// 16-bit single plane.
    pub const fn gray16() -> Self {
        Self::int(ColorFamily::Gray, 16, 0, 0)
    }

    /// 8-bit 4:2:0 YUV.
    pub const fn yuv420p8() -> Self {
        Self::int(ColorFamily::Yuv, 8, 1, 1)
    }

    /// 8-bit 4:2:2 YUV.
    pub const fn yuv422p8() -> Self {
        Self::int(ColorFamily::Yuv, 8, 1, 0)
    }

    /// 8-bit 4:4:4 YUV.
    pub const fn yuv444p8() -> Self {
        Self::int(ColorFamily::Yuv, 8, 0, 0)
    }

    /// 16-bit 4:2:0 YUV.
    pub const fn yuv420p16() -> Self {
        Self::int(ColorFamily::Yuv, 16, 1, 1)
    }

    /// 16-bit 4:4:4 YUV.
    pub const fn yuv444p16() -> Self {
        Self::int(ColorFamily::Yuv, 16, 0, 0)
    }

    /// 8-bit planar RGB.
    pub const fn rgb24() -> Self {
        Self::int(ColorFamily::Rgb, 8, 0, 0)
    }

    /// Width of `plane` for a frame that is `width` pixels wide.
    pub fn plane_width(&self, plane: usize, width: u32) -> u32 {
        if plane == 0 || self.color_family != ColorFamily::Yuv {
            width
        } else {
            width >> self.sub_sampling_w
        }
    }

    /// Height of `plane` for a frame that is `height` pixels tall.
    pub fn plane_height(&self, plane: usize, height: u32) -> u32 {
        if plane == 0 || self.color_family != ColorFamily::Yuv {
            height
        } else {
            height >> self.sub_sampling_h
        }
    }

    /// Re-check a format that may have been assembled field by field or deserialized.
    pub fn validate(&self) -> DenoiseResult<()> {
        let rebuilt = Self::new(
            self.color_family,
            self.sample_type,
            self.bits_per_sample,
            self.sub_sampling_w,
            self.sub_sampling_h,
        )?;
        if rebuilt != *self {
            return Err(DenoiseError::format(format!(
                "inconsistent format: {} bytes and {} planes for {:?} {}-bit",
                self.bytes_per_sample, self.num_planes, self.color_family, self.bits_per_sample
            )));
        }
        Ok(())
    }

    /// Largest representable sample value for integer formats.
    ///
    /// Zero for a format with no significant bits.
    pub fn max_sample_value(&self) -> u32 {
        let bits = u32::from(self.bits_per_sample.min(32));
        if bits == 0 {
            return 0;
        }
        u32::MAX.checked_shr(32 - bits).unwrap_or(0)
    }
}

/// Stream-level description of a clip.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VideoInfo {
    /// Pixel format shared by every frame.
    pub format: VideoFormat,
    /// Luma width in pixels.
    pub width: u32,
    /// Luma height in pixels.
    pub height: u32,
    /// Total number of frames.
    pub num_frames: u64,
    /// Nominal frame rate.
    pub fps: Fps,
}

impl VideoInfo {
    /// Check the format, then that geometry is non-empty and compatible with its subsampling.
    pub fn validate(&self) -> DenoiseResult<()> {
        self.format.validate()?;
        if self.width == 0 || self.height == 0 {
            return Err(DenoiseError::format("video width and height must be > 0"));
        }
        let mask_w = (1u32 << self.format.sub_sampling_w) - 1;
        let mask_h = (1u32 << self.format.sub_sampling_h) - 1;
        if self.width & mask_w != 0 || self.height & mask_h != 0 {
            return Err(DenoiseError::format(format!(
                "{}x{} is not divisible by the chroma subsampling of the format",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Plane count of the stream's format.
    pub fn num_planes(&self) -> usize {
        usize::from(self.format.num_planes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/video.rs"]
mod tests;
