use std::sync::Arc;

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{DenoiseError, DenoiseResult};
use crate::format::video::{VideoFormat, VideoInfo};
use crate::frame::props::PropValue;
use crate::frame::video_frame::{FrameRef, VideoFrame};
use crate::host::context::FrameContext;
use crate::host::node::{Activation, ActivationReason, Filter, FrameComputation};

/// Computation for sources whose frames already exist: ready on the first activation.
struct Immediate(Option<DenoiseResult<FrameRef>>);

impl FrameComputation for Immediate {
    fn activate(
        &mut self,
        _reason: ActivationReason,
        _ctx: &mut FrameContext<'_>,
    ) -> DenoiseResult<Activation> {
        match self.0.take() {
            Some(frame) => frame.map(Activation::Ready),
            None => Err(DenoiseError::internal("source frame already delivered")),
        }
    }
}

/// A source node serving frames held in memory.
pub struct MemorySource {
    name: String,
    info: VideoInfo,
    frames: Vec<FrameRef>,
}

impl MemorySource {
    /// Build a source from frames that all share the first frame's format and geometry.
    pub fn new(name: impl Into<String>, frames: Vec<VideoFrame>, fps: Fps) -> DenoiseResult<Self> {
        let name = name.into();
        let first = frames
            .first()
            .ok_or_else(|| DenoiseError::config(format!("{name}: clip has no frames")))?;
        let info = VideoInfo {
            format: first.format(),
            width: first.width(0),
            height: first.height(0),
            num_frames: frames.len() as u64,
            fps,
        };
        for (i, f) in frames.iter().enumerate() {
            if f.format() != info.format || f.width(0) != info.width || f.height(0) != info.height
            {
                return Err(DenoiseError::format(format!(
                    "{name}: frame {i} does not match the geometry of frame 0"
                )));
            }
        }
        Ok(Self {
            name,
            info,
            frames: frames.into_iter().map(Arc::new).collect(),
        })
    }

    /// Borrow the shared frames, in index order.
    pub fn frames(&self) -> &[FrameRef] {
        &self.frames
    }
}

impl Filter for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn video_info(&self) -> &VideoInfo {
        &self.info
    }

    fn begin(&self, n: FrameIndex) -> Box<dyn FrameComputation + '_> {
        let frame = usize::try_from(n.0)
            .ok()
            .and_then(|i| self.frames.get(i))
            .map(Arc::clone)
            .ok_or_else(|| {
                DenoiseError::internal(format!("{}: frame {n} out of range", self.name))
            });
        Box::new(Immediate(Some(frame)))
    }
}

/// A source node producing constant-valued frames.
pub struct BlankSource {
    info: VideoInfo,
    values: Vec<u16>,
}

impl BlankSource {
    /// Build a source where every sample of plane `p` equals `values[p]`.
    pub fn new(info: VideoInfo, values: &[u16]) -> DenoiseResult<Self> {
        info.validate()?;
        if values.len() != info.num_planes() {
            return Err(DenoiseError::config(format!(
                "BlankSource: expected {} plane values, got {}",
                info.num_planes(),
                values.len()
            )));
        }
        if info.format.sample_type == crate::format::video::SampleType::Integer
            && values
                .iter()
                .any(|&v| u32::from(v) > info.format.max_sample_value())
        {
            return Err(DenoiseError::config(
                "BlankSource: plane value exceeds the format's sample range",
            ));
        }
        Ok(Self {
            info,
            values: values.to_vec(),
        })
    }

    /// Convenience constructor for a gray clip.
    pub fn gray8(width: u32, height: u32, num_frames: u64, value: u8) -> DenoiseResult<Self> {
        Self::new(
            VideoInfo {
                format: VideoFormat::gray8(),
                width,
                height,
                num_frames,
                fps: Fps::default(),
            },
            &[u16::from(value)],
        )
    }

    fn render(&self, n: FrameIndex) -> DenoiseResult<FrameRef> {
        let mut frame = VideoFrame::new(self.info.format, self.info.width, self.info.height)?;
        for (p, &v) in self.values.iter().enumerate() {
            frame.fill_plane(p, v);
        }
        let props = frame.props_mut();
        props.set("_DurationNum", PropValue::Int(i64::from(self.info.fps.den)));
        props.set("_DurationDen", PropValue::Int(i64::from(self.info.fps.num)));
        props.set("_FrameNumber", PropValue::Int(n.0 as i64));
        Ok(Arc::new(frame))
    }
}

impl Filter for BlankSource {
    fn name(&self) -> &str {
        "BlankSource"
    }

    fn video_info(&self) -> &VideoInfo {
        &self.info
    }

    fn begin(&self, n: FrameIndex) -> Box<dyn FrameComputation + '_> {
        Box::new(Immediate(Some(self.render(n))))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/memory.rs"]
mod tests;
