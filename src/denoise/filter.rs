use std::sync::Arc;

use crate::denoise::config::{FILTER_NAME, FilterConfig};
use crate::denoise::kernel::{DenoiseKernel, KernelParams};
use crate::denoise::lifecycle::FetchedFrames;
use crate::denoise::marshal::marshal_planes;
use crate::denoise::window::{FrameWindow, build_window};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{DenoiseError, DenoiseResult};
use crate::format::video::VideoInfo;
use crate::frame::video_frame::{FrameRef, VideoFrame};
use crate::host::context::FrameContext;
use crate::host::node::{Activation, ActivationReason, Filter, FrameComputation, Node};

/// Temporal denoiser: each output frame is the kernel applied to a clamped window of
/// `2 * radius + 1` input frames centered on the same index.
///
/// The output stream has the input's format, geometry, and frame count.
pub struct TemporalDenoise {
    clip: Node,
    info: VideoInfo,
    config: FilterConfig,
    params: KernelParams,
    kernel: Arc<dyn DenoiseKernel>,
}

impl TemporalDenoise {
    /// Create the filter over `clip`.
    pub fn new(
        clip: Node,
        config: FilterConfig,
        kernel: Arc<dyn DenoiseKernel>,
    ) -> DenoiseResult<Self> {
        config.validate()?;
        let info = *clip.video_info();
        if info.num_frames == 0 {
            return Err(DenoiseError::config(format!(
                "{FILTER_NAME}: clip has no frames"
            )));
        }
        if !kernel.supports(&info.format) {
            return Err(DenoiseError::config(format!(
                "{FILTER_NAME}: kernel '{}' does not support {:?} {}-bit input",
                kernel.name(),
                info.format.sample_type,
                info.format.bits_per_sample
            )));
        }
        tracing::debug!(
            clip = clip.name(),
            kernel = kernel.name(),
            radius = config.radius,
            alpha_low = config.alpha_low,
            alpha_mid = config.alpha_mid,
            alpha_high = config.alpha_high,
            strength = config.strength,
            width = info.width,
            height = info.height,
            frames = info.num_frames,
            "temporal denoise created"
        );
        Ok(Self {
            clip,
            info,
            params: KernelParams::from(&config),
            config,
            kernel,
        })
    }

    /// Upstream clip.
    pub fn clip(&self) -> &Node {
        &self.clip
    }

    /// Instance parameters.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    fn produce(&self, ctx: &FrameContext<'_>, window: &FrameWindow) -> DenoiseResult<FrameRef> {
        let fetched = FetchedFrames::fetch(ctx, &self.clip, window)?;
        let mut out = VideoFrame::new_like(fetched.center())?;
        for view in marshal_planes(fetched.handles(), &mut out)?.iter_mut() {
            self.kernel.denoise_plane(view, &self.params)?;
        }
        drop(fetched);
        Ok(Arc::new(out))
    }
}

impl Filter for TemporalDenoise {
    fn name(&self) -> &str {
        FILTER_NAME
    }

    fn video_info(&self) -> &VideoInfo {
        &self.info
    }

    fn begin(&self, n: FrameIndex) -> Box<dyn FrameComputation + '_> {
        Box::new(DenoiseComputation {
            filter: self,
            output: n,
            phase: Phase::Requesting,
        })
    }
}

enum Phase {
    Requesting,
    Ready { window: FrameWindow },
}

struct DenoiseComputation<'f> {
    filter: &'f TemporalDenoise,
    output: FrameIndex,
    phase: Phase,
}

impl FrameComputation for DenoiseComputation<'_> {
    fn activate(
        &mut self,
        reason: ActivationReason,
        ctx: &mut FrameContext<'_>,
    ) -> DenoiseResult<Activation> {
        let f = self.filter;
        match (reason, std::mem::replace(&mut self.phase, Phase::Requesting)) {
            (ActivationReason::Initial, Phase::Requesting) => {
                let window = build_window(self.output, f.config.radius, f.info.num_frames);
                for &n in window.indices() {
                    ctx.request_frame(&f.clip, n)?;
                }
                tracing::trace!(
                    frame = self.output.0,
                    requested = window.len(),
                    "window requested"
                );
                self.phase = Phase::Ready { window };
                Ok(Activation::Pending)
            }
            (ActivationReason::Initial, Phase::Ready { .. }) => Err(DenoiseError::internal(
                format!("{FILTER_NAME}: frame {} activated twice", self.output),
            )),
            (ActivationReason::AllFramesReady, Phase::Requesting) => Ok(Activation::Pending),
            (ActivationReason::AllFramesReady, Phase::Ready { window }) => {
                let frame = f.produce(ctx, &window)?;
                tracing::trace!(frame = self.output.0, "frame produced");
                Ok(Activation::Ready(frame))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/denoise/filter.rs"]
mod tests;
