use crate::foundation::core::FrameIndex;
use crate::foundation::error::DenoiseResult;
use crate::format::video::VideoInfo;
use crate::frame::video_frame::{FrameRef, VideoFrame};

/// Configuration provided to a [`FrameSink`] at the start of a range render.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Description of the stream being written.
    pub info: VideoInfo,
    /// Number of frames that will be pushed.
    pub frame_count: u64,
}

/// Sink contract for consuming rendered frames in stream order.
///
/// Ordering contract: `push_frame` is called in strictly increasing [`FrameIndex`] order within the
/// requested render range.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> DenoiseResult<()>;
    /// Push one frame in strictly increasing stream order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &VideoFrame) -> DenoiseResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> DenoiseResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRef)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRef)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> DenoiseResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &VideoFrame) -> DenoiseResult<()> {
        self.frames.push((idx, FrameRef::new(frame.clone())));
        Ok(())
    }

    fn end(&mut self) -> DenoiseResult<()> {
        Ok(())
    }
}
