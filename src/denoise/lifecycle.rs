use smallvec::SmallVec;

use crate::denoise::window::FrameWindow;
use crate::foundation::error::DenoiseResult;
use crate::host::context::{FrameContext, FrameHandle};
use crate::host::node::Node;

/// Upstream frames acquired for one output frame, in window order.
///
/// Owns one [`FrameHandle`] per window entry, including repeated indices at stream edges. Every
/// handle is released when this value drops, whether processing succeeded or not.
pub struct FetchedFrames {
    handles: SmallVec<[FrameHandle; 8]>,
    center: usize,
}

impl FetchedFrames {
    /// Acquire each window entry from `ctx`. Any handle acquired before a failure is released.
    pub fn fetch(ctx: &FrameContext<'_>, clip: &Node, window: &FrameWindow) -> DenoiseResult<Self> {
        let handles = window
            .indices()
            .iter()
            .map(|&n| ctx.get_frame(clip, n))
            .collect::<DenoiseResult<SmallVec<[FrameHandle; 8]>>>()?;
        Ok(Self {
            handles,
            center: window.center_position(),
        })
    }

    /// All handles in window order.
    pub fn handles(&self) -> &[FrameHandle] {
        &self.handles
    }

    /// The center frame, the template for the output.
    pub fn center(&self) -> &FrameHandle {
        &self.handles[self.center]
    }

    /// Number of handles held.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no handle is held.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Drop for FetchedFrames {
    fn drop(&mut self) {
        tracing::trace!(released = self.handles.len(), "releasing window frames");
    }
}
