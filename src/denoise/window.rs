use smallvec::SmallVec;

use crate::foundation::core::FrameIndex;

/// The clamped source indices feeding one output frame.
///
/// Always `2 * radius + 1` entries long; position `radius` is the center frame. Order is
/// preserved all the way into the kernel, where coefficients are assigned by position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameWindow {
    radius: u32,
    indices: SmallVec<[FrameIndex; 8]>,
}

impl FrameWindow {
    /// Temporal half-window size.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Source indices in temporal order.
    pub fn indices(&self) -> &[FrameIndex] {
        &self.indices
    }

    /// Number of entries (`2 * radius + 1`).
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Always `false`; a window holds at least the center frame.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Position of the center frame within [`indices`](Self::indices).
    pub fn center_position(&self) -> usize {
        self.radius as usize
    }

    /// Source index of the center frame.
    pub fn center(&self) -> FrameIndex {
        self.indices[self.center_position()]
    }
}

/// Compute the window for output `center` over a stream of `frame_count` frames.
///
/// Offsets `-radius..=radius` are clamped into `[0, frame_count - 1]`: the first and last frames
/// are held rather than the window being truncated or wrapped.
///
/// Panics if `frame_count` is zero.
pub fn build_window(center: FrameIndex, radius: u32, frame_count: u64) -> FrameWindow {
    assert!(frame_count >= 1, "build_window requires a non-empty stream");
    let r = i64::from(radius);
    let indices = (-r..=r)
        .map(|t| center.offset_clamped(t, frame_count))
        .collect::<SmallVec<[FrameIndex; 8]>>();
    debug_assert_eq!(indices.len(), 2 * radius as usize + 1);
    FrameWindow { radius, indices }
}

#[cfg(test)]
#[path = "../../tests/unit/denoise/window.rs"]
mod tests;
