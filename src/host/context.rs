use std::collections::HashMap;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{DenoiseError, DenoiseResult};
use crate::frame::video_frame::{FrameRef, VideoFrame};
use crate::host::node::{Node, NodeId};

/// Counts frame references handed to computations and returned by them.
#[derive(Debug, Default)]
pub struct FrameLedger {
    acquired: AtomicU64,
    released: AtomicU64,
}

/// Snapshot of a [`FrameLedger`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LedgerStats {
    /// Handles acquired through [`FrameContext::get_frame`].
    pub acquired: u64,
    /// Handles dropped.
    pub released: u64,
}

impl LedgerStats {
    /// Handles currently alive.
    pub fn outstanding(&self) -> u64 {
        self.acquired.saturating_sub(self.released)
    }
}

impl FrameLedger {
    /// Current counters.
    pub fn stats(&self) -> LedgerStats {
        LedgerStats {
            acquired: self.acquired.load(Ordering::Acquire),
            released: self.released.load(Ordering::Acquire),
        }
    }
}

/// An acquired reference to an upstream frame.
///
/// Dropping the handle is the release; it happens exactly once, on every exit path.
pub struct FrameHandle {
    frame: FrameRef,
    ledger: Arc<FrameLedger>,
}

impl FrameHandle {
    fn acquire(frame: FrameRef, ledger: Arc<FrameLedger>) -> Self {
        ledger.acquired.fetch_add(1, Ordering::AcqRel);
        Self { frame, ledger }
    }

    /// The shared frame behind this handle.
    pub fn frame_ref(&self) -> &FrameRef {
        &self.frame
    }
}

impl Deref for FrameHandle {
    type Target = VideoFrame;

    fn deref(&self) -> &VideoFrame {
        &self.frame
    }
}

impl Drop for FrameHandle {
    fn drop(&mut self) {
        self.ledger.released.fetch_add(1, Ordering::AcqRel);
    }
}

impl std::fmt::Debug for FrameHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameHandle")
            .field("fingerprint", &self.frame.fingerprint())
            .finish()
    }
}

/// One pending dependency recorded during [`ActivationReason::Initial`](crate::ActivationReason).
#[derive(Clone, Debug)]
pub struct FrameRequest {
    /// Upstream node.
    pub node: Node,
    /// Requested index on that node.
    pub n: FrameIndex,
}

/// Per-computation channel between a filter and the host.
pub struct FrameContext<'a> {
    output: FrameIndex,
    ledger: &'a Arc<FrameLedger>,
    requests: Vec<FrameRequest>,
    ready: HashMap<(NodeId, FrameIndex), FrameRef>,
    resolved: bool,
}

impl<'a> FrameContext<'a> {
    pub(crate) fn new(output: FrameIndex, ledger: &'a Arc<FrameLedger>) -> Self {
        Self {
            output,
            ledger,
            requests: Vec::new(),
            ready: HashMap::new(),
            resolved: false,
        }
    }

    /// Output index this context computes.
    pub fn output_index(&self) -> FrameIndex {
        self.output
    }

    /// Ask the host for frame `n` of `node`. Never blocks; duplicates are coalesced.
    ///
    /// An index outside the node's stream is an engine bug and fails the computation.
    pub fn request_frame(&mut self, node: &Node, n: FrameIndex) -> DenoiseResult<()> {
        if self.resolved {
            return Err(DenoiseError::internal(format!(
                "frame {n} of '{}' requested after requests were resolved",
                node.name()
            )));
        }
        let count = node.video_info().num_frames;
        if n.0 >= count {
            return Err(DenoiseError::internal(format!(
                "request for frame {n} outside '{}' ({count} frames)",
                node.name()
            )));
        }
        if !self
            .requests
            .iter()
            .any(|r| r.n == n && r.node.id() == node.id())
        {
            self.requests.push(FrameRequest {
                node: node.clone(),
                n,
            });
        }
        Ok(())
    }

    /// Retrieve a frame requested earlier. Valid only once the host has resolved requests.
    pub fn get_frame(&self, node: &Node, n: FrameIndex) -> DenoiseResult<FrameHandle> {
        if !self.resolved {
            return Err(DenoiseError::internal(format!(
                "frame {n} of '{}' fetched before requests were resolved",
                node.name()
            )));
        }
        let frame = self.ready.get(&(node.id(), n)).ok_or_else(|| {
            DenoiseError::internal(format!(
                "frame {n} of '{}' was never requested",
                node.name()
            ))
        })?;
        Ok(FrameHandle::acquire(Arc::clone(frame), Arc::clone(self.ledger)))
    }

    /// Requests recorded so far.
    pub fn requests(&self) -> &[FrameRequest] {
        &self.requests
    }

    pub(crate) fn take_requests(&mut self) -> Vec<FrameRequest> {
        std::mem::take(&mut self.requests)
    }

    pub(crate) fn supply(&mut self, node: &Node, n: FrameIndex, frame: FrameRef) {
        self.ready.insert((node.id(), n), frame);
    }

    pub(crate) fn mark_resolved(&mut self) {
        self.resolved = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/context.rs"]
mod tests;
