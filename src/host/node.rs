use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{DenoiseError, DenoiseResult};
use crate::format::video::VideoInfo;
use crate::frame::video_frame::FrameRef;
use crate::host::context::FrameContext;

/// Why the host is activating a computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationReason {
    /// First activation for an output index. Issue requests, touch no pixels.
    Initial,
    /// Every frame requested during [`ActivationReason::Initial`] is now available.
    AllFramesReady,
}

/// Result of one activation.
#[derive(Debug)]
pub enum Activation {
    /// Not yet: the computation is suspended until its requests resolve.
    Pending,
    /// The finished output frame. Ownership moves to the caller.
    Ready(FrameRef),
}

/// Concurrency contract a filter declares to the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// Any number of output indices may be computed concurrently, in any order.
    #[default]
    Parallel,
    /// At most one activation of this filter runs at a time.
    Serial,
}

/// Per-output-frame state machine created by [`Filter::begin`].
///
/// The host calls [`activate`](Self::activate) with [`ActivationReason::Initial`] once, resolves
/// every request recorded on the context, then calls it again with
/// [`ActivationReason::AllFramesReady`].
pub trait FrameComputation: Send {
    /// Advance the computation.
    fn activate(
        &mut self,
        reason: ActivationReason,
        ctx: &mut FrameContext<'_>,
    ) -> DenoiseResult<Activation>;
}

/// A node body: something that can produce frames of a fixed [`VideoInfo`].
pub trait Filter: Send + Sync {
    /// Display name used in logs and errors.
    fn name(&self) -> &str;

    /// Output stream description.
    fn video_info(&self) -> &VideoInfo;

    /// Concurrency contract.
    fn mode(&self) -> FilterMode {
        FilterMode::Parallel
    }

    /// Start computing output frame `n`.
    fn begin(&self, n: FrameIndex) -> Box<dyn FrameComputation + '_>;
}

/// Process-unique node identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

struct NodeInner {
    id: NodeId,
    filter: Box<dyn Filter>,
    serial: Mutex<()>,
}

/// Shared, counted handle to a filter instance in the graph.
///
/// Cloning a node is cheap and keeps the filter alive; downstream filters hold a clone of each
/// upstream node for their own lifetime.
#[derive(Clone)]
pub struct Node(Arc<NodeInner>);

impl Node {
    /// Wrap a filter after validating its output description.
    pub fn new(filter: impl Filter + 'static) -> DenoiseResult<Self> {
        let info = filter.video_info();
        info.validate()?;
        if info.num_frames == 0 {
            return Err(DenoiseError::config(format!(
                "{}: clip has no frames",
                filter.name()
            )));
        }
        Ok(Self(Arc::new(NodeInner {
            id: NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed)),
            filter: Box::new(filter),
            serial: Mutex::new(()),
        })))
    }

    /// Node identity.
    pub fn id(&self) -> NodeId {
        self.0.id
    }

    /// Filter name.
    pub fn name(&self) -> &str {
        self.0.filter.name()
    }

    /// Output stream description.
    pub fn video_info(&self) -> &VideoInfo {
        self.0.filter.video_info()
    }

    /// Borrow the filter body.
    pub fn filter(&self) -> &dyn Filter {
        self.0.filter.as_ref()
    }

    /// Number of live handles to this node.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    pub(crate) fn serial_guard(&self) -> MutexGuard<'_, ()> {
        self.0.serial.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.0.id)
            .field("name", &self.name())
            .finish()
    }
}
