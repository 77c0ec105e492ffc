use std::sync::{Arc, Mutex, MutexGuard};

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{DenoiseError, DenoiseResult};
use crate::frame::video_frame::FrameRef;
use crate::host::cache::{FrameCache, FrameCacheStats};
use crate::host::context::{FrameContext, FrameLedger, LedgerStats};
use crate::host::node::{Activation, ActivationReason, FilterMode, FrameComputation, Node};

/// Host runtime options.
#[derive(Clone, Debug)]
pub struct CoreOpts {
    /// Finished frames retained across computations. `0` disables caching.
    pub max_cached_frames: usize,
}

impl Default for CoreOpts {
    fn default() -> Self {
        Self {
            max_cached_frames: 64,
        }
    }
}

/// Cache counters reported by [`Core::cache_stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests served from the cache.
    pub hits: u64,
    /// Requests that had to be computed.
    pub misses: u64,
    /// Frames evicted to respect the capacity.
    pub evictions: u64,
    /// Frames currently retained.
    pub retained: usize,
}

/// Drives frame computations through the request/resume protocol.
///
/// `Core` is `Sync`: many output indices may be computed concurrently from different threads.
/// No lock is held while a computation is suspended.
pub struct Core {
    ledger: Arc<FrameLedger>,
    cache: Mutex<FrameCache>,
}

impl Core {
    /// Create a host with the given options.
    pub fn new(opts: CoreOpts) -> Self {
        Self {
            ledger: Arc::new(FrameLedger::default()),
            cache: Mutex::new(FrameCache::new(opts.max_cached_frames)),
        }
    }

    /// Acquire/release counters for frame handles handed to computations.
    pub fn ledger_stats(&self) -> LedgerStats {
        self.ledger.stats()
    }

    /// Frame cache counters.
    pub fn cache_stats(&self) -> CacheStats {
        let cache = self.lock_cache();
        let FrameCacheStats {
            hits,
            misses,
            evictions,
        } = cache.stats();
        CacheStats {
            hits,
            misses,
            evictions,
            retained: cache.len(),
        }
    }

    /// Drop every cached frame.
    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    /// Produce frame `n` of `node`, computing upstream dependencies as needed.
    pub fn get_frame(&self, node: &Node, n: FrameIndex) -> DenoiseResult<FrameRef> {
        let info = *node.video_info();
        if n.0 >= info.num_frames {
            return Err(DenoiseError::config(format!(
                "frame {n} is outside '{}' ({} frames)",
                node.name(),
                info.num_frames
            )));
        }
        if let Some(frame) = self.lock_cache().get(node.id(), n) {
            return Ok(frame);
        }

        let frame = self.compute(node, n)?;
        if frame.format() != info.format
            || frame.width(0) != info.width
            || frame.height(0) != info.height
        {
            return Err(DenoiseError::internal(format!(
                "'{}' produced frame {n} that does not match its video info",
                node.name()
            )));
        }
        self.lock_cache()
            .insert(node.id(), n, FrameRef::clone(&frame));
        Ok(frame)
    }

    fn compute(&self, node: &Node, n: FrameIndex) -> DenoiseResult<FrameRef> {
        let mut computation = node.filter().begin(n);
        let mut ctx = FrameContext::new(n, &self.ledger);

        match self.activate(node, computation.as_mut(), ActivationReason::Initial, &mut ctx)? {
            Activation::Ready(frame) => return Ok(frame),
            Activation::Pending => {}
        }

        let requests = ctx.take_requests();
        if requests.is_empty() {
            return Err(DenoiseError::internal(format!(
                "'{}' suspended frame {n} without requesting any frames",
                node.name()
            )));
        }
        tracing::trace!(
            node = node.name(),
            frame = n.0,
            requests = requests.len(),
            "resolving requests"
        );
        for req in &requests {
            let upstream = self.get_frame(&req.node, req.n)?;
            ctx.supply(&req.node, req.n, upstream);
        }
        ctx.mark_resolved();

        match self.activate(
            node,
            computation.as_mut(),
            ActivationReason::AllFramesReady,
            &mut ctx,
        )? {
            Activation::Ready(frame) => Ok(frame),
            Activation::Pending => Err(DenoiseError::internal(format!(
                "'{}' did not produce frame {n} after its requests resolved",
                node.name()
            ))),
        }
    }

    fn activate(
        &self,
        node: &Node,
        computation: &mut (dyn FrameComputation + '_),
        reason: ActivationReason,
        ctx: &mut FrameContext<'_>,
    ) -> DenoiseResult<Activation> {
        match node.filter().mode() {
            FilterMode::Parallel => computation.activate(reason, ctx),
            FilterMode::Serial => {
                let _guard = node.serial_guard();
                computation.activate(reason, ctx)
            }
        }
    }

    fn lock_cache(&self) -> MutexGuard<'_, FrameCache> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for Core {
    fn default() -> Self {
        Self::new(CoreOpts::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/core.rs"]
mod tests;
