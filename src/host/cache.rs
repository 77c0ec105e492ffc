use std::collections::{HashMap, VecDeque};

use crate::foundation::core::FrameIndex;
use crate::frame::video_frame::FrameRef;
use crate::host::node::NodeId;

type CacheKey = (NodeId, FrameIndex);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrameCacheStats {
    pub(crate) hits: u64,
    pub(crate) misses: u64,
    pub(crate) evictions: u64,
}

/// Bounded FIFO cache of finished frames, keyed by `(node, index)`.
///
/// Lookups happen once per resolved request, not per pixel.
pub(crate) struct FrameCache {
    capacity: usize,
    frames: HashMap<CacheKey, FrameRef>,
    order: VecDeque<CacheKey>,
    stats: FrameCacheStats,
}

impl FrameCache {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            frames: HashMap::new(),
            order: VecDeque::new(),
            stats: FrameCacheStats::default(),
        }
    }

    pub(crate) fn stats(&self) -> FrameCacheStats {
        self.stats
    }

    pub(crate) fn len(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn get(&mut self, node: NodeId, n: FrameIndex) -> Option<FrameRef> {
        match self.frames.get(&(node, n)) {
            Some(f) => {
                self.stats.hits = self.stats.hits.saturating_add(1);
                Some(FrameRef::clone(f))
            }
            None => {
                self.stats.misses = self.stats.misses.saturating_add(1);
                None
            }
        }
    }

    pub(crate) fn insert(&mut self, node: NodeId, n: FrameIndex, frame: FrameRef) {
        if self.capacity == 0 {
            return;
        }
        let key = (node, n);
        if self.frames.insert(key, frame).is_some() {
            return;
        }
        self.order.push_back(key);
        while self.frames.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.frames.remove(&oldest);
            self.stats.evictions = self.stats.evictions.saturating_add(1);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.frames.clear();
        self.order.clear();
    }
}
