use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::format::video::VideoInfo;
use crate::host::node::Filter;
use crate::source::memory::BlankSource;

/// Requests frame `n` of its clip and forwards it unchanged.
struct Passthrough {
    clip: Node,
    info: VideoInfo,
    mode: FilterMode,
    activity: Arc<Activity>,
}

/// Counts activations that started while another was still running.
#[derive(Default)]
struct Activity {
    running: AtomicUsize,
    overlap: AtomicUsize,
}

impl Passthrough {
    fn new(clip: Node, mode: FilterMode) -> Self {
        Self {
            info: *clip.video_info(),
            clip,
            mode,
            activity: Arc::default(),
        }
    }
}

struct PassthroughComputation<'f> {
    filter: &'f Passthrough,
    n: FrameIndex,
}

impl FrameComputation for PassthroughComputation<'_> {
    fn activate(
        &mut self,
        reason: ActivationReason,
        ctx: &mut FrameContext<'_>,
    ) -> DenoiseResult<Activation> {
        let f = self.filter;
        if f.activity.running.fetch_add(1, Ordering::SeqCst) > 0 {
            f.activity.overlap.fetch_add(1, Ordering::SeqCst);
        }
        std::thread::yield_now();
        let out = match reason {
            ActivationReason::Initial => {
                ctx.request_frame(&f.clip, self.n)?;
                Ok(Activation::Pending)
            }
            ActivationReason::AllFramesReady => {
                let h = ctx.get_frame(&f.clip, self.n)?;
                Ok(Activation::Ready(FrameRef::clone(h.frame_ref())))
            }
        };
        f.activity.running.fetch_sub(1, Ordering::SeqCst);
        out
    }
}

impl Filter for Passthrough {
    fn name(&self) -> &str {
        "Passthrough"
    }

    fn video_info(&self) -> &VideoInfo {
        &self.info
    }

    fn mode(&self) -> FilterMode {
        self.mode
    }

    fn begin(&self, n: FrameIndex) -> Box<dyn FrameComputation + '_> {
        Box::new(PassthroughComputation { filter: self, n })
    }
}

/// Suspends without requesting anything.
struct Stalls(VideoInfo);

struct StallComputation;

impl FrameComputation for StallComputation {
    fn activate(
        &mut self,
        _reason: ActivationReason,
        _ctx: &mut FrameContext<'_>,
    ) -> DenoiseResult<Activation> {
        Ok(Activation::Pending)
    }
}

impl Filter for Stalls {
    fn name(&self) -> &str {
        "Stalls"
    }

    fn video_info(&self) -> &VideoInfo {
        &self.0
    }

    fn begin(&self, _n: FrameIndex) -> Box<dyn FrameComputation + '_> {
        Box::new(StallComputation)
    }
}

fn blank(frames: u64) -> Node {
    Node::new(BlankSource::gray8(4, 2, frames, 5).unwrap()).unwrap()
}

#[test]
fn resolves_requests_through_upstream_nodes() {
    let core = Core::default();
    let node = Node::new(Passthrough::new(blank(4), FilterMode::Parallel)).unwrap();
    let f = core.get_frame(&node, FrameIndex(3)).unwrap();
    assert_eq!(f.props().get_int("_FrameNumber"), Some(3));
    assert_eq!(core.ledger_stats().acquired, 1);
    assert_eq!(core.ledger_stats().outstanding(), 0);
}

#[test]
fn out_of_range_request_is_a_config_error() {
    let core = Core::default();
    let err = core.get_frame(&blank(2), FrameIndex(2)).unwrap_err();
    assert!(err.is_config());
}

#[test]
fn suspending_without_requests_is_an_internal_error() {
    let info = *blank(1).video_info();
    let core = Core::default();
    let err = core
        .get_frame(&Node::new(Stalls(info)).unwrap(), FrameIndex(0))
        .unwrap_err();
    assert!(err.to_string().contains("without requesting"));
}

#[test]
fn cache_serves_repeated_requests() {
    let core = Core::new(CoreOpts {
        max_cached_frames: 8,
    });
    let node = Node::new(Passthrough::new(blank(4), FilterMode::Parallel)).unwrap();
    let a = core.get_frame(&node, FrameIndex(1)).unwrap();
    let b = core.get_frame(&node, FrameIndex(1)).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    let stats = core.cache_stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.retained, 2);

    core.clear_cache();
    assert_eq!(core.cache_stats().retained, 0);
}

#[test]
fn disabled_cache_recomputes() {
    let core = Core::new(CoreOpts {
        max_cached_frames: 0,
    });
    let node = Node::new(Passthrough::new(blank(2), FilterMode::Parallel)).unwrap();
    core.get_frame(&node, FrameIndex(0)).unwrap();
    core.get_frame(&node, FrameIndex(0)).unwrap();
    assert_eq!(core.cache_stats().hits, 0);
    assert_eq!(core.ledger_stats().acquired, 2);
}

#[test]
fn serial_filters_never_overlap() {
    let core = Core::new(CoreOpts {
        max_cached_frames: 0,
    });
    let filter = Passthrough::new(blank(64), FilterMode::Serial);
    let activity = Arc::clone(&filter.activity);
    let node = Node::new(filter).unwrap();
    std::thread::scope(|s| {
        for t in 0..4u64 {
            let core = &core;
            let node = node.clone();
            s.spawn(move || {
                for i in 0..16 {
                    core.get_frame(&node, FrameIndex(t * 16 + i)).unwrap();
                }
            });
        }
    });
    assert_eq!(core.ledger_stats().outstanding(), 0);
    assert_eq!(core.ledger_stats().acquired, 64);
    assert_eq!(activity.overlap.load(Ordering::SeqCst), 0);
}
