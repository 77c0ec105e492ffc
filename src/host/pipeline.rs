use rayon::prelude::*;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{DenoiseError, DenoiseResult};
use crate::frame::video_frame::FrameRef;
use crate::host::core::Core;
use crate::host::node::{FilterMode, Node};

#[derive(Clone, Debug)]
/// Threading and chunking controls for multi-frame rendering.
pub struct RenderThreading {
    /// Enable parallel rendering when `true`.
    pub parallel: bool,
    /// Chunk size in frames for batched scheduling.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Aggregated rendering counters.
pub struct RenderStats {
    /// Frames delivered.
    pub frames_total: u64,
    /// Chunks scheduled.
    pub chunks: u64,
}

/// Render `range` of `node` and return the frames in index order.
#[tracing::instrument(skip(core, node, threading), fields(node = node.name()))]
pub fn render_range(
    core: &Core,
    node: &Node,
    range: FrameRange,
    threading: &RenderThreading,
) -> DenoiseResult<Vec<FrameRef>> {
    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
    for_each_chunk(core, node, range, threading, |_, frames| {
        out.extend(frames);
        Ok(())
    })?;
    Ok(out)
}

/// Render `range` of `node` into `sink`, pushing frames in index order.
#[tracing::instrument(skip(core, node, threading, sink), fields(node = node.name()))]
pub fn render_to_sink(
    core: &Core,
    node: &Node,
    range: FrameRange,
    threading: &RenderThreading,
    sink: &mut dyn FrameSink,
) -> DenoiseResult<RenderStats> {
    sink.begin(SinkConfig {
        info: *node.video_info(),
        frame_count: range.len_frames(),
    })?;
    let stats = for_each_chunk(core, node, range, threading, |start, frames| {
        for (i, frame) in frames.into_iter().enumerate() {
            sink.push_frame(FrameIndex(start.0 + i as u64), &frame)?;
        }
        Ok(())
    })?;
    sink.end()?;
    Ok(stats)
}

fn for_each_chunk(
    core: &Core,
    node: &Node,
    range: FrameRange,
    threading: &RenderThreading,
    mut consume: impl FnMut(FrameIndex, Vec<FrameRef>) -> DenoiseResult<()>,
) -> DenoiseResult<RenderStats> {
    if range.is_empty() {
        return Err(DenoiseError::config("render range must be non-empty"));
    }
    let num_frames = node.video_info().num_frames;
    if range.end.0 > num_frames {
        return Err(DenoiseError::config(format!(
            "render range end {} exceeds '{}' ({num_frames} frames)",
            range.end,
            node.name()
        )));
    }

    let parallel = threading.parallel && node.filter().mode() == FilterMode::Parallel;
    let pool = if parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };
    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let mut stats = RenderStats::default();

    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let frames = match &pool {
            Some(pool) => render_chunk_parallel(core, node, chunk_start, chunk_end, pool)?,
            None => (chunk_start..chunk_end)
                .map(|f| core.get_frame(node, FrameIndex(f)))
                .collect::<DenoiseResult<Vec<_>>>()?,
        };
        stats.frames_total += frames.len() as u64;
        stats.chunks += 1;
        consume(FrameIndex(chunk_start), frames)?;
        chunk_start = chunk_end;
    }

    tracing::debug!(
        frames = stats.frames_total,
        chunks = stats.chunks,
        parallel,
        "render finished"
    );
    Ok(stats)
}

fn render_chunk_parallel(
    core: &Core,
    node: &Node,
    start: u64,
    end: u64,
    pool: &rayon::ThreadPool,
) -> DenoiseResult<Vec<FrameRef>> {
    let rendered = pool.install(|| {
        (start..end)
            .into_par_iter()
            .map(|f| core.get_frame(node, FrameIndex(f)))
            .collect::<Vec<_>>()
    });
    rendered.into_iter().collect()
}

fn build_thread_pool(threads: Option<usize>) -> DenoiseResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(DenoiseError::config(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| DenoiseError::config(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}
