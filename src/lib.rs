//! Temporal denoising for planar video streams.
//!
//! Every output frame is computed from a window of `2 * radius + 1` input frames centered on the
//! same index. Windows are clamped at the stream edges, so the first and last frames are held
//! rather than the window shrinking.
//!
//! # Pipeline overview
//!
//! 1. **Build**: wrap a source in a [`Node`], then create a [`TemporalDenoise`] node over it
//!    (directly, or through [`register`] and [`Plugin::invoke`]).
//! 2. **Request**: on first activation a computation asks the host for every window frame and
//!    suspends. It never blocks and never touches pixels in this phase.
//! 3. **Fetch**: once the [`Core`] has resolved all requests, the computation acquires the frames
//!    in window order, allocates an output shaped like the center frame, and hands one
//!    [`PlaneView`] per plane to the [`DenoiseKernel`].
//! 4. **Release**: every acquired [`FrameHandle`] is dropped before the output is returned.
//!
//! The key design constraints:
//!
//! - **No unsafe**: plane buffers are borrowed byte slices plus a stride.
//! - **Deterministic**: the same input and parameters produce bitwise-identical output.
//! - **Opaque parameters**: the blend coefficients and strength are forwarded to the kernel
//!   verbatim.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// The temporal denoise filter.
pub mod denoise;
/// Frame sinks.
pub mod encode;
/// Pixel formats.
pub mod format;
/// Frame storage.
pub mod frame;
/// Host runtime.
pub mod host;
/// Function registration.
pub mod plugin;
/// Frame sources.
pub mod source;

pub use crate::foundation::core::{Fps, FrameIndex, FrameRange};
pub use crate::foundation::error::{DenoiseError, DenoiseResult};

pub use crate::denoise::config::{FILTER_NAME, FilterConfig, MAX_RADIUS};
pub use crate::denoise::filter::TemporalDenoise;
pub use crate::denoise::kernel::{DenoiseKernel, KernelParams, PlaneView};
pub use crate::denoise::lifecycle::FetchedFrames;
pub use crate::denoise::marshal::marshal_planes;
pub use crate::denoise::register::{create, plugin, register};
pub use crate::denoise::scalar::ScalarTemporalKernel;
pub use crate::denoise::window::{FrameWindow, build_window};
pub use crate::encode::fingerprint::FingerprintSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::encode::y4m::Y4mSink;
pub use crate::format::video::{ColorFamily, SampleType, VideoFormat, VideoInfo};
pub use crate::frame::props::{FrameProps, PropValue};
pub use crate::frame::video_frame::{FrameRef, PlaneMut, PlaneRef, STRIDE_ALIGN, VideoFrame};
pub use crate::host::context::{FrameContext, FrameHandle, FrameLedger, FrameRequest, LedgerStats};
pub use crate::host::core::{CacheStats, Core, CoreOpts};
pub use crate::host::node::{
    Activation, ActivationReason, Filter, FilterMode, FrameComputation, Node, NodeId,
};
pub use crate::host::pipeline::{RenderStats, RenderThreading, render_range, render_to_sink};
pub use crate::plugin::args::{ArgMap, ArgValue};
pub use crate::plugin::registry::{FunctionEntry, Plugin};
pub use crate::plugin::signature::{ArgKind, ArgSpec, Signature};
pub use crate::source::memory::{BlankSource, MemorySource};
pub use crate::source::y4m::{Y4mHeader, open_y4m, read_y4m};
