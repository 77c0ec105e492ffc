//! Host runtime: nodes, the request/resume protocol, and range rendering.

pub(crate) mod cache;
/// Per-computation request channel and frame handles.
pub mod context;
/// The frame scheduler.
pub mod core;
/// Filter and node abstractions.
pub mod node;
/// Chunked range rendering.
pub mod pipeline;
