//! Frame sinks.
//!
//! Sinks consume rendered frames in index order and are fed by [`crate::render_to_sink`].

/// Per-frame fingerprint listing.
pub mod fingerprint;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
/// YUV4MPEG2 output.
pub mod y4m;
