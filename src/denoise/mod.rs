//! The temporal denoise filter.
//!
//! A [`filter::TemporalDenoise`] node turns each output index into a clamped window of input
//! frames, requests them, and once they are available hands per-plane views to a
//! [`kernel::DenoiseKernel`].

/// Filter parameters and their defaults.
pub mod config;
/// The filter and its two-phase per-frame computation.
pub mod filter;
/// The kernel contract.
pub mod kernel;
/// Ownership of fetched window frames.
pub mod lifecycle;
/// Per-plane view construction.
pub mod marshal;
/// Plugin registration.
pub mod register;
/// Reference CPU kernel.
pub mod scalar;
/// Window construction.
pub mod window;
