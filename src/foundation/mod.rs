/// Frame indices, ranges, and rates.
pub mod core;
/// Crate error type.
pub mod error;
