//! Function registration with typed argument signatures.

/// Argument values and maps.
pub mod args;
/// Plugin and function registry.
pub mod registry;
/// Argument signature parsing and validation.
pub mod signature;
