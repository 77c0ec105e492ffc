/// Convenience result type used across the crate.
pub type DenoiseResult<T> = Result<T, DenoiseError>;

/// Top-level error taxonomy used by filter, host, and I/O APIs.
#[derive(thiserror::Error, Debug)]
pub enum DenoiseError {
    /// Invalid user-provided construction parameters. Reported once, never retried.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid video geometry, pixel format, or container data.
    #[error("format error: {0}")]
    Format(String),

    /// The denoise kernel rejected its inputs.
    #[error("kernel error: {0}")]
    Kernel(String),

    /// A broken invariant inside the engine. Fatal for the computation that hit it.
    #[error("internal error: {0}")]
    Internal(String),

    /// IO failure while reading or writing streams.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DenoiseError {
    /// Build a [`DenoiseError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`DenoiseError::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Build a [`DenoiseError::Kernel`] value.
    pub fn kernel(msg: impl Into<String>) -> Self {
        Self::Kernel(msg.into())
    }

    /// Build a [`DenoiseError::Internal`] value.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Return `true` for errors that originate from construction-time configuration.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
