use std::path::Path;

use crate::foundation::error::{DenoiseError, DenoiseResult};
use crate::plugin::args::ArgMap;

/// Name the filter registers and reports errors under.
pub const FILTER_NAME: &str = "TemporalDenoise";

/// Largest accepted `radius`; a window never spans more than `2 * MAX_RADIUS + 1` frames.
pub const MAX_RADIUS: u32 = 1024;

/// Immutable parameters of one filter instance.
///
/// The three coefficients and `strength` are opaque to the engine: they are forwarded verbatim
/// to the kernel for every plane.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FilterConfig {
    /// Temporal half-window size; the window spans `2 * radius + 1` frames.
    pub radius: u32,
    /// Blend coefficient for the "low" band.
    pub alpha_low: f32,
    /// Blend coefficient for the "mid" band.
    pub alpha_mid: f32,
    /// Blend coefficient for the "high" band.
    pub alpha_high: f32,
    /// Overall scale factor.
    pub strength: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            radius: 2,
            alpha_low: 0.7,
            alpha_mid: 0.4,
            alpha_high: 0.1,
            strength: 1.0,
        }
    }
}

impl FilterConfig {
    /// Number of frames in every window.
    pub fn window_len(&self) -> usize {
        2 * self.radius as usize + 1
    }

    /// Read optional parameters from a plugin call, applying defaults for absent keys.
    pub fn from_args(args: &ArgMap) -> DenoiseResult<Self> {
        let defaults = Self::default();
        let radius = match args.get_int("radius")? {
            None => defaults.radius,
            Some(r) if r < 0 => {
                return Err(DenoiseError::config(format!(
                    "{FILTER_NAME}: radius must be >= 0, got {r}"
                )));
            }
            Some(r) => u32::try_from(r).map_err(|_| radius_too_large(r))?,
        };
        let float = |key: &str, default: f32| -> DenoiseResult<f32> {
            Ok(args.get_float(key)?.map_or(default, |v| v as f32))
        };
        let config = Self {
            radius,
            alpha_low: float("alphaLow", defaults.alpha_low)?,
            alpha_mid: float("alphaMid", defaults.alpha_mid)?,
            alpha_high: float("alphaHigh", defaults.alpha_high)?,
            strength: float("strength", defaults.strength)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject a radius above [`MAX_RADIUS`]. Coefficients are not range checked.
    pub fn validate(&self) -> DenoiseResult<()> {
        if self.radius > MAX_RADIUS {
            return Err(radius_too_large(i64::from(self.radius)));
        }
        Ok(())
    }

    /// Parse a JSON document; absent keys take their defaults.
    pub fn from_json_str(s: &str) -> DenoiseResult<Self> {
        let config: Self = serde_json::from_str(s)
            .map_err(|e| DenoiseError::config(format!("{FILTER_NAME}: invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn from_json_path(path: impl AsRef<Path>) -> DenoiseResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            DenoiseError::config(format!(
                "{FILTER_NAME}: read config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&text)
    }
}

fn radius_too_large(r: i64) -> DenoiseError {
    DenoiseError::config(format!(
        "{FILTER_NAME}: radius {r} exceeds the maximum of {MAX_RADIUS}"
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/denoise/config.rs"]
mod tests;
