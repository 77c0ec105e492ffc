use std::sync::Arc;

use crate::denoise::config::{FILTER_NAME, FilterConfig};
use crate::denoise::filter::TemporalDenoise;
use crate::denoise::kernel::DenoiseKernel;
use crate::foundation::error::{DenoiseError, DenoiseResult};
use crate::host::node::Node;
use crate::plugin::args::ArgMap;
use crate::plugin::registry::Plugin;

/// Argument signature of the registered function.
pub const SIGNATURE: &str = "clip:vnode;radius:int:opt;alphaLow:float:opt;alphaMid:float:opt;alphaHigh:float:opt;strength:float:opt;";

/// Return signature of the registered function.
pub const RETURN_SIGNATURE: &str = "clip:vnode;";

/// Build a denoise node from plugin-style arguments.
pub fn create(args: &ArgMap, kernel: Arc<dyn DenoiseKernel>) -> DenoiseResult<Node> {
    let clip = args
        .get_node("clip")?
        .ok_or_else(|| DenoiseError::config(format!("{FILTER_NAME}: clip required.")))?;
    let config = FilterConfig::from_args(args)?;
    Node::new(TemporalDenoise::new(clip, config, kernel)?)
}

/// Register `TemporalDenoise` on `plugin`, backed by `kernel`.
pub fn register(plugin: &mut Plugin, kernel: Arc<dyn DenoiseKernel>) -> DenoiseResult<()> {
    plugin.register_function(FILTER_NAME, SIGNATURE, RETURN_SIGNATURE, move |args| {
        create(args, Arc::clone(&kernel))
    })
}

/// A plugin exposing only `TemporalDenoise`.
pub fn plugin(kernel: Arc<dyn DenoiseKernel>) -> DenoiseResult<Plugin> {
    let mut p = Plugin::new(
        "com.example.temporaldenoise",
        "tdn",
        "Lightweight Temporal Denoiser",
        (1, 0),
    );
    register(&mut p, kernel)?;
    Ok(p)
}
