use std::collections::BTreeMap;
use std::sync::Arc;

use crate::foundation::error::{DenoiseError, DenoiseResult};
use crate::host::node::Node;
use crate::plugin::args::ArgMap;
use crate::plugin::signature::Signature;

type CreateFn = dyn Fn(&ArgMap) -> DenoiseResult<Node> + Send + Sync;

/// A registered plugin function.
#[derive(Clone)]
pub struct FunctionEntry {
    name: String,
    args: Signature,
    returns: Signature,
    create: Arc<CreateFn>,
}

impl FunctionEntry {
    /// Function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Argument signature.
    pub fn args(&self) -> &Signature {
        &self.args
    }

    /// Return signature.
    pub fn returns(&self) -> &Signature {
        &self.returns
    }
}

impl std::fmt::Debug for FunctionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionEntry")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// A named collection of filter constructors.
///
/// Registration is an explicit call made by whoever composes the graph; nothing registers itself.
#[derive(Debug)]
pub struct Plugin {
    identifier: String,
    namespace: String,
    name: String,
    version: (u16, u16),
    functions: BTreeMap<String, FunctionEntry>,
}

impl Plugin {
    /// Create an empty plugin.
    pub fn new(
        identifier: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
        version: (u16, u16),
    ) -> Self {
        Self {
            identifier: identifier.into(),
            namespace: namespace.into(),
            name: name.into(),
            version,
            functions: BTreeMap::new(),
        }
    }

    /// Reverse-domain identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Short namespace functions are addressed under.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `(major, minor)` version.
    pub fn version(&self) -> (u16, u16) {
        self.version
    }

    /// Register a constructor under `name`, with argument and return signatures.
    pub fn register_function(
        &mut self,
        name: &str,
        args: &str,
        returns: &str,
        create: impl Fn(&ArgMap) -> DenoiseResult<Node> + Send + Sync + 'static,
    ) -> DenoiseResult<()> {
        if self.functions.contains_key(name) {
            return Err(DenoiseError::config(format!(
                "{}: function '{name}' is already registered",
                self.namespace
            )));
        }
        let entry = FunctionEntry {
            name: name.to_string(),
            args: args.parse()?,
            returns: returns.parse()?,
            create: Arc::new(create),
        };
        self.functions.insert(name.to_string(), entry);
        Ok(())
    }

    /// Registered functions in name order.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionEntry> {
        self.functions.values()
    }

    /// Look up a function.
    pub fn function(&self, name: &str) -> Option<&FunctionEntry> {
        self.functions.get(name)
    }

    /// Validate `args` against the function's signature and construct the node.
    pub fn invoke(&self, name: &str, args: &ArgMap) -> DenoiseResult<Node> {
        let entry = self.functions.get(name).ok_or_else(|| {
            DenoiseError::config(format!(
                "{}: no function named '{name}'",
                self.namespace
            ))
        })?;
        entry.args.validate(name, args)?;
        (entry.create)(args)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plugin/registry.rs"]
mod tests;
