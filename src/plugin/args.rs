use std::collections::BTreeMap;

use crate::foundation::error::{DenoiseError, DenoiseResult};
use crate::host::node::Node;
use crate::plugin::signature::ArgKind;

/// One argument value passed to a plugin function.
#[derive(Clone, Debug)]
pub enum ArgValue {
    /// A clip.
    Node(Node),
    /// An integer.
    Int(i64),
    /// A float.
    Float(f64),
    /// A string.
    Data(String),
}

impl ArgValue {
    /// The declared kind this value satisfies exactly.
    pub fn kind(&self) -> ArgKind {
        match self {
            Self::Node(_) => ArgKind::Node,
            Self::Int(_) => ArgKind::Int,
            Self::Float(_) => ArgKind::Float,
            Self::Data(_) => ArgKind::Data,
        }
    }
}

/// Named arguments for a plugin function call.
#[derive(Clone, Debug, Default)]
pub struct ArgMap {
    entries: BTreeMap<String, ArgValue>,
}

impl ArgMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: ArgValue) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace an argument.
    pub fn set(&mut self, key: impl Into<String>, value: ArgValue) {
        self.entries.insert(key.into(), value);
    }

    /// Raw lookup.
    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.entries.get(key)
    }

    /// Argument names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Look up a clip argument. Present-but-mistyped values are configuration errors.
    pub fn get_node(&self, key: &str) -> DenoiseResult<Option<Node>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(ArgValue::Node(n)) => Ok(Some(n.clone())),
            Some(other) => Err(type_error(key, ArgKind::Node, other)),
        }
    }

    /// Look up an integer argument.
    pub fn get_int(&self, key: &str) -> DenoiseResult<Option<i64>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(ArgValue::Int(v)) => Ok(Some(*v)),
            Some(other) => Err(type_error(key, ArgKind::Int, other)),
        }
    }

    /// Look up a float argument; integers are widened.
    pub fn get_float(&self, key: &str) -> DenoiseResult<Option<f64>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(ArgValue::Float(v)) => Ok(Some(*v)),
            Some(ArgValue::Int(v)) => Ok(Some(*v as f64)),
            Some(other) => Err(type_error(key, ArgKind::Float, other)),
        }
    }

    /// Look up a string argument.
    pub fn get_data(&self, key: &str) -> DenoiseResult<Option<&str>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(ArgValue::Data(v)) => Ok(Some(v.as_str())),
            Some(other) => Err(type_error(key, ArgKind::Data, other)),
        }
    }
}

fn type_error(key: &str, want: ArgKind, got: &ArgValue) -> DenoiseError {
    DenoiseError::config(format!(
        "argument '{key}' must be {}, got {}",
        want.as_str(),
        got.kind().as_str()
    ))
}
