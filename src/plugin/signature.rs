use std::str::FromStr;

use crate::foundation::error::{DenoiseError, DenoiseResult};
use crate::plugin::args::{ArgMap, ArgValue};

/// Declared argument type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgKind {
    /// `vnode`
    Node,
    /// `int`
    Int,
    /// `float`
    Float,
    /// `data`
    Data,
}

impl ArgKind {
    /// Signature spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Node => "vnode",
            Self::Int => "int",
            Self::Float => "float",
            Self::Data => "data",
        }
    }

    fn accepts(self, value: &ArgValue) -> bool {
        matches!(
            (self, value),
            (Self::Node, ArgValue::Node(_))
                | (Self::Int, ArgValue::Int(_))
                | (Self::Float, ArgValue::Float(_) | ArgValue::Int(_))
                | (Self::Data, ArgValue::Data(_))
        )
    }
}

impl FromStr for ArgKind {
    type Err = DenoiseError;

    fn from_str(s: &str) -> DenoiseResult<Self> {
        match s {
            "vnode" => Ok(Self::Node),
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "data" => Ok(Self::Data),
            other => Err(DenoiseError::config(format!(
                "unknown argument type '{other}'"
            ))),
        }
    }
}

/// One declared argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgSpec {
    /// Argument name.
    pub name: String,
    /// Declared type.
    pub kind: ArgKind,
    /// Whether the argument may be omitted.
    pub optional: bool,
}

/// Parsed `name:type[:opt];...` argument list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    args: Vec<ArgSpec>,
}

impl Signature {
    /// Declared arguments, in declaration order.
    pub fn args(&self) -> &[ArgSpec] {
        &self.args
    }

    /// Check a call's arguments against this signature.
    pub fn validate(&self, function: &str, args: &ArgMap) -> DenoiseResult<()> {
        for key in args.keys() {
            if !self.args.iter().any(|a| a.name == key) {
                return Err(DenoiseError::config(format!(
                    "{function}: unknown argument '{key}'"
                )));
            }
        }
        for spec in &self.args {
            match args.get(&spec.name) {
                None if spec.optional => {}
                None => {
                    return Err(DenoiseError::config(format!(
                        "{function}: {} required.",
                        spec.name
                    )));
                }
                Some(value) if !spec.kind.accepts(value) => {
                    return Err(DenoiseError::config(format!(
                        "{function}: argument '{}' must be {}, got {}",
                        spec.name,
                        spec.kind.as_str(),
                        value.kind().as_str()
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FromStr for Signature {
    type Err = DenoiseError;

    fn from_str(s: &str) -> DenoiseResult<Self> {
        let mut args = Vec::<ArgSpec>::new();
        for decl in s.split(';').filter(|d| !d.is_empty()) {
            let mut parts = decl.split(':');
            let name = parts.next().unwrap_or_default();
            if !is_identifier(name) {
                return Err(DenoiseError::config(format!(
                    "invalid argument name in '{decl}'"
                )));
            }
            let kind = parts
                .next()
                .ok_or_else(|| DenoiseError::config(format!("missing type in '{decl}'")))?
                .parse::<ArgKind>()?;
            let optional = match parts.next() {
                None => false,
                Some("opt") => true,
                Some(flag) => {
                    return Err(DenoiseError::config(format!(
                        "unknown flag '{flag}' in '{decl}'"
                    )));
                }
            };
            if parts.next().is_some() {
                return Err(DenoiseError::config(format!(
                    "too many fields in '{decl}'"
                )));
            }
            if args.iter().any(|a| a.name == name) {
                return Err(DenoiseError::config(format!(
                    "duplicate argument '{name}'"
                )));
            }
            args.push(ArgSpec {
                name: name.to_string(),
                kind,
                optional,
            });
        }
        Ok(Self { args })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plugin/signature.rs"]
mod tests;
