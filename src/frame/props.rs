use std::collections::BTreeMap;

/// One frame property value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PropValue {
    /// Integer property.
    Int(i64),
    /// Floating-point property.
    Float(f64),
    /// UTF-8 data property.
    Data(String),
}

/// Per-frame metadata map (durations, frame numbers, color hints).
///
/// Keys are ordered so property sets compare and serialize deterministically.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameProps {
    entries: BTreeMap<String, PropValue>,
}

impl FrameProps {
    /// Create an empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a property.
    pub fn set(&mut self, key: impl Into<String>, value: PropValue) {
        self.entries.insert(key.into(), value);
    }

    /// Look up a property.
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.entries.get(key)
    }

    /// Look up an integer property.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.entries.get(key) {
            Some(PropValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Remove a property, returning the old value.
    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.entries.remove(key)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when no properties are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate properties in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
