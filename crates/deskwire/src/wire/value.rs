//! Value model for the positional wire protocol.
//!
//! The backend speaks a flat positional convention: every request is an
//! alternating name/value sequence and flat responses echo the same shape.
//! [`WireValue`] captures the value kinds the backend understands and
//! [`FieldMap`] keeps name→value entries in insertion order, because an
//! entry's position in the map becomes its position on the wire.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single value in a positional request or response.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    /// Text value.
    Str(String),
    /// Integer value.
    Int(i64),
    /// Boolean value.
    Bool(bool),
    /// Binary content, kept tagged so the transport can apply the backend's
    /// base64 encoding at the protocol boundary.
    Binary(Vec<u8>),
    /// A nested record sent as one positional value, never flattened further.
    Record(FieldMap),
}

impl WireValue {
    /// Whether the value counts as absent for required-field checks.
    ///
    /// Strings are trimmed first; binaries and records are empty when they
    /// hold nothing. Integers and booleans are always present.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Str(text) => text.trim().is_empty(),
            Self::Binary(bytes) => bytes.is_empty(),
            Self::Record(fields) => fields.is_empty(),
            Self::Int(_) | Self::Bool(_) => false,
        }
    }

    /// Interprets the value as an integer where the backend sent one.
    ///
    /// Numeric text is accepted because the backend is loose about scalar
    /// types in responses.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Str(text) => text.trim().parse().ok(),
            Self::Bool(_) | Self::Binary(_) | Self::Record(_) => None,
        }
    }

    /// Renders the value as a response-map key.
    ///
    /// Flat responses are paired positionally, so a key slot can in principle
    /// carry any value kind; everything is folded to text the way the backend
    /// prints it.
    #[must_use]
    pub(crate) fn key_text(&self) -> String {
        match self {
            Self::Str(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(text) => formatter.write_str(text),
            Self::Int(value) => write!(formatter, "{value}"),
            Self::Bool(value) => write!(formatter, "{}", i64::from(*value)),
            Self::Binary(bytes) => write!(formatter, "<{} bytes>", bytes.len()),
            Self::Record(fields) => write!(formatter, "<record of {} fields>", fields.len()),
        }
    }
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for WireValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for WireValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for WireValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<u8>> for WireValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Binary(value)
    }
}

impl From<FieldMap> for WireValue {
    fn from(value: FieldMap) -> Self {
        Self::Record(value)
    }
}

impl Serialize for WireValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Str(text) => serializer.serialize_str(text),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Binary(bytes) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("base64Binary", &STANDARD.encode(bytes))?;
                map.end()
            }
            Self::Record(fields) => fields.serialize(serializer),
        }
    }
}

/// Ordered name→value mapping whose insertion order is the wire order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: Vec<(String, WireValue)>,
}

impl FieldMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets a field, replacing an existing entry in place so its wire
    /// position is kept, or appending when the name is new.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<WireValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Chainable form of [`FieldMap::set`] for building literals.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<WireValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Looks a field up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&WireValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Whether a field with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates entries in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &WireValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
