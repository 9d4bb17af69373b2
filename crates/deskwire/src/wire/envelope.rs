//! Positional request envelopes.
//!
//! This module isolates the flattening step: a merged [`FieldMap`] becomes
//! the `[object, action, name, value, …]` sequence the backend's Dispatch
//! method expects. Nothing else in the crate reasons about array positions.

use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::value::{FieldMap, WireValue};

/// The exact positional sequence sent to the transport port.
///
/// The two-element selector prefix addresses the backend subsystem and
/// remote method; the tail alternates field names and values in map order.
/// Credentials are prepended by the transport implementation, never here.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope {
    object: &'static str,
    action: &'static str,
    fields: FieldMap,
}

impl RequestEnvelope {
    /// Builds an envelope from a selector pair and merged fields.
    #[must_use]
    pub fn new(object: &'static str, action: &'static str, fields: FieldMap) -> Self {
        Self {
            object,
            action,
            fields,
        }
    }

    /// Target subsystem identifier.
    #[must_use]
    pub fn object(&self) -> &'static str {
        self.object
    }

    /// Remote method identifier.
    #[must_use]
    pub fn action(&self) -> &'static str {
        self.action
    }

    /// The merged fields behind the selector prefix.
    #[must_use]
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Flattens the envelope into its positional form.
    ///
    /// The result always has even length: the selector pair plus one
    /// name/value pair per field.
    #[must_use]
    pub fn positional(&self) -> Vec<WireValue> {
        let mut sequence = Vec::with_capacity(self.positional_len());
        sequence.push(WireValue::from(self.object));
        sequence.push(WireValue::from(self.action));
        for (name, value) in self.fields.iter() {
            sequence.push(WireValue::from(name));
            sequence.push(value.clone());
        }
        sequence
    }

    /// Length of the positional form without materialising it.
    #[must_use]
    pub fn positional_len(&self) -> usize {
        2 + self.fields.len() * 2
    }
}

impl Serialize for RequestEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut sequence = serializer.serialize_seq(Some(self.positional_len()))?;
        sequence.serialize_element(self.object)?;
        sequence.serialize_element(self.action)?;
        for (name, value) in self.fields.iter() {
            sequence.serialize_element(name)?;
            sequence.serialize_element(value)?;
        }
        sequence.end()
    }
}
