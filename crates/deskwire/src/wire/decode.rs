//! Best-effort reshaping of backend responses.
//!
//! Flat responses arrive as alternating key/value sequences; this module
//! pairs them back into a [`FieldMap`]. Decoding never fails: unexpected
//! shapes pass through as scalars and a trailing unpaired element is dropped,
//! mirroring a long-standing backend quirk.

use super::value::{FieldMap, WireValue};

/// Raw result handed back by the transport port.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResult {
    /// A single scalar value.
    Scalar(WireValue),
    /// A flat alternating key/value sequence.
    Flat(Vec<WireValue>),
}

/// A reshaped backend response.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedResult {
    /// A scalar passed through unchanged.
    Scalar(WireValue),
    /// A flat sequence paired back into a mapping.
    Record(FieldMap),
}

impl DecodedResult {
    /// Looks a field up when the response decoded to a record.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&WireValue> {
        match self {
            Self::Record(fields) => fields.get(name),
            Self::Scalar(_) => None,
        }
    }

    /// Interprets a scalar response as an integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Scalar(value) => value.as_i64(),
            Self::Record(_) => None,
        }
    }

    /// Interprets a scalar response as text.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Scalar(WireValue::Str(text)) => Some(text.clone()),
            Self::Scalar(WireValue::Int(value)) => Some(value.to_string()),
            _ => None,
        }
    }

    /// Whether the backend reported success.
    ///
    /// The backend signals success with `1`/true scalars; empty strings,
    /// zero, and false are failures. Records count as success because the
    /// backend returned data.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::Scalar(WireValue::Bool(value)) => *value,
            Self::Scalar(WireValue::Int(value)) => *value != 0,
            Self::Scalar(WireValue::Str(text)) => {
                let trimmed = text.trim();
                !trimmed.is_empty() && trimmed != "0"
            }
            Self::Scalar(WireValue::Binary(bytes)) => !bytes.is_empty(),
            Self::Scalar(WireValue::Record(fields)) => !fields.is_empty(),
            Self::Record(_) => true,
        }
    }
}

/// Reshapes a raw transport result.
///
/// Flat sequences pair element `2i` (key) with `2i + 1` (value); a trailing
/// key without a value is dropped. Scalars pass through unchanged.
#[must_use]
pub fn decode(raw: RawResult) -> DecodedResult {
    match raw {
        RawResult::Scalar(value) => DecodedResult::Scalar(value),
        RawResult::Flat(sequence) => {
            let mut fields = FieldMap::new();
            let mut elements = sequence.into_iter();
            while let Some(key) = elements.next() {
                let Some(value) = elements.next() else {
                    break;
                };
                fields.set(key.key_text(), value);
            }
            DecodedResult::Record(fields)
        }
    }
}
