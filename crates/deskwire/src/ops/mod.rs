//! Operation descriptions and the merge/validate pipeline.
//!
//! Each backend operation is described once by an [`OperationSpec`]: its
//! selector pair, fixed defaults, the ordered allow-list of caller-overridable
//! fields, and the required-field table checked before anything is sent. The
//! catalog holds one constructor per operation; [`merge`] and [`validate`]
//! are the two pure steps every operation shares.

pub(crate) mod catalog;
mod merge;
mod validate;

use crate::wire::{FieldMap, RequestEnvelope};

pub use merge::merge;
pub use validate::{ValidationReport, validate};

/// Immutable description of one backend operation.
#[derive(Debug, Clone)]
pub struct OperationSpec {
    object: &'static str,
    action: &'static str,
    defaults: FieldMap,
    overridable: &'static [&'static str],
    required: &'static [Requirement],
}

impl OperationSpec {
    pub(crate) fn new(
        object: &'static str,
        action: &'static str,
        defaults: FieldMap,
        overridable: &'static [&'static str],
        required: &'static [Requirement],
    ) -> Self {
        Self {
            object,
            action,
            defaults,
            overridable,
            required,
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

    /// Fixed defaults sent unless the caller overrides them.
    #[must_use]
    pub fn defaults(&self) -> &FieldMap {
        &self.defaults
    }

    /// Ordered allow-list of caller-overridable field names.
    #[must_use]
    pub fn overridable(&self) -> &'static [&'static str] {
        self.overridable
    }

    /// Required-field table checked before dispatch.
    #[must_use]
    pub fn required(&self) -> &'static [Requirement] {
        self.required
    }

    /// Merges caller input onto this operation's defaults.
    #[must_use]
    pub fn merged(&self, input: &FieldMap) -> FieldMap {
        merge(&self.defaults, self.overridable, input)
    }

    /// Wraps merged fields in this operation's positional envelope.
    #[must_use]
    pub fn envelope(&self, merged: FieldMap) -> RequestEnvelope {
        RequestEnvelope::new(self.object, self.action, merged)
    }
}

/// One entry in an operation's required-field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// The named field must be present and non-blank.
    Present(&'static str),
    /// At least one of the named fields must be present and non-blank.
    AnyOf(&'static [&'static str]),
}

impl Requirement {
    /// Whether the merged fields satisfy this requirement.
    #[must_use]
    pub fn satisfied_by(&self, fields: &FieldMap) -> bool {
        match self {
            Self::Present(name) => fields.get(name).is_some_and(|value| !value.is_blank()),
            Self::AnyOf(names) => names
                .iter()
                .any(|name| fields.get(name).is_some_and(|value| !value.is_blank())),
        }
    }

    /// Human-readable label used in diagnostics, e.g. `Queue/QueueID`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Present(name) => (*name).to_owned(),
            Self::AnyOf(names) => names.join("/"),
        }
    }
}

/// Kind of article appended to a ticket.
///
/// The kind selects extra defaulted fields appended after the merge, so the
/// nested original-header block reflects caller overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleKind {
    /// Customer-facing web request article; triggers the auto-responder.
    Webrequest,
    /// Internal note; agents are not notified.
    NoteInternal,
}

impl ArticleKind {
    /// The backend's article type identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Webrequest => "webrequest",
            Self::NoteInternal => "note-internal",
        }
    }
}

/// A queue reference, by numeric identifier or by name.
///
/// The backend uses different field names for the two forms; keeping the
/// distinction in the type means callers never pick the wire field
/// themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueRef {
    /// Numeric queue identifier, sent as `QueueID`.
    Id(i64),
    /// Queue name, sent as `Queue`.
    Name(String),
}

impl QueueRef {
    /// The wire field name this reference selects.
    #[must_use]
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Id(_) => "QueueID",
            Self::Name(_) => "Queue",
        }
    }

    /// The wire value for this reference.
    #[must_use]
    pub fn value(&self) -> crate::wire::WireValue {
        match self {
            Self::Id(id) => crate::wire::WireValue::Int(*id),
            Self::Name(name) => crate::wire::WireValue::Str(name.clone()),
        }
    }
}

impl From<i64> for QueueRef {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for QueueRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for QueueRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}
