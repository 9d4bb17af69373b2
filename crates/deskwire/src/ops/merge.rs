//! Default/override merging.

use crate::wire::FieldMap;

/// Merges caller input onto an operation's defaults.
///
/// The result starts as a copy of `defaults`. For each name in the ordered
/// allow-list, a caller-supplied entry replaces the default in place (keeping
/// its wire position) or is appended when no default exists. Caller fields
/// outside the allow-list are silently ignored, so the backend can never
/// receive a field the operation does not declare.
#[must_use]
pub fn merge(defaults: &FieldMap, overridable: &[&str], input: &FieldMap) -> FieldMap {
    let mut merged = defaults.clone();
    for name in overridable {
        if let Some(value) = input.get(name) {
            merged.set(*name, value.clone());
        }
    }
    merged
}
