//! Required-field validation.
//!
//! Validation runs strictly before encoding: a failed report means zero
//! transport calls for that operation. The validator collects every violated
//! requirement in one pass so a caller sees all missing fields in a single
//! diagnostic batch, and it never panics or returns an error.

use super::{OperationSpec, Requirement};
use crate::wire::FieldMap;

/// Outcome of validating merged fields against an operation's requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    messages: Vec<String>,
}

impl ValidationReport {
    /// Whether every requirement was satisfied.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.messages.is_empty()
    }

    /// One message per violated requirement.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Consumes the report, yielding the messages for diagnostic appending.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

/// Checks merged fields against the operation's required-field table.
#[must_use]
pub fn validate(operation: &OperationSpec, merged: &FieldMap) -> ValidationReport {
    let messages = operation
        .required()
        .iter()
        .filter(|requirement| !requirement.satisfied_by(merged))
        .map(|requirement| violation_message(operation, requirement))
        .collect();
    ValidationReport { messages }
}

fn violation_message(operation: &OperationSpec, requirement: &Requirement) -> String {
    format!(
        "{}: {} is missing or empty",
        operation.action(),
        requirement.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::catalog;

    #[test]
    fn passes_when_all_requirements_hold() {
        let operation = catalog::ticket_create();
        let merged = operation.merged(
            &FieldMap::new()
                .with("Title", "Printer on fire")
                .with("Queue", "support")
                .with("CustomerUser", "bob"),
        );
        assert!(validate(&operation, &merged).is_ok());
    }

    #[test]
    fn collects_every_violation_in_one_pass() {
        let operation = catalog::ticket_create();
        let merged = operation.merged(&FieldMap::new());
        let report = validate(&operation, &merged);
        assert!(!report.is_ok());
        assert_eq!(report.messages().len(), 3);
        assert!(report.messages().iter().any(|m| m.contains("Title")));
        assert!(report.messages().iter().any(|m| m.contains("Queue/QueueID")));
        assert!(
            report
                .messages()
                .iter()
                .any(|m| m.contains("CustomerID/CustomerUser"))
        );
    }

    #[test]
    fn whitespace_only_title_counts_as_missing() {
        let operation = catalog::ticket_create();
        let merged = operation.merged(
            &FieldMap::new()
                .with("Title", "   ")
                .with("Queue", "support")
                .with("CustomerUser", "bob"),
        );
        let report = validate(&operation, &merged);
        assert_eq!(report.messages().len(), 1);
        assert!(report.messages().first().is_some_and(|m| m.contains("Title")));
    }
}
