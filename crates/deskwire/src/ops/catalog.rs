//! The operation catalog: one constructor per backend operation.
//!
//! Selector names, defaults, allow-lists, and required-field tables live
//! here and nowhere else. Values a caller passes positionally (ticket ids,
//! attachment bytes) are folded into the defaults map so every operation
//! flows through the same merge → validate → encode pipeline.

use super::{ArticleKind, OperationSpec, QueueRef, Requirement};
use crate::wire::{FieldMap, WireValue};

/// Subsystem identifier every ticket operation is addressed to.
pub(crate) const TICKET_OBJECT: &str = "TicketObject";

/// Acting user sent when the caller does not name one.
pub(crate) const DEFAULT_USER_ID: i64 = 1;

const TICKET_CREATE_OVERRIDABLE: &[&str] = &[
    "Title",
    "Queue",
    "QueueID",
    "CustomerID",
    "CustomerUser",
    "Lock",
    "PriorityID",
    "State",
    "OwnerID",
    "UserID",
];

const TICKET_CREATE_REQUIRED: &[Requirement] = &[
    Requirement::Present("Title"),
    Requirement::AnyOf(&["Queue", "QueueID"]),
    Requirement::AnyOf(&["CustomerID", "CustomerUser"]),
];

pub(crate) fn ticket_create() -> OperationSpec {
    let defaults = FieldMap::new()
        .with("Lock", "unlock")
        .with("PriorityID", 2)
        .with("State", "new")
        .with("OwnerID", DEFAULT_USER_ID)
        .with("UserID", DEFAULT_USER_ID);
    OperationSpec::new(
        TICKET_OBJECT,
        "TicketCreate",
        defaults,
        TICKET_CREATE_OVERRIDABLE,
        TICKET_CREATE_REQUIRED,
    )
}

const ARTICLE_CREATE_OVERRIDABLE: &[&str] = &["Subject", "Body", "From", "ContentType"];

const ARTICLE_CREATE_REQUIRED: &[Requirement] = &[
    Requirement::Present("Subject"),
    Requirement::Present("Body"),
];

pub(crate) fn article_create(
    ticket_id: i64,
    kind: ArticleKind,
    created_by: &str,
) -> OperationSpec {
    let defaults = FieldMap::new()
        .with("TicketID", ticket_id)
        .with("ArticleType", kind.as_str())
        .with("SenderType", "system")
        .with("HistoryType", "WebRequestCustomer")
        .with("HistoryComment", created_by)
        .with("ContentType", "text/plain; charset=ISO-8859-1")
        .with("UserID", DEFAULT_USER_ID);
    OperationSpec::new(
        TICKET_OBJECT,
        "ArticleCreate",
        defaults,
        ARTICLE_CREATE_OVERRIDABLE,
        ARTICLE_CREATE_REQUIRED,
    )
}

/// Appends the kind-specific fields after the merge, so the nested
/// original-header block reflects caller overrides.
pub(crate) fn apply_article_kind(merged: &mut FieldMap, kind: ArticleKind) {
    match kind {
        ArticleKind::NoteInternal => {
            merged.set("NoAgentNotify", 1);
        }
        ArticleKind::Webrequest => {
            let from = merged
                .get("From")
                .cloned()
                .unwrap_or_else(|| WireValue::from(""));
            let subject = merged
                .get("Subject")
                .cloned()
                .unwrap_or_else(|| WireValue::from(""));
            let body = merged
                .get("Body")
                .cloned()
                .unwrap_or_else(|| WireValue::from(""));
            let header = FieldMap::new()
                .with("From", from)
                .with("To", "Postmaster")
                .with("Subject", subject)
                .with("Body", body);
            merged.set("Loop", 0);
            merged.set("AutoResponseType", "auto reply");
            merged.set("OrigHeader", header);
        }
    }
}

const ATTACHMENT_REQUIRED: &[Requirement] = &[
    Requirement::Present("ArticleID"),
    Requirement::Present("Content"),
];

pub(crate) fn article_write_attachment(
    article_id: i64,
    content: Vec<u8>,
    file_name: &str,
    mime_type: &str,
) -> OperationSpec {
    let defaults = FieldMap::new()
        .with("Content", content)
        .with("ContentType", mime_type)
        .with("Filename", file_name)
        .with("ArticleID", article_id)
        .with("UserID", DEFAULT_USER_ID);
    OperationSpec::new(
        TICKET_OBJECT,
        "ArticleWriteAttachment",
        defaults,
        &[],
        ATTACHMENT_REQUIRED,
    )
}

const TICKET_ID_ONLY: &[Requirement] = &[Requirement::Present("TicketID")];

pub(crate) fn ticket_number_lookup(ticket_id: i64) -> OperationSpec {
    let defaults = FieldMap::new().with("TicketID", ticket_id);
    OperationSpec::new(
        TICKET_OBJECT,
        "TicketNumberLookup",
        defaults,
        &[],
        TICKET_ID_ONLY,
    )
}

const TICKET_NUMBER_ONLY: &[Requirement] = &[Requirement::Present("TicketNumber")];

pub(crate) fn ticket_id_lookup(ticket_number: &str) -> OperationSpec {
    let defaults = FieldMap::new().with("TicketNumber", ticket_number);
    OperationSpec::new(
        TICKET_OBJECT,
        "TicketIDLookup",
        defaults,
        &[],
        TICKET_NUMBER_ONLY,
    )
}

pub(crate) fn ticket_get(ticket_id: i64, extended: bool) -> OperationSpec {
    let defaults = FieldMap::new()
        .with("TicketID", ticket_id)
        .with("Extended", i64::from(extended));
    OperationSpec::new(TICKET_OBJECT, "TicketGet", defaults, &[], TICKET_ID_ONLY)
}

const QUEUE_SET_REQUIRED: &[Requirement] = &[
    Requirement::Present("TicketID"),
    Requirement::AnyOf(&["Queue", "QueueID"]),
];

pub(crate) fn ticket_queue_set(ticket_id: i64, queue: &QueueRef, user_id: i64) -> OperationSpec {
    let defaults = FieldMap::new()
        .with("TicketID", ticket_id)
        .with("UserID", user_id)
        .with(queue.field_name(), queue.value());
    OperationSpec::new(
        TICKET_OBJECT,
        "TicketQueueSet",
        defaults,
        &[],
        QUEUE_SET_REQUIRED,
    )
}

const SUBJECT_BUILD_OVERRIDABLE: &[&str] = &["Subject"];

const SUBJECT_BUILD_REQUIRED: &[Requirement] = &[
    Requirement::Present("TicketNumber"),
    Requirement::Present("Subject"),
];

pub(crate) fn ticket_subject_build(ticket_number: &str) -> OperationSpec {
    let defaults = FieldMap::new().with("TicketNumber", ticket_number);
    OperationSpec::new(
        TICKET_OBJECT,
        "TicketSubjectBuild",
        defaults,
        SUBJECT_BUILD_OVERRIDABLE,
        SUBJECT_BUILD_REQUIRED,
    )
}
