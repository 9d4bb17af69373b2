//! Ticket operations facade.
//!
//! Every operation follows the same path: merge caller fields onto the
//! operation's defaults, validate required fields, flatten into the
//! positional envelope, dispatch through the transport port, and reshape the
//! flat response. Failures never cross this boundary as errors: operations
//! return `None`/`false` sentinels, validation messages accumulate in the
//! adapter's diagnostic log, and transport faults are reported through
//! `tracing` at the single send choke point.

use camino::Utf8Path;
use deskwire_config::ServiceProfile;
use tracing::{debug, warn};

use crate::files::{FileSource, SystemFileSource};
use crate::ops::catalog;
use crate::ops::{ArticleKind, OperationSpec, QueueRef, validate};
use crate::transport::DispatchTransport;
use crate::wire::{DecodedResult, FieldMap, RequestEnvelope, WireValue, decode};

/// Tracing target for dispatch operations.
const CLIENT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::client");

/// Acting user sent when the caller does not name one.
pub const DEFAULT_USER_ID: i64 = catalog::DEFAULT_USER_ID;

/// Client adapter for one ticketing backend.
///
/// Constructed once with the connection profile and a live transport; the
/// diagnostic log accumulates for the adapter's lifetime. The adapter is
/// synchronous and not safe to share across threads without external
/// locking.
pub struct TicketClient<T> {
    transport: T,
    profile: ServiceProfile,
    files: Box<dyn FileSource>,
    diagnostics: DiagnosticLog,
}

impl<T: DispatchTransport> TicketClient<T> {
    /// Creates an adapter reading attachment content from the local
    /// filesystem.
    pub fn new(profile: ServiceProfile, transport: T) -> Self {
        Self::with_file_source(profile, transport, Box::new(SystemFileSource))
    }

    /// Creates an adapter with an explicit file port.
    pub fn with_file_source(
        profile: ServiceProfile,
        transport: T,
        files: Box<dyn FileSource>,
    ) -> Self {
        Self {
            transport,
            profile,
            files,
            diagnostics: DiagnosticLog::default(),
        }
    }

    /// The connection profile this adapter was constructed with.
    #[must_use]
    pub fn profile(&self) -> &ServiceProfile {
        &self.profile
    }

    /// Diagnostics accumulated since the adapter was created.
    #[must_use]
    pub fn log(&self) -> &[String] {
        self.diagnostics.entries()
    }

    /// Creates a ticket and returns its backend id.
    ///
    /// When the input carries a non-blank `Body`, a dependent follow-up call
    /// creates the first article from the same title, body, and sender; the
    /// follow-up result is discarded and its failure is not surfaced, only
    /// logged.
    pub fn create_ticket(&mut self, fields: &FieldMap, created_by: &str) -> Option<i64> {
        let operation = catalog::ticket_create();
        let merged = operation.merged(fields);
        if !self.check(&operation, &merged) {
            return None;
        }
        let decoded = self.send(&operation.envelope(merged))?;
        let ticket_id = decoded.as_i64()?;

        if fields.get("Body").is_some_and(|body| !body.is_blank()) {
            let mut article = FieldMap::new();
            if let Some(title) = fields.get("Title") {
                article.set("Subject", title.clone());
            }
            if let Some(body) = fields.get("Body") {
                article.set("Body", body.clone());
            }
            if let Some(from) = fields.get("From") {
                article.set("From", from.clone());
            }
            let _ = self.add_article(ticket_id, ArticleKind::Webrequest, &article, created_by);
        }

        Some(ticket_id)
    }

    /// Appends an article to a ticket and returns the article id.
    pub fn add_article(
        &mut self,
        ticket_id: i64,
        kind: ArticleKind,
        fields: &FieldMap,
        created_by: &str,
    ) -> Option<i64> {
        let operation = catalog::article_create(ticket_id, kind, created_by);
        let mut merged = operation.merged(fields);
        if !self.check(&operation, &merged) {
            return None;
        }
        catalog::apply_article_kind(&mut merged, kind);
        let decoded = self.send(&operation.envelope(merged))?;
        decoded.as_i64()
    }

    /// Appends an internal note to a ticket, discarding the backend's
    /// result.
    pub fn add_note(&mut self, ticket_id: i64, fields: &FieldMap, created_by: &str) {
        let _ = self.add_article(ticket_id, ArticleKind::NoteInternal, fields, created_by);
    }

    /// Looks up the human-facing ticket number for a ticket id.
    ///
    /// The backend is loose about the scalar it returns; the number is
    /// reformatted with zero decimal places and no separators.
    pub fn get_ticket_number(&mut self, ticket_id: i64) -> Option<String> {
        let operation = catalog::ticket_number_lookup(ticket_id);
        match self.run(&operation, &FieldMap::new())? {
            DecodedResult::Scalar(value) => format_ticket_number(&value),
            DecodedResult::Record(_) => None,
        }
    }

    /// Looks up the backend ticket id for a ticket number.
    pub fn get_id(&mut self, ticket_number: &str) -> Option<i64> {
        let operation = catalog::ticket_id_lookup(ticket_number);
        self.run(&operation, &FieldMap::new())?.as_i64()
    }

    /// Fetches a ticket's fields, optionally with extended data.
    pub fn get_ticket(&mut self, ticket_id: i64, extended: bool) -> Option<DecodedResult> {
        let operation = catalog::ticket_get(ticket_id, extended);
        self.run(&operation, &FieldMap::new())
    }

    /// Moves a ticket into another queue as the default user.
    pub fn move_ticket(&mut self, ticket_id: i64, queue: impl Into<QueueRef>) -> bool {
        self.move_ticket_as(ticket_id, queue, DEFAULT_USER_ID)
    }

    /// Moves a ticket into another queue as a specific user.
    pub fn move_ticket_as(
        &mut self,
        ticket_id: i64,
        queue: impl Into<QueueRef>,
        user_id: i64,
    ) -> bool {
        let operation = catalog::ticket_queue_set(ticket_id, &queue.into(), user_id);
        self.run(&operation, &FieldMap::new())
            .is_some_and(|decoded| decoded.is_success())
    }

    /// Builds the outgoing subject line for a reply on a ticket.
    pub fn outgoing_subject(&mut self, ticket_number: &str, fields: &FieldMap) -> Option<String> {
        let operation = catalog::ticket_subject_build(ticket_number);
        self.run(&operation, fields)?.as_text()
    }

    /// Attaches file content to an existing article.
    ///
    /// The file handle is scoped to the read and released before the
    /// dispatch, whatever the outcome.
    pub fn attach_file_to_article(
        &mut self,
        article_id: i64,
        path: &Utf8Path,
        file_name: &str,
        mime_type: &str,
    ) -> Option<DecodedResult> {
        let content = match self.files.read_all(path) {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(
                    target: CLIENT_TARGET,
                    path = %path,
                    error = %error,
                    "attachment read failed"
                );
                self.diagnostics
                    .push(format!("ArticleWriteAttachment: could not read '{path}': {error}"));
                return None;
            }
        };
        let operation = catalog::article_write_attachment(article_id, content, file_name, mime_type);
        self.run(&operation, &FieldMap::new())
    }

    /// Shared merge → validate → send path for operations without bespoke
    /// post-merge steps.
    fn run(&mut self, operation: &OperationSpec, input: &FieldMap) -> Option<DecodedResult> {
        let merged = operation.merged(input);
        if !self.check(operation, &merged) {
            return None;
        }
        self.send(&operation.envelope(merged))
    }

    /// Validates merged fields, logging every violation on failure.
    fn check(&mut self, operation: &OperationSpec, merged: &FieldMap) -> bool {
        let report = validate(operation, merged);
        if report.is_ok() {
            return true;
        }
        warn!(
            target: CLIENT_TARGET,
            action = operation.action(),
            violations = report.messages().len(),
            "request validation failed"
        );
        self.diagnostics.extend(report.into_messages());
        false
    }

    /// The single transport choke point: every dispatch and every transport
    /// failure conversion happens here.
    fn send(&mut self, envelope: &RequestEnvelope) -> Option<DecodedResult> {
        debug!(
            target: CLIENT_TARGET,
            service = self.profile.service_identifier(),
            object = envelope.object(),
            action = envelope.action(),
            fields = envelope.fields().len(),
            "dispatching"
        );
        match self.transport.dispatch(envelope) {
            Ok(raw) => Some(decode(raw)),
            Err(error) => {
                warn!(
                    target: CLIENT_TARGET,
                    action = envelope.action(),
                    error = %error,
                    "dispatch failed"
                );
                None
            }
        }
    }
}

/// Append-only diagnostic log scoped to one adapter instance.
///
/// Entries accumulate for the adapter's lifetime and are cleared only by
/// recreating the adapter.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    entries: Vec<String>,
}

impl DiagnosticLog {
    pub(crate) fn push(&mut self, entry: String) {
        self.entries.push(entry);
    }

    pub(crate) fn extend(&mut self, entries: Vec<String>) {
        self.entries.extend(entries);
    }

    /// Entries in append order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Whether nothing has been logged yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Formats a ticket-number scalar with zero decimal places and no
/// separators, tolerating the backend's habit of returning floats as text.
fn format_ticket_number(value: &WireValue) -> Option<String> {
    match value {
        WireValue::Int(number) => Some(number.to_string()),
        WireValue::Str(text) => {
            let trimmed = text.trim();
            if let Ok(number) = trimmed.parse::<i64>() {
                return Some(number.to_string());
            }
            trimmed.parse::<f64>().ok().map(|number| format!("{number:.0}"))
        }
        WireValue::Bool(_) | WireValue::Binary(_) | WireValue::Record(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{MockDispatchTransport, TransportError};
    use crate::wire::RawResult;
    use deskwire_config::{Credentials, ServiceProfile};
    use rstest::rstest;
    use std::io;

    fn profile() -> ServiceProfile {
        ServiceProfile::new(
            "http://tickets.example.net/rpc"
                .parse()
                .expect("endpoint should parse"),
            "Core",
            Credentials::new("helpdesk", "hunter2"),
        )
    }

    fn client(transport: MockDispatchTransport) -> TicketClient<MockDispatchTransport> {
        TicketClient::new(profile(), transport)
    }

    #[test]
    fn validation_failure_suppresses_dispatch_and_logs() {
        let mut transport = MockDispatchTransport::new();
        transport.expect_dispatch().never();
        let mut client = client(transport);

        let fields = FieldMap::new()
            .with("Title", "")
            .with("Queue", "support")
            .with("CustomerUser", "bob");
        let result = client.create_ticket(&fields, "portal");

        assert_eq!(result, None);
        assert!(client.log().iter().any(|entry| entry.contains("Title")));
    }

    #[test]
    fn create_ticket_returns_backend_id() {
        let mut transport = MockDispatchTransport::new();
        transport
            .expect_dispatch()
            .withf(|envelope| {
                envelope.action() == "TicketCreate"
                    && envelope.fields().get("QueueID") == Some(&WireValue::Int(3))
                    && !envelope.fields().contains("Queue")
            })
            .times(1)
            .returning(|_| Ok(RawResult::Scalar(WireValue::Int(4711))));
        let mut client = client(transport);

        let fields = FieldMap::new()
            .with("Title", "Help")
            .with("QueueID", 3)
            .with("CustomerID", "C100");
        assert_eq!(client.create_ticket(&fields, "portal"), Some(4711));
        assert!(client.log().is_empty());
    }

    #[test]
    fn create_ticket_with_body_issues_follow_up_article() {
        let mut transport = MockDispatchTransport::new();
        transport
            .expect_dispatch()
            .withf(|envelope| envelope.action() == "TicketCreate")
            .times(1)
            .returning(|_| Ok(RawResult::Scalar(WireValue::Int(4711))));
        transport
            .expect_dispatch()
            .withf(|envelope| {
                envelope.action() == "ArticleCreate"
                    && envelope.fields().get("TicketID") == Some(&WireValue::Int(4711))
                    && envelope.fields().get("Subject") == Some(&WireValue::from("Help"))
                    && envelope.fields().contains("OrigHeader")
            })
            .times(1)
            .returning(|_| Ok(RawResult::Scalar(WireValue::Int(99))));
        let mut client = client(transport);

        let fields = FieldMap::new()
            .with("Title", "Help")
            .with("QueueID", 3)
            .with("CustomerID", "C100")
            .with("Body", "The printer is on fire")
            .with("From", "bob@example.net");
        assert_eq!(client.create_ticket(&fields, "portal"), Some(4711));
    }

    #[test]
    fn follow_up_article_failure_is_not_surfaced() {
        let mut transport = MockDispatchTransport::new();
        transport
            .expect_dispatch()
            .withf(|envelope| envelope.action() == "TicketCreate")
            .times(1)
            .returning(|_| Ok(RawResult::Scalar(WireValue::Int(4711))));
        transport
            .expect_dispatch()
            .withf(|envelope| envelope.action() == "ArticleCreate")
            .times(1)
            .returning(|_| {
                Err(TransportError::Connection {
                    endpoint: "http://tickets.example.net/rpc".to_owned(),
                    source: io::Error::new(io::ErrorKind::ConnectionReset, "reset"),
                })
            });
        let mut client = client(transport);

        let fields = FieldMap::new()
            .with("Title", "Help")
            .with("Queue", "support")
            .with("CustomerUser", "bob")
            .with("Body", "Body text");
        assert_eq!(client.create_ticket(&fields, "portal"), Some(4711));
    }

    #[test]
    fn add_article_returns_article_id() {
        let mut transport = MockDispatchTransport::new();
        transport
            .expect_dispatch()
            .withf(|envelope| {
                envelope.action() == "ArticleCreate"
                    && envelope.fields().get("NoAgentNotify") == Some(&WireValue::Int(1))
                    && envelope.fields().get("HistoryComment")
                        == Some(&WireValue::from("agent-7"))
            })
            .times(1)
            .returning(|_| Ok(RawResult::Scalar(WireValue::Int(23))));
        let mut client = client(transport);

        let fields = FieldMap::new().with("Subject", "Note").with("Body", "Internal");
        let article = client.add_article(5, ArticleKind::NoteInternal, &fields, "agent-7");
        assert_eq!(article, Some(23));
    }

    #[test]
    fn add_note_discards_the_result() {
        let mut transport = MockDispatchTransport::new();
        transport
            .expect_dispatch()
            .times(1)
            .returning(|_| Ok(RawResult::Scalar(WireValue::Int(23))));
        let mut client = client(transport);

        let fields = FieldMap::new().with("Subject", "Note").with("Body", "Internal");
        client.add_note(5, &fields, "agent-7");
        assert!(client.log().is_empty());
    }

    #[rstest]
    #[case(RawResult::Scalar(WireValue::Int(123)), "123")]
    #[case(RawResult::Scalar(WireValue::from("123")), "123")]
    #[case(RawResult::Scalar(WireValue::from("123.0")), "123")]
    fn ticket_number_is_reformatted(#[case] raw: RawResult, #[case] expected: &str) {
        let mut transport = MockDispatchTransport::new();
        transport
            .expect_dispatch()
            .withf(|envelope| envelope.action() == "TicketNumberLookup")
            .times(1)
            .returning(move |_| Ok(raw.clone()));
        let mut client = client(transport);

        assert_eq!(client.get_ticket_number(7).as_deref(), Some(expected));
    }

    #[test]
    fn get_id_reads_scalar_response() {
        let mut transport = MockDispatchTransport::new();
        transport
            .expect_dispatch()
            .withf(|envelope| {
                envelope.action() == "TicketIDLookup"
                    && envelope.fields().get("TicketNumber")
                        == Some(&WireValue::from("2026080710000042"))
            })
            .times(1)
            .returning(|_| Ok(RawResult::Scalar(WireValue::Int(7))));
        let mut client = client(transport);

        assert_eq!(client.get_id("2026080710000042"), Some(7));
    }

    #[test]
    fn get_ticket_decodes_flat_response() {
        let mut transport = MockDispatchTransport::new();
        transport
            .expect_dispatch()
            .withf(|envelope| {
                envelope.action() == "TicketGet"
                    && envelope.fields().get("Extended") == Some(&WireValue::Int(1))
            })
            .times(1)
            .returning(|_| {
                Ok(RawResult::Flat(vec![
                    WireValue::from("TicketID"),
                    WireValue::from(7),
                    WireValue::from("State"),
                    WireValue::from("open"),
                ]))
            });
        let mut client = client(transport);

        let ticket = client.get_ticket(7, true).expect("ticket should decode");
        assert_eq!(ticket.get("State"), Some(&WireValue::from("open")));
    }

    #[rstest]
    #[case(QueueRef::Id(7), "QueueID")]
    #[case(QueueRef::Name("support".to_owned()), "Queue")]
    fn move_ticket_picks_queue_field_by_kind(
        #[case] queue: QueueRef,
        #[case] expected_field: &'static str,
    ) {
        let mut transport = MockDispatchTransport::new();
        transport
            .expect_dispatch()
            .withf(move |envelope| {
                envelope.action() == "TicketQueueSet"
                    && envelope.fields().contains(expected_field)
            })
            .times(1)
            .returning(|_| Ok(RawResult::Scalar(WireValue::Int(1))));
        let mut client = client(transport);

        assert!(client.move_ticket(7, queue));
    }

    #[test]
    fn transport_failure_converts_to_sentinel() {
        let mut transport = MockDispatchTransport::new();
        transport.expect_dispatch().times(1).returning(|_| {
            Err(TransportError::Connection {
                endpoint: "http://tickets.example.net/rpc".to_owned(),
                source: io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
            })
        });
        let mut client = client(transport);

        assert_eq!(client.get_id("2026080710000042"), None);
    }

    #[test]
    fn outgoing_subject_returns_backend_text() {
        let mut transport = MockDispatchTransport::new();
        transport
            .expect_dispatch()
            .withf(|envelope| {
                envelope.action() == "TicketSubjectBuild"
                    && envelope.fields().get("Subject") == Some(&WireValue::from("Re: Help"))
            })
            .times(1)
            .returning(|_| {
                Ok(RawResult::Scalar(WireValue::from(
                    "[Ticket#2026080710000042] Re: Help",
                )))
            });
        let mut client = client(transport);

        let fields = FieldMap::new().with("Subject", "Re: Help");
        assert_eq!(
            client
                .outgoing_subject("2026080710000042", &fields)
                .as_deref(),
            Some("[Ticket#2026080710000042] Re: Help")
        );
    }

    #[test]
    fn missing_attachment_file_logs_and_skips_dispatch() {
        let mut transport = MockDispatchTransport::new();
        transport.expect_dispatch().never();
        let mut client = client(transport);

        let result = client.attach_file_to_article(
            5,
            Utf8Path::new("/nonexistent/attachment.bin"),
            "attachment.bin",
            "application/octet-stream",
        );
        assert_eq!(result, None);
        assert!(
            client
                .log()
                .iter()
                .any(|entry| entry.contains("attachment.bin"))
        );
    }

    #[rstest]
    #[case(WireValue::Int(123), Some("123"))]
    #[case(WireValue::from("123"), Some("123"))]
    #[case(WireValue::from(" 123.0 "), Some("123"))]
    #[case(WireValue::from("123.6"), Some("124"))]
    #[case(WireValue::from("not a number"), None)]
    #[case(WireValue::Bool(true), None)]
    fn ticket_number_formatting(#[case] value: WireValue, #[case] expected: Option<&str>) {
        assert_eq!(format_ticket_number(&value).as_deref(), expected);
    }
}
