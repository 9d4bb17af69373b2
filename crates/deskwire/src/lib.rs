//! deskwire — a marshalling client for a legacy positional-RPC ticketing
//! backend.
//!
//! The backend exposes one remote method, Dispatch, and selects the actual
//! operation from the first two positional arguments. This crate owns the
//! translation between that convention and a structured API: named field
//! maps, per-operation defaults with a caller-override allow-list,
//! required-field validation before anything touches the network, and
//! best-effort reshaping of the backend's flat responses.
//!
//! The transport connection itself stays outside the crate behind
//! [`DispatchTransport`]; connection parameters come from the
//! `deskwire-config` crate.

pub mod client;
pub mod files;
pub mod ops;
pub mod transport;
pub mod wire;

pub use client::{DEFAULT_USER_ID, DiagnosticLog, TicketClient};
pub use files::{FileSource, SystemFileSource};
pub use ops::{ArticleKind, OperationSpec, QueueRef, Requirement, ValidationReport};
pub use transport::{DispatchTransport, TransportError};
pub use wire::{DecodedResult, FieldMap, RawResult, RequestEnvelope, WireValue, decode};
