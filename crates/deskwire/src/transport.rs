//! Transport port for the backend's Dispatch method.
//!
//! The adapter never opens connections itself. Implementations of
//! [`DispatchTransport`] own the RPC client, prepend the configured
//! credentials to the positional call, and surface transport-level failures
//! through [`TransportError`]. The facade converts those failures to its
//! sentinel returns at one choke point; nothing retries.

use std::io;

use thiserror::Error;

use crate::wire::{RawResult, RequestEnvelope};

/// A live connection to the backend's single Dispatch entry point.
#[cfg_attr(test, mockall::automock)]
pub trait DispatchTransport {
    /// Sends one positional Dispatch call and returns the raw result.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] on connection, authentication, or
    /// protocol failure. Implementations must not partially apply a call.
    fn dispatch(&mut self, envelope: &RequestEnvelope) -> Result<RawResult, TransportError>;
}

/// Failures raised by transport implementations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The backend endpoint could not be reached.
    #[error("failed to reach backend at {endpoint}: {source}")]
    Connection {
        /// Endpoint the connection was attempted against.
        endpoint: String,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },
    /// The backend rejected the configured credentials.
    #[error("backend rejected credentials for '{username}'")]
    Authentication {
        /// Login name the backend rejected.
        username: String,
    },
    /// The backend answered outside the Dispatch protocol.
    #[error("backend protocol fault: {message}")]
    Protocol {
        /// Fault description reported by the RPC layer.
        message: String,
    },
}
