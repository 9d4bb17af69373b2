use crate::endpoint::ServiceEndpoint;

/// Default TCP port the backend's RPC listener is deployed on.
pub const DEFAULT_RPC_PORT: u16 = 9680;

/// Default log filter expression used by hosts embedding the adapter.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Service identifier most backends expose their core API under.
pub const DEFAULT_SERVICE_IDENTIFIER: &str = "Core";

/// Default log filter expression used by hosts embedding the adapter.
#[must_use]
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for hosts embedding the adapter.
#[must_use]
pub fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Json
}

/// Owned service identifier for serde defaults.
#[must_use]
pub fn default_service_identifier() -> String {
    DEFAULT_SERVICE_IDENTIFIER.to_owned()
}

/// Computes the default endpoint: a loopback listener on [`DEFAULT_RPC_PORT`].
///
/// # Panics
///
/// Never panics; the literal is a valid HTTP URL.
#[must_use]
pub fn default_endpoint() -> ServiceEndpoint {
    let literal = format!("http://127.0.0.1:{DEFAULT_RPC_PORT}/rpc");
    literal.parse().expect("loopback endpoint literal is valid")
}
