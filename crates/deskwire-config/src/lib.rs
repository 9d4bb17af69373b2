//! Connection configuration for the deskwire adapter.
//!
//! Hosts embedding the adapter resolve one [`Config`] per backend: where the
//! RPC listener lives, which service identifier to address, which credentials
//! the transport must present, and how the host should filter and format log
//! output. Values merge from CLI arguments, environment variables prefixed
//! with `DESKWIRE_`, and an optional configuration file, in that order of
//! precedence.

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};

mod credentials;
mod defaults;
mod endpoint;
mod logging;

pub use credentials::Credentials;
pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_RPC_PORT, DEFAULT_SERVICE_IDENTIFIER, default_endpoint,
    default_log_filter, default_log_filter_string, default_log_format,
    default_service_identifier,
};
pub use endpoint::{EndpointParseError, ServiceEndpoint};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved adapter configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, OrthoConfig)]
#[ortho_config(prefix = "DESKWIRE")]
pub struct Config {
    /// Location of the backend's RPC listener.
    #[serde(default = "defaults::default_endpoint")]
    pub endpoint: ServiceEndpoint,
    /// Service identifier the Dispatch calls are addressed to.
    #[serde(default = "defaults::default_service_identifier")]
    pub service_identifier: String,
    /// Login pair the transport presents to the backend.
    #[serde(default)]
    #[ortho_config(skip_cli)]
    pub credentials: Credentials,
    /// Log filter expression applied by the host's subscriber.
    #[serde(default = "defaults::default_log_filter_string")]
    pub log_filter: String,
    /// Log output format applied by the host's subscriber.
    #[serde(default = "defaults::default_log_format")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: defaults::default_endpoint(),
            service_identifier: defaults::default_service_identifier(),
            credentials: Credentials::default(),
            log_filter: defaults::default_log_filter_string(),
            log_format: defaults::default_log_format(),
        }
    }
}

impl Config {
    /// Loads configuration from the process environment and arguments.
    ///
    /// # Errors
    ///
    /// Returns the loader error when any layer fails to parse or merge.
    pub fn load() -> Result<Self, Arc<OrthoError>> {
        <Self as OrthoConfig>::load()
    }

    /// Loads configuration from an explicit argument iterator.
    ///
    /// # Errors
    ///
    /// Returns the loader error when any layer fails to parse or merge.
    pub fn load_from_iter<I>(args: I) -> Result<Self, Arc<OrthoError>>
    where
        I: IntoIterator<Item = OsString>,
    {
        <Self as OrthoConfig>::load_from_iter(args)
    }

    /// Accessor for the backend endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    /// Derives the connection profile handed to transport implementations.
    #[must_use]
    pub fn service_profile(&self) -> ServiceProfile {
        ServiceProfile {
            endpoint: self.endpoint.clone(),
            service_identifier: self.service_identifier.clone(),
            credentials: self.credentials.clone(),
        }
    }
}

/// Connection parameters a transport implementation is constructed from.
///
/// Bundles the endpoint, service identifier, and credentials so the adapter
/// and its transport agree on one backend without re-reading configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceProfile {
    endpoint: ServiceEndpoint,
    service_identifier: String,
    credentials: Credentials,
}

impl ServiceProfile {
    /// Builds a profile from its constituent parts.
    #[must_use]
    pub fn new(
        endpoint: ServiceEndpoint,
        service_identifier: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        Self {
            endpoint,
            service_identifier: service_identifier.into(),
            credentials,
        }
    }

    /// Location of the backend's RPC listener.
    #[must_use]
    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    /// Service identifier the Dispatch calls are addressed to.
    #[must_use]
    pub fn service_identifier(&self) -> &str {
        &self.service_identifier
    }

    /// Login pair the transport presents to the backend.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}
