use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Location of the backend's RPC listener.
///
/// The backend exposes a single HTTP endpoint through which every Dispatch
/// call travels. Only `http` and `https` schemes are accepted so a
/// misconfigured socket or file URL fails at load time rather than at the
/// first dispatch.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceEndpoint {
    url: Url,
}

impl ServiceEndpoint {
    /// Builds an endpoint from an already-validated URL.
    ///
    /// # Errors
    ///
    /// Returns `EndpointParseError::UnsupportedScheme` when the URL does not
    /// use `http` or `https`, and `EndpointParseError::MissingHost` when the
    /// URL carries no host name.
    pub fn from_url(url: Url) -> Result<Self, EndpointParseError> {
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(EndpointParseError::UnsupportedScheme(other.to_owned())),
        }
        if url.host_str().is_none() {
            return Err(EndpointParseError::MissingHost(url.to_string()));
        }
        Ok(Self { url })
    }

    /// Returns the underlying URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the host name the endpoint targets.
    #[must_use]
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }
}

impl fmt::Display for ServiceEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.url)
    }
}

impl FromStr for ServiceEndpoint {
    type Err = EndpointParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let url = Url::parse(input)?;
        Self::from_url(url)
    }
}

impl TryFrom<String> for ServiceEndpoint {
    type Error = EndpointParseError;

    fn try_from(input: String) -> Result<Self, Self::Error> {
        input.parse()
    }
}

impl From<ServiceEndpoint> for String {
    fn from(endpoint: ServiceEndpoint) -> Self {
        endpoint.url.into()
    }
}

/// Errors encountered while parsing a [`ServiceEndpoint`] from text.
#[derive(Debug, Error)]
pub enum EndpointParseError {
    /// Scheme was not recognised as an RPC transport.
    #[error("unsupported endpoint scheme '{0}'")]
    UnsupportedScheme(String),
    /// Endpoint URL carried no host.
    #[error("missing host in endpoint '{0}'")]
    MissingHost(String),
    /// URL failed to parse.
    #[error(transparent)]
    Url(#[from] url::ParseError),
}
