use std::fmt;

use serde::{Deserialize, Serialize};

/// Login pair presented to the backend on every dispatch.
///
/// The transport prepends these to the positional call; the marshalling
/// layer itself never sees them. `Debug` masks the password so credential
/// material cannot leak through log output.
#[derive(Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Credentials {
    /// Backend login name.
    pub username: String,
    /// Backend login password.
    pub password: String,
}

impl Credentials {
    /// Builds a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}
