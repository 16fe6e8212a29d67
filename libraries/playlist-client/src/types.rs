//! Configuration types for the playlist client.

use std::fmt;
use std::time::Duration;

/// Base address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Basic-auth credential pair sent with every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new("admin", "password")
    }
}

// Keep the password out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Configuration for connecting to the collection service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the service (e.g., "http://localhost:8080")
    pub url: String,
    pub credentials: Credentials,
    /// Per-request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a config with the default credentials.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            credentials: Credentials::default(),
            timeout: None,
        }
    }

    /// Replace the credential pair.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Credentials::new(username, password);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
