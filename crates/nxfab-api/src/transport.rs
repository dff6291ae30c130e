// Shared transport configuration for building reqwest::Client instances.
//
// Both the JSON-RPC config path and the ins_api show path share the
// timeout and credentials through this struct, avoiding duplicated
// builder logic. The NX-API endpoint in scope is plain HTTP with
// basic auth, so there is no TLS surface here.

use std::time::Duration;

use secrecy::SecretString;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout. The management plane on a busy switch can
    /// take several seconds to apply a long batch.
    pub timeout: Duration,
    /// Basic-auth username for every device in the run.
    pub username: String,
    /// Basic-auth password for every device in the run.
    pub password: SecretString,
}

impl TransportConfig {
    /// Create a config with the default 30s timeout.
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            timeout: Duration::from_secs(30),
            username: username.into(),
            password,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("nxfab/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(crate::error::Error::Transport)
    }
}
