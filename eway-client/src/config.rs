//! Client credentials and connection settings.

use std::time::Duration;

use eway_types::Environment;
use secrecy::SecretString;
use serde::Deserialize;

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// API key and password used for HTTP Basic authentication.
///
/// Bound to a client for its whole lifetime. The password is never printed.
#[derive(Debug)]
pub struct Credentials {
    pub(crate) api_key: String,
    pub(crate) password: SecretString,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

/// Connection settings for a [`GatewayClient`](crate::GatewayClient).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub environment: Environment,
    /// Replaces the environment's base URL when set
    pub base_url: Option<String>,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            base_url: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: concat!("eway-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            ..Self::default()
        }
    }

    /// Points the client at a different host, e.g. a local test server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Base URL requests go to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
            .trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
