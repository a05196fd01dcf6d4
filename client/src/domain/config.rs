//! Domain types and validators for client configuration.
//!
//! Pure functions only — loading from the environment lives in
//! `crate::infra::config`.

use serde::Deserialize;

use crate::domain::error::ConfigError;

/// Settings for the UAA client-credentials token provider.
#[derive(Debug, Clone, Deserialize)]
pub struct UaaConfig {
    /// Base URL of the UAA server, e.g. `https://uaa.sys.example.com`.
    pub uaa_url: String,

    /// OAuth client id.
    pub client_id: String,

    /// OAuth client secret. May be empty for public clients.
    #[serde(default)]
    pub client_secret: String,

    /// Seconds before expiry at which a cached token is treated as stale.
    #[serde(default = "default_token_leeway_secs")]
    pub token_leeway_secs: u64,

    /// Timeout applied to each token request.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_token_leeway_secs() -> u64 {
    30
}

fn default_http_timeout_secs() -> u64 {
    30
}

impl UaaConfig {
    #[must_use]
    pub fn new(uaa_url: &str, client_id: &str, client_secret: &str) -> Self {
        Self {
            uaa_url: uaa_url.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            token_leeway_secs: default_token_leeway_secs(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }

    /// Checks that the settings can produce a token request.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL or client id is missing or the URL
    /// has no http(s) scheme.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uaa_url.trim().is_empty() {
            return Err(ConfigError::Missing("uaa_url"));
        }
        if self.client_id.trim().is_empty() {
            return Err(ConfigError::Missing("client_id"));
        }
        if !(self.uaa_url.starts_with("https://") || self.uaa_url.starts_with("http://")) {
            return Err(ConfigError::InvalidUrl(self.uaa_url.clone()));
        }
        Ok(())
    }

    /// Full URL of the OAuth token endpoint.
    #[must_use]
    pub fn token_endpoint(&self) -> String {
        format!("{}/oauth/token", self.uaa_url.trim_end_matches('/'))
    }
}
