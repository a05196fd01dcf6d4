//! UAA token provider — OAuth2 client-credentials grant over HTTP.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;

use crate::application::ports::TokenProvider;
use crate::domain::{TokenError, UaaConfig};

/// Fetches client-credentials tokens from UAA and reuses them until shortly
/// before they expire.
pub struct UaaTokenProvider {
    config: UaaConfig,
    agent: ureq::Agent,
    cached: Mutex<Option<CachedToken>>,
}

/// A token together with the instant after which it must be re-fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub header: String,
    pub refresh_at: DateTime<Utc>,
}

impl CachedToken {
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.refresh_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(default)]
    expires_in: i64,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl UaaTokenProvider {
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn new(config: UaaConfig) -> Result<Self> {
        config.validate()?;
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build();
        Ok(Self {
            config,
            agent,
            cached: Mutex::new(None),
        })
    }

    fn fetch(&self) -> Result<CachedToken> {
        let endpoint = self.config.token_endpoint();
        tracing::debug!(endpoint = %endpoint, client_id = %self.config.client_id, "requesting uaa token");

        let response = self
            .agent
            .post(&endpoint)
            .set("Accept", "application/json")
            .send_form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("response_type", "token"),
            ]);

        let body = match response {
            Ok(resp) => resp.into_string().context("reading token response")?,
            Err(ureq::Error::Status(status, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                tracing::warn!(status, endpoint = %endpoint, "uaa rejected token request");
                return Err(TokenError::Rejected { status, body }.into());
            }
            Err(err) => return Err(err).context("requesting uaa token"),
        };

        Ok(parse_token_response(
            &body,
            Utc::now(),
            self.config.token_leeway_secs,
        )?)
    }
}

impl TokenProvider for UaaTokenProvider {
    fn token(&self) -> Result<String> {
        // Held across the fetch so concurrent callers wait for one request.
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Utc::now())) {
            tracing::debug!(refresh_at = %token.refresh_at, "reusing uaa token");
            return Ok(token.header.clone());
        }
        let token = self.fetch()?;
        let header = token.header.clone();
        *cached = Some(token);
        Ok(header)
    }
}

/// Turn a UAA token response body into a [`CachedToken`].
///
/// The token is due for refresh `leeway_secs` before it expires; a response
/// without `expires_in` is due immediately.
///
/// # Errors
///
/// Returns [`TokenError::MalformedResponse`] when the body is not a token
/// response or carries an empty token.
pub fn parse_token_response(
    body: &str,
    now: DateTime<Utc>,
    leeway_secs: u64,
) -> Result<CachedToken, TokenError> {
    let parsed: TokenResponse =
        serde_json::from_str(body).map_err(|e| TokenError::MalformedResponse(e.to_string()))?;
    if parsed.access_token.is_empty() {
        return Err(TokenError::MalformedResponse(
            "empty access_token".to_string(),
        ));
    }

    let leeway = i64::try_from(leeway_secs).unwrap_or(i64::MAX);
    let refresh_at = TimeDelta::try_seconds(parsed.expires_in.saturating_sub(leeway))
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(now);

    Ok(CachedToken {
        header: format!("{} {}", parsed.token_type, parsed.access_token),
        refresh_at,
    })
}
