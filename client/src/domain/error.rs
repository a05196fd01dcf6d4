//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator. They remain reachable with `anyhow::Error::downcast_ref`.

use thiserror::Error;

// ── Lookup errors ─────────────────────────────────────────────────────────────

/// Errors raised while resolving an application name to its guid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("no application named '{name}'")]
    AppNotFound { name: String },
}

// ── Token errors ──────────────────────────────────────────────────────────────

/// Errors raised by token providers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token request rejected: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("malformed token response: {0}")]
    MalformedResponse(String),

    #[error("token must not be empty")]
    EmptyToken,
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to client configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),

    #[error("invalid UAA url '{0}': must start with http:// or https://")]
    InvalidUrl(String),
}
