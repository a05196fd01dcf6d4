//! Fixed-value token provider.

use anyhow::Result;

use crate::application::ports::TokenProvider;
use crate::domain::TokenError;

/// Returns the same `Authorization` value on every call.
#[derive(Debug, Clone)]
pub struct StaticToken {
    header: String,
}

impl StaticToken {
    /// Wrap a complete header value such as `"bearer eyJ..."`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::EmptyToken`] for a blank value.
    pub fn new(header: &str) -> Result<Self, TokenError> {
        let header = header.trim();
        if header.is_empty() {
            return Err(TokenError::EmptyToken);
        }
        Ok(Self {
            header: header.to_string(),
        })
    }

    /// Wrap a raw access token, prefixing it with `bearer `.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::EmptyToken`] for a blank value.
    pub fn bearer(access_token: &str) -> Result<Self, TokenError> {
        let access_token = access_token.trim();
        if access_token.is_empty() {
            return Err(TokenError::EmptyToken);
        }
        Self::new(&format!("bearer {access_token}"))
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Result<String> {
        Ok(self.header.clone())
    }
}
