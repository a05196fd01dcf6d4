//! Application service — name to guid resolution with one refresh on failure.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::Result;

use crate::application::ports::{AppGuidCache, Capi, TokenProvider};
use crate::domain::{AppQuery, LookupError};

/// In-memory [`AppGuidCache`] backed by `GET /v3/apps?names=<name>`.
///
/// Entries live until an action using them fails; they are then replaced by
/// a fresh lookup. The lock is released before any lookup or action runs.
pub struct GuidCache<C, P> {
    capi: C,
    oauth: P,
    guids: Mutex<HashMap<String, String>>,
}

impl<C: Capi, P: TokenProvider> GuidCache<C, P> {
    pub fn new(capi: C, oauth: P) -> Self {
        Self {
            capi,
            oauth,
            guids: Mutex::new(HashMap::new()),
        }
    }

    /// The guid currently held for `app_name`, if any.
    #[must_use]
    pub fn cached(&self, app_name: &str) -> Option<String> {
        self.entries().get(app_name).cloned()
    }

    /// Drop the entry for `app_name`, returning the guid it held.
    pub fn forget(&self, app_name: &str) -> Option<String> {
        self.entries().remove(app_name)
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.guids.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn resolve(&self, app_name: &str) -> Result<String> {
        if let Some(guid) = self.cached(app_name) {
            tracing::debug!(app = app_name, guid = %guid, "app guid cache hit");
            return Ok(guid);
        }
        tracing::debug!(app = app_name, "app guid cache miss");
        self.lookup(app_name)
    }

    fn lookup(&self, app_name: &str) -> Result<String> {
        let token = self.oauth.token()?;
        let apps = self.capi.apps(&token, &AppQuery::by_name(app_name))?;
        // Names are unique per space, not per foundation; take the first match.
        let guid = apps
            .into_iter()
            .next()
            .map(|app| app.guid)
            .ok_or_else(|| LookupError::AppNotFound {
                name: app_name.to_string(),
            })?;
        tracing::debug!(app = app_name, guid = %guid, "resolved app guid");
        self.entries().insert(app_name.to_string(), guid.clone());
        Ok(guid)
    }
}

impl<C: Capi, P: TokenProvider> AppGuidCache for GuidCache<C, P> {
    fn try_with_refresh<T, F>(&self, app_name: &str, mut f: F) -> Result<T>
    where
        F: FnMut(&str) -> Result<T>,
    {
        let guid = self.resolve(app_name)?;
        let err = match f(&guid) {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        tracing::debug!(app = app_name, guid = %guid, error = %err, "action failed, refreshing app guid");
        self.forget(app_name);
        let fresh = self.lookup(app_name)?;
        if fresh != guid {
            tracing::info!(app = app_name, old = %guid, new = %fresh, "app guid changed");
        }
        f(&fresh)
    }
}
