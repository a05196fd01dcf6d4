//! Application service — the name-addressed client facade.
//!
//! Every operation resolves the application name through the injected
//! [`AppGuidCache`] and fetches a token per attempt, so a retried call never
//! reuses a guid or token that just failed.

use std::sync::Arc;

use anyhow::Result;

use crate::application::ports::{AppGuidCache, Capi, TokenProvider};
use crate::application::services::guid_cache::GuidCache;
use crate::domain::{DEFAULT_PROCESS_TYPE, HeaderOption, Process, Task, TaskConfig};

/// Composes a token provider, a CAPI client and a guid cache.
///
/// Errors from any of the three are returned unchanged.
pub struct Client<O, C, G> {
    pub oauth: O,
    pub capi: C,
    pub app_guid_cache: G,
}

impl<O, C> Client<Arc<O>, Arc<C>, GuidCache<Arc<C>, Arc<O>>>
where
    O: TokenProvider,
    C: Capi,
{
    /// Build a client whose guid cache shares `oauth` and `capi`.
    pub fn with_guid_cache(oauth: O, capi: C) -> Self {
        let oauth = Arc::new(oauth);
        let capi = Arc::new(capi);
        let cache = GuidCache::new(Arc::clone(&capi), Arc::clone(&oauth));
        Self::new(oauth, capi, cache)
    }
}

impl<O, C, G> Client<O, C, G>
where
    O: TokenProvider,
    C: Capi,
    G: AppGuidCache,
{
    pub fn new(oauth: O, capi: C, app_guid_cache: G) -> Self {
        Self {
            oauth,
            capi,
            app_guid_cache,
        }
    }

    /// Set the instance count of the app's `web` process.
    ///
    /// # Errors
    ///
    /// Returns an error if the app cannot be resolved, no token is available,
    /// or the scale request fails.
    pub fn scale(&self, app_name: &str, instances: u32) -> Result<()> {
        self.app_guid_cache.try_with_refresh(app_name, |guid| {
            let token = self.oauth.token()?;
            self.capi.scale(&token, guid, DEFAULT_PROCESS_TYPE, instances)
        })
    }

    /// Fetch the app's process of the given type.
    ///
    /// # Errors
    ///
    /// Returns an error if the app cannot be resolved, no token is available,
    /// or the process request fails.
    pub fn process(&self, app_name: &str, process_type: &str) -> Result<Process> {
        self.app_guid_cache.try_with_refresh(app_name, |guid| {
            let token = self.oauth.token()?;
            self.capi.process(&token, guid, process_type)
        })
    }

    /// Run `command` as a one-off task of the app.
    ///
    /// An unnamed task is named after its command. `opts` are handed to the
    /// CAPI client, which applies them to the request headers.
    ///
    /// # Errors
    ///
    /// Returns an error if the app cannot be resolved, no token is available,
    /// or the task cannot be created.
    pub fn create_task(
        &self,
        app_name: &str,
        command: &str,
        cfg: TaskConfig,
        opts: &[HeaderOption],
    ) -> Result<Task> {
        let cfg = cfg.named_for(command);
        self.app_guid_cache.try_with_refresh(app_name, |guid| {
            let token = self.oauth.token()?;
            self.capi.create_task(&token, guid, command, &cfg, opts)
        })
    }

    /// Stop the app.
    ///
    /// # Errors
    ///
    /// Returns an error if the app cannot be resolved, no token is available,
    /// or the stop request fails.
    pub fn stop(&self, app_name: &str) -> Result<()> {
        self.app_guid_cache.try_with_refresh(app_name, |guid| {
            let token = self.oauth.token()?;
            self.capi.stop(&token, guid)
        })
    }
}
