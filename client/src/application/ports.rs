//! Port trait definitions for the Application layer.
//!
//! Ports are the capabilities the facade consumes. Infrastructure (or a test
//! double) must fulfill them. This file imports only from `crate::domain`.

use std::sync::Arc;

use anyhow::Result;

use crate::domain::{App, AppQuery, HeaderOption, Process, Task, TaskConfig};

// ── Token Port ────────────────────────────────────────────────────────────────

/// Supplies the `Authorization` header value for platform calls.
pub trait TokenProvider {
    /// Return a bearer token, e.g. `"bearer eyJhbGciOi..."`.
    fn token(&self) -> Result<String>;
}

// ── Platform Port ─────────────────────────────────────────────────────────────

/// Remote operations against the Cloud Foundry v3 API.
///
/// Every method receives the token obtained for the current attempt.
pub trait Capi {
    /// List applications matching `query`.
    fn apps(&self, token: &str, query: &AppQuery) -> Result<Vec<App>>;
    /// Fetch the process of `process_type` for an application.
    fn process(&self, token: &str, app_guid: &str, process_type: &str) -> Result<Process>;
    /// Set the instance count of a process.
    fn scale(&self, token: &str, app_guid: &str, process_type: &str, instances: u32)
    -> Result<()>;
    /// Create a one-off task. Implementations apply every option to the
    /// outgoing request headers.
    fn create_task(
        &self,
        token: &str,
        app_guid: &str,
        command: &str,
        cfg: &TaskConfig,
        opts: &[HeaderOption],
    ) -> Result<Task>;
    /// Stop an application.
    fn stop(&self, token: &str, app_guid: &str) -> Result<()>;
}

// ── Guid Resolution Port ──────────────────────────────────────────────────────

/// Resolves application names to guids for the duration of one action.
pub trait AppGuidCache {
    /// Run `f` with the guid of `app_name`.
    ///
    /// When `f` fails the guid is looked up again and `f` runs exactly once
    /// more; its outcome is returned. A name that cannot be resolved fails
    /// without calling `f`.
    ///
    /// # Errors
    ///
    /// Returns the lookup error, or the error from the last call to `f`.
    fn try_with_refresh<T, F>(&self, app_name: &str, f: F) -> Result<T>
    where
        F: FnMut(&str) -> Result<T>;
}

// ── Shared handles ────────────────────────────────────────────────────────────

impl<P: TokenProvider + ?Sized> TokenProvider for Arc<P> {
    fn token(&self) -> Result<String> {
        (**self).token()
    }
}

impl<P: TokenProvider + ?Sized> TokenProvider for &P {
    fn token(&self) -> Result<String> {
        (**self).token()
    }
}

impl<C: Capi + ?Sized> Capi for Arc<C> {
    fn apps(&self, token: &str, query: &AppQuery) -> Result<Vec<App>> {
        (**self).apps(token, query)
    }
    fn process(&self, token: &str, app_guid: &str, process_type: &str) -> Result<Process> {
        (**self).process(token, app_guid, process_type)
    }
    fn scale(
        &self,
        token: &str,
        app_guid: &str,
        process_type: &str,
        instances: u32,
    ) -> Result<()> {
        (**self).scale(token, app_guid, process_type, instances)
    }
    fn create_task(
        &self,
        token: &str,
        app_guid: &str,
        command: &str,
        cfg: &TaskConfig,
        opts: &[HeaderOption],
    ) -> Result<Task> {
        (**self).create_task(token, app_guid, command, cfg, opts)
    }
    fn stop(&self, token: &str, app_guid: &str) -> Result<()> {
        (**self).stop(token, app_guid)
    }
}

impl<C: Capi + ?Sized> Capi for &C {
    fn apps(&self, token: &str, query: &AppQuery) -> Result<Vec<App>> {
        (**self).apps(token, query)
    }
    fn process(&self, token: &str, app_guid: &str, process_type: &str) -> Result<Process> {
        (**self).process(token, app_guid, process_type)
    }
    fn scale(
        &self,
        token: &str,
        app_guid: &str,
        process_type: &str,
        instances: u32,
    ) -> Result<()> {
        (**self).scale(token, app_guid, process_type, instances)
    }
    fn create_task(
        &self,
        token: &str,
        app_guid: &str,
        command: &str,
        cfg: &TaskConfig,
        opts: &[HeaderOption],
    ) -> Result<Task> {
        (**self).create_task(token, app_guid, command, cfg, opts)
    }
    fn stop(&self, token: &str, app_guid: &str) -> Result<()> {
        (**self).stop(token, app_guid)
    }
}

impl<G: AppGuidCache> AppGuidCache for &G {
    fn try_with_refresh<T, F>(&self, app_name: &str, f: F) -> Result<T>
    where
        F: FnMut(&str) -> Result<T>,
    {
        (**self).try_with_refresh(app_name, f)
    }
}
