//! CAPI v3 records exchanged with the platform.
//!
//! Field names follow the v3 JSON bodies. Unknown fields are ignored and
//! absent ones fall back to their defaults so partial responses still parse.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Process type targeted by `Client::scale`.
pub const DEFAULT_PROCESS_TYPE: &str = "web";

// ── Records ───────────────────────────────────────────────────────────────────

/// An application as returned by `GET /v3/apps`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct App {
    pub guid: String,
    pub name: String,
}

/// A process belonging to an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Process {
    pub guid: String,
    /// Role of the process, e.g. `web` or `worker`.
    #[serde(rename = "type")]
    pub process_type: String,
    pub instances: u32,
    pub memory_in_mb: u32,
    pub disk_in_mb: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

/// A one-off task created against an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub guid: String,
    pub name: String,
    pub command: String,
    /// `PENDING`, `RUNNING`, `SUCCEEDED`, `CANCELING` or `FAILED`.
    pub state: String,
    pub memory_in_mb: u32,
    pub disk_in_mb: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub droplet_guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_id: Option<u64>,
}

/// Caller-supplied settings for a new task.
///
/// Zero sizes and an empty droplet guid are omitted from the request body so
/// the platform applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    pub name: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub memory_in_mb: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub disk_in_mb: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub droplet_guid: String,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // signature fixed by serde
fn is_zero(v: &u32) -> bool {
    *v == 0
}

impl TaskConfig {
    /// Returns the config with `name` defaulted to `command` when unset.
    #[must_use]
    pub fn named_for(mut self, command: &str) -> Self {
        if self.name.is_empty() {
            self.name = command.to_string();
        }
        self
    }
}

// ── Queries ───────────────────────────────────────────────────────────────────

/// Filter parameters for `GET /v3/apps`, kept sorted for stable query strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppQuery(BTreeMap<String, String>);

impl AppQuery {
    /// Query matching applications with exactly this name.
    #[must_use]
    pub fn by_name(name: &str) -> Self {
        let mut q = Self::default();
        q.insert("names", name);
        q
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// ── Headers ───────────────────────────────────────────────────────────────────

/// Outgoing request headers, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders(Vec<(String, String)>);

impl RequestHeaders {
    /// Sets `name` to `value`, replacing any existing value (case-insensitive).
    pub fn set(&mut self, name: &str, value: &str) {
        if let Some(entry) = self.0.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            entry.1 = value.to_string();
        } else {
            self.0.push((name.to_string(), value.to_string()));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RequestHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, v) in &self.0 {
            writeln!(f, "{k}: {v}")?;
        }
        Ok(())
    }
}

/// Mutates the headers of an outgoing `CreateTask` request.
///
/// Options are applied by the `Capi` implementation, once per attempt.
pub type HeaderOption = Box<dyn Fn(&mut RequestHeaders) + Send + Sync>;
