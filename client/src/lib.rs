//! Name-addressed client facade over the Cloud Foundry v3 API (CAPI).
//!
//! Callers address applications by name; the facade resolves names to guids
//! through an [`AppGuidCache`](application::ports::AppGuidCache) that retries
//! a failed call once with a freshly looked-up guid.

#![cfg_attr(test, allow(clippy::expect_used))]

pub mod application;
pub mod domain;
pub mod infra;

pub use application::ports::{AppGuidCache, Capi, TokenProvider};
pub use application::services::client::Client;
pub use application::services::guid_cache::GuidCache;
