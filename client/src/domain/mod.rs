//! Domain layer — CAPI records, configuration and typed errors.
//!
//! This module has zero imports from `crate::infra` or `crate::application`,
//! and performs no I/O.

pub mod config;
pub mod error;
pub mod models;

pub use config::UaaConfig;
pub use error::{ConfigError, LookupError, TokenError};
pub use models::{
    App, AppQuery, DEFAULT_PROCESS_TYPE, HeaderOption, Process, RequestHeaders, Task, TaskConfig,
};
