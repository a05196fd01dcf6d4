//! Infrastructure layer — concrete implementations of application port traits.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! The CAPI port has no implementation here; callers bring their own client.

pub mod config;
pub mod static_token;
pub mod uaa;

pub use config::{ENV_PREFIX, load_uaa_config, uaa_config_from_iter};
pub use static_token::StaticToken;
pub use uaa::UaaTokenProvider;
