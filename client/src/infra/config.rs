//! Environment configuration loading via `envy`.

use anyhow::{Context, Result};

use crate::domain::UaaConfig;

/// Prefix of every configuration variable, e.g. `CF_AUTOMATOR_UAA_URL`.
pub const ENV_PREFIX: &str = "CF_AUTOMATOR_";

/// Load and validate [`UaaConfig`] from `CF_AUTOMATOR_*` variables.
///
/// Recognised variables:
///   - `CF_AUTOMATOR_UAA_URL`            (required)
///   - `CF_AUTOMATOR_CLIENT_ID`          (required)
///   - `CF_AUTOMATOR_CLIENT_SECRET`      (default empty)
///   - `CF_AUTOMATOR_TOKEN_LEEWAY_SECS`  (default `30`)
///   - `CF_AUTOMATOR_HTTP_TIMEOUT_SECS`  (default `30`)
///
/// # Errors
///
/// Returns an error if a required variable is missing, a number does not
/// parse, or validation fails.
pub fn load_uaa_config() -> Result<UaaConfig> {
    uaa_config_from_iter(std::env::vars())
}

/// Like [`load_uaa_config`] but reads from the given key/value pairs.
///
/// # Errors
///
/// Same as [`load_uaa_config`].
pub fn uaa_config_from_iter<I>(vars: I) -> Result<UaaConfig>
where
    I: IntoIterator<Item = (String, String)>,
{
    let config: UaaConfig = envy::prefixed(ENV_PREFIX).from_iter(vars).with_context(|| {
        format!("failed to load config from {ENV_PREFIX}* env vars ({ENV_PREFIX}UAA_URL and {ENV_PREFIX}CLIENT_ID are required)")
    })?;
    config.validate()?;
    tracing::debug!(
        uaa_url = %config.uaa_url,
        client_id = %config.client_id,
        "uaa configuration loaded",
    );
    Ok(config)
}
