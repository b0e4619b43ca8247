//! Environment variable overrides for configuration.
//!
//! Supports overriding config values with environment variables:
//! - `WINONA_DISCORD_TOKEN` - Discord bot token
//! - `WINONA_ADMIN_CHANNEL_ID` - Fallback admin channel
//! - `WINONA_DB_FILE` - SQLite database path
//! - `WINONA_SHEET_URL` - Public draft sheet URL

use std::env;

use tracing::warn;

use crate::config::types::Config;

/// Environment variable prefix for all config overrides.
const ENV_PREFIX: &str = "WINONA";

/// Apply environment variable overrides to a config.
///
/// This allows the bot token to be provided via the environment instead
/// of the config file.
pub fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(token) = env::var(format!("{}_DISCORD_TOKEN", ENV_PREFIX)) {
        config.discord.token = token;
    }

    if let Ok(channel) = env::var(format!("{}_ADMIN_CHANNEL_ID", ENV_PREFIX)) {
        match channel.parse() {
            Ok(id) => config.discord.admin_channel_id = Some(id),
            Err(_) => warn!("Ignoring non-numeric {}_ADMIN_CHANNEL_ID '{}'", ENV_PREFIX, channel),
        }
    }

    if let Ok(path) = env::var(format!("{}_DB_FILE", ENV_PREFIX)) {
        config.database.path = path;
    }

    if let Ok(url) = env::var(format!("{}_SHEET_URL", ENV_PREFIX)) {
        config.sheet.draft_url = Some(url);
    }

    config
}

/// Get the config file path from environment or use default.
///
/// Checks `WINONA_CONFIG` environment variable, otherwise returns "winona.conf".
pub fn get_config_path() -> String {
    env::var(format!("{}_CONFIG", ENV_PREFIX)).unwrap_or_else(|_| "winona.conf".to_string())
}
