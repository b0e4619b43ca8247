//! Configuration type definitions.

use serde::Deserialize;

/// Default location of the SQLite database.
pub const DEFAULT_DB_FILE: &str = "winona.db";

/// Default command prefix for chat commands.
pub const DEFAULT_PREFIX: &str = "!";

/// Default timeout for fetching the draft sheet.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub discord: DiscordConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub sheet: SheetConfig,
}

/// Discord bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    #[serde(default)]
    pub token: String,
    /// Fallback admin channel when the guild has none stored.
    pub admin_channel_id: Option<u64>,
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            admin_channel_id: None,
            prefix: default_prefix(),
        }
    }
}

/// Database location.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Draft sheet source.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetConfig {
    /// Public Google Sheets URL of the draft sheet.
    pub draft_url: Option<String>,
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            draft_url: None,
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_db_path() -> String {
    DEFAULT_DB_FILE.to_string()
}

fn default_fetch_timeout() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}
