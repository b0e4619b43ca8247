//! Configuration file parsing (HOCON format).

use std::path::Path;

use hocon::HoconLoader;
use tracing::debug;

use crate::common::error::ConfigError;
use crate::config::types::Config;

/// Load configuration from a HOCON file.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();

    HoconLoader::new()
        .load_file(path)
        .map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?
        .resolve()
        .map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
}

/// Load configuration from a HOCON string.
#[allow(dead_code)]
pub fn load_config_str(content: &str) -> Result<Config, ConfigError> {
    HoconLoader::new()
        .load_str(content)
        .map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?
        .resolve()
        .map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
}

/// Load configuration from a file, falling back to defaults when it does not exist.
///
/// The CLI works without a config file; the bot validates afterwards that a
/// token was supplied one way or another.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    load_config(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{DEFAULT_DB_FILE, DEFAULT_FETCH_TIMEOUT_SECS};

    #[test]
    fn test_load_full_config_str() {
        let config = load_config_str(
            r#"
            discord {
                token = "abc"
                admin_channel_id = 1234
                prefix = "?"
            }
            database { path = "league.db" }
            sheet {
                draft_url = "https://docs.google.com/spreadsheets/d/x/edit?gid=0"
                fetch_timeout_secs = 30
            }
            "#,
        )
        .unwrap();

        assert_eq!(config.discord.token, "abc");
        assert_eq!(config.discord.admin_channel_id, Some(1234));
        assert_eq!(config.discord.prefix, "?");
        assert_eq!(config.database.path, "league.db");
        assert_eq!(config.sheet.fetch_timeout_secs, 30);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = load_config_str(r#"discord { token = "abc" }"#).unwrap();

        assert_eq!(config.discord.prefix, "!");
        assert_eq!(config.database.path, DEFAULT_DB_FILE);
        assert_eq!(config.sheet.fetch_timeout_secs, DEFAULT_FETCH_TIMEOUT_SECS);
        assert!(config.sheet.draft_url.is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_or_default(dir.path().join("absent.conf")).unwrap();
        assert!(config.discord.token.is_empty());
        assert_eq!(config.database.path, DEFAULT_DB_FILE);
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("winona.conf");
        std::fs::write(&path, "database { path = \"from_file.db\" }\n").unwrap();

        let config = load_or_default(&path).unwrap();
        assert_eq!(config.database.path, "from_file.db");
    }
}
