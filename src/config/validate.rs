//! Configuration validation.
//!
//! Validates configuration values and provides helpful error messages.

use crate::common::error::ConfigError;
use crate::config::types::Config;

/// Placeholder token shipped in the example config.
const PLACEHOLDER_TOKEN: &str = "YOUR_DISCORD_TOKEN_HERE";

/// Validate the settings shared by every command.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();
    collect_common_errors(config, &mut errors);
    into_result(errors)
}

/// Validate a configuration for running the Discord bot.
pub fn validate_bot_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if config.discord.token.is_empty() {
        errors.push("discord.token is required".to_string());
    }
    if config.discord.token == PLACEHOLDER_TOKEN {
        errors.push("discord.token has not been configured (still using placeholder)".to_string());
    }
    if config.discord.prefix.is_empty() {
        errors.push("discord.prefix must not be empty".to_string());
    }
    if config.discord.admin_channel_id == Some(0) {
        errors.push("discord.admin_channel_id must be non-zero".to_string());
    }
    if config.sheet.draft_url.is_none() {
        errors.push("sheet.draft_url is required to validate draft sheets".to_string());
    }

    collect_common_errors(config, &mut errors);
    into_result(errors)
}

fn collect_common_errors(config: &Config, errors: &mut Vec<String>) {
    if config.database.path.is_empty() {
        errors.push("database.path is required".to_string());
    }

    if let Some(ref url) = config.sheet.draft_url {
        if !url.starts_with("https://") && !url.starts_with("http://") {
            errors.push(format!("sheet.draft_url '{}' is not an http(s) URL", url));
        }
    }

    if config.sheet.fetch_timeout_secs == 0 {
        errors.push("sheet.fetch_timeout_secs must be non-zero".to_string());
    }
}

fn into_result(errors: Vec<String>) -> Result<(), ConfigError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            message: errors.join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_valid_config() -> Config {
        let mut config = Config::default();
        config.discord.token = "valid_token_here".to_string();
        config.discord.admin_channel_id = Some(987654321);
        config.sheet.draft_url =
            Some("https://docs.google.com/spreadsheets/d/abc/edit?gid=0".to_string());
        config
    }

    #[test]
    fn test_valid_config_passes() {
        let config = make_valid_config();
        assert!(validate_bot_config(&config).is_ok());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_token_fails() {
        let mut config = make_valid_config();
        config.discord.token = String::new();

        let result = validate_bot_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("discord.token"));
    }

    #[test]
    fn test_placeholder_token_fails() {
        let mut config = make_valid_config();
        config.discord.token = PLACEHOLDER_TOKEN.to_string();

        let result = validate_bot_config(&config);
        assert!(result.unwrap_err().to_string().contains("placeholder"));
    }

    #[test]
    fn test_cli_does_not_need_token() {
        let mut config = make_valid_config();
        config.discord.token = String::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_non_http_sheet_url_fails() {
        let mut config = make_valid_config();
        config.sheet.draft_url = Some("ftp://example.com/sheet".to_string());

        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("http(s)"));
    }

    #[test]
    fn test_zero_timeout_fails() {
        let mut config = make_valid_config();
        config.sheet.fetch_timeout_secs = 0;

        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("fetch_timeout_secs"));
    }

    #[test]
    fn test_bot_requires_sheet_url() {
        let mut config = make_valid_config();
        config.sheet.draft_url = None;

        let result = validate_bot_config(&config);
        assert!(result.unwrap_err().to_string().contains("sheet.draft_url"));
    }
}
