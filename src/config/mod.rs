//! Configuration parsing and types.

pub mod env;
pub mod parser;
pub mod types;
pub mod validate;

pub use parser::load_or_default;
pub use types::*;
pub use validate::{validate_bot_config, validate_config};

use crate::common::error::ConfigError;

/// Load the configuration file (if any) and apply environment overrides.
pub fn load(path: &str) -> Result<Config, ConfigError> {
    let config = load_or_default(path)?;
    Ok(env::apply_env_overrides(config))
}
