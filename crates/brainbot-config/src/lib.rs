//! BrainBot client configuration.
//!
//! TOML-based configuration with full validation. All config sections use
//! sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use brainbot_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{BrainbotConfig, UnauthorizedPolicy, CONFIG_SCHEMA_VERSION};
pub use toml_loader::{app_dir, default_config_path};

use brainbot_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path.
///
/// Creates a default `config.toml` if none exists, then validates the result.
pub fn load_config() -> Result<BrainbotConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path, or the platform default when `None`.
pub fn load_config_from(path: Option<&Path>) -> Result<BrainbotConfig, ConfigError> {
    match path {
        Some(path) if !path.exists() => Err(ConfigError::FileNotFound(path.to_path_buf())),
        Some(path) => {
            let config = toml_loader::load_from_path(path)?;
            validation::validate(&config)?;
            Ok(config)
        }
        None => load_config(),
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &BrainbotConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
