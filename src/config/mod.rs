//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `POLICYFORGE` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use policyforge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod export;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use export::ExportConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// AI collaborator configuration (Gemini)
    #[serde(default)]
    pub ai: AiConfig,

    /// Export and pagination configuration
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads environment variables with
    /// the `POLICYFORGE` prefix, using `__` to separate nested values:
    ///
    /// - `POLICYFORGE__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key`
    /// - `POLICYFORGE__EXPORT__PAGE_WIDTH_CHARS=120` -> `export.page_width_chars`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("POLICYFORGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.export.validate()?;
        Ok(())
    }
}
