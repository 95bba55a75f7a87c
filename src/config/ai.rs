//! AI collaborator configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Gemini API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// Models to try in order, cheapest first
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries per model on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a usable API key is present
    pub fn has_api_key(&self) -> bool {
        self.gemini_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("GEMINI_API_KEY"));
        }
        if self.models.is_empty() {
            return Err(ValidationError::NoModelsConfigured);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            models: default_models(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_models() -> Vec<String> {
    vec![
        "gemini-2.5-flash".to_string(),
        "gemini-2.0-flash".to_string(),
        "gemini-flash-latest".to_string(),
    ]
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    3
}
