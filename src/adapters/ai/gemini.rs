//! Gemini adapter - all three AI collaborator ports over the Gemini REST API.
//!
//! Generation, refinement and Q&A share one text-in/text-out call shape, so
//! a single adapter implements every port. Requests walk a fallback list of
//! models: quota exhaustion (HTTP 429) moves to the next model immediately,
//! other transient failures retry the same model with exponential backoff.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_models(vec!["gemini-2.5-flash".into()])
//!     .with_max_retries(2);
//!
//! let service = GeminiService::new(config);
//! ```

use crate::adapters::ai::{prompts, scoring};
use crate::config::{AiConfig as AiSettings, ValidationError as ConfigValidationError};
use crate::domain::foundation::PolicyId;
use crate::ports::{
    AiError, GeneratedPolicy, GenerationRequest, PolicyGenerator, QaService, RevisionService,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

/// Configuration for the Gemini adapter.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Models to try in order, cheapest first.
    pub models: Vec<String>,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Retries per model on transient failures.
    pub max_retries: u32,
}

impl GeminiConfig {
    /// Creates a configuration with the default model fallback list.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            models: default_models(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
        }
    }

    /// Replaces the model fallback list.
    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.models = models;
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the per-model retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Builds an adapter configuration from loaded application settings.
    ///
    /// # Errors
    ///
    /// - `MissingRequired` if no API key is configured
    pub fn from_settings(settings: &AiSettings) -> Result<Self, ConfigValidationError> {
        let key = settings
            .gemini_api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ConfigValidationError::MissingRequired("GEMINI_API_KEY"))?;

        Ok(Self::new(key)
            .with_models(settings.models.clone())
            .with_timeout(settings.timeout())
            .with_max_retries(settings.max_retries))
    }
}

/// Default model fallback list, cheapest first.
pub fn default_models() -> Vec<String> {
    vec![
        "gemini-2.5-flash".to_string(),
        "gemini-2.0-flash".to_string(),
        "gemini-flash-latest".to_string(),
    ]
}

/// Base wait before the first retry; doubles per attempt.
const BACKOFF_BASE: Duration = Duration::from_secs(1);

/// One transport-level generation attempt against a specific model.
///
/// Separated from the fallback walk so the retry discipline can be
/// exercised without a network.
#[async_trait]
trait GenerateAttempt: Send + Sync {
    async fn attempt(&self, model: &str, prompt: &str) -> Result<String, AiError>;
}

/// Walks the model fallback list, retrying transient failures per model.
///
/// Quota exhaustion (HTTP 429) skips the remaining retries and moves to the
/// next model immediately; other retryable errors back off exponentially on
/// the same model; non-retryable errors abort the walk.
struct Fallback<'a> {
    models: &'a [String],
    max_retries: u32,
    backoff: Duration,
}

impl Fallback<'_> {
    async fn run(
        &self,
        transport: &dyn GenerateAttempt,
        prompt: &str,
    ) -> Result<String, AiError> {
        let mut last_error = AiError::unavailable("no models configured");

        for model in self.models {
            match self.run_model(transport, model, prompt).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_quota() => {
                    tracing::warn!(model = %model, "quota exhausted, trying next model");
                    last_error = err;
                }
                Err(err) if err.is_retryable() => {
                    tracing::warn!(model = %model, error = %err, "model failed, trying next");
                    last_error = err;
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_error)
    }

    async fn run_model(
        &self,
        transport: &dyn GenerateAttempt,
        model: &str,
        prompt: &str,
    ) -> Result<String, AiError> {
        let mut last_error = AiError::unavailable("no attempts made");

        for attempt in 0..self.max_retries.max(1) {
            match transport.attempt(model, prompt).await {
                Ok(text) => return Ok(text),
                // Quota errors skip straight to the next model.
                Err(err) if err.is_quota() => return Err(err),
                Err(err) if err.is_retryable() => {
                    if attempt + 1 < self.max_retries {
                        let wait = self.backoff * (1 << attempt);
                        tracing::debug!(
                            model = %model,
                            attempt = attempt + 1,
                            wait_ms = wait.as_millis() as u64,
                            "transient failure, backing off"
                        );
                        sleep(wait).await;
                    }
                    last_error = err;
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_error)
    }
}

/// Gemini REST implementation of the AI collaborator ports.
pub struct GeminiService {
    config: GeminiConfig,
    client: Client,
}

impl GeminiService {
    /// Creates a service with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url,
            model,
            self.config.api_key()
        )
    }

    /// Sends one prompt through the model fallback list.
    async fn generate_text(&self, prompt: &str) -> Result<String, AiError> {
        Fallback {
            models: &self.config.models,
            max_retries: self.config.max_retries,
            backoff: BACKOFF_BASE,
        }
        .run(self, prompt)
        .await
    }

    async fn generate_once(&self, model: &str, prompt: &str) -> Result<String, AiError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.generate_url(model))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    AiError::network(format!("Connection failed: {}", e))
                } else {
                    AiError::network(e.to_string())
                }
            })?;

        let response = Self::handle_response_status(response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| AiError::network(e.to_string()))?;
        Self::parse_response_text(&body)
    }

    /// Maps an error status to the shared AI error taxonomy.
    async fn handle_response_status(response: Response) -> Result<Response, AiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u32>().ok());
        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AiError::AuthenticationFailed),
            429 => Err(AiError::rate_limited(retry_after.unwrap_or(30))),
            400 => Err(AiError::InvalidRequest(error_body)),
            500..=599 => Err(AiError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AiError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Extracts the first candidate's text from a response body.
    fn parse_response_text(body: &str) -> Result<String, AiError> {
        let parsed: GenerateContentResponse = serde_json::from_str(body)
            .map_err(|e| AiError::parse(format!("invalid response body: {}", e)))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AiError::parse("response contained no text"));
        }
        Ok(text)
    }
}

#[async_trait]
impl GenerateAttempt for GeminiService {
    async fn attempt(&self, model: &str, prompt: &str) -> Result<String, AiError> {
        self.generate_once(model, prompt).await
    }
}

#[async_trait]
impl PolicyGenerator for GeminiService {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedPolicy, AiError> {
        let risk_assessment = scoring::assess_risk(&request.client_profile);
        let pricing = scoring::price(
            &risk_assessment.score,
            request.insurance_details.coverage_amount,
            &request.insurance_details.kind,
        );

        let prompt = prompts::generation_prompt(request, &risk_assessment, &pricing)?;
        let policy_text = self.generate_text(&prompt).await?;

        Ok(GeneratedPolicy {
            policy_id: PolicyId::generate(),
            policy_text,
            risk_assessment,
            pricing,
        })
    }
}

#[async_trait]
impl RevisionService for GeminiService {
    async fn revise(&self, current_text: &str, instruction: &str) -> Result<String, AiError> {
        let prompt = prompts::refinement_prompt(current_text, instruction);
        self.generate_text(&prompt).await
    }
}

#[async_trait]
impl QaService for GeminiService {
    async fn answer(&self, question: &str, document_context: &str) -> Result<String, AiError> {
        let prompt = prompts::qa_prompt(question, document_context);
        self.generate_text(&prompt).await
    }
}

// Gemini wire format.

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}
