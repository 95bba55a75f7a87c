//! Mock AI service for testing.
//!
//! One configurable mock that stands in for all three AI collaborator
//! ports, so tests can run the full session lifecycle without a network.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in queue order
//! - Error injection for resilience testing
//! - Simulated delays for concurrency and timeout testing
//! - Per-port call tracking for verification

use crate::domain::foundation::PolicyId;
use crate::domain::policy::{Pricing, RiskAssessment};
use crate::ports::{
    AiError, GeneratedPolicy, GenerationRequest, PolicyGenerator, QaService, RevisionService,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

/// A configured mock response.
#[derive(Debug, Clone)]
enum MockResponse {
    Success(String),
    Error(AiError),
}

/// Mock implementation of every AI collaborator port.
///
/// Cloning shares the response queue and call history, so a test can hold
/// one handle for configuration and assertions while the code under test
/// holds another.
#[derive(Debug, Clone)]
pub struct MockAiService {
    /// Pre-configured responses (consumed in order across all ports).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Recorded `(current_text, instruction)` pairs.
    revise_calls: Arc<Mutex<Vec<(String, String)>>>,
    /// Recorded `(question, context)` pairs.
    answer_calls: Arc<Mutex<Vec<(String, String)>>>,
    /// Recorded generation requests.
    generate_calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl Default for MockAiService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAiService {
    /// Creates a mock with an empty response queue and no delay.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            revise_calls: Arc::new(Mutex::new(Vec::new())),
            answer_calls: Arc::new(Mutex::new(Vec::new())),
            generate_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Success(content.into()));
        self
    }

    /// Queues an arbitrary error.
    pub fn with_error(self, error: AiError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(error));
        self
    }

    /// Queues an `Unavailable` error.
    pub fn with_unavailable(self, message: impl Into<String>) -> Self {
        self.with_error(AiError::unavailable(message))
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Recorded `(current_text, instruction)` pairs from `revise`.
    pub fn revise_calls(&self) -> Vec<(String, String)> {
        self.revise_calls.lock().unwrap().clone()
    }

    /// Recorded `(question, context)` pairs from `answer`.
    pub fn answer_calls(&self) -> Vec<(String, String)> {
        self.answer_calls.lock().unwrap().clone()
    }

    /// Recorded generation requests.
    pub fn generate_calls(&self) -> Vec<GenerationRequest> {
        self.generate_calls.lock().unwrap().clone()
    }

    /// Pops the next configured response or a default.
    async fn next_response(&self) -> Result<String, AiError> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success("Mock response".to_string()));
        match next {
            MockResponse::Success(content) => Ok(content),
            MockResponse::Error(err) => Err(err),
        }
    }
}

#[async_trait]
impl PolicyGenerator for MockAiService {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedPolicy, AiError> {
        self.generate_calls.lock().unwrap().push(request.clone());
        let policy_text = self.next_response().await?;
        Ok(GeneratedPolicy {
            policy_id: PolicyId::generate(),
            policy_text,
            risk_assessment: RiskAssessment::existing_policy_default(),
            pricing: Pricing::existing_policy_default()
                .with_coverage_amount(request.insurance_details.coverage_amount),
        })
    }
}

#[async_trait]
impl RevisionService for MockAiService {
    async fn revise(&self, current_text: &str, instruction: &str) -> Result<String, AiError> {
        self.revise_calls
            .lock()
            .unwrap()
            .push((current_text.to_string(), instruction.to_string()));
        self.next_response().await
    }
}

#[async_trait]
impl QaService for MockAiService {
    async fn answer(&self, question: &str, document_context: &str) -> Result<String, AiError> {
        self.answer_calls
            .lock()
            .unwrap()
            .push((question.to_string(), document_context.to_string()));
        self.next_response().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policy::{ClientProfile, InsuranceDetails};

    fn request() -> GenerationRequest {
        GenerationRequest::new(
            ClientProfile {
                name: "Test Client".into(),
                age: 40,
                income: 55_000.0,
                medical_history: false,
                lifestyle: "standard".into(),
                extra: serde_json::Value::Null,
            },
            InsuranceDetails::new("home", 200_000.0),
        )
    }

    #[tokio::test]
    async fn responses_are_consumed_in_order() {
        let mock = MockAiService::new().with_response("first").with_response("second");

        assert_eq!(mock.revise("t", "i").await.unwrap(), "first");
        assert_eq!(mock.answer("q", "c").await.unwrap(), "second");
    }

    #[tokio::test]
    async fn returns_default_after_queue_exhausted() {
        let mock = MockAiService::new();
        assert_eq!(mock.revise("t", "i").await.unwrap(), "Mock response");
    }

    #[tokio::test]
    async fn queued_errors_surface_on_their_turn() {
        let mock = MockAiService::new()
            .with_response("ok")
            .with_unavailable("down for maintenance");

        assert!(mock.revise("t", "i").await.is_ok());
        let err = mock.revise("t", "i").await.unwrap_err();
        assert!(matches!(err, AiError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn clones_share_queue_and_history() {
        let mock = MockAiService::new().with_response("shared");
        let clone = mock.clone();

        clone.revise("text", "instruction").await.unwrap();

        let calls = mock.revise_calls();
        assert_eq!(calls, vec![("text".to_string(), "instruction".to_string())]);
    }

    #[tokio::test]
    async fn generate_wraps_response_as_policy_text() {
        let mock = MockAiService::new().with_response("## Policy\nBody.");

        let generated = mock.generate(&request()).await.unwrap();

        assert_eq!(generated.policy_text, "## Policy\nBody.");
        assert_eq!(generated.pricing.coverage_amount, 200_000.0);
        assert_eq!(mock.generate_calls().len(), 1);
    }

    #[tokio::test]
    async fn respects_configured_delay() {
        let mock = MockAiService::new()
            .with_response("slow")
            .with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        mock.answer("q", "c").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
