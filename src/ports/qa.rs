//! Question-answering port - answers one question against document context.

use crate::ports::AiError;
use async_trait::async_trait;

/// Port for the question-answering collaborator.
///
/// Answers are grounded exclusively in the supplied document context; the
/// collaborator is expected to decline questions the context cannot answer.
#[async_trait]
pub trait QaService: Send + Sync {
    /// Answers `question` using `document_context` as the only source.
    async fn answer(&self, question: &str, document_context: &str) -> Result<String, AiError>;
}
