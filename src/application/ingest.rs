//! Policy ingestor - turns an uploaded policy file into a live session.
//!
//! Ingested documents get the same revision history, views, refinement and
//! query surface as generated ones. Because no underwriting ran here, risk
//! and pricing are placeholder payloads; the coverage amount is sniffed
//! from the extracted text on a best-effort basis.

use crate::application::PolicySession;
use crate::domain::foundation::{DomainError, PolicyId};
use crate::domain::policy::{sniff_coverage_amount, PolicyDocument, Pricing, RiskAssessment};
use crate::ports::{ExtractedPolicy, ExtractionError, ExtractionService, PolicyUpload, RevisionService};
use std::sync::Arc;
use thiserror::Error;

/// Errors from ingesting an uploaded policy.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Extraction collaborator rejected or could not decode the upload.
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    /// Extracted text could not form a valid document.
    #[error("ingested document rejected: {0}")]
    Domain(#[from] DomainError),
}

/// Builds sessions from uploaded policy files.
pub struct PolicyIngestor {
    extraction: Arc<dyn ExtractionService>,
    revision: Arc<dyn RevisionService>,
}

impl PolicyIngestor {
    pub fn new(extraction: Arc<dyn ExtractionService>, revision: Arc<dyn RevisionService>) -> Self {
        Self {
            extraction,
            revision,
        }
    }

    /// Extracts the upload and opens a session over the resulting document.
    ///
    /// The extracted text becomes the original revision, exactly as a
    /// generated policy's text would.
    pub async fn ingest(&self, upload: &PolicyUpload) -> Result<PolicySession, IngestError> {
        let extracted = self.extraction.extract(upload).await?;
        tracing::info!(
            filename = %extracted.filename,
            word_count = extracted.word_count,
            "policy upload extracted"
        );

        let document = Self::document_from(&extracted)?;
        Ok(PolicySession::from_document(document, self.revision.clone()))
    }

    fn document_from(extracted: &ExtractedPolicy) -> Result<PolicyDocument, DomainError> {
        let pricing = match sniff_coverage_amount(&extracted.plain_text) {
            Some(amount) => Pricing::existing_policy_default().with_coverage_amount(amount),
            None => Pricing::existing_policy_default(),
        };

        PolicyDocument::new(
            PolicyId::for_upload(),
            extracted.plain_text.clone(),
            RiskAssessment::existing_policy_default(),
            pricing,
        )
    }
}
