//! Policy session - owns one document's lifecycle.
//!
//! A session is created from a generated policy or an ingested upload and
//! lives for the interactive session; nothing is persisted. It publishes
//! immutable document snapshots to readers and serializes refinements so
//! two instructions can never both derive from the same stale revision.

use crate::application::Assistant;
use crate::domain::foundation::{DomainError, PolicyId};
use crate::domain::policy::PolicyDocument;
use crate::domain::rendering::{paginate, to_display, to_plain, Page, PageGeometry, StructuredText};
use crate::ports::{
    AiError, GeneratedPolicy, GenerationRequest, PolicyGenerator, QaService, RevisionService,
    SpeechError, SpeechOutput,
};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors from creating a session through the generation collaborator.
#[derive(Debug, Error)]
pub enum DraftError {
    /// Generation collaborator failed; nothing was created.
    #[error("generation failed: {0}")]
    Generation(#[from] AiError),

    /// Collaborator returned an unusable policy (e.g. empty text).
    #[error("generated policy rejected: {0}")]
    Domain(#[from] DomainError),
}

/// Errors from refining a session's document.
#[derive(Debug, Error)]
pub enum RefineError {
    /// Rejected synchronously, before any collaborator call.
    #[error("refinement instruction cannot be empty")]
    EmptyInstruction,

    /// Revision collaborator failed; the document is unchanged and the
    /// caller may retry.
    #[error("revision service failed: {0}")]
    Service(#[from] AiError),

    /// The revised text was unusable; the document is unchanged.
    #[error("revision rejected: {0}")]
    Domain(#[from] DomainError),
}

/// Stateful owner of one policy document.
pub struct PolicySession {
    /// Published snapshot. Readers clone the `Arc` under a short read lock,
    /// so they atomically see either the pre- or post-refinement document.
    document: RwLock<Arc<PolicyDocument>>,
    /// Serializes refinements on this document. Held across the
    /// collaborator call so a queued refinement always revises the text its
    /// predecessor produced.
    refine_gate: Mutex<()>,
    revision_service: Arc<dyn RevisionService>,
}

impl PolicySession {
    /// Wraps an already-constructed document.
    pub fn from_document(
        document: PolicyDocument,
        revision_service: Arc<dyn RevisionService>,
    ) -> Self {
        Self {
            document: RwLock::new(Arc::new(document)),
            refine_gate: Mutex::new(()),
            revision_service,
        }
    }

    /// Creates a session from a generation collaborator result.
    pub fn from_generated(
        generated: GeneratedPolicy,
        revision_service: Arc<dyn RevisionService>,
    ) -> Result<Self, DomainError> {
        let document = PolicyDocument::new(
            generated.policy_id,
            generated.policy_text,
            generated.risk_assessment,
            generated.pricing,
        )?;
        Ok(Self::from_document(document, revision_service))
    }

    /// Generates a new policy through the collaborator and opens a session
    /// for it.
    pub async fn generate(
        generator: &dyn PolicyGenerator,
        request: &GenerationRequest,
        revision_service: Arc<dyn RevisionService>,
    ) -> Result<Self, DraftError> {
        let generated = generator.generate(request).await?;
        tracing::info!(policy_id = %generated.policy_id, "policy generated");
        Ok(Self::from_generated(generated, revision_service)?)
    }

    // === Reads ===

    /// Atomic snapshot of the current document.
    pub fn snapshot(&self) -> Arc<PolicyDocument> {
        self.document.read().expect("document lock poisoned").clone()
    }

    pub fn id(&self) -> PolicyId {
        self.snapshot().id().clone()
    }

    /// Canonical markup text of the current revision.
    pub fn current_text(&self) -> String {
        self.snapshot().current_text().to_string()
    }

    /// Structured view for interactive presentation.
    pub fn display_view(&self) -> StructuredText {
        to_display(self.snapshot().current_text())
    }

    /// De-markuped prose for speech and plain export.
    pub fn plain_view(&self) -> String {
        to_plain(self.snapshot().current_text())
    }

    /// Print-style page layout of the plain view.
    pub fn paginated_view(&self, geometry: PageGeometry) -> Vec<Page> {
        paginate(&self.plain_view(), geometry)
    }

    // === Mutation ===

    /// Applies one refinement instruction to the latest text.
    ///
    /// Refinements on the same session are strictly serialized: a call
    /// issued while another is in flight waits, then revises the text that
    /// call produced. On collaborator failure the published document is
    /// unchanged and the caller may retry. Dropping the returned future
    /// before completion also leaves the document unchanged.
    pub async fn refine(&self, instruction: &str) -> Result<Arc<PolicyDocument>, RefineError> {
        if instruction.trim().is_empty() {
            return Err(RefineError::EmptyInstruction);
        }

        let _gate = self.refine_gate.lock().await;
        let snapshot = self.snapshot();

        let updated = self
            .revision_service
            .revise(snapshot.current_text(), instruction)
            .await
            .map_err(|err| {
                tracing::warn!(policy_id = %snapshot.id(), error = %err, "refinement failed");
                err
            })?;

        let next = Arc::new(snapshot.append_revision(updated, instruction)?);
        *self.document.write().expect("document lock poisoned") = next.clone();
        tracing::info!(
            policy_id = %next.id(),
            revision = next.current_index(),
            "refinement applied"
        );
        Ok(next)
    }

    // === Derived sessions and outputs ===

    /// Opens a query session grounded in the document text as of now.
    ///
    /// The context is frozen at open: refinements completing later do not
    /// re-ground an already-open assistant.
    pub fn open_assistant(&self, qa: Arc<dyn QaService>) -> Assistant {
        Assistant::open(self.current_text(), qa)
    }

    /// Narrates the plain view through a speech collaborator.
    pub async fn narrate(&self, speech: &dyn SpeechOutput) -> Result<(), SpeechError> {
        speech.play(&self.plain_view()).await
    }
}
