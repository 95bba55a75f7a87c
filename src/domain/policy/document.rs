//! Policy document entity - canonical text plus append-only revision history.
//!
//! A `PolicyDocument` is an immutable value: mutation happens only through
//! `append_revision`, which returns a new document and leaves every existing
//! reference untouched. Concurrent readers therefore always observe a
//! complete pre- or post-refinement document, never a partial write.

use crate::domain::foundation::{DomainError, PolicyId};
use crate::domain::policy::{Pricing, RiskAssessment};
use serde::{Deserialize, Serialize};

/// How a revision came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevisionOrigin {
    /// Produced by the generation collaborator (or ingestion of an upload).
    Generation,
    /// Produced by applying a refinement instruction to the prior revision.
    Refinement,
}

/// One immutable version of the policy text.
///
/// # Invariants
///
/// - `text` is non-empty (validated at construction)
/// - `sequence` equals the revision's index in the owning document
/// - the first revision has `origin == Generation` and no instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRevision {
    text: String,
    origin: RevisionOrigin,
    instruction: Option<String>,
    sequence: u64,
}

impl DocumentRevision {
    fn new(
        text: String,
        origin: RevisionOrigin,
        instruction: Option<String>,
        sequence: u64,
    ) -> Result<Self, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::invalid_state("Revision text cannot be empty"));
        }
        Ok(Self {
            text,
            origin,
            instruction,
            sequence,
        })
    }

    /// Returns the raw markup text of this revision.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns how this revision was produced.
    pub fn origin(&self) -> RevisionOrigin {
        self.origin
    }

    /// Returns the instruction that produced this revision, if any.
    pub fn instruction(&self) -> Option<&str> {
        self.instruction.as_deref()
    }

    /// Returns the monotonic sequence number of this revision.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Canonical representation of a policy document and its revision history.
///
/// Risk and pricing payloads are attached at creation and immutable for the
/// life of the document; refinement affects text only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDocument {
    id: PolicyId,
    revisions: Vec<DocumentRevision>,
    risk_assessment: RiskAssessment,
    pricing: Pricing,
}

impl PolicyDocument {
    /// Creates a document with its original revision.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if `initial_text` is empty or whitespace-only
    pub fn new(
        id: PolicyId,
        initial_text: impl Into<String>,
        risk_assessment: RiskAssessment,
        pricing: Pricing,
    ) -> Result<Self, DomainError> {
        let first = DocumentRevision::new(initial_text.into(), RevisionOrigin::Generation, None, 0)?;
        Ok(Self {
            id,
            revisions: vec![first],
            risk_assessment,
            pricing,
        })
    }

    /// Returns a new document with one more refinement revision appended.
    ///
    /// Copy-on-write: the receiver is not modified, so callers still holding
    /// the prior document keep seeing its text.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if `new_text` is empty or whitespace-only
    pub fn append_revision(
        &self,
        new_text: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Result<PolicyDocument, DomainError> {
        let sequence = self.revisions.len() as u64;
        let revision = DocumentRevision::new(
            new_text.into(),
            RevisionOrigin::Refinement,
            Some(instruction.into()),
            sequence,
        )?;

        let mut revisions = self.revisions.clone();
        revisions.push(revision);
        Ok(Self {
            id: self.id.clone(),
            revisions,
            risk_assessment: self.risk_assessment.clone(),
            pricing: self.pricing.clone(),
        })
    }

    // === Accessors ===

    pub fn id(&self) -> &PolicyId {
        &self.id
    }

    /// All revisions, oldest first. Index 0 is the original.
    pub fn revisions(&self) -> &[DocumentRevision] {
        &self.revisions
    }

    /// Index of the current revision, always the last one.
    pub fn current_index(&self) -> usize {
        self.revisions.len() - 1
    }

    /// The current (latest) revision.
    pub fn current_revision(&self) -> &DocumentRevision {
        // A document always holds at least its original revision.
        self.revisions.last().expect("document has no revisions")
    }

    /// The canonical markup text of the current revision.
    pub fn current_text(&self) -> &str {
        self.current_revision().text()
    }

    pub fn revision_count(&self) -> usize {
        self.revisions.len()
    }

    pub fn risk_assessment(&self) -> &RiskAssessment {
        &self.risk_assessment
    }

    pub fn pricing(&self) -> &Pricing {
        &self.pricing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn doc(text: &str) -> PolicyDocument {
        PolicyDocument::new(
            PolicyId::generate(),
            text,
            RiskAssessment::existing_policy_default(),
            Pricing::existing_policy_default(),
        )
        .unwrap()
    }

    mod construction {
        use super::*;

        #[test]
        fn new_creates_single_generation_revision() {
            let doc = doc("## Coverage\nFull text.");
            assert_eq!(doc.revision_count(), 1);
            assert_eq!(doc.current_index(), 0);
            assert_eq!(doc.current_revision().origin(), RevisionOrigin::Generation);
            assert!(doc.current_revision().instruction().is_none());
            assert_eq!(doc.current_revision().sequence(), 0);
        }

        #[test]
        fn new_rejects_empty_text() {
            let result = PolicyDocument::new(
                PolicyId::generate(),
                "   ",
                RiskAssessment::existing_policy_default(),
                Pricing::existing_policy_default(),
            );
            assert!(matches!(result, Err(e) if e.code == ErrorCode::InvalidState));
        }
    }

    mod append_revision {
        use super::*;

        #[test]
        fn appends_refinement_with_next_sequence() {
            let first = doc("original");
            let second = first.append_revision("updated", "add flood cover").unwrap();

            assert_eq!(second.revision_count(), 2);
            assert_eq!(second.current_index(), 1);
            assert_eq!(second.current_text(), "updated");
            assert_eq!(second.current_revision().sequence(), 1);
            assert_eq!(second.current_revision().origin(), RevisionOrigin::Refinement);
            assert_eq!(second.current_revision().instruction(), Some("add flood cover"));
        }

        #[test]
        fn does_not_mutate_prior_document() {
            let first = doc("original");
            let second = first.append_revision("updated", "tighten exclusions").unwrap();

            // Holding a reference across a refinement yields different text.
            assert_eq!(first.current_text(), "original");
            assert_eq!(second.current_text(), "updated");
            assert_eq!(first.revision_count(), 1);
        }

        #[test]
        fn rejects_empty_new_text() {
            let first = doc("original");
            let result = first.append_revision("", "whatever");
            assert!(matches!(result, Err(e) if e.code == ErrorCode::InvalidState));
            assert_eq!(first.revision_count(), 1);
        }

        #[test]
        fn preserves_revision_order_and_history() {
            let d0 = doc("v0");
            let d1 = d0.append_revision("v1", "i1").unwrap();
            let d2 = d1.append_revision("v2", "i2").unwrap();

            let texts: Vec<&str> = d2.revisions().iter().map(|r| r.text()).collect();
            assert_eq!(texts, vec!["v0", "v1", "v2"]);
            let seqs: Vec<u64> = d2.revisions().iter().map(|r| r.sequence()).collect();
            assert_eq!(seqs, vec![0, 1, 2]);
        }

        #[test]
        fn current_index_tracks_last_revision() {
            let mut current = doc("v0");
            for i in 1..=5 {
                current = current
                    .append_revision(format!("v{}", i), format!("i{}", i))
                    .unwrap();
                assert_eq!(current.current_index(), current.revision_count() - 1);
            }
        }
    }

    mod immutable_payloads {
        use super::*;

        #[test]
        fn refinement_leaves_risk_and_pricing_untouched() {
            let first = doc("original");
            let second = first.append_revision("updated", "raise coverage").unwrap();

            assert_eq!(first.risk_assessment(), second.risk_assessment());
            assert_eq!(first.pricing(), second.pricing());
            assert_eq!(first.id(), second.id());
        }
    }
}
