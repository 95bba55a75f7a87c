//! Policy domain: the canonical document, its revisions, and the opaque
//! payloads and inputs that travel with it.

mod assessment;
mod document;
mod profile;

pub use assessment::{sniff_coverage_amount, Pricing, RiskAssessment, RiskFactor};
pub use document::{DocumentRevision, PolicyDocument, RevisionOrigin};
pub use profile::{ClientProfile, InsuranceDetails};
