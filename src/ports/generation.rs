//! Generation port - produces a complete policy from client inputs.

use crate::domain::foundation::PolicyId;
use crate::domain::policy::{ClientProfile, InsuranceDetails, Pricing, RiskAssessment};
use crate::ports::AiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Inputs for policy generation, forwarded to the collaborator verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub client_profile: ClientProfile,
    pub insurance_details: InsuranceDetails,
}

impl GenerationRequest {
    pub fn new(client_profile: ClientProfile, insurance_details: InsuranceDetails) -> Self {
        Self {
            client_profile,
            insurance_details,
        }
    }
}

/// Everything the generation collaborator returns for a new policy.
///
/// Risk and pricing come from the collaborator's scoring pipeline and are
/// opaque to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPolicy {
    pub policy_id: PolicyId,
    /// Raw markup policy text (the canonical form).
    pub policy_text: String,
    pub risk_assessment: RiskAssessment,
    pub pricing: Pricing,
}

/// Port for the policy generation collaborator.
#[async_trait]
pub trait PolicyGenerator: Send + Sync {
    /// Generates a complete policy for the given client and coverage.
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedPolicy, AiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_generator_is_object_safe() {
        fn check<T: PolicyGenerator + ?Sized>() {}
        check::<dyn PolicyGenerator>();
    }
}
