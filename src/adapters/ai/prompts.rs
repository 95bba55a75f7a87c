//! Prompt templates for the AI collaborator.
//!
//! Kept in one place so the exact wording sent to the model is easy to
//! review and adjust. Each builder returns the full prompt text for one of
//! the three AI operations.

use crate::domain::policy::{Pricing, RiskAssessment};
use crate::ports::{AiError, GenerationRequest};

/// Prompt for generating a complete policy from client inputs plus the
/// scoring pipeline's risk and pricing results.
pub fn generation_prompt(
    request: &GenerationRequest,
    risk: &RiskAssessment,
    pricing: &Pricing,
) -> Result<String, AiError> {
    let client_json = serde_json::to_string_pretty(request)
        .map_err(|e| AiError::InvalidRequest(format!("unserializable request: {}", e)))?;
    let risk_json = serde_json::to_string_pretty(risk)
        .map_err(|e| AiError::InvalidRequest(format!("unserializable risk result: {}", e)))?;
    let pricing_json = serde_json::to_string_pretty(pricing)
        .map_err(|e| AiError::InvalidRequest(format!("unserializable pricing result: {}", e)))?;

    Ok(format!(
        "Generate a comprehensive, personalized insurance policy for the following client:\n\n\
         CLIENT DATA:\n{client_json}\n\n\
         RISK ASSESSMENT:\n{risk_json}\n\n\
         PRICING DETAILS:\n{pricing_json}\n\n\
         The policy MUST include:\n\
         1. Policy Overview (Type, Holder, Duration, Coverage Amount)\n\
         2. Detailed Coverage (What is covered)\n\
         3. Terms & Conditions (Standard and personalized based on risk)\n\
         4. Exclusions (What is not covered)\n\
         5. Premium and Payment Schedule (Monthly/Yearly breakdown)\n\n\
         Format the output as a well-structured Markdown document.\n\
         Keep the tone professional, legalistic, yet clear."
    ))
}

/// Prompt for applying one refinement instruction to an existing policy.
pub fn refinement_prompt(current_policy: &str, instruction: &str) -> String {
    format!(
        "You are an insurance expert. I have an existing insurance policy and I want to \
         refine it based on a user's request.\n\n\
         CURRENT POLICY:\n---\n{current_policy}\n---\n\n\
         USER REFINEMENT REQUEST: \"{instruction}\"\n\n\
         Please update the policy to reflect this request. Ensure the overall structure, \
         legal tone, and consistency are maintained.\n\
         Output ONLY the updated policy text in Markdown."
    )
}

/// Prompt for answering one question against a frozen policy context.
pub fn qa_prompt(question: &str, policy_context: &str) -> String {
    format!(
        "You are an insurance policy assistant. Answer the following question based ONLY \
         on the provided policy context.\n\n\
         Policy Context:\n{policy_context}\n\n\
         Question: {question}\n\n\
         Instructions:\n\
         - Only answer based on the policy context provided\n\
         - If the answer is not in the policy, say \"This information is not available in the provided policy\"\n\
         - Be concise and professional\n\
         - Do not make assumptions or provide general insurance advice\n\n\
         Answer:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policy::{ClientProfile, InsuranceDetails};

    fn request() -> GenerationRequest {
        GenerationRequest::new(
            ClientProfile {
                name: "Ada".into(),
                age: 34,
                income: 72_000.0,
                medical_history: false,
                lifestyle: "standard".into(),
                extra: serde_json::Value::Null,
            },
            InsuranceDetails::new("auto", 100_000.0),
        )
    }

    #[test]
    fn generation_prompt_embeds_all_inputs() {
        let risk = RiskAssessment::existing_policy_default();
        let pricing = Pricing::existing_policy_default();

        let prompt = generation_prompt(&request(), &risk, &pricing).unwrap();

        assert!(prompt.contains("\"name\": \"Ada\""));
        assert!(prompt.contains("RISK ASSESSMENT:"));
        assert!(prompt.contains("PRICING DETAILS:"));
        assert!(prompt.contains("Markdown"));
    }

    #[test]
    fn refinement_prompt_quotes_the_instruction() {
        let prompt = refinement_prompt("## Policy\nBody.", "add flood coverage");
        assert!(prompt.contains("## Policy\nBody."));
        assert!(prompt.contains("\"add flood coverage\""));
        assert!(prompt.contains("ONLY the updated policy text"));
    }

    #[test]
    fn qa_prompt_grounds_answer_in_context() {
        let prompt = qa_prompt("What is my deductible?", "Deductible: $500.");
        assert!(prompt.contains("Deductible: $500."));
        assert!(prompt.contains("Question: What is my deductible?"));
        assert!(prompt.contains("based ONLY"));
    }
}
