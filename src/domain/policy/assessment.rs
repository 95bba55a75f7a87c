//! Risk and pricing payloads attached to a policy document.
//!
//! These are produced by the external scoring collaborator and carried as
//! opaque structured data: the core never computes or updates them, it only
//! attaches them at creation and hands them back to presentation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One contributing factor in a risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    pub impact: String,
    pub description: String,
}

impl RiskFactor {
    pub fn new(
        name: impl Into<String>,
        impact: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            impact: impact.into(),
            description: description.into(),
        }
    }
}

/// Risk assessment result from the scoring collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Coarse band: "Low", "Medium" or "High".
    pub score: String,
    /// Normalized score in `0.0..=1.0`.
    pub score_value: f64,
    pub factors: Vec<RiskFactor>,
    pub explanation: String,
}

impl RiskAssessment {
    /// Placeholder assessment for ingested documents, where no scoring ran.
    pub fn existing_policy_default() -> Self {
        Self {
            score: "Low".to_string(),
            score_value: 0.0,
            factors: vec![
                RiskFactor::new("Existing Policy Holder", "Low", "Document was uploaded, not underwritten here."),
                RiskFactor::new("Verified Documents", "Low", "Text extracted from a provided policy file."),
            ],
            explanation: "Uploaded policy; no fresh risk scoring performed.".to_string(),
        }
    }
}

/// Premium pricing result from the scoring collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub monthly_premium: f64,
    pub yearly_premium: f64,
    pub coverage_amount: f64,
    #[serde(default)]
    pub breakdown: HashMap<String, f64>,
    #[serde(default)]
    pub explanation: String,
}

impl Pricing {
    /// Placeholder pricing for ingested documents.
    pub fn existing_policy_default() -> Self {
        Self {
            monthly_premium: 0.0,
            yearly_premium: 0.0,
            coverage_amount: 0.0,
            breakdown: HashMap::new(),
            explanation: "Uploaded policy; premiums unknown.".to_string(),
        }
    }

    /// Returns a copy with the coverage amount replaced.
    pub fn with_coverage_amount(mut self, amount: f64) -> Self {
        self.coverage_amount = amount;
        self
    }
}

/// Best-effort scan for the first dollar amount in extracted policy text.
///
/// Used only to pre-fill the coverage field for uploaded documents; returns
/// `None` rather than guessing when nothing parseable is found.
pub fn sniff_coverage_amount(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'$' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len()
                && (bytes[end].is_ascii_digit() || bytes[end] == b',' || bytes[end] == b'.')
            {
                end += 1;
            }
            if end > start {
                let cleaned: String = text[start..end].chars().filter(|c| *c != ',').collect();
                let cleaned = cleaned.trim_end_matches('.');
                if let Ok(amount) = cleaned.parse::<f64>() {
                    return Some(amount);
                }
            }
            i = end.max(i + 1);
        } else {
            i += 1;
        }
    }
    None
}
