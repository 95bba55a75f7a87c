//! Generation inputs: client profile and requested insurance details.
//!
//! These are forwarded verbatim to the generation collaborator; the core
//! performs no underwriting of its own.

use serde::{Deserialize, Serialize};

/// The client on whose behalf a policy is generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub name: String,
    pub age: u32,
    pub income: f64,
    /// True if the client reported pre-existing conditions.
    #[serde(default)]
    pub medical_history: bool,
    /// Lifestyle bucket, e.g. "standard" or "high_risk".
    #[serde(default = "default_lifestyle")]
    pub lifestyle: String,
    /// Free-form extras the collaborator may use (occupation, location, ...).
    #[serde(default)]
    pub extra: serde_json::Value,
}

fn default_lifestyle() -> String {
    "standard".to_string()
}

/// The coverage the client is asking for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceDetails {
    /// Insurance line: "life", "health", "auto", "property", ...
    pub kind: String,
    pub coverage_amount: f64,
    #[serde(default)]
    pub extra: serde_json::Value,
}

impl InsuranceDetails {
    pub fn new(kind: impl Into<String>, coverage_amount: f64) -> Self {
        Self {
            kind: kind.into(),
            coverage_amount,
            extra: serde_json::Value::Null,
        }
    }
}
