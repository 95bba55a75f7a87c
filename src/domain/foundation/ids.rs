//! Identifier value objects.
//!
//! `PolicyId` is intentionally a string rather than a raw UUID: generation
//! collaborators assign their own opaque identifiers and ingested documents
//! carry upload-prefixed ones, so the core only requires non-emptiness.

use crate::domain::foundation::DomainError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for a policy document, assigned at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyId(String);

impl PolicyId {
    /// Creates a PolicyId from an externally assigned identifier.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the identifier is empty
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::validation("policy_id", "Policy id cannot be empty"));
        }
        Ok(Self(id))
    }

    /// Generates a fresh random PolicyId.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Generates a PolicyId for an ingested (uploaded) document.
    pub fn for_upload() -> Self {
        let uuid = Uuid::new_v4().simple().to_string();
        Self(format!("UPLOAD-{}", &uuid[..8]))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PolicyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a turn within a query session transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(Uuid);

impl TurnId {
    /// Creates a new random TurnId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a TurnId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TurnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TurnId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod policy_id {
        use super::*;

        #[test]
        fn accepts_external_identifier() {
            let id = PolicyId::new("POL-2024-0042").unwrap();
            assert_eq!(id.as_str(), "POL-2024-0042");
        }

        #[test]
        fn rejects_empty_identifier() {
            assert!(PolicyId::new("").is_err());
            assert!(PolicyId::new("   ").is_err());
        }

        #[test]
        fn generate_produces_unique_values() {
            assert_ne!(PolicyId::generate(), PolicyId::generate());
        }

        #[test]
        fn for_upload_carries_prefix() {
            let id = PolicyId::for_upload();
            assert!(id.as_str().starts_with("UPLOAD-"));
        }
    }

    mod turn_id {
        use super::*;

        #[test]
        fn generates_unique_values() {
            assert_ne!(TurnId::new(), TurnId::new());
        }

        #[test]
        fn parses_from_valid_string() {
            let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
            let id: TurnId = uuid_str.parse().unwrap();
            assert_eq!(id.to_string(), uuid_str);
        }

        #[test]
        fn from_uuid_preserves_value() {
            let uuid = Uuid::new_v4();
            let id = TurnId::from_uuid(uuid);
            assert_eq!(id.as_uuid(), &uuid);
        }
    }
}
