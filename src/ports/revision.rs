//! Revision port - applies one natural-language instruction to policy text.

use crate::ports::AiError;
use async_trait::async_trait;

/// Port for the text-revision collaborator.
///
/// Callers are responsible for serializing calls against one document; the
/// port itself is stateless.
#[async_trait]
pub trait RevisionService: Send + Sync {
    /// Revises `current_text` according to `instruction`, returning the
    /// full updated markup text.
    async fn revise(&self, current_text: &str, instruction: &str) -> Result<String, AiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revision_service_is_object_safe() {
        fn check<T: RevisionService + ?Sized>() {}
        check::<dyn RevisionService>();
    }
}
