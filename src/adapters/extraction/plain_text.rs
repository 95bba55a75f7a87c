//! Plain-text extractor - handles `.txt` and `.md` policy uploads.
//!
//! Binary formats (PDF, DOCX) belong to a richer collaborator behind the
//! same port; this extractor covers the text formats the pipeline can
//! decode without external tooling.

use crate::ports::{ExtractedPolicy, ExtractionError, ExtractionService, PolicyUpload};
use async_trait::async_trait;

const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md"];

/// Extraction service for plain-text policy files.
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Keeps only characters safe for display and download naming.
    fn sanitize_filename(filename: &str) -> String {
        filename
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
            .collect()
    }
}

#[async_trait]
impl ExtractionService for PlainTextExtractor {
    async fn extract(&self, upload: &PolicyUpload) -> Result<ExtractedPolicy, ExtractionError> {
        let extension = upload
            .extension()
            .ok_or_else(|| ExtractionError::UnsupportedFileType(upload.filename.clone()))?;
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ExtractionError::UnsupportedFileType(extension));
        }

        let plain_text = String::from_utf8(upload.bytes.clone())
            .map_err(|e| ExtractionError::Corrupted(format!("not valid UTF-8: {}", e)))?;

        if plain_text.trim().is_empty() {
            return Err(ExtractionError::EmptyDocument(upload.filename.clone()));
        }

        let word_count = plain_text.split_whitespace().count();
        tracing::debug!(filename = %upload.filename, word_count, "extracted text upload");

        Ok(ExtractedPolicy {
            plain_text,
            word_count,
            filename: Self::sanitize_filename(&upload.filename),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn extracts_text_and_counts_words() {
        let upload = PolicyUpload::new("policy.txt", b"Coverage begins on day one.".to_vec());

        let extracted = PlainTextExtractor::new().extract(&upload).await.unwrap();

        assert_eq!(extracted.plain_text, "Coverage begins on day one.");
        assert_eq!(extracted.word_count, 5);
        assert_eq!(extracted.filename, "policy.txt");
    }

    #[tokio::test]
    async fn accepts_markdown_extension() {
        let upload = PolicyUpload::new("policy.MD", b"## Terms".to_vec());
        assert!(PlainTextExtractor::new().extract(&upload).await.is_ok());
    }

    #[tokio::test]
    async fn rejects_unsupported_extension() {
        let upload = PolicyUpload::new("policy.pdf", b"%PDF-1.4".to_vec());
        let err = PlainTextExtractor::new().extract(&upload).await.unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFileType(ext) if ext == "pdf"));
    }

    #[tokio::test]
    async fn rejects_missing_extension() {
        let upload = PolicyUpload::new("policy", b"text".to_vec());
        let err = PlainTextExtractor::new().extract(&upload).await.unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFileType(_)));
    }

    #[tokio::test]
    async fn rejects_invalid_utf8() {
        let upload = PolicyUpload::new("policy.txt", vec![0xFF, 0xFE, 0x00]);
        let err = PlainTextExtractor::new().extract(&upload).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Corrupted(_)));
    }

    #[tokio::test]
    async fn rejects_whitespace_only_content() {
        let upload = PolicyUpload::new("policy.txt", b"   \n\t  ".to_vec());
        let err = PlainTextExtractor::new().extract(&upload).await.unwrap_err();
        assert!(matches!(err, ExtractionError::EmptyDocument(_)));
    }

    #[test]
    fn sanitizes_hostile_filenames() {
        assert_eq!(
            PlainTextExtractor::sanitize_filename("../my policy (1).txt"),
            "..mypolicy1.txt"
        );
    }
}
