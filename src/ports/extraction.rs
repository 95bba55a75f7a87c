//! Extraction port - plain text out of an uploaded policy file.
//!
//! Parsing binary document formats is owned by the collaborator behind this
//! port; the core only ever sees the extracted plain text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An uploaded file as received from the presentation layer.
#[derive(Debug, Clone)]
pub struct PolicyUpload {
    /// Client-supplied filename, not yet sanitized.
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl PolicyUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Lowercased extension of the uploaded filename, if any.
    pub fn extension(&self) -> Option<String> {
        self.filename.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
    }
}

/// Result of a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedPolicy {
    pub plain_text: String,
    pub word_count: usize,
    /// Sanitized filename safe for display and download naming.
    pub filename: String,
}

/// Port for the document extraction collaborator.
#[async_trait]
pub trait ExtractionService: Send + Sync {
    /// Extracts plain policy text from an uploaded file.
    async fn extract(&self, upload: &PolicyUpload) -> Result<ExtractedPolicy, ExtractionError>;
}

/// Errors from document extraction.
#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    /// The file type is not handled by this extractor.
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// The file was syntactically valid but held no usable text.
    #[error("no text could be extracted from '{0}'")]
    EmptyDocument(String),

    /// The file could not be decoded at all.
    #[error("corrupted upload: {0}")]
    Corrupted(String),
}
