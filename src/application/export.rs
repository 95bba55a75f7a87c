//! Export encoder - downloadable artifacts from a policy revision.
//!
//! Both formats operate on the plain (de-markuped) text, never on raw
//! markup. The paginated PDF form drives its page breaks exclusively from
//! the pagination engine; the word-processor form is reflowable and
//! unpaginated. Artifacts are assembled fully in memory, so encoding is
//! all-or-nothing by construction and identical inputs yield identical
//! bytes.

use crate::domain::foundation::PolicyId;
use crate::domain::policy::{DocumentRevision, PolicyDocument};
use crate::domain::rendering::{paginate, to_plain, Page, PageGeometry};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Export formats supported by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Paginated, print-style PDF.
    Pdf,
    /// Reflowable word-processor document.
    Doc,
}

impl ExportFormat {
    /// MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Doc => "application/msword",
        }
    }

    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Doc => "doc",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Doc => write!(f, "doc"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "doc" | "docx" | "word" => Ok(ExportFormat::Doc),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Errors from export encoding.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// Requested format is not one the encoder produces.
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),
}

/// A fully assembled downloadable artifact.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub content: Vec<u8>,
    pub content_type: String,
    pub filename: String,
    pub format: ExportFormat,
}

impl ExportedDocument {
    fn new(content: Vec<u8>, format: ExportFormat, base_filename: &str) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: format!("{}.{}", base_filename, format.extension()),
            format,
        }
    }
}

/// Serializes policy revisions into downloadable artifacts.
#[derive(Debug, Clone)]
pub struct ExportEncoder {
    geometry: PageGeometry,
}

impl Default for ExportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportEncoder {
    /// Encoder with the default print geometry (180 x 37).
    pub fn new() -> Self {
        Self {
            geometry: PageGeometry::default(),
        }
    }

    /// Encoder with custom page geometry for the paginated form.
    pub fn with_geometry(geometry: PageGeometry) -> Self {
        Self { geometry }
    }

    /// Encodes the document's current revision.
    pub fn encode(&self, document: &PolicyDocument, format: ExportFormat) -> ExportedDocument {
        self.encode_revision(document.id(), document.current_revision(), format)
    }

    /// Encodes one specific revision.
    pub fn encode_revision(
        &self,
        policy_id: &PolicyId,
        revision: &DocumentRevision,
        format: ExportFormat,
    ) -> ExportedDocument {
        let plain = to_plain(revision.text());
        let base = format!("policy_{}", policy_id);
        let content = match format {
            ExportFormat::Pdf => pdf::render(&paginate(&plain, self.geometry)),
            ExportFormat::Doc => doc_envelope(&plain).into_bytes(),
        };
        ExportedDocument::new(content, format, &base)
    }
}

/// Minimal HTML envelope that word processors open as a document.
fn doc_envelope(plain: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Insurance Policy</title>\n</head>\n<body>\n\
         <pre style=\"font-family: Arial, sans-serif; font-size: 12pt; \
         white-space: pre-wrap;\">{}</pre>\n</body>\n</html>\n",
        html_escape(plain)
    )
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Hand-assembled minimal PDF: one page object per laid-out page, a single
/// monospace font, and lines painted top-down with a fixed leading.
mod pdf {
    use super::Page;

    const PAGE_WIDTH_PT: f32 = 612.0;
    const PAGE_HEIGHT_PT: f32 = 792.0;
    const MARGIN_PT: f32 = 40.0;
    const FONT_SIZE_PT: f32 = 10.0;
    const LEADING_PT: f32 = 19.0;

    /// Renders laid-out pages into a complete PDF byte stream.
    pub fn render(pages: &[Page]) -> Vec<u8> {
        let mut buf: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = Vec::new();

        buf.extend_from_slice(b"%PDF-1.4\n");

        // Object 1: catalog.
        begin_obj(&buf, &mut offsets);
        buf.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

        // Object 2: page tree. Page objects are 4, 6, 8, ...
        begin_obj(&buf, &mut offsets);
        let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", 4 + 2 * i)).collect();
        buf.extend_from_slice(
            format!(
                "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
                kids.join(" "),
                pages.len()
            )
            .as_bytes(),
        );

        // Object 3: font.
        begin_obj(&buf, &mut offsets);
        buf.extend_from_slice(
            b"3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Courier >>\nendobj\n",
        );

        // Page + content stream object pairs.
        for (i, page) in pages.iter().enumerate() {
            let page_id = 4 + 2 * i;
            let content_id = page_id + 1;

            begin_obj(&buf, &mut offsets);
            buf.extend_from_slice(
                format!(
                    "{} 0 obj\n<< /Type /Page /Parent 2 0 R \
                     /MediaBox [0 0 {} {}] \
                     /Resources << /Font << /F1 3 0 R >> >> \
                     /Contents {} 0 R >>\nendobj\n",
                    page_id, PAGE_WIDTH_PT, PAGE_HEIGHT_PT, content_id
                )
                .as_bytes(),
            );

            let stream = content_stream(page);
            begin_obj(&buf, &mut offsets);
            buf.extend_from_slice(
                format!("{} 0 obj\n<< /Length {} >>\nstream\n", content_id, stream.len()).as_bytes(),
            );
            buf.extend_from_slice(stream.as_bytes());
            buf.extend_from_slice(b"endstream\nendobj\n");
        }

        // Cross-reference table and trailer.
        let xref_offset = buf.len();
        let total = offsets.len() + 1;
        buf.extend_from_slice(format!("xref\n0 {}\n", total).as_bytes());
        buf.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &offsets {
            buf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        buf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                total, xref_offset
            )
            .as_bytes(),
        );

        buf
    }

    fn begin_obj(buf: &[u8], offsets: &mut Vec<usize>) {
        offsets.push(buf.len());
    }

    fn content_stream(page: &Page) -> String {
        let mut s = String::new();
        s.push_str("BT\n");
        s.push_str(&format!("/F1 {} Tf\n", FONT_SIZE_PT));
        s.push_str(&format!("{} TL\n", LEADING_PT));
        s.push_str(&format!("{} {} Td\n", MARGIN_PT, PAGE_HEIGHT_PT - MARGIN_PT));
        for line in page.lines() {
            s.push_str(&format!("({}) Tj\nT*\n", escape(line)));
        }
        s.push_str("ET\n");
        s
    }

    fn escape(line: &str) -> String {
        line.replace('\\', "\\\\").replace('(', "\\(").replace(')', "\\)")
    }
}
