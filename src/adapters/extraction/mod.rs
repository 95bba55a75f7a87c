//! Extraction adapters for uploaded policy files.

mod plain_text;

pub use plain_text::PlainTextExtractor;
