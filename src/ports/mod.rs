//! Ports: async trait contracts for every external collaborator.
//!
//! The application layer depends only on these traits; adapters provide the
//! implementations.

mod ai_error;
mod extraction;
mod generation;
mod qa;
mod revision;
mod speech;

pub use ai_error::AiError;
pub use extraction::{ExtractedPolicy, ExtractionError, ExtractionService, PolicyUpload};
pub use generation::{GeneratedPolicy, GenerationRequest, PolicyGenerator};
pub use qa::QaService;
pub use revision::RevisionService;
pub use speech::{SpeechError, SpeechOutput};
