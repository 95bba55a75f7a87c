//! Application layer: session lifecycle, refinement, querying, ingestion
//! and export orchestration over the domain and ports.

mod assistant;
mod export;
mod ingest;
mod session;

pub use assistant::{AskError, Assistant, Transcript, Turn, TurnRole, FAILURE_NOTICE};
pub use export::{ExportEncoder, ExportError, ExportFormat, ExportedDocument};
pub use ingest::{IngestError, PolicyIngestor};
pub use session::{DraftError, PolicySession, RefineError};
