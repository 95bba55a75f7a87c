//! AI adapters: the Gemini REST service and a configurable mock.

mod gemini;
mod mock;
pub mod prompts;
pub mod scoring;

pub use gemini::{default_models, GeminiConfig, GeminiService};
pub use mock::MockAiService;
