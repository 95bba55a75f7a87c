//! Policyforge - AI-assisted insurance policy pipeline
//!
//! This crate owns the lifecycle of a single policy artifact: AI generation
//! or ingestion of an existing document, iterative natural-language
//! refinement, conversational Q&A scoped to a document snapshot, and
//! conversion into display, speech, print-paginated and word-processor
//! representations from one canonical text.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
