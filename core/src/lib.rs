//! Swift outline library - compact structural summaries of Swift
//! source for LLM context compression.
//!
//! This crate provides:
//! - Annotation-line normalization (`outline::preprocess`)
//! - Regex-driven structural scanning (`outline::parser`)
//! - Deterministic outline rendering (`outline::render`)
//! - Per-file summaries and repository maps (`summary`)
//!
//! Feature flags:
//! - `cli`: Command-line interface

// Core modules (always compiled)
pub mod error;
pub mod outline;
pub mod summary;

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used items
pub use error::ParseError;
pub use outline::{outline_or_error, parse_swift, render_outline, TypeNode};
