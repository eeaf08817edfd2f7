//! Dialogue Script Language Server
//!
//! A Language Server Protocol implementation for line-oriented dialogue
//! scripts.
//!
//! This library provides:
//! - Line classification and per-line grammar checks
//! - Document validation with a problem cap
//! - LSP protocol implementation
//! - Configuration management and live reload

pub mod classifier;
pub mod config;
pub mod grammar;
pub mod lsp;
pub mod validation;
pub mod watcher;

// Re-exports for clean public API
pub use classifier::{classify, LineKind};
pub use config::{Config, Settings};
pub use grammar::{DialogueMatch, PatternLibrary};
pub use validation::{validate_document, Diagnostic, Severity, ValidationResult};
