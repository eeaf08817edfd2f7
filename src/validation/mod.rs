//! Validation Engine
//!
//! Line checkers and the document-level driver, separated from LSP concerns.

pub mod checkers;
pub mod engine;

pub use checkers::{Checker, DialogueChecker, EventChecker, LineChecker};
pub use engine::{
    split_lines, trim_line, validate_document, validate_line, Diagnostic, Position, Range, Severity,
    ValidationResult, BYTE_ORDER_MARK, DIAGNOSTIC_SOURCE,
};
