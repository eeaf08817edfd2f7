//! Validation Engine
//!
//! Splits a script into lines, dispatches each line to its checker and
//! collects diagnostics up to the configured problem cap. Protocol concerns
//! live in `crate::lsp`.

use crate::classifier::classify;
use crate::grammar::PatternLibrary;
use crate::validation::checkers::{Checker, LineChecker};

/// Source tag attached to every diagnostic
pub const DIAGNOSTIC_SOURCE: &str = "tdls";

pub const BYTE_ORDER_MARK: char = '\u{feff}';

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error = 1,
    Warning = 2,
}

/// Zero-based line/column position, columns in UTF-16 code units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// A diagnostic message for a validation issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub range: Range,
    pub message: String,
    pub source: &'static str,
}

/// Result of validating a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Range covering `start..end` columns of a single line
    pub fn on_line(line: u32, start: u32, end: u32) -> Self {
        Self::new(Position::new(line, start), Position::new(line, end))
    }
}

impl Diagnostic {
    pub fn new(severity: Severity, range: Range, message: String) -> Self {
        Self {
            severity,
            range,
            message,
            source: DIAGNOSTIC_SOURCE,
        }
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Split text into lines on `\n`, dropping a preceding `\r`
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Trim whitespace and byte order marks from both ends of a line
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
}

/// Validate a single raw line at a 0-based index
pub fn validate_line(line: &str, line_index: usize) -> Vec<Diagnostic> {
    match Checker::for_kind(classify(trim_line(line)), PatternLibrary::shared()) {
        Some(checker) => checker.check(line, line_index),
        None => Vec::new(),
    }
}

/// Validate an entire document.
///
/// Lines are scanned in order until the document ends or
/// `max_number_of_problems` diagnostics have been collected; the result never
/// holds more than that many entries.
pub fn validate_document(text: &str, max_number_of_problems: usize) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut problems = 0;

    for (line_index, line) in split_lines(text).enumerate() {
        if problems >= max_number_of_problems {
            log::debug!(
                "Problem cap of {} reached at line {}",
                max_number_of_problems,
                line_index
            );
            break;
        }

        let line_diagnostics = validate_line(line, line_index);
        problems += line_diagnostics.len();
        result.diagnostics.extend(line_diagnostics);
    }

    result.diagnostics.truncate(max_number_of_problems);
    result
}
