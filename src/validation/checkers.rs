//! Line Checkers
//!
//! Per-line grammar checks. Each checker takes a raw line and its 0-based
//! index and returns the diagnostics for that line.

use crate::classifier::LineKind;
use crate::grammar::PatternLibrary;
use crate::validation::engine::{Diagnostic, Range, Severity};

/// Shared call contract for all line checkers
pub trait LineChecker {
    fn check(&self, line: &str, line_index: usize) -> Vec<Diagnostic>;
}

/// Validates `-` dialogue lines against the dialogue grammar
#[derive(Debug, Clone, Copy)]
pub struct DialogueChecker<'p> {
    patterns: &'p PatternLibrary,
}

/// Validates event lines. No event grammar exists yet, so every line passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventChecker;

/// Checker selected for a classified line
#[derive(Debug, Clone, Copy)]
pub enum Checker<'p> {
    Dialogue(DialogueChecker<'p>),
    Event(EventChecker),
}

impl<'p> DialogueChecker<'p> {
    pub fn new(patterns: &'p PatternLibrary) -> Self {
        Self { patterns }
    }
}

impl Default for DialogueChecker<'static> {
    fn default() -> Self {
        Self::new(PatternLibrary::shared())
    }
}

impl LineChecker for DialogueChecker<'_> {
    fn check(&self, line: &str, line_index: usize) -> Vec<Diagnostic> {
        let Some(colon) = line.find(':') else {
            return vec![Diagnostic::new(
                Severity::Error,
                Range::on_line(line_index as u32, 0, 2),
                format!(
                    "Line {}: A dialogue should contain a colon!",
                    line_index + 1
                ),
            )];
        };

        let mut diagnostics = Vec::new();

        let stripped = self.patterns.strip_comment(line);
        if let Some(dialogue) = self.patterns.match_dialogue(&stripped) {
            if dialogue.character.is_none() {
                // Columns follow the raw line, not the comment-stripped one
                let colon_col = utf16_column(line, colon);
                diagnostics.push(Diagnostic::new(
                    Severity::Warning,
                    Range::on_line(line_index as u32, colon_col.saturating_sub(2), colon_col),
                    format!("Line {}: A dialogue needs a character!", line_index + 1),
                ));
            }
        }

        diagnostics
    }
}

impl LineChecker for EventChecker {
    fn check(&self, _line: &str, _line_index: usize) -> Vec<Diagnostic> {
        Vec::new()
    }
}

impl<'p> Checker<'p> {
    /// Pick the checker for a line kind; unclassified lines have none
    pub fn for_kind(kind: LineKind, patterns: &'p PatternLibrary) -> Option<Self> {
        match kind {
            LineKind::Dialogue => Some(Checker::Dialogue(DialogueChecker::new(patterns))),
            LineKind::Event => Some(Checker::Event(EventChecker)),
            LineKind::Unclassified => None,
        }
    }
}

impl LineChecker for Checker<'_> {
    fn check(&self, line: &str, line_index: usize) -> Vec<Diagnostic> {
        match self {
            Checker::Dialogue(checker) => checker.check(line, line_index),
            Checker::Event(checker) => checker.check(line, line_index),
        }
    }
}

/// Convert a byte offset into an LSP (UTF-16) column
fn utf16_column(line: &str, byte_offset: usize) -> u32 {
    line[..byte_offset].encode_utf16().count() as u32
}
