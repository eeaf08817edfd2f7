//! Line Classification
//!
//! Decides which checker, if any, applies to a script line.

/// Kind of statement a script line represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Starts with `-`
    Dialogue,
    /// Second character is `#`
    Event,
    /// Anything else; never produces diagnostics
    Unclassified,
}

/// Classify a trimmed line. The dialogue check takes priority over the event check.
pub fn classify(trimmed: &str) -> LineKind {
    let mut chars = trimmed.chars();

    match (chars.next(), chars.next()) {
        (Some('-'), _) => LineKind::Dialogue,
        (_, Some('#')) => LineKind::Event,
        _ => LineKind::Unclassified,
    }
}
