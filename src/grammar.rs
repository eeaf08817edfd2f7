//! Dialogue Grammar
//!
//! The two fixed patterns the checkers are built on: inline comment
//! stripping and the dialogue line grammar.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// First parenthesised group on a line, e.g. `(aside)`.
const COMMENT_PATTERN: &str = r"\(([^)]*)\)";

/// `-` `<tag>` `{expression}` `name` `[portrait]` `:` `text`
///
/// Everything but the leading `-` and the colon is optional. Group bodies use
/// `+` inside the optional group so that an empty component is reported as
/// absent rather than as an empty capture.
const DIALOGUE_PATTERN: &str = concat!(
    r"-\s*",
    r"(?:<(?P<tag>[^>]+)?>)?\s*",
    r"(?:\{(?P<expression>[^}]+)?\})?\s*",
    r"(?P<character>[0-9A-Za-z_\x{4e00}-\x{9fa5}]+)?\s*",
    r"(?:\[(?P<portrait>[^\]]*)\])?\s*",
    r":\s*",
    r"(?P<text>[\s\S]+)?",
);

static SHARED: LazyLock<PatternLibrary> = LazyLock::new(PatternLibrary::new);

/// Compiled comment and dialogue patterns
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    comment: Regex,
    dialogue: Regex,
}

/// A dialogue line broken into its grammar components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogueMatch<'a> {
    /// Content of the `<...>` tag
    pub tag: Option<&'a str>,
    /// Content of the `{...}` expression tag
    pub expression: Option<&'a str>,
    /// Speaker name before the colon
    pub character: Option<&'a str>,
    /// Content of the `[...]` portrait index (may be empty when brackets are present)
    pub portrait: Option<&'a str>,
    /// Spoken text after the colon
    pub text: Option<&'a str>,
}

impl PatternLibrary {
    pub fn new() -> Self {
        Self {
            comment: Regex::new(COMMENT_PATTERN).expect("comment pattern is valid"),
            dialogue: Regex::new(DIALOGUE_PATTERN).expect("dialogue pattern is valid"),
        }
    }

    /// Process-wide instance, compiled on first use
    pub fn shared() -> &'static PatternLibrary {
        &SHARED
    }

    /// Remove the first parenthesised comment from a line
    pub fn strip_comment<'a>(&self, line: &'a str) -> Cow<'a, str> {
        self.comment.replace(line, "")
    }

    /// Match a (comment-stripped) line against the dialogue grammar
    pub fn match_dialogue<'a>(&self, line: &'a str) -> Option<DialogueMatch<'a>> {
        let caps = self.dialogue.captures(line)?;
        let group = |name: &str| caps.name(name).map(|m| m.as_str());

        Some(DialogueMatch {
            tag: group("tag"),
            expression: group("expression"),
            character: group("character"),
            portrait: group("portrait"),
            text: group("text"),
        })
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::new()
    }
}
