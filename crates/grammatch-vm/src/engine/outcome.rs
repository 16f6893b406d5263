//! Result of running the matcher over an input.

use serde::Serialize;

use super::token::Token;

/// Outcome of matching the start rule at offset 0.
///
/// `ast` is set whenever the start rule matched, even if it consumed only a
/// prefix (or nothing) of the input. `input == input[..end] + rest` always
/// holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub ast: Option<Token>,
    /// Bytes consumed by the start rule.
    pub end: usize,
    /// Unconsumed suffix of the input.
    pub rest: String,
    /// Furthest offset where a terminal failed to match.
    pub furthest: usize,
    /// Terminals that were tried at `furthest`, in the order they were tried.
    pub expected: Vec<String>,
}

impl MatchResult {
    pub(crate) fn new(
        input: &str,
        ast: Option<Token>,
        furthest: usize,
        expected: Vec<String>,
    ) -> Self {
        let end = ast.as_ref().map_or(0, |t| t.end);
        Self {
            ast,
            end,
            rest: input[end..].to_string(),
            furthest,
            expected,
        }
    }

    /// The start rule matched, possibly leaving a rest.
    pub fn is_match(&self) -> bool {
        self.ast.is_some()
    }

    /// The start rule matched the whole input.
    pub fn is_complete(&self) -> bool {
        self.ast.is_some() && self.rest.is_empty()
    }
}
