use std::fmt;

use grammatch_vm::MatchResult;

/// How a match went, from the caller's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    /// The start rule did not match at offset 0.
    NotMatched,
    /// The start rule matched a prefix; some input is left over.
    Partial,
    /// The start rule consumed the whole input.
    Matched,
}

impl MatchStatus {
    pub fn of(result: &MatchResult) -> Self {
        match &result.ast {
            None => Self::NotMatched,
            Some(_) if !result.rest.is_empty() => Self::Partial,
            Some(_) => Self::Matched,
        }
    }

    pub fn is_matched(self) -> bool {
        self == Self::Matched
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotMatched => write!(f, "not matched"),
            Self::Partial => write!(f, "partial"),
            Self::Matched => write!(f, "matched"),
        }
    }
}
