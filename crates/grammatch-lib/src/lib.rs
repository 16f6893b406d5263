//! grammatch: match text against grammars written in W3C EBNF, BNF or an
//! ISO-style notation.
//!
//! # Example
//!
//! ```
//! use grammatch_lib::{Dialect, Grammar, MatchStatus};
//!
//! let grammar = Grammar::compile(Dialect::W3c, r#"
//!     num   ::= digit+
//!     digit ::= [0-9]
//! "#).unwrap();
//!
//! let result = grammar.match_input(None, "42!").unwrap();
//! assert_eq!(MatchStatus::of(&result), MatchStatus::Partial);
//! assert_eq!(result.rest, "!");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod grammar;
mod report;
mod status;

#[cfg(test)]
mod grammar_tests;

pub use grammar::{Grammar, Matcher};
pub use report::MatchReport;
pub use status::MatchStatus;

pub use grammatch_compiler::{Diagnostics, Dialect, GrammarError, UnknownDialect};
pub use grammatch_core::{Colors, LineCol, LineIndex, Rule, RuleSet};
pub use grammatch_vm::{
    FuelLimits, MatchResult, NoopTracer, PrintTracer, RuntimeError, Token, Tracer, Verbosity,
};

/// Errors from compiling a grammar or running it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Result type for grammatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Compiles `grammar` and matches `input` against it in one go.
pub fn match_text(
    dialect: Dialect,
    grammar: &str,
    start: Option<&str>,
    input: &str,
) -> Result<MatchResult> {
    let grammar = Grammar::compile(dialect, grammar)?;
    Ok(grammar.match_input(start, input)?)
}
