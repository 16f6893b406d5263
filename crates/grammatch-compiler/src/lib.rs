//! Grammar front-ends: W3C EBNF, classic BNF and an ISO-style notation.
//!
//! # Example
//!
//! ```
//! use grammatch_compiler::{Dialect, compile};
//!
//! let rules = compile(Dialect::W3c, r#"digit ::= "0" | "1""#).unwrap();
//! assert_eq!(rules.summary(), "1 rule: digit");
//!
//! let err = compile(Dialect::W3c, "a ::= b").unwrap_err();
//! assert_eq!(err.message(), "`b` is not defined");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod dialect;
pub mod parser;

mod compile;
mod error;
mod escape;
mod resolve;

#[cfg(test)]
mod compile_tests;
#[cfg(test)]
mod test_utils;

/// Result type for passes that produce both output and diagnostics.
///
/// Warnings travel alongside the output. Errors end the pass with the
/// outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), GrammarError>;

pub use compile::{Compiler, DEFAULT_RECURSION_FUEL, compile};
pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity, SourceView};
pub use dialect::{Dialect, UnknownDialect};
pub use error::GrammarError;
