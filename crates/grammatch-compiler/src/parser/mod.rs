//! Token-cursor plumbing shared by the dialect parsers.
//!
//! # Architecture
//!
//! Each dialect owns a `logos` token enum and a set of recursive-descent
//! productions. What they share lives here:
//!
//! - Zero-copy lexing: tokens carry spans, text is sliced only when needed
//! - Trivia skipping: whitespace and comments are invisible to productions
//! - Error dedup: at most one diagnostic per source position
//! - Nesting fuel: deeply nested groups stop the parse with a diagnostic
//!
//! # Recovery Strategy
//!
//! The parsers never stop at the first error:
//!
//! 1. Unknown tokens are reported and consumed
//! 2. Missing expected tokens emit a diagnostic but aren't consumed
//! 3. After a broken rule, input is skipped to the next rule head
//! 4. On nesting fuel exhaustion the remaining input is abandoned

mod core;
mod invariants;
mod lexer;
mod token_set;

#[cfg(test)]
mod core_tests;

pub use core::{ParseOutput, Parser, RefSite, RuleDef};
pub use lexer::{Token, TokenKind, lex, token_text};
pub use token_set::TokenSet;
