//! Matching engine.
//!
//! The VM runs a [`RuleSet`](grammatch_core::RuleSet) against an input
//! string, producing a token tree for the start rule and the unconsumed
//! rest of the input.

mod error;
mod outcome;
mod token;
mod trace;
mod vm;

#[cfg(test)]
mod trace_tests;

pub use error::RuntimeError;
pub use outcome::MatchResult;
pub use token::Token;
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
pub use vm::{FuelLimits, VM, VMBuilder, match_input};
