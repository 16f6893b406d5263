//! Backtracking matcher for grammatch rule sets.
//!
//! The VM walks the rule set directly: each expression variant has one
//! matching routine, rule invocations become tokens, and the result reports
//! how much of the input was consumed.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;

pub use engine::{
    FuelLimits, MatchResult, NoopTracer, PrintTracer, RuntimeError, Token, Tracer, VM, Verbosity,
    match_input,
};
