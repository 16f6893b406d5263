#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for grammatch.
//!
//! - [`grammar`]: the rule set every dialect compiles into
//! - [`LineIndex`]: byte offset to line/column mapping for reports
//! - [`Colors`]: ANSI palette shared by the CLI outputs

pub mod colors;
pub mod grammar;
mod line_index;


pub use colors::Colors;
pub use grammar::{
    CharClass, ClassItem, END_OF_INPUT, Expr, FRAGMENT_PREFIX, Rule, RuleId, RuleSet,
};
pub use line_index::{LineCol, LineIndex};
