//! Dialect-independent grammar representation.
//!
//! Every front-end lowers its source into a [`RuleSet`]: an ordered table of
//! named [`Rule`]s whose bodies are [`Expr`] trees. References are by name, so
//! recursive grammars need no special handling here.

mod display;
mod expr;
mod rule_set;

#[cfg(test)]
mod display_tests;
#[cfg(test)]
mod rule_set_tests;

pub use expr::{CharClass, ClassItem, Expr};
pub use rule_set::{END_OF_INPUT, FRAGMENT_PREFIX, Rule, RuleId, RuleSet};
