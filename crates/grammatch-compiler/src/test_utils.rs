//! Helpers shared by the dialect tests.

use crate::{Dialect, compile};

/// Compiles `source` and prints the rule set in normalized notation.
pub(crate) fn expect_valid(dialect: Dialect, source: &str) -> String {
    match compile(dialect, source) {
        Ok(rules) => rules.to_string(),
        Err(err) => panic!("expected a valid grammar, got:\n{}", err.render(source)),
    }
}

/// Compiles `source` and prints its diagnostics, one per line.
pub(crate) fn expect_invalid(dialect: Dialect, source: &str) -> String {
    match compile(dialect, source) {
        Ok(rules) => panic!("expected an invalid grammar, got:\n{rules}"),
        Err(err) => err.diagnostics().printer().render(),
    }
}
