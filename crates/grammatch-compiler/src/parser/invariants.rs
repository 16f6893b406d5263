//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::core::Parser;
use super::lexer::TokenKind;

impl<K: TokenKind> Parser<'_, K> {
    /// Panics when the parser looks ahead too often without consuming a token.
    #[inline]
    pub(crate) fn ensure_progress(&self) {
        assert!(
            self.debug_fuel.get() != 0,
            "parser is stuck: too many lookaheads"
        );
        self.debug_fuel.set(self.debug_fuel.get() - 1);
    }

    #[inline]
    pub(crate) fn assert_current(&mut self, expected: K) {
        let current = self.current();
        assert_eq!(
            current, expected,
            "expected {expected:?} before bump, found {current:?}"
        );
    }
}
