//! Parser state machine and low-level operations.
//!
//! Generic over the dialect's token kind: cursor movement, lookahead past
//! trivia, error reporting with per-position deduplication, and nesting
//! fuel. The productions themselves live in each dialect's `grammar` module
//! as `impl Parser<'_, TheirKind>` blocks.

use std::cell::Cell;

use grammatch_core::Expr;
use rowan::{TextRange, TextSize};

use super::lexer::{Token, TokenKind, token_text};
use super::token_set::TokenSet;
use crate::diagnostics::{DiagnosticKind, Diagnostics, Fix};

const DEBUG_FUEL: u32 = 256;

/// A rule as written, before names are checked against each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDef {
    pub name: String,
    pub name_span: TextRange,
    pub expr: Expr,
}

/// A use of a rule name inside some rule body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefSite {
    pub name: String,
    pub span: TextRange,
}

/// What every dialect parser produces.
#[derive(Debug, Default)]
pub struct ParseOutput {
    pub rules: Vec<RuleDef>,
    pub references: Vec<RefSite>,
    pub diagnostics: Diagnostics,
}

pub struct Parser<'src, K> {
    pub(crate) source: &'src str,
    pub(crate) tokens: Vec<Token<K>>,
    pub(crate) pos: usize,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) depth: u32,
    pub(crate) last_diagnostic_pos: Option<TextSize>,
    pub(crate) debug_fuel: Cell<u32>,
    recursion_fuel_limit: Option<u32>,
    aborted: bool,
    rules: Vec<RuleDef>,
    references: Vec<RefSite>,
}

impl<'src, K: TokenKind> Parser<'src, K> {
    pub fn new(source: &'src str, tokens: Vec<Token<K>>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            diagnostics: Diagnostics::new(),
            depth: 0,
            last_diagnostic_pos: None,
            debug_fuel: Cell::new(DEBUG_FUEL),
            recursion_fuel_limit: None,
            aborted: false,
            rules: Vec::new(),
            references: Vec::new(),
        }
    }

    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel_limit = limit;
        self
    }

    pub fn finish(self) -> ParseOutput {
        ParseOutput {
            rules: self.rules,
            references: self.references,
            diagnostics: self.diagnostics,
        }
    }

    pub(crate) fn define_rule(&mut self, name: String, name_span: TextRange, expr: Expr) {
        self.rules.push(RuleDef {
            name,
            name_span,
            expr,
        });
    }

    /// Builds a reference expression and remembers where it was written.
    pub(crate) fn reference(&mut self, name: &str, span: TextRange) -> Expr {
        self.references.push(RefSite {
            name: name.to_string(),
            span,
        });
        Expr::reference(name)
    }

    /// Set once nesting fuel runs out; the rest of the input is not parsed.
    pub(crate) fn is_aborted(&self) -> bool {
        self.aborted
    }

    fn reset_debug_fuel(&self) {
        self.debug_fuel.set(DEBUG_FUEL);
    }

    fn skip_trivia(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
            self.pos += 1;
        }
    }

    pub(crate) fn current(&mut self) -> K {
        self.skip_trivia();
        self.ensure_progress();
        self.tokens.get(self.pos).map_or(K::EOF, |t| t.kind)
    }

    pub(crate) fn current_span(&mut self) -> TextRange {
        self.skip_trivia();
        self.tokens
            .get(self.pos)
            .map_or_else(|| TextRange::empty(self.eof_offset()), |t| t.span)
    }

    pub(crate) fn current_text(&mut self) -> &'src str {
        self.skip_trivia();
        let source = self.source;
        self.tokens
            .get(self.pos)
            .map_or("", |t| token_text(source, t))
    }

    /// Describes the current token for "expected ..." messages.
    pub(crate) fn found(&mut self) -> String {
        if self.eof() {
            "reached end of input".to_string()
        } else {
            format!("found `{}`", self.current_text())
        }
    }

    pub(crate) fn eof_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }

    pub(crate) fn eof(&mut self) -> bool {
        self.skip_trivia();
        self.pos >= self.tokens.len()
    }

    pub(crate) fn should_stop(&mut self) -> bool {
        self.aborted || self.eof()
    }

    pub(crate) fn currently_is(&mut self, kind: K) -> bool {
        self.current() == kind
    }

    pub(crate) fn currently_is_one_of(&mut self, set: TokenSet<K>) -> bool {
        let kind = self.current();
        set.contains(kind)
    }

    /// LL(k) lookahead past trivia. `peek_nth(0)` is the current token.
    pub(crate) fn peek_nth(&mut self, n: usize) -> K {
        self.skip_trivia();
        self.ensure_progress();
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
            .map_or(K::EOF, |t| t.kind)
    }

    pub(crate) fn next_is(&mut self, kind: K) -> bool {
        self.peek_nth(1) == kind
    }

    /// Consumes the current token and returns it.
    pub(crate) fn bump(&mut self) -> Token<K> {
        assert!(!self.eof(), "bump called at EOF");
        self.reset_debug_fuel();
        let token = self.tokens[self.pos];
        self.pos += 1;
        token
    }

    pub(crate) fn eat(&mut self, kind: K) -> bool {
        if self.currently_is(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// On mismatch: emit diagnostic but don't consume.
    pub(crate) fn expect(&mut self, kind: K, what: &str) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error_msg(DiagnosticKind::UnexpectedToken, format!("expected {}", what));
        false
    }

    /// End of the last consumed non-trivia token.
    pub(crate) fn last_non_trivia_end(&self) -> Option<TextSize> {
        self.tokens[..self.pos.min(self.tokens.len())]
            .iter()
            .rev()
            .find(|t| !t.kind.is_trivia())
            .map(|t| t.span.end())
    }

    fn should_report(&mut self, pos: TextSize) -> bool {
        if self.last_diagnostic_pos == Some(pos) {
            return false;
        }
        self.last_diagnostic_pos = Some(pos);
        true
    }

    pub(crate) fn error(&mut self, kind: DiagnosticKind) {
        let range = self.current_span();
        if !self.should_report(range.start()) {
            return;
        }
        self.diagnostics.report(kind, range).emit();
    }

    pub(crate) fn error_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let range = self.current_span();
        self.error_at(kind, range, message);
    }

    pub(crate) fn error_at(
        &mut self,
        kind: DiagnosticKind,
        range: TextRange,
        message: impl Into<String>,
    ) {
        if !self.should_report(range.start()) {
            return;
        }
        self.diagnostics.report(kind, range).message(message).emit();
    }

    /// Reports a missing `text` at the current token, suggesting to insert
    /// it right after the last consumed token.
    pub(crate) fn error_missing(
        &mut self,
        kind: DiagnosticKind,
        text: &str,
        detail: Option<String>,
    ) {
        let range = self.current_span();
        if !self.should_report(range.start()) {
            return;
        }
        let at = self.last_non_trivia_end().unwrap_or(range.start());
        let mut builder = self.diagnostics.report(kind, range);
        if let Some(detail) = detail {
            builder = builder.message(detail);
        }
        builder.fix(Fix::insert(at, text)).emit();
    }

    pub(crate) fn error_and_bump(&mut self, kind: DiagnosticKind) {
        self.error(kind);
        if !self.eof() {
            self.bump();
        }
    }

    pub(crate) fn error_and_bump_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.error_msg(kind, message);
        if !self.eof() {
            self.bump();
        }
    }

    /// Reports the current token as out of place and consumes it.
    ///
    /// Tokens that stand for malformed input (unterminated strings, stray
    /// characters) get their own diagnostic instead of the generic one.
    pub(crate) fn error_and_bump_unexpected(&mut self, context: &str) {
        let kind = self.current();
        if kind == K::GARBAGE {
            let text = self.current_text().to_string();
            self.error_and_bump_msg(DiagnosticKind::UnrecognizedCharacter, text);
            return;
        }
        match kind.lex_error() {
            Some(diagnostic) => self.error_and_bump(diagnostic),
            None => self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, context),
        }
    }

    /// Reports a missing expression, or the malformed token standing where one was expected.
    pub(crate) fn error_missing_expression(&mut self, context: impl Into<String>) {
        let kind = self.current();
        if kind == K::GARBAGE || kind.lex_error().is_some() {
            self.error_and_bump_unexpected("expected an expression");
            return;
        }
        self.error_msg(DiagnosticKind::ExpectedExpression, context);
    }

    /// Consumes tokens until `at` holds or input ends.
    pub(crate) fn skip_while_not(&mut self, mut at: impl FnMut(&mut Self) -> bool) {
        while !self.should_stop() && !at(self) {
            self.bump();
        }
    }

    pub(crate) fn enter_recursion(&mut self) -> bool {
        if let Some(limit) = self.recursion_fuel_limit
            && self.depth >= limit
        {
            if !self.aborted {
                let range = self.current_span();
                self.diagnostics
                    .report(DiagnosticKind::NestingTooDeep, range)
                    .message(format!("more than {limit} nested groups"))
                    .emit();
                self.aborted = true;
            }
            return false;
        }
        self.depth += 1;
        self.reset_debug_fuel();
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.reset_debug_fuel();
    }

    /// Reports a delimiter opened at `open_range` and never closed.
    pub(crate) fn error_unclosed_delimiter(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        related_msg: impl Into<String>,
        open_range: TextRange,
    ) {
        let current = self.current_span();
        if !self.should_report(current.start()) {
            return;
        }
        let full_range = TextRange::new(open_range.start(), current.end());
        self.diagnostics
            .report(kind, full_range)
            .message(message)
            .related_to(related_msg, open_range)
            .emit();
    }
}
