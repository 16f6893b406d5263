//! The three grammar notations.
//!
//! Each dialect has its own lexer and productions; all of them emit the same
//! [`ParseOutput`] and nothing else is shared between them.

pub mod bnf;
pub mod custom;
pub mod w3c;

#[cfg(test)]
mod dialect_tests;

use std::fmt;
use std::str::FromStr;

use grammatch_core::Expr;
use rowan::{TextRange, TextSize};

use crate::escape::DecodeError;
use crate::parser::{ParseOutput, Parser, TokenKind};

/// Grammar notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// `name ::= expr` with `?*+`, `[a-z]`, `#xHH` and `A - B`.
    W3c,
    /// `<name> ::= expr` with quoted terminals.
    Bnf,
    /// ISO-style `name = a , b | c ;` with `[opt]`, `{many}` and `n * x`.
    Custom,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::W3c, Dialect::Bnf, Dialect::Custom];

    pub fn name(self) -> &'static str {
        match self {
            Dialect::W3c => "W3C",
            Dialect::Bnf => "BNF",
            Dialect::Custom => "Custom",
        }
    }

    /// Dialect conventionally stored under a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "ebnf" | "w3c" => Some(Dialect::W3c),
            "bnf" => Some(Dialect::Bnf),
            "iso" | "custom" => Some(Dialect::Custom),
            _ => None,
        }
    }

    pub(crate) fn parse(self, source: &str, recursion_fuel: Option<u32>) -> ParseOutput {
        match self {
            Dialect::W3c => w3c::parse(source, recursion_fuel),
            Dialect::Bnf => bnf::parse(source, recursion_fuel),
            Dialect::Custom => custom::parse(source, recursion_fuel),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dialect `{0}` (expected w3c, bnf or custom)")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w3c" | "ebnf" => Ok(Dialect::W3c),
            "bnf" => Ok(Dialect::Bnf),
            "custom" | "iso" => Ok(Dialect::Custom),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}

/// Stand-in for an expression that failed to parse. Never reaches a compiled grammar.
pub(crate) fn missing() -> Expr {
    Expr::Sequence { items: Vec::new() }
}

impl<K: TokenKind> Parser<'_, K> {
    /// Reports a decoding error whose range is relative to `base`.
    pub(crate) fn report_decode_error(&mut self, err: DecodeError, base: TextSize) {
        let range = TextRange::new(
            base + TextSize::from(err.range.start as u32),
            base + TextSize::from(err.range.end as u32),
        );
        self.error_at(err.kind, range, err.detail);
    }
}
