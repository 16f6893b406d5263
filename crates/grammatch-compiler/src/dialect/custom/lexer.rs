//! Tokens of the ISO-style notation (`name = a , b | c ;`).

use logos::Logos;

use crate::diagnostics::DiagnosticKind;
use crate::parser::{TokenKind, TokenSet};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum SyntaxKind {
    #[token("=")]
    Define = 0,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token("|")]
    Pipe,

    #[token("-")]
    Minus,

    /// Repetition count separator in `3 * x`.
    #[token("*")]
    Star,

    /// Marks a case-insensitive literal: `^"select"`.
    #[token("^")]
    Caret,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    /// `[ optional ]`
    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    /// `{ zero or more }`
    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[regex("[0-9]+")]
    Int,

    #[regex(r"%?[A-Za-z_][A-Za-z0-9_]*")]
    Name,

    /// Quoted literal with backslash escapes.
    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    #[regex(r#"'([^'\\\n]|\\[^\n])*'"#)]
    Literal,

    #[regex(r#""([^"\\\n]|\\[^\n])*"#, allow_greedy = true)]
    #[regex(r#"'([^'\\\n]|\\[^\n])*"#, allow_greedy = true)]
    UnterminatedString,

    #[regex(r"[ \t\r]+")]
    Whitespace,

    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    /// `(* ... *)`
    #[regex(r"\(\*([^*]|\*+[^*)])*\*+\)")]
    BlockComment,

    /// `(*` with no matching `*)`; swallows the rest of the input.
    #[token("(*", |lex| lex.bump(lex.remainder().len()))]
    UnterminatedComment,

    /// Coalesced unrecognized characters
    Garbage,
    Eof,
}

use SyntaxKind::*;

impl TokenKind for SyntaxKind {
    const GARBAGE: Self = Garbage;
    const EOF: Self = Eof;

    #[inline]
    fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline | LineComment | BlockComment)
    }

    #[inline]
    fn bit(self) -> u32 {
        self as u32
    }

    fn lex_error(self) -> Option<DiagnosticKind> {
        match self {
            UnterminatedString => Some(DiagnosticKind::UnterminatedString),
            UnterminatedComment => Some(DiagnosticKind::UnterminatedComment),
            _ => None,
        }
    }
}

const fn set(kinds: &[SyntaxKind]) -> TokenSet<SyntaxKind> {
    let mut bits = 0u64;
    let mut i = 0;
    while i < kinds.len() {
        bits |= 1 << (kinds[i] as u8);
        i += 1;
    }
    TokenSet::from_bits(bits)
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    /// FIRST set of a primary expression.
    pub const PRIMARY_FIRST: TokenSet<SyntaxKind> = set(&[
        Name,
        Literal,
        Caret,
        ParenOpen,
        BracketOpen,
        BraceOpen,
    ]);

    /// FIRST set of a factor: a primary, possibly preceded by a count.
    pub const EXPR_FIRST: TokenSet<SyntaxKind> = PRIMARY_FIRST.union(set(&[Int]));
}
