//! Tokens of the W3C notation (`name ::= expr`).

use logos::Logos;

use crate::diagnostics::DiagnosticKind;
use crate::parser::{TokenKind, TokenSet};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum SyntaxKind {
    #[token("::=")]
    Define = 0,

    #[token("|")]
    Pipe,

    #[token("-")]
    Minus,

    #[token("?")]
    Question,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    /// Opens `{n,m}` repetition bounds.
    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(",")]
    Comma,

    #[regex("[0-9]+")]
    Int,

    /// Rule name. A leading `%` marks a fragment.
    #[regex(r"%?[A-Za-z_][A-Za-z0-9_]*")]
    Name,

    /// Quoted literal. No escapes: a quote character is written with the other quote.
    #[regex(r#""[^"\n]*""#)]
    #[regex(r"'[^'\n]*'")]
    Literal,

    #[regex(r#""[^"\n]*"#, allow_greedy = true)]
    #[regex(r"'[^'\n]*", allow_greedy = true)]
    UnterminatedString,

    /// `#xHH`
    #[regex(r"#x[0-9A-Fa-f]+")]
    CharCode,

    /// `[a-z]`, `[^"]`, `[#x20-#x7E]`
    #[regex(r"\[[^\]\n]*\]")]
    CharClass,

    #[regex(r"\[[^\]\n]*", allow_greedy = true)]
    UnterminatedCharClass,

    #[regex(r"[ \t\r]+")]
    Whitespace,

    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    /// `/*` with no matching `*/`; swallows the rest of the input.
    #[token("/*", |lex| lex.bump(lex.remainder().len()))]
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
            UnterminatedCharClass => Some(DiagnosticKind::UnterminatedCharClass),
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
    pub const EXPR_FIRST: TokenSet<SyntaxKind> =
        set(&[Name, Literal, CharCode, CharClass, ParenOpen]);
}
