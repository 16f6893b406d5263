//! Tokens of classic BNF (`<name> ::= expr`).

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

    /// `<rule name>`. The name may contain spaces and hyphens.
    #[regex(r"<[^<>\n]*>")]
    RuleName,

    #[regex(r"<[^<>\n]*", allow_greedy = true)]
    UnterminatedRuleName,

    #[regex(r#""[^"\n]*""#)]
    #[regex(r"'[^'\n]*'")]
    Literal,

    #[regex(r#""[^"\n]*"#, allow_greedy = true)]
    #[regex(r"'[^'\n]*", allow_greedy = true)]
    UnterminatedString,

    #[regex(r"[ \t\r]+")]
    Whitespace,

    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

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
        matches!(self, Whitespace | Newline | LineComment)
    }

    #[inline]
    fn bit(self) -> u32 {
        self as u32
    }

    fn lex_error(self) -> Option<DiagnosticKind> {
        match self {
            UnterminatedString => Some(DiagnosticKind::UnterminatedString),
            UnterminatedRuleName => Some(DiagnosticKind::UnterminatedRuleName),
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

    /// FIRST set of an atom.
    pub const EXPR_FIRST: TokenSet<SyntaxKind> = set(&[RuleName, Literal, ParenOpen]);

    pub const POSTFIX: TokenSet<SyntaxKind> = set(&[Question, Star, Plus]);
}
