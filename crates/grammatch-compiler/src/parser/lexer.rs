//! Lexer plumbing shared by the dialect lexers.
//!
//! Each dialect derives its own `logos` token enum; this module turns any of
//! them into a flat vector of span-based tokens. Text is sliced from the
//! source only when needed.
//!
//! ## Error handling
//!
//! Consecutive characters no token accepts are coalesced into one garbage
//! token rather than one error per character.

use std::fmt::Debug;
use std::ops::Range;

use logos::Logos;
use rowan::TextRange;

use crate::diagnostics::DiagnosticKind;

/// Token kind of one dialect.
pub trait TokenKind: Copy + Eq + Debug {
    /// Kind given to coalesced unrecognized input.
    const GARBAGE: Self;
    /// Kind reported past the last token.
    const EOF: Self;

    fn is_trivia(self) -> bool;

    /// Bit position in a [`TokenSet`](super::TokenSet). Must be below 64.
    fn bit(self) -> u32;

    /// Diagnostic for tokens that only exist to describe malformed input.
    fn lex_error(self) -> Option<DiagnosticKind> {
        None
    }
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<K> {
    pub kind: K,
    pub span: TextRange,
}

impl<K> Token<K> {
    #[inline]
    pub fn new(kind: K, span: TextRange) -> Self {
        Self { kind, span }
    }
}

pub(crate) fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes source into a vector of span-based tokens.
pub fn lex<'s, K>(source: &'s str) -> Vec<Token<K>>
where
    K: TokenKind + Logos<'s, Source = str>,
    <K as Logos<'s>>::Extras: Default,
{
    let mut tokens = Vec::new();
    let mut lexer = K::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(K::GARBAGE, range_to_text_range(start..end)));
                }
                tokens.push(Token::new(kind, range_to_text_range(lexer.span())));
            }
            Some(Err(_)) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        K::GARBAGE,
                        range_to_text_range(start..source.len()),
                    ));
                }
                break;
            }
        }
    }

    tokens
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'q, K>(source: &'q str, token: &Token<K>) -> &'q str {
    &source[Range::<usize>::from(token.span)]
}
