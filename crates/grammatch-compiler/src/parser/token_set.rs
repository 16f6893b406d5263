use std::marker::PhantomData;

use super::lexer::TokenKind;

/// 64-bit bitset of token kinds for O(1) membership testing.
///
/// Dialects build their constant sets with a `const fn` over their own enum
/// and hand the bits to [`TokenSet::from_bits`].
pub struct TokenSet<K> {
    bits: u64,
    _kind: PhantomData<K>,
}

impl<K> Clone for TokenSet<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for TokenSet<K> {}

impl<K> TokenSet<K> {
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self {
            bits,
            _kind: PhantomData,
        }
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self::from_bits(self.bits | other.bits)
    }
}

impl<K: TokenKind> TokenSet<K> {
    #[inline]
    pub fn contains(&self, kind: K) -> bool {
        let bit = kind.bit();
        bit < 64 && self.bits & (1 << bit) != 0
    }
}

impl<K> std::fmt::Debug for TokenSet<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TokenSet({:#x})", self.bits)
    }
}
