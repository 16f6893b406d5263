//! Expression tree of a rule body.

use serde::Serialize;

/// A grammar expression.
///
/// Closed set of matchable forms. Every dialect front-end lowers its own
/// syntax into these variants; the matcher dispatches on them one-to-one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    /// Exact text, optionally compared without regard to case.
    Literal { text: String, case_sensitive: bool },

    /// One character out of a set.
    CharClass(CharClass),

    /// Invocation of another rule, looked up by name at match time.
    Reference { name: String },

    Sequence { items: Vec<Expr> },

    /// Ordered choice: the first option that matches wins.
    Alternation { options: Vec<Expr> },

    /// Greedy repetition. `max == None` means unbounded.
    Repetition {
        inner: Box<Expr>,
        min: u32,
        max: Option<u32>,
    },

    Group { inner: Box<Expr> },

    /// `base` unless `excluded` matches at the same position.
    Difference {
        base: Box<Expr>,
        excluded: Box<Expr>,
    },

    /// Zero-width match at the end of input.
    EndOfInput,
}

impl Expr {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal {
            text: text.into(),
            case_sensitive: true,
        }
    }

    pub fn literal_ignore_case(text: impl Into<String>) -> Self {
        Self::Literal {
            text: text.into(),
            case_sensitive: false,
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference { name: name.into() }
    }

    /// Sequence of `items`, collapsed to the single item when there is only one.
    pub fn sequence(items: Vec<Expr>) -> Self {
        match <[Expr; 1]>::try_from(items) {
            Ok([item]) => item,
            Err(items) => Self::Sequence { items },
        }
    }

    /// Alternation of `options`, collapsed to the single option when there is only one.
    pub fn alternation(options: Vec<Expr>) -> Self {
        match <[Expr; 1]>::try_from(options) {
            Ok([option]) => option,
            Err(options) => Self::Alternation { options },
        }
    }

    pub fn repeat(inner: Expr, min: u32, max: Option<u32>) -> Self {
        Self::Repetition {
            inner: Box::new(inner),
            min,
            max,
        }
    }

    /// `inner?`
    pub fn optional(inner: Expr) -> Self {
        Self::repeat(inner, 0, Some(1))
    }

    /// `inner*`
    pub fn zero_or_more(inner: Expr) -> Self {
        Self::repeat(inner, 0, None)
    }

    /// `inner+`
    pub fn one_or_more(inner: Expr) -> Self {
        Self::repeat(inner, 1, None)
    }

    pub fn group(inner: Expr) -> Self {
        Self::Group {
            inner: Box::new(inner),
        }
    }

    pub fn difference(base: Expr, excluded: Expr) -> Self {
        Self::Difference {
            base: Box::new(base),
            excluded: Box::new(excluded),
        }
    }

    /// Calls `f` with the name of every rule referenced from this expression, in source order.
    pub fn for_each_reference<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            Expr::Reference { name } => f(name),
            Expr::Sequence { items: exprs } | Expr::Alternation { options: exprs } => {
                for expr in exprs {
                    expr.for_each_reference(f);
                }
            }
            Expr::Repetition { inner, .. } | Expr::Group { inner } => inner.for_each_reference(f),
            Expr::Difference { base, excluded } => {
                base.for_each_reference(f);
                excluded.for_each_reference(f);
            }
            Expr::Literal { .. } | Expr::CharClass(_) | Expr::EndOfInput => {}
        }
    }

    /// Rewrites references to `name` into [`Expr::EndOfInput`].
    pub fn replace_reference_with_end(&mut self, name: &str) {
        match self {
            Expr::Reference { name: n } if n == name => *self = Expr::EndOfInput,
            Expr::Sequence { items: exprs } | Expr::Alternation { options: exprs } => {
                for expr in exprs {
                    expr.replace_reference_with_end(name);
                }
            }
            Expr::Repetition { inner, .. } | Expr::Group { inner } => {
                inner.replace_reference_with_end(name)
            }
            Expr::Difference { base, excluded } => {
                base.replace_reference_with_end(name);
                excluded.replace_reference_with_end(name);
            }
            Expr::Reference { .. } | Expr::Literal { .. } | Expr::CharClass(_) | Expr::EndOfInput => {}
        }
    }
}

/// One item of a character class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ClassItem {
    Char(char),
    /// Inclusive range.
    Range(char, char),
}

impl ClassItem {
    #[inline]
    pub fn contains(self, c: char) -> bool {
        match self {
            ClassItem::Char(x) => x == c,
            ClassItem::Range(lo, hi) => lo <= c && c <= hi,
        }
    }
}

/// Set of characters, e.g. `[a-zA-Z_]` or `[^"]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CharClass {
    pub negated: bool,
    pub items: Vec<ClassItem>,
}

impl CharClass {
    pub fn new(items: Vec<ClassItem>) -> Self {
        Self {
            negated: false,
            items,
        }
    }

    pub fn negated(items: Vec<ClassItem>) -> Self {
        Self {
            negated: true,
            items,
        }
    }

    pub fn matches(&self, c: char) -> bool {
        let hit = self.items.iter().any(|item| item.contains(c));
        hit != self.negated
    }
}
