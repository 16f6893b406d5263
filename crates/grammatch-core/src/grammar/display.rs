//! Normalized W3C-like notation for the IR.
//!
//! Parentheses are emitted only where precedence requires them. Literals that
//! W3C quotes cannot hold (control characters, both quote kinds) are split
//! into quoted runs and `#xHH` codes, so the output always compiles back to
//! rules that print the same and match the same input.

use std::fmt::{self, Display, Formatter, Write as _};

use super::expr::{CharClass, ClassItem, Expr};
use super::rule_set::{Rule, RuleSet};

const PREC_CHOICE: u8 = 0;
const PREC_SEQUENCE: u8 = 1;
const PREC_DIFFERENCE: u8 = 2;
const PREC_POSTFIX: u8 = 3;
const PREC_ATOM: u8 = 4;

/// One spelling unit of a literal.
enum Piece<'a> {
    /// A run of text and the quote that can enclose it.
    Quoted(&'a str, char),
    Code(char),
}

fn quoted(run: &str, double: bool) -> Piece<'_> {
    Piece::Quoted(run, if double { '\'' } else { '"' })
}

fn literal_pieces(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let (mut double, mut single) = (false, false);
    for (i, c) in text.char_indices() {
        let breaks = c.is_control() || (c == '"' && single) || (c == '\'' && double);
        if breaks && start < i {
            pieces.push(quoted(&text[start..i], double));
            start = i;
            (double, single) = (false, false);
        }
        if c.is_control() {
            pieces.push(Piece::Code(c));
            start = i + c.len_utf8();
            continue;
        }
        double |= c == '"';
        single |= c == '\'';
    }
    if start < text.len() || pieces.is_empty() {
        pieces.push(quoted(&text[start..], double));
    }
    pieces
}

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Literal { text, .. } if literal_pieces(text).len() > 1 => PREC_SEQUENCE,
        Expr::Alternation { .. } => PREC_CHOICE,
        Expr::Sequence { items } if items.is_empty() => PREC_ATOM,
        Expr::Sequence { .. } => PREC_SEQUENCE,
        Expr::Difference { .. } => PREC_DIFFERENCE,
        Expr::Repetition { .. } => PREC_POSTFIX,
        Expr::Literal { .. }
        | Expr::CharClass(_)
        | Expr::Reference { .. }
        | Expr::Group { .. }
        | Expr::EndOfInput => PREC_ATOM,
    }
}

fn write_at(f: &mut Formatter<'_>, expr: &Expr, min: u8) -> fmt::Result {
    if precedence(expr) < min {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal {
                text,
                case_sensitive,
            } => {
                for (i, piece) in literal_pieces(text).into_iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    match piece {
                        Piece::Code(c) => write!(f, "#x{:X}", c as u32)?,
                        Piece::Quoted(run, quote) => {
                            if !case_sensitive {
                                f.write_char('^')?;
                            }
                            write!(f, "{quote}{run}{quote}")?;
                        }
                    }
                }
                Ok(())
            }
            Expr::CharClass(class) => write!(f, "{class}"),
            Expr::Reference { name } => f.write_str(name),
            Expr::Sequence { items } if items.is_empty() => f.write_str("()"),
            Expr::Sequence { items } => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    write_at(f, item, PREC_DIFFERENCE)?;
                }
                Ok(())
            }
            Expr::Alternation { options } => {
                for (i, option) in options.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write_at(f, option, PREC_SEQUENCE)?;
                }
                Ok(())
            }
            Expr::Repetition { inner, min, max } => {
                write_at(f, inner, PREC_ATOM)?;
                match (min, max) {
                    (0, Some(1)) => f.write_char('?'),
                    (0, None) => f.write_char('*'),
                    (1, None) => f.write_char('+'),
                    (n, None) => write!(f, "{{{n},}}"),
                    (n, Some(m)) if n == m => write!(f, "{{{n}}}"),
                    (n, Some(m)) => write!(f, "{{{n},{m}}}"),
                }
            }
            Expr::Group { inner } => write!(f, "({inner})"),
            Expr::Difference { base, excluded } => {
                write_at(f, base, PREC_POSTFIX)?;
                f.write_str(" - ")?;
                write_at(f, excluded, PREC_POSTFIX)
            }
            Expr::EndOfInput => f.write_str("EOF"),
        }
    }
}

fn write_class_char(f: &mut Formatter<'_>, c: char) -> fmt::Result {
    if matches!(c, ']' | '-' | '^' | '[' | '#') || c.is_control() || c.is_whitespace() {
        write!(f, "#x{:X}", c as u32)
    } else {
        f.write_char(c)
    }
}

impl Display for CharClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        if self.negated {
            f.write_char('^')?;
        }
        for item in &self.items {
            match *item {
                ClassItem::Char(c) => write_class_char(f, c)?,
                ClassItem::Range(lo, hi) => {
                    write_class_char(f, lo)?;
                    f.write_char('-')?;
                    write_class_char(f, hi)?;
                }
            }
        }
        f.write_char(']')
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ::= {}", self.name, self.expr)
    }
}

impl Display for RuleSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.iter().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}
