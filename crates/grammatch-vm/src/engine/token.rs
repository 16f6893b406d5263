//! AST nodes produced by rule invocations.

use std::ops::Range;

use grammatch_core::Colors;
use serde::Serialize;

/// A successful match of a non-fragment rule.
///
/// Offsets are byte offsets into the matched input. Children are the
/// tokens of rules invoked inside this one, in input order; fragments
/// contribute their children directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Name of the rule that matched.
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub children: Vec<Token>,
}

impl Token {
    pub(crate) fn new(kind: &str, input: &str, span: Range<usize>, children: Vec<Token>) -> Self {
        Self {
            kind: kind.to_string(),
            text: input[span.clone()].to_string(),
            start: span.start,
            end: span.end,
            children,
        }
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// This token and all its descendants, depth-first, parents first.
    pub fn descendants(&self) -> impl Iterator<Item = &Token> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let token = stack.pop()?;
            stack.extend(token.children.iter().rev());
            Some(token)
        })
    }

    /// Indented tree, one token per line: `type "text"`, or `type start..end "text"`.
    pub fn dump(&self, spans: bool) -> String {
        self.dump_colored(spans, Colors::OFF)
    }

    /// Same as [`Token::dump`], with names, spans and text colored.
    pub fn dump_colored(&self, spans: bool, colors: Colors) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0, spans, colors);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize, spans: bool, c: Colors) {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!("{}{}{}", c.blue, self.kind, c.reset));
        if spans {
            out.push_str(&format!(" {}{}..{}{}", c.dim, self.start, self.end, c.reset));
        }
        out.push_str(&format!(" {}{:?}{}", c.green, self.text, c.reset));
        for child in &self.children {
            child.dump_into(out, depth + 1, spans, c);
        }
    }
}
