//! Productions of classic BNF.
//!
//! ```text
//! grammar = rule*
//! rule    = "<" name ">" "::=" expr
//! expr    = list ("|" list)*
//! list    = term+
//! term    = atom ("?" | "*" | "+")*
//! atom    = "<" name ">" | STRING | "(" expr ")"
//! ```
//!
//! Like the W3C notation, a rule body runs until the next `<name> ::=`.

use grammatch_core::Expr;
use rowan::TextRange;

use super::lexer::SyntaxKind;
use super::lexer::token_sets::{EXPR_FIRST, POSTFIX};
use crate::diagnostics::DiagnosticKind;
use crate::dialect::missing;
use crate::parser::{Parser, Token, token_text};

impl Parser<'_, SyntaxKind> {
    pub(crate) fn parse_grammar(&mut self) {
        while !self.should_stop() {
            if self.at_rule_head() {
                self.parse_rule();
                continue;
            }

            if self.currently_is(SyntaxKind::RuleName) {
                let name = self.current_text();
                self.error_msg(
                    DiagnosticKind::ExpectedDefinition,
                    format!("`{name}` is not followed by `::=`"),
                );
            } else {
                self.error_and_bump_unexpected("expected a rule like `<name> ::= ...`");
            }
            self.skip_while_not(Self::at_rule_head);
        }
    }

    /// LL(2): `<name> ::=` starts a rule and ends the previous one.
    fn at_rule_head(&mut self) -> bool {
        self.currently_is(SyntaxKind::RuleName) && self.next_is(SyntaxKind::Define)
    }

    fn at_expr_start(&mut self) -> bool {
        self.currently_is_one_of(EXPR_FIRST) && !self.at_rule_head()
    }

    /// Name inside `<...>`, trimmed. Reports an empty name.
    fn rule_name(&mut self, token: Token<SyntaxKind>) -> Option<String> {
        let text = token_text(self.source, &token);
        let name = text[1..text.len() - 1].trim();
        if name.is_empty() {
            self.error_at(
                DiagnosticKind::ExpectedRuleName,
                token.span,
                format!("`{text}` has no name"),
            );
            return None;
        }
        Some(name.to_string())
    }

    fn parse_rule(&mut self) {
        let name_token = self.bump();
        let name = self.rule_name(name_token);
        self.assert_current(SyntaxKind::Define);
        self.bump();

        let expr = if self.at_expr_start() {
            self.parse_expr()
        } else {
            let head = token_text(self.source, &name_token);
            self.error_missing_expression(format!("after `{head} ::=`"));
            missing()
        };

        if let Some(name) = name {
            self.define_rule(name, name_token.span, expr);
        }
    }

    fn parse_expr(&mut self) -> Expr {
        let mut options = vec![self.parse_list()];

        while self.eat(SyntaxKind::Pipe) {
            if !self.at_expr_start() {
                self.error_missing_expression("after `|`");
                break;
            }
            options.push(self.parse_list());
        }

        Expr::alternation(options)
    }

    fn parse_list(&mut self) -> Expr {
        let mut terms = Vec::new();
        while !self.should_stop() && self.at_expr_start() {
            terms.push(self.parse_term());
        }
        Expr::sequence(terms)
    }

    fn parse_term(&mut self) -> Expr {
        let mut expr = self.parse_atom();

        while self.currently_is_one_of(POSTFIX) {
            expr = match self.bump().kind {
                SyntaxKind::Question => Expr::optional(expr),
                SyntaxKind::Star => Expr::zero_or_more(expr),
                _ => Expr::one_or_more(expr),
            };
        }

        expr
    }

    fn parse_atom(&mut self) -> Expr {
        match self.current() {
            SyntaxKind::RuleName => {
                let token = self.bump();
                match self.rule_name(token) {
                    Some(name) => self.reference(&name, name_span(self.source, token)),
                    None => missing(),
                }
            }
            SyntaxKind::Literal => {
                let token = self.bump();
                let text = token_text(self.source, &token);
                Expr::literal(&text[1..text.len() - 1])
            }
            SyntaxKind::ParenOpen => self.parse_group(),
            _ => {
                self.error_and_bump_unexpected("expected an expression");
                missing()
            }
        }
    }

    fn parse_group(&mut self) -> Expr {
        let open = self.current_span();
        if !self.enter_recursion() {
            return missing();
        }
        self.bump();

        let inner = if self.at_expr_start() {
            self.parse_expr()
        } else {
            self.error_missing_expression("inside `( )`");
            missing()
        };

        if !self.eat(SyntaxKind::ParenClose) && !self.is_aborted() {
            let found = self.found();
            self.error_unclosed_delimiter(
                DiagnosticKind::UnclosedGroup,
                found,
                "group started here",
                open,
            );
        }

        self.exit_recursion();
        Expr::group(inner)
    }
}

/// Span of the name inside `<...>`, without the brackets and surrounding spaces.
fn name_span(source: &str, token: Token<SyntaxKind>) -> TextRange {
    let text = token_text(source, &token);
    let inner = &text[1..text.len() - 1];
    let leading = inner.len() - inner.trim_start().len();
    let start = u32::from(token.span.start()) as usize + 1 + leading;
    let end = start + inner.trim().len();
    TextRange::new((start as u32).into(), (end as u32).into())
}
