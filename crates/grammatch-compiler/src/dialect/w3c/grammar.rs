//! Productions of the W3C notation.
//!
//! ```text
//! grammar  = rule*
//! rule     = NAME "::=" choice
//! choice   = sequence ("|" sequence)*
//! sequence = diff+
//! diff     = item ("-" item)?
//! item     = primary ("?" | "*" | "+" | "{" INT ("," INT?)? "}")*
//! primary  = NAME | STRING | CHARCODE | CHARCLASS | "(" choice ")"
//! ```
//!
//! A rule body has no terminator: it ends where the next `NAME ::=` begins.

use grammatch_core::Expr;
use rowan::{TextRange, TextSize};

use super::lexer::SyntaxKind;
use super::lexer::token_sets::EXPR_FIRST;
use crate::diagnostics::DiagnosticKind;
use crate::dialect::missing;
use crate::escape;
use crate::parser::{Parser, token_text};

impl Parser<'_, SyntaxKind> {
    pub(crate) fn parse_grammar(&mut self) {
        while !self.should_stop() {
            if self.at_rule_head() {
                self.parse_rule();
                continue;
            }

            if self.currently_is(SyntaxKind::Name) {
                let name = self.current_text();
                self.error_msg(
                    DiagnosticKind::ExpectedDefinition,
                    format!("`{name}` is not followed by `::=`"),
                );
            } else {
                self.error_and_bump_unexpected("expected a rule like `name ::= ...`");
            }
            self.skip_while_not(Self::at_rule_head);
        }
    }

    /// LL(2): `NAME ::=` starts a rule and ends the previous one.
    fn at_rule_head(&mut self) -> bool {
        self.currently_is(SyntaxKind::Name) && self.next_is(SyntaxKind::Define)
    }

    fn at_expr_start(&mut self) -> bool {
        self.currently_is_one_of(EXPR_FIRST) && !self.at_rule_head()
    }

    fn parse_rule(&mut self) {
        let name_token = self.bump();
        let name = token_text(self.source, &name_token).to_string();
        self.assert_current(SyntaxKind::Define);
        self.bump();

        let expr = if self.at_expr_start() {
            self.parse_choice()
        } else {
            self.error_missing_expression(format!("after `{name} ::=`"));
            missing()
        };

        self.define_rule(name, name_token.span, expr);
    }

    fn parse_choice(&mut self) -> Expr {
        let mut options = vec![self.parse_sequence()];

        while self.eat(SyntaxKind::Pipe) {
            if !self.at_expr_start() {
                self.error_missing_expression("after `|`");
                break;
            }
            options.push(self.parse_sequence());
        }

        Expr::alternation(options)
    }

    fn parse_sequence(&mut self) -> Expr {
        let mut items = Vec::new();
        while !self.should_stop() && self.at_expr_start() {
            items.push(self.parse_difference());
        }
        Expr::sequence(items)
    }

    fn parse_difference(&mut self) -> Expr {
        let base = self.parse_item();

        if !self.eat(SyntaxKind::Minus) {
            return base;
        }
        if !self.at_expr_start() {
            self.error_missing_expression("after `-`");
            return base;
        }

        let excluded = self.parse_item();
        Expr::difference(base, excluded)
    }

    fn parse_item(&mut self) -> Expr {
        let mut expr = self.parse_primary();

        loop {
            expr = match self.current() {
                SyntaxKind::Question => {
                    self.bump();
                    Expr::optional(expr)
                }
                SyntaxKind::Star => {
                    self.bump();
                    Expr::zero_or_more(expr)
                }
                SyntaxKind::Plus => {
                    self.bump();
                    Expr::one_or_more(expr)
                }
                SyntaxKind::BraceOpen => self.parse_bounds(expr),
                _ => return expr,
            };
        }
    }

    /// `{n}`, `{n,}` or `{n,m}` after an item.
    fn parse_bounds(&mut self, inner: Expr) -> Expr {
        let open = self.bump().span;

        let Some(min) = self.parse_count() else {
            return inner;
        };
        let max = if self.eat(SyntaxKind::Comma) {
            if self.currently_is(SyntaxKind::Int) {
                match self.parse_count() {
                    Some(max) => Some(max),
                    None => return inner,
                }
            } else {
                None
            }
        } else {
            Some(min)
        };

        if !self.eat(SyntaxKind::BraceClose) {
            let found = self.found();
            self.error_unclosed_delimiter(
                DiagnosticKind::UnclosedBounds,
                found,
                "bounds started here",
                open,
            );
            return inner;
        }

        if let Some(max) = max
            && max < min
        {
            let end = self.last_non_trivia_end().unwrap_or(open.end());
            self.error_at(
                DiagnosticKind::InvalidRepetitionBounds,
                TextRange::new(open.start(), end),
                format!("maximum {max} is below minimum {min}"),
            );
        }

        Expr::repeat(inner, min, max)
    }

    fn parse_count(&mut self) -> Option<u32> {
        if !self.currently_is(SyntaxKind::Int) {
            let found = self.found();
            self.error_msg(
                DiagnosticKind::InvalidRepetitionBounds,
                format!("expected a count, {found}"),
            );
            return None;
        }

        let token = self.bump();
        let text = token_text(self.source, &token);
        match text.parse::<u32>() {
            Ok(count) => Some(count),
            Err(_) => {
                self.error_at(
                    DiagnosticKind::InvalidRepetitionBounds,
                    token.span,
                    format!("`{text}` is too large"),
                );
                None
            }
        }
    }

    fn parse_primary(&mut self) -> Expr {
        match self.current() {
            SyntaxKind::Name => {
                let token = self.bump();
                let name = token_text(self.source, &token);
                self.reference(name, token.span)
            }
            SyntaxKind::Literal => {
                let token = self.bump();
                let text = token_text(self.source, &token);
                Expr::literal(&text[1..text.len() - 1])
            }
            SyntaxKind::CharCode => {
                let token = self.bump();
                let text = token_text(self.source, &token);
                match escape::char_code(text) {
                    Ok(c) => Expr::literal(c),
                    Err(err) => {
                        self.report_decode_error(err, token.span.start());
                        missing()
                    }
                }
            }
            SyntaxKind::CharClass => {
                let token = self.bump();
                let text = token_text(self.source, &token);
                match escape::char_class(&text[1..text.len() - 1]) {
                    Ok(class) => Expr::CharClass(class),
                    Err(err) => {
                        self.report_decode_error(err, token.span.start() + TextSize::from(1));
                        missing()
                    }
                }
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
            self.parse_choice()
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
