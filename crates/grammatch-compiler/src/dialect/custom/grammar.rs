//! Productions of the ISO-style notation.
//!
//! ```text
//! grammar  = rule*
//! rule     = NAME "=" choice ";"
//! choice   = sequence ("|" sequence)*
//! sequence = term ("," term)*
//! term     = factor ("-" factor)?
//! factor   = (INT "*")? primary
//! primary  = NAME | STRING | "^" STRING
//!          | "[" choice "]" | "{" choice "}" | "(" choice ")"
//! ```
//!
//! Rules end with `;`. A missing `;` is reported and parsing resumes at the
//! next `NAME =`.

use grammatch_core::Expr;
use rowan::TextSize;

use super::lexer::SyntaxKind;
use super::lexer::token_sets::{EXPR_FIRST, PRIMARY_FIRST};
use crate::diagnostics::DiagnosticKind;
use crate::dialect::missing;
use crate::escape;
use crate::parser::{Parser, token_text};

/// How a bracketed primary wraps its body.
#[derive(Clone, Copy)]
enum Bracket {
    Group,
    Optional,
    Repetition,
}

impl Bracket {
    fn close(self) -> SyntaxKind {
        match self {
            Bracket::Group => SyntaxKind::ParenClose,
            Bracket::Optional => SyntaxKind::BracketClose,
            Bracket::Repetition => SyntaxKind::BraceClose,
        }
    }

    fn unclosed(self) -> DiagnosticKind {
        match self {
            Bracket::Group => DiagnosticKind::UnclosedGroup,
            Bracket::Optional => DiagnosticKind::UnclosedOptional,
            Bracket::Repetition => DiagnosticKind::UnclosedRepetition,
        }
    }

    fn spelling(self) -> &'static str {
        match self {
            Bracket::Group => "( )",
            Bracket::Optional => "[ ]",
            Bracket::Repetition => "{ }",
        }
    }

    fn started_here(self) -> &'static str {
        match self {
            Bracket::Group => "group started here",
            Bracket::Optional => "optional part started here",
            Bracket::Repetition => "repetition started here",
        }
    }

    fn wrap(self, inner: Expr) -> Expr {
        match self {
            Bracket::Group => Expr::group(inner),
            Bracket::Optional => Expr::optional(inner),
            Bracket::Repetition => Expr::zero_or_more(inner),
        }
    }
}

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
                    format!("`{name}` is not followed by `=`"),
                );
            } else {
                self.error_and_bump_unexpected("expected a rule like `name = ... ;`");
            }
            self.recover_to_next_rule();
        }
    }

    fn at_rule_head(&mut self) -> bool {
        self.currently_is(SyntaxKind::Name) && self.next_is(SyntaxKind::Define)
    }

    fn at_expr_start(&mut self) -> bool {
        self.currently_is_one_of(EXPR_FIRST)
    }

    /// Skips to the next rule head, consuming a `;` met on the way.
    fn recover_to_next_rule(&mut self) {
        self.skip_while_not(|p| p.at_rule_head() || p.currently_is(SyntaxKind::Semicolon));
        self.eat(SyntaxKind::Semicolon);
    }

    fn parse_rule(&mut self) {
        let name_token = self.bump();
        let name = token_text(self.source, &name_token).to_string();
        self.assert_current(SyntaxKind::Define);
        self.bump();

        let expr = if self.at_expr_start() {
            self.parse_choice()
        } else {
            self.error_missing_expression(format!("after `{name} =`"));
            missing()
        };

        if !self.eat(SyntaxKind::Semicolon) && !self.is_aborted() {
            let found = self.found();
            self.error_missing(DiagnosticKind::ExpectedTerminator, ";", Some(found));
            self.recover_to_next_rule();
        }

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
        let mut items = vec![self.parse_term()];

        loop {
            if self.should_stop() {
                break;
            }
            if self.eat(SyntaxKind::Comma) {
                if !self.at_expr_start() {
                    self.error_missing_expression("after `,`");
                    break;
                }
                items.push(self.parse_term());
                continue;
            }
            if self.at_expr_start() && !self.at_rule_head() {
                // `a b` where `a , b` was meant: report and keep going.
                self.error_missing(DiagnosticKind::ExpectedSeparator, ",", None);
                items.push(self.parse_term());
                continue;
            }
            break;
        }

        Expr::sequence(items)
    }

    fn parse_term(&mut self) -> Expr {
        let base = self.parse_factor();

        if !self.eat(SyntaxKind::Minus) {
            return base;
        }
        if !self.at_expr_start() {
            self.error_missing_expression("after `-`");
            return base;
        }

        let excluded = self.parse_factor();
        Expr::difference(base, excluded)
    }

    fn parse_factor(&mut self) -> Expr {
        if !self.currently_is(SyntaxKind::Int) {
            return self.parse_primary();
        }

        let token = self.bump();
        let text = token_text(self.source, &token);
        let count = match text.parse::<u32>() {
            Ok(count) => Some(count),
            Err(_) => {
                self.error_at(
                    DiagnosticKind::InvalidRepetitionBounds,
                    token.span,
                    format!("`{text}` is too large"),
                );
                None
            }
        };

        if !self.expect(SyntaxKind::Star, "`*` after a repetition count") {
            return missing();
        }
        if !self.currently_is_one_of(PRIMARY_FIRST) {
            self.error_missing_expression(format!("after `{text} *`"));
            return missing();
        }

        let inner = self.parse_primary();
        match count {
            Some(n) => Expr::repeat(inner, n, Some(n)),
            None => inner,
        }
    }

    fn parse_primary(&mut self) -> Expr {
        match self.current() {
            SyntaxKind::Name => {
                let token = self.bump();
                let name = token_text(self.source, &token);
                self.reference(name, token.span)
            }
            SyntaxKind::Literal => self.parse_literal(true),
            SyntaxKind::Caret => {
                self.bump();
                if self.currently_is(SyntaxKind::Literal) {
                    self.parse_literal(false)
                } else {
                    let found = self.found();
                    self.error_msg(
                        DiagnosticKind::UnexpectedToken,
                        format!("expected a string after `^`, {found}"),
                    );
                    missing()
                }
            }
            SyntaxKind::ParenOpen => self.parse_bracketed(Bracket::Group),
            SyntaxKind::BracketOpen => self.parse_bracketed(Bracket::Optional),
            SyntaxKind::BraceOpen => self.parse_bracketed(Bracket::Repetition),
            _ => {
                self.error_and_bump_unexpected("expected an expression");
                missing()
            }
        }
    }

    fn parse_literal(&mut self, case_sensitive: bool) -> Expr {
        let token = self.bump();
        let text = token_text(self.source, &token);
        match escape::unescape(&text[1..text.len() - 1]) {
            Ok(decoded) if case_sensitive => Expr::literal(decoded),
            Ok(decoded) => Expr::literal_ignore_case(decoded),
            Err(err) => {
                self.report_decode_error(err, token.span.start() + TextSize::from(1));
                missing()
            }
        }
    }

    fn parse_bracketed(&mut self, bracket: Bracket) -> Expr {
        let open = self.current_span();
        if !self.enter_recursion() {
            return missing();
        }
        self.bump();

        let inner = if self.at_expr_start() {
            self.parse_choice()
        } else {
            self.error_missing_expression(format!("inside `{}`", bracket.spelling()));
            missing()
        };

        if !self.eat(bracket.close()) && !self.is_aborted() {
            let found = self.found();
            self.error_unclosed_delimiter(bracket.unclosed(), found, bracket.started_here(), open);
        }

        self.exit_recursion();
        bracket.wrap(inner)
    }
}
