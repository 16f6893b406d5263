use rowan::TextRange;

use super::{Parser, lex};
use crate::diagnostics::DiagnosticKind;
use crate::dialect::w3c::SyntaxKind;

fn parser(source: &str) -> Parser<'_, SyntaxKind> {
    Parser::new(source, lex(source))
}

#[test]
fn lookahead_skips_trivia() {
    let mut p = parser("a /* c */ ::= // x\n b");

    assert_eq!(p.current(), SyntaxKind::Name);
    assert_eq!(p.peek_nth(1), SyntaxKind::Define);
    assert_eq!(p.peek_nth(2), SyntaxKind::Name);
    assert_eq!(p.peek_nth(3), SyntaxKind::Eof);
    assert!(p.next_is(SyntaxKind::Define));
}

#[test]
fn bump_and_eat() {
    let mut p = parser("a ::= b");

    let name = p.bump();
    assert_eq!(name.span, TextRange::new(0.into(), 1.into()));
    assert!(!p.eat(SyntaxKind::Pipe));
    assert!(p.eat(SyntaxKind::Define));
    assert_eq!(p.current_text(), "b");
    assert_eq!(p.found(), "found `b`");
    p.bump();
    assert!(p.eof());
    assert_eq!(p.found(), "reached end of input");
    assert_eq!(p.current_span(), TextRange::empty(7.into()));
    assert_eq!(p.last_non_trivia_end(), Some(7.into()));
}

#[test]
fn one_diagnostic_per_position() {
    let mut p = parser("a b");

    p.error(DiagnosticKind::UnexpectedToken);
    p.error_msg(DiagnosticKind::ExpectedDefinition, "again");
    p.bump();
    p.error(DiagnosticKind::UnexpectedToken);

    let output = p.finish();
    assert_eq!(output.diagnostics.len(), 2);
}

#[test]
fn expect_reports_without_consuming() {
    let mut p = parser("a b");

    assert!(!p.expect(SyntaxKind::Define, "`::=`"));
    assert_eq!(p.current(), SyntaxKind::Name);
    assert_eq!(p.current_text(), "a");

    let output = p.finish();
    insta::assert_snapshot!(
        output.diagnostics.printer().render(),
        @"error at 0..1: unexpected token: expected `::=`"
    );
}

#[test]
fn garbage_and_lexical_errors_get_their_own_kind() {
    let mut p = parser("$ \"x");

    p.error_and_bump_unexpected("ignored");
    p.error_and_bump_unexpected("ignored");
    assert!(p.eof());

    let output = p.finish();
    insta::assert_snapshot!(output.diagnostics.printer().render(), @r"
    error at 0..1: unrecognized character `$`
    error at 2..4: unterminated string
    ");
}

#[test]
fn recursion_fuel_aborts_once() {
    let mut p = parser("((").with_recursion_fuel(Some(1));

    assert!(p.enter_recursion());
    p.bump();
    assert!(!p.enter_recursion());
    assert!(!p.enter_recursion());
    assert!(p.is_aborted());
    assert!(p.should_stop());

    let output = p.finish();
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(
        output.diagnostics.first_error().unwrap().kind(),
        DiagnosticKind::NestingTooDeep
    );
}

#[test]
fn records_rules_and_references() {
    let mut p = parser("a ::= b");

    let name = p.bump();
    p.bump();
    let b = p.bump();
    let expr = p.reference("b", b.span);
    p.define_rule("a".to_string(), name.span, expr);

    let output = p.finish();
    assert_eq!(output.rules.len(), 1);
    assert_eq!(output.rules[0].name, "a");
    assert_eq!(output.references[0].name, "b");
    assert_eq!(output.references[0].span, TextRange::new(6.into(), 7.into()));
}
