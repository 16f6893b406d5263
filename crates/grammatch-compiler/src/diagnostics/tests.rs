use rowan::TextRange;

use super::*;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedRuleName, range(0, 5))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    assert_eq!(
        diagnostics.first_error().unwrap().message(),
        "expected a rule name"
    );
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UndefinedReference, range(0, 5))
        .message("digit")
        .emit();

    assert_eq!(
        diagnostics.first_error().unwrap().message(),
        "`digit` is not defined"
    );
}

#[test]
fn warnings_are_not_errors() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::EmptyGrammar, TextRange::empty(0.into()))
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.warning_count(), 1);
    assert!(diagnostics.first_error().is_none());
}

#[test]
fn builder_with_related() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedGroup, range(0, 5))
        .message("primary")
        .related_to("related info", range(6, 10))
        .emit();

    let result = diagnostics.render("hello world!");
    insta::assert_snapshot!(result, @r"
    error: missing closing `)`; primary
      |
    1 | hello world!
      | ^^^^^ ---- related info
    ");
}

#[test]
fn builder_with_fix() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, range(0, 5))
        .message("fixable")
        .fix(Fix::new(range(0, 5), "fixed", "apply this fix"))
        .emit();

    let result = diagnostics.render("hello world");
    insta::assert_snapshot!(result, @r"
    error: unexpected token: fixable
      |
    1 | hello world
      | ^^^^^
      |
    help: apply this fix
      |
    1 - hello world
    1 + fixed world
      |
    ");
}

#[test]
fn plain_rendering_shows_insertions() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedSeparator, range(8, 11))
        .fix(Fix::insert(7.into(), ","))
        .emit();

    let result = diagnostics.printer().render();
    insta::assert_snapshot!(result, @"error at 8..11: expected `,` (fix: add `,` at 7) (hint: items of a sequence are separated by `,`)");
}

#[test]
fn caret_covers_a_whole_character() {
    let view = SourceView::new("aé");

    assert_eq!(view.caret_span(1..1), 1..3);
    assert_eq!(view.caret_span(3..3), 3..3);
    assert_eq!(view.caret_span(0..1), 0..1);
}

#[test]
fn printer_colored() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, range(0, 5))
        .message("test")
        .emit();

    let result = diagnostics.render_colored("hello", true);
    assert!(result.contains("test"));
    assert!(result.contains('\x1b'));
}

#[test]
fn printer_empty_diagnostics() {
    let diagnostics = Diagnostics::new();
    assert!(diagnostics.render("source").is_empty());
}

#[test]
fn printer_with_path() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UndefinedReference, range(0, 5))
        .message("hello")
        .emit();

    let result = diagnostics
        .printer()
        .source("hello world")
        .path("test.ebnf")
        .render();
    insta::assert_snapshot!(result, @r"
    error: `hello` is not defined
     --> test.ebnf:1:1
      |
    1 | hello world
      | ^^^^^
    ");
}

#[test]
fn printer_zero_width_span() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedExpression, TextRange::empty(0.into()))
        .message("zero width error")
        .emit();

    let result = diagnostics.render("hello");
    insta::assert_snapshot!(result, @r"
    error: expected an expression: zero width error
      |
    1 | hello
      | ^
    ");
}

#[test]
fn printer_multiple_diagnostics() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedGroup, range(0, 5))
        .message("first error")
        .emit();
    diagnostics
        .report(DiagnosticKind::UndefinedReference, range(6, 10))
        .message("worl")
        .emit();

    let result = diagnostics.render("hello world!");
    insta::assert_snapshot!(result, @r"
    error: missing closing `)`; first error
      |
    1 | hello world!
      | ^^^^^

    error: `worl` is not defined
      |
    1 | hello world!
      |       ^^^^
    ");
}

#[test]
fn plain_rendering_without_source() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateDefinition, range(10, 13))
        .message("num")
        .related_to("first defined here", range(0, 3))
        .emit();

    let result = diagnostics.printer().render();
    insta::assert_snapshot!(result, @"error at 10..13: `num` is already defined (related: first defined here at 0..3)");
}

#[test]
fn plain_rendering_includes_default_hint() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedTerminator, TextRange::empty(4.into()))
        .emit();

    let result = diagnostics.printer().render();
    insta::assert_snapshot!(result, @"error at 4..4: expected `;` (hint: every rule ends with `;`)");
}

#[test]
fn diagnostic_kind_suppression_order() {
    assert!(DiagnosticKind::UnclosedGroup.suppresses(&DiagnosticKind::UndefinedReference));
    assert!(DiagnosticKind::UnterminatedString.suppresses(&DiagnosticKind::UnclosedGroup));
    assert!(!DiagnosticKind::UnclosedGroup.suppresses(&DiagnosticKind::UnclosedGroup));
    assert!(!DiagnosticKind::UndefinedReference.suppresses(&DiagnosticKind::UnclosedGroup));
}

#[test]
fn diagnostic_kind_message_rendering() {
    assert_eq!(
        DiagnosticKind::UnclosedGroup.message(None),
        "missing closing `)`"
    );
    assert_eq!(
        DiagnosticKind::UnclosedGroup.message(Some("opened at 1:4")),
        "missing closing `)`; opened at 1:4"
    );
    assert_eq!(
        DiagnosticKind::ExpectedExpression.message(Some("after `|`")),
        "expected an expression: after `|`"
    );
    assert_eq!(
        DiagnosticKind::UndefinedReference.message(Some("b")),
        "`b` is not defined"
    );
}

#[test]
fn filtered_keeps_disjoint_spans() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedGroup, range(0, 5))
        .emit();
    diagnostics
        .report(DiagnosticKind::InvalidCharClass, range(10, 15))
        .emit();

    assert_eq!(diagnostics.filtered().len(), 2);
}

#[test]
fn filtered_suppresses_lower_priority_contained() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedGroup, range(0, 20))
        .emit();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, range(5, 15))
        .emit();

    let filtered = diagnostics.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(
        filtered.first_error().unwrap().kind(),
        DiagnosticKind::UnclosedGroup
    );
}

#[test]
fn filtered_root_cause_beats_structural_at_same_start() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedGroup, range(4, 9))
        .emit();
    diagnostics
        .report(DiagnosticKind::ExpectedExpression, range(4, 5))
        .emit();

    let filtered = diagnostics.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(
        filtered.first_error().unwrap().kind(),
        DiagnosticKind::ExpectedExpression
    );
}

#[test]
fn filtered_root_cause_wins_in_either_order() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedExpression, range(4, 5))
        .emit();
    diagnostics
        .report(DiagnosticKind::UnclosedGroup, range(4, 9))
        .emit();

    let filtered = diagnostics.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(
        filtered.first_error().unwrap().kind(),
        DiagnosticKind::ExpectedExpression
    );
}

#[test]
fn filtered_drops_undefined_references_after_syntax_errors() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UndefinedReference, range(0, 3))
        .message("abc")
        .emit();
    diagnostics
        .report(DiagnosticKind::ExpectedTerminator, TextRange::empty(12.into()))
        .emit();

    let filtered = diagnostics.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(
        filtered.first_error().unwrap().kind(),
        DiagnosticKind::ExpectedTerminator
    );
}

#[test]
fn filtered_keeps_undefined_references_alone() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UndefinedReference, range(0, 3))
        .emit();
    diagnostics
        .report(DiagnosticKind::UndefinedReference, range(5, 8))
        .emit();

    assert_eq!(diagnostics.filtered().len(), 2);
}
