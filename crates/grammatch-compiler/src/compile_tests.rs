use indoc::indoc;

use crate::diagnostics::DiagnosticKind;
use crate::{Compiler, DEFAULT_RECURSION_FUEL, Dialect, compile};

#[test]
fn compiles_rules_in_source_order() {
    let rules = compile(Dialect::W3c, r#"digit ::= "0" | "1" | "2""#).unwrap();

    assert_eq!(rules.len(), 1);
    assert_eq!(rules.summary(), "1 rule: digit");
    assert_eq!(rules.default_start().unwrap().1.name, "digit");
}

#[test]
fn undefined_reference_names_the_rule() {
    let err = compile(Dialect::W3c, "a ::= b").unwrap_err();

    assert_eq!(err.dialect(), Dialect::W3c);
    assert_eq!(err.message(), "`b` is not defined");
    assert_eq!(err.offset(), 6);
    assert_eq!((err.line(), err.column()), (1, 7));
    insta::assert_snapshot!(err, @"W3C grammar error at 1:7: `b` is not defined");
}

#[test]
fn error_renders_against_source() {
    let source = "a ::= b";
    let err = compile(Dialect::W3c, source).unwrap_err();

    insta::assert_snapshot!(err.render(source), @r"
    error: `b` is not defined
      |
    1 | a ::= b
      |       ^
    ");
}

#[test]
fn position_counts_lines_and_characters() {
    let source = indoc! {r#"
    a ::= "é"
    b ::= "x" |
    "#};

    let err = compile(Dialect::W3c, source).unwrap_err();
    assert_eq!(err.line(), 3);
    assert_eq!(err.column(), 1);
    assert_eq!(err.message(), "expected an expression: after `|`");
}

#[test]
fn syntax_errors_hide_undefined_references() {
    let source = indoc! {r#"
    a = b , c ;
    b = "x"
    "#};

    let err = compile(Dialect::Custom, source).unwrap_err();
    let kinds: Vec<DiagnosticKind> = err.diagnostics().iter().map(|d| d.kind()).collect();
    assert_eq!(kinds, [DiagnosticKind::ExpectedTerminator]);
}

#[test]
fn several_errors_are_kept() {
    let source = indoc! {r#"
    a ::= b
    c ::= d
    "#};

    let err = compile(Dialect::W3c, source).unwrap_err();
    insta::assert_snapshot!(err.diagnostics().printer().render(), @r"
    error at 6..7: `b` is not defined
    error at 14..15: `d` is not defined
    ");
}

#[test]
fn empty_grammar_is_a_warning() {
    let (rules, diagnostics) = Compiler::new(Dialect::W3c)
        .compile_with_diagnostics("// nothing here\n")
        .unwrap();

    assert!(rules.is_empty());
    assert!(!diagnostics.has_errors());
    insta::assert_snapshot!(diagnostics.printer().render(), @"warning at 0..0: grammar defines no rules");
}

#[test]
fn compiler_defaults() {
    let compiler = Compiler::new(Dialect::Bnf);
    assert_eq!(compiler.dialect(), Dialect::Bnf);
    assert_eq!(DEFAULT_RECURSION_FUEL, 256);
}

#[test]
fn unlimited_nesting() {
    let depth = 300;
    let source = format!("a ::= {}\"x\"{}", "(".repeat(depth), ")".repeat(depth));

    assert!(Compiler::new(Dialect::W3c).compile(&source).is_err());
    assert!(
        Compiler::new(Dialect::W3c)
            .with_recursion_fuel(None)
            .compile(&source)
            .is_ok()
    );
}

#[test]
fn printed_rules_compile_back() {
    let source = r#"nl = "\n" ; quote = "say \"hi\", it's\tok" ;"#;
    let rules = compile(Dialect::Custom, source).unwrap();
    let printed = rules.to_string();

    insta::assert_snapshot!(printed, @r#"
    nl ::= #xA
    quote ::= 'say "hi", it' "'s" #x9 "ok"
    "#);

    let again = compile(Dialect::W3c, &printed).unwrap();
    assert_eq!(again.to_string(), printed);
    assert_eq!(again.get("nl"), rules.get("nl"));
}
