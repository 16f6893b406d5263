use indoc::indoc;

use crate::{
    Colors, Dialect, Error, FuelLimits, Grammar, MatchStatus, PrintTracer, RuntimeError,
    Verbosity, match_text,
};

const NUMBERS: &str = indoc! {r#"
num ::= %digits
%digits ::= digit+
digit ::= [0-9]
"#};

#[test]
fn rule_names_skip_fragments() {
    let grammar = Grammar::compile(Dialect::W3c, NUMBERS).unwrap();

    assert_eq!(grammar.dialect(), Dialect::W3c);
    assert_eq!(grammar.rules().len(), 3);
    assert_eq!(grammar.rule_names(), vec!["num", "digit"]);
    assert_eq!(grammar.summary(), "3 rules: num, digit");
    assert!(grammar.warnings().is_empty());
}

#[test]
fn start_rule_defaults_to_first_non_fragment() {
    let grammar = Grammar::compile(Dialect::W3c, NUMBERS).unwrap();

    assert_eq!(grammar.start_rule(None).unwrap().name, "num");
    assert_eq!(grammar.start_rule(Some("digit")).unwrap().name, "digit");
    assert!(grammar.start_rule(Some("nope")).is_none());
}

#[test]
fn match_from_default_and_explicit_start() {
    let grammar = Grammar::compile(Dialect::W3c, NUMBERS).unwrap();

    let result = grammar.match_input(None, "42").unwrap();
    assert_eq!(MatchStatus::of(&result), MatchStatus::Matched);
    insta::assert_snapshot!(result.ast.unwrap().dump(true), @r#"
    num 0..2 "42"
      digit 0..1 "4"
      digit 1..2 "2"
    "#);

    let result = grammar.match_input(Some("digit"), "42").unwrap();
    assert_eq!(MatchStatus::of(&result), MatchStatus::Partial);
    assert_eq!(result.rest, "2");
}

#[test]
fn matcher_builder_applies_limits() {
    let grammar = Grammar::compile(Dialect::W3c, NUMBERS).unwrap();

    let err = grammar
        .matcher("123456")
        .entry("num")
        .limits(FuelLimits::new().exec_fuel(5))
        .run()
        .unwrap_err();
    assert_eq!(err, RuntimeError::ExecFuelExhausted(5));
}

#[test]
fn matcher_runs_with_tracer() {
    let grammar = Grammar::compile(Dialect::Bnf, r#"<greeting> ::= "hi""#).unwrap();
    let mut tracer = PrintTracer::new("hi", Verbosity::Default, Colors::OFF);

    let result = grammar.matcher("hi").run_with(&mut tracer).unwrap();
    assert!(result.is_complete());
    insta::assert_snapshot!(tracer.lines().join("\n"), @r#"
    greeting @0
    ✓ greeting 0..2 "hi"
    1 steps
    "#);
}

#[test]
fn empty_grammar_compiles_with_warning() {
    let grammar = Grammar::compile(Dialect::Custom, "(* nothing yet *)").unwrap();

    assert!(grammar.rules().is_empty());
    assert!(grammar.warnings().has_warnings());
    assert_eq!(
        grammar.match_input(None, "x").unwrap_err(),
        RuntimeError::EmptyRuleSet
    );
}

#[test]
fn match_text_reports_grammar_errors() {
    let err = match_text(Dialect::W3c, "a ::= b", None, "x").unwrap_err();

    assert!(matches!(err, Error::Grammar(_)));
    insta::assert_snapshot!(err, @"W3C grammar error at 1:7: `b` is not defined");
}

#[test]
fn match_text_reports_runtime_errors() {
    let err = match_text(Dialect::W3c, r#"a ::= "x""#, Some("b"), "x").unwrap_err();

    assert!(matches!(err, Error::Runtime(RuntimeError::UnknownRule(_))));
    insta::assert_snapshot!(err, @"rule `b` is not defined");
}

#[test]
fn status_of_each_outcome() {
    let grammar = Grammar::compile(Dialect::W3c, r#"a ::= "x" | "xy""#).unwrap();
    let status = |input| MatchStatus::of(&grammar.match_input(None, input).unwrap());

    assert_eq!(status("x"), MatchStatus::Matched);
    assert_eq!(status("xy"), MatchStatus::Partial);
    assert_eq!(status("y"), MatchStatus::NotMatched);
    assert!(status("x").is_matched());
    assert_eq!(MatchStatus::NotMatched.to_string(), "not matched");
}

#[test]
fn dialects_agree() {
    let sources = [
        (Dialect::W3c, r#"pair ::= item "," item  item ::= "a" | "b""#),
        (Dialect::Bnf, r#"<pair> ::= <item> "," <item>  <item> ::= "a" | "b""#),
        (Dialect::Custom, r#"pair = item, ",", item; item = "a" | "b";"#),
    ];

    let dumps: Vec<String> = sources
        .into_iter()
        .map(|(dialect, source)| {
            let result = match_text(dialect, source, None, "a,b").unwrap();
            result.ast.unwrap().dump(false)
        })
        .collect();

    insta::assert_snapshot!(dumps[0], @r#"
    pair "a,b"
      item "a"
      item "b"
    "#);
    assert_eq!(dumps[1], dumps[0], "BNF differs from W3C");
    assert_eq!(dumps[2], dumps[0], "ISO-style differs from W3C");
}
