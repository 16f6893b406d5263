use grammatch_compiler::{Dialect, compile};
use grammatch_core::Colors;
use indoc::indoc;

use crate::engine::{PrintTracer, VM, Verbosity};

fn trace(source: &str, input: &str, verbosity: Verbosity) -> String {
    let rules = compile(Dialect::W3c, source).unwrap();
    let mut tracer = PrintTracer::new(input, verbosity, Colors::OFF);
    VM::builder(&rules, input)
        .build()
        .execute_with(None, &mut tracer)
        .unwrap();
    tracer.lines().join("\n")
}

#[test]
fn rule_enter_and_exit() {
    let source = indoc! {r#"
    num ::= digit+
    digit ::= "0" | "1"
    "#};

    insta::assert_snapshot!(trace(source, "10", Verbosity::Default), @r#"
    num @0
      digit @0
      ✓ digit 0..1 "1"
      digit @1
      ✓ digit 1..2 "0"
      digit @2
      ✗ digit
    ✓ num 0..2 "10"
    12 steps
    "#);
}

#[test]
fn verbose_shows_terminals() {
    insta::assert_snapshot!(trace(r#"s ::= "a" | "b""#, "b", Verbosity::Verbose), @r#"
    s @0
      · "a" @0 failed
      · "b" 0..1
    ✓ s 0..1 "b"
    3 steps
    "#);
}

#[test]
fn guard_hits_are_reported() {
    insta::assert_snapshot!(trace(r#"r ::= r | "x""#, "x", Verbosity::Default), @r#"
    r @0
      ↺ r @0 already active
    ✓ r 0..1 "x"
    3 steps
    "#);
}

#[test]
fn end_of_input_is_named() {
    insta::assert_snapshot!(trace(r#"s ::= "a" EOF"#, "ab", Verbosity::Verbose), @r#"
    s @0
      · "a" 0..1
      · end of input @1 failed
    ✗ s
    3 steps
    "#);
}

#[test]
fn long_matches_are_truncated() {
    let input = "a".repeat(30);
    let output = trace("s ::= [a-z]+", &input, Verbosity::Default);

    let exit = output.lines().nth(1).unwrap();
    insta::assert_snapshot!(exit, @r#"✓ s 0..30 "aaaaaaaaaaaaaaaaaaaaaaa…""#);
}

#[test]
fn colors_wrap_rule_names() {
    let rules = compile(Dialect::W3c, r#"s ::= "a""#).unwrap();
    let mut tracer = PrintTracer::new("a", Verbosity::Default, Colors::ON);
    VM::builder(&rules, "a")
        .build()
        .execute_with(None, &mut tracer)
        .unwrap();

    assert_eq!(tracer.lines()[0], "\x1b[34ms\x1b[0m @0");
}
