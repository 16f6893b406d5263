//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Unified flags: every command accepts every other command's flags
//! 2. Help visibility: hidden flags don't appear in --help
//! 3. Positional shifting: -g shifts the first positional to input
//! 4. Params extraction: correct fields are extracted from ArgMatches

use std::path::PathBuf;

use grammatch_lib::{Dialect, Verbosity};

use super::*;
use crate::cli::commands::{
    ast_command, check_command, dump_command, exec_command, trace_command,
};
use crate::commands::trace::TraceArgs;

#[test]
fn check_accepts_match_flags() {
    let cmd = check_command();
    let result = cmd.try_get_matches_from([
        "check",
        "json.ebnf",
        "data.json",
        "--entry",
        "value",
        "--fuel",
        "10",
        "-v",
        "--spans",
    ]);
    assert!(
        result.is_ok(),
        "check should accept match flags: {:?}",
        result.err()
    );

    let m = result.unwrap();
    let params = CheckParams::from_matches(&m);
    assert_eq!(params.grammar_path, Some(PathBuf::from("json.ebnf")));
    assert_eq!(params.dialect, None);
}

#[test]
fn dump_extracts_json_flag() {
    let cmd = dump_command();
    let m = cmd
        .try_get_matches_from(["dump", "sql.iso", "--json", "--compact"])
        .unwrap();

    let params = DumpParams::from_matches(&m);
    assert!(params.json);
    assert_eq!(params.grammar_path, Some(PathBuf::from("sql.iso")));
}

#[test]
fn dialect_is_parsed() {
    let cmd = check_command();
    let m = cmd
        .try_get_matches_from(["check", "rules.txt", "--dialect", "bnf"])
        .unwrap();

    let params = CheckParams::from_matches(&m);
    assert_eq!(params.dialect, Some(Dialect::Bnf));
}

#[test]
fn unknown_dialect_is_rejected() {
    let cmd = check_command();
    let result = cmd.try_get_matches_from(["check", "rules.txt", "-d", "yacc"]);

    let err = result.unwrap_err();
    assert!(err.to_string().contains("unknown dialect `yacc`"));
}

#[test]
fn ast_extracts_positionals_and_spans() {
    let cmd = ast_command();
    let m = cmd
        .try_get_matches_from(["ast", "json.ebnf", "data.json", "--spans", "-e", "value"])
        .unwrap();

    let params = AstParams::from_matches(&m);
    assert_eq!(params.sources.grammar_path, Some(PathBuf::from("json.ebnf")));
    assert_eq!(params.sources.input_path, Some(PathBuf::from("data.json")));
    assert_eq!(params.entry.as_deref(), Some("value"));
    assert!(params.spans);
    assert_eq!(params.fuel, 1_000_000);
}

#[test]
fn grammar_text_shifts_positional_to_input() {
    let cmd = exec_command();
    let m = cmd
        .try_get_matches_from(["exec", "-g", "n ::= [0-9]+", "numbers.txt"])
        .unwrap();

    let params = ExecParams::from_matches(&m);
    assert_eq!(params.sources.grammar_path, None);
    assert_eq!(params.sources.grammar_text.as_deref(), Some("n ::= [0-9]+"));
    assert_eq!(params.sources.input_path, Some(PathBuf::from("numbers.txt")));
}

#[test]
fn no_shift_with_two_positionals() {
    let cmd = exec_command();
    let m = cmd
        .try_get_matches_from(["exec", "-g", "n ::= [0-9]+", "a.txt", "b.txt"])
        .unwrap();

    let params = ExecParams::from_matches(&m);
    assert_eq!(params.sources.grammar_path, Some(PathBuf::from("a.txt")));
    assert_eq!(params.sources.input_path, Some(PathBuf::from("b.txt")));
}

#[test]
fn exec_extracts_compact_and_fuel() {
    let cmd = exec_command();
    let m = cmd
        .try_get_matches_from(["exec", "g.bnf", "-i", "x", "--compact", "--fuel", "500"])
        .unwrap();

    let params = ExecParams::from_matches(&m);
    assert!(params.compact);
    assert_eq!(params.fuel, 500);
    assert_eq!(params.sources.input_text.as_deref(), Some("x"));
}

#[test]
fn trace_verbosity_levels() {
    let cmd = trace_command();
    let m = cmd
        .try_get_matches_from(["trace", "g.ebnf", "-i", "x", "-vv", "--json"])
        .unwrap();

    let params = TraceParams::from_matches(&m);
    assert_eq!(params.verbose, 2);

    let args: TraceArgs = params.into();
    assert_eq!(args.verbosity, Verbosity::Verbose);
}

#[test]
fn color_choice_is_parsed() {
    let cmd = ast_command();
    let m = cmd
        .try_get_matches_from(["ast", "g.ebnf", "--color", "never"])
        .unwrap();

    let params = AstParams::from_matches(&m);
    assert_eq!(params.color, ColorChoice::Never);
    assert!(!params.color.should_colorize());
}

#[test]
fn check_help_hides_match_flags() {
    let mut cmd = check_command();
    let help = cmd.render_help().to_string();

    assert!(help.contains("--dialect"));
    assert!(help.contains("--grammar"));
    assert!(!help.contains("--fuel"));
    assert!(!help.contains("--entry"));
    assert!(!help.contains("--spans"));
}

#[test]
fn exec_help_hides_ast_flags() {
    let mut cmd = exec_command();
    let help = cmd.render_help().to_string();

    assert!(help.contains("--compact"));
    assert!(help.contains("--entry"));
    assert!(!help.contains("--spans"));
    assert!(!help.contains("--json"));
}

#[test]
fn build_cli_requires_subcommand() {
    let result = build_cli().try_get_matches_from(["grammatch"]);
    assert!(result.is_err());
}
