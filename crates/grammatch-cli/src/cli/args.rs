//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.
//! The same arg definition is reused across commands with different
//! visibility settings (via `.hide(true)`).

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};
use grammatch_lib::Dialect;

/// Grammar file (positional).
pub fn grammar_path_arg() -> Arg {
    Arg::new("grammar_path")
        .value_name("GRAMMAR")
        .value_parser(value_parser!(PathBuf))
        .help("Grammar file (`-` for stdin)")
}

/// Inline grammar text (-g/--grammar).
pub fn grammar_text_arg() -> Arg {
    Arg::new("grammar_text")
        .short('g')
        .long("grammar")
        .value_name("TEXT")
        .help("Inline grammar text")
}

/// Input file to match (positional).
pub fn input_path_arg() -> Arg {
    Arg::new("input_path")
        .value_name("INPUT")
        .value_parser(value_parser!(PathBuf))
        .help("Input file to match (stdin if omitted)")
}

/// Inline input text (-i/--input).
pub fn input_text_arg() -> Arg {
    Arg::new("input_text")
        .short('i')
        .long("input")
        .value_name("TEXT")
        .help("Inline input text")
}

/// Grammar notation (-d/--dialect).
pub fn dialect_arg() -> Arg {
    Arg::new("dialect")
        .short('d')
        .long("dialect")
        .value_name("DIALECT")
        .value_parser(|s: &str| s.parse::<Dialect>())
        .help("Grammar notation: w3c, bnf or custom (inferred from extension if not specified)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Show input positions (--spans).
pub fn spans_arg() -> Arg {
    Arg::new("spans")
        .long("spans")
        .action(ArgAction::SetTrue)
        .help("Show input positions")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON (default: pretty when stdout is a TTY)")
}

/// Output the rule set as JSON (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output the compiled rules as JSON")
}

/// Start rule (--entry).
pub fn entry_arg() -> Arg {
    Arg::new("entry")
        .short('e')
        .long("entry")
        .value_name("RULE")
        .help("Rule to match from (default: first non-fragment rule)")
}

/// Verbosity level (-v).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v to show every terminal attempt)")
}

/// Execution fuel limit (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .default_value("1000000")
        .value_parser(value_parser!(u32))
        .help("Execution fuel limit")
}
