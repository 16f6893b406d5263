//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.
//! Every command accepts every flag so that switching between `check`,
//! `ast`, `exec` and `trace` on the same command line just works; flags a
//! command ignores are hidden from its `--help`.

use clap::Command;

use super::args::*;

/// Add hidden input args (for commands that don't match anything).
fn with_hidden_input_args(cmd: Command) -> Command {
    cmd.arg(input_path_arg().hide(true))
        .arg(input_text_arg().hide(true))
}

/// Add hidden match args (for commands that don't run the matcher).
fn with_hidden_match_args(cmd: Command) -> Command {
    cmd.arg(entry_arg().hide(true)).arg(fuel_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("grammatch")
        .about("Match text against W3C EBNF, BNF and ISO-style grammars")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(dump_command())
        .subcommand(ast_command())
        .subcommand(exec_command())
        .subcommand(trace_command())
}

/// Compile a grammar and report its rules.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Compile a grammar and list its rules")
        .override_usage(
            "\
  grammatch check <GRAMMAR>
  grammatch check -g <TEXT> [-d <DIALECT>]",
        )
        .after_help(
            r#"EXAMPLES:
  grammatch check json.ebnf                  # dialect from extension
  grammatch check rules.txt -d bnf           # explicit dialect
  grammatch check -g 'digit ::= [0-9]'       # inline grammar"#,
        )
        .arg(grammar_path_arg())
        .arg(grammar_text_arg())
        .arg(dialect_arg())
        .arg(color_arg());

    // Hidden unified flags
    with_hidden_match_args(with_hidden_input_args(cmd))
        .arg(spans_arg().hide(true))
        .arg(compact_arg().hide(true))
        .arg(json_arg().hide(true))
        .arg(verbose_arg().hide(true))
}

/// Print the normalized rule set.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Print the compiled rules in W3C notation")
        .override_usage(
            "\
  grammatch dump <GRAMMAR>
  grammatch dump -g <TEXT> [-d <DIALECT>]",
        )
        .after_help(
            r#"EXAMPLES:
  grammatch dump sql.iso                     # normalized W3C notation
  grammatch dump sql.iso --json              # rule set as JSON"#,
        )
        .arg(grammar_path_arg())
        .arg(grammar_text_arg())
        .arg(dialect_arg())
        .arg(json_arg())
        .arg(color_arg());

    // Hidden unified flags
    with_hidden_match_args(with_hidden_input_args(cmd))
        .arg(spans_arg().hide(true))
        .arg(compact_arg().hide(true))
        .arg(verbose_arg().hide(true))
}

/// Match input and print the token tree.
pub fn ast_command() -> Command {
    let cmd = Command::new("ast")
        .about("Match input and print the token tree")
        .override_usage(
            "\
  grammatch ast <GRAMMAR> [INPUT]
  grammatch ast <GRAMMAR> -i <TEXT>
  grammatch ast -g <TEXT> [INPUT]",
        )
        .after_help(
            r#"EXAMPLES:
  grammatch ast json.ebnf data.json          # two positional files
  grammatch ast json.ebnf -i '[1, 2]'        # inline input
  grammatch ast -g 'n ::= [0-9]+' -i 42      # all inline
  grammatch ast json.ebnf data.json --spans  # with byte offsets"#,
        )
        .arg(grammar_path_arg())
        .arg(input_path_arg())
        .arg(grammar_text_arg())
        .arg(input_text_arg())
        .arg(dialect_arg())
        .arg(entry_arg())
        .arg(spans_arg())
        .arg(fuel_arg())
        .arg(color_arg());

    // Hidden unified flags
    cmd.arg(compact_arg().hide(true))
        .arg(json_arg().hide(true))
        .arg(verbose_arg().hide(true))
}

/// Match input and output the result as JSON.
pub fn exec_command() -> Command {
    let cmd = Command::new("exec")
        .about("Match input and output the result as JSON")
        .override_usage(
            "\
  grammatch exec <GRAMMAR> [INPUT]
  grammatch exec <GRAMMAR> -i <TEXT>
  grammatch exec -g <TEXT> [INPUT]",
        )
        .after_help(
            r#"EXAMPLES:
  grammatch exec json.ebnf data.json         # two positional files
  grammatch exec -g 'n ::= [0-9]+' -i 42     # all inline
  grammatch exec json.ebnf data.json | jq .ast"#,
        )
        .arg(grammar_path_arg())
        .arg(input_path_arg())
        .arg(grammar_text_arg())
        .arg(input_text_arg())
        .arg(dialect_arg())
        .arg(entry_arg())
        .arg(compact_arg())
        .arg(fuel_arg())
        .arg(color_arg());

    // Hidden unified flags
    cmd.arg(spans_arg().hide(true))
        .arg(json_arg().hide(true))
        .arg(verbose_arg().hide(true))
}

/// Trace the matcher for debugging.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Trace the matcher for debugging")
        .override_usage(
            "\
  grammatch trace <GRAMMAR> [INPUT]
  grammatch trace <GRAMMAR> -i <TEXT>
  grammatch trace -g <TEXT> [INPUT]",
        )
        .after_help(
            r#"EXAMPLES:
  grammatch trace json.ebnf data.json        # rule enter/exit
  grammatch trace json.ebnf -i '[1]' -v      # also every terminal"#,
        )
        .arg(grammar_path_arg())
        .arg(input_path_arg())
        .arg(grammar_text_arg())
        .arg(input_text_arg())
        .arg(dialect_arg())
        .arg(entry_arg())
        .arg(verbose_arg())
        .arg(fuel_arg())
        .arg(color_arg());

    // Hidden unified flags
    cmd.arg(spans_arg().hide(true))
        .arg(compact_arg().hide(true))
        .arg(json_arg().hide(true))
}
