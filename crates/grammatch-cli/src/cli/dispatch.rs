//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs populated from clap, one per command
//! - `from_matches()` extractors that pull relevant fields (ignoring hidden ones)
//! - `Into<*Args>` impls to bridge dispatch → command handlers
//! - Positional shifting for matching commands (`-g` shifts the first positional to input)

use std::path::PathBuf;

use clap::ArgMatches;
use grammatch_lib::{Dialect, Verbosity};

use super::ColorChoice;
use crate::commands::ast::AstArgs;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::exec::ExecArgs;
use crate::commands::run_common::{GrammarInput, TextInput};
use crate::commands::trace::TraceArgs;

/// Grammar and input sources shared by the matching commands.
pub struct SourceParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub dialect: Option<Dialect>,
}

impl SourceParams {
    fn from_matches(m: &ArgMatches) -> Self {
        let grammar_text = m.get_one::<String>("grammar_text").cloned();
        let (grammar_path, input_path) = shift_positional_to_input(
            grammar_text.is_some(),
            m.get_one::<PathBuf>("grammar_path").cloned(),
            m.get_one::<PathBuf>("input_path").cloned(),
        );

        Self {
            grammar_path,
            grammar_text,
            input_path,
            input_text: m.get_one::<String>("input_text").cloned(),
            dialect: m.get_one::<Dialect>("dialect").copied(),
        }
    }

    fn grammar(&self) -> GrammarInput {
        GrammarInput {
            path: self.grammar_path.clone(),
            text: self.grammar_text.clone(),
            dialect: self.dialect,
        }
    }

    fn input(&self) -> TextInput {
        TextInput {
            path: self.input_path.clone(),
            text: self.input_text.clone(),
        }
    }
}

pub struct CheckParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub dialect: Option<Dialect>,
    pub color: ColorChoice,
    // Note: input, entry, fuel, spans, compact, json, verbose are parsed
    // but not extracted (unified flags)
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: m.get_one::<PathBuf>("grammar_path").cloned(),
            grammar_text: m.get_one::<String>("grammar_text").cloned(),
            dialect: m.get_one::<Dialect>("dialect").copied(),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            grammar: GrammarInput {
                path: p.grammar_path,
                text: p.grammar_text,
                dialect: p.dialect,
            },
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub dialect: Option<Dialect>,
    pub json: bool,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: m.get_one::<PathBuf>("grammar_path").cloned(),
            grammar_text: m.get_one::<String>("grammar_text").cloned(),
            dialect: m.get_one::<Dialect>("dialect").copied(),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            grammar: GrammarInput {
                path: p.grammar_path,
                text: p.grammar_text,
                dialect: p.dialect,
            },
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

pub struct AstParams {
    pub sources: SourceParams,
    pub entry: Option<String>,
    pub spans: bool,
    pub fuel: u32,
    pub color: ColorChoice,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            sources: SourceParams::from_matches(m),
            entry: m.get_one::<String>("entry").cloned(),
            spans: m.get_flag("spans"),
            fuel: parse_fuel(m),
            color: parse_color(m),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            grammar: p.sources.grammar(),
            input: p.sources.input(),
            entry: p.entry,
            spans: p.spans,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ExecParams {
    pub sources: SourceParams,
    pub entry: Option<String>,
    pub compact: bool,
    pub fuel: u32,
    pub color: ColorChoice,
}

impl ExecParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            sources: SourceParams::from_matches(m),
            entry: m.get_one::<String>("entry").cloned(),
            compact: m.get_flag("compact"),
            fuel: parse_fuel(m),
            color: parse_color(m),
        }
    }
}

impl From<ExecParams> for ExecArgs {
    fn from(p: ExecParams) -> Self {
        // Pretty by default when stdout is a TTY, unless --compact is passed
        let pretty = !p.compact && std::io::IsTerminal::is_terminal(&std::io::stdout());

        Self {
            grammar: p.sources.grammar(),
            input: p.sources.input(),
            entry: p.entry,
            pretty,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub sources: SourceParams,
    pub entry: Option<String>,
    pub verbose: u8,
    pub fuel: u32,
    pub color: ColorChoice,
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            sources: SourceParams::from_matches(m),
            entry: m.get_one::<String>("entry").cloned(),
            verbose: m.get_count("verbose"),
            fuel: parse_fuel(m),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            _ => Verbosity::Verbose,
        };

        Self {
            grammar: p.sources.grammar(),
            input: p.sources.input(),
            entry: p.entry,
            verbosity,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_fuel(m: &ArgMatches) -> u32 {
    m.get_one::<u32>("fuel").copied().unwrap_or(1_000_000)
}

/// When -g is used with a single positional arg, shift it from grammar to input.
/// This enables: `grammatch ast -g 'n ::= [0-9]+' numbers.txt`
fn shift_positional_to_input(
    has_grammar_text: bool,
    grammar_path: Option<PathBuf>,
    input_path: Option<PathBuf>,
) -> (Option<PathBuf>, Option<PathBuf>) {
    if has_grammar_text && grammar_path.is_some() && input_path.is_none() {
        (None, grammar_path)
    } else {
        (grammar_path, input_path)
    }
}
