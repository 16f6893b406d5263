//! Shared loading and reporting for every command.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use grammatch_lib::{Dialect, FuelLimits, Grammar, MatchReport, MatchResult, RuntimeError, Tracer};

/// Where the grammar comes from.
pub struct GrammarInput {
    pub path: Option<PathBuf>,
    pub text: Option<String>,
    /// Explicit `--dialect`; otherwise inferred from the path.
    pub dialect: Option<Dialect>,
}

/// Where the input comes from. Neither set means stdin.
pub struct TextInput {
    pub path: Option<PathBuf>,
    pub text: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("grammar is required: use positional argument or -g/--grammar")]
    MissingGrammar,

    #[error("grammar and input cannot both be from stdin")]
    BothFromStdin,

    #[error("cannot infer dialect from extension '.{0}', use --dialect")]
    UnknownExtension(String),

    #[error("failed to read '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),
}

/// Reads and compiles the grammar, exiting with rendered diagnostics on failure.
pub fn prepare_grammar(input: &GrammarInput, color: bool) -> Grammar {
    let (source, dialect) = load_grammar(input).unwrap_or_else(|e| fail(e));
    let path = input.path.as_ref().map(|p| p.display().to_string());

    let grammar = match Grammar::compile(dialect, &source) {
        Ok(grammar) => grammar,
        Err(err) => {
            let mut printer = err.diagnostics().printer().source(&source).colored(color);
            if let Some(path) = &path {
                printer = printer.path(path);
            }
            eprint!("{}", printer.render());
            std::process::exit(1);
        }
    };

    if !grammar.warnings().is_empty() {
        eprint!("{}", grammar.warnings().render_colored(&source, color));
    }

    grammar
}

/// Grammar text and the dialect to read it in.
pub fn load_grammar(input: &GrammarInput) -> Result<(String, Dialect), LoadError> {
    let dialect = resolve_dialect(input.dialect, input.path.as_deref())?;

    if let Some(text) = &input.text {
        return Ok((text.clone(), dialect));
    }
    match &input.path {
        Some(path) => Ok((read_path(path)?, dialect)),
        None => Err(LoadError::MissingGrammar),
    }
}

/// Explicit dialect, else the grammar file's extension, else W3C.
pub fn resolve_dialect(explicit: Option<Dialect>, path: Option<&Path>) -> Result<Dialect, LoadError> {
    if let Some(dialect) = explicit {
        return Ok(dialect);
    }

    if let Some(path) = path
        && path.as_os_str() != "-"
        && let Some(ext) = path.extension().and_then(|e| e.to_str())
    {
        return Dialect::from_extension(ext)
            .ok_or_else(|| LoadError::UnknownExtension(ext.to_string()));
    }

    Ok(Dialect::W3c)
}

/// Input text from `-i`, a file, or stdin.
pub fn load_input(input: &TextInput, grammar: &GrammarInput) -> Result<String, LoadError> {
    if let Some(text) = &input.text {
        return Ok(text.clone());
    }

    let grammar_from_stdin =
        grammar.text.is_none() && grammar.path.as_ref().is_none_or(|p| p.as_os_str() == "-");

    match &input.path {
        Some(path) if path.as_os_str() != "-" => read_path(path),
        _ if grammar_from_stdin => Err(LoadError::BothFromStdin),
        _ => read_stdin(),
    }
}

fn read_path(path: &Path) -> Result<String, LoadError> {
    if path.as_os_str() == "-" {
        return read_stdin();
    }
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn read_stdin() -> Result<String, LoadError> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(LoadError::Stdin)?;
    Ok(buf)
}

/// Matches `input` with the execution budget from `--fuel`.
pub fn run_match<T: Tracer>(
    grammar: &Grammar,
    entry: Option<&str>,
    input: &str,
    fuel: u32,
    tracer: &mut T,
) -> Result<MatchResult, RuntimeError> {
    let mut matcher = grammar
        .matcher(input)
        .limits(FuelLimits::new().exec_fuel(fuel));
    if let Some(entry) = entry {
        matcher = matcher.entry(entry);
    }
    matcher.run_with(tracer)
}

pub fn runtime_failure(err: RuntimeError) -> ! {
    eprintln!("runtime error: {}", err);
    std::process::exit(2)
}

/// Writes the partial or failed match report to stderr. Returns whether anything matched.
pub fn report_outcome(
    grammar: &Grammar,
    entry: Option<&str>,
    result: &MatchResult,
    input: &str,
    color: bool,
) -> bool {
    let entry = entry
        .or_else(|| grammar.start_rule(None).map(|r| r.name.as_str()))
        .unwrap_or_default();
    let report = MatchReport::new(result, input, entry).colored(color);

    let rendered = report.render();
    if !rendered.is_empty() {
        eprintln!("{}", rendered);
    }
    result.is_match()
}

pub fn fail(err: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", err);
    std::process::exit(1)
}
