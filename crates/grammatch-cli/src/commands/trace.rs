//! Trace matcher execution for debugging.

use grammatch_core::Colors;
use grammatch_lib::{PrintTracer, Verbosity};

use super::run_common::{
    GrammarInput, TextInput, fail, load_input, prepare_grammar, report_outcome, run_match,
    runtime_failure,
};

pub struct TraceArgs {
    pub grammar: GrammarInput,
    pub input: TextInput,
    pub entry: Option<String>,
    pub verbosity: Verbosity,
    pub fuel: u32,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
    let grammar = prepare_grammar(&args.grammar, args.color);
    let input = load_input(&args.input, &args.grammar).unwrap_or_else(|e| fail(e));
    let colors = Colors::new(args.color);

    let entry = args.entry.as_deref();
    let mut tracer = PrintTracer::new(&input, args.verbosity, colors);
    let result = match run_match(&grammar, entry, &input, args.fuel, &mut tracer) {
        Ok(result) => {
            tracer.print();
            result
        }
        Err(e) => {
            tracer.print();
            runtime_failure(e);
        }
    };

    if let Some(ast) = &result.ast {
        println!("{}---{}", colors.dim, colors.reset);
        println!("{}", ast.dump_colored(true, colors));
    }

    if !report_outcome(&grammar, entry, &result, &input, args.color) {
        std::process::exit(1);
    }
}
