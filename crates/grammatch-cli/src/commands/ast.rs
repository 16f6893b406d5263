//! Match input and print the token tree.

use grammatch_core::Colors;
use grammatch_lib::NoopTracer;

use super::run_common::{
    GrammarInput, TextInput, fail, load_input, prepare_grammar, report_outcome, run_match,
    runtime_failure,
};

pub struct AstArgs {
    pub grammar: GrammarInput,
    pub input: TextInput,
    pub entry: Option<String>,
    pub spans: bool,
    pub fuel: u32,
    pub color: bool,
}

pub fn run(args: AstArgs) {
    let grammar = prepare_grammar(&args.grammar, args.color);
    let input = load_input(&args.input, &args.grammar).unwrap_or_else(|e| fail(e));

    let entry = args.entry.as_deref();
    let result = run_match(&grammar, entry, &input, args.fuel, &mut NoopTracer)
        .unwrap_or_else(|e| runtime_failure(e));

    if let Some(ast) = &result.ast {
        println!("{}", ast.dump_colored(args.spans, Colors::new(args.color)));
    }

    if !report_outcome(&grammar, entry, &result, &input, args.color) {
        std::process::exit(1);
    }
}
