//! Match input and output the result as JSON.

use grammatch_lib::NoopTracer;

use super::run_common::{
    GrammarInput, TextInput, fail, load_input, prepare_grammar, report_outcome, run_match,
    runtime_failure,
};

pub struct ExecArgs {
    pub grammar: GrammarInput,
    pub input: TextInput,
    pub entry: Option<String>,
    pub pretty: bool,
    pub fuel: u32,
    pub color: bool,
}

pub fn run(args: ExecArgs) {
    let grammar = prepare_grammar(&args.grammar, args.color);
    let input = load_input(&args.input, &args.grammar).unwrap_or_else(|e| fail(e));

    let entry = args.entry.as_deref();
    let result = run_match(&grammar, entry, &input, args.fuel, &mut NoopTracer)
        .unwrap_or_else(|e| runtime_failure(e));

    let output = if args.pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    };
    match output {
        Ok(json) => println!("{}", json),
        Err(e) => fail(format!("JSON serialization failed: {}", e)),
    }

    if !report_outcome(&grammar, entry, &result, &input, args.color) {
        std::process::exit(1);
    }
}
