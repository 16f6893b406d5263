use super::run_common::{GrammarInput, prepare_grammar};

pub struct CheckArgs {
    pub grammar: GrammarInput,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let grammar = prepare_grammar(&args.grammar, args.color);
    println!("{}", grammar.summary());
}
