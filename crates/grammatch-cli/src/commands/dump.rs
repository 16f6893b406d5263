//! Print the compiled rule set.

use grammatch_core::Colors;

use super::run_common::{GrammarInput, fail, prepare_grammar};

pub struct DumpArgs {
    pub grammar: GrammarInput,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let grammar = prepare_grammar(&args.grammar, args.color);

    if args.json {
        let json = serde_json::to_string_pretty(grammar.rules()).unwrap_or_else(|e| fail(e));
        println!("{}", json);
        return;
    }

    let c = Colors::new(args.color);
    for rule in grammar.rules() {
        let name_color = if rule.fragment { c.dim } else { c.blue };
        println!("{}{}{} ::= {}", name_color, rule.name, c.reset, rule.expr);
    }
}
