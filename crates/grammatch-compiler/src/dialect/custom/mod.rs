//! ISO-style notation: `name = a , b | c ;`.

mod grammar;
mod lexer;


pub use lexer::SyntaxKind;

use crate::parser::{ParseOutput, Parser, lex};

pub(crate) fn parse(source: &str, recursion_fuel: Option<u32>) -> ParseOutput {
    let mut parser =
        Parser::new(source, lex::<SyntaxKind>(source)).with_recursion_fuel(recursion_fuel);
    parser.parse_grammar();
    parser.finish()
}
