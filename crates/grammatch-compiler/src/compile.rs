//! Grammar source to rule set.

use grammatch_core::RuleSet;

use crate::PassResult;
use crate::dialect::Dialect;
use crate::error::GrammarError;
use crate::resolve::resolve;

/// Default nesting limit for `( )`, `[ ]` and `{ }`.
pub const DEFAULT_RECURSION_FUEL: u32 = 256;

/// Compiles grammar source in one dialect.
#[derive(Debug, Clone, Copy)]
pub struct Compiler {
    dialect: Dialect,
    recursion_fuel: Option<u32>,
}

impl Compiler {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            recursion_fuel: Some(DEFAULT_RECURSION_FUEL),
        }
    }

    /// Nesting limit for bracketed constructs. `None` removes the limit.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn compile(&self, source: &str) -> Result<RuleSet, GrammarError> {
        self.compile_with_diagnostics(source).map(|(rules, _)| rules)
    }

    /// Like [`compile`](Self::compile), also returning warnings of a successful compile.
    pub fn compile_with_diagnostics(&self, source: &str) -> PassResult<RuleSet> {
        let output = self.dialect.parse(source, self.recursion_fuel);
        let (rules, diagnostics) = resolve(output);

        if let Some(error) = GrammarError::from_diagnostics(self.dialect, source, &diagnostics) {
            return Err(error);
        }
        Ok((rules, diagnostics))
    }
}

/// Compiles `source` with default settings.
pub fn compile(dialect: Dialect, source: &str) -> Result<RuleSet, GrammarError> {
    Compiler::new(dialect).compile(source)
}
