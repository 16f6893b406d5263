//! Compiled grammar and the matcher builder.

use grammatch_compiler::{Compiler, Diagnostics, Dialect, GrammarError};
use grammatch_core::{Rule, RuleSet};
use grammatch_vm::{FuelLimits, MatchResult, NoopTracer, RuntimeError, Tracer, VM};

/// A grammar that compiled, ready to match input.
#[derive(Debug, Clone)]
pub struct Grammar {
    dialect: Dialect,
    rules: RuleSet,
    warnings: Diagnostics,
}

impl Grammar {
    pub fn compile(dialect: Dialect, source: &str) -> Result<Self, GrammarError> {
        Self::compile_with(Compiler::new(dialect), source)
    }

    /// Compiles with a configured [`Compiler`], e.g. a different nesting limit.
    pub fn compile_with(compiler: Compiler, source: &str) -> Result<Self, GrammarError> {
        let (rules, warnings) = compiler.compile_with_diagnostics(source)?;
        Ok(Self {
            dialect: compiler.dialect(),
            rules,
            warnings,
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Names of the non-fragment rules, in source order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.names().collect()
    }

    /// `"N rules: a, b"`.
    pub fn summary(&self) -> String {
        self.rules.summary()
    }

    /// Diagnostics of a successful compile, such as an empty grammar.
    pub fn warnings(&self) -> &Diagnostics {
        &self.warnings
    }

    /// The rule a match would start from: `entry` if given, else the default start rule.
    pub fn start_rule(&self, entry: Option<&str>) -> Option<&Rule> {
        match entry {
            Some(name) => self.rules.get(name),
            None => self.rules.default_start().map(|(_, rule)| rule),
        }
    }

    /// Matches `input` from `start` (or the default start rule) with default limits.
    pub fn match_input(
        &self,
        start: Option<&str>,
        input: &str,
    ) -> Result<MatchResult, RuntimeError> {
        let mut matcher = self.matcher(input);
        if let Some(start) = start {
            matcher = matcher.entry(start);
        }
        matcher.run()
    }

    pub fn matcher<'a>(&'a self, input: &'a str) -> Matcher<'a> {
        Matcher {
            grammar: self,
            input,
            entry: None,
            limits: FuelLimits::default(),
        }
    }
}

/// Builder for a single match of a [`Grammar`] against an input.
pub struct Matcher<'a> {
    grammar: &'a Grammar,
    input: &'a str,
    entry: Option<&'a str>,
    limits: FuelLimits,
}

impl<'a> Matcher<'a> {
    /// Start rule. Defaults to the first non-fragment rule.
    pub fn entry(mut self, name: &'a str) -> Self {
        self.entry = Some(name);
        self
    }

    pub fn limits(mut self, limits: FuelLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn run(self) -> Result<MatchResult, RuntimeError> {
        self.run_with(&mut NoopTracer)
    }

    pub fn run_with<T: Tracer>(self, tracer: &mut T) -> Result<MatchResult, RuntimeError> {
        VM::builder(&self.grammar.rules, self.input)
            .limits(self.limits)
            .build()
            .execute_with(self.entry, tracer)
    }
}
