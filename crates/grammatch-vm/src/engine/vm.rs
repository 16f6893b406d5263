//! Backtracking matcher over a rule set.
//!
//! Every expression variant has one matching routine. A routine gets the
//! cursor and a token buffer, and on success returns the new cursor with the
//! tokens it produced appended to the buffer. On failure the buffer is left
//! as it was found, so no partial tokens survive backtracking.

use std::collections::HashSet;

use grammatch_core::{Expr, Rule, RuleId, RuleSet};

use super::error::RuntimeError;
use super::outcome::MatchResult;
use super::token::Token;
use super::trace::{NoopTracer, Tracer, describe_terminal};

/// Runtime limits for matching.
#[derive(Clone, Copy, Debug)]
pub struct FuelLimits {
    /// Maximum total steps (default: 1,000,000).
    pub(crate) exec_fuel: u32,
    /// Maximum nesting of expression frames (default: 512).
    ///
    /// Every composite expression and every rule call is one level, so the
    /// limit bounds native stack use however deeply a rule body is nested.
    pub(crate) recursion_limit: u32,
}

impl Default for FuelLimits {
    fn default() -> Self {
        Self {
            exec_fuel: 1_000_000,
            recursion_limit: 512,
        }
    }
}

impl FuelLimits {
    /// Create new fuel limits with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the execution fuel limit.
    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = fuel;
        self
    }

    /// Set the recursion limit.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn get_exec_fuel(&self) -> u32 {
        self.exec_fuel
    }
    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}

/// Matches `input` against `rules`, starting from `start` or the default start rule.
pub fn match_input(
    rules: &RuleSet,
    start: Option<&str>,
    input: &str,
) -> Result<MatchResult, RuntimeError> {
    VM::builder(rules, input).build().execute(start)
}

/// Matcher state for one input.
pub struct VM<'r, 'i> {
    pub(crate) rules: &'r RuleSet,
    pub(crate) input: &'i str,

    /// Rule invocations in progress, by offset. Re-entering one fails.
    pub(crate) active: HashSet<(RuleId, usize)>,

    // Fuel tracking
    pub(crate) exec_fuel: u32,
    pub(crate) recursion_depth: u32,
    pub(crate) limits: FuelLimits,

    /// Depth of `Difference` exclusion checks. Failures inside don't count as expectations.
    pub(crate) excluding: u32,
    pub(crate) furthest: usize,
    pub(crate) expected: Vec<String>,
}

/// Builder for VM instances.
pub struct VMBuilder<'r, 'i> {
    rules: &'r RuleSet,
    input: &'i str,
    limits: FuelLimits,
}

impl<'r, 'i> VMBuilder<'r, 'i> {
    pub fn new(rules: &'r RuleSet, input: &'i str) -> Self {
        Self {
            rules,
            input,
            limits: FuelLimits::default(),
        }
    }

    /// Set the fuel limits.
    pub fn limits(mut self, limits: FuelLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the execution fuel limit.
    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.limits = self.limits.exec_fuel(fuel);
        self
    }

    /// Set the recursion limit.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.limits = self.limits.recursion_limit(limit);
        self
    }

    pub fn build(self) -> VM<'r, 'i> {
        VM {
            rules: self.rules,
            input: self.input,
            active: HashSet::new(),
            exec_fuel: self.limits.get_exec_fuel(),
            recursion_depth: 0,
            limits: self.limits,
            excluding: 0,
            furthest: 0,
            expected: Vec::new(),
        }
    }
}

impl<'r, 'i> VM<'r, 'i> {
    pub fn builder(rules: &'r RuleSet, input: &'i str) -> VMBuilder<'r, 'i> {
        VMBuilder::new(rules, input)
    }

    /// Matches the start rule at offset 0.
    ///
    /// This is a convenience method that uses `NoopTracer`, which gets
    /// completely optimized away at compile time.
    pub fn execute(self, start: Option<&str>) -> Result<MatchResult, RuntimeError> {
        self.execute_with(start, &mut NoopTracer)
    }

    /// Matches the start rule at offset 0, reporting progress to `tracer`.
    ///
    /// `start` names the start rule; `None` picks the first non-fragment rule.
    pub fn execute_with<T: Tracer>(
        mut self,
        start: Option<&str>,
        tracer: &mut T,
    ) -> Result<MatchResult, RuntimeError> {
        let rules = self.rules;
        let (id, rule) = match start {
            Some(name) => rules
                .lookup(name)
                .ok_or_else(|| RuntimeError::UnknownRule(name.to_string()))?,
            None => rules.default_start().ok_or(RuntimeError::EmptyRuleSet)?,
        };

        let mut out = Vec::new();
        // The start rule gets its token even when it is a fragment.
        self.invoke(id, rule, true, 0, &mut out, tracer)?;
        tracer.trace_finish(self.limits.exec_fuel - self.exec_fuel);

        Ok(MatchResult::new(
            self.input,
            out.pop(),
            self.furthest,
            self.expected,
        ))
    }

    fn consume_fuel(&mut self) -> Result<(), RuntimeError> {
        if self.exec_fuel == 0 {
            return Err(RuntimeError::ExecFuelExhausted(self.limits.exec_fuel));
        }
        self.exec_fuel -= 1;
        Ok(())
    }

    /// Matches `expr` at `pos`. Returns the offset after the match.
    fn match_expr<T: Tracer>(
        &mut self,
        expr: &'r Expr,
        pos: usize,
        out: &mut Vec<Token>,
        tracer: &mut T,
    ) -> Result<Option<usize>, RuntimeError> {
        self.consume_fuel()?;
        if self.recursion_depth >= self.limits.recursion_limit {
            return Err(RuntimeError::RecursionLimitExceeded(
                self.limits.recursion_limit,
            ));
        }

        self.recursion_depth += 1;
        let result = self.dispatch(expr, pos, out, tracer);
        self.recursion_depth -= 1;
        result
    }

    fn dispatch<T: Tracer>(
        &mut self,
        expr: &'r Expr,
        pos: usize,
        out: &mut Vec<Token>,
        tracer: &mut T,
    ) -> Result<Option<usize>, RuntimeError> {
        match expr {
            Expr::Literal {
                text,
                case_sensitive,
            } => {
                let rest = &self.input[pos..];
                let len = if *case_sensitive {
                    rest.starts_with(text.as_str()).then_some(text.len())
                } else {
                    caseless_prefix(rest, text)
                };
                Ok(self.terminal(expr, pos, len.map(|len| pos + len), tracer))
            }
            Expr::CharClass(class) => {
                let end = self.input[pos..]
                    .chars()
                    .next()
                    .filter(|&c| class.matches(c))
                    .map(|c| pos + c.len_utf8());
                Ok(self.terminal(expr, pos, end, tracer))
            }
            Expr::EndOfInput => {
                let end = (pos == self.input.len()).then_some(pos);
                Ok(self.terminal(expr, pos, end, tracer))
            }
            Expr::Reference { name } => {
                let rules = self.rules;
                let (id, rule) = rules
                    .lookup(name)
                    .ok_or_else(|| RuntimeError::UnknownRule(name.clone()))?;
                self.invoke(id, rule, false, pos, out, tracer)
            }
            Expr::Sequence { items } => {
                let mark = out.len();
                let mut cursor = pos;
                for item in items {
                    match self.match_expr(item, cursor, out, tracer)? {
                        Some(next) => cursor = next,
                        None => {
                            out.truncate(mark);
                            return Ok(None);
                        }
                    }
                }
                Ok(Some(cursor))
            }
            Expr::Alternation { options } => {
                for option in options {
                    if let Some(end) = self.match_expr(option, pos, out, tracer)? {
                        return Ok(Some(end));
                    }
                }
                Ok(None)
            }
            Expr::Repetition { inner, min, max } => {
                self.match_repetition(inner, *min, *max, pos, out, tracer)
            }
            Expr::Group { inner } => self.match_expr(inner, pos, out, tracer),
            Expr::Difference { base, excluded } => {
                let mark = out.len();
                self.excluding += 1;
                let excluded_end = self.match_expr(excluded, pos, out, tracer);
                self.excluding -= 1;
                out.truncate(mark);
                if excluded_end?.is_some() {
                    return Ok(None);
                }
                self.match_expr(base, pos, out, tracer)
            }
        }
    }

    /// Greedy, without backtracking on the iteration count.
    ///
    /// An iteration that consumes nothing could repeat forever, so it ends
    /// the loop and counts as meeting `min`.
    fn match_repetition<T: Tracer>(
        &mut self,
        inner: &'r Expr,
        min: u32,
        max: Option<u32>,
        pos: usize,
        out: &mut Vec<Token>,
        tracer: &mut T,
    ) -> Result<Option<usize>, RuntimeError> {
        let mark = out.len();
        let mut cursor = pos;
        let mut count = 0u32;
        let mut satisfied = false;

        while max.is_none_or(|max| count < max) {
            match self.match_expr(inner, cursor, out, tracer)? {
                Some(next) if next == cursor => {
                    count += 1;
                    satisfied = true;
                    break;
                }
                Some(next) => {
                    cursor = next;
                    count += 1;
                }
                None => break,
            }
        }

        if count >= min || satisfied {
            Ok(Some(cursor))
        } else {
            out.truncate(mark);
            Ok(None)
        }
    }

    /// Runs `rule` at `pos` and wraps its tokens unless it is a fragment.
    fn invoke<T: Tracer>(
        &mut self,
        id: RuleId,
        rule: &'r Rule,
        always_wrap: bool,
        pos: usize,
        out: &mut Vec<Token>,
        tracer: &mut T,
    ) -> Result<Option<usize>, RuntimeError> {
        if !self.active.insert((id, pos)) {
            tracer.trace_guard(&rule.name, pos);
            return Ok(None);
        }

        tracer.trace_enter_rule(&rule.name, pos);

        let mut children = Vec::new();
        let result = self.match_expr(&rule.expr, pos, &mut children, tracer);

        self.active.remove(&(id, pos));
        let end = result?;
        tracer.trace_exit_rule(&rule.name, pos, end);

        let Some(end) = end else {
            return Ok(None);
        };
        if rule.fragment && !always_wrap {
            out.append(&mut children);
        } else {
            out.push(Token::new(&rule.name, self.input, pos..end, children));
        }
        Ok(Some(end))
    }

    /// Records a terminal attempt and passes its end through.
    fn terminal<T: Tracer>(
        &mut self,
        expr: &Expr,
        pos: usize,
        end: Option<usize>,
        tracer: &mut T,
    ) -> Option<usize> {
        tracer.trace_terminal(expr, pos, end);
        if end.is_none() && self.excluding == 0 {
            self.expect(pos, describe_terminal(expr));
        }
        end
    }

    fn expect(&mut self, pos: usize, description: String) {
        if pos > self.furthest {
            self.furthest = pos;
            self.expected.clear();
        }
        if pos == self.furthest && !self.expected.contains(&description) {
            self.expected.push(description);
        }
    }
}

/// Length in bytes of the prefix of `input` equal to `pattern` under
/// per-character lowercase folding.
fn caseless_prefix(input: &str, pattern: &str) -> Option<usize> {
    let mut chars = input.char_indices();
    for expected in pattern.chars() {
        let (_, actual) = chars.next()?;
        if !expected.to_lowercase().eq(actual.to_lowercase()) {
            return None;
        }
    }
    Some(chars.next().map_or(input.len(), |(i, _)| i))
}
