//! Tracing infrastructure for debugging matcher execution.
//!
//! # Design: Zero-Cost Abstraction
//!
//! The VM is generic over [`Tracer`]. With [`NoopTracer`] every hook is an
//! `#[inline(always)]` empty function and the calls disappear. Tracing-only
//! state (indentation, collected lines) lives in the tracer, never in the VM.

use grammatch_core::{Colors, Expr};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Rule enter/exit and left-recursion guard hits.
    #[default]
    Default,
    /// Also every terminal attempt.
    Verbose,
}

/// Tracer trait for VM execution instrumentation.
///
/// Each method is called at a specific point during execution:
/// - `trace_enter_rule` - before a rule body is matched at `pos`
/// - `trace_exit_rule` - after it, with the end offset on success
/// - `trace_terminal` - after a literal, class or end-of-input test
/// - `trace_guard` - when a rule is re-entered at the same offset and fails
/// - `trace_finish` - once, with the number of steps used
pub trait Tracer {
    fn trace_enter_rule(&mut self, name: &str, pos: usize);

    fn trace_exit_rule(&mut self, name: &str, pos: usize, end: Option<usize>);

    fn trace_terminal(&mut self, expr: &Expr, pos: usize, end: Option<usize>);

    fn trace_guard(&mut self, name: &str, pos: usize);

    fn trace_finish(&mut self, steps: u32);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_enter_rule(&mut self, _name: &str, _pos: usize) {}

    #[inline(always)]
    fn trace_exit_rule(&mut self, _name: &str, _pos: usize, _end: Option<usize>) {}

    #[inline(always)]
    fn trace_terminal(&mut self, _expr: &Expr, _pos: usize, _end: Option<usize>) {}

    #[inline(always)]
    fn trace_guard(&mut self, _name: &str, _pos: usize) {}

    #[inline(always)]
    fn trace_finish(&mut self, _steps: u32) {}
}

/// Longest matched text shown on a trace line.
const TEXT_BUDGET: usize = 24;

/// Tracer that collects an indented execution trace.
pub struct PrintTracer<'s> {
    /// Input being matched, for showing matched text.
    input: &'s str,
    verbosity: Verbosity,
    lines: Vec<String>,
    /// Current rule nesting, for indentation.
    depth: usize,
    colors: Colors,
}

impl<'s> PrintTracer<'s> {
    pub fn new(input: &'s str, verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            input,
            verbosity,
            lines: Vec::new(),
            depth: 0,
            colors,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Print all trace lines.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }

    fn push(&mut self, content: String) {
        self.lines
            .push(format!("{:indent$}{content}", "", indent = self.depth * 2));
    }

    /// Matched text, dimmed and truncated, in quotes.
    fn format_text(&self, start: usize, end: usize) -> String {
        let c = &self.colors;
        format!(
            "{}{:?}{}",
            c.dim,
            truncate_text(&self.input[start..end], TEXT_BUDGET),
            c.reset
        )
    }
}

/// Shortens `text` to at most `max` characters, marking the cut with `…`.
fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// How a terminal is named in traces and "expected ..." lists.
pub(crate) fn describe_terminal(expr: &Expr) -> String {
    match expr {
        Expr::EndOfInput => "end of input".to_string(),
        _ => expr.to_string(),
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_enter_rule(&mut self, name: &str, pos: usize) {
        let c = self.colors;
        self.push(format!("{}{name}{} @{pos}", c.blue, c.reset));
        self.depth += 1;
    }

    fn trace_exit_rule(&mut self, name: &str, pos: usize, end: Option<usize>) {
        self.depth = self.depth.saturating_sub(1);
        let c = self.colors;
        let line = match end {
            Some(end) => format!(
                "{}✓{} {name} {pos}..{end} {}",
                c.green,
                c.reset,
                self.format_text(pos, end)
            ),
            None => format!("{}✗{} {name}", c.yellow, c.reset),
        };
        self.push(line);
    }

    fn trace_terminal(&mut self, expr: &Expr, pos: usize, end: Option<usize>) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        let c = self.colors;
        let terminal = describe_terminal(expr);
        let line = match end {
            Some(end) => format!("{}·{} {terminal} {pos}..{end}", c.green, c.reset),
            None => format!("{}·{} {terminal} @{pos} failed", c.yellow, c.reset),
        };
        self.push(line);
    }

    fn trace_guard(&mut self, name: &str, pos: usize) {
        let c = self.colors;
        self.push(format!(
            "{}↺{} {name} @{pos} already active",
            c.yellow, c.reset
        ));
    }

    fn trace_finish(&mut self, steps: u32) {
        let c = self.colors;
        self.lines
            .push(format!("{}{steps} steps{}", c.dim, c.reset));
    }
}

