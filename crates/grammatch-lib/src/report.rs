//! Human-readable reports for partial and failed matches.

use annotate_snippets::{AnnotationKind, Level};
use grammatch_compiler::SourceView;
use grammatch_core::LineIndex;
use grammatch_vm::MatchResult;

use crate::status::MatchStatus;

/// Longest piece of unconsumed input quoted in a report title.
const PREVIEW_BUDGET: usize = 24;

/// Renders a [`MatchResult`] against the input it came from.
///
/// A full match renders as nothing. A partial match is a warning over the
/// unconsumed rest; a failed match is an error at the furthest offset the
/// matcher reached, labelled with what it expected there.
pub struct MatchReport<'a> {
    result: &'a MatchResult,
    input: &'a str,
    entry: &'a str,
    path: Option<&'a str>,
    colored: bool,
}

impl<'a> MatchReport<'a> {
    /// `entry` is the name of the start rule, used in the failure title.
    pub fn new(result: &'a MatchResult, input: &'a str, entry: &'a str) -> Self {
        Self {
            result,
            input,
            entry,
            path: None,
            colored: false,
        }
    }

    pub fn path(mut self, path: &'a str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn status(&self) -> MatchStatus {
        MatchStatus::of(self.result)
    }

    pub fn render(&self) -> String {
        let view = SourceView::new(self.input)
            .path(self.path)
            .colored(self.colored);

        match self.status() {
            MatchStatus::Matched => String::new(),
            MatchStatus::Partial => self.render_partial(&view),
            MatchStatus::NotMatched => self.render_not_matched(&view),
        }
    }

    fn render_partial(&self, view: &SourceView<'_>) -> String {
        let end = self.result.end;
        let position = LineIndex::new(self.input).line_col(end);
        let title = format!(
            "rest of the input at {position}: `{}`",
            preview(&self.result.rest)
        );
        let label = format!("not matched by `{}`", self.entry);

        let snippet = view.snippet().annotation(
            AnnotationKind::Primary
                .span(end..self.input.len())
                .label(&label),
        );
        view.render(&[Level::WARNING.primary_title(&title).element(snippet)])
    }

    fn render_not_matched(&self, view: &SourceView<'_>) -> String {
        let furthest = self.result.furthest;
        let title = format!("input does not match `{}`", self.entry);
        let label = match self.result.expected.as_slice() {
            [] => "no alternative matches here".to_string(),
            expected => format!("expected {}", one_of(expected)),
        };

        let snippet = view.snippet().annotation(
            AnnotationKind::Primary
                .span(view.caret_span(furthest..furthest))
                .label(&label),
        );
        view.render(&[Level::ERROR.primary_title(&title).element(snippet)])
    }
}

/// `a`, `a or b`, `a, b or c`.
fn one_of(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {last}", init.join(", ")),
    }
}

/// First line of `text`, shortened to the preview budget and escaped.
fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or("");
    let mut out: String = line.chars().take(PREVIEW_BUDGET).collect();
    if line.chars().count() > PREVIEW_BUDGET || line.len() < text.trim_end_matches('\n').len() {
        out.push('…');
    }
    out.escape_debug().to_string()
}
