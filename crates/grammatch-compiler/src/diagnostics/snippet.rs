//! Source snippets shared by grammar diagnostics and match reports.

use std::ops::Range;

use annotate_snippets::{Annotation, Group, Patch, Renderer, Snippet};

/// A text shown under a report: the grammar source or a matched input.
#[derive(Clone, Copy, Debug)]
pub struct SourceView<'s> {
    source: &'s str,
    path: Option<&'s str>,
    colored: bool,
}

impl<'s> SourceView<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            path: None,
            colored: false,
        }
    }

    pub fn path(mut self, path: Option<&'s str>) -> Self {
        self.path = path;
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    /// The whole text, ready for annotations.
    pub fn snippet(&self) -> Snippet<'s, Annotation<'s>> {
        Snippet::source(self.source).line_start(1).path(self.path)
    }

    /// The whole text with `replacement` spliced over `span`.
    pub fn patched(&self, span: Range<usize>, replacement: &'s str) -> Snippet<'s, Patch<'s>> {
        Snippet::source(self.source)
            .line_start(1)
            .path(self.path)
            .patch(Patch::new(span, replacement))
    }

    /// Widens an empty span to the character it points at, so the caret shows.
    ///
    /// At the end of the text the span stays empty.
    pub fn caret_span(&self, span: Range<usize>) -> Range<usize> {
        if !span.is_empty() {
            return span;
        }
        let width = self
            .source
            .get(span.start..)
            .and_then(|rest| rest.chars().next())
            .map_or(0, char::len_utf8);
        span.start..span.start + width
    }

    pub fn render(&self, report: &[Group<'_>]) -> String {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };
        renderer.render(report)
    }
}
