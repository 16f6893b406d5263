//! Rendering of grammar diagnostics.
//!
//! With the grammar source at hand each diagnostic becomes a snippet with
//! its related spans and, when the parser knows what is missing, a patched
//! copy of the line showing the insertion. Without source every diagnostic
//! is one plain line with byte offsets.

use std::fmt;

use annotate_snippets::{AnnotationKind, Group, Level};
use rowan::TextRange;

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};
use super::snippet::SourceView;

/// Builder for rendering diagnostics.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    fn report<'a>(&self, view: &SourceView<'a>, diag: &'a DiagnosticMessage) -> Vec<Group<'a>> {
        let mut snippet = view.snippet().annotation(
            AnnotationKind::Primary
                .span(view.caret_span(span(diag.range)))
                .label(&diag.message),
        );
        for related in &diag.related {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(view.caret_span(span(related.range)))
                    .label(&related.message),
            );
        }

        let mut title = level(diag.severity())
            .primary_title(&diag.message)
            .element(snippet);
        for hint in &diag.hints {
            title = title.element(Level::HELP.message(hint));
        }

        let mut report = vec![title];
        if let Some(fix) = &diag.fix {
            report.push(
                Level::HELP
                    .secondary_title(&fix.description)
                    .element(view.patched(span(fix.range), &fix.replacement)),
            );
        }
        report
    }
}

impl fmt::Display for DiagnosticsPrinter<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.source.map(|source| {
            SourceView::new(source)
                .path(self.path)
                .colored(self.colored)
        });

        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            match &view {
                Some(view) => f.write_str(&view.render(&self.report(view, diag)))?,
                None => write!(f, "{diag}")?,
            }
        }
        Ok(())
    }
}

fn level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

fn span(range: TextRange) -> std::ops::Range<usize> {
    range.start().into()..range.end().into()
}

impl Diagnostics {
    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}
