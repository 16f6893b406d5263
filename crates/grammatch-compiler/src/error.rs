//! The error returned when a grammar does not compile.

use grammatch_core::{LineCol, LineIndex};
use rowan::TextRange;

use crate::diagnostics::{DiagnosticMessage, Diagnostics};
use crate::dialect::Dialect;

/// A grammar that failed to compile.
///
/// Carries the first error (message and position) for one-line reporting
/// and the full, cascade-filtered diagnostics for rendering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{dialect} grammar error at {position}: {message}")]
pub struct GrammarError {
    dialect: Dialect,
    message: String,
    range: TextRange,
    position: LineCol,
    diagnostics: Diagnostics,
}

impl GrammarError {
    /// Builds the error from diagnostics that contain at least one error.
    pub(crate) fn from_diagnostics(
        dialect: Dialect,
        source: &str,
        diagnostics: &Diagnostics,
    ) -> Option<Self> {
        let diagnostics = diagnostics.filtered();
        let first: &DiagnosticMessage = diagnostics.first_error()?;
        let range = first.range();
        let position = LineIndex::new(source).line_col(u32::from(range.start()) as usize);

        Some(Self {
            dialect,
            message: first.message().to_string(),
            range,
            position,
            diagnostics,
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Message of the first error.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte offset of the first error in the grammar source.
    pub fn offset(&self) -> usize {
        u32::from(self.range.start()) as usize
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    /// 1-based line of the first error.
    pub fn line(&self) -> u32 {
        self.position.line
    }

    /// 1-based character column of the first error.
    pub fn column(&self) -> u32 {
        self.position.column
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Renders every diagnostic against the grammar source.
    pub fn render(&self, source: &str) -> String {
        self.diagnostics.render(source)
    }
}
