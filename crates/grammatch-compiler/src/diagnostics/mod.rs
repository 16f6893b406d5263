//! Grammar diagnostics: collection, builder, cascade filtering, rendering.

mod message;
mod printer;
mod snippet;

#[cfg(test)]
mod tests;

use rowan::TextRange;

pub use message::{DiagnosticKind, DiagnosticMessage, Fix, RelatedInfo, Severity};
pub use printer::DiagnosticsPrinter;
pub use snippet::SourceView;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Create a diagnostic with the given kind and span.
    ///
    /// Uses the kind's default message. Call `.message()` on the builder to override.
    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::with_default_message(kind, range),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|d| d.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(|d| d.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_warning()).count()
    }

    /// First error in emission order.
    pub fn first_error(&self) -> Option<&DiagnosticMessage> {
        self.messages.iter().find(|d| d.is_error())
    }

    /// Returns diagnostics with cascading errors suppressed.
    ///
    /// Suppression rules:
    /// 1. Containment: when a higher-priority span strictly contains another, suppress the inner
    /// 2. Same position: when spans start at the same position, root-cause errors suppress structural ones
    /// 3. Consequence errors (undefined references) suppressed when any primary error exists
    pub fn filtered(&self) -> Diagnostics {
        if self.messages.is_empty() {
            return Diagnostics::new();
        }

        let mut suppressed = vec![false; self.messages.len()];

        // Rule 3
        let has_primary_error = self
            .messages
            .iter()
            .any(|m| m.kind.is_root_cause_error() || m.kind.is_structural_error());
        if has_primary_error {
            for (i, msg) in self.messages.iter().enumerate() {
                if msg.kind.is_consequence_error() {
                    suppressed[i] = true;
                }
            }
        }

        // O(n²) but n is small
        for (i, a) in self.messages.iter().enumerate() {
            for (j, b) in self.messages.iter().enumerate() {
                if i == j || suppressed[i] || suppressed[j] {
                    continue;
                }

                // Rule 1
                if span_strictly_contains(a.range, b.range) && a.kind.suppresses(&b.kind) {
                    suppressed[j] = true;
                    continue;
                }

                // Rule 2
                if a.range.start() == b.range.start() {
                    if a.kind.is_root_cause_error() && b.kind.is_structural_error() {
                        suppressed[j] = true;
                        continue;
                    }
                    if a.kind.is_structural_error() && b.kind.is_root_cause_error() {
                        continue;
                    }
                    if a.kind.suppresses(&b.kind) {
                        suppressed[j] = true;
                    }
                }
            }
        }

        self.messages
            .iter()
            .zip(suppressed)
            .filter(|(_, suppressed)| !suppressed)
            .map(|(m, _)| m.clone())
            .collect()
    }

    pub fn render(&self, source: &str) -> String {
        self.printer().source(source).render()
    }

    pub fn render_colored(&self, source: &str, colored: bool) -> String {
        self.printer().source(source).colored(colored).render()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }
}

impl FromIterator<DiagnosticMessage> for Diagnostics {
    fn from_iter<T: IntoIterator<Item = DiagnosticMessage>>(iter: T) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DiagnosticMessage;
    type IntoIter = std::slice::Iter<'a, DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl<'a> DiagnosticBuilder<'a> {
    /// Provide custom detail for this diagnostic, rendered using the kind's template.
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        let detail = msg.into();
        self.message.message = self.message.kind.message(Some(&detail));
        self
    }

    pub fn related_to(mut self, msg: impl Into<String>, range: TextRange) -> Self {
        self.message.related.push(RelatedInfo::new(range, msg));
        self
    }

    pub fn fix(mut self, fix: Fix) -> Self {
        self.message.fix = Some(fix);
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}

/// Check if outer span strictly contains inner span (different start positions).
fn span_strictly_contains(outer: TextRange, inner: TextRange) -> bool {
    outer.start() < inner.start() && inner.end() <= outer.end()
}
