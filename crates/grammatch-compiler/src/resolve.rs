//! Name resolution: builds the rule set and checks references.
//!
//! Two-pass approach:
//! 1. Collect all rule definitions, reporting duplicates
//! 2. Check that every referenced name is defined
//!
//! `EOF` is accepted without a definition and lowered to
//! [`Expr::EndOfInput`](grammatch_core::Expr::EndOfInput), unless the
//! grammar defines a rule by that name.

use grammatch_core::{END_OF_INPUT, Rule, RuleSet};
use indexmap::IndexMap;
use rowan::{TextRange, TextSize};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::ParseOutput;

pub(crate) fn resolve(output: ParseOutput) -> (RuleSet, Diagnostics) {
    let ParseOutput {
        rules: defs,
        references,
        mut diagnostics,
    } = output;

    let mut rules = RuleSet::new();
    let mut spans: IndexMap<String, TextRange> = IndexMap::new();

    // Pass 1: collect definitions
    for def in defs {
        if let Some(&first) = spans.get(&def.name) {
            diagnostics
                .report(DiagnosticKind::DuplicateDefinition, def.name_span)
                .message(&def.name)
                .related_to("first defined here", first)
                .emit();
            continue;
        }

        spans.insert(def.name.clone(), def.name_span);
        // Names are unique at this point
        let _ = rules.insert(Rule::new(def.name, def.expr));
    }

    // Pass 2: check references
    let end_is_rule = rules.contains(END_OF_INPUT);
    for site in &references {
        if rules.contains(&site.name) || (site.name == END_OF_INPUT && !end_is_rule) {
            continue;
        }
        diagnostics
            .report(DiagnosticKind::UndefinedReference, site.span)
            .message(&site.name)
            .emit();
    }

    if !end_is_rule {
        for rule in rules.iter_mut() {
            rule.expr.replace_reference_with_end(END_OF_INPUT);
        }
    }

    if rules.is_empty() && !diagnostics.has_errors() {
        diagnostics
            .report(
                DiagnosticKind::EmptyGrammar,
                TextRange::empty(TextSize::from(0)),
            )
            .emit();
    }

    (rules, diagnostics)
}
