//! Errors that can occur during matching.
//!
//! A failed match is not an error; these are usage faults and exhausted budgets.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// Start rule (or a referenced rule) missing from the rule set.
    #[error("rule `{0}` is not defined")]
    UnknownRule(String),

    #[error("grammar has no rules to match with")]
    EmptyRuleSet,

    /// Execution fuel exhausted (too many matching steps).
    #[error("runtime execution limit of {0} steps exceeded")]
    ExecFuelExhausted(u32),

    /// Recursion fuel exhausted (expressions and rule calls nested too deeply).
    #[error("runtime recursion limit of {0} nested expressions exceeded")]
    RecursionLimitExceeded(u32),
}
