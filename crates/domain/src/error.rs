//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`NautilusError`] via `#[from]` when crossing a port boundary.

/// Top-level error for fallible port operations.
///
/// Rule lookups, disabled rules and failing actions are *not* errors: they
/// are reported as data inside an
/// [`ExecutionResult`](crate::execution::ExecutionResult).
#[derive(Debug, thiserror::Error)]
pub enum NautilusError {
    /// A backing store (rule repository, execution log, …) failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Why a rule execution was refused before any action ran.
///
/// Serialized as its display message, so JSON output carries the same text
/// as logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, thiserror::Error)]
pub enum ExecutionError {
    /// No rule is stored under the requested identifier.
    #[error("Rule not found")]
    #[serde(rename = "Rule not found", alias = "rule_not_found")]
    RuleNotFound,
    /// The rule exists but is disabled.
    #[error("Rule is disabled")]
    #[serde(rename = "Rule is disabled", alias = "rule_disabled")]
    RuleDisabled,
}

/// Failure of a single action inside a rule execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The action's configuration asked it to fail.
    #[error("simulated failure")]
    SimulatedFailure,
    /// No handler is registered for the action type.
    #[error("unknown action type: {0}")]
    UnknownActionType(String),
    /// The action's configuration is missing or has an invalid field.
    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: String, reason: String },
    /// The rule deadline elapsed before the action completed.
    #[error("deadline exceeded")]
    DeadlineExceeded,
    /// The handler reported a failure of its own.
    #[error("handler failed: {0}")]
    Handler(String),
}
