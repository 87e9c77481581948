//! Execution result: the outcome of one attempt to run a rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ExecutionError;
use crate::id::RuleId;

/// Wall-clock instant at which an execution started.
pub type Timestamp = DateTime<Utc>;

/// Current wall-clock time, for stamping [`ExecutionResult::started_at`].
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Diagnostic record for one failed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionFailure {
    /// Position of the action in the rule's action list.
    pub index: usize,
    pub action_type: String,
    pub message: String,
}

/// Outcome of a single `execute_rule` call.
///
/// `error` is only set when the rule was refused before running
/// (not found or disabled). Per-action failures are counted in
/// `failed_actions` and detailed in `action_failures`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub rule_id: RuleId,
    pub success: bool,
    pub executed_actions: usize,
    pub failed_actions: usize,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ExecutionError>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub action_failures: Vec<ActionFailure>,
    pub started_at: Timestamp,
}

impl ExecutionResult {
    /// A result for a rule that was refused without running any action.
    #[must_use]
    pub fn refused(rule_id: RuleId, error: ExecutionError, started_at: Timestamp) -> Self {
        Self {
            rule_id,
            success: false,
            executed_actions: 0,
            failed_actions: 0,
            duration_ms: 0,
            error: Some(error),
            action_failures: Vec::new(),
            started_at,
        }
    }

    /// A result for a rule whose actions all ran.
    ///
    /// Success is derived: `true` iff `action_failures` is empty.
    #[must_use]
    pub fn completed(
        rule_id: RuleId,
        executed_actions: usize,
        action_failures: Vec<ActionFailure>,
        started_at: Timestamp,
        duration_ms: u64,
    ) -> Self {
        Self {
            rule_id,
            success: action_failures.is_empty(),
            executed_actions,
            failed_actions: action_failures.len(),
            duration_ms,
            error: None,
            action_failures,
            started_at,
        }
    }
}
