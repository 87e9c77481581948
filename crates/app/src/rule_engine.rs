//! Rule engine: evaluates events against rules and executes their actions.
//!
//! For each incoming event the engine takes every enabled rule, highest
//! priority first, tests its trigger, and runs the actions of each rule that
//! fires. Every execution attempt is appended to the execution log, including
//! attempts refused because the rule is missing or disabled.

use std::cmp::Reverse;
use std::time::Duration;

use serde::Deserialize;
use tokio::time::Instant;

use nautilus_domain::error::{ActionError, ExecutionError, NautilusError};
use nautilus_domain::event::Event;
use nautilus_domain::execution::{ActionFailure, ExecutionResult};
use nautilus_domain::id::RuleId;
use nautilus_domain::rule::{Action, Rule};

use crate::actions::ActionHandlerRegistry;
use crate::history::InMemoryExecutionLog;
use crate::listeners::ListenerRegistry;
use crate::ports::{ExecutionContext, ExecutionLog, RuleRepository};
use crate::rule_store::InMemoryRuleStore;

/// How the actions of a single rule are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// One after another, in list order.
    #[default]
    Sequential,
    /// All at once; no ordering among actions is promised.
    Concurrent,
}

/// Tuning knobs for [`RuleEngine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub execution: ExecutionMode,
    /// Deadline shared by all actions of one rule execution.
    pub rule_timeout: Option<Duration>,
}

/// Rule evaluation and execution engine.
///
/// Owns its rule store, execution log, action handlers and listeners.
/// Construct one explicitly and pass it by reference to callers.
pub struct RuleEngine<R, L> {
    rules: R,
    history: L,
    actions: ActionHandlerRegistry,
    listeners: ListenerRegistry,
    config: EngineConfig,
}

impl RuleEngine<InMemoryRuleStore, InMemoryExecutionLog> {
    /// Create an engine with an empty in-memory store and an unbounded
    /// in-memory log.
    #[must_use]
    pub fn in_memory(actions: ActionHandlerRegistry) -> Self {
        Self::new(InMemoryRuleStore::new(), InMemoryExecutionLog::new(), actions)
    }
}

impl<R, L> RuleEngine<R, L>
where
    R: RuleRepository,
    L: ExecutionLog,
{
    /// Create a new engine.
    pub fn new(rules: R, history: L, actions: ActionHandlerRegistry) -> Self {
        Self {
            rules,
            history,
            actions,
            listeners: ListenerRegistry::new(),
            config: EngineConfig::default(),
        }
    }

    /// Replace the engine configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    // ── Rule store ─────────────────────────────────────────────────

    /// Insert a rule, replacing any rule with the same id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self, rule), fields(rule_id = %rule.id))]
    pub async fn add_rule(&self, rule: Rule) -> Result<(), NautilusError> {
        self.rules.upsert(rule).await
    }

    /// Remove a rule. Missing ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn remove_rule(&self, id: &RuleId) -> Result<(), NautilusError> {
        if !self.rules.delete(id).await? {
            tracing::debug!("rule not present, nothing removed");
        }
        Ok(())
    }

    /// Look up a rule.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn get_rule(&self, id: &RuleId) -> Result<Option<Rule>, NautilusError> {
        self.rules.get_by_id(id).await
    }

    /// Snapshot of every stored rule.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn get_all_rules(&self) -> Result<Vec<Rule>, NautilusError> {
        self.rules.get_all().await
    }

    /// Enable a rule. Missing ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn enable_rule(&self, id: &RuleId) -> Result<(), NautilusError> {
        self.rules.set_enabled(id, true).await.map(|_found| ())
    }

    /// Disable a rule. Missing ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn disable_rule(&self, id: &RuleId) -> Result<(), NautilusError> {
        self.rules.set_enabled(id, false).await.map(|_found| ())
    }

    // ── Evaluation & execution ─────────────────────────────────────

    /// Check whether `rule` fires for `event`. Pure; ignores `enabled`.
    #[must_use]
    pub fn evaluate_trigger(&self, rule: &Rule, event: &Event) -> bool {
        rule.matches(event)
    }

    /// Run the actions of the rule stored under `id`.
    ///
    /// Missing and disabled rules, as well as failing actions, are reported
    /// inside the returned [`ExecutionResult`]. Exactly one entry is
    /// appended to the execution log per call.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the repository or the log fails.
    #[tracing::instrument(skip(self, ctx), fields(rule_id = %id))]
    pub async fn execute_rule(
        &self,
        id: &RuleId,
        ctx: &ExecutionContext<'_>,
    ) -> Result<ExecutionResult, NautilusError> {
        let started_at = nautilus_domain::execution::now();
        let start = Instant::now();

        let result = match self.rules.get_by_id(id).await? {
            None => {
                tracing::warn!("rule not found");
                ExecutionResult::refused(id.clone(), ExecutionError::RuleNotFound, started_at)
            }
            Some(rule) if !rule.enabled => {
                tracing::warn!("rule is disabled");
                ExecutionResult::refused(id.clone(), ExecutionError::RuleDisabled, started_at)
            }
            Some(rule) => {
                let (executed, failures) = self.run_actions(&rule.actions, ctx).await;
                let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                tracing::info!(
                    executed,
                    failed = failures.len(),
                    duration_ms,
                    "rule executed"
                );
                ExecutionResult::completed(id.clone(), executed, failures, started_at, duration_ms)
            }
        };

        self.history.append(result.clone()).await?;
        Ok(result)
    }

    /// Dispatch `event` to every enabled rule whose trigger fires.
    ///
    /// Rules run one at a time in descending priority; rules of equal
    /// priority keep store order. Results are returned in execution order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the repository or the log fails.
    #[tracing::instrument(skip(self, event), fields(event_type = event.event_type().unwrap_or("-")))]
    pub async fn process_event(&self, event: &Event) -> Result<Vec<ExecutionResult>, NautilusError> {
        let mut rules = self.rules.get_enabled().await?;
        rules.sort_by_key(|rule| Reverse(rule.priority));

        let ctx = ExecutionContext::for_event(event);
        let mut results = Vec::new();
        for rule in &rules {
            if !self.evaluate_trigger(rule, event) {
                tracing::debug!(rule_id = %rule.id, trigger = %rule.trigger, "trigger did not fire");
                continue;
            }
            results.push(self.execute_rule(&rule.id, &ctx).await?);
        }
        Ok(results)
    }

    /// Run `actions`, returning the success count and per-action failures.
    async fn run_actions(
        &self,
        actions: &[Action],
        ctx: &ExecutionContext<'_>,
    ) -> (usize, Vec<ActionFailure>) {
        let deadline = self.config.rule_timeout.map(|timeout| Instant::now() + timeout);

        let outcomes = match self.config.execution {
            ExecutionMode::Sequential => {
                let mut outcomes = Vec::with_capacity(actions.len());
                for action in actions {
                    outcomes.push(self.run_action(action, ctx, deadline).await);
                }
                outcomes
            }
            ExecutionMode::Concurrent => {
                futures::future::join_all(
                    actions
                        .iter()
                        .map(|action| self.run_action(action, ctx, deadline)),
                )
                .await
            }
        };

        let mut executed = 0;
        let mut failures = Vec::new();
        for (index, (action, outcome)) in actions.iter().zip(outcomes).enumerate() {
            match outcome {
                Ok(()) => executed += 1,
                Err(err) => {
                    tracing::warn!(index, action_type = %action.action_type, error = %err, "action failed");
                    failures.push(ActionFailure {
                        index,
                        action_type: action.action_type.clone(),
                        message: err.to_string(),
                    });
                }
            }
        }
        (executed, failures)
    }

    async fn run_action(
        &self,
        action: &Action,
        ctx: &ExecutionContext<'_>,
        deadline: Option<Instant>,
    ) -> Result<(), ActionError> {
        let Some(deadline) = deadline else {
            return self.actions.execute(action, ctx).await;
        };
        if Instant::now() >= deadline {
            return Err(ActionError::DeadlineExceeded);
        }
        tokio::time::timeout_at(deadline, self.actions.execute(action, ctx))
            .await
            .unwrap_or(Err(ActionError::DeadlineExceeded))
    }

    // ── History ────────────────────────────────────────────────────

    /// Snapshot of the execution log, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the log.
    pub async fn get_execution_history(&self) -> Result<Vec<ExecutionResult>, NautilusError> {
        self.history.get_all().await
    }

    /// Empty the execution log.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the log.
    pub async fn clear_history(&self) -> Result<(), NautilusError> {
        self.history.clear().await
    }

    // ── Listeners ──────────────────────────────────────────────────

    /// Register a callback for a named event.
    pub fn on(&self, name: impl Into<String>, callback: impl Fn() + Send + Sync + 'static) {
        self.listeners.on(name, callback);
    }

    /// Invoke every callback registered for `name`. Returns how many ran.
    pub fn emit(&self, name: &str) -> usize {
        self.listeners.emit(name)
    }
}
